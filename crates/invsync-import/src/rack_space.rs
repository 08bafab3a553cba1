//! Rack-space update pipeline.
//!
//! Joins stock CSV rows to previously fetched products by SKU prefix and
//! issues batched update calls. The preview pass filters by stock and
//! dedups by prefix; the execute pass deliberately re-reads the whole file
//! and submits every row, so out-of-stock and duplicate rows surface as
//! row errors in the report.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use invsync_api::{InventoryClient, Product};
use invsync_core::normalize::sku_prefix;
use invsync_core::{BatchReport, RackSpaceCandidate, RowError};

use crate::batch::batched_map;
use crate::error::ImportError;
use crate::importer::PREVIEW_ROWS;
use crate::rows::{read_rows, RawRow};
use crate::run::{RunContext, RunState};

/// Indexes a product listing by trimmed style code.
///
/// Products with an empty style code are skipped; when two products share a
/// code the later listing entry wins. The map is built once per run and
/// read-only during upload.
#[must_use]
pub fn build_product_map(products: Vec<Product>) -> HashMap<String, Product> {
    let mut map = HashMap::new();
    for product in products {
        let key = product.style_code.trim().to_string();
        if !key.is_empty() {
            map.insert(key, product);
        }
    }
    map
}

/// Filters stock rows down to the preview set, in file order: positive
/// `InStock`, non-empty SKU prefix, first occurrence of each prefix.
#[must_use]
pub fn preview_candidates(rows: &[RawRow]) -> Vec<RackSpaceCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for row in rows {
        let Ok(in_stock) = row.get("InStock").unwrap_or("").trim().parse::<i64>() else {
            continue;
        };
        if in_stock <= 0 {
            continue;
        }

        let prefix = sku_prefix(row.get("Item SkuCode").unwrap_or("")).to_string();
        if prefix.is_empty() || !seen.insert(prefix.clone()) {
            continue;
        }

        candidates.push(RackSpaceCandidate {
            rack_space: row.get("Rack Space").unwrap_or("").to_string(),
            sku_prefix: prefix,
            in_stock,
        });
    }

    candidates
}

/// One rack-space update run: preview, then batched execution.
#[derive(Debug, Default)]
pub struct UpdateRun {
    context: RunContext,
    candidates: Vec<RackSpaceCandidate>,
}

impl UpdateRun {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.context.state()
    }

    /// The first few preview candidates.
    #[must_use]
    pub fn preview(&self) -> &[RackSpaceCandidate] {
        &self.candidates[..self.candidates.len().min(PREVIEW_ROWS)]
    }

    /// Parses the CSV and builds the preview set. Returns the number of
    /// surviving candidates.
    ///
    /// # Errors
    ///
    /// - [`ImportError::Csv`] on a parse failure.
    /// - [`ImportError::InvalidState`] when called mid-upload.
    pub fn plan<R: Read>(&mut self, input: R) -> Result<usize, ImportError> {
        self.context.begin_parse()?;

        let rows = match read_rows(input) {
            Ok(rows) => rows,
            Err(e) => {
                self.context.parse_failed();
                return Err(e);
            }
        };

        self.candidates = preview_candidates(&rows);
        self.context.parse_succeeded(self.candidates.len());
        tracing::info!(
            candidates = self.candidates.len(),
            parsed_rows = rows.len(),
            "rack-space plan ready"
        );
        Ok(self.candidates.len())
    }

    /// Re-parses the entire file and updates every row in sequential
    /// batches of `batch_size`, rows within a batch running concurrently.
    ///
    /// `on_progress` fires after each batch. Row failures (missing SKU,
    /// unmatched prefix, missing server echo, network errors) land in the
    /// returned report; the run always proceeds across all batches.
    ///
    /// # Errors
    ///
    /// - [`ImportError::InvalidState`] unless a plan with at least one
    ///   candidate has completed.
    /// - [`ImportError::Csv`] when the re-parse fails.
    pub async fn execute<R: Read, P: FnMut(u8)>(
        &mut self,
        input: R,
        client: &InventoryClient,
        products: &HashMap<String, Product>,
        batch_size: usize,
        on_progress: P,
    ) -> Result<BatchReport, ImportError> {
        self.context.begin_upload()?;

        let rows = match read_rows(input) {
            Ok(rows) => rows,
            Err(e) => {
                self.context.parse_failed();
                return Err(e);
            }
        };

        let outcomes = batched_map(
            rows,
            batch_size,
            |index, row| process_row(client, products, index + 1, row),
            on_progress,
        )
        .await;

        let mut report = BatchReport::new();
        report.absorb(outcomes);
        self.context.finish();

        tracing::info!(
            success = report.success_count,
            errors = report.error_count,
            "rack-space update finished"
        );
        Ok(report)
    }
}

/// Validates one stock row and issues its update call.
async fn process_row(
    client: &InventoryClient,
    products: &HashMap<String, Product>,
    row_number: usize,
    row: RawRow,
) -> Result<(), RowError> {
    let sku = row.get("Item SkuCode").unwrap_or("").trim().to_string();
    if sku.is_empty() {
        return Err(row_error(row_number, "Missing Item SkuCode".to_string(), &row));
    }

    let prefix = sku_prefix(&sku);
    if prefix.is_empty() {
        return Err(row_error(row_number, format!("Invalid SKU format: {sku}"), &row));
    }

    let Some(product) = products.get(prefix) else {
        return Err(row_error(
            row_number,
            format!("No matching product found for SKU {prefix}"),
            &row,
        ));
    };

    let rack_space = row.get("Rack Space").unwrap_or("").trim().to_string();
    match client.update_rack_space(&product.id, &rack_space).await {
        // Success requires the server to echo the updated product back.
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(row_error(
            row_number,
            "Product not found or update failed".to_string(),
            &row,
        )),
        Err(e) => Err(row_error(row_number, e.row_message(), &row)),
    }
}

fn row_error(row_number: usize, message: String, row: &RawRow) -> RowError {
    RowError {
        row: row_number,
        message,
        row_data: row.to_map(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_row(sku: &str, rack: &str, in_stock: &str) -> RawRow {
        RawRow::from_pairs([
            ("Item SkuCode", sku),
            ("Rack Space", rack),
            ("InStock", in_stock),
        ])
    }

    fn product(id: &str, style_code: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "style_code": style_code,
        }))
        .unwrap()
    }

    #[test]
    fn preview_keeps_only_positive_stock() {
        let rows = vec![
            stock_row("14321-XL", "A-12", "3"),
            stock_row("36789-M", "B-07", "0"),
            stock_row("21111-S", "C-01", "not-a-number"),
        ];
        let candidates = preview_candidates(&rows);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].sku_prefix, "14321");
        assert_eq!(candidates[0].in_stock, 3);
    }

    #[test]
    fn preview_dedups_by_prefix_first_wins() {
        let rows = vec![
            stock_row("14321-XL", "A-12", "3"),
            stock_row("14321-M", "Z-99", "7"),
        ];
        let candidates = preview_candidates(&rows);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rack_space, "A-12");
    }

    #[test]
    fn preview_drops_rows_without_a_prefix() {
        let rows = vec![stock_row("", "A-12", "3"), stock_row("   ", "B-07", "5")];
        assert!(preview_candidates(&rows).is_empty());
    }

    #[test]
    fn product_map_trims_keys_and_skips_empty_codes() {
        let map = build_product_map(vec![
            product("p1", " 14321 "),
            product("p2", ""),
            product("p3", "36789"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("14321").unwrap().id, "p1");
        assert!(map.contains_key("36789"));
    }

    #[test]
    fn product_map_later_listing_entry_wins() {
        let map = build_product_map(vec![product("p1", "14321"), product("p2", "14321")]);
        assert_eq!(map.get("14321").unwrap().id, "p2");
    }
}
