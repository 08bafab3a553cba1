//! New-product import pipeline.
//!
//! Parses a catalog CSV, filters out rows already known remotely or
//! duplicated within the file, derives the color attribute, and uploads
//! surviving candidates one at a time. Per-row failures are logged and
//! counted, never fatal to the run.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use invsync_api::{InventoryClient, NewProduct};
use invsync_core::normalize::{extract_color, normalize_style_code};
use invsync_core::{BatchReport, CandidateProduct, RowError};

use crate::error::ImportError;
use crate::rows::{read_rows, RawRow};
use crate::run::{RunContext, RunState};

/// Number of candidates shown in a preview.
pub const PREVIEW_ROWS: usize = 5;

/// Final tally of an import upload.
#[derive(Debug)]
pub struct ImportOutcome {
    pub successful: usize,
    pub total: usize,
    pub report: BatchReport,
}

impl ImportOutcome {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total - self.successful
    }
}

/// One import run: parse and filter, then upload.
#[derive(Debug, Default)]
pub struct ImportRun {
    context: RunContext,
    candidates: Vec<CandidateProduct>,
}

impl ImportRun {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.context.state()
    }

    #[must_use]
    pub fn candidates(&self) -> &[CandidateProduct] {
        &self.candidates
    }

    /// The first few candidates, for display before committing to an upload.
    #[must_use]
    pub fn preview(&self) -> &[CandidateProduct] {
        &self.candidates[..self.candidates.len().min(PREVIEW_ROWS)]
    }

    /// Parses the CSV, fetches the remote listing once, and filters rows
    /// down to upload candidates. Returns the number of survivors.
    ///
    /// # Errors
    ///
    /// - [`ImportError::Csv`] on a parse failure (nothing is sent).
    /// - [`ImportError::Api`] when the existing listing cannot be fetched.
    /// - [`ImportError::InvalidState`] when called mid-upload.
    pub async fn plan<R: Read>(
        &mut self,
        input: R,
        client: &InventoryClient,
    ) -> Result<usize, ImportError> {
        self.context.begin_parse()?;

        let rows = match read_rows(input) {
            Ok(rows) => rows,
            Err(e) => {
                self.context.parse_failed();
                return Err(e);
            }
        };

        let existing = match client.list_products(None).await {
            Ok(products) => products
                .into_iter()
                .map(|p| p.style_code)
                .collect::<HashSet<String>>(),
            Err(e) => {
                self.context.parse_failed();
                return Err(e.into());
            }
        };

        self.candidates = filter_candidates(&rows, &existing);
        self.context.parse_succeeded(self.candidates.len());
        tracing::info!(
            candidates = self.candidates.len(),
            parsed_rows = rows.len(),
            "import plan ready"
        );
        Ok(self.candidates.len())
    }

    /// Uploads the planned candidates strictly sequentially, in file order.
    ///
    /// `on_progress` fires after every row with `floor(done/total*100)`.
    /// A row that fails numeric coercion or is rejected by the server is
    /// recorded in the report and the run continues.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidState`] unless a plan with at least
    /// one candidate has completed.
    pub async fn upload<P: FnMut(u8)>(
        &mut self,
        client: &InventoryClient,
        mut on_progress: P,
    ) -> Result<ImportOutcome, ImportError> {
        self.context.begin_upload()?;

        let total = self.candidates.len();
        let mut report = BatchReport::new();

        for (index, candidate) in self.candidates.iter().enumerate() {
            let row_number = index + 1;
            match create_payload(candidate) {
                Ok(payload) => match client.create_product(&payload).await {
                    Ok(()) => report.record_success(),
                    Err(e) => {
                        tracing::warn!(
                            row = row_number,
                            style_code = %candidate.style_code,
                            error = %e,
                            "failed to upload product"
                        );
                        report.record_error(RowError {
                            row: row_number,
                            message: e.row_message(),
                            row_data: candidate_row_data(candidate),
                        });
                    }
                },
                Err(message) => {
                    tracing::warn!(
                        row = row_number,
                        style_code = %candidate.style_code,
                        %message,
                        "skipping product with malformed numeric field"
                    );
                    report.record_error(RowError {
                        row: row_number,
                        message,
                        row_data: candidate_row_data(candidate),
                    });
                }
            }

            #[allow(clippy::cast_possible_truncation)]
            on_progress((row_number * 100 / total) as u8);
        }

        self.context.finish();
        Ok(ImportOutcome {
            successful: report.success_count,
            total,
            report,
        })
    }
}

/// Filters parsed catalog rows down to upload candidates, in file order.
///
/// A row survives when its normalized van code is non-empty, unseen so far
/// in this run, and absent from `existing` (the remote style-code set).
/// First occurrence wins; later duplicates are silently dropped.
#[must_use]
pub fn filter_candidates(
    rows: &[RawRow],
    existing: &HashSet<String>,
) -> Vec<CandidateProduct> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for row in rows {
        let style_code = normalize_style_code(row.get("van").unwrap_or(""));
        if style_code.is_empty() || seen.contains(&style_code) || existing.contains(&style_code) {
            continue;
        }
        seen.insert(style_code.clone());

        candidates.push(CandidateProduct {
            style_id: row.get("style id").unwrap_or("").to_string(),
            style_name: row.get("style name").unwrap_or("").to_string(),
            mrp: row.get("mrp").unwrap_or("").to_string(),
            color: extract_color(row.get("seller sku code")),
            style_code,
        });
    }

    candidates
}

/// Coerces a candidate's numeric fields into the create payload.
///
/// Fails with a row-level message when `style_id`, `mrp`, or `style_code`
/// is not a number — the server would reject such a payload anyway.
fn create_payload(candidate: &CandidateProduct) -> Result<NewProduct, String> {
    let style_id = candidate
        .style_id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid style id '{}'", candidate.style_id))?;
    let mrp = candidate
        .mrp
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid mrp '{}'", candidate.mrp))?;
    let style_code = candidate
        .style_code
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid style code '{}'", candidate.style_code))?;

    Ok(NewProduct {
        style_id,
        style_name: candidate.style_name.clone(),
        color: candidate.color.clone(),
        mrp,
        rack_space: None,
        style_code,
    })
}

fn candidate_row_data(candidate: &CandidateProduct) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("style_id".to_string(), candidate.style_id.clone()),
        ("style_name".to_string(), candidate.style_name.clone()),
        ("mrp".to_string(), candidate.mrp.clone()),
        ("color".to_string(), candidate.color.clone()),
        ("style_code".to_string(), candidate.style_code.clone()),
    ])
}
