//! Pure normalization rules shared by both CSV pipelines.
//!
//! These encode the vendor conventions of the catalog feed: the van/style
//! prefix remapping, the dash-delimited color segment inside seller SKUs,
//! and the SKU prefix used to join stock rows to catalog products.

use regex::Regex;

/// Normalizes a vendor van code into a style code.
///
/// A leading `'8'` is replaced with `'1'` and a leading `'5'` with `'3'`;
/// only the first character is touched and every other code passes through
/// unchanged. Empty input stays empty.
#[must_use]
pub fn normalize_style_code(van: &str) -> String {
    let mut chars = van.chars();
    match chars.next() {
        Some('8') => format!("1{}", chars.as_str()),
        Some('5') => format!("3{}", chars.as_str()),
        _ => van.to_string(),
    }
}

/// Extracts the color segment from a seller SKU code.
///
/// The color is the dash-delimited middle group of the SKU
/// (e.g. `"ABC-RED-123"` → `"RED"`). Returns `"other"` when the SKU is
/// absent or has no such group.
#[must_use]
pub fn extract_color(seller_sku: Option<&str>) -> String {
    let pattern = Regex::new(r"^.*-(.*?)-.*$").expect("valid regex");
    seller_sku
        .and_then(|sku| pattern.captures(sku))
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| "other".to_string())
}

/// Returns the segment of a SKU before the first `'-'`.
///
/// The input is trimmed first; a SKU with no dash yields the whole trimmed
/// string, and an empty SKU yields an empty prefix.
#[must_use]
pub fn sku_prefix(sku: &str) -> &str {
    let trimmed = sku.trim();
    trimmed.split('-').next().unwrap_or(trimmed)
}
