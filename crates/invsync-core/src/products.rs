use serde::{Deserialize, Serialize};

/// A catalog row that survived import filtering, ready to be created remotely.
///
/// All fields stay as the strings read from the CSV; numeric coercion of
/// `style_id`, `mrp`, and `style_code` happens when the create payload is
/// built, so a malformed number fails that row rather than the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProduct {
    pub style_id: String,
    pub style_name: String,
    pub mrp: String,
    pub color: String,
    /// Normalized van code (see [`crate::normalize::normalize_style_code`]).
    pub style_code: String,
}

/// A stock row that survived rack-space preview filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackSpaceCandidate {
    pub rack_space: String,
    /// Join key: SKU segment before the first `'-'`.
    pub sku_prefix: String,
    pub in_stock: i64,
}
