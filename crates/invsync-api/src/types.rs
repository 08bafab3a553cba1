//! Wire types for the inventory API.
//!
//! ## Observed shapes
//!
//! ### `style_code`
//! Created as a JSON number (`POST /api/product` coerces it), but the
//! listing endpoint has been seen returning it both as a number and as a
//! string on older records. It is normalized to `String` at
//! deserialization time since every consumer joins on the trimmed string
//! form.
//!
//! ### Error bodies
//! Product endpoints respond with `{"msg": ...}` on failure; the auth
//! endpoints use `{"message": ...}`. Both are tried when surfacing a
//! server message.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A product record from `GET /api/product`.
///
/// Only `id` and `style_code` drive the pipelines; the remaining fields are
/// carried for listing output and tolerate absence.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub style_code: String,
    #[serde(default)]
    pub style_id: Option<i64>,
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub rack_space: Option<String>,
}

/// Create payload for `POST /api/product`.
///
/// `rack_space` is omitted from the body when `None` — the importer never
/// sets it and the server applies its own default.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub style_id: i64,
    pub style_name: String,
    pub color: String,
    pub mrp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_space: Option<String>,
    pub style_code: i64,
}

/// A color record from `GET /api/v1/colors/get-colors`.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub style_code: i64,
    pub color: String,
}

/// Envelope around the colors listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ColorsResponse {
    pub data: Vec<ColorRecord>,
}

/// Login payload, forwarded as-is to `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration payload for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Accepts a JSON string or number and yields its string form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number for style_code, got {other}"
        ))),
    }
}
