//! Typed HTTP client for the remote inventory API.

mod client;
mod error;
mod session;
mod types;

pub use client::InventoryClient;
pub use error::ApiError;
pub use session::SessionToken;
pub use types::{ColorRecord, Credentials, NewProduct, Product, RegisterPayload};
