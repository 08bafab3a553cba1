//! Command handlers for the CLI.
//!
//! These are called from `main` after config and logging are established.
//! Row-level failures are reported in the final summary rather than
//! propagated, so a single bad row never aborts a full run.

pub(crate) mod auth;
pub(crate) mod import;
pub(crate) mod products;
pub(crate) mod rack_space;

use invsync_api::{InventoryClient, SessionToken};
use invsync_core::AppConfig;

/// Builds the API client from config, installing a pre-established session
/// token when one is configured.
pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<InventoryClient> {
    let mut client = InventoryClient::with_options(
        &config.api_base_url,
        config.request_timeout_secs,
        config.update_timeout_secs,
        &config.user_agent,
    )?;
    if let Some(token) = &config.session_token {
        client.set_session(SessionToken::new(token.clone()));
    }
    Ok(client)
}
