//! Shared configuration, domain types, and normalization rules for invsync.

mod app_config;
mod config;
pub mod normalize;
mod products;
mod report;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use products::{CandidateProduct, RackSpaceCandidate};
pub use report::{BatchReport, RowError};
