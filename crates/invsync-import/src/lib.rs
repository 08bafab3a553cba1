//! The two CSV pipelines of invsync: the new-product importer and the
//! rack-space updater, plus the shared row reader, batched-map utility,
//! and per-run state machine.

pub mod batch;
mod error;
mod importer;
mod rack_space;
mod rows;
mod run;

pub use error::ImportError;
pub use importer::{filter_candidates, ImportOutcome, ImportRun, PREVIEW_ROWS};
pub use rack_space::{build_product_map, preview_candidates, UpdateRun};
pub use rows::{read_rows, RawRow};
pub use run::{RunContext, RunState};
