use thiserror::Error;

use crate::run::RunState;

/// Errors that abort a pipeline run.
///
/// Row-level failures never take this form — they are recorded in the run's
/// [`invsync_core::BatchReport`] and the run continues.
#[derive(Debug, Error)]
pub enum ImportError {
    /// CSV parse failure: fatal to the run, nothing is sent.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A pre-upload API call failed (e.g. fetching the existing listing).
    #[error(transparent)]
    Api(#[from] invsync_api::ApiError),

    /// A run-phase transition was attempted out of order.
    #[error("cannot {action} while the run is {state:?}")]
    InvalidState {
        state: RunState,
        action: &'static str,
    },
}
