use std::collections::BTreeMap;

use serde::Serialize;

/// A single failed row from an upload run.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// 1-based row number in file order (header excluded).
    pub row: usize,
    pub message: String,
    /// The raw row as parsed, kept for error display.
    pub row_data: BTreeMap<String, String>,
}

/// Success/error totals accumulated across one upload run.
///
/// Reset at the start of each run and never persisted; batch outcomes are
/// folded in only after the whole batch has completed.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchReport {
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<RowError>,
}

impl BatchReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_error(&mut self, error: RowError) {
        self.error_count += 1;
        self.errors.push(error);
    }

    /// Folds a completed batch of per-row outcomes into the report.
    pub fn absorb(&mut self, outcomes: Vec<Result<(), RowError>>) {
        for outcome in outcomes {
            match outcome {
                Ok(()) => self.record_success(),
                Err(e) => self.record_error(e),
            }
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.error_count
    }
}
