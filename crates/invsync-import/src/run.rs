//! Per-run pipeline state machine.
//!
//! `Idle → Parsing → (ParseError | Ready) → Uploading → Done`. Each run
//! owns its own context; there is no ambient state shared between runs.

use crate::error::ImportError;

/// Phase of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Parsing,
    ParseError,
    Ready,
    Uploading,
    Done,
}

/// Explicit per-run context tracking phase transitions.
///
/// `Ready` requires at least one surviving candidate; the upload phase is
/// reachable only from `Ready`, and re-entry is rejected until the run has
/// reached `Done`.
#[derive(Debug)]
pub struct RunContext {
    state: RunState,
}

impl RunContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Enters the parse phase. A new file may be selected at any point
    /// except while an upload is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidState`] when called during `Uploading`.
    pub fn begin_parse(&mut self) -> Result<(), ImportError> {
        if self.state == RunState::Uploading {
            return Err(ImportError::InvalidState {
                state: self.state,
                action: "parse a new file",
            });
        }
        self.state = RunState::Parsing;
        Ok(())
    }

    /// Records a fatal parse failure.
    pub fn parse_failed(&mut self) {
        self.state = RunState::ParseError;
    }

    /// Records a completed parse: `Ready` when at least one candidate
    /// survived filtering, back to `Idle` otherwise.
    pub fn parse_succeeded(&mut self, surviving_candidates: usize) {
        self.state = if surviving_candidates > 0 {
            RunState::Ready
        } else {
            RunState::Idle
        };
    }

    /// Enters the upload phase.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidState`] unless the run is `Ready`.
    pub fn begin_upload(&mut self) -> Result<(), ImportError> {
        if self.state != RunState::Ready {
            return Err(ImportError::InvalidState {
                state: self.state,
                action: "start an upload",
            });
        }
        self.state = RunState::Uploading;
        Ok(())
    }

    /// Marks the run complete.
    pub fn finish(&mut self) {
        self.state = RunState::Done;
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle() {
        let mut run = RunContext::new();
        assert_eq!(run.state(), RunState::Idle);
        run.begin_parse().unwrap();
        assert_eq!(run.state(), RunState::Parsing);
        run.parse_succeeded(3);
        assert_eq!(run.state(), RunState::Ready);
        run.begin_upload().unwrap();
        assert_eq!(run.state(), RunState::Uploading);
        run.finish();
        assert_eq!(run.state(), RunState::Done);
    }

    #[test]
    fn zero_candidates_returns_to_idle() {
        let mut run = RunContext::new();
        run.begin_parse().unwrap();
        run.parse_succeeded(0);
        assert_eq!(run.state(), RunState::Idle);
        assert!(run.begin_upload().is_err(), "no candidates, no upload");
    }

    #[test]
    fn upload_requires_ready() {
        let mut run = RunContext::new();
        assert!(run.begin_upload().is_err());
        run.begin_parse().unwrap();
        run.parse_failed();
        assert_eq!(run.state(), RunState::ParseError);
        assert!(run.begin_upload().is_err());
    }

    #[test]
    fn upload_is_not_reentrant() {
        let mut run = RunContext::new();
        run.begin_parse().unwrap();
        run.parse_succeeded(1);
        run.begin_upload().unwrap();
        assert!(run.begin_upload().is_err(), "re-entry before Done");
        assert!(run.begin_parse().is_err(), "no new file mid-upload");
        run.finish();
        assert!(run.begin_parse().is_ok(), "a finished run can start over");
    }
}
