//! Run aggregation: counters and the final verdict.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::attacher::AttachmentResult;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// At least one attachment succeeded.
    Succeeded,
    /// Nothing was attached, whether because nothing was discovered or
    /// because every attempt failed.
    NothingAttached,
}

/// Running counters over a run's attachment attempts.
///
/// Best-effort by design: one success makes the run a success even when
/// other attempts failed. Bulk attachment across a hierarchy must not be
/// all-or-nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentReport {
    /// Attempts issued.
    pub attempted: u32,
    /// Attempts that succeeded.
    pub succeeded: u32,
    /// Attempts that failed.
    pub failed: u32,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished, once [`finish`](Self::finish) is called.
    pub finished_at: Option<DateTime<Utc>>,
}

impl AttachmentReport {
    /// Creates an empty report stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records one attachment result.
    pub fn record(&mut self, result: &AttachmentResult) {
        self.attempted += 1;
        if result.succeeded() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Stamps the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the run verdict.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.succeeded > 0 {
            Verdict::Succeeded
        } else {
            Verdict::NothingAttached
        }
    }

    /// Returns true when the run succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.verdict(), Verdict::Succeeded)
    }
}

impl Default for AttachmentReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacher::AttachmentStatus;

    fn result(succeeded: bool) -> AttachmentResult {
        AttachmentResult {
            entry_name: "projects/p/locations/l/entryGroups/g/entries/e".to_string(),
            column: None,
            status: if succeeded {
                AttachmentStatus::Succeeded
            } else {
                AttachmentStatus::Failed {
                    status: 500,
                    message: "boom".to_string(),
                }
            },
        }
    }

    #[test]
    fn partial_failure_still_succeeds() {
        let mut report = AttachmentReport::new();
        report.record(&result(true));
        report.record(&result(true));
        report.record(&result(false));
        report.finish();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.verdict(), Verdict::Succeeded);
    }

    #[test]
    fn zero_successes_is_nothing_attached() {
        let mut report = AttachmentReport::new();
        assert_eq!(report.verdict(), Verdict::NothingAttached);

        report.record(&result(false));
        assert_eq!(report.verdict(), Verdict::NothingAttached);
        assert!(!report.is_success());
    }
}
