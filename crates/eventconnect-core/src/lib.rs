use serde::{Deserialize, Serialize};

pub mod event;

/// Aggregated outcome of one import run.
///
/// Every item yields an explicit success or failure; the loop records each
/// outcome here instead of swallowing failures after logging them.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Number of items attempted, successful or not.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_both_outcomes() {
        let mut report = ImportReport::default();
        report.record_success();
        report.record_success();
        report.record_failure();
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
    }
}
