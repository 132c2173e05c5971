// ==========================================
// O&M Readiness Tracker - Progress Aggregator
// ==========================================
// Input: all progress entries of one scheme
// Output: ProgressSummary (avg percent, critical-path days)
// Pure computation; data access stays with the caller.
// ==========================================

use crate::domain::evaluation::ProgressSummary;
use crate::domain::progress::ProgressEntry;

pub struct ProgressAggregator {
    // stateless
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// Aggregate one scheme's entries
    ///
    /// - avg_progress: mean of calculated percents, 1 decimal, never negative
    /// - max_days_remaining: the slowest component, not the sum
    /// - no entries: both zero
    pub fn aggregate(&self, entries: &[ProgressEntry]) -> ProgressSummary {
        if entries.is_empty() {
            return ProgressSummary::default();
        }

        let total: f64 = entries.iter().map(|e| e.value.calculated_percent()).sum();
        let mean = total / entries.len() as f64;

        let max_days_remaining = entries
            .iter()
            .map(|e| e.days_remaining)
            .max()
            .unwrap_or(0);

        ProgressSummary {
            avg_progress: round1(mean).max(0.0),
            max_days_remaining,
            entry_count: entries.len(),
        }
    }
}

impl Default for ProgressAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::ProgressValue;

    fn entry(component_id: i64, value: ProgressValue, days: i64) -> ProgressEntry {
        ProgressEntry {
            scheme_id: "S1".to_string(),
            component_id,
            progress_percent: value.calculated_percent(),
            value,
            days_remaining: days,
            remarks: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_empty_scheme_is_zero() {
        let summary = ProgressAggregator::new().aggregate(&[]);
        assert_eq!(summary.avg_progress, 0.0);
        assert_eq!(summary.max_days_remaining, 0);
        assert_eq!(summary.entry_count, 0);
    }

    #[test]
    fn test_single_metric_half_done() {
        let entries = vec![entry(
            1,
            ProgressValue::Metric {
                target: 100.0,
                achieved: 50.0,
            },
            30,
        )];
        let summary = ProgressAggregator::new().aggregate(&entries);
        assert_eq!(summary.avg_progress, 50.0);
        assert_eq!(summary.max_days_remaining, 30);
    }

    #[test]
    fn test_zero_target_contributes_zero() {
        let entries = vec![
            entry(
                1,
                ProgressValue::Metric {
                    target: 0.0,
                    achieved: 40.0,
                },
                5,
            ),
            entry(2, ProgressValue::Task { percent: 80.0 }, 12),
        ];
        let summary = ProgressAggregator::new().aggregate(&entries);
        assert_eq!(summary.avg_progress, 40.0);
        assert_eq!(summary.max_days_remaining, 12);
    }

    #[test]
    fn test_mean_is_rounded_to_one_decimal() {
        let entries = vec![
            entry(1, ProgressValue::Task { percent: 10.0 }, 1),
            entry(2, ProgressValue::Task { percent: 20.0 }, 2),
            entry(3, ProgressValue::Task { percent: 25.0 }, 3),
        ];
        // 55 / 3 = 18.333..
        let summary = ProgressAggregator::new().aggregate(&entries);
        assert_eq!(summary.avg_progress, 18.3);
    }

    #[test]
    fn test_max_days_not_sum() {
        let entries = vec![
            entry(1, ProgressValue::Task { percent: 100.0 }, 10),
            entry(2, ProgressValue::Task { percent: 100.0 }, 45),
            entry(3, ProgressValue::Task { percent: 100.0 }, 20),
        ];
        let summary = ProgressAggregator::new().aggregate(&entries);
        assert_eq!(summary.avg_progress, 100.0);
        assert_eq!(summary.max_days_remaining, 45);
    }
}
