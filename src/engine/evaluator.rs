// ==========================================
// O&M Readiness Tracker - Scheme Evaluator
// ==========================================
// Runs the engines in data-flow order for each scheme:
//   ProgressAggregator -> IssueDelayModel -> StatusClassifier
//   -> ForecastProjector (problem flag)
// Inputs are plain rows loaded by the caller; no SQL here.
// ==========================================

use crate::config::delay_penalties::DelayPenalties;
use crate::domain::evaluation::SchemeEvaluation;
use crate::domain::issue::OpenIssueCounts;
use crate::domain::progress::ProgressEntry;
use crate::domain::scheme::Scheme;
use crate::engine::classifier::StatusClassifier;
use crate::engine::forecast::ForecastProjector;
use crate::engine::issue_delay::IssueDelayModel;
use crate::engine::progress::ProgressAggregator;
use std::collections::HashMap;
use tracing::debug;

pub struct SchemeEvaluator {
    aggregator: ProgressAggregator,
    delay_model: IssueDelayModel,
    classifier: StatusClassifier,
    projector: ForecastProjector,
}

impl SchemeEvaluator {
    /// # Parameters
    /// - penalties: loaded once per request from the config store
    /// - buffer_days: verification buffer for this report
    pub fn new(penalties: DelayPenalties, buffer_days: i64) -> Self {
        Self {
            aggregator: ProgressAggregator::new(),
            delay_model: IssueDelayModel::new(penalties),
            classifier: StatusClassifier::new(),
            projector: ForecastProjector::new(buffer_days),
        }
    }

    pub fn projector(&self) -> &ForecastProjector {
        &self.projector
    }

    /// Evaluate one scheme from its entries and open-issue counts
    pub fn evaluate(
        &self,
        scheme: &Scheme,
        entries: &[ProgressEntry],
        open_issues: &OpenIssueCounts,
    ) -> SchemeEvaluation {
        let progress = self.aggregator.aggregate(entries);
        let delay = self
            .delay_model
            .apply(progress.max_days_remaining, open_issues);
        let status = self
            .classifier
            .classify_status(&scheme.verification, progress.avg_progress);
        let risk = self.classifier.classify_risk(open_issues);
        let problem_reasons = self.projector.problem_reasons(
            progress.avg_progress,
            delay.adjusted_days_remaining,
            open_issues,
        );

        debug!(
            scheme_id = %scheme.scheme_id,
            avg_progress = progress.avg_progress,
            adjusted_days = delay.adjusted_days_remaining,
            status = %status,
            risk = %risk,
            "scheme evaluated"
        );

        SchemeEvaluation {
            scheme: scheme.clone(),
            progress,
            delay,
            open_issues: *open_issues,
            status,
            risk,
            problem_reasons,
        }
    }

    /// Evaluate many schemes; entries and counts are keyed by scheme_id.
    /// A scheme with no entry group or no counts evaluates as empty.
    pub fn evaluate_all(
        &self,
        schemes: &[Scheme],
        entries_by_scheme: &HashMap<String, Vec<ProgressEntry>>,
        counts_by_scheme: &HashMap<String, OpenIssueCounts>,
    ) -> Vec<SchemeEvaluation> {
        let no_counts = OpenIssueCounts::default();
        schemes
            .iter()
            .map(|scheme| {
                let entries = entries_by_scheme
                    .get(&scheme.scheme_id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let counts = counts_by_scheme
                    .get(&scheme.scheme_id)
                    .unwrap_or(&no_counts);
                self.evaluate(scheme, entries, counts)
            })
            .collect()
    }
}

/// Group rows by scheme id
pub fn group_entries_by_scheme(entries: Vec<ProgressEntry>) -> HashMap<String, Vec<ProgressEntry>> {
    let mut grouped: HashMap<String, Vec<ProgressEntry>> = HashMap::new();
    for entry in entries {
        grouped.entry(entry.scheme_id.clone()).or_default().push(entry);
    }
    grouped
}
