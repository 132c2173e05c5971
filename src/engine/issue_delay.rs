// ==========================================
// O&M Readiness Tracker - Issue Delay Model
// ==========================================
// Input: unresolved issue counts + penalty table
// Output: IssueDelay (extra days, adjusted days remaining)
// ==========================================
// An unresolved issue is counted once per class it belongs to:
// a High + material issue pays both the High and the material
// penalty. No deduplication across severity and category.
// ==========================================

use crate::config::delay_penalties::{DelayPenalties, PenaltyClass};
use crate::domain::evaluation::IssueDelay;
use crate::domain::issue::OpenIssueCounts;

pub struct IssueDelayModel {
    penalties: DelayPenalties,
}

impl IssueDelayModel {
    pub fn new(penalties: DelayPenalties) -> Self {
        Self { penalties }
    }

    /// Sum of count(class) * penalty(class); negative terms are floored at 0,
    /// and the sum saturates instead of overflowing
    pub fn delay_days(&self, counts: &OpenIssueCounts) -> i64 {
        PenaltyClass::ALL
            .iter()
            .map(|class| {
                let count = match class {
                    PenaltyClass::Critical => counts.critical,
                    PenaltyClass::High => counts.high,
                    PenaltyClass::Material => counts.material,
                    PenaltyClass::Payment => counts.payment,
                    PenaltyClass::Contractor => counts.contractor,
                };
                count.saturating_mul(self.penalties.get(*class)).max(0)
            })
            .fold(0i64, i64::saturating_add)
    }

    /// adjusted_days_remaining = max_days_remaining + issue_delay_days
    pub fn apply(&self, max_days_remaining: i64, counts: &OpenIssueCounts) -> IssueDelay {
        let issue_delay_days = self.delay_days(counts);
        IssueDelay {
            issue_delay_days,
            adjusted_days_remaining: max_days_remaining.saturating_add(issue_delay_days),
        }
    }
}

impl Default for IssueDelayModel {
    fn default() -> Self {
        Self::new(DelayPenalties::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{IssueCategory, Severity};

    #[test]
    fn test_no_issues_no_delay() {
        let model = IssueDelayModel::default();
        let delay = model.apply(30, &OpenIssueCounts::default());
        assert_eq!(delay.issue_delay_days, 0);
        assert_eq!(delay.adjusted_days_remaining, 30);
    }

    #[test]
    fn test_high_plus_critical() {
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::High, IssueCategory::Other);
        counts.record(Severity::Critical, IssueCategory::Other);

        let delay = IssueDelayModel::default().apply(30, &counts);
        assert_eq!(delay.issue_delay_days, 21);
        assert_eq!(delay.adjusted_days_remaining, 51);
    }

    #[test]
    fn test_severity_and_category_both_count() {
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::High, IssueCategory::Material);

        // 7 (high) + 10 (material)
        let delay = IssueDelayModel::default().apply(0, &counts);
        assert_eq!(delay.issue_delay_days, 17);
    }

    #[test]
    fn test_low_and_other_carry_no_penalty() {
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::Low, IssueCategory::Other);
        counts.record(Severity::Medium, IssueCategory::Other);
        assert_eq!(IssueDelayModel::default().delay_days(&counts), 0);
        assert_eq!(counts.open, 2);
    }

    #[test]
    fn test_custom_penalties() {
        let mut penalties = DelayPenalties::default();
        penalties.set(PenaltyClass::Payment, 30);
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::Medium, IssueCategory::Payment);
        counts.record(Severity::Low, IssueCategory::Payment);

        assert_eq!(IssueDelayModel::new(penalties).delay_days(&counts), 60);
    }

    #[test]
    fn test_adjusted_never_below_max_days() {
        let mut penalties = DelayPenalties::default();
        penalties.set(PenaltyClass::Critical, -50);
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::Critical, IssueCategory::Other);

        let delay = IssueDelayModel::new(penalties).apply(10, &counts);
        assert!(delay.adjusted_days_remaining >= 10);
    }

    #[test]
    fn test_huge_penalties_saturate() {
        let mut penalties = DelayPenalties::default();
        penalties.set(PenaltyClass::High, i64::MAX / 2);
        penalties.set(PenaltyClass::Material, i64::MAX / 2);
        let mut counts = OpenIssueCounts::default();
        counts.record(Severity::High, IssueCategory::Material);
        counts.record(Severity::High, IssueCategory::Other);

        let delay = IssueDelayModel::new(penalties).apply(30, &counts);
        assert_eq!(delay.issue_delay_days, i64::MAX);
        assert_eq!(delay.adjusted_days_remaining, i64::MAX);
    }
}
