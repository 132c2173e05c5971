// ==========================================
// O&M Readiness Tracker - Issue Summary Text
// ==========================================
// Plain-text summary of one scheme's open issues, consumed by the
// external notification link builder:
//   header line
//   up to 3 issues, most severe first
//   "... and N more" when issues remain
// ==========================================

use crate::domain::issue::Issue;
use crate::domain::scheme::Scheme;
use crate::i18n::t_in;

/// Issues listed before the remainder line
pub const SUMMARY_ISSUE_LIMIT: usize = 3;

pub struct IssueSummaryFormatter {
    locale: String,
}

impl IssueSummaryFormatter {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    /// Format open issues of `scheme`; resolved issues are ignored.
    pub fn format(&self, scheme: &Scheme, issues: &[Issue]) -> String {
        let mut open: Vec<&Issue> = issues.iter().filter(|i| !i.resolved).collect();

        if open.is_empty() {
            return t_in(
                &self.locale,
                "notify.none",
                &[("scheme", &scheme.scheme_name), ("id", &scheme.scheme_id)],
            );
        }

        // most severe first, oldest first within a severity
        open.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.reported_at.cmp(&b.reported_at))
        });

        let count = open.len().to_string();
        let mut lines = vec![t_in(
            &self.locale,
            "notify.header",
            &[
                ("scheme", &scheme.scheme_name),
                ("id", &scheme.scheme_id),
                ("count", &count),
            ],
        )];

        for (idx, issue) in open.iter().take(SUMMARY_ISSUE_LIMIT).enumerate() {
            lines.push(format!(
                "{}. [{}] {}: {}",
                idx + 1,
                issue.severity,
                issue.component_name,
                issue.description.trim()
            ));
        }

        if open.len() > SUMMARY_ISSUE_LIMIT {
            let remaining = (open.len() - SUMMARY_ISSUE_LIMIT).to_string();
            lines.push(t_in(&self.locale, "notify.more", &[("count", &remaining)]));
        }

        lines.join("\n")
    }
}

impl Default for IssueSummaryFormatter {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheme::VerificationDates;
    use crate::domain::types::{IssueCategory, Severity};
    use chrono::NaiveDate;

    fn scheme() -> Scheme {
        Scheme {
            scheme_id: "JJM-042".to_string(),
            district_id: "D1".to_string(),
            sr_no: Some(42),
            block: "Bikapur".to_string(),
            agency: "NCC".to_string(),
            scheme_name: "Rampur Kalan".to_string(),
            has_secondary_site: false,
            verification: VerificationDates::default(),
        }
    }

    fn issue(id: &str, severity: Severity, day: u32, resolved: bool) -> Issue {
        Issue {
            issue_id: id.to_string(),
            district_id: "D1".to_string(),
            scheme_id: "JJM-042".to_string(),
            component_id: 1,
            component_name: "Pipe Laying".to_string(),
            category: IssueCategory::Material,
            description: format!("issue {}", id),
            severity,
            reported_by: "je.bikapur".to_string(),
            resolved,
            reported_at: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            expected_resolution: None,
            resolved_by: None,
            resolved_at: None,
        }
    }

    #[test]
    fn test_no_open_issues() {
        let text = IssueSummaryFormatter::default().format(&scheme(), &[issue("a", Severity::High, 1, true)]);
        assert_eq!(text, "Rampur Kalan (JJM-042): no open issues");
    }

    #[test]
    fn test_sorted_and_capped() {
        let issues = vec![
            issue("low", Severity::Low, 1, false),
            issue("crit", Severity::Critical, 5, false),
            issue("high-old", Severity::High, 2, false),
            issue("high-new", Severity::High, 3, false),
            issue("med", Severity::Medium, 1, false),
            issue("done", Severity::Critical, 1, true),
        ];
        let text = IssueSummaryFormatter::new("en").format(&scheme(), &issues);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Rampur Kalan (JJM-042): 5 open issue(s)");
        assert_eq!(lines[1], "1. [Critical] Pipe Laying: issue crit");
        assert_eq!(lines[2], "2. [High] Pipe Laying: issue high-old");
        assert_eq!(lines[3], "3. [High] Pipe Laying: issue high-new");
        assert_eq!(lines[4], "... and 2 more");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_exactly_three_has_no_remainder() {
        let issues = vec![
            issue("a", Severity::Low, 1, false),
            issue("b", Severity::Low, 2, false),
            issue("c", Severity::Low, 3, false),
        ];
        let text = IssueSummaryFormatter::default().format(&scheme(), &issues);
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("more"));
    }
}
