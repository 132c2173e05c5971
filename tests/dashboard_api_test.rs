// ==========================================
// DashboardApi integration tests
// ==========================================
// Coverage:
// 1. evaluation: status, risk, issue-adjusted days
// 2. report tables: status summary, forecast, monthly, problems
// 3. scope narrowing and buffer handling
// 4. large day counts and verification edge cases
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use om_readiness::api::ApiError;
use om_readiness::domain::{ProgressUpdate, ProgressValue, SchemeFilter, VerificationDates};
use om_readiness::engine::MAX_DAYS_REMAINING;
use om_readiness::{EntryKind, IssueCategory, RiskTier, SchemeStatus, Severity, SiteVariant};

/// S1 in progress with two open issues, S2 untouched,
/// S3 engineer-verified, S4 physically complete
fn seeded_env() -> ApiTestEnv {
    let env = ApiTestEnv::new().expect("test env");
    env.seed_simple(&[
        ("S1", "Milkipur", "Alpha Infra"),
        ("S2", "Milkipur", "Beta Projects"),
        ("S3", "Sohawal", "Alpha Infra"),
        ("S4", "Sohawal", "Beta Projects"),
    ]);

    env.save_task("S1", 50.0, 30);
    env.report("S1", Severity::Critical, IssueCategory::Other, "Motor burnt");
    env.report("S1", Severity::High, IssueCategory::Other, "Valve leaking");

    env.save_task("S3", 100.0, 0);
    env.scheme_api
        .update_verification_dates(
            &env.manager(),
            "S3",
            VerificationDates {
                agency_submitted: Some(ymd(2024, 1, 2)),
                third_party_verified: Some(ymd(2024, 1, 10)),
                engineer_verified: Some(ymd(2024, 1, 20)),
            },
        )
        .expect("verify S3");

    env.save_task("S4", 100.0, 0);
    env
}

fn all() -> SchemeFilter {
    SchemeFilter::default()
}

// ==========================================
// Evaluation
// ==========================================

#[test]
fn test_evaluate_schemes_status_and_risk() {
    let env = seeded_env();
    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &all())
        .expect("evaluate");
    assert_eq!(evals.len(), 4);

    let by_id = |id: &str| evals.iter().find(|e| e.scheme.scheme_id == id).unwrap();

    let s1 = by_id("S1");
    assert_eq!(s1.status, SchemeStatus::InProgress);
    assert_eq!(s1.risk, RiskTier::High);
    assert_eq!(s1.progress.avg_progress, 50.0);
    assert_eq!(s1.progress.max_days_remaining, 30);
    // 30 + critical 14 + high 7
    assert_eq!(s1.delay.issue_delay_days, 21);
    assert_eq!(s1.delay.adjusted_days_remaining, 51);

    assert_eq!(by_id("S2").status, SchemeStatus::NotStarted);
    assert_eq!(by_id("S2").risk, RiskTier::Low);
    assert_eq!(by_id("S3").status, SchemeStatus::InOm);
    assert_eq!(by_id("S4").status, SchemeStatus::ReadyForInspection);
}

#[test]
fn test_resolving_issue_lowers_delay_and_risk() {
    let env = seeded_env();
    let critical = env
        .issue_api
        .list_issues(&env.viewer(), Some("S1"), true)
        .expect("list")
        .into_iter()
        .find(|i| i.severity == Severity::Critical)
        .expect("critical issue");

    env.issue_api
        .resolve_issue(&env.manager(), &critical.issue_id)
        .expect("resolve");

    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &all())
        .expect("evaluate");
    let s1 = evals.iter().find(|e| e.scheme.scheme_id == "S1").unwrap();
    assert_eq!(s1.delay.adjusted_days_remaining, 37);
    assert_eq!(s1.risk, RiskTier::Medium);
}

#[test]
fn test_penalty_change_applies_to_next_evaluation() {
    let env = seeded_env();
    env.config_api
        .update_delay_penalty(&env.manager(), "critical", 0)
        .expect("update penalty");

    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &all())
        .expect("evaluate");
    let s1 = evals.iter().find(|e| e.scheme.scheme_id == "S1").unwrap();
    assert_eq!(s1.delay.adjusted_days_remaining, 37);
}

#[test]
fn test_schemes_by_status() {
    let env = seeded_env();
    let ready = env
        .dashboard_api
        .schemes_by_status(&env.viewer(), &all(), SchemeStatus::ReadyForInspection)
        .expect("by status");
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].scheme.scheme_id, "S4");
}

// ==========================================
// Report tables
// ==========================================

#[test]
fn test_status_summary_lists_every_status() {
    let env = seeded_env();
    let summary = env
        .dashboard_api
        .status_summary(&env.viewer(), &all())
        .expect("summary");

    let counts: Vec<(SchemeStatus, usize)> = summary.iter().map(|s| (s.status, s.count)).collect();
    assert_eq!(
        counts,
        vec![
            (SchemeStatus::NotStarted, 1),
            (SchemeStatus::InProgress, 1),
            (SchemeStatus::ReadyForInspection, 1),
            (SchemeStatus::UnderVerification, 0),
            (SchemeStatus::InOm, 1),
        ]
    );
}

#[test]
fn test_forecast_table_dates() {
    let env = seeded_env();
    let today = ymd(2024, 1, 1);
    let rows = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), Some(20), today)
        .expect("forecast");

    // only In Progress and Ready for Inspection, earliest O&M first
    let ids: Vec<&str> = rows.iter().map(|r| r.scheme_id.as_str()).collect();
    assert_eq!(ids, vec!["S4", "S1"]);

    assert_eq!(rows[0].physical_completion_date, today);
    assert_eq!(rows[0].forecasted_om_date, ymd(2024, 1, 21));

    assert_eq!(rows[1].adjusted_days_remaining, 51);
    assert_eq!(rows[1].physical_completion_date, ymd(2024, 2, 21));
    assert_eq!(rows[1].forecasted_om_date, ymd(2024, 3, 12));
}

#[test]
fn test_forecast_uses_stored_default_buffer() {
    let env = seeded_env();
    env.config_api
        .set_default_buffer_days(&env.admin(), 0)
        .expect("set buffer");

    let rows = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), None, ymd(2024, 1, 1))
        .expect("forecast");
    for row in &rows {
        assert_eq!(row.forecasted_om_date, row.physical_completion_date);
    }
}

#[test]
fn test_buffer_out_of_range_rejected() {
    let env = seeded_env();
    let result = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), Some(61), ymd(2024, 1, 1));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), Some(-1), ymd(2024, 1, 1));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_monthly_om_forecast() {
    let env = seeded_env();
    let months = env
        .dashboard_api
        .monthly_om_forecast(&env.viewer(), &all(), Some(20), ymd(2024, 1, 1))
        .expect("monthly");

    let counts: Vec<(String, usize)> = months.into_iter().map(|m| (m.month, m.count)).collect();
    assert_eq!(
        counts,
        vec![("2024-01".to_string(), 1), ("2024-03".to_string(), 1)]
    );
}

#[test]
fn test_problem_schemes() {
    let env = seeded_env();
    let problems = env
        .dashboard_api
        .problem_schemes(&env.viewer(), &all())
        .expect("problems");

    assert_eq!(problems.len(), 1);
    let p = &problems[0];
    assert_eq!(p.scheme_id, "S1");
    assert_eq!(p.open_issues, 2);
    assert_eq!(p.critical_issues, 1);
    assert!(p.reasons.iter().any(|r| r.contains("critical")));
}

// ==========================================
// Scope
// ==========================================

#[test]
fn test_block_scope_and_filter_narrow_reports() {
    let env = seeded_env();

    let scoped = env.viewer().with_blocks(&["Sohawal"]);
    let evals = env
        .dashboard_api
        .evaluate_schemes(&scoped, &all())
        .expect("evaluate");
    let mut ids: Vec<String> = evals.into_iter().map(|e| e.scheme.scheme_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["S3", "S4"]);

    let filter = SchemeFilter {
        block: None,
        agency: Some("Alpha Infra".to_string()),
    };
    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &filter)
        .expect("evaluate");
    let mut ids: Vec<String> = evals.into_iter().map(|e| e.scheme.scheme_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["S1", "S3"]);
}

#[test]
fn test_reports_require_district() {
    let env = seeded_env();
    let result = env.dashboard_api.status_summary(&env.admin(), &all());
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_report_tables_share_one_evaluation() {
    let env = seeded_env();
    let today = ymd(2024, 1, 1);
    let tables = env
        .dashboard_api
        .report_tables(&env.viewer(), &all(), Some(20), today)
        .expect("tables");

    assert_eq!(tables.status_summary.iter().map(|s| s.count).sum::<usize>(), 4);
    assert_eq!(
        tables.monthly_om_forecast.iter().map(|m| m.count).sum::<usize>(),
        tables.forecast.len()
    );
    assert_eq!(
        tables.forecast,
        env.dashboard_api
            .forecast_table(&env.viewer(), &all(), Some(20), today)
            .expect("forecast")
    );
    assert_eq!(tables.problem_schemes.len(), 1);

    let result = env
        .dashboard_api
        .report_tables(&env.viewer(), &all(), Some(61), today);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// Boundaries
// ==========================================

#[test]
fn test_days_remaining_above_bound_rejected() {
    let env = seeded_env();
    let component = env.component(SiteVariant::Main, EntryKind::Task);
    let result = env.progress_api.save_entries(
        &env.data_entry(),
        "S2",
        &[ProgressUpdate {
            component_id: component.component_id,
            value: ProgressValue::Task { percent: 50.0 },
            days_remaining: 200_000_000,
            remarks: None,
        }],
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &all())
        .expect("evaluate");
    let s2 = evals.iter().find(|e| e.scheme.scheme_id == "S2").unwrap();
    assert_eq!(s2.status, SchemeStatus::NotStarted);
}

#[test]
fn test_forecast_at_days_remaining_bound() {
    let env = seeded_env();
    env.save_task("S2", 10.0, MAX_DAYS_REMAINING);
    env.report("S2", Severity::Critical, IssueCategory::Material, "Pipe stock missing");

    let rows = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), Some(60), ymd(2024, 1, 1))
        .expect("forecast");
    let s2 = rows.iter().find(|r| r.scheme_id == "S2").expect("S2 row");
    assert_eq!(s2.max_days_remaining, MAX_DAYS_REMAINING);
    // critical 14 + material 10
    assert_eq!(s2.adjusted_days_remaining, MAX_DAYS_REMAINING + 24);
    assert!(s2.forecasted_om_date > s2.physical_completion_date);
    assert_eq!(rows.last().map(|r| r.scheme_id.as_str()), Some("S2"));
}

#[test]
fn test_adjusted_days_never_below_max_days() {
    let env = seeded_env();
    env.save_task("S2", 20.0, 5);
    env.report("S2", Severity::Low, IssueCategory::Other, "Signboard missing");

    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &all())
        .expect("evaluate");
    for e in &evals {
        assert!(e.delay.issue_delay_days >= 0);
        assert!(e.delay.adjusted_days_remaining >= e.progress.max_days_remaining);
    }
}

#[test]
fn test_third_party_date_alone_keeps_progress_status() {
    let env = seeded_env();
    env.scheme_api
        .update_verification_dates(
            &env.manager(),
            "S1",
            VerificationDates {
                third_party_verified: Some(ymd(2024, 1, 10)),
                ..Default::default()
            },
        )
        .expect("third party date");

    let evals = env
        .dashboard_api
        .schemes_by_status(&env.viewer(), &all(), SchemeStatus::UnderVerification)
        .expect("by status");
    assert!(evals.is_empty());

    let rows = env
        .dashboard_api
        .forecast_table(&env.viewer(), &all(), Some(20), ymd(2024, 1, 1))
        .expect("forecast");
    assert!(rows.iter().any(|r| r.scheme_id == "S1" && r.status == SchemeStatus::InProgress));

    env.scheme_api
        .update_verification_dates(
            &env.manager(),
            "S1",
            VerificationDates {
                agency_submitted: Some(ymd(2024, 1, 2)),
                third_party_verified: Some(ymd(2024, 1, 10)),
                engineer_verified: None,
            },
        )
        .expect("agency date");
    let evals = env
        .dashboard_api
        .schemes_by_status(&env.viewer(), &all(), SchemeStatus::UnderVerification)
        .expect("by status");
    assert_eq!(evals.len(), 1);
}
