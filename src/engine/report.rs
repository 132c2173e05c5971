// ==========================================
// O&M Readiness Tracker - Report Builder
// ==========================================
// Turns evaluations into the plain record tables consumed by
// the external renderer (status summary, forecast, monthly
// forecast, problem schemes).
// ==========================================

use crate::domain::evaluation::{
    ForecastRow, MonthlyForecastCount, ProblemScheme, SchemeEvaluation, StatusCount,
};
use crate::domain::types::SchemeStatus;
use crate::engine::forecast::ForecastProjector;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Count per status, every status listed in lifecycle order
pub fn status_summary(evaluations: &[SchemeEvaluation]) -> Vec<StatusCount> {
    SchemeStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: evaluations.iter().filter(|e| e.status == *status).count(),
        })
        .collect()
}

/// Forecast rows for forecastable schemes, earliest O&M date first
pub fn forecast_rows(
    evaluations: &[SchemeEvaluation],
    projector: &ForecastProjector,
    today: NaiveDate,
) -> Vec<ForecastRow> {
    let mut rows: Vec<ForecastRow> = evaluations
        .iter()
        .filter_map(|e| {
            let forecast =
                projector.project_for_status(e.status, e.delay.adjusted_days_remaining, today)?;
            Some(ForecastRow {
                scheme_id: e.scheme.scheme_id.clone(),
                scheme_name: e.scheme.scheme_name.clone(),
                block: e.scheme.block.clone(),
                agency: e.scheme.agency.clone(),
                status: e.status,
                risk: e.risk,
                avg_progress: e.progress.avg_progress,
                max_days_remaining: e.progress.max_days_remaining,
                issue_delay_days: e.delay.issue_delay_days,
                adjusted_days_remaining: e.delay.adjusted_days_remaining,
                physical_completion_date: forecast.physical_completion_date,
                forecasted_om_date: forecast.forecasted_om_date,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.forecasted_om_date
            .cmp(&b.forecasted_om_date)
            .then_with(|| a.scheme_id.cmp(&b.scheme_id))
    });
    rows
}

/// Forecast rows per YYYY-MM of the O&M date, ascending
pub fn monthly_om_forecast(rows: &[ForecastRow]) -> Vec<MonthlyForecastCount> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        *months
            .entry(row.forecasted_om_date.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthlyForecastCount { month, count })
        .collect()
}

/// Flagged schemes with the reasons that tripped the flag
pub fn problem_schemes(evaluations: &[SchemeEvaluation]) -> Vec<ProblemScheme> {
    evaluations
        .iter()
        .filter(|e| e.is_problem())
        .map(|e| ProblemScheme {
            scheme_id: e.scheme.scheme_id.clone(),
            scheme_name: e.scheme.scheme_name.clone(),
            block: e.scheme.block.clone(),
            agency: e.scheme.agency.clone(),
            avg_progress: e.progress.avg_progress,
            adjusted_days_remaining: e.delay.adjusted_days_remaining,
            open_issues: e.open_issues.open,
            critical_issues: e.open_issues.critical,
            reasons: e.problem_reasons.clone(),
        })
        .collect()
}
