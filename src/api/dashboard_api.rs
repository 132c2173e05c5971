// ==========================================
// O&M Readiness Tracker - Dashboard API
// ==========================================
// Read side: loads scheme, progress and open-issue rows for the
// actor's scope, runs the evaluator, and shapes report tables.
// Status, risk, forecast and problem flag are derived per call.
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator::{require_district, validate_buffer_days};
use crate::config::config_manager::ConfigManager;
use crate::domain::evaluation::{
    ForecastRow, MonthlyForecastCount, ProblemScheme, ReportTables, SchemeEvaluation, StatusCount,
};
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::domain::types::SchemeStatus;
use crate::engine::evaluator::{group_entries_by_scheme, SchemeEvaluator};
use crate::engine::report;
use crate::repository::issue_repo::IssueRepository;
use crate::repository::progress_repo::ProgressRepository;
use crate::repository::scheme_repo::SchemeRepository;

pub struct DashboardApi {
    scheme_repo: Arc<SchemeRepository>,
    progress_repo: Arc<ProgressRepository>,
    issue_repo: Arc<IssueRepository>,
    config_manager: Arc<ConfigManager>,
}

impl DashboardApi {
    pub fn new(
        scheme_repo: Arc<SchemeRepository>,
        progress_repo: Arc<ProgressRepository>,
        issue_repo: Arc<IssueRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            scheme_repo,
            progress_repo,
            issue_repo,
            config_manager,
        }
    }

    /// Evaluator for one request; `buffer_days` None uses the stored default
    fn evaluator(&self, buffer_days: Option<i64>) -> ApiResult<SchemeEvaluator> {
        let buffer = match buffer_days {
            Some(days) => {
                validate_buffer_days(days)?;
                days
            }
            None => self.config_manager.get_default_buffer_days()?,
        };
        let penalties = self.config_manager.load_delay_penalties()?;
        Ok(SchemeEvaluator::new(penalties, buffer))
    }

    fn evaluate_with(
        &self,
        evaluator: &SchemeEvaluator,
        scope: &ActorScope,
        filter: &SchemeFilter,
    ) -> ApiResult<Vec<SchemeEvaluation>> {
        require_district(scope)?;

        let schemes = self.scheme_repo.find_in_scope(scope, filter)?;
        let entries = group_entries_by_scheme(self.progress_repo.find_in_scope(scope, filter)?);
        let counts = self.issue_repo.open_counts_in_scope(scope, filter)?;

        let evaluations = evaluator.evaluate_all(&schemes, &entries, &counts);
        tracing::debug!(
            actor = %scope.actor,
            schemes = evaluations.len(),
            "schemes evaluated"
        );
        Ok(evaluations)
    }

    // ==========================================
    // Evaluations
    // ==========================================

    /// Full evaluation of every scheme in scope
    pub fn evaluate_schemes(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
    ) -> ApiResult<Vec<SchemeEvaluation>> {
        let evaluator = self.evaluator(None)?;
        self.evaluate_with(&evaluator, scope, filter)
    }

    /// Evaluations whose derived status matches `status`
    pub fn schemes_by_status(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
        status: SchemeStatus,
    ) -> ApiResult<Vec<SchemeEvaluation>> {
        Ok(self
            .evaluate_schemes(scope, filter)?
            .into_iter()
            .filter(|e| e.status == status)
            .collect())
    }

    // ==========================================
    // Report tables
    // ==========================================

    pub fn status_summary(&self, scope: &ActorScope, filter: &SchemeFilter) -> ApiResult<Vec<StatusCount>> {
        Ok(report::status_summary(&self.evaluate_schemes(scope, filter)?))
    }

    /// Forecast rows for In Progress / Ready for Inspection schemes
    pub fn forecast_table(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
        buffer_days: Option<i64>,
        today: NaiveDate,
    ) -> ApiResult<Vec<ForecastRow>> {
        let evaluator = self.evaluator(buffer_days)?;
        let evaluations = self.evaluate_with(&evaluator, scope, filter)?;
        Ok(report::forecast_rows(&evaluations, evaluator.projector(), today))
    }

    pub fn monthly_om_forecast(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
        buffer_days: Option<i64>,
        today: NaiveDate,
    ) -> ApiResult<Vec<MonthlyForecastCount>> {
        let rows = self.forecast_table(scope, filter, buffer_days, today)?;
        Ok(report::monthly_om_forecast(&rows))
    }

    pub fn problem_schemes(&self, scope: &ActorScope, filter: &SchemeFilter) -> ApiResult<Vec<ProblemScheme>> {
        Ok(report::problem_schemes(&self.evaluate_schemes(scope, filter)?))
    }

    /// All four tables from a single evaluation pass
    pub fn report_tables(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
        buffer_days: Option<i64>,
        today: NaiveDate,
    ) -> ApiResult<ReportTables> {
        let evaluator = self.evaluator(buffer_days)?;
        let evaluations = self.evaluate_with(&evaluator, scope, filter)?;
        let forecast = report::forecast_rows(&evaluations, evaluator.projector(), today);

        Ok(ReportTables {
            status_summary: report::status_summary(&evaluations),
            monthly_om_forecast: report::monthly_om_forecast(&forecast),
            problem_schemes: report::problem_schemes(&evaluations),
            forecast,
        })
    }
}
