// ==========================================
// O&M Readiness Tracker - Forecast Projector
// ==========================================
// physical_completion = today + adjusted_days_remaining
// forecasted_om       = physical_completion + verification buffer
// Only In Progress / Ready for Inspection schemes are projected;
// a date past chrono's calendar range yields no forecast.
// ==========================================

use crate::domain::evaluation::Forecast;
use crate::domain::issue::OpenIssueCounts;
use crate::domain::types::SchemeStatus;
use crate::engine::classifier::HIGH_RISK_OPEN_ISSUES;
use chrono::{Duration, NaiveDate};

pub const DEFAULT_BUFFER_DAYS: i64 = 20;
pub const MAX_BUFFER_DAYS: i64 = 60;
/// Upper bound accepted for one component's days remaining (100 years)
pub const MAX_DAYS_REMAINING: i64 = 36_500;

pub struct ForecastProjector {
    buffer_days: i64,
}

impl ForecastProjector {
    pub fn new(buffer_days: i64) -> Self {
        Self { buffer_days }
    }

    /// None when either date falls outside the representable range
    pub fn project(&self, adjusted_days_remaining: i64, today: NaiveDate) -> Option<Forecast> {
        let physical_completion_date = today.checked_add_signed(Duration::try_days(adjusted_days_remaining)?)?;
        let forecasted_om_date =
            physical_completion_date.checked_add_signed(Duration::try_days(self.buffer_days)?)?;
        Some(Forecast {
            physical_completion_date,
            forecasted_om_date,
        })
    }

    /// None for schemes with no meaningful forward projection
    pub fn project_for_status(
        &self,
        status: SchemeStatus,
        adjusted_days_remaining: i64,
        today: NaiveDate,
    ) -> Option<Forecast> {
        if !status.is_forecastable() {
            return None;
        }
        let forecast = self.project(adjusted_days_remaining, today);
        if forecast.is_none() {
            tracing::warn!(adjusted_days_remaining, "forecast date out of range, row skipped");
        }
        forecast
    }

    /// Problem-scheme reasons; empty means the flag is not raised
    ///
    /// Each clause triggers the flag independently.
    pub fn problem_reasons(
        &self,
        avg_progress: f64,
        adjusted_days_remaining: i64,
        counts: &OpenIssueCounts,
    ) -> Vec<String> {
        let mut reasons = Vec::new();

        if avg_progress >= 80.0 && adjusted_days_remaining > 60 {
            reasons.push(format!(
                "progress {:.1}% but {} days remaining (>60)",
                avg_progress, adjusted_days_remaining
            ));
        }
        if avg_progress >= 60.0 && adjusted_days_remaining > 90 {
            reasons.push(format!(
                "progress {:.1}% but {} days remaining (>90)",
                avg_progress, adjusted_days_remaining
            ));
        }
        if adjusted_days_remaining > 120 {
            reasons.push(format!(
                "{} days remaining (>120)",
                adjusted_days_remaining
            ));
        }
        if counts.critical > 0 {
            reasons.push(format!("{} unresolved critical issue(s)", counts.critical));
        }
        if counts.open >= HIGH_RISK_OPEN_ISSUES {
            reasons.push(format!("{} unresolved open issues", counts.open));
        }

        reasons
    }
}

impl Default for ForecastProjector {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_DAYS)
    }
}
