// ==========================================
// O&M Readiness Tracker - Request Validation
// ==========================================
// Role checks, scope resolution and input range checks shared by
// every API. Rejections never reach the store.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::component::Component;
use crate::domain::progress::{ProgressUpdate, ProgressValue};
use crate::domain::scheme::VerificationDates;
use crate::domain::scope::ActorScope;
use crate::config::delay_penalties::MAX_PENALTY_DAYS;
use crate::engine::forecast::{MAX_BUFFER_DAYS, MAX_DAYS_REMAINING};

/// Fail with PermissionDenied unless `allowed`
pub fn require_permission(scope: &ActorScope, allowed: bool, action: &str) -> ApiResult<()> {
    if allowed {
        Ok(())
    } else {
        tracing::warn!(actor = %scope.actor, role = %scope.role, action, "permission denied");
        Err(ApiError::PermissionDenied(format!(
            "{} ({}) may not {}",
            scope.actor, scope.role, action
        )))
    }
}

/// Scheme-level operations run against one district
pub fn require_district(scope: &ActorScope) -> ApiResult<&str> {
    scope
        .district_id
        .as_deref()
        .ok_or_else(|| ApiError::InvalidInput("a district must be selected".to_string()))
}

pub fn require_non_empty<'a>(field: &str, value: &'a str) -> ApiResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(v)
}

pub fn validate_buffer_days(days: i64) -> ApiResult<()> {
    if !(0..=MAX_BUFFER_DAYS).contains(&days) {
        return Err(ApiError::InvalidInput(format!(
            "buffer_days must be within 0..={}, got {}",
            MAX_BUFFER_DAYS, days
        )));
    }
    Ok(())
}

pub fn validate_penalty_days(days: i64) -> ApiResult<()> {
    if !(0..=MAX_PENALTY_DAYS).contains(&days) {
        return Err(ApiError::InvalidInput(format!(
            "penalty days must be within 0..={}, got {}",
            MAX_PENALTY_DAYS, days
        )));
    }
    Ok(())
}

/// Check one progress update against the component it targets
pub fn validate_progress_update(update: &ProgressUpdate, component: &Component) -> ApiResult<()> {
    let cid = update.component_id;

    if update.value.kind() != component.kind {
        return Err(ApiError::InvalidInput(format!(
            "component {} expects a {} entry, got {}",
            cid,
            component.kind,
            update.value.kind()
        )));
    }

    if !(0..=MAX_DAYS_REMAINING).contains(&update.days_remaining) {
        return Err(ApiError::InvalidInput(format!(
            "component {}: days_remaining must be within 0..={}",
            cid, MAX_DAYS_REMAINING
        )));
    }

    match update.value {
        ProgressValue::Metric { target, achieved } => {
            if !target.is_finite() || !achieved.is_finite() || target < 0.0 || achieved < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "component {}: target and achieved must be finite and >= 0",
                    cid
                )));
            }
        }
        ProgressValue::Task { percent } => {
            if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                return Err(ApiError::InvalidInput(format!(
                    "component {}: percent must be within [0, 100]",
                    cid
                )));
            }
        }
    }
    Ok(())
}

/// Dates must be non-decreasing along agency -> third party -> engineer
pub fn validate_verification_dates(dates: &VerificationDates) -> ApiResult<()> {
    match dates.first_order_violation() {
        Some((earlier, later)) => Err(ApiError::InvalidInput(format!(
            "{} must not be earlier than {}",
            later, earlier
        ))),
        None => Ok(()),
    }
}
