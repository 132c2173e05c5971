// ==========================================
// O&M Readiness Tracker - Issue API
// ==========================================
// Report, resolve (open -> resolved only), list and summarise
// field issues. Issues are never deleted here.
// ==========================================

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_district, require_non_empty, require_permission};
use crate::domain::issue::{Issue, NewIssue};
use crate::domain::scheme::Scheme;
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::engine::notification::IssueSummaryFormatter;
use crate::repository::component_repo::ComponentRepository;
use crate::repository::issue_repo::IssueRepository;
use crate::repository::scheme_repo::SchemeRepository;

pub struct IssueApi {
    scheme_repo: Arc<SchemeRepository>,
    component_repo: Arc<ComponentRepository>,
    issue_repo: Arc<IssueRepository>,
}

impl IssueApi {
    pub fn new(
        scheme_repo: Arc<SchemeRepository>,
        component_repo: Arc<ComponentRepository>,
        issue_repo: Arc<IssueRepository>,
    ) -> Self {
        Self {
            scheme_repo,
            component_repo,
            issue_repo,
        }
    }

    fn scheme_in_scope(&self, scope: &ActorScope, scheme_id: &str) -> ApiResult<Scheme> {
        require_district(scope)?;
        self.scheme_repo
            .find_by_id(scope, scheme_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Scheme(id={})", scheme_id)))
    }

    /// Record a new open issue against a scheme component
    pub fn report_issue(&self, scope: &ActorScope, input: &NewIssue) -> ApiResult<Issue> {
        require_permission(scope, scope.role.can_enter_data(), "report issues")?;
        let scheme = self.scheme_in_scope(scope, &input.scheme_id)?;
        let description = require_non_empty("description", &input.description)?;

        let component = self
            .component_repo
            .find_by_id(input.component_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Component(id={})", input.component_id)))?;

        let issue = Issue {
            issue_id: Uuid::new_v4().to_string(),
            district_id: scheme.district_id.clone(),
            scheme_id: scheme.scheme_id.clone(),
            component_id: component.component_id,
            component_name: component.name,
            category: input.category,
            description: description.to_string(),
            severity: input.severity,
            reported_by: scope.actor.clone(),
            resolved: false,
            reported_at: Utc::now().naive_utc(),
            expected_resolution: input.expected_resolution,
            resolved_by: None,
            resolved_at: None,
        };
        self.issue_repo.insert(&issue)?;

        tracing::info!(
            actor = %scope.actor,
            scheme_id = %issue.scheme_id,
            issue_id = %issue.issue_id,
            severity = %issue.severity,
            category = %issue.category,
            "issue reported"
        );
        Ok(issue)
    }

    /// Close an open issue; closing a resolved issue is rejected
    pub fn resolve_issue(&self, scope: &ActorScope, issue_id: &str) -> ApiResult<Issue> {
        let district_id = require_district(scope)?;
        let not_found = || ApiError::NotFound(format!("Issue(id={})", issue_id));

        let issue = self
            .issue_repo
            .find_by_id(district_id, issue_id)?
            .ok_or_else(not_found)?;
        // the issue's scheme must be visible to the actor
        if self.scheme_repo.find_by_id(scope, &issue.scheme_id)?.is_none() {
            return Err(not_found());
        }

        self.issue_repo
            .resolve(district_id, issue_id, &scope.actor, Utc::now().naive_utc())?;
        tracing::info!(actor = %scope.actor, issue_id, "issue resolved");

        self.issue_repo
            .find_by_id(district_id, issue_id)?
            .ok_or_else(not_found)
    }

    /// Issues in scope, or of one scheme; most severe first
    pub fn list_issues(
        &self,
        scope: &ActorScope,
        scheme_id: Option<&str>,
        open_only: bool,
    ) -> ApiResult<Vec<Issue>> {
        match scheme_id {
            Some(id) => {
                let scheme = self.scheme_in_scope(scope, id)?;
                Ok(self
                    .issue_repo
                    .list_by_scheme(&scheme.district_id, &scheme.scheme_id, open_only)?)
            }
            None => {
                require_district(scope)?;
                Ok(self
                    .issue_repo
                    .list_in_scope(scope, &SchemeFilter::default(), open_only)?)
            }
        }
    }

    /// Plain-text summary of a scheme's open issues
    pub fn issue_summary_text(&self, scope: &ActorScope, scheme_id: &str, locale: &str) -> ApiResult<String> {
        let scheme = self.scheme_in_scope(scope, scheme_id)?;
        let open = self
            .issue_repo
            .list_by_scheme(&scheme.district_id, &scheme.scheme_id, true)?;
        Ok(IssueSummaryFormatter::new(locale).format(&scheme, &open))
    }
}
