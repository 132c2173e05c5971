// ==========================================
// O&M Readiness Tracker - Core Library
// ==========================================
// Tracks construction progress of rural piped water-supply schemes,
// derives their lifecycle status and risk, and forecasts the date
// each scheme enters Operation & Maintenance.
// Stack: Rust + SQLite
// ==========================================

rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Modules
// ==========================================

// Domain - entities and value types
pub mod domain;

// Repository - data access
pub mod repository;

// Engines - progress, delay, status, forecast
pub mod engine;

// Import - scheme spreadsheets
pub mod importer;

// Configuration
pub mod config;

// SQLite bootstrap (PRAGMAs, schema, catalog seed)
pub mod db;

pub mod logging;

pub mod i18n;

// API - operations with role and scope checks
pub mod api;

// Application wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{EntryKind, IssueCategory, RiskTier, Role, SchemeStatus, Severity, SiteVariant};

pub use domain::{
    ActorScope, Component, District, Issue, ProgressEntry, ProgressUpdate, ProgressValue, Scheme,
    SchemeEvaluation, SchemeFilter, VerificationDates,
};

pub use engine::{
    ForecastProjector, IssueDelayModel, IssueSummaryFormatter, ProgressAggregator,
    SchemeEvaluator, StatusClassifier,
};

pub use api::{
    AdminApi, ApiError, ApiResult, ConfigApi, DashboardApi, ImportApi, IssueApi, ProgressApi,
    SchemeApi,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "JJM O&M Readiness Tracker";

pub const DB_VERSION: &str = "v1";
