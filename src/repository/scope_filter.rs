// ==========================================
// O&M Readiness Tracker - Scheme Scope Filter
// ==========================================
// Every scheme-level read goes through this predicate.
// Actor scope (district, block set, agency) and the optional
// report narrowing are combined with AND; values are bound,
// never interpolated.
// ==========================================

use crate::domain::scope::{ActorScope, SchemeFilter};
use rusqlite::types::Value;

/// Parameterized WHERE fragment over the `schemes` table
#[derive(Debug, Clone, PartialEq)]
pub struct SchemePredicate {
    pub clause: String,
    pub params: Vec<Value>,
}

/// Build the predicate for `alias` (the schemes table alias in the query)
///
/// An empty block list in the scope matches no scheme.
pub fn build_scheme_filter(scope: &ActorScope, filter: &SchemeFilter, alias: &str) -> SchemePredicate {
    let mut parts: Vec<String> = vec!["1 = 1".to_string()];
    let mut params: Vec<Value> = Vec::new();

    if let Some(district_id) = &scope.district_id {
        parts.push(format!("{}.district_id = ?", alias));
        params.push(Value::Text(district_id.clone()));
    }

    if let Some(blocks) = &scope.blocks {
        if blocks.is_empty() {
            parts.push("1 = 0".to_string());
        } else {
            let marks = vec!["?"; blocks.len()].join(", ");
            parts.push(format!("{}.block IN ({})", alias, marks));
            params.extend(blocks.iter().map(|b| Value::Text(b.clone())));
        }
    }

    if let Some(agency) = &scope.agency {
        parts.push(format!("{}.agency = ?", alias));
        params.push(Value::Text(agency.clone()));
    }

    if let Some(block) = filter.block.as_deref().filter(|b| !b.trim().is_empty()) {
        parts.push(format!("{}.block = ?", alias));
        params.push(Value::Text(block.trim().to_string()));
    }

    if let Some(agency) = filter.agency.as_deref().filter(|a| !a.trim().is_empty()) {
        parts.push(format!("{}.agency = ?", alias));
        params.push(Value::Text(agency.trim().to_string()));
    }

    SchemePredicate {
        clause: parts.join(" AND "),
        params,
    }
}
