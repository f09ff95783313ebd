//! Free-text filtering of the case list
//!
//! A blank query is the identity. Otherwise a case is kept when the query
//! appears, ignoring case, in its title, client name, case type or summary.
//! Order is always preserved, so filtering twice with the same query is a no-op.

use crate::model::Case;

/// Filter an owned copy of the case list
pub fn filter_cases(cases: &[Case], query: &str) -> Vec<Case> {
    filter_refs(cases, query).into_iter().cloned().collect()
}

/// Filter without cloning, for render paths
pub fn filter_refs<'a>(cases: &'a [Case], query: &str) -> Vec<&'a Case> {
    if is_blank(query) {
        return cases.iter().collect();
    }

    let needle = query.to_lowercase();
    cases
        .iter()
        .filter(|case| matches_query(case, &needle))
        .collect()
}

pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// `needle` must already be lowercased
pub fn matches_query(case: &Case, needle: &str) -> bool {
    [
        case.title.as_str(),
        case.client_name.as_str(),
        case.case_type.as_str(),
        case.summary.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
