//! Response body decoding shared by the native and browser repositories
//!
//! Anything that does not parse, or parses without a usable `id`, becomes
//! [`FetchError::Malformed`]. Missing optional fields are left to the model's
//! defaults.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::FetchError;
use crate::jobs::{AnalysisRegenerationReport, IndexRegenerationReport};
use crate::model::{Case, Document};

fn parse<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        warn!("Failed to decode {}: {}", what, e);
        FetchError::malformed(format!("{}: {}", what, e))
    })
}

fn require_id(id: &str, what: &str) -> Result<(), FetchError> {
    if id.trim().is_empty() {
        return Err(FetchError::malformed(format!("{} without an id", what)));
    }
    Ok(())
}

pub fn case_list(body: &str) -> Result<Vec<Case>, FetchError> {
    let cases: Vec<Case> = parse(body, "case list")?;
    for case in &cases {
        require_id(&case.id, "case")?;
    }
    Ok(cases)
}

/// Decode a single case, which must be the one that was asked for
pub fn case(body: &str, requested_id: &str) -> Result<Case, FetchError> {
    let case: Case = parse(body, "case")?;
    require_id(&case.id, "case")?;
    if case.id != requested_id {
        return Err(FetchError::malformed(format!(
            "requested case {} but received {}",
            requested_id, case.id
        )));
    }
    Ok(case)
}

/// Decode the documents of `case_id`
///
/// A document naming a different case is rejected rather than trusted. One
/// with no `caseId` at all is adopted into the requested case.
pub fn documents(body: &str, case_id: &str) -> Result<Vec<Document>, FetchError> {
    let mut documents: Vec<Document> = parse(body, "document list")?;

    for doc in &mut documents {
        require_id(&doc.id, "document")?;
        if doc.case_id.trim().is_empty() {
            doc.case_id = case_id.to_string();
        } else if doc.case_id != case_id {
            return Err(FetchError::malformed(format!(
                "document {} belongs to {}, not {}",
                doc.id, doc.case_id, case_id
            )));
        }
    }

    Ok(documents)
}

pub fn index_report(body: &str) -> Result<IndexRegenerationReport, FetchError> {
    parse(body, "index regeneration report")
}

pub fn analysis_report(body: &str) -> Result<AnalysisRegenerationReport, FetchError> {
    parse(body, "analysis regeneration report")
}
