//! Case detail assembly
//!
//! The detail screen needs a case and its documents. Once both have been
//! fetched, turning them into what the screen shows is a pure step:
//! validate ownership, reconcile the case's document references with what was
//! actually returned, then aggregate.

use serde::Serialize;
use tracing::warn;

use crate::aggregate::{aggregate, AggregateStatus};
use crate::error::FetchError;
use crate::model::{Case, Document};
use crate::view::Payload;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    pub case: Case,
    pub documents: Vec<Document>,
    /// Always computed from `documents`, never from `case.document_ids`
    pub status: AggregateStatus,
    /// Ids the case references that the backend did not return
    pub missing_document_ids: Vec<String>,
}

impl CaseDetail {
    pub fn document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }
}

impl Payload for CaseDetail {
    /// A case without documents is still a loaded detail view
    fn is_empty_payload(&self) -> bool {
        false
    }
}

pub fn assemble_detail(case: Case, documents: Vec<Document>) -> Result<CaseDetail, FetchError> {
    if let Some(foreign) = documents.iter().find(|d| d.case_id != case.id) {
        return Err(FetchError::malformed(format!(
            "document {} belongs to {}, not {}",
            foreign.id, foreign.case_id, case.id
        )));
    }

    let missing_document_ids: Vec<String> = case
        .document_ids
        .iter()
        .filter(|id| !documents.iter().any(|d| &d.id == *id))
        .cloned()
        .collect();

    if !missing_document_ids.is_empty() {
        warn!(
            case = %case.id,
            missing = ?missing_document_ids,
            "case references documents the backend did not return"
        );
    }

    let status = aggregate(&documents);

    Ok(CaseDetail {
        case,
        documents,
        status,
        missing_document_ids,
    })
}
