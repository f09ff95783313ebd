//! JSON snapshots of each screen for the JavaScript renderer
//!
//! Every snapshot carries a `state` tag (`idle`, `loading`, `loaded`, `empty`
//! or `error`). Loaded snapshots hold display-ready strings with placeholders
//! already substituted, so the page never has to deal with missing fields.

use case_core::{AggregateStatus, Case, CaseDetail, Document, FetchError, ViewState};
use serde::Serialize;
use serde_json::{json, Value};

fn base<T>(state: &ViewState<T>) -> Value {
    let mut snapshot = json!({ "state": state.tag() });
    if let Some(err) = state.error() {
        snapshot["error"] = error(err);
    }
    snapshot
}

pub fn error(err: &FetchError) -> Value {
    json!({
        "kind": err.kind(),
        "message": err.to_string(),
    })
}

fn case_row(case: &Case) -> Value {
    json!({
        "id": case.id,
        "title": case.display_title(),
        "clientName": case.display_client(),
        "caseType": case.display_case_type(),
        "status": case.status.label(),
        "created": case.display_created(),
        "summary": case.summary,
        "documentCount": case.document_ids.len(),
    })
}

fn document_row(doc: &Document) -> Value {
    json!({
        "id": doc.id,
        "name": doc.display_name(),
        "type": doc.kind.label(),
        "size": doc.display_size(),
        "uploaded": doc.display_uploaded(),
        "preview": doc.content_preview,
        "analysisCompleted": doc.analysis_completed,
    })
}

fn status(status: &AggregateStatus) -> Value {
    json!({
        "totalDocuments": status.total_documents,
        "analyzedCount": status.analyzed_count,
        "pendingCount": status.pending_count(),
        "completionRatio": status.completion_ratio,
        "completionPercent": status.completion_percent(),
        "allAnalyzed": status.all_analyzed,
        "progress": status.progress(),
    })
}

/// Case list screen: the visible (filtered) rows plus the active query
pub fn case_list(state: &ViewState<Vec<Case>>, visible: &[&Case], query: &str) -> Value {
    let mut snapshot = base(state);
    snapshot["query"] = json!(query);

    if let ViewState::Loaded(all) = state {
        snapshot["total"] = json!(all.len());
        snapshot["cases"] = visible.iter().map(|c| case_row(c)).collect();
    }
    snapshot
}

/// Case detail screen: header, parties, documents and the analysis aggregate
pub fn case_detail(state: &ViewState<CaseDetail>) -> Value {
    let mut snapshot = base(state);

    if let ViewState::Loaded(detail) = state {
        let case = &detail.case;
        let mut header = case_row(case);
        header["playbook"] = json!(case.playbook_label());
        header["parties"] = json!(case.parties());
        // count what is rendered below, not what the case references
        header["documentCount"] = json!(detail.status.total_documents);

        snapshot["case"] = header;
        snapshot["documents"] = detail.documents.iter().map(document_row).collect();
        snapshot["status"] = status(&detail.status);
        snapshot["missingDocumentIds"] = json!(detail.missing_document_ids);
    }
    snapshot
}

/// Document screen, built from the row that was clicked
pub fn document(document: Option<&Document>) -> Value {
    match document {
        Some(doc) => {
            let mut snapshot = document_row(doc);
            snapshot["state"] = json!("loaded");
            snapshot["caseId"] = json!(doc.case_id);
            snapshot
        }
        None => json!({ "state": "idle" }),
    }
}

/// Admin job panel; reports are passed through as the backend sent them
pub fn job<T: Serialize>(state: &ViewState<T>) -> Value {
    let mut snapshot = base(state);
    if let ViewState::Loaded(report) = state {
        snapshot["report"] = json!(report);
    }
    snapshot
}
