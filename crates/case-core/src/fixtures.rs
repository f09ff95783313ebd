//! Sample cases and documents shared by tests across the workspace

use std::cell::Cell;
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::jobs::{AnalysisRegenerationReport, IndexRegenerationReport};
use crate::model::{parse_timestamp, Case, CaseStatus, Document, DocumentKind};
use crate::repository::CaseRepository;

/// Three cases: a TechStart licensing dispute for Sarah Chen, an employment
/// claim and a resolved patent matter
pub fn sample_cases() -> Vec<Case> {
    vec![
        Case {
            id: "case-001".to_string(),
            title: "Contract Dispute - TechStart Inc.".to_string(),
            case_type: "Contract Dispute".to_string(),
            client_name: "Sarah Chen".to_string(),
            status: CaseStatus::Active,
            created_date: parse_timestamp("2024-01-15T10:30:00Z"),
            summary: "Breach of a software licensing agreement with TechStart Inc.".to_string(),
            key_parties: vec![
                "Sarah Chen (Plaintiff)".to_string(),
                "TechStart Inc. (Defendant)".to_string(),
            ],
            document_ids: vec![
                "doc-001".to_string(),
                "doc-002".to_string(),
                "doc-003".to_string(),
            ],
            playbook_id: Some("playbook-001".to_string()),
        },
        Case {
            id: "case-002".to_string(),
            title: "Employment Discrimination Claim".to_string(),
            case_type: "Employment".to_string(),
            client_name: "Michael Rodriguez".to_string(),
            status: CaseStatus::UnderReview,
            created_date: parse_timestamp("2024-02-03T09:00:00Z"),
            summary: "Alleged wrongful termination at Global Tech Solutions.".to_string(),
            key_parties: vec![
                "Michael Rodriguez (Claimant)".to_string(),
                "Global Tech Solutions (Respondent)".to_string(),
            ],
            document_ids: vec!["doc-004".to_string(), "doc-005".to_string()],
            playbook_id: None,
        },
        Case {
            id: "case-003".to_string(),
            title: "Intellectual Property Infringement".to_string(),
            case_type: "Intellectual Property".to_string(),
            client_name: "Innovate Labs LLC".to_string(),
            status: CaseStatus::Resolved,
            created_date: parse_timestamp("2023-11-20T14:15:00Z"),
            summary: "Patent infringement claim over battery technology.".to_string(),
            key_parties: vec!["Innovate Labs LLC (Patent Holder)".to_string()],
            document_ids: Vec::new(),
            playbook_id: Some("playbook-ip".to_string()),
        },
    ]
}

/// Documents for a sample case; `case-001` has three, two of them analyzed
pub fn sample_documents(case_id: &str) -> Vec<Document> {
    match case_id {
        "case-001" => vec![
            Document {
                name: "Software License Agreement.pdf".to_string(),
                kind: DocumentKind::Contract,
                size: 245_760,
                content_preview: "This Software License Agreement is entered into...".to_string(),
                ..sample_document("doc-001", case_id, true)
            },
            Document {
                name: "Breach Notice.pdf".to_string(),
                kind: DocumentKind::Correspondence,
                size: 51_200,
                content_preview: "Notice is hereby given that TechStart Inc. ...".to_string(),
                ..sample_document("doc-002", case_id, true)
            },
            Document {
                name: "Plaintiff Brief.docx".to_string(),
                kind: DocumentKind::LegalBrief,
                size: 102_400,
                content_preview: "Plaintiff respectfully submits this brief...".to_string(),
                ..sample_document("doc-003", case_id, false)
            },
        ],
        "case-002" => vec![
            sample_document("doc-004", case_id, false),
            Document {
                kind: DocumentKind::Evidence,
                ..sample_document("doc-005", case_id, false)
            },
        ],
        _ => Vec::new(),
    }
}

pub fn sample_document(id: &str, case_id: &str, analysis_completed: bool) -> Document {
    Document {
        id: id.to_string(),
        case_id: case_id.to_string(),
        name: format!("{}.pdf", id),
        kind: DocumentKind::Contract,
        size: 1024,
        upload_date: parse_timestamp("2024-01-16T08:00:00Z"),
        content_preview: String::new(),
        analysis_completed,
    }
}

/// How a [`MemoryRepository`] method should behave
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    Respond,
    Fail(FetchError),
    /// Never resolve, like a request still in flight
    Hang,
}

impl Behavior {
    async fn run<T>(
        &self,
        respond: impl FnOnce() -> Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        match self {
            Behavior::Respond => respond(),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Hang => futures::future::pending().await,
        }
    }
}

/// In-memory backend with per-method failure injection
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub cases: Vec<Case>,
    pub documents: HashMap<String, Vec<Document>>,
    pub list_cases: Behavior,
    pub get_case: Behavior,
    pub list_documents: Behavior,
    pub jobs: Behavior,
    calls: Cell<usize>,
}

impl MemoryRepository {
    /// The three sample cases with their documents
    pub fn sample() -> Self {
        let cases = sample_cases();
        let documents = cases
            .iter()
            .map(|c| (c.id.clone(), sample_documents(&c.id)))
            .collect();
        Self {
            cases,
            documents,
            ..Self::default()
        }
    }

    pub fn with_list_cases(mut self, behavior: Behavior) -> Self {
        self.list_cases = behavior;
        self
    }

    pub fn with_get_case(mut self, behavior: Behavior) -> Self {
        self.get_case = behavior;
        self
    }

    pub fn with_list_documents(mut self, behavior: Behavior) -> Self {
        self.list_documents = behavior;
        self
    }

    /// Behavior of both admin jobs
    pub fn with_jobs(mut self, behavior: Behavior) -> Self {
        self.jobs = behavior;
        self
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[async_trait(?Send)]
impl CaseRepository for MemoryRepository {
    async fn list_cases(&self) -> Result<Vec<Case>, FetchError> {
        self.record();
        self.list_cases.run(|| Ok(self.cases.clone())).await
    }

    async fn get_case(&self, id: &str) -> Result<Case, FetchError> {
        self.record();
        self.get_case
            .run(|| {
                self.cases
                    .iter()
                    .find(|c| c.id == id)
                    .cloned()
                    .ok_or_else(|| FetchError::not_found(format!("case {}", id)))
            })
            .await
    }

    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, FetchError> {
        self.record();
        self.list_documents
            .run(|| Ok(self.documents.get(case_id).cloned().unwrap_or_default()))
            .await
    }

    async fn regenerate_index(&self) -> Result<IndexRegenerationReport, FetchError> {
        self.record();
        self.jobs
            .run(|| {
                Ok(IndexRegenerationReport {
                    success: true,
                    message: "Corpus index regenerated".to_string(),
                    total_documents: self.documents.values().map(|d| d.len() as u64).sum(),
                    research_areas: vec!["Contract Law".to_string()],
                    legal_concepts_count: 12,
                    last_updated: Some("2024-03-01T12:00:00Z".to_string()),
                })
            })
            .await
    }

    async fn regenerate_analysis(&self) -> Result<AnalysisRegenerationReport, FetchError> {
        self.record();
        self.jobs
            .run(|| {
                let all: Vec<&Document> = self.documents.values().flatten().collect();
                let analyzed = all.iter().filter(|d| d.analysis_completed).count() as u64;
                Ok(AnalysisRegenerationReport {
                    success: true,
                    message: "Analysis regenerated".to_string(),
                    total_documents: all.len() as u64,
                    analyzed_documents: analyzed,
                    failed_documents: all.len() as u64 - analyzed,
                    average_confidence: 0.87,
                    processing_time_seconds: 3.2,
                })
            })
            .await
    }
}
