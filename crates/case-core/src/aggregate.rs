//! Analysis progress derived from a case's documents

use serde::Serialize;

use crate::model::Document;

/// Document count and analysis completion for one case
///
/// `all_analyzed` is vacuously true for a case without documents. Use
/// [`AggregateStatus::has_analysis`] before telling a user a case is fully
/// analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStatus {
    pub total_documents: usize,
    pub analyzed_count: usize,
    pub completion_ratio: f64,
    pub all_analyzed: bool,
}

/// Status chip for the analysis indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisProgress {
    NoDocuments,
    NotStarted,
    InProgress,
    Complete,
}

pub fn aggregate(documents: &[Document]) -> AggregateStatus {
    let total_documents = documents.len();
    let analyzed_count = documents.iter().filter(|d| d.analysis_completed).count();

    let completion_ratio = if total_documents == 0 {
        0.0
    } else {
        analyzed_count as f64 / total_documents as f64
    };

    AggregateStatus {
        total_documents,
        analyzed_count,
        completion_ratio,
        all_analyzed: analyzed_count == total_documents,
    }
}

impl AggregateStatus {
    pub fn pending_count(&self) -> usize {
        self.total_documents - self.analyzed_count
    }

    /// Completion rounded to a whole percentage
    pub fn completion_percent(&self) -> u8 {
        (self.completion_ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// True only when there is at least one document and all are analyzed
    pub fn has_analysis(&self) -> bool {
        self.total_documents > 0 && self.all_analyzed
    }

    pub fn progress(&self) -> AnalysisProgress {
        if self.total_documents == 0 {
            AnalysisProgress::NoDocuments
        } else if self.all_analyzed {
            AnalysisProgress::Complete
        } else if self.analyzed_count == 0 {
            AnalysisProgress::NotStarted
        } else {
            AnalysisProgress::InProgress
        }
    }
}
