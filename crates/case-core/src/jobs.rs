//! Admin-triggered backend jobs: corpus re-indexing and document re-analysis
//!
//! The jobs run on the backend; the client only triggers them and shows the
//! returned report. Each job has its own view machine so triggering one never
//! disturbs the case screens or the other job.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FetchError;
use crate::repository::CaseRepository;
use crate::view::{Payload, Resolution, Ticket, ViewMachine};

/// Response of `POST /api/corpus/regenerate-index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRegenerationReport {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub research_areas: Vec<String>,
    #[serde(default)]
    pub legal_concepts_count: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Response of `POST /api/documents/regenerate-analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRegenerationReport {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub analyzed_documents: u64,
    #[serde(default)]
    pub failed_documents: u64,
    #[serde(default)]
    pub average_confidence: f64,
    #[serde(default)]
    pub processing_time_seconds: f64,
}

impl AnalysisRegenerationReport {
    /// Share of documents analyzed in this run, 0 when nothing was processed
    pub fn success_ratio(&self) -> f64 {
        if self.total_documents == 0 {
            return 0.0;
        }
        (self.analyzed_documents as f64 / self.total_documents as f64).clamp(0.0, 1.0)
    }
}

impl Payload for IndexRegenerationReport {
    fn is_empty_payload(&self) -> bool {
        false
    }
}

impl Payload for AnalysisRegenerationReport {
    fn is_empty_payload(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct AdminJobs {
    index: ViewMachine<IndexRegenerationReport>,
    analysis: ViewMachine<AnalysisRegenerationReport>,
}

impl Default for AdminJobs {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminJobs {
    pub fn new() -> Self {
        Self {
            index: ViewMachine::new("regenerate-index"),
            analysis: ViewMachine::new("regenerate-analysis"),
        }
    }

    pub fn index(&self) -> &ViewMachine<IndexRegenerationReport> {
        &self.index
    }

    pub fn analysis(&self) -> &ViewMachine<AnalysisRegenerationReport> {
        &self.analysis
    }

    pub fn begin_index(&mut self) -> Ticket {
        info!("Triggering corpus re-index");
        self.index.begin()
    }

    pub fn complete_index(
        &mut self,
        ticket: Ticket,
        result: Result<IndexRegenerationReport, FetchError>,
    ) -> Resolution {
        self.index.resolve(ticket, result)
    }

    pub fn begin_analysis(&mut self) -> Ticket {
        info!("Triggering document re-analysis");
        self.analysis.begin()
    }

    pub fn complete_analysis(
        &mut self,
        ticket: Ticket,
        result: Result<AnalysisRegenerationReport, FetchError>,
    ) -> Resolution {
        self.analysis.resolve(ticket, result)
    }

    /// Trigger and await the re-index job
    pub async fn regenerate_index<R>(&mut self, repo: &R) -> Resolution
    where
        R: CaseRepository + ?Sized,
    {
        let ticket = self.begin_index();
        let result = repo.regenerate_index().await;
        self.complete_index(ticket, result)
    }

    /// Trigger and await the re-analysis job
    pub async fn regenerate_analysis<R>(&mut self, repo: &R) -> Resolution
    where
        R: CaseRepository + ?Sized,
    {
        let ticket = self.begin_analysis();
        let result = repo.regenerate_analysis().await;
        self.complete_analysis(ticket, result)
    }
}
