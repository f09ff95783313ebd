//! Contract with the backend collaborator
//!
//! Implementations perform exactly one network call per method, never retry,
//! and never touch view state. Every failure is reported as a [`FetchError`].

use async_trait::async_trait;

use crate::error::FetchError;
use crate::jobs::{AnalysisRegenerationReport, IndexRegenerationReport};
use crate::model::{Case, Document};

/// Read access to cases and documents plus the two admin jobs
///
/// Futures are not required to be `Send`: the browser runs everything on
/// one thread.
#[async_trait(?Send)]
pub trait CaseRepository {
    async fn list_cases(&self) -> Result<Vec<Case>, FetchError>;

    /// A missing case is [`FetchError::NotFound`]
    async fn get_case(&self, id: &str) -> Result<Case, FetchError>;

    /// Documents belonging to `case_id`
    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, FetchError>;

    async fn regenerate_index(&self) -> Result<IndexRegenerationReport, FetchError>;

    async fn regenerate_analysis(&self) -> Result<AnalysisRegenerationReport, FetchError>;
}

/// Backend URL layout shared by every repository implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn cases(&self) -> String {
        format!("{}/api/cases", self.base)
    }

    pub fn case(&self, id: &str) -> String {
        format!("{}/api/cases/{}", self.base, urlencoding::encode(id))
    }

    pub fn case_documents(&self, case_id: &str) -> String {
        format!(
            "{}/api/documents/cases/{}/documents",
            self.base,
            urlencoding::encode(case_id)
        )
    }

    pub fn regenerate_index(&self) -> String {
        format!("{}/api/corpus/regenerate-index", self.base)
    }

    pub fn regenerate_analysis(&self) -> String {
        format!("{}/api/documents/regenerate-analysis", self.base)
    }
}
