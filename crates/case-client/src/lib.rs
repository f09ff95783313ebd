//! Case Client - native HTTP repository for the case review backend
//!
//! Implements [`CaseRepository`] over `reqwest`. URL layout, status mapping
//! and payload decoding come from `case-core`, so this crate only moves bytes.

use async_trait::async_trait;
use case_core::decode;
use case_core::{
    AnalysisRegenerationReport, Case, CaseRepository, ClientConfig, ConfigError, Document,
    Endpoints, FetchError, IndexRegenerationReport,
};
use reqwest::{Client, Method};
use tracing::{debug, warn};

/// Backend repository over HTTP
#[derive(Debug, Clone)]
pub struct HttpCaseRepository {
    client: Client,
    endpoints: Endpoints,
}

impl HttpCaseRepository {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.api_base),
        })
    }

    /// Repository configured from `CASE_REVIEW_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issue one request and return the body of a 2xx response
    async fn send(&self, method: Method, url: &str, resource: &str) -> Result<String, FetchError> {
        debug!(%method, %url, "request");

        let response = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(%url, "Request failed: {}", e);
                FetchError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(%url, "Failed to read response body: {}", e);
            FetchError::network(e.to_string())
        })?;

        if !status.is_success() {
            let err = FetchError::from_status(status.as_u16(), &body, resource);
            warn!(%method, %url, status = status.as_u16(), "{}", err);
            return Err(err);
        }

        Ok(body)
    }
}

#[async_trait(?Send)]
impl CaseRepository for HttpCaseRepository {
    async fn list_cases(&self) -> Result<Vec<Case>, FetchError> {
        let body = self.send(Method::GET, &self.endpoints.cases(), "cases").await?;
        decode::case_list(&body)
    }

    async fn get_case(&self, id: &str) -> Result<Case, FetchError> {
        let resource = format!("case {}", id);
        let body = self
            .send(Method::GET, &self.endpoints.case(id), &resource)
            .await?;
        decode::case(&body, id)
    }

    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, FetchError> {
        let resource = format!("documents for case {}", case_id);
        let body = self
            .send(Method::GET, &self.endpoints.case_documents(case_id), &resource)
            .await?;
        decode::documents(&body, case_id)
    }

    async fn regenerate_index(&self) -> Result<IndexRegenerationReport, FetchError> {
        let body = self
            .send(Method::POST, &self.endpoints.regenerate_index(), "corpus index job")
            .await?;
        decode::index_report(&body)
    }

    async fn regenerate_analysis(&self) -> Result<AnalysisRegenerationReport, FetchError> {
        let body = self
            .send(
                Method::POST,
                &self.endpoints.regenerate_analysis(),
                "document analysis job",
            )
            .await?;
        decode::analysis_report(&body)
    }
}
