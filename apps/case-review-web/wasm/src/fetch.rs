//! Browser implementation of the case repository over `window.fetch`

use async_trait::async_trait;
use case_core::decode;
use case_core::{
    AnalysisRegenerationReport, Case, CaseRepository, ClientConfig, ConfigError, Document,
    Endpoints, FetchError, IndexRegenerationReport,
};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone)]
pub struct FetchRepository {
    endpoints: Endpoints,
}

impl FetchRepository {
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        let config = ClientConfig::new(api_base)?;
        Ok(Self {
            endpoints: Endpoints::new(&config.api_base),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issue one request and return the body of a 2xx response
    async fn send(&self, method: &str, url: &str, resource: &str) -> Result<String, FetchError> {
        debug!(%method, %url, "request");

        let (status, body) = request(method, url)
            .await
            .map_err(|e| FetchError::network(describe(&e)))?;

        if !(200..300).contains(&status) {
            return Err(FetchError::from_status(status, &body, resource));
        }
        Ok(body)
    }
}

async fn request(method: &str, url: &str) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Accept", "application/json")?;

    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;

    let text = JsFuture::from(response.text()?).await?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}

/// Human-readable text for a rejected fetch promise
fn describe(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "request could not be sent".to_string())
}

#[async_trait(?Send)]
impl CaseRepository for FetchRepository {
    async fn list_cases(&self) -> Result<Vec<Case>, FetchError> {
        let body = self.send("GET", &self.endpoints.cases(), "cases").await?;
        decode::case_list(&body)
    }

    async fn get_case(&self, id: &str) -> Result<Case, FetchError> {
        let resource = format!("case {}", id);
        let body = self.send("GET", &self.endpoints.case(id), &resource).await?;
        decode::case(&body, id)
    }

    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, FetchError> {
        let resource = format!("documents for case {}", case_id);
        let body = self
            .send("GET", &self.endpoints.case_documents(case_id), &resource)
            .await?;
        decode::documents(&body, case_id)
    }

    async fn regenerate_index(&self) -> Result<IndexRegenerationReport, FetchError> {
        let body = self
            .send("POST", &self.endpoints.regenerate_index(), "corpus index job")
            .await?;
        decode::index_report(&body)
    }

    async fn regenerate_analysis(&self) -> Result<AnalysisRegenerationReport, FetchError> {
        let body = self
            .send(
                "POST",
                &self.endpoints.regenerate_analysis(),
                "document analysis job",
            )
            .await?;
        decode::analysis_report(&body)
    }
}
