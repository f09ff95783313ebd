//! Integration tests for HttpCaseRepository against a local mock backend

mod common;

use std::time::Duration;

use case_client::HttpCaseRepository;
use case_core::{
    CaseRepository, CaseStatus, ClientConfig, FailureClass, FetchError, Navigator, Resolution,
    Route, ViewState,
};
use pretty_assertions::assert_eq;

async fn repository() -> anyhow::Result<HttpCaseRepository> {
    let base = common::spawn_backend().await?;
    let config = ClientConfig::new(&base)?.with_timeout(Duration::from_secs(5));
    Ok(HttpCaseRepository::new(&config)?)
}

// ============================================================
// Reads
// ============================================================

#[tokio::test]
async fn test_lists_cases() -> anyhow::Result<()> {
    let repo = repository().await?;
    let cases = repo.list_cases().await?;

    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0].client_name, "Sarah Chen");
    assert_eq!(cases[1].status, CaseStatus::UnderReview);
    assert!(cases[0].created_date.is_some());
    Ok(())
}

#[tokio::test]
async fn test_gets_case_and_documents() -> anyhow::Result<()> {
    let repo = repository().await?;

    let case = repo.get_case("case-001").await?;
    assert_eq!(case.playbook_id.as_deref(), Some("playbook-001"));

    let documents = repo.list_documents("case-001").await?;
    assert_eq!(documents.len(), 3);
    assert!(documents.iter().all(|d| d.case_id == "case-001"));
    Ok(())
}

#[tokio::test]
async fn test_missing_case_is_not_found() -> anyhow::Result<()> {
    let repo = repository().await?;
    let err = repo.get_case("case-404").await.unwrap_err();

    assert_eq!(err, FetchError::not_found("case case-404"));
    assert_eq!(err.kind(), "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_server_error_carries_message() -> anyhow::Result<()> {
    let repo = repository().await?;
    let err = repo.get_case(common::BROKEN_CASE).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Server {
            status: 500,
            message: "database offline".to_string(),
        }
    );
    assert_eq!(err.class(), FailureClass::Server);
    Ok(())
}

#[tokio::test]
async fn test_case_without_id_is_malformed() -> anyhow::Result<()> {
    let repo = repository().await?;
    let err = repo.get_case(common::ANONYMOUS_CASE).await.unwrap_err();
    assert_eq!(err.kind(), "MALFORMED_RESPONSE");
    Ok(())
}

#[tokio::test]
async fn test_foreign_documents_are_malformed() -> anyhow::Result<()> {
    let repo = repository().await?;
    let err = repo
        .list_documents(common::FOREIGN_DOCS_CASE)
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Payload);
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() -> anyhow::Result<()> {
    let base = common::unreachable_base().await?;
    let repo = HttpCaseRepository::new(&ClientConfig::new(&base)?)?;

    let err = repo.list_cases().await.unwrap_err();
    assert_eq!(err.class(), FailureClass::Network);
    assert_eq!(err.kind(), "NETWORK_FAILURE");
    Ok(())
}

// ============================================================
// Admin jobs
// ============================================================

#[tokio::test]
async fn test_regenerate_index_posts_and_decodes() -> anyhow::Result<()> {
    let repo = repository().await?;
    let report = repo.regenerate_index().await?;

    assert!(report.success);
    assert_eq!(report.total_documents, 42);
    assert_eq!(report.research_areas.len(), 2);
    assert_eq!(report.legal_concepts_count, 128);
    Ok(())
}

#[tokio::test]
async fn test_unsuccessful_analysis_report_is_still_a_report() -> anyhow::Result<()> {
    let repo = repository().await?;
    let report = repo.regenerate_analysis().await?;

    assert!(!report.success);
    assert_eq!(report.analyzed_documents, 3);
    assert_eq!(report.failed_documents, 2);
    assert!((report.success_ratio() - 0.6).abs() < 1e-9);
    Ok(())
}

// ============================================================
// Navigation over HTTP
// ============================================================

#[tokio::test]
async fn test_navigator_loads_detail_over_http() -> anyhow::Result<()> {
    let mut nav = Navigator::new(repository().await?);

    assert_eq!(nav.navigate(Route::CaseList).await, Some(Resolution::Applied));
    nav.controller_mut().set_search("innovate");
    assert_eq!(nav.controller().visible_cases().len(), 1);

    nav.navigate(Route::case_detail("case-001")).await;
    let detail = nav
        .controller()
        .case_detail()
        .loaded()
        .expect("detail should load");
    assert_eq!(detail.status.total_documents, 3);
    assert_eq!(detail.status.analyzed_count, 2);
    assert!(!detail.status.all_analyzed);

    nav.back().await;
    assert_eq!(nav.controller().case_detail(), &ViewState::Idle);
    // the search survives the round trip
    assert_eq!(nav.controller().search().query(), "innovate");
    Ok(())
}

#[tokio::test]
async fn test_navigator_surfaces_server_error() -> anyhow::Result<()> {
    let mut nav = Navigator::new(repository().await?);
    nav.navigate(Route::case_detail(common::BROKEN_CASE)).await;

    assert_eq!(
        nav.controller().case_detail().error_message().as_deref(),
        Some("Server error (500): database offline")
    );
    Ok(())
}
