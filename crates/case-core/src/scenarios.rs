//! End-to-end navigation scenarios against the in-memory repository
//!
//! Test categories:
//! - Case list loading, empty and error states
//! - Case detail joins (success, first failure wins, not found)
//! - Stale responses from superseded navigations and searches
//! - Admin jobs

use pretty_assertions::assert_eq;

use crate::error::{FailureClass, FetchError};
use crate::fixtures::{Behavior, MemoryRepository};
use crate::navigation::{fetch, load_case_detail, NavigationController, Navigator, Route};
use crate::view::{Resolution, ViewState};

fn ids(cases: &[&crate::model::Case]) -> Vec<String> {
    cases.iter().map(|c| c.id.clone()).collect()
}

// ============================================================
// Case list
// ============================================================

#[tokio::test]
async fn case_list_loads_sample() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    assert_eq!(nav.navigate(Route::CaseList).await, Some(Resolution::Applied));

    match nav.controller().case_list() {
        ViewState::Loaded(cases) => assert_eq!(cases.len(), 3),
        other => panic!("unexpected state: {:?}", other),
    }
    assert_eq!(nav.controller().visible_cases().len(), 3);
}

#[tokio::test]
async fn empty_case_list_is_empty_not_loaded() {
    let mut nav = Navigator::new(MemoryRepository::default());
    nav.navigate(Route::CaseList).await;
    assert_eq!(nav.controller().case_list(), &ViewState::Empty);
}

#[tokio::test]
async fn case_list_failure_surfaces_error_and_waits_for_retry() {
    let repo = MemoryRepository::sample()
        .with_list_cases(Behavior::Fail(FetchError::network("connection refused")));
    let mut nav = Navigator::new(repo);
    nav.navigate(Route::CaseList).await;

    let state = nav.controller().case_list();
    assert_eq!(state.tag(), "error");
    assert_eq!(
        state.error_message().as_deref(),
        Some("Network failure: connection refused")
    );
    assert!(nav.controller().visible_cases().is_empty());
    // no automatic retry happened
    assert_eq!(nav.repository().calls(), 1);

    nav.retry().await;
    assert_eq!(nav.repository().calls(), 2);
}

#[tokio::test]
async fn search_filters_loaded_list() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::CaseList).await;

    nav.controller_mut().set_search("Chen");
    let visible = nav.controller().visible_cases();
    assert_eq!(ids(&visible), vec!["case-001"]);
    assert_eq!(visible[0].client_name, "Sarah Chen");

    nav.controller_mut().set_search("  ");
    assert_eq!(nav.controller().visible_cases().len(), 3);
}

#[tokio::test]
async fn rapid_searches_show_only_latest() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::CaseList).await;

    let controller = nav.controller_mut();
    let tech = controller.submit_search("Tech");
    let techstart = controller.submit_search("TechStart");

    assert_eq!(controller.apply_search(techstart), Resolution::Applied);
    assert_eq!(ids(&controller.visible_cases()), vec!["case-001"]);

    // the earlier search resolving late must not bring its results back
    assert_eq!(controller.apply_search(tech), Resolution::Stale);
    assert_eq!(ids(&controller.visible_cases()), vec!["case-001"]);
}

// ============================================================
// Case detail
// ============================================================

#[tokio::test]
async fn case_detail_aggregates_documents() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::CaseList).await;
    nav.navigate(Route::case_detail("case-001")).await;

    let detail = nav
        .controller()
        .case_detail()
        .loaded()
        .expect("detail should be loaded");
    assert_eq!(detail.case.client_name, "Sarah Chen");
    assert_eq!(detail.documents.len(), 3);
    assert_eq!(detail.status.total_documents, 3);
    assert_eq!(detail.status.analyzed_count, 2);
    assert!((detail.status.completion_ratio - 0.667).abs() < 0.001);
    assert!(!detail.status.all_analyzed);
    // one call for the list, two for the detail
    assert_eq!(nav.repository().calls(), 3);
}

#[tokio::test]
async fn case_detail_server_error_wins_over_documents() {
    let repo = MemoryRepository::sample().with_get_case(Behavior::Fail(FetchError::Server {
        status: 500,
        message: "database offline".to_string(),
    }));
    let mut nav = Navigator::new(repo);
    nav.navigate(Route::case_detail("case-001")).await;

    let err = nav.controller().case_detail().error().expect("detail should fail");
    assert_eq!(err.class(), FailureClass::Server);
}

#[tokio::test]
async fn first_failure_does_not_wait_for_second_request() {
    let repo = MemoryRepository::sample()
        .with_get_case(Behavior::Fail(FetchError::network("timed out")))
        .with_list_documents(Behavior::Hang);

    // returns even though the documents request never completes
    let result = load_case_detail(&repo, "case-001").await;
    assert_eq!(result.unwrap_err(), FetchError::network("timed out"));
}

#[tokio::test]
async fn missing_case_is_not_found() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::case_detail("case-404")).await;

    let err = nav.controller().case_detail().error().unwrap();
    assert_eq!(err, &FetchError::not_found("case case-404"));
}

#[tokio::test]
async fn documents_from_another_case_are_malformed() {
    let mut repo = MemoryRepository::sample();
    let foreign = repo.documents["case-002"].clone();
    repo.documents.insert("case-001".to_string(), foreign);

    let mut nav = Navigator::new(repo);
    nav.navigate(Route::case_detail("case-001")).await;
    assert_eq!(
        nav.controller().case_detail().error().map(FetchError::kind),
        Some("MALFORMED_RESPONSE")
    );
}

#[tokio::test]
async fn back_refetches_case_list() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::CaseList).await;
    nav.navigate(Route::case_detail("case-002")).await;
    let before = nav.repository().calls();

    nav.back().await;
    assert_eq!(nav.controller().route(), &Route::CaseList);
    assert_eq!(nav.controller().case_list().tag(), "loaded");
    assert_eq!(nav.controller().case_detail(), &ViewState::Idle);
    assert_eq!(nav.repository().calls(), before + 1);
}

#[tokio::test]
async fn open_document_leaves_detail_and_back_returns_to_case() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    nav.navigate(Route::case_detail("case-001")).await;

    // documents not on the loaded case cannot be opened
    assert_eq!(nav.open_document("doc-999").await, None);
    assert_eq!(nav.controller().route(), &Route::case_detail("case-001"));

    assert_eq!(nav.open_document("doc-002").await, None);
    assert_eq!(
        nav.controller().route().path(),
        "/cases/case-001/documents/doc-002"
    );
    assert_eq!(nav.controller().case_detail(), &ViewState::Idle);

    nav.back().await;
    assert_eq!(nav.controller().route(), &Route::case_detail("case-001"));
    assert_eq!(nav.controller().case_detail().tag(), "loaded");
}

// ============================================================
// Stale responses
// ============================================================

#[tokio::test]
async fn superseded_detail_navigation_is_discarded() {
    let repo = MemoryRepository::sample();
    let mut controller = NavigationController::new();

    let first = controller.navigate(Route::case_detail("case-001")).unwrap();
    let second = controller.navigate(Route::case_detail("case-002")).unwrap();

    let second_outcome = fetch(&repo, second).await;
    let first_outcome = fetch(&repo, first).await;

    assert_eq!(controller.apply(second_outcome), Resolution::Applied);
    assert_eq!(controller.apply(first_outcome), Resolution::Stale);

    let detail = controller.case_detail().loaded().unwrap();
    assert_eq!(detail.case.id, "case-002");
}

#[tokio::test]
async fn stale_error_cannot_replace_newer_result() {
    let failing = MemoryRepository::sample()
        .with_list_cases(Behavior::Fail(FetchError::from_status(502, "", "cases")));
    let healthy = MemoryRepository::sample();
    let mut controller = NavigationController::new();

    let first = controller.navigate(Route::CaseList).unwrap();
    let second = controller.retry().unwrap();

    let newer = fetch(&healthy, second).await;
    assert_eq!(controller.apply(newer), Resolution::Applied);
    let older = fetch(&failing, first).await;
    assert_eq!(controller.apply(older), Resolution::Stale);
    assert_eq!(controller.case_list().tag(), "loaded");
}

#[tokio::test]
async fn response_for_abandoned_screen_is_ignored() {
    let repo = MemoryRepository::sample();
    let mut controller = NavigationController::new();

    let detail = controller.navigate(Route::case_detail("case-001")).unwrap();
    controller.back();

    let outcome = fetch(&repo, detail).await;
    assert_eq!(controller.apply(outcome), Resolution::Stale);
    assert_eq!(controller.case_detail(), &ViewState::Idle);
}

// ============================================================
// Admin jobs
// ============================================================

#[tokio::test]
async fn admin_jobs_report_results() {
    let mut nav = Navigator::new(MemoryRepository::sample());
    assert_eq!(nav.regenerate_index().await, Resolution::Applied);
    assert_eq!(nav.regenerate_analysis().await, Resolution::Applied);

    let index = nav.jobs().index().state().loaded().unwrap();
    assert_eq!(index.total_documents, 5);

    let analysis = nav.jobs().analysis().state().loaded().unwrap();
    assert_eq!(analysis.analyzed_documents, 2);
    assert_eq!(analysis.failed_documents, 3);
    // jobs never touch the screens
    assert_eq!(nav.controller().case_list(), &ViewState::Idle);
}

#[tokio::test]
async fn admin_job_failure_is_surfaced() {
    let rejected = FetchError::from_status(403, r#"{"error": "admin only"}"#, "job");
    let repo = MemoryRepository::sample().with_jobs(Behavior::Fail(rejected));
    let mut nav = Navigator::new(repo);
    nav.regenerate_index().await;

    assert_eq!(
        nav.jobs().index().state().error_message().as_deref(),
        Some("Request rejected (403): admin only")
    );
}
