//! Stateful app handle exposed to JavaScript
//!
//! Navigation is split in two: the controller is updated synchronously and
//! hands back a pending fetch, which runs on `spawn_local` and is applied
//! when it settles. No borrow of the shared state is held across an await.

use std::cell::RefCell;
use std::rc::Rc;

use case_core::{
    fetch, AdminJobs, CaseRepository, Document, NavigationController, PendingFetch, Resolution,
    Route,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::console_log;
use crate::fetch::FetchRepository;
use crate::snapshot;

struct AppState {
    controller: NavigationController,
    jobs: AdminJobs,
    /// Row clicked to open the document screen
    open_document: Option<Document>,
    on_change: Option<js_sys::Function>,
}

impl AppState {
    fn new() -> Self {
        Self {
            controller: NavigationController::new(),
            jobs: AdminJobs::new(),
            open_document: None,
            on_change: None,
        }
    }
}

/// Case review client
#[wasm_bindgen]
pub struct CaseReviewApp {
    repo: Rc<FetchRepository>,
    state: Rc<RefCell<AppState>>,
}

#[wasm_bindgen]
impl CaseReviewApp {
    /// Create an app talking to the backend at `api_base`
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: &str) -> Result<CaseReviewApp, JsValue> {
        let repo = FetchRepository::new(api_base).map_err(|e| JsValue::from_str(&e.to_string()))?;
        console_log(&format!("Case review client using {}", repo.endpoints().base()));

        Ok(CaseReviewApp {
            repo: Rc::new(repo),
            state: Rc::new(RefCell::new(AppState::new())),
        })
    }

    /// Register a callback invoked whenever any view changes
    /// Callback signature: () => void
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.state.borrow_mut().on_change = Some(callback);
    }

    /// Go to a client path such as `/cases` or `/cases/case-001`
    pub fn navigate(&self, path: &str) -> Result<(), JsValue> {
        let route = Route::parse(path)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown path: {}", path)))?;

        let pending = {
            let mut state = self.state.borrow_mut();
            state.open_document = None;
            state.controller.navigate(route)
        };
        self.changed(pending);
        Ok(())
    }

    pub fn back(&self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            state.open_document = None;
            state.controller.back()
        };
        self.changed(pending);
    }

    /// Re-fetch the current screen after an error
    pub fn retry(&self) {
        let pending = self.state.borrow_mut().controller.retry();
        self.changed(pending);
    }

    /// Filter the loaded case list
    #[wasm_bindgen(js_name = setSearch)]
    pub fn set_search(&self, query: &str) {
        self.state.borrow_mut().controller.set_search(query);
        self.changed(None);
    }

    /// Open a document from the loaded case detail
    ///
    /// Returns false when the document is not listed on the current case.
    #[wasm_bindgen(js_name = openDocument)]
    pub fn open_document(&self, document_id: &str) -> bool {
        let pending = {
            let mut state = self.state.borrow_mut();
            let document = state
                .controller
                .case_detail()
                .loaded()
                .and_then(|detail| detail.document(document_id))
                .cloned();

            let Some(document) = document else {
                return false;
            };
            state.open_document = Some(document);
            state.controller.open_document(document_id)
        };

        self.changed(pending);
        true
    }

    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.state.borrow().controller.route().path()
    }

    /// Case list snapshot as JSON
    #[wasm_bindgen(js_name = caseListView)]
    pub fn case_list_view(&self) -> String {
        let state = self.state.borrow();
        let controller = &state.controller;
        snapshot::case_list(
            controller.case_list(),
            &controller.visible_cases(),
            controller.search().query(),
        )
        .to_string()
    }

    /// Case detail snapshot as JSON
    #[wasm_bindgen(js_name = caseDetailView)]
    pub fn case_detail_view(&self) -> String {
        snapshot::case_detail(self.state.borrow().controller.case_detail()).to_string()
    }

    /// Opened document snapshot as JSON
    #[wasm_bindgen(js_name = documentView)]
    pub fn document_view(&self) -> String {
        snapshot::document(self.state.borrow().open_document.as_ref()).to_string()
    }

    /// Trigger a corpus re-index; the result lands in `indexJobView`
    #[wasm_bindgen(js_name = regenerateIndex)]
    pub fn regenerate_index(&self) {
        let ticket = self.state.borrow_mut().jobs.begin_index();
        notify(&self.state);

        let repo = Rc::clone(&self.repo);
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let result = repo.regenerate_index().await;
            let resolution = state.borrow_mut().jobs.complete_index(ticket, result);
            settled(&state, "regenerate-index", resolution);
        });
    }

    /// Trigger document re-analysis; the result lands in `analysisJobView`
    #[wasm_bindgen(js_name = regenerateAnalysis)]
    pub fn regenerate_analysis(&self) {
        let ticket = self.state.borrow_mut().jobs.begin_analysis();
        notify(&self.state);

        let repo = Rc::clone(&self.repo);
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let result = repo.regenerate_analysis().await;
            let resolution = state.borrow_mut().jobs.complete_analysis(ticket, result);
            settled(&state, "regenerate-analysis", resolution);
        });
    }

    #[wasm_bindgen(js_name = indexJobView)]
    pub fn index_job_view(&self) -> String {
        snapshot::job(self.state.borrow().jobs.index().state()).to_string()
    }

    #[wasm_bindgen(js_name = analysisJobView)]
    pub fn analysis_job_view(&self) -> String {
        snapshot::job(self.state.borrow().jobs.analysis().state()).to_string()
    }
}

impl CaseReviewApp {
    /// Notify the page and start the fetch, if any
    fn changed(&self, pending: Option<PendingFetch>) {
        notify(&self.state);

        let Some(pending) = pending else {
            return;
        };

        let repo = Rc::clone(&self.repo);
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let outcome = fetch(repo.as_ref(), pending).await;
            let resolution = state.borrow_mut().controller.apply(outcome);
            settled(&state, "navigation", resolution);
        });
    }
}

fn settled(state: &Rc<RefCell<AppState>>, what: &str, resolution: Resolution) {
    match resolution {
        Resolution::Applied => notify(state),
        Resolution::Stale => console_log(&format!("Discarded stale {} response", what)),
    }
}

/// Call the change callback without holding a borrow, since it reads views
fn notify(state: &Rc<RefCell<AppState>>) {
    let callback = state.borrow().on_change.clone();
    if let Some(callback) = callback {
        let _ = callback.call0(&JsValue::NULL);
    }
}
