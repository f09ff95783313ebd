//! Routes, screen transitions and the fetches each route needs
//!
//! Navigation is split into three steps so that no view state is borrowed
//! across an await point:
//!
//! 1. [`NavigationController::navigate`] (and friends) update the route, start
//!    the affected view machine and return a [`PendingFetch`].
//! 2. [`fetch`] performs the network calls for it. This is the only
//!    effectful step.
//! 3. [`NavigationController::apply`] hands the [`FetchOutcome`] back. Stale
//!    outcomes are dropped by the view machine.
//!
//! [`Navigator`] chains the three steps for callers that do not interleave
//! requests.

use std::fmt;

use tracing::info;

use crate::detail::{assemble_detail, CaseDetail};
use crate::error::FetchError;
use crate::filter::filter_refs;
use crate::jobs::AdminJobs;
use crate::model::Case;
use crate::repository::CaseRepository;
use crate::view::{Generation, Resolution, Ticket, ViewMachine, ViewState};

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    CaseList,
    CaseDetail { case_id: String },
    /// Rendered outside this crate
    DocumentDetail {
        case_id: String,
        document_id: String,
    },
}

impl Route {
    pub fn case_detail(case_id: impl Into<String>) -> Self {
        Route::CaseDetail {
            case_id: case_id.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::CaseList => "/cases".to_string(),
            Route::CaseDetail { case_id } => format!("/cases/{}", urlencoding::encode(case_id)),
            Route::DocumentDetail {
                case_id,
                document_id,
            } => format!(
                "/cases/{}/documents/{}",
                urlencoding::encode(case_id),
                urlencoding::encode(document_id)
            ),
        }
    }

    /// Parse a client path; `/` is the case list, unknown paths are `None`
    ///
    /// Segments are percent-decoded, so ids come back exactly as the backend
    /// knows them.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).ok().map(|d| d.into_owned()))
            .collect::<Option<Vec<String>>>()?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] | ["cases"] => Some(Route::CaseList),
            ["cases", case_id] => Some(Route::case_detail(*case_id)),
            ["cases", case_id, "documents", document_id] => Some(Route::DocumentDetail {
                case_id: case_id.to_string(),
                document_id: document_id.to_string(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ============================================================================
// Fetch pipeline
// ============================================================================

/// Work the caller must perform after a navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingFetch {
    CaseList { ticket: Ticket },
    CaseDetail { ticket: Ticket, case_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    CaseList {
        ticket: Ticket,
        result: Result<Vec<Case>, FetchError>,
    },
    CaseDetail {
        ticket: Ticket,
        result: Result<CaseDetail, FetchError>,
    },
}

/// Perform the network calls for a pending fetch
pub async fn fetch<R>(repo: &R, pending: PendingFetch) -> FetchOutcome
where
    R: CaseRepository + ?Sized,
{
    match pending {
        PendingFetch::CaseList { ticket } => FetchOutcome::CaseList {
            ticket,
            result: repo.list_cases().await,
        },
        PendingFetch::CaseDetail { ticket, case_id } => FetchOutcome::CaseDetail {
            ticket,
            result: load_case_detail(repo, &case_id).await,
        },
    }
}

/// Fetch a case and its documents together
///
/// The first failure wins: the other request is dropped without waiting for
/// it, and whatever it would have returned is ignored.
pub async fn load_case_detail<R>(repo: &R, case_id: &str) -> Result<CaseDetail, FetchError>
where
    R: CaseRepository + ?Sized,
{
    let (case, documents) =
        futures::try_join!(repo.get_case(case_id), repo.list_documents(case_id))?;
    assemble_detail(case, documents)
}

// ============================================================================
// Search
// ============================================================================

/// Search box state for the case list
///
/// Each submitted query gets its own generation. Only the latest one can be
/// applied, so a slow earlier search never replaces a later one.
#[derive(Debug, Default)]
pub struct SearchState {
    latest: Generation,
    applied: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: Generation,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl SearchState {
    pub fn submit(&mut self, query: &str) -> SearchTicket {
        self.latest = self.latest.next();
        SearchTicket {
            generation: self.latest,
            query: query.to_string(),
        }
    }

    pub fn apply(&mut self, ticket: SearchTicket) -> Resolution {
        if ticket.generation != self.latest {
            return Resolution::Stale;
        }
        self.applied = ticket.query;
        Resolution::Applied
    }

    /// Query the visible list is filtered by
    pub fn query(&self) -> &str {
        &self.applied
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Current route plus one view machine per screen
#[derive(Debug)]
pub struct NavigationController {
    route: Route,
    case_list: ViewMachine<Vec<Case>>,
    case_detail: ViewMachine<CaseDetail>,
    search: SearchState,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            route: Route::CaseList,
            case_list: ViewMachine::new("case-list"),
            case_detail: ViewMachine::new("case-detail"),
            search: SearchState::default(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn case_list(&self) -> &ViewState<Vec<Case>> {
        self.case_list.state()
    }

    pub fn case_detail(&self) -> &ViewState<CaseDetail> {
        self.case_detail.state()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Go to `route`, starting its fetch
    pub fn navigate(&mut self, route: Route) -> Option<PendingFetch> {
        self.enter(route)
    }

    /// Leave the current screen
    ///
    /// Document detail returns to its case; everything else returns to the
    /// case list, which is always fetched again.
    pub fn back(&mut self) -> Option<PendingFetch> {
        let target = match &self.route {
            Route::DocumentDetail { case_id, .. } => Route::case_detail(case_id.clone()),
            _ => Route::CaseList,
        };
        self.enter(target)
    }

    /// Fetch the current route again
    pub fn retry(&mut self) -> Option<PendingFetch> {
        let route = self.route.clone();
        self.enter(route)
    }

    /// Open a document listed on the loaded case detail
    pub fn open_document(&mut self, document_id: &str) -> Option<PendingFetch> {
        let detail = self.case_detail.state().loaded()?;
        let document = detail.document(document_id)?;
        let route = Route::DocumentDetail {
            case_id: detail.case.id.clone(),
            document_id: document.id.clone(),
        };
        self.navigate(route)
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Resolution {
        match outcome {
            FetchOutcome::CaseList { ticket, result } => self.case_list.resolve(ticket, result),
            FetchOutcome::CaseDetail { ticket, result } => {
                self.case_detail.resolve(ticket, result)
            }
        }
    }

    pub fn submit_search(&mut self, query: &str) -> SearchTicket {
        self.search.submit(query)
    }

    pub fn apply_search(&mut self, ticket: SearchTicket) -> Resolution {
        self.search.apply(ticket)
    }

    /// Submit and immediately apply a query
    pub fn set_search(&mut self, query: &str) {
        let ticket = self.search.submit(query);
        self.search.apply(ticket);
    }

    /// Loaded cases matching the applied search query
    pub fn visible_cases(&self) -> Vec<&Case> {
        match self.case_list.state() {
            ViewState::Loaded(cases) => filter_refs(cases, self.search.query()),
            _ => Vec::new(),
        }
    }

    fn enter(&mut self, route: Route) -> Option<PendingFetch> {
        info!(route = %route, "navigate");

        let pending = match &route {
            Route::CaseList => {
                self.case_detail.discard();
                Some(PendingFetch::CaseList {
                    ticket: self.case_list.begin(),
                })
            }
            Route::CaseDetail { case_id } => {
                self.case_list.discard();
                Some(PendingFetch::CaseDetail {
                    ticket: self.case_detail.begin(),
                    case_id: case_id.clone(),
                })
            }
            Route::DocumentDetail { .. } => {
                self.case_list.discard();
                self.case_detail.discard();
                None
            }
        };

        self.route = route;
        pending
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Controller, admin jobs and a repository driven together
///
/// Each call awaits its own fetch before returning. Interleaved requests go
/// through [`NavigationController`] directly.
pub struct Navigator<R> {
    repo: R,
    controller: NavigationController,
    jobs: AdminJobs,
}

impl<R: CaseRepository> Navigator<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            controller: NavigationController::new(),
            jobs: AdminJobs::new(),
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.controller
    }

    pub fn jobs(&self) -> &AdminJobs {
        &self.jobs
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn navigate(&mut self, route: Route) -> Option<Resolution> {
        let pending = self.controller.navigate(route);
        self.run(pending).await
    }

    pub async fn back(&mut self) -> Option<Resolution> {
        let pending = self.controller.back();
        self.run(pending).await
    }

    pub async fn retry(&mut self) -> Option<Resolution> {
        let pending = self.controller.retry();
        self.run(pending).await
    }

    pub async fn open_document(&mut self, document_id: &str) -> Option<Resolution> {
        let pending = self.controller.open_document(document_id);
        self.run(pending).await
    }

    pub async fn regenerate_index(&mut self) -> Resolution {
        self.jobs.regenerate_index(&self.repo).await
    }

    pub async fn regenerate_analysis(&mut self) -> Resolution {
        self.jobs.regenerate_analysis(&self.repo).await
    }

    async fn run(&mut self, pending: Option<PendingFetch>) -> Option<Resolution> {
        let pending = pending?;
        let outcome = fetch(&self.repo, pending).await;
        Some(self.controller.apply(outcome))
    }
}
