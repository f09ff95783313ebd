//! Case Core - Domain model and view state for the case review client
//!
//! This crate provides:
//! - Case and Document records with placeholder-friendly display helpers
//! - The fetch failure taxonomy shared by all repository implementations
//! - Free-text case filtering and document analysis aggregation
//! - Generation-tagged view state machines for each screen
//! - Routes and the navigation controller that drives fetches
//! - The repository trait, endpoint layout and response decoding
//! - Client configuration

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod detail;
pub mod error;
pub mod filter;
pub mod jobs;
pub mod model;
pub mod navigation;
pub mod repository;
pub mod view;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
#[cfg(test)]
mod scenarios;

// Re-export commonly used types
pub use aggregate::{aggregate, AggregateStatus, AnalysisProgress};
pub use config::ClientConfig;
pub use detail::{assemble_detail, CaseDetail};
pub use error::{ConfigError, FailureClass, FetchError};
pub use filter::{filter_cases, filter_refs};
pub use jobs::{AdminJobs, AnalysisRegenerationReport, IndexRegenerationReport};
pub use model::{Case, CaseStatus, Document, DocumentKind, Party};
pub use navigation::{
    fetch, load_case_detail, FetchOutcome, NavigationController, Navigator, PendingFetch, Route,
    SearchState, SearchTicket,
};
pub use repository::{CaseRepository, Endpoints};
pub use view::{Generation, Payload, Resolution, Ticket, ViewMachine, ViewState};
