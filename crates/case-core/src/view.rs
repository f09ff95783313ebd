//! Per-screen fetch lifecycle
//!
//! Each screen owns a [`ViewMachine`]. Starting a fetch moves it to `Loading`
//! and hands out a [`Ticket`] stamped with a fresh generation. The fetch result
//! is only applied if it comes back with the current ticket, so a response
//! from a superseded request can never overwrite a newer one.
//!
//! ```text
//! Idle ──begin──▶ Loading ──ok(n>0)──▶ Loaded
//!   ▲                │ ──ok(n=0)──▶ Empty
//!   └──discard───────┘ ──err──────▶ Error
//! ```
//!
//! Every state can re-enter `Loading` through `begin`. There is no path from
//! `Loaded` to `Error` that skips `Loading`.

use tracing::debug;

use crate::error::FetchError;

/// Monotonic request counter owned by one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Proof that a fetch was issued, presented back with its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: Generation,
}

impl Ticket {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Empty,
    Error(FetchError),
}

impl<T> ViewState<T> {
    /// Lowercase tag used by the UI layer
    pub fn tag(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Empty => "empty",
            ViewState::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Message to show in the error banner
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// Decides between `Loaded` and `Empty` for a successful fetch
pub trait Payload {
    fn is_empty_payload(&self) -> bool;
}

impl<T> Payload for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

/// Whether a result was applied to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded; the view was left untouched
    Stale,
}

#[derive(Debug)]
pub struct ViewMachine<T> {
    name: &'static str,
    generation: Generation,
    state: ViewState<T>,
}

impl<T: Payload> ViewMachine<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: Generation::default(),
            state: ViewState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Start a fetch; any earlier ticket becomes stale
    pub fn begin(&mut self) -> Ticket {
        self.generation = self.generation.next();
        self.state = ViewState::Loading;
        debug!(view = self.name, generation = self.generation.0, "loading");
        Ticket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation && self.state.is_loading()
    }

    /// Apply a fetch result if `ticket` is still the latest request
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, FetchError>) -> Resolution {
        if !self.is_current(ticket) {
            debug!(
                view = self.name,
                stale = ticket.generation.0,
                current = self.generation.0,
                "discarding stale response"
            );
            return Resolution::Stale;
        }

        self.state = match result {
            Ok(payload) if payload.is_empty_payload() => ViewState::Empty,
            Ok(payload) => ViewState::Loaded(payload),
            Err(err) => ViewState::Error(err),
        };
        debug!(
            view = self.name,
            generation = self.generation.0,
            state = self.state.tag(),
            "resolved"
        );
        Resolution::Applied
    }

    /// Drop the working set when the user leaves the screen
    ///
    /// Bumps the generation so responses still in flight are discarded.
    pub fn discard(&mut self) {
        self.generation = self.generation.next();
        self.state = ViewState::Idle;
    }
}
