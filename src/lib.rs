//! Runnr Core - client-side swipe deck engine for the Runnr matching app
//!
//! This library implements the interaction core behind the Runnr swipe page:
//! a pure candidate filter engine, a drag-gesture state machine, and an
//! optimistic deck controller that reconciles like decisions against the
//! backend's rate-limited swipe endpoint.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{DeckEvent, DeckPhase, DeckSession, GestureTracker, SwipeDeck, COMMIT_THRESHOLD};
pub use models::{
    Candidate, CandidateId, DecisionOutcome, FilterCriteria, LimitKind, SwipeDirection,
};
pub use services::{DecisionService, RunnrClient};
