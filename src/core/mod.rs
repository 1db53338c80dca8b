// Core engine exports
pub mod deck;
pub mod filters;
pub mod gesture;
pub mod session;

pub use deck::{DeckEvent, DeckPhase, DecisionCommit, SwipeDeck};
pub use filters::{apply, matches_criteria};
pub use gesture::{card_transform, CardTransform, GestureState, GestureTracker, COMMIT_THRESHOLD};
pub use session::{DeckSession, SessionError, DEFAULT_DECISION_TIMEOUT};
