use std::collections::VecDeque;
use std::time::Duration;

use crate::core::deck::{DeckEvent, DecisionCommit, SwipeDeck};
use crate::core::gesture::GestureTracker;
use crate::models::{CriteriaError, DecisionOutcome, FilterCriteria, SwipeDirection};
use crate::services::{BackendError, DecisionService};

/// Default bound on a like submission before it resolves as a timeout failure
pub const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_secs(15);

/// Binds the gesture tracker, the deck controller, and the remote decision
/// service into one event-driven surface for the UI.
///
/// Everything here runs on one logical task; the only suspension point is the
/// remote swipe call inside [`Self::pointer_up`]. Gesture starts arriving
/// while that call is outstanding are rejected, not queued.
pub struct DeckSession<S> {
    deck: SwipeDeck,
    tracker: GestureTracker,
    service: S,
    decision_timeout: Duration,
    /// Single outgoing queue; deck events are folded in as they are produced
    /// so cross-kind emission order survives the drain
    events: VecDeque<DeckEvent>,
}

impl<S: DecisionService> DeckSession<S> {
    /// Fetch the initial pool from the service and build the deck over it
    pub async fn start(
        service: S,
        criteria: FilterCriteria,
        screen_center_y: f64,
    ) -> Result<Self, SessionError> {
        let pool = service.fetch_recommendations().await?;
        tracing::info!(candidates = pool.len(), "deck session started");
        let deck = SwipeDeck::new(pool, criteria)?;
        Ok(Self {
            deck,
            tracker: GestureTracker::new(screen_center_y),
            service,
            decision_timeout: DEFAULT_DECISION_TIMEOUT,
            events: VecDeque::new(),
        })
    }

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn deck(&self) -> &SwipeDeck {
        &self.deck
    }

    /// Gesture start. A no-op while the deck is empty, awaiting a like
    /// resolution, or blocked on a limit.
    pub fn pointer_down(&mut self, x: f64) {
        if !self.deck.accepts_input() {
            tracing::debug!("gesture start ignored, deck not accepting input");
            return;
        }
        self.tracker.begin(x);
    }

    /// Pointer movement during a drag; emits a `GestureProgress` event for
    /// live card feedback. No-op outside a gesture.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some((dx, dy)) = self.tracker.update(x, y) {
            self.events.push_back(DeckEvent::GestureProgress { dx, dy });
        }
    }

    /// Gesture end (release or pointer-leave): commit the decision and, for a
    /// like, submit it and reconcile the outcome. Submissions are strictly
    /// sequential by construction; the deck rejects input while one is out.
    pub async fn pointer_up(&mut self) {
        let Some(direction) = self.tracker.finish() else {
            return; // snap back, no decision
        };

        match self.deck.commit_decision(direction) {
            DecisionCommit::Rejected | DecisionCommit::Passed(_) => {}
            DecisionCommit::LikePending(candidate_id) => {
                let submission = self.service.submit_decision(candidate_id, direction);
                let outcome = match tokio::time::timeout(self.decision_timeout, submission).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        tracing::warn!(candidate = %candidate_id, "like submission timed out");
                        DecisionOutcome::Failed {
                            reason: "timeout".to_string(),
                        }
                    }
                };
                self.deck.resolve_like(outcome);
            }
        }
        self.collect_deck_events();
    }

    /// Commit a filter draft. The rebuild resets any in-progress gesture and
    /// is deferred behind an in-flight like by the deck.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<(), CriteriaError> {
        self.tracker.cancel();
        let result = self.deck.apply_filters(criteria);
        self.collect_deck_events();
        result
    }

    /// Re-fetch the candidate pool, e.g. once the queue runs dry
    pub async fn refresh_recommendations(&mut self) -> Result<(), SessionError> {
        let pool = self.service.fetch_recommendations().await?;
        tracing::info!(candidates = pool.len(), "recommendations refreshed");
        self.tracker.cancel();
        self.deck.set_pool(pool);
        self.collect_deck_events();
        Ok(())
    }

    /// External limit reset
    pub fn clear_limit(&mut self) {
        self.deck.clear_limit();
    }

    /// Drain pending presentation events in emission order, deck state
    /// changes and per-frame gesture progress interleaved as they happened
    pub fn drain_events(&mut self) -> Vec<DeckEvent> {
        self.collect_deck_events();
        self.events.drain(..).collect()
    }

    fn collect_deck_events(&mut self) {
        self.events.extend(self.deck.drain_events());
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}
