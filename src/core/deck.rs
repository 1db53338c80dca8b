use std::collections::{HashSet, VecDeque};

use crate::core::filters;
use crate::models::{
    Candidate, CandidateId, CriteriaError, DecisionOutcome, FilterCriteria, LimitKind,
    SwipeDirection,
};

/// Events surfaced to the presentation layer, drained in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    QueueChanged {
        head: Option<CandidateId>,
        remaining: usize,
    },
    MatchAchieved {
        candidate_id: CandidateId,
    },
    LimitReached {
        kind: LimitKind,
        message: String,
    },
    DecisionFailed {
        message: String,
    },
    GestureProgress {
        dx: f64,
        dy: f64,
    },
}

/// Controller phase. `Awaiting` covers the window between a like submission
/// and its resolution; `Blocked` persists after a quota error until the limit
/// is externally cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckPhase {
    Ready,
    Awaiting,
    Blocked(LimitKind),
}

/// What a committed gesture turned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionCommit {
    /// Input rejected: empty queue, awaiting a prior like, or blocked
    Rejected,
    /// Head passed and popped synchronously; no remote call needed
    Passed(CandidateId),
    /// Head popped optimistically; the caller must submit the like and feed
    /// the outcome back through [`SwipeDeck::resolve_like`]
    LikePending(CandidateId),
}

/// Owns the active queue and orchestrates the decision lifecycle.
///
/// The deck itself never performs I/O: likes leave as [`DecisionCommit`]
/// values and come back as [`DecisionOutcome`]s, which keeps every state
/// transition synchronous and directly testable. The popped candidate is kept
/// as a pre-optimistic snapshot so a limit or failure rolls the queue back
/// deterministically.
#[derive(Debug)]
pub struct SwipeDeck {
    pool: Vec<Candidate>,
    criteria: FilterCriteria,
    queue: VecDeque<Candidate>,
    /// Candidates consumed this session (confirmed likes, passes, blocks);
    /// they never reappear on rebuilds
    decided: HashSet<CandidateId>,
    phase: DeckPhase,
    /// Pre-optimistic snapshot of the candidate with a like in flight
    in_flight: Option<Candidate>,
    /// Criteria applied while a like was in flight; committed at resolution
    pending_criteria: Option<FilterCriteria>,
    /// Pool refresh received while a like was in flight; committed at
    /// resolution so the unresolved candidate cannot re-enter the queue
    pending_pool: Option<Vec<Candidate>>,
    events: VecDeque<DeckEvent>,
}

impl SwipeDeck {
    pub fn new(pool: Vec<Candidate>, criteria: FilterCriteria) -> Result<Self, CriteriaError> {
        criteria.validate()?;
        let mut deck = Self {
            pool,
            criteria,
            queue: VecDeque::new(),
            decided: HashSet::new(),
            phase: DeckPhase::Ready,
            in_flight: None,
            pending_criteria: None,
            pending_pool: None,
            events: VecDeque::new(),
        };
        deck.rebuild_queue();
        Ok(deck)
    }

    pub fn head(&self) -> Option<&Candidate> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.phase, DeckPhase::Blocked(_))
    }

    /// Committed criteria currently driving the visible deck
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Start a filter-editing session: a clone of the committed criteria.
    /// Dropping the clone discards the draft; [`Self::apply_filters`] commits it.
    pub fn draft_criteria(&self) -> FilterCriteria {
        self.criteria.clone()
    }

    /// Whether a gesture may start right now. False while awaiting a like
    /// resolution, while blocked on a limit, or with nothing left to swipe.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, DeckPhase::Ready) && !self.queue.is_empty()
    }

    /// Consume a committed gesture decision for the current head.
    ///
    /// Pass pops immediately. Like pops optimistically and enters `Awaiting`;
    /// no second decision is accepted until the like resolves.
    pub fn commit_decision(&mut self, direction: SwipeDirection) -> DecisionCommit {
        if !self.accepts_input() {
            tracing::debug!(?direction, phase = ?self.phase, "decision rejected");
            return DecisionCommit::Rejected;
        }
        let Some(candidate) = self.queue.pop_front() else {
            return DecisionCommit::Rejected;
        };
        let id = candidate.id;

        match direction {
            SwipeDirection::Left => {
                // Pass is unconditional and free of any remote call
                self.decided.insert(id);
                tracing::debug!(candidate = %id, "passed");
                self.emit_queue_changed();
                DecisionCommit::Passed(id)
            }
            SwipeDirection::Right => {
                self.in_flight = Some(candidate);
                self.phase = DeckPhase::Awaiting;
                tracing::debug!(candidate = %id, "like submitted, awaiting confirmation");
                self.emit_queue_changed();
                DecisionCommit::LikePending(id)
            }
        }
    }

    /// Reconcile the outcome of the in-flight like.
    ///
    /// Confirmed consumes the candidate; a quota error rolls the queue back
    /// and blocks further decisions; a transient failure rolls back and stays
    /// retryable. Criteria queued during the flight are committed afterwards.
    pub fn resolve_like(&mut self, outcome: DecisionOutcome) {
        let Some(candidate) = self.in_flight.take() else {
            tracing::debug!("like resolution with nothing in flight, ignoring");
            return;
        };
        let id = candidate.id;

        match outcome {
            DecisionOutcome::Confirmed { matched } => {
                self.decided.insert(id);
                self.phase = DeckPhase::Ready;
                tracing::info!(candidate = %id, matched, "like confirmed");
                if matched {
                    self.events
                        .push_back(DeckEvent::MatchAchieved { candidate_id: id });
                }
            }
            DecisionOutcome::LimitReached { kind, message } => {
                self.phase = DeckPhase::Blocked(kind);
                tracing::warn!(candidate = %id, ?kind, "swipe limit reached, rolling back");
                self.rollback(candidate);
                self.events.push_back(DeckEvent::LimitReached { kind, message });
            }
            DecisionOutcome::Failed { reason } => {
                self.phase = DeckPhase::Ready;
                tracing::warn!(candidate = %id, %reason, "like failed, rolling back");
                self.rollback(candidate);
                self.events
                    .push_back(DeckEvent::DecisionFailed { message: reason });
            }
        }

        let pending_pool = self.pending_pool.take();
        let pending_criteria = self.pending_criteria.take();
        if pending_pool.is_some() || pending_criteria.is_some() {
            tracing::debug!("committing changes deferred behind the in-flight like");
            if let Some(pool) = pending_pool {
                self.pool = pool;
            }
            if let Some(criteria) = pending_criteria {
                self.criteria = criteria;
            }
            self.rebuild_queue();
        }
    }

    /// Commit new filter criteria, atomically replacing the previous set and
    /// rebuilding the queue in full.
    ///
    /// While a like is in flight the change is queued and committed at
    /// resolution; a rollback target that fails the new criteria is then
    /// dropped rather than reintroduced.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<(), CriteriaError> {
        criteria.validate()?;
        if matches!(self.phase, DeckPhase::Awaiting) {
            tracing::debug!("filter change deferred behind in-flight like");
            self.pending_criteria = Some(criteria);
            return Ok(());
        }
        self.criteria = criteria;
        self.rebuild_queue();
        Ok(())
    }

    /// Replace the candidate pool (e.g. a recommendations refresh) and
    /// rebuild the queue. Candidates already decided this session stay out.
    ///
    /// Like [`Self::apply_filters`], a refresh landing while a like is in
    /// flight is queued and committed at resolution; rebuilding immediately
    /// would let the unresolved candidate back into the queue.
    pub fn set_pool(&mut self, pool: Vec<Candidate>) {
        if matches!(self.phase, DeckPhase::Awaiting) {
            tracing::debug!("pool refresh deferred behind in-flight like");
            self.pending_pool = Some(pool);
            return;
        }
        self.pool = pool;
        self.rebuild_queue();
    }

    /// Drop a candidate entirely (used after a block): out of the pool, out
    /// of the queue, and never rolled back in.
    pub fn remove_candidate(&mut self, id: CandidateId) {
        self.decided.insert(id);
        self.pool.retain(|c| c.id != id);
        let before = self.queue.len();
        self.queue.retain(|c| c.id != id);
        if self.queue.len() != before {
            self.emit_queue_changed();
        }
    }

    /// External limit reset (e.g. a new day, or a premium upgrade)
    pub fn clear_limit(&mut self) {
        if let DeckPhase::Blocked(kind) = self.phase {
            tracing::info!(?kind, "limit cleared, deck unblocked");
            self.phase = DeckPhase::Ready;
        }
    }

    /// Drain pending presentation events in emission order
    pub fn drain_events(&mut self) -> Vec<DeckEvent> {
        self.events.drain(..).collect()
    }

    /// Reinsert a rolled-back candidate at the queue front, unless it no
    /// longer belongs to the live filter context.
    fn rollback(&mut self, candidate: Candidate) {
        if self.decided.contains(&candidate.id)
            || !filters::matches_criteria(&candidate, &self.criteria)
        {
            tracing::debug!(candidate = %candidate.id, "rollback target left the filter context, dropping");
            return;
        }
        self.queue.push_front(candidate);
        self.emit_queue_changed();
    }

    fn rebuild_queue(&mut self) {
        let decided = &self.decided;
        let queue: VecDeque<Candidate> = filters::apply(&self.pool, &self.criteria)
            .into_iter()
            .filter(|c| !decided.contains(&c.id))
            .collect();
        self.queue = queue;
        self.emit_queue_changed();
    }

    fn emit_queue_changed(&mut self) {
        self.events.push_back(DeckEvent::QueueChanged {
            head: self.queue.front().map(|c| c.id),
            remaining: self.queue.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilitySlot, Gender, SkillLevel};

    fn create_candidate(id: u64, distance_km: f64) -> Candidate {
        Candidate {
            id: CandidateId(id),
            name: format!("User {}", id),
            age: 27,
            gender: Gender::Female,
            image_url: None,
            commune: "Lyon".to_string(),
            distance_km,
            level: SkillLevel::Intermediate,
            availability: vec![AvailabilitySlot::WeekendMorning],
        }
    }

    fn deck_abc() -> SwipeDeck {
        let pool = vec![
            create_candidate(1, 5.0),
            create_candidate(2, 8.0),
            create_candidate(3, 2.0),
        ];
        SwipeDeck::new(pool, FilterCriteria::default()).unwrap()
    }

    fn queue_ids(deck: &SwipeDeck) -> Vec<u64> {
        deck.queue.iter().map(|c| c.id.0).collect()
    }

    #[test]
    fn test_pass_pops_synchronously_without_pending_state() {
        let mut deck = deck_abc();
        let commit = deck.commit_decision(SwipeDirection::Left);

        assert_eq!(commit, DecisionCommit::Passed(CandidateId(1)));
        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Ready);
        assert!(deck.accepts_input());
    }

    #[test]
    fn test_like_pops_optimistically_and_blocks_second_gesture() {
        let mut deck = deck_abc();
        let commit = deck.commit_decision(SwipeDirection::Right);

        assert_eq!(commit, DecisionCommit::LikePending(CandidateId(1)));
        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Awaiting);

        // Awaiting behaves like an empty queue for new input
        assert!(!deck.accepts_input());
        assert_eq!(
            deck.commit_decision(SwipeDirection::Right),
            DecisionCommit::Rejected
        );
        assert_eq!(queue_ids(&deck), vec![2, 3]);
    }

    #[test]
    fn test_confirmed_like_consumes_candidate() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);
        deck.resolve_like(DecisionOutcome::Confirmed { matched: false });

        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Ready);

        let events = deck.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, DeckEvent::MatchAchieved { .. })));
    }

    #[test]
    fn test_match_emits_exactly_one_event_with_correct_id() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);
        deck.resolve_like(DecisionOutcome::Confirmed { matched: true });

        let matches: Vec<_> = deck
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, DeckEvent::MatchAchieved { .. }))
            .collect();
        assert_eq!(
            matches,
            vec![DeckEvent::MatchAchieved {
                candidate_id: CandidateId(1)
            }]
        );
    }

    #[test]
    fn test_limit_rolls_back_and_blocks() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);
        deck.resolve_like(DecisionOutcome::LimitReached {
            kind: LimitKind::PerActionLimit,
            message: "Daily like limit reached".to_string(),
        });

        // Queue restored to [A, B, C], further input rejected
        assert_eq!(queue_ids(&deck), vec![1, 2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Blocked(LimitKind::PerActionLimit));
        assert!(!deck.accepts_input());
        assert_eq!(
            deck.commit_decision(SwipeDirection::Left),
            DecisionCommit::Rejected
        );

        deck.clear_limit();
        assert!(deck.accepts_input());
        assert_eq!(queue_ids(&deck), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_rolls_back_without_blocking() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);
        deck.resolve_like(DecisionOutcome::Failed {
            reason: "connection reset".to_string(),
        });

        assert_eq!(queue_ids(&deck), vec![1, 2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Ready);
        // Same head can be retried immediately
        assert_eq!(
            deck.commit_decision(SwipeDirection::Right),
            DecisionCommit::LikePending(CandidateId(1))
        );

        let events = deck.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, DeckEvent::DecisionFailed { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, DeckEvent::LimitReached { .. })));
    }

    #[test]
    fn test_filter_change_mid_flight_is_deferred_until_resolution() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);

        let narrow = FilterCriteria {
            max_distance_km: Some(5.0),
            ..Default::default()
        };
        deck.apply_filters(narrow).unwrap();

        // Queue untouched while the like is unresolved
        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_eq!(deck.criteria(), &FilterCriteria::default());

        deck.resolve_like(DecisionOutcome::Failed {
            reason: "timeout".to_string(),
        });

        // Rollback target is 5 km away and still matches; queue rebuilt from
        // the pool under the new criteria keeps ids 1 (5 km) and 3 (2 km)
        assert_eq!(deck.criteria().max_distance_km, Some(5.0));
        assert_eq!(queue_ids(&deck), vec![1, 3]);
    }

    #[test]
    fn test_pool_refresh_mid_flight_is_deferred_until_resolution() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right); // id 1 in flight

        // Refresh delivers the same candidates again while unresolved
        deck.set_pool(vec![
            create_candidate(1, 5.0),
            create_candidate(2, 8.0),
            create_candidate(3, 2.0),
        ]);
        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_ne!(deck.head().map(|c| c.id), Some(CandidateId(1)));

        deck.resolve_like(DecisionOutcome::Confirmed { matched: false });

        // The confirmed candidate stays consumed after the deferred commit
        assert_eq!(queue_ids(&deck), vec![2, 3]);
        assert_eq!(deck.phase(), DeckPhase::Ready);
    }

    #[test]
    fn test_pool_refresh_mid_flight_with_failure_keeps_rollback_target() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right);

        deck.set_pool(vec![create_candidate(1, 5.0), create_candidate(4, 3.0)]);
        deck.resolve_like(DecisionOutcome::Failed {
            reason: "connection reset".to_string(),
        });

        // Transient failure: the candidate survives into the refreshed pool
        assert_eq!(queue_ids(&deck), vec![1, 4]);
        assert_eq!(deck.phase(), DeckPhase::Ready);
    }

    #[test]
    fn test_in_flight_candidate_failing_new_criteria_is_not_reintroduced() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Right); // id 1, 5 km

        let narrow = FilterCriteria {
            max_distance_km: Some(5.0),
            gender: Some(Gender::Male),
            ..Default::default()
        };
        deck.apply_filters(narrow).unwrap();

        // Regardless of outcome, id 1 must not come back
        deck.resolve_like(DecisionOutcome::LimitReached {
            kind: LimitKind::DailyTotalLimit,
            message: "limit".to_string(),
        });
        assert!(queue_ids(&deck).is_empty());
        assert!(deck.is_blocked());
    }

    #[test]
    fn test_immediate_filter_apply_rebuilds_in_pool_order() {
        let mut deck = deck_abc();
        deck.commit_decision(SwipeDirection::Left); // consume id 1

        let criteria = FilterCriteria {
            max_distance_km: Some(10.0),
            ..Default::default()
        };
        deck.apply_filters(criteria).unwrap();

        // id 1 was decided and stays out even though it matches
        assert_eq!(queue_ids(&deck), vec![2, 3]);
    }

    #[test]
    fn test_invalid_draft_leaves_committed_criteria_untouched() {
        let mut deck = deck_abc();
        let mut draft = deck.draft_criteria();
        draft.max_distance_km = Some(12.34);

        assert!(deck.apply_filters(draft).is_err());
        assert_eq!(deck.criteria(), &FilterCriteria::default());
        assert_eq!(queue_ids(&deck), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_queue_rejects_decisions() {
        let mut deck = SwipeDeck::new(vec![], FilterCriteria::default()).unwrap();
        assert_eq!(
            deck.commit_decision(SwipeDirection::Left),
            DecisionCommit::Rejected
        );
    }

    #[test]
    fn test_remove_candidate_strikes_pool_and_queue() {
        let mut deck = deck_abc();
        deck.remove_candidate(CandidateId(2));
        assert_eq!(queue_ids(&deck), vec![1, 3]);

        // A later rebuild does not resurrect the removed candidate
        deck.apply_filters(FilterCriteria::default()).unwrap();
        assert_eq!(queue_ids(&deck), vec![1, 3]);
    }

    #[test]
    fn test_queue_changed_events_carry_head_and_length() {
        let mut deck = deck_abc();
        deck.drain_events(); // discard the initial rebuild event

        deck.commit_decision(SwipeDirection::Left);
        let events = deck.drain_events();
        assert_eq!(
            events,
            vec![DeckEvent::QueueChanged {
                head: Some(CandidateId(2)),
                remaining: 2
            }]
        );
    }

    #[test]
    fn test_resolution_with_nothing_in_flight_is_a_no_op() {
        let mut deck = deck_abc();
        deck.resolve_like(DecisionOutcome::Confirmed { matched: true });
        assert_eq!(queue_ids(&deck), vec![1, 2, 3]);
        assert!(deck
            .drain_events()
            .iter()
            .all(|e| !matches!(e, DeckEvent::MatchAchieved { .. })));
    }
}
