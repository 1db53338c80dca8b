use crate::models::SwipeDirection;

/// Minimum horizontal drag distance, in screen units, for a gesture to
/// register a decision. Strictly greater-than: a drag ending exactly at the
/// threshold snaps back.
pub const COMMIT_THRESHOLD: f64 = 100.0;

/// Transient per-drag state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { origin_x: f64, dx: f64, dy: f64 },
}

/// Converts a pointer-drag stream into a displacement signal and, at gesture
/// end, a committed decision.
///
/// The tracker itself is total: it never fails and never suspends. Guarding
/// against starts on an empty or blocked deck is the caller's job (see
/// [`DeckSession`](crate::core::session::DeckSession)).
#[derive(Debug)]
pub struct GestureTracker {
    state: GestureState,
    /// Vertical reference line; dy is measured from here, feeding only the
    /// card rotation, never the decision
    screen_center_y: f64,
}

impl GestureTracker {
    pub fn new(screen_center_y: f64) -> Self {
        Self {
            state: GestureState::Idle,
            screen_center_y,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Idle -> Dragging, capturing the origin. A begin while already dragging
    /// restarts the gesture from the new origin.
    pub fn begin(&mut self, x: f64) {
        self.state = GestureState::Dragging {
            origin_x: x,
            dx: 0.0,
            dy: 0.0,
        };
    }

    /// Update displacement from a pointer-move event. Returns the new
    /// (dx, dy) pair, or `None` when no gesture is active.
    pub fn update(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        match &mut self.state {
            GestureState::Idle => None,
            GestureState::Dragging { origin_x, dx, dy } => {
                *dx = x - *origin_x;
                *dy = y - self.screen_center_y;
                Some((*dx, *dy))
            }
        }
    }

    /// Dragging -> Idle on release or pointer-leave. Compares the final dx to
    /// the commit threshold: right past it is a like, left past it a pass,
    /// anything else snaps back with no decision. The state resets to Idle
    /// regardless of the outcome.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let committed = match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { dx, .. } => {
                if dx > COMMIT_THRESHOLD {
                    Some(SwipeDirection::Right)
                } else if dx < -COMMIT_THRESHOLD {
                    Some(SwipeDirection::Left)
                } else {
                    None
                }
            }
        };
        self.state = GestureState::Idle;
        committed
    }

    /// Abandon the current gesture without committing anything. Used when a
    /// filter rebuild resets in-progress interaction.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Presentation transform for the top card while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
}

/// Map the drag displacement to the card transform. Monotonic in dx so larger
/// horizontal drags look more committed; dy is damped for a subtle vertical
/// follow.
pub fn card_transform(dx: f64, dy: f64) -> CardTransform {
    CardTransform {
        translate_x: dx,
        translate_y: dy / 3.0,
        rotate_deg: dx * 0.1,
    }
}
