use serde::{Deserialize, Serialize};

use crate::models::domain::{CandidateId, SwipeDirection};

/// Body for `POST /api/swipe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub target_id: CandidateId,
    pub direction: SwipeDirection,
}

impl SwipeRequest {
    pub fn new(target_id: CandidateId, direction: SwipeDirection) -> Self {
        Self { target_id, direction }
    }
}
