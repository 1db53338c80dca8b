use serde::{Deserialize, Serialize};

use crate::models::domain::Candidate;

/// Success body for `POST /api/swipe`
///
/// The backend has sent the mutual-match flag as both `match` and `is_match`
/// across revisions; both decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub ok: bool,
    #[serde(rename = "match", alias = "is_match", default)]
    pub matched: Option<bool>,
}

/// Body for `GET /api/recommendations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub profiles: Vec<Candidate>,
}

/// Error body returned by the backend on any non-2xx response.
///
/// The `error` field carries a machine-readable code; the limit codes are
/// `LikeLimitReached` and `TotalActionLimitReached`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement body for report/block endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}
