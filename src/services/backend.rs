use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{
    AckResponse, Candidate, CandidateId, DecisionOutcome, ErrorResponse, LimitKind,
    RecommendationsResponse, SwipeDirection, SwipeRequest, SwipeResponse,
};

/// Errors from the Runnr backend client
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{}", .message.as_deref().unwrap_or(.kind.default_message()))]
    LimitReached {
        kind: LimitKind,
        message: Option<String>,
    },

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: session expired or missing")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// The remote decision service consumed by the deck session.
///
/// Implemented by [`RunnrClient`] over HTTP; tests substitute scripted stubs.
pub trait DecisionService {
    /// Submit a swipe for the given candidate. Never fails at this seam:
    /// every transport or API error arrives as a [`DecisionOutcome`] variant.
    fn submit_decision(
        &self,
        candidate_id: CandidateId,
        direction: SwipeDirection,
    ) -> impl Future<Output = DecisionOutcome> + Send;

    /// Fetch the raw candidate pool feeding the filter engine
    fn fetch_recommendations(
        &self,
    ) -> impl Future<Output = Result<Vec<Candidate>, BackendError>> + Send;
}

/// HTTP client for the Runnr backend
///
/// Covers the swipe/recommendations contract plus the report and block
/// moderation endpoints. Authentication rides on a session token header; the
/// surrounding app owns obtaining and refreshing it.
pub struct RunnrClient {
    base_url: String,
    session_token: Option<String>,
    client: Client,
}

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl RunnrClient {
    pub fn new(base_url: String, session_token: Option<String>) -> Self {
        Self::with_timeout(
            base_url,
            session_token,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: String,
        session_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            session_token,
            client,
        }
    }

    pub fn from_settings(settings: &crate::config::BackendSettings) -> Self {
        Self::with_timeout(
            settings.base_url.clone(),
            settings.session_token.clone(),
            Duration::from_secs(
                settings
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// POST /api/swipe
    ///
    /// Maps the backend's limit error codes (`LikeLimitReached`,
    /// `TotalActionLimitReached`) onto [`BackendError::LimitReached`].
    pub async fn submit_swipe(
        &self,
        candidate_id: CandidateId,
        direction: SwipeDirection,
    ) -> Result<SwipeResponse, BackendError> {
        let url = self.url("/api/swipe");
        tracing::debug!(candidate = %candidate_id, direction = direction.as_str(), "submitting swipe");

        let response = self
            .request(self.client.post(&url))
            .json(&SwipeRequest::new(candidate_id, direction))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SwipeResponse>()
                .await
                .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse swipe response: {}", e)));
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }

        let body: ErrorResponse = response
            .json()
            .await
            .map_err(|_| BackendError::ApiError(format!("swipe failed with status {}", status)))?;

        match body.error.as_str() {
            "LikeLimitReached" => Err(BackendError::LimitReached {
                kind: LimitKind::PerActionLimit,
                message: body.message,
            }),
            "TotalActionLimitReached" => Err(BackendError::LimitReached {
                kind: LimitKind::DailyTotalLimit,
                message: body.message,
            }),
            other => Err(BackendError::ApiError(other.to_string())),
        }
    }

    /// GET /api/recommendations
    pub async fn get_recommendations(&self) -> Result<Vec<Candidate>, BackendError> {
        let url = self.url("/api/recommendations");
        tracing::debug!("fetching recommendations from: {}", url);

        let response = self.request(self.client.get(&url)).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        if !status.is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to fetch recommendations: {}",
                status
            )));
        }

        let body: RecommendationsResponse = response.json().await.map_err(|e| {
            BackendError::InvalidResponse(format!("Failed to parse recommendations: {}", e))
        })?;

        tracing::debug!("fetched {} recommended profiles", body.profiles.len());
        Ok(body.profiles)
    }

    /// POST /api/report/{id}/
    pub async fn report_user(&self, candidate_id: CandidateId) -> Result<(), BackendError> {
        self.moderation_post("report", candidate_id).await
    }

    /// POST /api/block/{id}/
    pub async fn block_user(&self, candidate_id: CandidateId) -> Result<(), BackendError> {
        self.moderation_post("block", candidate_id).await
    }

    async fn moderation_post(
        &self,
        action: &str,
        candidate_id: CandidateId,
    ) -> Result<(), BackendError> {
        let url = self.url(&format!("/api/{}/{}/", action, candidate_id));
        tracing::debug!(candidate = %candidate_id, action, "moderation request");

        let response = self
            .request(self.client.post(&url))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        if !status.is_success() {
            return Err(BackendError::ApiError(format!(
                "{} failed with status {}",
                action, status
            )));
        }

        let ack: AckResponse = response.json().await.map_err(|e| {
            BackendError::InvalidResponse(format!("Failed to parse {} response: {}", action, e))
        })?;
        if !ack.ok {
            return Err(BackendError::ApiError(format!("{} not acknowledged", action)));
        }
        Ok(())
    }
}

impl DecisionService for RunnrClient {
    async fn submit_decision(
        &self,
        candidate_id: CandidateId,
        direction: SwipeDirection,
    ) -> DecisionOutcome {
        match self.submit_swipe(candidate_id, direction).await {
            Ok(response) => DecisionOutcome::Confirmed {
                matched: response.matched.unwrap_or(false),
            },
            Err(BackendError::LimitReached { kind, message }) => DecisionOutcome::LimitReached {
                kind,
                message: message.unwrap_or_else(|| kind.default_message().to_string()),
            },
            Err(e) => DecisionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Candidate>, BackendError> {
        self.get_recommendations().await
    }
}
