//! Typed HTTP client for the feedback gateway.
//!
//! The editor session only sees the [`FeedbackClient`] trait, so state-machine
//! tests run against a stub with no network. The real client posts to a fixed
//! base URL from config and maps every failure to a [`TransportError`]; the
//! session treats transport and upstream failures identically.

use crate::catalog::EssayType;
use crate::error::TransportError;
use crate::feedback::{EssayFeedback, FeedbackRequest, FinalAssessment};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[async_trait]
pub trait FeedbackClient: Send + Sync {
    async fn check_progress(
        &self,
        essay_type: EssayType,
        topic: &str,
        content: &str,
    ) -> Result<EssayFeedback, TransportError>;

    async fn final_assessment(
        &self,
        essay_type: EssayType,
        topic: &str,
        content: &str,
    ) -> Result<FinalAssessment, TransportError>;
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Error body the gateway sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: Option<String>,
}

pub struct HttpFeedbackClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFeedbackClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TransportError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_feedback<T: DeserializeOwned>(
        &self,
        request: &FeedbackRequest,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .post(format!("{}/api/feedback", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .map(|b| match b.message {
                    Some(detail) => format!("{}: {detail}", b.error),
                    None => b.error,
                })
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn request(essay_type: EssayType, topic: &str, content: &str, is_final: bool) -> FeedbackRequest {
        FeedbackRequest {
            essay_type: essay_type.to_string(),
            topic: topic.to_string(),
            content: content.to_string(),
            is_final,
        }
    }
}

#[async_trait]
impl FeedbackClient for HttpFeedbackClient {
    async fn check_progress(
        &self,
        essay_type: EssayType,
        topic: &str,
        content: &str,
    ) -> Result<EssayFeedback, TransportError> {
        self.post_feedback(&Self::request(essay_type, topic, content, false))
            .await
    }

    async fn final_assessment(
        &self,
        essay_type: EssayType,
        topic: &str,
        content: &str,
    ) -> Result<FinalAssessment, TransportError> {
        self.post_feedback(&Self::request(essay_type, topic, content, true))
            .await
    }
}
