pub mod openai;
pub mod traits;

pub use openai::OpenAiGrader;
pub use traits::GradingProvider;

use crate::config::Config;
use std::sync::Arc;

/// Maximum characters of a provider error body surfaced to callers.
const MAX_API_ERROR_CHARS: usize = 300;

/// Builds the grading provider from an injected config.
///
/// A missing API key does not fail construction — requests fail at call time
/// instead, matching the gateway's start-without-credentials behavior.
pub fn create_grader(config: &Config) -> Arc<dyn GradingProvider> {
    Arc::new(OpenAiGrader::new(
        config.resolve_api_key().as_deref(),
        &config.model,
    ))
}

/// Truncates an upstream error body so logs stay readable.
pub fn sanitize_api_error(input: &str) -> String {
    if input.chars().count() <= MAX_API_ERROR_CHARS {
        return input.to_string();
    }

    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &input[..end])
}

/// Build a provider error from a failed HTTP response.
pub(crate) async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    anyhow::anyhow!("{provider} API error ({status}): {sanitized}")
}
