use crate::providers::traits::GradingProvider;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiGrader {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiGrader {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self::with_base_url(api_key, model, "https://api.openai.com")
    }

    /// Injectable base URL for tests against a mock server.
    pub fn with_base_url(api_key: Option<&str>, model: &str, base_url: &str) -> Self {
        Self {
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str, temperature: f64) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            temperature,
            // The grading contract requires a single parseable JSON object.
            response_format: ResponseFormat {
                r#type: "json_object",
            },
        }
    }

    fn extract_text(chat_response: ChatResponse) -> anyhow::Result<String> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))
    }

    async fn call_api(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let auth_header = self.cached_auth_header.as_ref().ok_or_else(|| {
            anyhow::anyhow!("OpenAI API key not set. Set OPENAI_API_KEY or edit config.toml.")
        })?;

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            return Err(super::api_error("OpenAI", response).await);
        }

        response
            .json()
            .await
            .context("OpenAI response JSON decode failed")
    }
}

#[async_trait]
impl GradingProvider for OpenAiGrader {
    async fn grade(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let request = self.build_request(system_prompt, user_prompt, temperature);
        let chat_response = self.call_api(&request).await?;
        Self::extract_text(chat_response)
    }
}
