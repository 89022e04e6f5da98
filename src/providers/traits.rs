use async_trait::async_trait;

/// The grading capability behind the feedback gateway.
///
/// One operation: given a rendered instruction payload, return the raw text
/// the model produced. Parsing that text into the feedback contract is the
/// caller's explicit adapter step — this trait isolates the only truly
/// fallible external boundary so tests can substitute a deterministic stub.
#[async_trait]
pub trait GradingProvider: Send + Sync {
    async fn grade(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> anyhow::Result<String>;
}
