//! Gateway contract tests over a real listener: the typed client talks to an
//! axum server backed by a stub grading provider.

use async_trait::async_trait;
use std::sync::Arc;

use essaycoach::client::{FeedbackClient, HttpFeedbackClient};
use essaycoach::error::TransportError;
use essaycoach::feedback::FeedbackCategory;
use essaycoach::gateway::{router, AppState};
use essaycoach::providers::GradingProvider;

struct CannedGrader {
    reply: Result<String, String>,
}

#[async_trait]
impl GradingProvider for CannedGrader {
    async fn grade(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _temperature: f64,
    ) -> anyhow::Result<String> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

const PROGRESS_BODY: &str = r#"{
    "categories": [
        {"category": "Structure", "suggestions": ["Add a hook", "Split paragraph 2"]},
        {"category": "Argument", "suggestions": ["Sharpen the thesis", "Order your points", "Close the loop"]},
        {"category": "Grammar", "suggestions": ["Fix the comma splice", "Vary sentence length"]},
        {"category": "Evidence", "suggestions": ["Name a concrete example", "Cite the source"]}
    ]
}"#;

const FINAL_BODY: &str = r#"{
    "overallScore": 85,
    "summary": "Your essay shows strong narrative voice and clear growth across drafts.",
    "categories": [
        {"category": "Structure", "suggestions": ["a", "b"]},
        {"category": "Argument", "suggestions": ["a", "b"]},
        {"category": "Grammar", "suggestions": ["a", "b"]},
        {"category": "Evidence", "suggestions": ["a", "b"]}
    ]
}"#;

async fn spawn_gateway(grader: CannedGrader) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState {
        grader: Arc::new(grader),
        temperature: 0.7,
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn sixty_words() -> String {
    (0..60)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn progress_check_returns_all_four_categories() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok(PROGRESS_BODY.into()),
    })
    .await;
    let client = HttpFeedbackClient::new(&base);

    let feedback = client
        .check_progress(
            essaycoach::catalog::EssayType::Narrative,
            "A Life-Changing Moment",
            &sixty_words(),
        )
        .await
        .unwrap();

    let categories: Vec<FeedbackCategory> =
        feedback.categories.iter().map(|c| c.category).collect();
    assert_eq!(categories, FeedbackCategory::ALL);
    for entry in &feedback.categories {
        assert!((2..=3).contains(&entry.suggestions.len()));
    }
}

#[tokio::test]
async fn final_submission_returns_score_and_summary() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok(FINAL_BODY.into()),
    })
    .await;
    let client = HttpFeedbackClient::new(&base);

    let assessment = client
        .final_assessment(
            essaycoach::catalog::EssayType::Narrative,
            "A Life-Changing Moment",
            &sixty_words(),
        )
        .await
        .unwrap();

    assert!(assessment.overall_score <= 100);
    assert!(!assessment.summary.is_empty());
    assert_eq!(assessment.categories.len(), 4);
}

#[tokio::test]
async fn empty_content_gets_400_with_contract_error() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok(PROGRESS_BODY.into()),
    })
    .await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/feedback"))
        .json(&serde_json::json!({
            "essayType": "narrative",
            "topic": "t",
            "content": "   ",
            "isFinal": false
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Essay content is required");
}

#[tokio::test]
async fn upstream_failure_surfaces_as_500_through_the_client() {
    let base = spawn_gateway(CannedGrader {
        reply: Err("model unavailable".into()),
    })
    .await;
    let client = HttpFeedbackClient::new(&base);

    let err = client
        .check_progress(essaycoach::catalog::EssayType::Narrative, "t", &sixty_words())
        .await
        .unwrap_err();

    match err {
        TransportError::Http { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Failed to generate feedback"));
            assert!(message.contains("model unavailable"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_provider_output_surfaces_as_500() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok("Here's your feedback, great job!".into()),
    })
    .await;
    let client = HttpFeedbackClient::new(&base);

    let err = client
        .check_progress(essaycoach::catalog::EssayType::Narrative, "t", &sixty_words())
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Http { status: 500, .. }));
}

#[tokio::test]
async fn health_endpoint_is_always_ok() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok(PROGRESS_BODY.into()),
    })
    .await;
    let client = HttpFeedbackClient::new(&base);

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.message.contains("running"));
}

#[tokio::test]
async fn oversized_body_is_rejected_by_the_limit_layer() {
    let base = spawn_gateway(CannedGrader {
        reply: Ok(PROGRESS_BODY.into()),
    })
    .await;

    let huge = "x".repeat(80 * 1024);
    let response = reqwest::Client::new()
        .post(format!("{base}/api/feedback"))
        .json(&serde_json::json!({
            "essayType": "narrative",
            "topic": "t",
            "content": huge,
            "isFinal": false
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 413);
}
