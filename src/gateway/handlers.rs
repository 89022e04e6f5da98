use crate::error::FeedbackError;
use crate::feedback::{FeedbackRequest, category_set_deviation, prompt::build_instruction};
use crate::providers::sanitize_api_error;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value;

use super::AppState;

/// Maps a feedback error onto the wire contract: validation failures are
/// 400 `{"error"}` bodies, everything upstream of the caller is a 500
/// `{"error", "message"}` body. The single place a status is chosen.
pub(super) fn feedback_error_response(err: &FeedbackError) -> (StatusCode, Json<Value>) {
    match err {
        FeedbackError::EmptyContent => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Essay content is required"})),
        ),
        FeedbackError::Upstream(message) | FeedbackError::Malformed(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "Failed to generate feedback",
                "message": message,
            })),
        ),
    }
}

/// GET /api/health — always 200 when the process is reachable.
pub(super) async fn handle_health(State(_state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "essaycoach API is running",
    }))
}

/// POST /api/feedback — build the instruction payload, call the grading
/// provider once, relay the parsed object verbatim.
pub(super) async fn handle_feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(b) => b,
        Err(e) => {
            let err = serde_json::json!({
                "error": format!("Invalid JSON: {e}")
            });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    if request.content.trim().is_empty() {
        return feedback_error_response(&FeedbackError::EmptyContent);
    }

    let payload = build_instruction(
        &request.essay_type,
        &request.topic,
        &request.content,
        request.is_final,
    );

    let raw = match state
        .grader
        .grade(&payload.system, &payload.user, state.temperature)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(
                "grading provider error: {}",
                sanitize_api_error(&format!("{e:#}"))
            );
            return feedback_error_response(&FeedbackError::Upstream(format!("{e:#}")));
        }
    };

    // No repair, no retry: unparseable output surfaces as a 500.
    let feedback: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("grading provider returned unparseable output: {e}");
            return feedback_error_response(&FeedbackError::Malformed(e.to_string()));
        }
    };

    if let Some(deviation) = category_set_deviation(&feedback) {
        tracing::warn!(
            is_final = request.is_final,
            "grading output deviates from the category contract: {deviation}"
        );
    }

    (StatusCode::OK, Json(feedback))
}
