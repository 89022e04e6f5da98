//! Feedback request/response contract shared by the gateway and the client.
//!
//! The wire shapes mirror the grading instruction payload: a progress check
//! returns four category entries; a final assessment adds an overall score
//! and a summary. The gateway relays whatever the provider produced (see
//! [`category_set_deviation`] for the warn-only compliance check), so the
//! strict types here are used by the client and the test suite.

pub mod prompt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Passed through unvalidated; unknown values get a generic framing.
    pub essay_type: String,
    pub topic: String,
    pub content: String,
    pub is_final: bool,
}

/// The four required feedback categories, in the order the grading
/// instruction enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum FeedbackCategory {
    Structure,
    Argument,
    Grammar,
    Evidence,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 4] = [
        FeedbackCategory::Structure,
        FeedbackCategory::Argument,
        FeedbackCategory::Grammar,
        FeedbackCategory::Evidence,
    ];
}

/// One category with its 2–3 actionable suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub category: FeedbackCategory,
    pub suggestions: Vec<String>,
}

/// Result of a progress check. Replaced wholesale on every new check; the
/// receipt timestamp is local to the session and never travels on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayFeedback {
    pub categories: Vec<CategoryFeedback>,
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

/// Result of a final submission. Once one exists the session is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAssessment {
    /// Integer score in `[0, 100]`.
    pub overall_score: u8,
    /// 2–3 sentence encouraging summary.
    pub summary: String,
    pub categories: Vec<CategoryFeedback>,
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

/// Checks a relayed provider object against the documented contract: exactly
/// the four categories, no duplicates, no omissions. Returns a description of
/// the deviation, or `None` when compliant.
///
/// The gateway logs this but relays the object verbatim either way.
pub fn category_set_deviation(body: &Value) -> Option<String> {
    let Some(entries) = body.get("categories").and_then(Value::as_array) else {
        return Some("missing `categories` array".into());
    };

    let names: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.get("category").and_then(Value::as_str))
        .collect();

    if names.len() != entries.len() {
        return Some("category entry without a `category` string".into());
    }

    let expected: Vec<String> = FeedbackCategory::ALL.iter().map(|c| c.to_string()).collect();
    let mut seen: Vec<&str> = names.clone();
    seen.sort_unstable();
    seen.dedup();

    if seen.len() != names.len() {
        return Some(format!("duplicate categories in {names:?}"));
    }
    if names.len() != expected.len() || !expected.iter().all(|c| names.contains(&c.as_str())) {
        return Some(format!("expected {expected:?}, got {names:?}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_camel_case() {
        let req = FeedbackRequest {
            essay_type: "narrative".into(),
            topic: "A Life-Changing Moment".into(),
            content: "It was a rainy Tuesday.".into(),
            is_final: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["essayType"], "narrative");
        assert_eq!(value["isFinal"], false);
        assert!(value.get("essay_type").is_none());
    }

    #[test]
    fn progress_response_deserializes_without_score() {
        let json = r#"{
            "categories": [
                {"category": "Structure", "suggestions": ["Add a hook", "Split paragraph 2"]},
                {"category": "Argument", "suggestions": ["Sharpen the thesis", "Order your points"]},
                {"category": "Grammar", "suggestions": ["Fix the comma splice", "Vary sentence length"]},
                {"category": "Evidence", "suggestions": ["Name a concrete example", "Cite the source"]}
            ]
        }"#;
        let feedback: EssayFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.categories.len(), 4);
        assert_eq!(feedback.categories[0].category, FeedbackCategory::Structure);
        assert_eq!(feedback.categories[3].suggestions.len(), 2);
    }

    #[test]
    fn final_response_carries_score_and_summary() {
        let json = r#"{
            "overallScore": 85,
            "summary": "Your essay shows strong narrative voice.",
            "categories": [
                {"category": "Structure", "suggestions": ["a", "b"]},
                {"category": "Argument", "suggestions": ["a", "b"]},
                {"category": "Grammar", "suggestions": ["a", "b"]},
                {"category": "Evidence", "suggestions": ["a", "b"]}
            ]
        }"#;
        let assessment: FinalAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.overall_score, 85);
        assert!(!assessment.summary.is_empty());
        assert_eq!(assessment.categories.len(), 4);
    }

    #[test]
    fn unknown_category_is_rejected_by_typed_parse() {
        let json = r#"{"categories": [{"category": "Style", "suggestions": []}]}"#;
        assert!(serde_json::from_str::<EssayFeedback>(json).is_err());
    }

    #[test]
    fn compliant_body_has_no_deviation() {
        let body = json!({
            "categories": [
                {"category": "Structure", "suggestions": ["a"]},
                {"category": "Argument", "suggestions": ["a"]},
                {"category": "Grammar", "suggestions": ["a"]},
                {"category": "Evidence", "suggestions": ["a"]}
            ]
        });
        assert!(category_set_deviation(&body).is_none());
    }

    #[test]
    fn missing_category_is_reported() {
        let body = json!({
            "categories": [
                {"category": "Structure", "suggestions": ["a"]},
                {"category": "Argument", "suggestions": ["a"]},
                {"category": "Grammar", "suggestions": ["a"]}
            ]
        });
        let deviation = category_set_deviation(&body).unwrap();
        assert!(deviation.contains("Evidence"));
    }

    #[test]
    fn duplicate_category_is_reported() {
        let body = json!({
            "categories": [
                {"category": "Structure", "suggestions": ["a"]},
                {"category": "Structure", "suggestions": ["a"]},
                {"category": "Grammar", "suggestions": ["a"]},
                {"category": "Evidence", "suggestions": ["a"]}
            ]
        });
        let deviation = category_set_deviation(&body).unwrap();
        assert!(deviation.contains("duplicate"));
    }

    #[test]
    fn missing_categories_array_is_reported() {
        let body = json!({"overallScore": 90});
        assert!(category_set_deviation(&body).is_some());
    }
}
