//! Deterministic grading instruction payload.
//!
//! The payload is a pure function of `(essay_type, topic, content, is_final)`:
//! same inputs, byte-identical output. The system half frames the grader and
//! pins the output schema; the user half carries the essay verbatim.

use crate::catalog::essay_context;

/// A rendered instruction payload ready for the grading provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPayload {
    pub system: String,
    pub user: String,
}

const PROGRESS_SCHEMA_EXAMPLE: &str = r#"{
  "categories": [
    {
      "category": "Structure",
      "suggestions": ["specific suggestion 1", "specific suggestion 2", "specific suggestion 3"]
    },
    ...
  ]
}"#;

const FINAL_SCHEMA_EXAMPLE: &str = r#"{
  "overallScore": 85,
  "summary": "Your essay shows strong...",
  "categories": [
    {
      "category": "Structure",
      "suggestions": ["specific suggestion 1", "specific suggestion 2"]
    },
    ...
  ]
}"#;

/// Builds the instruction payload for one feedback request.
pub fn build_instruction(
    essay_type: &str,
    topic: &str,
    content: &str,
    is_final: bool,
) -> InstructionPayload {
    let essay_framing = essay_context(essay_type);
    let feedback_mode = if is_final {
        "comprehensive final assessment"
    } else {
        "progress feedback"
    };
    let score_instruction = if is_final {
        "Also provide an overall score from 0-100 and a brief encouraging summary (2-3 sentences) of the essay's strengths and areas for growth.\n\n"
    } else {
        ""
    };
    let schema_example = if is_final {
        FINAL_SCHEMA_EXAMPLE
    } else {
        PROGRESS_SCHEMA_EXAMPLE
    };

    let system = format!(
        "You are an experienced high school English teacher providing {feedback_mode} for {essay_framing}.\n\
         \n\
         Your feedback should be:\n\
         - Encouraging and constructive\n\
         - Specific and actionable (e.g., \"Add a transition sentence between paragraphs 2 and 3\" rather than \"improve transitions\")\n\
         - Appropriate for high school students\n\
         - Focused on helping students improve their writing skills\n\
         \n\
         Provide feedback in exactly 4 categories:\n\
         1. Structure (introduction, body paragraphs, conclusion, organization)\n\
         2. Argument (thesis, main ideas, logical flow, persuasiveness)\n\
         3. Grammar (spelling, punctuation, sentence structure, clarity)\n\
         4. Evidence (examples, details, support for claims, credibility)\n\
         \n\
         For each category, provide 2-3 specific, actionable suggestions.\n\
         \n\
         {score_instruction}Respond in JSON format:\n{schema_example}"
    );

    let user = format!(
        "Essay Type: {essay_type}\n\
         Topic: {topic}\n\
         \n\
         Essay Content:\n\
         {content}\n\
         \n\
         Please provide {feedback_mode} for this student's essay."
    );

    InstructionPayload { system, user }
}
