//! Editor session state machine.
//!
//! Drives the three-step flow `type-selection → topic-selection → writing`
//! and, inside writing, the sub-state that tracks the draft, the single
//! in-flight feedback request, and the terminal lock after a final
//! assessment. All guards are enforced here, before any network call, so an
//! ineligible action never reaches the gateway.

use crate::catalog::EssayType;
use crate::client::FeedbackClient;
use crate::error::{CoachError, SessionError};
use crate::feedback::{EssayFeedback, FinalAssessment};

/// Minimum words before a progress check is dispatched.
pub const CHECK_WORD_MINIMUM: usize = 50;
/// Minimum words before a final submission is dispatched.
pub const SUBMIT_WORD_MINIMUM: usize = 100;

/// Whitespace-delimited non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Raw length of the draft, in characters.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    TypeSelection,
    TopicSelection,
    Writing,
}

impl Step {
    fn name(self) -> &'static str {
        match self {
            Self::TypeSelection => "type-selection",
            Self::TopicSelection => "topic-selection",
            Self::Writing => "writing",
        }
    }
}

/// Sub-state within the writing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingPhase {
    Empty,
    Drafting,
    Checking,
    Checked,
    Submitting,
    Submitted,
}

pub struct EditorSession {
    step: Step,
    essay_type: Option<EssayType>,
    topic: Option<String>,
    draft: String,
    phase: WritingPhase,
    feedback: Option<EssayFeedback>,
    assessment: Option<FinalAssessment>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            step: Step::TypeSelection,
            essay_type: None,
            topic: None,
            draft: String::new(),
            phase: WritingPhase::Empty,
            feedback: None,
            assessment: None,
        }
    }

    // ── Read-side accessors ─────────────────────────────────────────────

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> WritingPhase {
        self.phase
    }

    pub fn essay_type(&self) -> Option<EssayType> {
        self.essay_type
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.draft)
    }

    pub fn char_count(&self) -> usize {
        char_count(&self.draft)
    }

    /// Latest progress feedback, if any. Superseded for display purposes by
    /// [`Self::assessment`] once the essay is submitted.
    pub fn feedback(&self) -> Option<&EssayFeedback> {
        self.feedback.as_ref()
    }

    pub fn assessment(&self) -> Option<&FinalAssessment> {
        self.assessment.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.assessment.is_some()
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// `type-selection → topic-selection`. Any catalog value is accepted.
    pub fn choose_type(&mut self, essay_type: EssayType) -> Result<(), SessionError> {
        self.require_step(Step::TypeSelection)?;
        self.essay_type = Some(essay_type);
        self.step = Step::TopicSelection;
        Ok(())
    }

    /// `topic-selection → writing(empty)`. Free text is trimmed; empty or
    /// whitespace-only input refuses the transition with no state change.
    pub fn choose_topic(&mut self, topic: &str) -> Result<(), SessionError> {
        self.require_step(Step::TopicSelection)?;
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(SessionError::TopicRequired);
        }
        self.topic = Some(trimmed.to_string());
        self.step = Step::Writing;
        self.phase = WritingPhase::Empty;
        Ok(())
    }

    /// Back navigation. From topic-selection this is a full reset; from
    /// writing it discards the topic and the draft (destructive) but keeps
    /// the essay type. Disabled after submission and while a request is in
    /// flight.
    pub fn back(&mut self) -> Result<(), SessionError> {
        match self.step {
            Step::TypeSelection => Err(SessionError::InvalidStep {
                step: self.step.name(),
            }),
            Step::TopicSelection => {
                self.essay_type = None;
                self.topic = None;
                self.step = Step::TypeSelection;
                Ok(())
            }
            Step::Writing => {
                self.require_unlocked()?;
                self.require_idle()?;
                self.topic = None;
                self.draft.clear();
                self.feedback = None;
                self.phase = WritingPhase::Empty;
                self.step = Step::TopicSelection;
                Ok(())
            }
        }
    }

    /// Replaces the draft content. Allowed at any time within the writing
    /// step except after a final assessment exists.
    pub fn set_draft(&mut self, text: &str) -> Result<(), SessionError> {
        self.require_step(Step::Writing)?;
        self.require_unlocked()?;
        self.require_idle()?;
        self.draft = text.to_string();
        self.phase = if self.draft.trim().is_empty() {
            WritingPhase::Empty
        } else if self.feedback.is_some() {
            WritingPhase::Checked
        } else {
            WritingPhase::Drafting
        };
        Ok(())
    }

    /// Dispatches a progress check. Each new result replaces the prior one
    /// wholesale; a failed request restores the pre-request sub-state and
    /// stores nothing.
    pub async fn check_progress(
        &mut self,
        client: &dyn FeedbackClient,
    ) -> Result<&EssayFeedback, CoachError> {
        let (essay_type, topic) = self.require_ready(CHECK_WORD_MINIMUM)?;

        let previous = self.phase;
        self.phase = WritingPhase::Checking;

        match client.check_progress(essay_type, &topic, &self.draft).await {
            Ok(feedback) => {
                self.phase = WritingPhase::Checked;
                Ok(self.feedback.insert(feedback))
            }
            Err(e) => {
                self.phase = previous;
                Err(e.into())
            }
        }
    }

    /// Dispatches the final submission. The explicit user confirmation
    /// happens in the caller before this is invoked; declining there simply
    /// means this is never called. Success is terminal: the draft locks and
    /// only a full reset remains.
    pub async fn final_submit(
        &mut self,
        client: &dyn FeedbackClient,
    ) -> Result<&FinalAssessment, CoachError> {
        let (essay_type, topic) = self.require_ready(SUBMIT_WORD_MINIMUM)?;

        let previous = self.phase;
        self.phase = WritingPhase::Submitting;

        match client.final_assessment(essay_type, &topic, &self.draft).await {
            Ok(assessment) => {
                self.phase = WritingPhase::Submitted;
                Ok(self.assessment.insert(assessment))
            }
            Err(e) => {
                self.phase = previous;
                Err(e.into())
            }
        }
    }

    /// Discards everything and returns to type selection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ── Guards ──────────────────────────────────────────────────────────

    fn require_step(&self, expected: Step) -> Result<(), SessionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidStep {
                step: self.step.name(),
            })
        }
    }

    fn require_unlocked(&self) -> Result<(), SessionError> {
        if self.is_submitted() {
            Err(SessionError::SessionLocked)
        } else {
            Ok(())
        }
    }

    fn require_idle(&self) -> Result<(), SessionError> {
        match self.phase {
            WritingPhase::Checking | WritingPhase::Submitting => {
                Err(SessionError::RequestInFlight)
            }
            _ => Ok(()),
        }
    }

    /// All pre-dispatch guards for a feedback request, in order: right step,
    /// not locked, not in flight, enough words.
    fn require_ready(&self, minimum_words: usize) -> Result<(EssayType, String), SessionError> {
        self.require_step(Step::Writing)?;
        self.require_unlocked()?;
        self.require_idle()?;

        let words = self.word_count();
        if words < minimum_words {
            return Err(SessionError::BelowWordCount {
                required: minimum_words,
                actual: words,
            });
        }

        let (Some(essay_type), Some(topic)) = (self.essay_type, self.topic.clone()) else {
            // Unreachable through the public transitions; writing always has both.
            return Err(SessionError::InvalidStep {
                step: self.step.name(),
            });
        };
        Ok((essay_type, topic))
    }
}
