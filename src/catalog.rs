//! Essay types and the static topic catalog.
//!
//! The catalog is pure data: three suggested topics per essay type plus an
//! info card shown during type selection. A student can always skip the
//! catalog and enter a custom topic.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The four supported essay forms. Kebab-case on the wire
/// (`compare-contrast`), matching the feedback API contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EssayType {
    Narrative,
    Descriptive,
    CompareContrast,
    Argumentative,
}

impl EssayType {
    /// Prompt framing used by the grading instruction payload.
    pub fn prompt_context(self) -> &'static str {
        match self {
            Self::Narrative => "a narrative essay that tells a story from personal experience",
            Self::Descriptive => {
                "a descriptive essay that uses sensory details to paint a vivid picture"
            }
            Self::CompareContrast => {
                "a compare-and-contrast essay that analyzes similarities and differences"
            }
            Self::Argumentative => {
                "an argumentative essay that takes a position and supports it with evidence"
            }
        }
    }

    pub fn info(self) -> &'static EssayTypeInfo {
        match self {
            Self::Narrative => &NARRATIVE_INFO,
            Self::Descriptive => &DESCRIPTIVE_INFO,
            Self::CompareContrast => &COMPARE_CONTRAST_INFO,
            Self::Argumentative => &ARGUMENTATIVE_INFO,
        }
    }
}

/// Prompt framing for an essay type supplied as a raw string.
///
/// Unknown values fall back to a generic framing rather than failing — the
/// gateway passes `essayType` through without validation.
pub fn essay_context(raw: &str) -> &'static str {
    raw.parse::<EssayType>()
        .map_or("an essay", EssayType::prompt_context)
}

/// Info card shown during type selection.
pub struct EssayTypeInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub tips: [&'static str; 4],
}

static NARRATIVE_INFO: EssayTypeInfo = EssayTypeInfo {
    title: "Narrative Essay",
    description: "Tell a story from your personal experience with a clear beginning, middle, and end.",
    tips: [
        "Use first-person perspective",
        "Include vivid details",
        "Show, don't just tell",
        "Have a clear point or lesson",
    ],
};

static DESCRIPTIVE_INFO: EssayTypeInfo = EssayTypeInfo {
    title: "Descriptive Essay",
    description: "Paint a picture with words using sensory details to describe a person, place, object, or experience.",
    tips: [
        "Use all five senses",
        "Choose specific, vivid details",
        "Create a dominant impression",
        "Organize spatially or by importance",
    ],
};

static COMPARE_CONTRAST_INFO: EssayTypeInfo = EssayTypeInfo {
    title: "Compare-and-Contrast Essay",
    description: "Analyze similarities and differences between two subjects to reveal new insights.",
    tips: [
        "Choose comparable subjects",
        "Use a clear structure (point-by-point or block)",
        "Go beyond obvious comparisons",
        "Draw meaningful conclusions",
    ],
};

static ARGUMENTATIVE_INFO: EssayTypeInfo = EssayTypeInfo {
    title: "Argumentative Essay",
    description: "Take a clear position on an issue and support it with evidence and logical reasoning.",
    tips: [
        "State a clear thesis",
        "Use credible evidence",
        "Address counterarguments",
        "Build logical connections between ideas",
    ],
};

/// A suggested topic from the fixed catalog.
pub struct SuggestedTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub essay_type: EssayType,
    pub description: &'static str,
}

pub static SUGGESTED_TOPICS: [SuggestedTopic; 12] = [
    // Narrative
    SuggestedTopic {
        id: "n1",
        title: "A Life-Changing Moment",
        essay_type: EssayType::Narrative,
        description: "Write about a specific moment that changed your perspective or life direction.",
    },
    SuggestedTopic {
        id: "n2",
        title: "Overcoming a Challenge",
        essay_type: EssayType::Narrative,
        description: "Describe a time when you faced and overcame a significant obstacle.",
    },
    SuggestedTopic {
        id: "n3",
        title: "An Unforgettable Journey",
        essay_type: EssayType::Narrative,
        description: "Tell the story of a memorable trip or adventure and what you learned from it.",
    },
    // Descriptive
    SuggestedTopic {
        id: "d1",
        title: "Your Favorite Place",
        essay_type: EssayType::Descriptive,
        description: "Describe a place that holds special meaning to you using sensory details.",
    },
    SuggestedTopic {
        id: "d2",
        title: "A Person Who Inspires You",
        essay_type: EssayType::Descriptive,
        description: "Paint a vivid picture of someone who has influenced your life.",
    },
    SuggestedTopic {
        id: "d3",
        title: "A Moment Frozen in Time",
        essay_type: EssayType::Descriptive,
        description: "Describe a specific scene or moment in rich, sensory detail.",
    },
    // Compare-and-contrast
    SuggestedTopic {
        id: "c1",
        title: "Online vs. Traditional Learning",
        essay_type: EssayType::CompareContrast,
        description: "Compare and contrast the benefits and drawbacks of online and in-person education.",
    },
    SuggestedTopic {
        id: "c2",
        title: "City Life vs. Rural Living",
        essay_type: EssayType::CompareContrast,
        description: "Examine the differences and similarities between urban and rural lifestyles.",
    },
    SuggestedTopic {
        id: "c3",
        title: "Books vs. Movies",
        essay_type: EssayType::CompareContrast,
        description: "Compare how books and films tell stories and their unique strengths.",
    },
    // Argumentative
    SuggestedTopic {
        id: "a1",
        title: "Should Schools Start Later?",
        essay_type: EssayType::Argumentative,
        description: "Argue for or against later school start times for teenagers.",
    },
    SuggestedTopic {
        id: "a2",
        title: "Social Media: Help or Harm?",
        essay_type: EssayType::Argumentative,
        description: "Take a position on whether social media is beneficial or harmful to society.",
    },
    SuggestedTopic {
        id: "a3",
        title: "The Importance of Arts Education",
        essay_type: EssayType::Argumentative,
        description: "Argue whether arts should be a required part of school curriculum.",
    },
];

/// Catalog entries for one essay type, in declaration order.
pub fn suggested_for(essay_type: EssayType) -> Vec<&'static SuggestedTopic> {
    SUGGESTED_TOPICS
        .iter()
        .filter(|t| t.essay_type == essay_type)
        .collect()
}
