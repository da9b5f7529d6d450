//! Core types for AuthorCheck

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared kind of a submission, deciding which analyzers run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// Free text (essays, reports, answers)
    Text,
    /// Source code
    Code,
    /// Text and code in the same body
    Mixed,
}

impl SubmissionKind {
    /// Whether the text analyzer runs for this kind
    pub fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Mixed)
    }

    /// Whether the code analyzer runs for this kind
    pub fn includes_code(&self) -> bool {
        matches!(self, Self::Code | Self::Mixed)
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "code" => Ok(Self::Code),
            "mixed" => Ok(Self::Mixed),
            other => Err(format!(
                "unknown submission type '{}', expected text, code or mixed",
                other
            )),
        }
    }
}

/// A single student submission to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission identifier (assigned by the caller)
    pub submission_id: String,

    /// Student identifier
    pub student_id: String,

    /// Raw submission body
    pub content: String,

    /// Declared submission kind
    #[serde(rename = "submission_type")]
    pub kind: SubmissionKind,
}

impl Submission {
    /// Create a new submission
    pub fn new(
        submission_id: impl Into<String>,
        student_id: impl Into<String>,
        content: impl Into<String>,
        kind: SubmissionKind,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            student_id: student_id.into(),
            content: content.into(),
            kind,
        }
    }
}

/// Statistical features extracted from free text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    /// Word-frequency entropy proxy, 0 to 100 (lower = more predictable)
    pub perplexity: f64,

    /// Coefficient of variation of sentence lengths, 0 to 1
    pub burstiness: f64,

    /// Mean sentence length in words
    pub avg_sentence_length: f64,

    /// Distinct tokens over total tokens
    pub vocabulary_richness: f64,

    /// Formal vocabulary against contractions, 0 to 1
    pub formality_score: f64,

    /// Occurrences of discourse connectives
    #[serde(rename = "transitional_phrases_count")]
    pub transitional_phrase_count: usize,
}

/// Structural features extracted from source code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeFeatures {
    /// Nearly every function carries a docstring
    #[serde(rename = "has_perfect_docstrings")]
    pub has_uniform_docstrings: bool,

    /// At least half of the functions are matched by a try block
    #[serde(rename = "has_comprehensive_error_handling")]
    pub has_uniform_error_handling: bool,

    /// Nearly every function signature is annotated
    #[serde(rename = "has_type_hints")]
    pub has_uniform_type_hints: bool,

    /// Share of boilerplate identifiers among distinct identifiers
    #[serde(rename = "generic_name_ratio")]
    pub generic_identifier_ratio: f64,

    /// Share of comments written in documentation register
    pub comment_formality_score: f64,

    /// Labels of known boilerplate patterns, in detection order
    #[serde(rename = "ai_pattern_matches")]
    pub matched_ai_patterns: Vec<String>,
}

/// Usage category derived from the usage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    /// Minimal or appropriate assistance
    Appropriate,
    /// Evident assistance with signs of student involvement
    Moderate,
    /// Significant usage, comprehension should be verified
    Questionable,
    /// Primarily generated content
    Inadequate,
}

impl UsageCategory {
    /// Whether a comprehension check is required for this category
    pub fn requires_verification(&self) -> bool {
        matches!(self, Self::Questionable | Self::Inadequate)
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appropriate => "appropriate",
            Self::Moderate => "moderate",
            Self::Questionable => "questionable",
            Self::Inadequate => "inadequate",
        }
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete analysis of one submission
///
/// Created once per submission and never mutated afterwards; callers decide
/// whether to persist or discard it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Unique analysis identifier
    pub analysis_id: String,

    /// Submission this analysis belongs to
    pub submission_id: String,

    /// Student who made the submission
    pub student_id: String,

    /// When the analysis was produced
    #[serde(rename = "analyzed_at")]
    pub timestamp: DateTime<Utc>,

    /// Aggregated usage score, 0 to 1, rounded to 3 decimals
    #[serde(rename = "ai_usage_score")]
    pub usage_score: f64,

    /// Category derived from the usage score
    pub category: UsageCategory,

    /// Text probability (present for text and mixed submissions)
    #[serde(rename = "text_ai_probability")]
    pub text_probability: Option<f64>,

    /// Code probability (present for code and mixed submissions)
    #[serde(rename = "code_ai_probability")]
    pub code_probability: Option<f64>,

    /// Text features, present iff text was analyzed
    pub text_features: Option<TextFeatures>,

    /// Code features, present iff code was analyzed
    pub code_features: Option<CodeFeatures>,

    /// Triggered indicator labels
    pub flags: Vec<String>,

    /// Human-readable explanation
    pub explanation: String,

    /// Confidence in the analysis, 0 to 1
    pub confidence: f64,

    /// Whether comprehension verification is required
    pub requires_verification: bool,

    /// Recommended next step for the instructor
    pub recommended_action: String,
}
