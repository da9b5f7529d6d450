//! Score aggregation
//!
//! Combines per-modality probabilities into the usage score and derives
//! everything downstream of it: category, flags, explanation, recommended
//! action and confidence.

use crate::config::{CategoryThresholds, DetectionConfig, FlagThresholds, ModalityWeights};
use authorcheck_core::{CodeFeatures, SubmissionKind, TextFeatures, UsageCategory};

pub const FLAG_HIGH_TEXT_PROBABILITY: &str = "high_text_ai_probability";
pub const FLAG_LOW_PERPLEXITY: &str = "low_perplexity";
pub const FLAG_LOW_BURSTINESS: &str = "low_burstiness";
pub const FLAG_EXCESSIVE_FORMALITY: &str = "excessive_formality";
pub const FLAG_MANY_TRANSITIONS: &str = "many_transitional_phrases";
pub const FLAG_HIGH_CODE_PROBABILITY: &str = "high_code_ai_probability";
pub const FLAG_PERFECT_DOCSTRINGS: &str = "perfect_docstrings";
pub const FLAG_ERROR_HANDLING: &str = "comprehensive_error_handling";
pub const FLAG_ALL_TYPED: &str = "all_functions_typed";
pub const FLAG_GENERIC_NAMING: &str = "generic_naming";
pub const FLAG_MULTIPLE_PATTERNS: &str = "multiple_ai_patterns";

/// Flags that have a phrase in the explanation, in explanation order
const DESCRIBED_FLAGS: &[(&str, &str)] = &[
    (FLAG_LOW_PERPLEXITY, "text is unusually predictable"),
    (FLAG_EXCESSIVE_FORMALITY, "excessively formal language"),
    (
        FLAG_PERFECT_DOCSTRINGS,
        "perfect documentation (unusual for students)",
    ),
    (
        FLAG_MULTIPLE_PATTERNS,
        "multiple AI-typical patterns detected",
    ),
];

/// Confidence when both modalities of a mixed submission were scored
pub const CONFIDENCE_MIXED_BOTH: f64 = 0.85;
/// Confidence when a mixed submission is missing one modality
pub const CONFIDENCE_MIXED_PARTIAL: f64 = 0.70;
/// Confidence for single-modality submissions
pub const CONFIDENCE_SINGLE: f64 = 0.80;

/// Aggregates modality probabilities into a scored verdict
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    thresholds: CategoryThresholds,
    weights: ModalityWeights,
    flags: FlagThresholds,
}

impl ScoreAggregator {
    /// Create an aggregator from a detection config
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            weights: config.weights,
            flags: config.flags,
        }
    }

    /// Usage score for a submission kind, rounded to 3 decimals
    ///
    /// Mixed submissions take the weighted mean of both probabilities,
    /// treating a missing one as 0.
    pub fn usage_score(
        &self,
        kind: SubmissionKind,
        text_probability: Option<f64>,
        code_probability: Option<f64>,
    ) -> f64 {
        let score = match kind {
            SubmissionKind::Text => text_probability.unwrap_or(0.0),
            SubmissionKind::Code => code_probability.unwrap_or(0.0),
            SubmissionKind::Mixed => {
                let total = self.weights.text + self.weights.code;
                let text = text_probability.unwrap_or(0.0) * self.weights.text;
                let code = code_probability.unwrap_or(0.0) * self.weights.code;
                (text + code) / total
            }
        };

        round3(score)
    }

    /// Category for a usage score
    pub fn categorize(&self, score: f64) -> UsageCategory {
        if score <= self.thresholds.moderate {
            UsageCategory::Appropriate
        } else if score <= self.thresholds.questionable {
            UsageCategory::Moderate
        } else if score <= self.thresholds.inadequate {
            UsageCategory::Questionable
        } else {
            UsageCategory::Inadequate
        }
    }

    /// Indicator labels raised by the probabilities and features
    ///
    /// Flags are independent of the score: a flag can be raised by a
    /// feature that did not move the submission across any threshold.
    pub fn flags(
        &self,
        text_probability: Option<f64>,
        code_probability: Option<f64>,
        text_features: Option<&TextFeatures>,
        code_features: Option<&CodeFeatures>,
    ) -> Vec<String> {
        let t = &self.flags;
        let mut flags = Vec::new();

        if text_probability.is_some_and(|p| p > t.high_probability) {
            flags.push(FLAG_HIGH_TEXT_PROBABILITY);
        }

        if let Some(features) = text_features {
            if features.perplexity < t.low_perplexity {
                flags.push(FLAG_LOW_PERPLEXITY);
            }
            if features.burstiness < t.low_burstiness {
                flags.push(FLAG_LOW_BURSTINESS);
            }
            if features.formality_score > t.excessive_formality {
                flags.push(FLAG_EXCESSIVE_FORMALITY);
            }
            if features.transitional_phrase_count > t.many_transitional_phrases {
                flags.push(FLAG_MANY_TRANSITIONS);
            }
        }

        if code_probability.is_some_and(|p| p > t.high_probability) {
            flags.push(FLAG_HIGH_CODE_PROBABILITY);
        }

        if let Some(features) = code_features {
            if features.has_uniform_docstrings {
                flags.push(FLAG_PERFECT_DOCSTRINGS);
            }
            if features.has_uniform_error_handling {
                flags.push(FLAG_ERROR_HANDLING);
            }
            if features.has_uniform_type_hints {
                flags.push(FLAG_ALL_TYPED);
            }
            if features.generic_identifier_ratio > t.generic_naming {
                flags.push(FLAG_GENERIC_NAMING);
            }
            if features.matched_ai_patterns.len() > t.multiple_ai_patterns {
                flags.push(FLAG_MULTIPLE_PATTERNS);
            }
        }

        flags.into_iter().map(String::from).collect()
    }

    /// Category template, followed by the described subset of the flags
    pub fn explanation(&self, category: UsageCategory, flags: &[String]) -> String {
        let mut explanation = category_explanation(category).to_string();

        let phrases: Vec<&str> = DESCRIBED_FLAGS
            .iter()
            .filter(|(flag, _)| flags.iter().any(|f| f == flag))
            .map(|(_, phrase)| *phrase)
            .collect();

        if !phrases.is_empty() {
            explanation.push_str(" Specific indicators: ");
            explanation.push_str(&phrases.join(", "));
            explanation.push('.');
        }

        explanation
    }

    /// Next step for the instructor
    pub fn recommended_action(&self, category: UsageCategory) -> &'static str {
        match category {
            UsageCategory::Appropriate => "No action required. Accept submission.",
            UsageCategory::Moderate => {
                "Review submission. Consider asking student about their process."
            }
            UsageCategory::Questionable => {
                "Require comprehension verification. Student should explain \
                 their work and answer questions about key concepts."
            }
            UsageCategory::Inadequate => {
                "Require re-submission with original work. Consider academic \
                 integrity review. Student should meet with instructor."
            }
        }
    }

    /// Confidence in the verdict, from how much evidence was available
    pub fn confidence(
        &self,
        kind: SubmissionKind,
        text_probability: Option<f64>,
        code_probability: Option<f64>,
    ) -> f64 {
        match kind {
            SubmissionKind::Mixed => {
                if text_probability.is_some() && code_probability.is_some() {
                    CONFIDENCE_MIXED_BOTH
                } else {
                    CONFIDENCE_MIXED_PARTIAL
                }
            }
            SubmissionKind::Text | SubmissionKind::Code => CONFIDENCE_SINGLE,
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

fn category_explanation(category: UsageCategory) -> &'static str {
    match category {
        UsageCategory::Appropriate => {
            "This submission shows minimal or appropriate use of AI tools. \
             The content appears to be primarily student-generated with \
             possible minor AI assistance."
        }
        UsageCategory::Moderate => {
            "This submission shows moderate use of AI tools. \
             While AI assistance is evident, there are signs of student \
             involvement and understanding."
        }
        UsageCategory::Questionable => {
            "This submission shows significant AI usage that raises concerns. \
             Comprehension verification is recommended to ensure the student \
             understands the content."
        }
        UsageCategory::Inadequate => {
            "This submission appears to be primarily AI-generated with \
             minimal student contribution. This likely violates academic \
             integrity policies."
        }
    }
}

/// Round to 3 decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
