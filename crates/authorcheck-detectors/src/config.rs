//! Detection configuration: category thresholds, modality weights and the
//! hand-tuned rule tables the analyzers score against.
//!
//! Every number the engine scores with lives here. All sections are optional
//! in YAML and fall back to the stock values.

use authorcheck_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Upper bounds of the usage categories
    pub thresholds: CategoryThresholds,

    /// Modality weights for mixed submissions
    pub weights: ModalityWeights,

    /// Minimum trimmed character count for text analysis
    pub min_text_length: usize,

    /// Minimum trimmed character count for code analysis
    pub min_code_length: usize,

    /// Text probability rule table
    pub text_rules: TextRules,

    /// Code probability rule table
    pub code_rules: CodeRules,

    /// Coverage ratios that make a code feature "uniform"
    pub code_coverage: CodeCoverage,

    /// Feature thresholds for flag generation
    pub flags: FlagThresholds,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            thresholds: CategoryThresholds::default(),
            weights: ModalityWeights::default(),
            min_text_length: 50,
            min_code_length: 100,
            text_rules: TextRules::default(),
            code_rules: CodeRules::default(),
            code_coverage: CodeCoverage::default(),
            flags: FlagThresholds::default(),
        }
    }
}

impl DetectionConfig {
    /// Parse from YAML without validating
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.weights.validate()?;
        self.text_rules.validate()?;
        self.code_rules.validate()?;
        self.code_coverage.validate()?;
        self.flags.validate()
    }
}

/// Inclusive upper bounds of the first three usage categories
///
/// A score `<= moderate` is appropriate, `<= questionable` moderate,
/// `<= inadequate` questionable, and anything above is inadequate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryThresholds {
    pub moderate: f64,
    pub questionable: f64,
    pub inadequate: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.30,
            questionable: 0.60,
            inadequate: 0.80,
        }
    }
}

impl CategoryThresholds {
    fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.moderate
            && self.moderate < self.questionable
            && self.questionable < self.inadequate
            && self.inadequate <= 1.0;
        if !ordered {
            return Err(Error::config(format!(
                "category thresholds must be strictly ascending within [0, 1], got {} / {} / {}",
                self.moderate, self.questionable, self.inadequate
            )));
        }
        Ok(())
    }
}

/// Weights of the text and code probabilities for mixed submissions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalityWeights {
    pub text: f64,
    pub code: f64,
}

impl Default for ModalityWeights {
    fn default() -> Self {
        Self {
            text: 0.30,
            code: 0.30,
        }
    }
}

impl ModalityWeights {
    fn validate(&self) -> Result<()> {
        let usable = self.text.is_finite()
            && self.code.is_finite()
            && self.text >= 0.0
            && self.code >= 0.0
            && self.text + self.code > 0.0;
        if !usable {
            return Err(Error::config(format!(
                "modality weights must be finite and non-negative with a positive sum, \
                 got text={} code={}",
                self.text, self.code
            )));
        }
        Ok(())
    }
}

/// Which side of a tier threshold triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Value strictly below the threshold
    Below,
    /// Value strictly above the threshold
    Above,
}

/// One step of a tiered rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub weight: f64,
}

/// A feature indicator contributing the weight of the first tier it meets
///
/// Tiers are listed strictest first: for `Below` thresholds ascend, for
/// `Above` they descend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredRule {
    pub direction: Direction,
    pub tiers: Vec<Tier>,
}

impl TieredRule {
    /// Rule that fires when the value is below a tier threshold
    pub fn below(tiers: &[(f64, f64)]) -> Self {
        Self::with_direction(Direction::Below, tiers)
    }

    /// Rule that fires when the value is above a tier threshold
    pub fn above(tiers: &[(f64, f64)]) -> Self {
        Self::with_direction(Direction::Above, tiers)
    }

    fn with_direction(direction: Direction, tiers: &[(f64, f64)]) -> Self {
        Self {
            direction,
            tiers: tiers
                .iter()
                .map(|&(threshold, weight)| Tier { threshold, weight })
                .collect(),
        }
    }

    /// Weight contributed by `value` (0 when no tier fires)
    pub fn weight_for(&self, value: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| match self.direction {
                Direction::Below => value < tier.threshold,
                Direction::Above => value > tier.threshold,
            })
            .map_or(0.0, |tier| tier.weight)
    }

    fn validate(&self, name: &str) -> Result<()> {
        for tier in &self.tiers {
            if !(0.0..=1.0).contains(&tier.weight) {
                return Err(Error::config(format!(
                    "rule '{}' has weight {} outside [0, 1]",
                    name, tier.weight
                )));
            }
            if !tier.threshold.is_finite() {
                return Err(Error::config(format!(
                    "rule '{}' has non-finite threshold {}",
                    name, tier.threshold
                )));
            }
        }
        let strictest_first = self.tiers.windows(2).all(|pair| match self.direction {
            Direction::Below => pair[0].threshold <= pair[1].threshold,
            Direction::Above => pair[0].threshold >= pair[1].threshold,
        });
        if !strictest_first {
            return Err(Error::config(format!(
                "rule '{}' tiers must be ordered strictest first",
                name
            )));
        }
        Ok(())
    }
}

/// Rule table for the text probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRules {
    pub perplexity: TieredRule,
    pub burstiness: TieredRule,
    pub formality: TieredRule,
    pub transitional_phrases: TieredRule,
    pub vocabulary_richness: TieredRule,
}

impl Default for TextRules {
    fn default() -> Self {
        Self {
            perplexity: TieredRule::below(&[(20.0, 0.25), (30.0, 0.15)]),
            burstiness: TieredRule::below(&[(0.3, 0.20), (0.5, 0.10)]),
            formality: TieredRule::above(&[(0.7, 0.20), (0.5, 0.10)]),
            transitional_phrases: TieredRule::above(&[(5.0, 0.20), (2.0, 0.10)]),
            vocabulary_richness: TieredRule::above(&[(0.8, 0.15)]),
        }
    }
}

impl TextRules {
    fn validate(&self) -> Result<()> {
        self.perplexity.validate("perplexity")?;
        self.burstiness.validate("burstiness")?;
        self.formality.validate("formality")?;
        self.transitional_phrases.validate("transitional_phrases")?;
        self.vocabulary_richness.validate("vocabulary_richness")
    }
}

/// Rule table for the code probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeRules {
    pub uniform_docstrings: f64,
    pub uniform_error_handling: f64,
    pub uniform_type_hints: f64,
    pub generic_identifiers: TieredRule,
    pub comment_formality: TieredRule,
    pub ai_patterns: TieredRule,
}

impl Default for CodeRules {
    fn default() -> Self {
        Self {
            uniform_docstrings: 0.25,
            uniform_error_handling: 0.20,
            uniform_type_hints: 0.20,
            generic_identifiers: TieredRule::above(&[(0.5, 0.15), (0.3, 0.10)]),
            comment_formality: TieredRule::above(&[(0.7, 0.15), (0.5, 0.10)]),
            ai_patterns: TieredRule::above(&[(3.0, 0.15), (1.0, 0.10)]),
        }
    }
}

impl CodeRules {
    fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("uniform_docstrings", self.uniform_docstrings),
            ("uniform_error_handling", self.uniform_error_handling),
            ("uniform_type_hints", self.uniform_type_hints),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(Error::config(format!(
                    "rule '{}' has weight {} outside [0, 1]",
                    name, weight
                )));
            }
        }
        self.generic_identifiers.validate("generic_identifiers")?;
        self.comment_formality.validate("comment_formality")?;
        self.ai_patterns.validate("ai_patterns")
    }
}

/// Minimum per-function ratios for the uniform code features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeCoverage {
    /// Docstrings per function
    pub docstrings: f64,
    /// `try:` blocks per function
    pub error_handling: f64,
    /// Annotated signatures per function
    pub type_hints: f64,
}

impl Default for CodeCoverage {
    fn default() -> Self {
        Self {
            docstrings: 0.9,
            error_handling: 0.5,
            type_hints: 0.8,
        }
    }
}

impl CodeCoverage {
    fn validate(&self) -> Result<()> {
        let ratios = [self.docstrings, self.error_handling, self.type_hints];
        if !ratios.iter().all(|r| r.is_finite() && *r >= 0.0) {
            return Err(Error::config("code coverage ratios must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Thresholds mapping features to flag labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagThresholds {
    /// Per-modality probability above which the "high probability" flag is set
    pub high_probability: f64,
    pub low_perplexity: f64,
    pub low_burstiness: f64,
    pub excessive_formality: f64,
    pub many_transitional_phrases: usize,
    pub generic_naming: f64,
    pub multiple_ai_patterns: usize,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            high_probability: 0.7,
            low_perplexity: 20.0,
            low_burstiness: 0.3,
            excessive_formality: 0.7,
            many_transitional_phrases: 5,
            generic_naming: 0.5,
            multiple_ai_patterns: 2,
        }
    }
}

impl FlagThresholds {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("high_probability", self.high_probability),
            ("low_perplexity", self.low_perplexity),
            ("low_burstiness", self.low_burstiness),
            ("excessive_formality", self.excessive_formality),
            ("generic_naming", self.generic_naming),
        ] {
            if !value.is_finite() {
                return Err(Error::config(format!(
                    "flag threshold '{}' must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
