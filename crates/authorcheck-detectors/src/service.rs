//! Analysis orchestration
//!
//! `DetectionService` owns one analyzer per modality and the score
//! aggregator. It dispatches a submission by kind and assembles the final
//! [`Analysis`] record.

use crate::aggregator::ScoreAggregator;
use crate::analyzer::{Analyzer, ModalityResult};
use crate::code::CodeAnalyzer;
use crate::config::DetectionConfig;
use crate::text::TextAnalyzer;
use authorcheck_core::{Analysis, Result, Submission};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Scores submissions for AI usage
#[derive(Debug)]
pub struct DetectionService {
    config: DetectionConfig,
    text: TextAnalyzer,
    code: CodeAnalyzer,
    aggregator: ScoreAggregator,
}

impl DetectionService {
    /// Build a service from a detection config
    ///
    /// The config is validated first; pattern compilation failures surface
    /// as detector errors.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;

        let text = TextAnalyzer::from_config(&config)?;
        let code = CodeAnalyzer::from_config(&config)?;
        let aggregator = ScoreAggregator::new(&config);

        Ok(Self {
            config,
            text,
            code,
            aggregator,
        })
    }

    /// Active detection config
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze a submission
    ///
    /// Deterministic apart from `analysis_id` and `timestamp`.
    pub fn analyze(&self, submission: &Submission) -> Analysis {
        let start = Instant::now();
        let kind = submission.kind;

        let text = kind
            .includes_text()
            .then(|| run(&self.text, &submission.content));
        let code = kind
            .includes_code()
            .then(|| run(&self.code, &submission.content));

        let text_probability = text.as_ref().map(|r| r.probability);
        let code_probability = code.as_ref().map(|r| r.probability);

        let flags = self.aggregator.flags(
            text_probability,
            code_probability,
            text.as_ref().map(|r| &r.features),
            code.as_ref().map(|r| &r.features),
        );

        let text_features = text.map(|r| r.features);
        let code_features = code.map(|r| r.features);

        let usage_score = self
            .aggregator
            .usage_score(kind, text_probability, code_probability);
        let category = self.aggregator.categorize(usage_score);
        let explanation = self.aggregator.explanation(category, &flags);
        let confidence = self
            .aggregator
            .confidence(kind, text_probability, code_probability);

        info!(
            submission_id = %submission.submission_id,
            kind = %kind,
            score = usage_score,
            category = %category,
            flags = flags.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "Analyzed submission"
        );

        Analysis {
            analysis_id: Uuid::new_v4().to_string(),
            submission_id: submission.submission_id.clone(),
            student_id: submission.student_id.clone(),
            timestamp: Utc::now(),
            usage_score,
            category,
            text_probability,
            code_probability,
            text_features,
            code_features,
            flags,
            explanation,
            confidence,
            requires_verification: category.requires_verification(),
            recommended_action: self.aggregator.recommended_action(category).to_string(),
        }
    }
}

impl Default for DetectionService {
    fn default() -> Self {
        Self::new(DetectionConfig::default()).expect("default detection config is valid")
    }
}

fn run<A: Analyzer>(analyzer: &A, content: &str) -> ModalityResult<A::Features> {
    let result = analyzer.analyze(content);
    debug!(
        analyzer = analyzer.name(),
        modality = analyzer.modality().as_str(),
        probability = result.probability,
        insufficient = result.insufficient,
        latency_us = result.latency_us,
        "Analyzer finished"
    );
    result
}
