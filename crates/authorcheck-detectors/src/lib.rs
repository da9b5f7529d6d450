//! AuthorCheck Detectors
//!
//! Heuristic scoring engine for AI-usage detection in student submissions.
//!
//! Each modality has its own analyzer:
//! - Text: perplexity proxy, burstiness, formality, transitional phrases
//! - Code: docstring, error-handling and type-hint coverage, naming, comments
//!
//! Per-modality probabilities come from configurable rule tables and are
//! combined by the [`ScoreAggregator`] into a usage score and category.
//! Everything runs synchronously on the CPU with no shared mutable state.

pub mod aggregator;
pub mod analyzer;
pub mod code;
pub mod config;
pub mod service;
pub mod text;

pub use aggregator::ScoreAggregator;
pub use analyzer::{Analyzer, Modality, ModalityResult};
pub use code::CodeAnalyzer;
pub use config::{
    CategoryThresholds, CodeCoverage, CodeRules, DetectionConfig, Direction, FlagThresholds,
    ModalityWeights, TextRules, Tier, TieredRule,
};
pub use service::DetectionService;
pub use text::TextAnalyzer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregator::ScoreAggregator;
    pub use crate::analyzer::{Analyzer, ModalityResult};
    pub use crate::code::CodeAnalyzer;
    pub use crate::config::DetectionConfig;
    pub use crate::service::DetectionService;
    pub use crate::text::TextAnalyzer;
}
