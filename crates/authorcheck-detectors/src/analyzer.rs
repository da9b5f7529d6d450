//! Analyzer trait and common types

/// Trait for per-modality analyzers
///
/// Analyzers are pure: the same content always yields the same probability
/// and features, and a shared analyzer can be called from many threads.
pub trait Analyzer: Send + Sync {
    /// Feature vector produced by this analyzer
    type Features: Default;

    /// Analyze the given content
    fn analyze(&self, content: &str) -> ModalityResult<Self::Features>;

    /// Get the analyzer name
    fn name(&self) -> &str;

    /// Get the modality this analyzer covers
    fn modality(&self) -> Modality;
}

/// Result of a single-modality analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityResult<F> {
    /// Likelihood that the content was generated (0.0-1.0)
    pub probability: f64,

    /// Extracted features
    pub features: F,

    /// Content was too short to carry a signal
    pub insufficient: bool,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl<F: Default> ModalityResult<F> {
    /// Zero-signal result for under-length content
    pub fn insufficient() -> Self {
        Self {
            probability: 0.0,
            features: F::default(),
            insufficient: true,
            latency_us: 0,
        }
    }
}

impl<F> ModalityResult<F> {
    /// Create a scored result
    pub fn new(probability: f64, features: F) -> Self {
        Self {
            probability,
            features,
            insufficient: false,
            latency_us: 0,
        }
    }
}

/// Submission modality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// Natural-language text
    Text,
    /// Source code
    Code,
}

impl Modality {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
        }
    }
}

/// Trimmed content shorter than `min_chars` characters carries no signal
pub(crate) fn below_min_length(content: &str, min_chars: usize) -> bool {
    content.trim().chars().count() < min_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_min_length_counts_trimmed_chars() {
        assert!(below_min_length("", 1));
        assert!(below_min_length("   abc   ", 4));
        assert!(!below_min_length("   abcd   ", 4));
        // characters, not bytes
        assert!(below_min_length("ééé", 4));
    }

    #[test]
    fn test_insufficient_result() {
        let result: ModalityResult<Vec<String>> = ModalityResult::insufficient();
        assert_eq!(result.probability, 0.0);
        assert!(result.insufficient);
        assert!(result.features.is_empty());
    }
}
