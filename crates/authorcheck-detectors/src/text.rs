//! Text analyzer
//!
//! Scores prose against statistical markers of generated text: predictable
//! word distribution, uniform sentence lengths, formal register and heavy use
//! of discourse connectives.
//!
//! The "perplexity" here is a word-frequency entropy proxy, not a language
//! model perplexity. The rule table thresholds were tuned against exactly
//! this metric, so the formulas must stay as they are.

use crate::analyzer::{below_min_length, Analyzer, Modality, ModalityResult};
use crate::config::{DetectionConfig, TextRules};
use aho_corasick::AhoCorasick;
use authorcheck_core::{Result, TextFeatures};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, warn};

/// Discourse connectives typical of generated prose
pub const TRANSITIONAL_PHRASES: &[&str] = &[
    "furthermore",
    "moreover",
    "additionally",
    "consequently",
    "nevertheless",
    "nonetheless",
    "therefore",
    "thus",
    "hence",
    "accordingly",
    "subsequently",
    "in conclusion",
    "to summarize",
    "in summary",
    "as a result",
];

/// Formal vocabulary indicators
pub const FORMAL_WORDS: &[&str] = &[
    "utilize",
    "commence",
    "terminate",
    "endeavor",
    "facilitate",
    "optimize",
    "implement",
    "demonstrate",
    "establish",
    "acquire",
];

/// Perplexity reported for texts with fewer than two words
const SHORT_TEXT_PERPLEXITY: f64 = 50.0;

/// Burstiness reported when sentence variation is undefined
const UNDEFINED_BURSTINESS: f64 = 0.5;

/// Statistical text analyzer
#[derive(Debug)]
pub struct TextAnalyzer {
    name: String,
    min_length: usize,
    rules: TextRules,
    transitions: AhoCorasick,
    formal_words: AhoCorasick,
    contractions: Regex,
    sentence_breaks: Regex,
}

impl TextAnalyzer {
    /// Create a text analyzer with the stock rule table
    pub fn new() -> Result<Self> {
        Self::from_config(&DetectionConfig::default())
    }

    /// Create a text analyzer from a detection config
    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        let transitions = AhoCorasick::new(TRANSITIONAL_PHRASES).map_err(|e| {
            authorcheck_core::Error::detector(format!(
                "Failed to build transitional phrase matcher: {e}"
            ))
        })?;

        let formal_words = AhoCorasick::new(FORMAL_WORDS).map_err(|e| {
            authorcheck_core::Error::detector(format!("Failed to build formal word matcher: {e}"))
        })?;

        Ok(Self {
            name: "text".to_string(),
            min_length: config.min_text_length,
            rules: config.text_rules.clone(),
            transitions,
            formal_words,
            contractions: Regex::new(r"\w+n't|\w+'ll|\w+'re|\w+'ve").map_err(|e| {
                authorcheck_core::Error::detector(format!(
                    "Failed to compile contraction regex: {e}"
                ))
            })?,
            sentence_breaks: Regex::new(r"[.!?]+").map_err(|e| {
                authorcheck_core::Error::detector(format!("Failed to compile sentence regex: {e}"))
            })?,
        })
    }

    /// Extract features from text already known to be long enough
    pub fn extract(&self, text: &str) -> TextFeatures {
        let text_lower = text.to_lowercase();
        let sentences = self.split_sentences(text);
        let words: Vec<&str> = text.split_whitespace().collect();

        TextFeatures {
            perplexity: perplexity(&text_lower),
            burstiness: burstiness(&sentences),
            avg_sentence_length: average_sentence_length(&sentences),
            vocabulary_richness: vocabulary_richness(&words),
            formality_score: self.formality(&text_lower, words.len()),
            transitional_phrase_count: self.count_transitional_phrases(&text_lower),
        }
    }

    /// Probability that text with these features was generated
    pub fn probability(&self, features: &TextFeatures) -> f64 {
        let score = self.rules.perplexity.weight_for(features.perplexity)
            + self.rules.burstiness.weight_for(features.burstiness)
            + self.rules.formality.weight_for(features.formality_score)
            + self
                .rules
                .transitional_phrases
                .weight_for(features.transitional_phrase_count as f64)
            + self
                .rules
                .vocabulary_richness
                .weight_for(features.vocabulary_richness);

        score.min(1.0)
    }

    /// Split text into trimmed, non-empty sentences on runs of `.`, `!`, `?`
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_breaks
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Formality of lowercased text with `word_count` whitespace tokens
    ///
    /// Each formal word counts once however often it appears; every
    /// contraction counts against the score.
    pub fn formality(&self, text_lower: &str, word_count: usize) -> f64 {
        if word_count == 0 {
            return 0.0;
        }

        let formal_hits = self
            .formal_words
            .find_overlapping_iter(text_lower)
            .map(|m| m.pattern())
            .collect::<HashSet<_>>()
            .len() as f64;
        let contraction_hits = self.contractions.find_iter(text_lower).count() as f64;

        let formality = (formal_hits * 2.0 - contraction_hits) / word_count as f64;
        (formality * 10.0 + 0.5).clamp(0.0, 1.0)
    }

    /// Substring occurrences of the connective dictionary in lowercased text
    pub fn count_transitional_phrases(&self, text_lower: &str) -> usize {
        self.transitions.find_overlapping_iter(text_lower).count()
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new().expect("Failed to create text analyzer")
    }
}

impl Analyzer for TextAnalyzer {
    type Features = TextFeatures;

    fn analyze(&self, content: &str) -> ModalityResult<TextFeatures> {
        let start = Instant::now();

        if below_min_length(content, self.min_length) {
            warn!(
                min_length = self.min_length,
                "Text too short for reliable analysis"
            );
            return ModalityResult::insufficient();
        }

        let features = self.extract(content);
        let probability = self.probability(&features);

        debug!(
            probability,
            perplexity = features.perplexity,
            burstiness = features.burstiness,
            formality = features.formality_score,
            "Text analysis complete"
        );

        ModalityResult {
            latency_us: start.elapsed().as_micros() as u64,
            ..ModalityResult::new(probability, features)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn modality(&self) -> Modality {
        Modality::Text
    }
}

/// Word-frequency entropy proxy of lowercased text
///
/// `2^H * 5` over whitespace-delimited words, capped at 100. Lower values
/// mean more repetitive text. Entropy terms are summed in first-occurrence
/// order so the result is bit-for-bit reproducible.
pub fn perplexity(text_lower: &str) -> f64 {
    let words: Vec<&str> = text_lower.split_whitespace().collect();
    if words.len() < 2 {
        return SHORT_TEXT_PERPLEXITY;
    }

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    for &word in &words {
        let slot = *slots.entry(word).or_insert_with(|| {
            counts.push(0);
            counts.len() - 1
        });
        counts[slot] += 1;
    }

    let total = words.len() as f64;
    let entropy: f64 = counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    (entropy.exp2() * 5.0).min(100.0)
}

/// Coefficient of variation of sentence word counts, capped at 1
pub fn burstiness<S: AsRef<str>>(sentences: &[S]) -> f64 {
    if sentences.len() < 2 {
        return UNDEFINED_BURSTINESS;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    if lengths.is_empty() {
        return UNDEFINED_BURSTINESS;
    }

    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean == 0.0 {
        return UNDEFINED_BURSTINESS;
    }

    let variance = lengths.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
    (variance.sqrt() / mean).min(1.0)
}

/// Mean sentence length in words
pub fn average_sentence_length<S: AsRef<str>>(sentences: &[S]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }

    let total: usize = sentences
        .iter()
        .map(|s| s.as_ref().split_whitespace().count())
        .sum();
    total as f64 / sentences.len() as f64
}

/// Distinct tokens over total tokens (case and punctuation preserved)
pub fn vocabulary_richness(words: &[&str]) -> f64 {
    let distinct: HashSet<&&str> = words.iter().collect();
    distinct.len() as f64 / words.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUMAN_TEXT: &str = "
    Hey! So I was working on this assignment and honestly it was pretty tough.
    I tried a few different approaches but kept getting errors. Finally figured
    it out after looking at the lecture notes again. The code is kinda messy
    but it works lol.
    ";

    #[test]
    fn test_empty_text() {
        let analyzer = TextAnalyzer::new().unwrap();

        let result = analyzer.analyze("");
        assert_eq!(result.probability, 0.0);
        assert!(result.insufficient);
        assert_eq!(result.features, TextFeatures::default());
    }

    #[test]
    fn test_short_text() {
        let analyzer = TextAnalyzer::new().unwrap();

        let result = analyzer.analyze("Hi there!");
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.features.perplexity, 0.0);
    }

    #[test]
    fn test_human_like_text() {
        let analyzer = TextAnalyzer::new().unwrap();

        let result = analyzer.analyze(HUMAN_TEXT);
        assert!(!result.insufficient);
        assert!(result.probability < 0.5, "probability {}", result.probability);
        assert!(result.features.burstiness > 0.2);
        assert!(result.features.formality_score < 0.7);
    }

    #[test]
    fn test_perplexity_orders_repetitive_below_diverse() {
        let repetitive = perplexity("the the the the the cat cat cat");
        let diverse = perplexity("quick brown fox jumps over lazy dog");

        assert!(diverse > repetitive);
        // seven distinct words: 2^log2(7) * 5
        assert!((diverse - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_perplexity_edges() {
        assert_eq!(perplexity("single"), SHORT_TEXT_PERPLEXITY);
        assert_eq!(perplexity("word word"), 5.0);
        let long: String = (0..200).map(|i| format!("w{i} ")).collect();
        assert_eq!(perplexity(&long), 100.0);
    }

    #[test]
    fn test_perplexity_is_bit_identical_across_calls() {
        let text = "we did it and we did it again and again we did it the cat sat \
                    the cat sat and the dog sat and we did it once more "
            .repeat(4);
        let first = perplexity(&text);
        assert!(first < 100.0, "perplexity {first} should be below the cap");

        for _ in 0..200 {
            assert_eq!(perplexity(&text).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_burstiness() {
        let uniform = ["This is a sentence", "This is another one", "This is one more"];
        let varied = [
            "Hi",
            "This is a medium length sentence with several words",
            "Short one",
        ];

        assert_eq!(burstiness(&uniform), 0.0);
        assert!(burstiness(&varied) > burstiness(&uniform));
        assert_eq!(burstiness(&["only one"]), UNDEFINED_BURSTINESS);
    }

    #[test]
    fn test_formality() {
        let analyzer = TextAnalyzer::new().unwrap();

        let informal = "gonna try this. it's kinda cool. won't work tho";
        let formal = "I shall endeavor to utilize this methodology to facilitate optimization";

        let informal_score =
            analyzer.formality(&informal.to_lowercase(), informal.split_whitespace().count());
        let formal_score =
            analyzer.formality(&formal.to_lowercase(), formal.split_whitespace().count());

        assert!(formal_score > informal_score);
        assert_eq!(formal_score, 1.0);
        assert_eq!(analyzer.formality("", 0), 0.0);
    }

    #[test]
    fn test_formal_words_count_once() {
        let analyzer = TextAnalyzer::new().unwrap();

        // one distinct formal word over 40 tokens: (2 / 40) * 10 + 0.5
        let text = format!("utilize utilize {}", "plain ".repeat(38));
        let score = analyzer.formality(&text, 40);
        assert!((score - 1.0).abs() < 1e-9);

        let text = format!("utilize {}", "plain ".repeat(79));
        let score = analyzer.formality(&text, 80);
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_transitional_phrases() {
        let analyzer = TextAnalyzer::new().unwrap();

        let with = "Furthermore, this is important. Moreover, we should consider this. \
                    Consequently, the result is clear.";
        let without = "This is simple. We know the answer. It works.";

        let count_with = analyzer.count_transitional_phrases(&with.to_lowercase());
        let count_without = analyzer.count_transitional_phrases(&without.to_lowercase());

        assert_eq!(count_with, 3);
        assert_eq!(count_without, 0);
    }

    #[test]
    fn test_transitional_phrases_are_substrings() {
        let analyzer = TextAnalyzer::new().unwrap();

        // "thus" inside "enthusiasm" counts
        assert_eq!(analyzer.count_transitional_phrases("enthusiasm and thus"), 2);
    }

    #[test]
    fn test_sentence_splitting() {
        let analyzer = TextAnalyzer::new().unwrap();

        let sentences =
            analyzer.split_sentences("First sentence. Second sentence!! Third sentence?");
        assert_eq!(
            sentences,
            vec!["First sentence", "Second sentence", "Third sentence"]
        );
        assert!(analyzer.split_sentences("...!?").is_empty());
    }

    #[test]
    fn test_average_sentence_length() {
        let sentences = [
            "Short one",
            "This is a longer sentence with more words",
            "Medium length here",
        ];
        let avg = average_sentence_length(&sentences);
        assert!((avg - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(average_sentence_length::<&str>(&[]), 0.0);
    }

    #[test]
    fn test_vocabulary_richness_is_case_sensitive() {
        assert_eq!(vocabulary_richness(&["The", "the"]), 1.0);
        assert_eq!(vocabulary_richness(&["the", "the"]), 0.5);
        assert_eq!(vocabulary_richness(&[]), 0.0);
    }

    #[test]
    fn test_probability_sums_rule_table() {
        let analyzer = TextAnalyzer::new().unwrap();

        let features = TextFeatures {
            perplexity: 10.0,
            burstiness: 0.1,
            avg_sentence_length: 20.0,
            vocabulary_richness: 0.9,
            formality_score: 0.9,
            transitional_phrase_count: 8,
        };
        assert_eq!(analyzer.probability(&features), 1.0);

        let features = TextFeatures {
            perplexity: 25.0,
            burstiness: 0.4,
            formality_score: 0.6,
            transitional_phrase_count: 3,
            ..Default::default()
        };
        assert!((analyzer.probability(&features) - 0.45).abs() < 1e-9);

        let features = TextFeatures {
            perplexity: 100.0,
            burstiness: 1.0,
            ..Default::default()
        };
        assert_eq!(analyzer.probability(&features), 0.0);
    }

    #[test]
    fn test_custom_min_length() {
        let config = DetectionConfig {
            min_text_length: 10,
            ..Default::default()
        };
        let analyzer = TextAnalyzer::from_config(&config).unwrap();

        let result = analyzer.analyze("Short but long enough.");
        assert!(!result.insufficient);
        assert_eq!(analyzer.modality(), Modality::Text);
        assert_eq!(analyzer.name(), "text");
    }
}
