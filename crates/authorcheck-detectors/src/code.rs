//! Code analyzer
//!
//! Structural heuristics over Python-style source text. Everything is
//! textual pattern matching; no parsing.

use crate::analyzer::{below_min_length, Analyzer, Modality, ModalityResult};
use crate::config::{CodeCoverage, CodeRules, DetectionConfig};
use aho_corasick::AhoCorasick;
use authorcheck_core::{CodeFeatures, Result};
use regex::Regex;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, warn};

/// Comment openers typical of generated code, matched case-insensitively
pub const AI_COMMENT_PATTERNS: &[&str] = &[
    "# Function to ",
    "# This function ",
    "# Returns:",
    "# Args:",
    "# Parameters:",
    "\"\"\"This function calculates",
    "\"\"\"This method ",
    "# Calculate the ",
    "# Process the ",
    "# Handle the ",
];

/// Identifiers that read as boilerplate
pub const GENERIC_NAMES: &[&str] = &[
    "calculate_result",
    "process_data",
    "handle_request",
    "get_information",
    "perform_operation",
    "execute_task",
    "manage_resources",
    "handle_response",
    "process_input",
    "calculate_value",
    "get_data",
    "set_value",
];

/// Phrases that put a comment in documentation register
pub const FORMAL_COMMENT_INDICATORS: &[&str] = &[
    "function to",
    "this function",
    "this method",
    "returns:",
    "args:",
    "parameters:",
    "raises:",
    "note:",
    "example:",
    "description:",
];

pub const PERFECT_MAIN_STRUCTURE: &str = "perfect_main_structure";
pub const VERY_LONG_DOCSTRINGS: &str = "very_long_docstrings";
pub const MANY_IMPORTS: &str = "many_imports";

/// Import statements above this count are flagged
const MANY_IMPORTS_THRESHOLD: usize = 10;

fn compile(pattern: &str, what: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        authorcheck_core::Error::detector(format!("Failed to compile {} regex: {}", what, e))
    })
}

/// Structural code analyzer
#[derive(Debug)]
pub struct CodeAnalyzer {
    name: String,
    min_length: usize,
    rules: CodeRules,
    coverage: CodeCoverage,
    function_def: Regex,
    docstring: Regex,
    typed_function: Regex,
    identifier: Regex,
    comment: Regex,
    ai_openers: Vec<(&'static str, Regex)>,
    main_guard: Regex,
    long_docstring: Regex,
    import_line: Regex,
    formal_indicators: AhoCorasick,
}

impl CodeAnalyzer {
    /// Create a code analyzer with the stock rule table
    pub fn new() -> Result<Self> {
        Self::from_config(&DetectionConfig::default())
    }

    /// Create a code analyzer from a detection config
    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        let ai_openers = AI_COMMENT_PATTERNS
            .iter()
            .map(|pattern| {
                compile(&format!("(?i){}", regex::escape(pattern)), "comment opener")
                    .map(|re| (*pattern, re))
            })
            .collect::<Result<Vec<_>>>()?;

        let formal_indicators = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(FORMAL_COMMENT_INDICATORS)
            .map_err(|e| {
                authorcheck_core::Error::detector(format!(
                    "Failed to build comment formality matcher: {e}"
                ))
            })?;

        Ok(Self {
            name: "code".to_string(),
            min_length: config.min_code_length,
            rules: config.code_rules.clone(),
            coverage: config.code_coverage,
            function_def: compile(r"def\s+\w+\s*\(", "function")?,
            docstring: compile(r#"(?s)""".*?"""|'''.*?'''"#, "docstring")?,
            typed_function: compile(r"def\s+\w+\s*\([^)]*:\s*\w+[^)]*\)\s*->", "typed function")?,
            identifier: compile(r"\b[a-z_][a-z0-9_]*\b", "identifier")?,
            comment: compile(r#"(?m)#.*$|(?s:""".*?"""|'''.*?''')"#, "comment")?,
            ai_openers,
            main_guard: compile(r#"if __name__ == ["']__main__["']:"#, "main guard")?,
            long_docstring: compile(r#"(?s)""".{200,}""""#, "long docstring")?,
            import_line: compile(r"(?m)^import\s+\w+|^from\s+\w+", "import")?,
            formal_indicators,
        })
    }

    /// Extract features from code already known to be long enough
    pub fn extract(&self, code: &str) -> CodeFeatures {
        let functions = self.count_functions(code);

        CodeFeatures {
            has_uniform_docstrings: self.has_uniform_docstrings(code, functions),
            has_uniform_error_handling: self.has_uniform_error_handling(code, functions),
            has_uniform_type_hints: self.has_uniform_type_hints(code, functions),
            generic_identifier_ratio: self.generic_identifier_ratio(code),
            comment_formality_score: self.comment_formality(code),
            matched_ai_patterns: self.detect_ai_patterns(code),
        }
    }

    /// Probability that code with these features was generated
    pub fn probability(&self, features: &CodeFeatures) -> f64 {
        let mut score = 0.0;

        if features.has_uniform_docstrings {
            score += self.rules.uniform_docstrings;
        }
        if features.has_uniform_error_handling {
            score += self.rules.uniform_error_handling;
        }
        if features.has_uniform_type_hints {
            score += self.rules.uniform_type_hints;
        }
        score += self
            .rules
            .generic_identifiers
            .weight_for(features.generic_identifier_ratio);
        score += self
            .rules
            .comment_formality
            .weight_for(features.comment_formality_score);
        score += self
            .rules
            .ai_patterns
            .weight_for(features.matched_ai_patterns.len() as f64);

        score.min(1.0)
    }

    /// Number of `def name(` occurrences
    pub fn count_functions(&self, code: &str) -> usize {
        self.function_def.find_iter(code).count()
    }

    /// Docstrings per function meets the coverage ratio
    pub fn has_uniform_docstrings(&self, code: &str, functions: usize) -> bool {
        if functions == 0 {
            return false;
        }
        let docstrings = self.docstring.find_iter(code).count();
        docstrings as f64 / functions as f64 >= self.coverage.docstrings
    }

    /// `try:` blocks per function meets the coverage ratio
    pub fn has_uniform_error_handling(&self, code: &str, functions: usize) -> bool {
        if functions == 0 {
            return false;
        }
        let tries = code.matches("try:").count();
        tries as f64 / functions as f64 >= self.coverage.error_handling
    }

    /// Annotated signatures per function meets the coverage ratio
    pub fn has_uniform_type_hints(&self, code: &str, functions: usize) -> bool {
        if functions == 0 {
            return false;
        }
        let typed = self.typed_function.find_iter(code).count();
        typed as f64 / functions as f64 >= self.coverage.type_hints
    }

    /// Generic names present over distinct lowercase identifiers
    pub fn generic_identifier_ratio(&self, code: &str) -> f64 {
        let code_lower = code.to_lowercase();
        let identifiers: HashSet<&str> = self
            .identifier
            .find_iter(&code_lower)
            .map(|m| m.as_str())
            .collect();

        if identifiers.is_empty() {
            return 0.0;
        }

        let generic = GENERIC_NAMES
            .iter()
            .filter(|name| identifiers.contains(*name))
            .count();
        generic as f64 / identifiers.len() as f64
    }

    /// Fraction of comments and docstrings written in documentation register
    pub fn comment_formality(&self, code: &str) -> f64 {
        let comments: Vec<&str> = self.comment.find_iter(code).map(|m| m.as_str()).collect();
        if comments.is_empty() {
            return 0.0;
        }

        let formal = comments
            .iter()
            .filter(|comment| self.formal_indicators.is_match(**comment))
            .count();
        formal as f64 / comments.len() as f64
    }

    /// Labels of boilerplate patterns found in the code, in a fixed order
    pub fn detect_ai_patterns(&self, code: &str) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .ai_openers
            .iter()
            .filter(|(_, re)| re.is_match(code))
            .map(|(label, _)| label.to_string())
            .collect();

        if self.main_guard.is_match(code) && code.contains("def main(") {
            patterns.push(PERFECT_MAIN_STRUCTURE.to_string());
        }

        if self.long_docstring.is_match(code) {
            patterns.push(VERY_LONG_DOCSTRINGS.to_string());
        }

        if self.import_line.find_iter(code).count() > MANY_IMPORTS_THRESHOLD {
            patterns.push(MANY_IMPORTS.to_string());
        }

        patterns
    }
}

impl Default for CodeAnalyzer {
    fn default() -> Self {
        Self::new().expect("Failed to create code analyzer")
    }
}

impl Analyzer for CodeAnalyzer {
    type Features = CodeFeatures;

    fn analyze(&self, content: &str) -> ModalityResult<CodeFeatures> {
        let start = Instant::now();

        if below_min_length(content, self.min_length) {
            warn!(
                min_length = self.min_length,
                "Code too short for reliable analysis"
            );
            return ModalityResult::insufficient();
        }

        let features = self.extract(content);
        let probability = self.probability(&features);

        debug!(
            probability,
            docstrings = features.has_uniform_docstrings,
            type_hints = features.has_uniform_type_hints,
            patterns = features.matched_ai_patterns.len(),
            "Code analysis complete"
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
        Modality::Code
    }
}
