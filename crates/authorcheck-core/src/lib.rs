//! AuthorCheck Core
//!
//! Core types and error handling shared across AuthorCheck components.
//!
//! This crate provides:
//! - The submission and analysis data model
//! - Text and code feature vectors
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Analysis, CodeFeatures, Submission, SubmissionKind, TextFeatures, UsageCategory,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        Analysis, CodeFeatures, Submission, SubmissionKind, TextFeatures, UsageCategory,
    };
}
