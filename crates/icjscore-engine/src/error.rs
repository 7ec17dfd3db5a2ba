//! Boundary errors.
//!
//! Only structural problems with the input are errors. Semantic absence
//! (no sources, no evidence, no URL) is scored as zero and never surfaces here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// Malformed JSON or a missing required field. serde names the field.
    #[error("malformed input document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate source_id `{0}` in source registry")]
    DuplicateSourceId(String),

    #[error("duplicate anchor_id `{0}` across text blocks")]
    DuplicateAnchorId(String),

    #[error("unknown allegation_gravity `{0}` (expected low|medium|high|exceptional)")]
    UnknownGravity(String),

    #[error("invalid scoring configuration: {0}")]
    Config(String),
}

pub type InputResult<T> = Result<T, InputError>;
