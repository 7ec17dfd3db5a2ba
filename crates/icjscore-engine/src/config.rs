//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, InputResult};
use crate::vocab::Vocabulary;

/// Tunables for evidence selection and belief calibration.
///
/// Sub-score weights are fixed inside each scorer; only the selection
/// thresholds, the sigmoid steepness, and the lexicons are injectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum number of evidence anchors selected per claim.
    pub evidence_k: usize,
    /// Anchors with fewer tokens are never evidence.
    pub min_anchor_tokens: usize,
    pub min_claim_overlap: usize,
    /// Above this Jaccard similarity an anchor restates the claim.
    pub max_claim_similarity: f64,
    /// Above this Jaccard similarity two candidates are near-duplicates.
    pub max_pair_similarity: f64,
    pub belief_steepness: f64,
    pub vocabulary: Vocabulary,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            evidence_k: 8,
            min_anchor_tokens: 12,
            min_claim_overlap: 3,
            max_claim_similarity: 0.75,
            max_pair_similarity: 0.85,
            belief_steepness: 12.0,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl ScoringConfig {
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json_str(text: &str) -> InputResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InputResult<()> {
        if self.evidence_k == 0 {
            return Err(InputError::Config("evidence_k must be at least 1".to_string()));
        }
        for (name, v) in [
            ("max_claim_similarity", self.max_claim_similarity),
            ("max_pair_similarity", self.max_pair_similarity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(InputError::Config(format!("{name} must lie in [0, 1], got {v}")));
            }
        }
        if !(self.belief_steepness.is_finite() && self.belief_steepness > 0.0) {
            return Err(InputError::Config(format!(
                "belief_steepness must be positive, got {}",
                self.belief_steepness
            )));
        }
        Ok(())
    }
}
