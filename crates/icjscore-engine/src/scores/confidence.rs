//! Confidence: is the document explicit about its certainty, does it admit
//! its limits, and does any stated level outrun the computed support?

use serde::{Deserialize, Serialize};

use super::Scored;
use crate::lexical::{clamp01, saturate};
use crate::vocab::Vocabulary;

const W_EXPLICITNESS: f64 = 0.40;
const W_LIMITATIONS: f64 = 0.30;
const W_CALIBRATION: f64 = 0.30;

const HEDGING_CAP: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDetails {
    pub confidence_term_hits: usize,
    pub explicitness: f64,
    pub hedging_term_hits: usize,
    pub limitations: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stated_confidence: Option<f64>,
    pub evidence_support: f64,
    pub overclaim: f64,
    pub calibration: f64,
}

/// `text_words` are the words of the claim followed by its evidence.
pub fn confidence(
    text_words: &[String],
    evidence_support: f64,
    vocab: &Vocabulary,
) -> Scored<ConfidenceDetails> {
    let confidence_hits = vocab.confidence.count(text_words);
    let hedging_hits = vocab.hedging.count(text_words);
    let stated = vocab.max_stated_level(text_words);
    let overclaim = stated.map_or(0.0, |s| clamp01(s - evidence_support));

    let details = ConfidenceDetails {
        confidence_term_hits: confidence_hits,
        explicitness: if confidence_hits > 0 { 1.0 } else { 0.0 },
        hedging_term_hits: hedging_hits,
        limitations: saturate(hedging_hits as f64, HEDGING_CAP),
        stated_confidence: stated,
        evidence_support,
        overclaim,
        calibration: 1.0 - overclaim,
    };

    let unit = W_EXPLICITNESS * details.explicitness
        + W_LIMITATIONS * details.limitations
        + W_CALIBRATION * details.calibration;
    Scored::new(unit, details)
}
