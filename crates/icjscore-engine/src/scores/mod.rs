//! The six sub-score calculators.
//!
//! Each is a pure function from evidence text and metadata to a score in
//! [0, 100] plus a typed breakdown of the ratios that produced it. Every
//! division is guarded by an explicit zero-count branch.

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceAnchor;
use crate::lexical::words;

pub mod clarity;
pub mod confidence;
pub mod corroboration;
pub mod credibility;
pub mod custody;
pub mod grounding;

pub use clarity::{clarity, ClarityDetails, QuestionLabel};
pub use confidence::{confidence, ConfidenceDetails};
pub use corroboration::{corroboration, CorroborationDetails};
pub use credibility::{credibility, CredibilityDetails};
pub use custody::{custody, CustodyDetails};
pub use grounding::{grounding, GroundingDetails};

/// A sub-score with its audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<D> {
    pub score: f64,
    pub details: D,
}

impl<D> Scored<D> {
    pub(crate) fn new(unit_score: f64, details: D) -> Self {
        Self {
            score: (100.0 * unit_score).clamp(0.0, 100.0),
            details,
        }
    }
}

/// Status recorded when a source-based scorer has nothing to score.
pub const STATUS_SCORED: &str = "scored";
pub const STATUS_INELIGIBLE: &str = "ineligible";

/// Words of all evidence anchors joined in selection order.
pub fn evidence_words(evidence: &[EvidenceAnchor]) -> Vec<String> {
    evidence.iter().flat_map(|e| words(&e.text)).collect()
}

pub fn evidence_text(evidence: &[EvidenceAnchor]) -> String {
    evidence
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
