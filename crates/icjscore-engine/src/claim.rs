//! Per-claim scoring: evidence selection, the six sub-scores, and belief.

use serde::{Deserialize, Serialize};

use crate::calibration::ClaimCalibration;
use crate::config::ScoringConfig;
use crate::evidence::{select_evidence, EvidenceAnchor};
use crate::index::DocumentIndex;
use crate::input::Claim;
use crate::lexical::{clamp01, token_set, tokenize, words};
use crate::scores::{
    clarity, confidence, corroboration, credibility, custody, evidence_words, grounding,
    ClarityDetails, ConfidenceDetails, CorroborationDetails, CredibilityDetails, CustodyDetails,
    GroundingDetails,
};

const W_CUSTODY: f64 = 0.30;
const W_CREDIBILITY: f64 = 0.25;
const W_CORROBORATION: f64 = 0.25;
const W_GROUNDING: f64 = 0.20;

/// Final numbers for one claim. `*_raw_*` keep the pre-calibration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub grounding_0_100: f64,
    pub custody_0_100: f64,
    pub credibility_0_100: f64,
    pub credibility_raw_0_100: f64,
    pub corroboration_0_100: f64,
    pub corroboration_raw_0_100: f64,
    pub confidence_0_100: f64,
    pub clarity_0_100: f64,
    pub evidence_weight_0_100: f64,
    pub evidence_support_0_1: f64,
    pub belief_0_100: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub grounding: GroundingDetails,
    pub custody: CustodyDetails,
    pub credibility: CredibilityDetails,
    pub corroboration: CorroborationDetails,
    pub confidence: ConfidenceDetails,
    pub clarity: ClarityDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<ClaimCalibration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredClaim {
    pub claim: Claim,
    pub evidence: Vec<EvidenceAnchor>,
    pub scores: ScoreBundle,
    pub details: ScoreDetails,
}

/// `0.30·custody + 0.25·credibility + 0.25·corroboration + 0.20·grounding`, in [0, 100].
pub fn evidence_weight(custody: f64, credibility: f64, corroboration: f64, grounding: f64) -> f64 {
    W_CUSTODY * custody + W_CREDIBILITY * credibility + W_CORROBORATION * corroboration + W_GROUNDING * grounding
}

/// Evidence weight scaled by clarity, in [0, 1].
pub fn evidence_support(evidence_weight: f64, clarity: f64) -> f64 {
    clamp01((evidence_weight / 100.0) * (clarity / 100.0))
}

/// Sigmoid belief in (0, 100) that `support` clears `threshold`.
pub fn belief(support: f64, threshold: f64, steepness: f64) -> f64 {
    100.0 / (1.0 + (-steepness * (support - threshold)).exp())
}

impl ScoreBundle {
    /// Recompute the combined values from the current (possibly calibrated)
    /// credibility and corroboration.
    pub(crate) fn recombine(&mut self, threshold: f64, steepness: f64) {
        self.evidence_weight_0_100 = evidence_weight(
            self.custody_0_100,
            self.credibility_0_100,
            self.corroboration_0_100,
            self.grounding_0_100,
        );
        self.evidence_support_0_1 = evidence_support(self.evidence_weight_0_100, self.clarity_0_100);
        self.belief_0_100 = belief(self.evidence_support_0_1, threshold, steepness);
    }
}

/// Score one claim against the indexed document (first pass, uncalibrated).
pub fn score_claim(claim: &Claim, index: &DocumentIndex<'_>, config: &ScoringConfig) -> ScoredClaim {
    let vocab = &config.vocabulary;
    let statement = &claim.claim_statement;
    if index.anchor_text(&statement.anchor_id).is_none() {
        tracing::warn!(
            claim = %claim.claim_id,
            anchor = %statement.anchor_id,
            "claim anchor not found among text blocks"
        );
    }

    let evidence = select_evidence(&statement.text, &statement.anchor_id, index.anchors(), config);
    let claim_tokens = token_set(&tokenize(&statement.text, &vocab.stop_words));
    let claim_words = words(&statement.text);
    let ev_words = evidence_words(&evidence);

    let grounding = grounding(&claim_tokens, &evidence, index);
    let sources = index.resolved_sources(evidence.iter().map(|e| e.anchor_id.as_str()));
    let custody = custody(&evidence, vocab);
    let credibility = credibility(&sources);
    let corroboration = corroboration(&sources, &ev_words, vocab);
    let ew = evidence_weight(custody.score, credibility.score, corroboration.score, grounding.score);
    let clarity = clarity(&claim_words, &ev_words, vocab);
    let support = evidence_support(ew, clarity.score);

    let mut all_words = claim_words;
    all_words.extend(ev_words);
    let confidence = confidence(&all_words, support, vocab);

    let threshold = claim.allegation_gravity.required_threshold();
    let scores = ScoreBundle {
        grounding_0_100: grounding.score,
        custody_0_100: custody.score,
        credibility_0_100: credibility.score,
        credibility_raw_0_100: credibility.score,
        corroboration_0_100: corroboration.score,
        corroboration_raw_0_100: corroboration.score,
        confidence_0_100: confidence.score,
        clarity_0_100: clarity.score,
        evidence_weight_0_100: ew,
        evidence_support_0_1: support,
        belief_0_100: belief(support, threshold, config.belief_steepness),
    };

    tracing::debug!(
        claim = %claim.claim_id,
        evidence = evidence.len(),
        sources = sources.len(),
        support = scores.evidence_support_0_1,
        belief = scores.belief_0_100,
        "scored claim"
    );

    ScoredClaim {
        claim: claim.clone(),
        evidence,
        scores,
        details: ScoreDetails {
            grounding: grounding.details,
            custody: custody.details,
            credibility: credibility.details,
            corroboration: corroboration.details,
            confidence: confidence.details,
            clarity: clarity.details,
            calibration: None,
        },
    }
}

/// First pass over every claim, in input order.
pub fn score_claims(index: &DocumentIndex<'_>, config: &ScoringConfig) -> Vec<ScoredClaim> {
    index
        .document()
        .claims
        .iter()
        .map(|c| score_claim(c, index, config))
        .collect()
}
