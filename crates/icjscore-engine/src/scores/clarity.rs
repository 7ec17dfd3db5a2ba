//! Legal/factual clarity of an attribution.
//!
//! Act, actor, and link specificity are blends of claim-text and
//! evidence-text density. Three alternative legal paths to state
//! responsibility are scored independently:
//!
//! 1. conduct of a state organ,
//! 2. a non-state actor acting under state direction or control,
//! 3. a due-diligence failure (knowledge plus omission on the state's territory).
//!
//! The strongest path and the fraction of paths that clear
//! [`PATH_CLEAR_THRESHOLD`] feed the score. A claim that names a state actor
//! is penalized when the evidence carries no state-link language, and again
//! when no legal path is reasonably strong.
//!
//! The thresholds below are empirical and kept exactly as calibrated.

use serde::{Deserialize, Serialize};

use super::Scored;
use crate::lexical::saturate;
use crate::vocab::{TermSet, Vocabulary};

const CLAIM_WEIGHT: f64 = 0.65;
const EVIDENCE_WEIGHT: f64 = 0.35;

const CLAIM_CAP: f64 = 2.0;
const EVIDENCE_SPECIFICITY_CAP: f64 = 6.0;
const EVIDENCE_PATH_CAP: f64 = 4.0;

pub const PATH_CLEAR_THRESHOLD: f64 = 0.55;
pub const STATE_ACTOR_GAP_PENALTY: f64 = 0.35;
pub const LEGAL_GAP_PENALTY: f64 = 0.20;
const LEGAL_GAP_STRENGTH: f64 = 0.40;

const W_ACT: f64 = 0.20;
const W_ACTOR: f64 = 0.20;
const W_LINK: f64 = 0.25;
const W_PATH_STRENGTH: f64 = 0.20;
const W_PATH_COVERAGE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionLabel {
    Yes,
    Partial,
    No,
}

impl QuestionLabel {
    fn grade(value: f64, yes: f64, partial: f64) -> Self {
        if value >= yes {
            QuestionLabel::Yes
        } else if value >= partial {
            QuestionLabel::Partial
        } else {
            QuestionLabel::No
        }
    }
}

/// A projection of the clarity signals onto a question a reviewer would ask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerableQuestion {
    pub value: f64,
    pub label: QuestionLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalPaths {
    pub state_organ: f64,
    pub non_state_actor_under_control: f64,
    pub due_diligence_failure: f64,
}

impl LegalPaths {
    fn as_array(&self) -> [f64; 3] {
        [
            self.state_organ,
            self.non_state_actor_under_control,
            self.due_diligence_failure,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerableQuestions {
    pub attribution_clarity: AnswerableQuestion,
    pub responsibility_mode_clarity: AnswerableQuestion,
    pub due_diligence_clarity: AnswerableQuestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityDetails {
    pub act_specificity: f64,
    pub actor_specificity: f64,
    pub link_specificity: f64,
    pub legal_paths: LegalPaths,
    pub legal_path_strength: f64,
    pub legal_path_coverage: f64,
    pub claim_names_state_actor: bool,
    pub evidence_state_link_hits: usize,
    pub state_actor_gap_penalty: f64,
    pub legal_gap_penalty: f64,
    pub base: f64,
    pub answerable_questions: AnswerableQuestions,
}

/// Claim- and evidence-side densities for one lexicon.
struct Signal {
    claim: f64,
    evidence: f64,
}

impl Signal {
    fn measure(terms: &TermSet, claim: &[String], evidence: &[String], evidence_cap: f64) -> Self {
        Self {
            claim: saturate(terms.count(claim) as f64, CLAIM_CAP),
            evidence: saturate(terms.count(evidence) as f64, evidence_cap),
        }
    }

    fn blend(&self) -> f64 {
        CLAIM_WEIGHT * self.claim + EVIDENCE_WEIGHT * self.evidence
    }
}

pub fn clarity(
    claim_words: &[String],
    evidence_words: &[String],
    vocab: &Vocabulary,
) -> Scored<ClarityDetails> {
    let act = Signal::measure(&vocab.act, claim_words, evidence_words, EVIDENCE_SPECIFICITY_CAP).blend();
    let actor =
        Signal::measure(&vocab.actor, claim_words, evidence_words, EVIDENCE_SPECIFICITY_CAP).blend();
    let link =
        Signal::measure(&vocab.state_link, claim_words, evidence_words, EVIDENCE_SPECIFICITY_CAP)
            .blend();

    let state = Signal::measure(&vocab.state_actor, claim_words, evidence_words, EVIDENCE_PATH_CAP);
    let control = Signal::measure(&vocab.control, claim_words, evidence_words, EVIDENCE_PATH_CAP);
    let knowledge = Signal::measure(&vocab.knowledge, claim_words, evidence_words, EVIDENCE_PATH_CAP);
    let territory =
        Signal::measure(&vocab.territorial, claim_words, evidence_words, EVIDENCE_PATH_CAP);

    let paths = LegalPaths {
        state_organ: 0.45 * state.claim + 0.40 * state.evidence + 0.15 * control.evidence,
        non_state_actor_under_control: 0.20 * state.claim
            + 0.25 * control.claim
            + 0.40 * control.evidence
            + 0.15 * state.evidence,
        due_diligence_failure: 0.20 * knowledge.claim
            + 0.15 * territory.claim
            + 0.35 * knowledge.evidence
            + 0.30 * territory.evidence,
    };
    let strengths = paths.as_array();
    let legal_path_strength = strengths.iter().copied().fold(0.0, f64::max);
    let legal_path_coverage =
        strengths.iter().filter(|&&p| p >= PATH_CLEAR_THRESHOLD).count() as f64 / strengths.len() as f64;

    let claim_names_state_actor = vocab.state_actor.matches_any(claim_words);
    let evidence_state_link_hits = vocab.state_link.count(evidence_words);
    let state_actor_gap_penalty = if claim_names_state_actor && evidence_state_link_hits == 0 {
        STATE_ACTOR_GAP_PENALTY
    } else {
        0.0
    };
    let legal_gap_penalty = if claim_names_state_actor && legal_path_strength < LEGAL_GAP_STRENGTH {
        LEGAL_GAP_PENALTY
    } else {
        0.0
    };

    let base = W_ACT * act
        + W_ACTOR * actor
        + W_LINK * link
        + W_PATH_STRENGTH * legal_path_strength
        + W_PATH_COVERAGE * legal_path_coverage;
    let unit = base * (1.0 - state_actor_gap_penalty - legal_gap_penalty).max(0.0);

    let attribution = (actor + link) / 2.0;
    let answerable_questions = AnswerableQuestions {
        attribution_clarity: AnswerableQuestion {
            value: attribution,
            label: QuestionLabel::grade(attribution, 0.60, 0.35),
        },
        responsibility_mode_clarity: AnswerableQuestion {
            value: legal_path_strength,
            label: QuestionLabel::grade(legal_path_strength, 0.67, 0.40),
        },
        due_diligence_clarity: AnswerableQuestion {
            value: paths.due_diligence_failure,
            label: QuestionLabel::grade(paths.due_diligence_failure, 0.55, 0.45),
        },
    };

    Scored::new(
        unit,
        ClarityDetails {
            act_specificity: act,
            actor_specificity: actor,
            link_specificity: link,
            legal_paths: paths,
            legal_path_strength,
            legal_path_coverage,
            claim_names_state_actor,
            evidence_state_link_hits,
            state_actor_gap_penalty,
            legal_gap_penalty,
            base,
            answerable_questions,
        },
    )
}
