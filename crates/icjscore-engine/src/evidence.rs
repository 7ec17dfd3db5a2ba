//! Evidence selection: pick up to `k` non-redundant anchors supporting a claim.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::ScoringConfig;
use crate::input::TextBlock;
use crate::lexical::{jaccard, overlap, token_set, tokenize, words};

/// A selected supporting anchor plus the numbers that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceAnchor {
    pub anchor_id: String,
    pub text: String,
    pub selection_score: f64,
    pub claim_overlap: usize,
    pub evidence_term_hits: usize,
    pub similarity_to_claim: f64,
    #[serde(skip)]
    pub tokens: HashSet<String>,
}

struct Candidate<'a> {
    block: &'a TextBlock,
    tokens: HashSet<String>,
    score: f64,
    overlap: usize,
    hits: usize,
    similarity: f64,
}

/// Rank every other anchor against the claim and greedily keep the best
/// `config.evidence_k` that are not near-duplicates of one another.
///
/// Anchors that restate the claim (similarity above
/// `max_claim_similarity`) are rejected outright. Ties keep document order.
pub fn select_evidence(
    claim_text: &str,
    claim_anchor_id: &str,
    anchors: &[TextBlock],
    config: &ScoringConfig,
) -> Vec<EvidenceAnchor> {
    let vocab = &config.vocabulary;
    let claim_tokens = token_set(&tokenize(claim_text, &vocab.stop_words));

    let mut candidates: Vec<Candidate<'_>> = anchors
        .iter()
        .filter(|a| a.anchor_id != claim_anchor_id)
        .filter_map(|block| {
            let toks = tokenize(&block.content, &vocab.stop_words);
            if toks.len() < config.min_anchor_tokens {
                return None;
            }
            let tokens = token_set(&toks);
            let shared = overlap(&claim_tokens, &tokens);
            if shared < config.min_claim_overlap {
                return None;
            }
            let similarity = jaccard(&claim_tokens, &tokens);
            if similarity > config.max_claim_similarity {
                return None;
            }
            let hits = vocab.evidence.count(&words(&block.content));
            let size = (toks.len() as f64 / 80.0).min(1.0);
            let score = 2.0 * shared as f64 + 1.5 * hits as f64 + size;
            Some(Candidate {
                block,
                tokens,
                score,
                overlap: shared,
                hits,
                similarity,
            })
        })
        .collect();

    // Stable: equal scores keep document order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut selected: Vec<EvidenceAnchor> = Vec::new();
    for c in candidates {
        if selected.len() >= config.evidence_k {
            break;
        }
        let redundant = selected
            .iter()
            .any(|s| jaccard(&s.tokens, &c.tokens) > config.max_pair_similarity);
        if redundant {
            continue;
        }
        selected.push(EvidenceAnchor {
            anchor_id: c.block.anchor_id.clone(),
            text: c.block.content.clone(),
            selection_score: c.score,
            claim_overlap: c.overlap,
            evidence_term_hits: c.hits,
            similarity_to_claim: c.similarity,
            tokens: c.tokens,
        });
    }
    selected
}
