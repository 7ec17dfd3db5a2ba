//! Grounding: are the supporting anchors distinct from the claim and densely
//! tied to citations and sources?

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Scored;
use crate::evidence::EvidenceAnchor;
use crate::index::DocumentIndex;
use crate::lexical::{jaccard, saturate};

const ANCHOR_CAP: f64 = 6.0;
const TERM_HITS_PER_ANCHOR_CAP: f64 = 8.0;
const CITATION_CAP: f64 = 6.0;
const SOURCE_CAP: f64 = 4.0;

const W_ANCHORS: f64 = 0.25;
const W_NON_DUPLICATION: f64 = 0.20;
const W_VOCABULARY: f64 = 0.20;
const W_CITATIONS: f64 = 0.20;
const W_SOURCES: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingDetails {
    pub evidence_anchor_count: usize,
    pub anchor_coverage: f64,
    pub non_duplication: f64,
    pub evidence_terms_per_anchor: f64,
    pub vocabulary_density: f64,
    pub citation_count: usize,
    pub citation_coverage: f64,
    pub distinct_source_count: usize,
    pub source_coverage: f64,
}

pub fn grounding(
    claim_tokens: &HashSet<String>,
    evidence: &[EvidenceAnchor],
    index: &DocumentIndex<'_>,
) -> Scored<GroundingDetails> {
    let n = evidence.len();
    let (non_duplication, terms_per_anchor) = if n == 0 {
        (0.0, 0.0)
    } else {
        let nd: f64 = evidence
            .iter()
            .map(|e| 1.0 - jaccard(claim_tokens, &e.tokens))
            .sum();
        let hits: usize = evidence.iter().map(|e| e.evidence_term_hits).sum();
        (nd / n as f64, hits as f64 / n as f64)
    };

    let citation_count: usize = evidence
        .iter()
        .map(|e| index.citations_for(&e.anchor_id).count())
        .sum();
    let distinct_source_count = index
        .resolved_sources(evidence.iter().map(|e| e.anchor_id.as_str()))
        .len();

    let details = GroundingDetails {
        evidence_anchor_count: n,
        anchor_coverage: saturate(n as f64, ANCHOR_CAP),
        non_duplication,
        evidence_terms_per_anchor: terms_per_anchor,
        vocabulary_density: saturate(terms_per_anchor, TERM_HITS_PER_ANCHOR_CAP),
        citation_count,
        citation_coverage: saturate(citation_count as f64, CITATION_CAP),
        distinct_source_count,
        source_coverage: saturate(distinct_source_count as f64, SOURCE_CAP),
    };

    let unit = W_ANCHORS * details.anchor_coverage
        + W_NON_DUPLICATION * details.non_duplication
        + W_VOCABULARY * details.vocabulary_density
        + W_CITATIONS * details.citation_coverage
        + W_SOURCES * details.source_coverage;
    Scored::new(unit, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Citation, Document, Source, TextBlock};
    use approx::assert_relative_eq;

    fn anchor(id: &str, tokens: &[&str], hits: usize) -> EvidenceAnchor {
        EvidenceAnchor {
            anchor_id: id.to_string(),
            text: tokens.join(" "),
            selection_score: 0.0,
            claim_overlap: 0,
            evidence_term_hits: hits,
            similarity_to_claim: 0.0,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn doc() -> Document {
        Document {
            sources: vec![Source {
                source_id: "S1".to_string(),
                url: None,
                title: None,
                authors: vec![],
                year: None,
                source_type: Some("government".to_string()),
            }],
            anchors: vec![TextBlock {
                anchor_id: "e1".to_string(),
                content: String::new(),
            }],
            citations: vec![Citation {
                citation_id: "CIT0001".to_string(),
                intext_anchor_id: "e1".to_string(),
                raw_identifier: "[1]".to_string(),
                resolved_source_id: Some("S1".to_string()),
                synthesized: false,
            }],
            claims: vec![],
        }
    }

    #[test]
    fn test_no_evidence_scores_zero() {
        let doc = doc();
        let idx = DocumentIndex::build(&doc);
        let claim: HashSet<String> = ["a".to_string()].into_iter().collect();
        let g = grounding(&claim, &[], &idx);
        assert_eq!(g.score, 0.0);
        assert_eq!(g.details.evidence_anchor_count, 0);
    }

    #[test]
    fn test_single_cited_anchor() {
        let doc = doc();
        let idx = DocumentIndex::build(&doc);
        let claim: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let ev = vec![anchor("e1", &["a", "b", "c", "d"], 4)];
        let g = grounding(&claim, &ev, &idx);
        // anchors 1/6, non-dup 0.5, vocab 4/8, citations 1/6, sources 1/4
        let expected = 0.25 / 6.0 + 0.20 * 0.5 + 0.20 * 0.5 + 0.20 / 6.0 + 0.15 * 0.25;
        assert_relative_eq!(g.score, 100.0 * expected, epsilon = 1e-9);
        assert_eq!(g.details.citation_count, 1);
        assert_eq!(g.details.distinct_source_count, 1);
    }
}
