//! Chain of custody: how explicitly the evidence documents collection,
//! integrity, timing, concrete identifiers, and versioning.

use serde::{Deserialize, Serialize};

use super::{evidence_text, evidence_words, Scored};
use crate::evidence::EvidenceAnchor;
use crate::lexical::{count_identifiers, count_temporal_markers, saturate};
use crate::vocab::Vocabulary;

const CUSTODY_CAP: f64 = 10.0;
const INTEGRITY_CAP: f64 = 6.0;
const TEMPORAL_CAP: f64 = 6.0;
const IDENTIFIER_CAP: f64 = 10.0;
const VERSIONING_CAP: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyDetails {
    pub custody_term_hits: usize,
    pub custody_density: f64,
    pub integrity_marker_hits: usize,
    pub integrity_density: f64,
    pub temporal_anchor_count: usize,
    pub temporal_density: f64,
    pub hash_count: usize,
    pub ipv4_count: usize,
    pub domain_count: usize,
    pub identifier_density: f64,
    pub versioning_term_hits: usize,
    pub versioning_density: f64,
}

pub fn custody(evidence: &[EvidenceAnchor], vocab: &Vocabulary) -> Scored<CustodyDetails> {
    let text = evidence_text(evidence);
    let ws = evidence_words(evidence);

    let custody_hits = vocab.custody.count(&ws);
    let integrity_hits = vocab.integrity.count(&ws);
    let temporal = count_temporal_markers(&text);
    let ids = count_identifiers(&text);
    let versioning_hits = vocab.versioning.count(&ws);

    let details = CustodyDetails {
        custody_term_hits: custody_hits,
        custody_density: saturate(custody_hits as f64, CUSTODY_CAP),
        integrity_marker_hits: integrity_hits,
        integrity_density: saturate(integrity_hits as f64, INTEGRITY_CAP),
        temporal_anchor_count: temporal,
        temporal_density: saturate(temporal as f64, TEMPORAL_CAP),
        hash_count: ids.hashes,
        ipv4_count: ids.ipv4,
        domain_count: ids.domains,
        identifier_density: saturate(ids.total() as f64, IDENTIFIER_CAP),
        versioning_term_hits: versioning_hits,
        versioning_density: saturate(versioning_hits as f64, VERSIONING_CAP),
    };

    let unit = 0.30 * details.custody_density
        + 0.30 * details.integrity_density
        + 0.15 * details.temporal_density
        + 0.15 * details.identifier_density
        + 0.10 * details.versioning_density;
    Scored::new(unit, details)
}
