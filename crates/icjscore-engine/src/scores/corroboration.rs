//! Corroboration, gated on the quantity of independent sources.
//!
//! Domain independence, modality diversity, and cross-check language only
//! count once the eligible weight sum exceeds 1.0, so a single source with
//! rich vocabulary never scores as corroborated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Scored, STATUS_INELIGIBLE, STATUS_SCORED};
use crate::input::Source;
use crate::lexical::{clamp01, saturate};
use crate::sources::{profile_sources, ProfileKind, SourceProfile};
use crate::vocab::Vocabulary;

const W_QUANTITY: f64 = 0.50;
const W_INDEPENDENCE: f64 = 0.30;
const W_MODALITY: f64 = 0.10;
const W_CROSS_CHECK: f64 = 0.10;

const MODALITY_CAP: f64 = 3.0;
const CROSS_CHECK_CAP: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorroborationDetails {
    pub status: String,
    pub resolved_source_count: usize,
    pub eligible_source_count: usize,
    pub source_weight_sum: f64,
    pub multi_source_factor: f64,
    pub source_quantity: f64,
    pub domain_independence: f64,
    pub domain_independence_effective: f64,
    pub modalities: Vec<String>,
    pub modality_diversity: f64,
    pub modality_diversity_effective: f64,
    pub cross_check_hits: usize,
    pub cross_check: f64,
    pub cross_check_effective: f64,
    pub sources: Vec<SourceProfile>,
}

/// 0 until the weight sum exceeds 1.0, saturating at 1.0 by 1.5.
pub fn multi_source_factor(weight_sum: f64) -> f64 {
    clamp01((weight_sum - 1.0) / 0.5)
}

/// 0 for a single full-weight source, saturating at a weight sum of 3.0.
pub fn source_quantity(weight_sum: f64) -> f64 {
    clamp01((weight_sum - 1.0) / 2.0)
}

pub fn corroboration(
    sources: &[&Source],
    evidence_words: &[String],
    vocab: &Vocabulary,
) -> Scored<CorroborationDetails> {
    let profiles = profile_sources(sources.iter().copied(), ProfileKind::Corroboration);
    let eligible: Vec<&SourceProfile> = profiles.iter().filter(|p| p.eligible).collect();
    let n = eligible.len();

    let modalities = vocab.modalities_hit(evidence_words);
    let cross_check_hits = vocab.cross_check.count(evidence_words);

    if n == 0 {
        return Scored::new(
            0.0,
            CorroborationDetails {
                status: STATUS_INELIGIBLE.to_string(),
                resolved_source_count: profiles.len(),
                eligible_source_count: 0,
                source_weight_sum: 0.0,
                multi_source_factor: 0.0,
                source_quantity: 0.0,
                domain_independence: 0.0,
                domain_independence_effective: 0.0,
                modalities,
                modality_diversity: 0.0,
                modality_diversity_effective: 0.0,
                cross_check_hits,
                cross_check: 0.0,
                cross_check_effective: 0.0,
                sources: profiles,
            },
        );
    }

    let weight_sum: f64 = eligible.iter().map(|p| p.weight).sum();
    let msf = multi_source_factor(weight_sum);
    let domains: HashSet<String> = eligible.iter().map(|p| p.independence_key()).collect();
    let domain_independence = domains.len() as f64 / n as f64;
    let modality_diversity = saturate(modalities.len() as f64, MODALITY_CAP);
    let cross_check = saturate(cross_check_hits as f64, CROSS_CHECK_CAP);

    let details = CorroborationDetails {
        status: STATUS_SCORED.to_string(),
        resolved_source_count: profiles.len(),
        eligible_source_count: n,
        source_weight_sum: weight_sum,
        multi_source_factor: msf,
        source_quantity: source_quantity(weight_sum),
        domain_independence,
        domain_independence_effective: domain_independence * msf,
        modalities,
        modality_diversity,
        modality_diversity_effective: modality_diversity * msf,
        cross_check_hits,
        cross_check,
        cross_check_effective: cross_check * msf,
        sources: profiles,
    };

    let unit = W_QUANTITY * details.source_quantity
        + W_INDEPENDENCE * details.domain_independence_effective
        + W_MODALITY * details.modality_diversity_effective
        + W_CROSS_CHECK * details.cross_check_effective;
    Scored::new(unit, details)
}
