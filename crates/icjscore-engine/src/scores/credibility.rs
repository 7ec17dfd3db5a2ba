//! Source credibility over a claim's resolved, eligible sources.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Scored, STATUS_INELIGIBLE, STATUS_SCORED};
use crate::input::Source;
use crate::lexical::saturate;
use crate::sources::{profile_sources, ProfileKind, SourceProfile};

const W_MEAN_QUALITY: f64 = 0.55;
const W_TOP_QUALITY: f64 = 0.20;
const W_DIVERSITY: f64 = 0.15;
const W_INDEPENDENCE: f64 = 0.10;

const DIVERSITY_CAP: f64 = 3.0;
pub const SINGLE_SOURCE_PENALTY: f64 = 0.85;
/// A source at or above this weight counts as high-credibility.
pub const HIGH_CREDIBILITY_WEIGHT: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityDetails {
    pub status: String,
    pub resolved_source_count: usize,
    pub eligible_source_count: usize,
    pub mean_quality: f64,
    pub top_quality: f64,
    pub source_diversity: f64,
    pub domain_independence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_source_penalty: Option<f64>,
    pub high_cred_source_present: bool,
    pub sources: Vec<SourceProfile>,
}

pub fn credibility(sources: &[&Source]) -> Scored<CredibilityDetails> {
    let profiles = profile_sources(sources.iter().copied(), ProfileKind::Credibility);
    let eligible: Vec<&SourceProfile> = profiles.iter().filter(|p| p.eligible).collect();
    let n = eligible.len();

    if n == 0 {
        return Scored::new(
            0.0,
            CredibilityDetails {
                status: STATUS_INELIGIBLE.to_string(),
                resolved_source_count: profiles.len(),
                eligible_source_count: 0,
                mean_quality: 0.0,
                top_quality: 0.0,
                source_diversity: 0.0,
                domain_independence: 0.0,
                single_source_penalty: None,
                high_cred_source_present: false,
                sources: profiles,
            },
        );
    }

    let mean_quality = eligible.iter().map(|p| p.weight).sum::<f64>() / n as f64;
    let top_quality = eligible.iter().map(|p| p.weight).fold(0.0, f64::max);
    let domains: HashSet<String> = eligible.iter().map(|p| p.independence_key()).collect();
    let domain_independence = domains.len() as f64 / n as f64;
    let source_diversity = saturate(n as f64, DIVERSITY_CAP);
    let single_source_penalty = (n == 1).then_some(SINGLE_SOURCE_PENALTY);

    let base = W_MEAN_QUALITY * mean_quality
        + W_TOP_QUALITY * top_quality
        + W_DIVERSITY * source_diversity
        + W_INDEPENDENCE * domain_independence;
    let unit = base * single_source_penalty.unwrap_or(1.0);

    Scored::new(
        unit,
        CredibilityDetails {
            status: STATUS_SCORED.to_string(),
            resolved_source_count: profiles.len(),
            eligible_source_count: n,
            mean_quality,
            top_quality,
            source_diversity,
            domain_independence,
            single_source_penalty,
            high_cred_source_present: top_quality >= HIGH_CREDIBILITY_WEIGHT,
            sources: profiles,
        },
    )
}
