//! Document-level calibration of credibility and corroboration.
//!
//! Both are document-relative: each claim's raw value is scaled by the
//! gravity-weighted share of claims that have a high-credibility source
//! (resp. any corroboration). Runs once, after every claim has its
//! first-pass scores, and returns a new claim list.

use serde::{Deserialize, Serialize};

use crate::claim::ScoredClaim;
use crate::config::ScoringConfig;

/// Ratios shared by every claim of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentCalibration {
    pub total_gravity_weight: f64,
    pub credible_claims_weighted_ratio: f64,
    pub corroborated_claims_weighted_ratio: f64,
}

/// Per-claim record of how calibration was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimCalibration {
    pub high_cred_source_present: bool,
    pub corroborated: bool,
    pub credible_claims_weighted_ratio: f64,
    pub corroborated_claims_weighted_ratio: f64,
}

impl DocumentCalibration {
    /// Compute the ratios over a full first-pass claim set.
    pub fn from_claims(claims: &[ScoredClaim]) -> Self {
        let mut total = 0.0;
        let mut credible = 0.0;
        let mut corroborated = 0.0;
        for c in claims {
            let w = c.claim.allegation_gravity.weight();
            total += w;
            if c.details.credibility.high_cred_source_present {
                credible += w;
            }
            if c.scores.corroboration_raw_0_100 > 0.0 {
                corroborated += w;
            }
        }
        let ratio = |part: f64| if total > 0.0 { (part / total).clamp(0.0, 1.0) } else { 0.0 };
        Self {
            total_gravity_weight: total,
            credible_claims_weighted_ratio: ratio(credible),
            corroborated_claims_weighted_ratio: ratio(corroborated),
        }
    }
}

/// Second pass: rescale credibility/corroboration and recompute evidence
/// weight, support, and belief. Raw values are preserved.
pub fn calibrate(
    claims: Vec<ScoredClaim>,
    config: &ScoringConfig,
) -> (Vec<ScoredClaim>, DocumentCalibration) {
    let cal = DocumentCalibration::from_claims(&claims);
    tracing::info!(
        claims = claims.len(),
        credible_ratio = cal.credible_claims_weighted_ratio,
        corroborated_ratio = cal.corroborated_claims_weighted_ratio,
        "document calibration"
    );

    let calibrated = claims
        .into_iter()
        .map(|mut c| {
            let s = &mut c.scores;
            s.credibility_0_100 = s.credibility_raw_0_100 * cal.credible_claims_weighted_ratio;
            s.corroboration_0_100 = s.corroboration_raw_0_100 * cal.corroborated_claims_weighted_ratio;
            s.recombine(
                c.claim.allegation_gravity.required_threshold(),
                config.belief_steepness,
            );
            c.details.calibration = Some(ClaimCalibration {
                high_cred_source_present: c.details.credibility.high_cred_source_present,
                corroborated: s.corroboration_raw_0_100 > 0.0,
                credible_claims_weighted_ratio: cal.credible_claims_weighted_ratio,
                corroborated_claims_weighted_ratio: cal.corroborated_claims_weighted_ratio,
            });
            c
        })
        .collect();
    (calibrated, cal)
}
