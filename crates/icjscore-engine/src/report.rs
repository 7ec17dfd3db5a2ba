//! Document aggregation and the output report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calibration::DocumentCalibration;
use crate::claim::{ScoreBundle, ScoreDetails, ScoredClaim};
use crate::evidence::EvidenceAnchor;
use crate::index::DocumentIndex;
use crate::input::{ClaimStatement, Gravity};
use crate::lexical::round4;

pub const REPORT_TYPE: &str = "icj_score_report";
pub const REPORT_VERSION: &str = "v3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentScores {
    pub belief_weighted_0_100: f64,
    pub grounding_avg_0_100: f64,
    pub custody_avg_0_100: f64,
    pub credibility_avg_0_100: f64,
    pub corroboration_avg_0_100: f64,
    pub confidence_avg_0_100: f64,
    pub clarity_avg_0_100: f64,
    pub citation_coverage_sources_0_1: f64,
    pub sources_total: usize,
    pub citations_total: usize,
    pub synthesized_citations_total: usize,
    pub claims_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claim_id: String,
    pub allegation_gravity: Gravity,
    pub required_threshold_0_1: f64,
    pub gravity_weight: f64,
    pub claim_statement: ClaimStatement,
    pub evidence: Vec<EvidenceAnchor>,
    pub scores: ScoreBundle,
    pub score_details: ScoreDetails,
}

impl From<ScoredClaim> for ClaimReport {
    fn from(c: ScoredClaim) -> Self {
        let gravity = c.claim.allegation_gravity;
        Self {
            claim_id: c.claim.claim_id,
            allegation_gravity: gravity,
            required_threshold_0_1: gravity.required_threshold(),
            gravity_weight: gravity.weight(),
            claim_statement: c.claim.claim_statement,
            evidence: c.evidence,
            scores: c.scores,
            score_details: c.details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub report_type: String,
    pub report_version: String,
    pub document_scores: DocumentScores,
    pub calibration: DocumentCalibration,
    pub claims: Vec<ClaimReport>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Distinct cited registry sources over registry size; 0 for an empty registry.
pub fn citation_coverage(index: &DocumentIndex<'_>) -> f64 {
    let total = index.document().sources.len();
    if total == 0 {
        return 0.0;
    }
    index.cited_source_ids().len() as f64 / total as f64
}

/// Assemble the report from calibrated claims.
pub fn aggregate(
    index: &DocumentIndex<'_>,
    claims: Vec<ScoredClaim>,
    calibration: DocumentCalibration,
) -> DocumentReport {
    let weight_sum: f64 = claims.iter().map(|c| c.claim.allegation_gravity.weight()).sum();
    let belief_weighted = if weight_sum > 0.0 {
        claims
            .iter()
            .map(|c| c.claim.allegation_gravity.weight() * c.scores.belief_0_100)
            .sum::<f64>()
            / weight_sum
    } else {
        0.0
    };

    let avg = |f: fn(&ScoreBundle) -> f64| mean(claims.iter().map(|c| f(&c.scores)));
    let document_scores = DocumentScores {
        belief_weighted_0_100: belief_weighted,
        grounding_avg_0_100: avg(|s| s.grounding_0_100),
        custody_avg_0_100: avg(|s| s.custody_0_100),
        credibility_avg_0_100: avg(|s| s.credibility_0_100),
        corroboration_avg_0_100: avg(|s| s.corroboration_0_100),
        confidence_avg_0_100: avg(|s| s.confidence_0_100),
        clarity_avg_0_100: avg(|s| s.clarity_0_100),
        citation_coverage_sources_0_1: citation_coverage(index),
        sources_total: index.document().sources.len(),
        citations_total: index.citations().len(),
        synthesized_citations_total: index.synthesized_count(),
        claims_total: claims.len(),
    };

    DocumentReport {
        report_type: REPORT_TYPE.to_string(),
        report_version: REPORT_VERSION.to_string(),
        document_scores,
        calibration,
        claims: claims.into_iter().map(ClaimReport::from).collect(),
    }
}

impl DocumentReport {
    /// JSON value with every float rounded to 4 decimals.
    pub fn to_json_value(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        round_floats(&mut value);
        Ok(value)
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        let value = self.to_json_value()?;
        if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    }
}

fn round_floats(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(rounded) = n.as_f64().map(round4).and_then(serde_json::Number::from_f64) {
                *n = rounded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(round_floats),
        Value::Object(map) => map.values_mut().for_each(round_floats),
        _ => {}
    }
}
