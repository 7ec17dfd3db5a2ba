//! End-to-end scoring scenarios over small hand-built dossiers.

use approx::assert_relative_eq;
use icjscore_engine::{
    belief, score_document, Document, DocumentReport, Gravity, ScoringConfig,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Builders
// ============================================================================

struct DocBuilder {
    sources: Vec<Value>,
    blocks: Vec<Value>,
    citations: Vec<Value>,
    claims: Vec<Value>,
}

impl DocBuilder {
    fn new() -> Self {
        Self {
            sources: vec![],
            blocks: vec![],
            citations: vec![],
            claims: vec![],
        }
    }

    fn source(mut self, id: &str, url: Option<&str>, source_type: Option<&str>) -> Self {
        self.sources.push(json!({
            "source_id": id, "url": url, "title": null, "authors": [], "year": 2020,
            "source_type": source_type,
        }));
        self
    }

    fn block(mut self, id: &str, content: &str) -> Self {
        self.blocks.push(json!({"anchor_id": id, "content": content}));
        self
    }

    fn cite(mut self, anchor: &str, source: &str) -> Self {
        self.citations.push(json!({
            "intext_anchor_id": anchor, "raw_identifier": format!("[{source}]"),
            "resolved_source_id": source,
        }));
        self
    }

    fn claim(mut self, id: &str, gravity: &str, anchor: &str, text: &str) -> Self {
        self.claims.push(json!({
            "claim_id": id, "allegation_gravity": gravity,
            "claim_statement": {"anchor_id": anchor, "text": text},
        }));
        self.blocks.push(json!({"anchor_id": anchor, "content": text}));
        self
    }

    fn build(self) -> Document {
        let value = json!({
            "source_registry": self.sources,
            "stage1_markdown_parse": {"pages": [
                {"text_blocks": self.blocks, "citations_found": self.citations}
            ]},
            "stage2_claim_extraction": {"attribution_claims": self.claims},
        });
        Document::from_json_value(value).expect("valid test document")
    }
}

const CLAIM_A: &str = "GRU Unit 26165 conducted the intrusion into the DNC network in 2016.";
const EVIDENCE_A: &str = "Forensic analysis of malware recovered from the DNC network identified \
    implants whose servers were leased by GRU Unit 26165 officers during the 2016 intrusion.";

const CLAIM_B: &str = "Sandworm operators deployed the NotPetya wiper against Ukrainian banks.";
const EVIDENCE_B: &str = "Researchers analysed NotPetya wiper samples deployed against Ukrainian \
    banks and identified Sandworm tooling, command and control servers, and shared code with \
    earlier campaigns.";

fn two_claim_document() -> Document {
    DocBuilder::new()
        .source("GOV", Some("https://www.justice.gov/opa/indictment"), None)
        .source("NGO", Some("https://www.accessnow.org/report"), Some("ngo"))
        .claim("A", "high", "a.claim", CLAIM_A)
        .claim("B", "high", "b.claim", CLAIM_B)
        .block("a.ev", EVIDENCE_A)
        .block("b.ev", EVIDENCE_B)
        .cite("a.ev", "GOV")
        .cite("b.ev", "NGO")
        .build()
}

fn score(doc: &Document) -> DocumentReport {
    score_document(doc, &ScoringConfig::default())
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn belief_is_fifty_when_support_meets_high_threshold() {
    let cfg = ScoringConfig::default();
    let b = belief(0.85, Gravity::High.required_threshold(), cfg.belief_steepness);
    assert_relative_eq!(b, 50.0, epsilon = 1e-9);
}

#[test]
fn evidence_is_selected_per_claim() {
    let report = score(&two_claim_document());
    let ids = |i: usize| -> Vec<&str> {
        report.claims[i].evidence.iter().map(|e| e.anchor_id.as_str()).collect()
    };
    assert_eq!(ids(0), vec!["a.ev"]);
    assert_eq!(ids(1), vec!["b.ev"]);
}

#[test]
fn single_gov_source_gets_single_source_penalty() {
    let report = score(&two_claim_document());
    let a = &report.claims[0];
    let cred = &a.score_details.credibility;
    assert_eq!(cred.eligible_source_count, 1);
    assert_eq!(cred.single_source_penalty, Some(0.85));
    let base = 0.55 * 0.75 + 0.20 * 0.75 + 0.15 / 3.0 + 0.10;
    assert_relative_eq!(a.scores.credibility_raw_0_100, 100.0 * base * 0.85, epsilon = 1e-9);
}

#[test]
fn calibration_scales_by_weighted_share_of_credible_claims() {
    let report = score(&two_claim_document());
    assert_relative_eq!(report.calibration.credible_claims_weighted_ratio, 0.5);
    for c in &report.claims {
        assert_relative_eq!(
            c.scores.credibility_0_100,
            c.scores.credibility_raw_0_100 * 0.5,
            epsilon = 1e-12
        );
        assert!(c.score_details.calibration.is_some());
    }
    // Single-source claims are never corroborated, so nothing survives calibration.
    assert_eq!(report.calibration.corroborated_claims_weighted_ratio, 0.0);
    for c in &report.claims {
        assert_eq!(c.scores.corroboration_0_100, 0.0);
    }
}

#[test]
fn calibration_ratio_is_gravity_weighted() {
    let doc = DocBuilder::new()
        .source("GOV", Some("https://www.justice.gov/opa/indictment"), None)
        .source("NGO", Some("https://www.accessnow.org/report"), Some("ngo"))
        .claim("A", "exceptional", "a.claim", CLAIM_A)
        .claim("B", "low", "b.claim", CLAIM_B)
        .block("a.ev", EVIDENCE_A)
        .block("b.ev", EVIDENCE_B)
        .cite("a.ev", "GOV")
        .cite("b.ev", "NGO")
        .build();
    let report = score(&doc);
    // exceptional = 2.0, low = 1.0
    assert_relative_eq!(report.calibration.credible_claims_weighted_ratio, 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(report.calibration.total_gravity_weight, 3.0);
}

#[test]
fn recomputed_belief_uses_calibrated_scores() {
    let report = score(&two_claim_document());
    let cfg = ScoringConfig::default();
    for c in &report.claims {
        let s = &c.scores;
        let ew = 0.30 * s.custody_0_100
            + 0.25 * s.credibility_0_100
            + 0.25 * s.corroboration_0_100
            + 0.20 * s.grounding_0_100;
        assert_relative_eq!(s.evidence_weight_0_100, ew, epsilon = 1e-9);
        let support = (ew / 100.0) * (s.clarity_0_100 / 100.0);
        assert_relative_eq!(s.evidence_support_0_1, support, epsilon = 1e-12);
        assert_relative_eq!(
            s.belief_0_100,
            belief(support, c.required_threshold_0_1, cfg.belief_steepness),
            epsilon = 1e-9
        );
    }
}

#[test]
fn claim_without_sources_scores_zero_credibility_and_corroboration() {
    let doc = DocBuilder::new()
        .source("GOV", Some("https://www.justice.gov/opa/indictment"), None)
        .claim("A", "medium", "a.claim", CLAIM_A)
        .block("a.ev", EVIDENCE_A)
        .build();
    let report = score(&doc);
    let a = &report.claims[0];
    assert_eq!(a.scores.credibility_0_100, 0.0);
    assert_eq!(a.scores.corroboration_0_100, 0.0);
    assert_eq!(a.score_details.credibility.eligible_source_count, 0);
    assert_eq!(a.score_details.corroboration.eligible_source_count, 0);
    assert_eq!(a.score_details.credibility.status, "ineligible");
}

#[test]
fn claim_with_no_evidence_still_scores() {
    let doc = DocBuilder::new()
        .claim("A", "low", "a.claim", CLAIM_A)
        .build();
    let report = score(&doc);
    let a = &report.claims[0];
    assert!(a.evidence.is_empty());
    assert_eq!(a.scores.grounding_0_100, 0.0);
    assert_eq!(a.scores.custody_0_100, 0.0);
    assert!(a.scores.belief_0_100 > 0.0);
    assert_eq!(report.document_scores.citation_coverage_sources_0_1, 0.0);
}

#[test]
fn citation_coverage_counts_distinct_cited_sources() {
    let doc = DocBuilder::new()
        .source("S1", Some("https://www.justice.gov/a"), None)
        .source("S2", Some("https://www.un.org/b"), None)
        .source("S3", Some("https://www.rand.org/c"), None)
        .claim("A", "high", "a.claim", CLAIM_A)
        .block("a.ev", EVIDENCE_A)
        .cite("a.ev", "S1")
        .cite("a.claim", "S1")
        .build();
    let report = score(&doc);
    assert_relative_eq!(report.document_scores.citation_coverage_sources_0_1, 1.0 / 3.0);
    assert_eq!(report.document_scores.sources_total, 3);
    assert_eq!(report.document_scores.citations_total, 2);
}

#[test]
fn urls_in_anchor_text_become_citations() {
    let evidence = format!("{EVIDENCE_A} See https://www.justice.gov/opa/indictment/ for the filing.");
    let doc = DocBuilder::new()
        .source("GOV", Some("https://www.justice.gov/opa/indictment"), None)
        .claim("A", "high", "a.claim", CLAIM_A)
        .block("a.ev", &evidence)
        .build();
    let report = score(&doc);
    assert_eq!(report.document_scores.synthesized_citations_total, 1);
    assert_eq!(report.document_scores.citation_coverage_sources_0_1, 1.0);
    assert_eq!(
        report.claims[0].score_details.credibility.eligible_source_count,
        1
    );
}

#[test]
fn state_claim_without_link_vocabulary_is_gap_penalized() {
    let claim = "The intrusion campaign is attributed to State X's Ministry of State Security \
                 and its operators.";
    let evidence = "Investigators recovered malware from compromised servers and traced the \
                    intrusion campaign to infrastructure registered through a reseller used by \
                    the operators.";
    let doc = DocBuilder::new()
        .claim("A", "high", "a.claim", claim)
        .block("a.ev", evidence)
        .build();
    let report = score(&doc);
    let a = &report.claims[0];
    assert_eq!(a.evidence.len(), 1);
    let clarity = &a.score_details.clarity;
    assert!(clarity.claim_names_state_actor);
    assert_eq!(clarity.state_actor_gap_penalty, 0.35);
    let factor = 1.0 - clarity.state_actor_gap_penalty - clarity.legal_gap_penalty;
    assert_relative_eq!(a.scores.clarity_0_100, 100.0 * clarity.base * factor, epsilon = 1e-9);
}

#[test]
fn document_belief_is_gravity_weighted() {
    let report = score(&two_claim_document());
    let w: f64 = report.claims.iter().map(|c| c.gravity_weight).sum();
    let expected: f64 = report
        .claims
        .iter()
        .map(|c| c.gravity_weight * c.scores.belief_0_100)
        .sum::<f64>()
        / w;
    assert_relative_eq!(report.document_scores.belief_weighted_0_100, expected, epsilon = 1e-9);
    assert_eq!(report.document_scores.claims_total, 2);
}

#[test]
fn empty_claim_set_produces_empty_report() {
    let doc = DocBuilder::new()
        .source("S1", Some("https://www.justice.gov/a"), None)
        .block("x", "Some text.")
        .build();
    let report = score(&doc);
    assert!(report.claims.is_empty());
    assert_eq!(report.document_scores.belief_weighted_0_100, 0.0);
    assert_eq!(report.calibration.total_gravity_weight, 0.0);
}

#[test]
fn scoring_is_deterministic() {
    let doc = two_claim_document();
    let a = score(&doc).to_json_string(false).unwrap();
    let b = score(&doc).to_json_string(false).unwrap();
    assert_eq!(a, b);
}

#[test]
fn report_json_shape() {
    let v = score(&two_claim_document()).to_json_value().unwrap();
    assert_eq!(v["report_type"], "icj_score_report");
    assert_eq!(v["report_version"], "v3");
    for key in [
        "belief_weighted_0_100",
        "grounding_avg_0_100",
        "custody_avg_0_100",
        "credibility_avg_0_100",
        "corroboration_avg_0_100",
        "confidence_avg_0_100",
        "clarity_avg_0_100",
        "citation_coverage_sources_0_1",
        "sources_total",
        "citations_total",
    ] {
        assert!(v["document_scores"].get(key).is_some(), "missing {key}");
    }
    let claim = &v["claims"][0];
    for key in [
        "claim_id",
        "allegation_gravity",
        "required_threshold_0_1",
        "gravity_weight",
        "claim_statement",
        "evidence",
        "scores",
        "score_details",
    ] {
        assert!(claim.get(key).is_some(), "missing {key}");
    }
    assert_eq!(claim["allegation_gravity"], "high");
    assert!(claim["evidence"][0].get("tokens").is_none());
}

// ============================================================================
// Properties
// ============================================================================

const POOL: &[&str] = &[
    "gru", "unit", "ministry", "state", "intrusion", "malware", "server", "servers", "forensic",
    "analysis", "hash", "seized", "custody", "directed", "by", "on", "behalf", "of", "likely",
    "high", "confidence", "may", "network", "campaign", "operators", "territory", "knew",
    "failed", "to", "corroborated", "independently", "witness", "bank", "payment", "2016",
    "45.32.129.185", "evil.com", "version", "signed", "the", "and",
];

fn text_strategy(min: usize, max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(POOL), min..max).prop_map(|w| w.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn all_scores_stay_in_range(
        claim in text_strategy(6, 14),
        blocks in proptest::collection::vec(text_strategy(10, 40), 1..8),
        gravity in prop_oneof![Just("low"), Just("medium"), Just("high"), Just("exceptional")],
        cite_mask in proptest::collection::vec(0usize..4, 8),
    ) {
        let mut b = DocBuilder::new()
            .source("GOV", Some("https://www.justice.gov/a"), None)
            .source("UN", Some("https://www.un.org/b"), None)
            .source("PRESS", Some("https://www.nytimes.com/c"), None)
            .claim("C", gravity, "claim", &claim);
        for (i, text) in blocks.iter().enumerate() {
            let id = format!("b{i}");
            b = b.block(&id, text);
            match cite_mask[i] {
                1 => b = b.cite(&id, "GOV"),
                2 => b = b.cite(&id, "UN"),
                3 => b = b.cite(&id, "PRESS"),
                _ => {}
            }
        }
        let report = score(&b.build());
        let s = &report.claims[0].scores;
        for v in [
            s.grounding_0_100, s.custody_0_100, s.credibility_0_100, s.credibility_raw_0_100,
            s.corroboration_0_100, s.corroboration_raw_0_100, s.confidence_0_100,
            s.clarity_0_100, s.evidence_weight_0_100,
        ] {
            prop_assert!((0.0..=100.0).contains(&v), "score out of range: {}", v);
        }
        prop_assert!((0.0..=1.0).contains(&s.evidence_support_0_1));
        prop_assert!(s.belief_0_100 > 0.0 && s.belief_0_100 < 100.0);
        let cal = &report.calibration;
        prop_assert!((0.0..=1.0).contains(&cal.credible_claims_weighted_ratio));
        prop_assert!((0.0..=1.0).contains(&cal.corroborated_claims_weighted_ratio));
        prop_assert!(report.claims[0].evidence.len() <= 8);
    }
}
