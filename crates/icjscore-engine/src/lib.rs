//! Evidence-relative belief scoring for attribution claims.
//!
//! Given a parsed dossier (text anchors, citations, a source registry) and
//! the attribution claims extracted from it, score each claim on six axes:
//! - **Grounding**: distinct, well-cited supporting anchors
//! - **Custody**: collection, integrity, timing, identifiers, versioning
//! - **Credibility**: quality of the eligible sources behind the evidence
//! - **Corroboration**: independent sources, gated on quantity
//! - **Confidence**: stated certainty vs. computed support
//! - **Clarity**: act/actor/link specificity and legal paths to responsibility
//!
//! The axes combine into an evidence weight and a sigmoid belief against a
//! gravity-dependent threshold. A second, document-wide pass calibrates
//! credibility and corroboration before aggregation.
//!
//! The engine performs no I/O: JSON text in, [`DocumentReport`] out.

pub mod calibration;
pub mod claim;
pub mod config;
pub mod error;
pub mod evidence;
pub mod index;
pub mod input;
pub mod lexical;
pub mod report;
pub mod scores;
pub mod sources;
pub mod vocab;

pub use calibration::{calibrate, ClaimCalibration, DocumentCalibration};
pub use claim::{belief, score_claim, score_claims, ScoreBundle, ScoreDetails, ScoredClaim};
pub use config::ScoringConfig;
pub use error::{InputError, InputResult};
pub use evidence::{select_evidence, EvidenceAnchor};
pub use index::DocumentIndex;
pub use input::{Citation, Claim, ClaimStatement, Document, Gravity, Source, TextBlock};
pub use report::{aggregate, ClaimReport, DocumentReport, DocumentScores};
pub use sources::{profile_source, ProfileKind, SourceCategory, SourceProfile};
pub use vocab::{TermSet, Vocabulary};

/// Score a validated document: index, per-claim pass, calibration, aggregation.
pub fn score_document(doc: &Document, config: &ScoringConfig) -> DocumentReport {
    let index = DocumentIndex::build(doc);
    tracing::info!(
        sources = doc.sources.len(),
        anchors = doc.anchors.len(),
        citations = index.citations().len(),
        synthesized = index.synthesized_count(),
        claims = doc.claims.len(),
        "indexed document"
    );
    let first_pass = score_claims(&index, config);
    let (claims, calibration) = calibrate(first_pass, config);
    aggregate(&index, claims, calibration)
}

/// Parse and score an input JSON document.
pub fn score_json(text: &str, config: &ScoringConfig) -> InputResult<DocumentReport> {
    let doc = Document::from_json_str(text)?;
    Ok(score_document(&doc, config))
}
