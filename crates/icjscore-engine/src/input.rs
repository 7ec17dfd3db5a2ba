//! Typed input records and boundary validation.
//!
//! The input is the JSON emitted by the upstream extraction stages. It is
//! parsed once into explicit records; a missing required field or a broken
//! uniqueness invariant is a hard [`InputError`], never a degraded score.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{InputError, InputResult};

// ============================================================================
// Sources
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Fractional(f64),
    Text(String),
}

/// A bibliographic entry in the document's source registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub source_id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Either a bare list of sources or `{"sources": [...]}`.
///
/// Branches on the JSON shape first so that an error inside an entry
/// (e.g. a missing `source_id`) surfaces as-is.
#[derive(Debug, Clone)]
struct SourceRegistry(Vec<Source>);

impl<'de> Deserialize<'de> for SourceRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = match Value::deserialize(deserializer)? {
            list @ Value::Array(_) => list,
            Value::Object(mut map) => map
                .remove("sources")
                .ok_or_else(|| D::Error::missing_field("sources"))?,
            other => {
                return Err(D::Error::custom(format!(
                    "source_registry must be a list or an object with `sources`, got {other}"
                )))
            }
        };
        serde_json::from_value(list)
            .map(SourceRegistry)
            .map_err(D::Error::custom)
    }
}

// ============================================================================
// Pages / anchors / citations
// ============================================================================

/// An addressable block of extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub anchor_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawCitation {
    #[serde(default)]
    citation_id: Option<String>,
    intext_anchor_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    raw_identifier: String,
    #[serde(default)]
    resolved_source_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Page {
    text_blocks: Vec<TextBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    citations_found: Vec<RawCitation>,
}

#[derive(Debug, Clone, Deserialize)]
struct MarkdownParse {
    pages: Vec<Page>,
}

/// A link from an in-text anchor to (possibly) a registry source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub citation_id: String,
    pub intext_anchor_id: String,
    pub raw_identifier: String,
    pub resolved_source_id: Option<String>,
    /// True when recovered from a URL embedded in anchor text.
    #[serde(default)]
    pub synthesized: bool,
}

// ============================================================================
// Claims
// ============================================================================

/// Severity of an allegation; sets both the evidentiary bar and the weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gravity {
    Low,
    Medium,
    High,
    Exceptional,
}

impl Gravity {
    /// Evidence support a claim must reach for belief to cross 50.
    pub fn required_threshold(self) -> f64 {
        match self {
            Gravity::Low => 0.55,
            Gravity::Medium => 0.70,
            Gravity::High => 0.85,
            Gravity::Exceptional => 0.95,
        }
    }

    /// Weight of the claim in document-level averages and calibration.
    pub fn weight(self) -> f64 {
        match self {
            Gravity::Low => 1.0,
            Gravity::Medium => 1.2,
            Gravity::High => 1.5,
            Gravity::Exceptional => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gravity::Low => "low",
            Gravity::Medium => "medium",
            Gravity::High => "high",
            Gravity::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gravity {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Gravity::Low),
            "medium" => Ok(Gravity::Medium),
            "high" => Ok(Gravity::High),
            "exceptional" => Ok(Gravity::Exceptional),
            _ => Err(InputError::UnknownGravity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gravity {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimStatement {
    pub anchor_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: String,
    pub allegation_gravity: Gravity,
    pub claim_statement: ClaimStatement,
}

#[derive(Debug, Clone, Deserialize)]
struct ClaimExtraction {
    attribution_claims: Vec<Claim>,
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct RawDocument {
    source_registry: SourceRegistry,
    stage1_markdown_parse: MarkdownParse,
    stage2_claim_extraction: ClaimExtraction,
}

/// A validated input document: flattened anchors and explicit citations,
/// in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub sources: Vec<Source>,
    pub anchors: Vec<TextBlock>,
    pub citations: Vec<Citation>,
    pub claims: Vec<Claim>,
}

impl Document {
    pub fn from_json_str(text: &str) -> InputResult<Self> {
        let raw: RawDocument = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn from_json_value(value: serde_json::Value) -> InputResult<Self> {
        let raw: RawDocument = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> InputResult<Self> {
        let sources = raw.source_registry.0;
        let mut seen = HashSet::new();
        for s in &sources {
            if !seen.insert(s.source_id.as_str()) {
                return Err(InputError::DuplicateSourceId(s.source_id.clone()));
            }
        }

        let mut anchors = Vec::new();
        let mut raw_citations = Vec::new();
        for page in raw.stage1_markdown_parse.pages {
            anchors.extend(page.text_blocks);
            raw_citations.extend(page.citations_found);
        }

        // Generated ids skip any number already taken by an explicit id.
        let explicit: HashSet<String> = raw_citations
            .iter()
            .filter_map(|c| c.citation_id.clone())
            .collect();
        let mut next = 0usize;
        let citations = raw_citations
            .into_iter()
            .map(|c| {
                let citation_id = c.citation_id.unwrap_or_else(|| loop {
                    next += 1;
                    let id = format!("CIT{next:04}");
                    if !explicit.contains(&id) {
                        break id;
                    }
                });
                Citation {
                    citation_id,
                    intext_anchor_id: c.intext_anchor_id,
                    raw_identifier: c.raw_identifier,
                    resolved_source_id: c.resolved_source_id.filter(|id| !id.trim().is_empty()),
                    synthesized: false,
                }
            })
            .collect();

        let mut seen = HashSet::new();
        for a in &anchors {
            if !seen.insert(a.anchor_id.as_str()) {
                return Err(InputError::DuplicateAnchorId(a.anchor_id.clone()));
            }
        }

        Ok(Self {
            sources,
            anchors,
            citations,
            claims: raw.stage2_claim_extraction.attribution_claims,
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
