//! Fixed lexicons used by the scorers.
//!
//! Every lexicon is plain data owned by a [`Vocabulary`] value; nothing here
//! is process-global. Tests and callers substitute their own vocabularies by
//! constructing one directly or by deserializing a partial override (missing
//! fields fall back to the built-in defaults).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::lexical::words;

// ============================================================================
// TermSet
// ============================================================================

/// A set of words or multi-word phrases matched against lowercased word runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TermSet {
    terms: Vec<String>,
    phrases: Vec<Vec<String>>,
}

impl From<Vec<String>> for TermSet {
    fn from(terms: Vec<String>) -> Self {
        let phrases = terms
            .iter()
            .map(|t| words(t))
            .filter(|p| !p.is_empty())
            .collect();
        Self { terms, phrases }
    }
}

impl From<TermSet> for Vec<String> {
    fn from(set: TermSet) -> Self {
        set.terms
    }
}

impl TermSet {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(terms.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Total occurrences of every phrase in `text_words`.
    pub fn count(&self, text_words: &[String]) -> usize {
        self.phrases
            .iter()
            .map(|phrase| count_phrase(text_words, phrase))
            .sum()
    }

    pub fn matches_any(&self, text_words: &[String]) -> bool {
        self.phrases
            .iter()
            .any(|phrase| count_phrase(text_words, phrase) > 0)
    }
}

fn count_phrase(text_words: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > text_words.len() {
        return 0;
    }
    text_words
        .windows(phrase.len())
        .filter(|w| w.iter().zip(phrase).all(|(a, b)| a == b))
        .count()
}

// ============================================================================
// Stop words
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StopWords(HashSet<String>);

impl From<Vec<String>> for StopWords {
    fn from(v: Vec<String>) -> Self {
        Self(v.into_iter().map(|w| w.to_lowercase()).collect())
    }
}

impl From<StopWords> for Vec<String> {
    fn from(s: StopWords) -> Self {
        let mut v: Vec<String> = s.0.into_iter().collect();
        v.sort();
        v
    }
}

impl StopWords {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(words.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

// ============================================================================
// Stated confidence
// ============================================================================

/// A phrase that states a confidence level, e.g. "high confidence" → 0.85.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatedLevel {
    pub phrase: String,
    pub level: f64,
}

impl StatedLevel {
    fn new(phrase: &str, level: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            level,
        }
    }
}

// ============================================================================
// Vocabulary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub stop_words: StopWords,
    /// General evidentiary language; feeds evidence selection and grounding.
    pub evidence: TermSet,
    pub custody: TermSet,
    pub integrity: TermSet,
    pub versioning: TermSet,
    pub confidence: TermSet,
    pub hedging: TermSet,
    pub stated_levels: Vec<StatedLevel>,
    pub cross_check: TermSet,
    /// Evidentiary modality → terms; diversity counts distinct modalities hit.
    pub modalities: BTreeMap<String, TermSet>,
    pub act: TermSet,
    pub actor: TermSet,
    /// Language tying an actor to a state; the state-actor gap checks this.
    pub state_link: TermSet,
    pub state_actor: TermSet,
    pub control: TermSet,
    pub knowledge: TermSet,
    pub territorial: TermSet,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stop_words: StopWords::from_words([
                "a", "an", "the", "and", "or", "but", "if", "then", "than", "so", "as", "of",
                "in", "on", "at", "by", "for", "with", "about", "to", "from", "into", "onto",
                "up", "out", "over", "under", "is", "are", "was", "were", "be", "been", "being",
                "have", "has", "had", "do", "does", "did", "will", "would", "could", "should",
                "can", "this", "that", "these", "those", "it", "its", "they", "them", "their",
                "he", "she", "his", "her", "we", "our", "us", "you", "your", "i", "which", "who",
                "whom", "whose", "what", "when", "where", "also", "such", "not", "no", "any",
                "all", "each", "other", "some", "more", "most", "very", "there", "here",
            ]),
            evidence: TermSet::new([
                "evidence", "forensic", "forensics", "analysis", "analysed", "analyzed", "malware",
                "sample", "samples", "indicator", "indicators", "infrastructure", "server",
                "servers", "ip", "domain", "domains", "log", "logs", "telemetry", "artifact",
                "artifacts", "artefact", "artefacts", "payload", "implant", "backdoor", "c2",
                "command and control", "intercept", "intercepted", "investigation", "investigators",
                "observed", "identified", "confirmed", "traced", "recovered", "documents",
                "records", "testimony", "witness", "imagery", "code", "signature", "hash",
            ]),
            custody: TermSet::new([
                "chain of custody", "custody", "collected", "seized", "preserved", "acquired",
                "obtained", "retrieved", "recovered", "handed over", "transferred", "imaged",
                "forensic image", "forensic copy", "extraction", "extracted", "provenance",
                "original", "evidence bag", "logged", "sealed",
            ]),
            integrity: TermSet::new([
                "hash", "hashes", "hashed", "sha256", "sha 256", "sha1", "sha 1", "md5",
                "checksum", "digital signature", "signature", "signed", "write blocker",
                "write blocked", "integrity", "tamper", "tampering", "verified", "pgp",
                "certificate", "timestamped",
            ]),
            versioning: TermSet::new([
                "version", "versions", "revision", "revised", "updated", "amended", "release",
                "build", "compiled", "compilation", "changelog", "variant",
            ]),
            confidence: TermSet::new([
                "confidence", "confident", "assess", "assessed", "assessment", "judge", "judged",
                "likely", "unlikely", "probably", "probable", "almost certainly", "certainly",
                "likelihood", "probability", "we believe",
            ]),
            hedging: TermSet::new([
                "may", "might", "could", "possibly", "possible", "appears", "appear", "suggests",
                "suggest", "uncertain", "uncertainty", "unclear", "unconfirmed", "alleged",
                "allegedly", "reportedly", "limited", "limitation", "limitations", "gap", "gaps",
                "cannot", "caveat", "preliminary", "insufficient", "not yet", "remains unknown",
            ]),
            stated_levels: vec![
                StatedLevel::new("almost certainly", 0.95),
                StatedLevel::new("beyond reasonable doubt", 0.95),
                StatedLevel::new("high confidence", 0.85),
                StatedLevel::new("highly likely", 0.85),
                StatedLevel::new("very likely", 0.85),
                StatedLevel::new("likely", 0.7),
                StatedLevel::new("probably", 0.65),
                StatedLevel::new("moderate confidence", 0.6),
                StatedLevel::new("medium confidence", 0.6),
                StatedLevel::new("low confidence", 0.3),
                StatedLevel::new("unlikely", 0.25),
            ],
            cross_check: TermSet::new([
                "corroborated", "corroborate", "corroborates", "independently", "independent",
                "confirmed by", "consistent with", "cross checked", "cross referenced",
                "separately", "also reported", "matches", "matched", "overlap", "multiple sources",
            ]),
            modalities: default_modalities(),
            act: TermSet::new([
                "intrusion", "intrusions", "attack", "attacks", "operation", "operations",
                "campaign", "breach", "compromise", "compromised", "exfiltration", "exfiltrated",
                "espionage", "sabotage", "disruption", "deployed", "hacked", "hacking", "targeted",
                "ddos", "ransomware", "wiper", "phishing", "spearphishing", "interference",
            ]),
            actor: TermSet::new([
                "group", "apt", "unit", "agency", "service", "ministry", "directorate",
                "intelligence", "military", "actor", "actors", "operators", "hackers",
                "contractor", "front company", "officers", "personnel", "gru", "fsb", "svr", "mss",
                "pla", "rgb", "irgc",
            ]),
            state_link: TermSet::new([
                "on behalf of", "directed by", "under the direction", "at the direction",
                "tasked by", "sponsored by", "state sponsored", "acting for", "instructed by",
                "controlled by", "affiliated with", "employed by", "officers of", "members of",
                "working for", "paid by", "funded by", "ordered by",
            ]),
            state_actor: TermSet::new([
                "state", "government", "ministry", "military", "armed forces", "intelligence service",
                "security service", "general staff", "directorate", "state organ", "officials",
                "gru", "fsb", "svr", "mss", "pla", "rgb", "irgc", "kremlin",
            ]),
            control: TermSet::new([
                "effective control", "overall control", "directed", "direction", "instructions",
                "instructed", "controlled", "command", "commanded", "tasked", "tasking", "ordered",
                "funded", "financed", "equipped", "planned", "supervised", "coordinated",
            ]),
            knowledge: TermSet::new([
                "knew", "known", "knowledge", "aware", "awareness", "notified", "warned",
                "informed", "failed to", "failure to", "did not act", "did not prevent", "omission",
                "tolerated", "allowed", "refused", "negligence", "due diligence",
            ]),
            territorial: TermSet::new([
                "territory", "territorial", "jurisdiction", "within its borders", "hosted",
                "located in", "based in", "operating from", "from its territory", "soil",
                "national infrastructure", "servers in",
            ]),
        }
    }
}

fn default_modalities() -> BTreeMap<String, TermSet> {
    let mut m = BTreeMap::new();
    m.insert(
        "technical".to_string(),
        TermSet::new([
            "malware", "ip", "server", "hash", "infrastructure", "code", "binary", "domain",
            "telemetry", "logs",
        ]),
    );
    m.insert(
        "human".to_string(),
        TermSet::new(["witness", "testimony", "defector", "interview", "informant", "confession"]),
    );
    m.insert(
        "documentary".to_string(),
        TermSet::new(["document", "documents", "records", "email", "emails", "invoice", "contract", "leaked"]),
    );
    m.insert(
        "signals".to_string(),
        TermSet::new(["intercept", "intercepted", "communications", "sigint", "calls", "messages"]),
    );
    m.insert(
        "financial".to_string(),
        TermSet::new(["payment", "payments", "bitcoin", "cryptocurrency", "bank", "wire transfer"]),
    );
    m.insert(
        "open_source".to_string(),
        TermSet::new(["social media", "satellite", "imagery", "public", "published", "posted"]),
    );
    m
}

impl Vocabulary {
    /// Highest stated confidence level appearing in `text_words`, if any.
    pub fn max_stated_level(&self, text_words: &[String]) -> Option<f64> {
        self.stated_levels
            .iter()
            .filter(|s| {
                let phrase = words(&s.phrase);
                count_phrase(text_words, &phrase) > 0
            })
            .map(|s| s.level)
            .reduce(f64::max)
    }

    /// Names of the modality categories with at least one hit.
    pub fn modalities_hit(&self, text_words: &[String]) -> Vec<String> {
        self.modalities
            .iter()
            .filter(|(_, terms)| terms.matches_any(text_words))
            .map(|(name, _)| name.clone())
            .collect()
    }
}
