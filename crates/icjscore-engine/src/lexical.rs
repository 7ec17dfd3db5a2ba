//! Lexical utilities shared by every scoring stage.
//!
//! Everything here is pure and allocation-light: whitespace normalization,
//! tokenization, set similarity, URL normalization, and the regex counters
//! used as a proxy for forensic specificity.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

use crate::vocab::StopWords;

/// Characters stripped from the end of a URL lifted out of running text.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\'', '*'];

// ============================================================================
// Whitespace / tokens
// ============================================================================

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased alphanumeric words, stop words kept.
///
/// This is the view used for phrase matching, where stop words matter
/// ("on behalf of", "failed to").
pub fn words(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Lowercase, split on non-alphanumeric runs, drop stop words.
pub fn tokenize(s: &str, stop_words: &StopWords) -> Vec<String> {
    words(s)
        .into_iter()
        .filter(|w| !stop_words.contains(w))
        .collect()
}

pub fn token_set(tokens: &[String]) -> HashSet<String> {
    tokens.iter().cloned().collect()
}

/// `|a ∩ b| / |a ∪ b|`.
///
/// Callers guarantee at least one side is non-empty; two empty sets are a
/// precondition violation and yield NaN.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    debug_assert!(!(a.is_empty() && b.is_empty()), "jaccard on two empty sets");
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

pub fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}

// ============================================================================
// URLs
// ============================================================================

/// Normalize a URL for registry matching.
///
/// Strips trailing punctuation, lowercases scheme and host, drops query and
/// fragment, and strips a trailing slash from the path. Returns `None` for
/// anything that does not parse as an absolute URL with a host.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(URL_TRAILING_PUNCTUATION);
    let parsed = Url::parse(trimmed).ok()?;
    let host = parsed.host_str()?;

    let mut out = format!("{}://{}", parsed.scheme(), host.to_ascii_lowercase());
    if let Some(port) = parsed.port() {
        out.push_str(&format!(":{port}"));
    }
    out.push_str(parsed.path().trim_end_matches('/'));
    Some(out)
}

/// Registrable-ish host of a URL: lowercased, leading `www.` removed.
pub fn domain_of(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(URL_TRAILING_PUNCTUATION);
    let parsed = Url::parse(trimmed).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)https?://[^\s<>"'\[\]\(\)\{\}]+"#).expect("valid url regex"))
}

/// URL-shaped substrings in running text, in order of appearance.
pub fn extract_urls(text: &str) -> Vec<&str> {
    url_regex().find_iter(text).map(|m| m.as_str()).collect()
}

// ============================================================================
// Forensic identifiers / temporal anchors
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierCounts {
    pub hashes: usize,
    pub ipv4: usize,
    pub domains: usize,
}

impl IdentifierCounts {
    pub fn total(&self) -> usize {
        self.hashes + self.ipv4 + self.domains
    }
}

fn hash_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:[a-f0-9]{64}|[a-f0-9]{40}|[a-f0-9]{32})\b").expect("valid hash regex")
    })
}

fn ipv4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\b",
        )
        .expect("valid ipv4 regex")
    })
}

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}\b")
            .expect("valid domain regex")
    })
}

/// Count hash-like tokens, dotted-quad IPv4 addresses, and domain-like tokens.
pub fn count_identifiers(text: &str) -> IdentifierCounts {
    IdentifierCounts {
        hashes: hash_regex().find_iter(text).count(),
        ipv4: ipv4_regex().find_iter(text).count(),
        domains: domain_regex().find_iter(text).count(),
    }
}

fn temporal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let month = "(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
        let pattern = format!(
            r"(?i)\b(?:\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}\s+{month}\.?\s+\d{{4}}|{month}\.?\s+\d{{1,2}},?\s+\d{{4}}|{month}\.?\s+\d{{4}}|\d{{1,2}}:\d{{2}}(?::\d{{2}})?(?:\s*(?:utc|gmt|z))?)\b"
        );
        Regex::new(&pattern).expect("valid temporal regex")
    })
}

/// Count dates and clock times (ISO, day-month-year, month-day-year, month-year, hh:mm).
pub fn count_temporal_markers(text: &str) -> usize {
    temporal_regex().find_iter(text).count()
}

// ============================================================================
// Numeric helpers
// ============================================================================

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// `min(value / cap, 1)`, zero for a non-positive cap.
pub fn saturate(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    clamp01(value / cap)
}

pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
