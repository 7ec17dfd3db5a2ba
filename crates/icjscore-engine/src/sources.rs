//! Source profiling: classify a registry entry into a credibility /
//! corroboration category with a weight and an eligibility flag.
//!
//! Declared `source_type` wins; domain and title heuristics are the fallback.
//! Ineligible sources stay in the audit trail but never enter a denominator.

use serde::{Deserialize, Serialize};

use crate::input::Source;
use crate::lexical::{domain_of, words};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    AutoSourceOrInternal,
    Newspaper,
    InternationalInstitution,
    Judicial,
    OfficialGovernment,
    Ngo,
    PeerReviewedAcademic,
    ThinkTank,
    Other,
}

impl SourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceCategory::AutoSourceOrInternal => "auto_source_or_internal",
            SourceCategory::Newspaper => "newspaper",
            SourceCategory::InternationalInstitution => "international_institution",
            SourceCategory::Judicial => "judicial",
            SourceCategory::OfficialGovernment => "official_government",
            SourceCategory::Ngo => "ngo",
            SourceCategory::PeerReviewedAcademic => "peer_reviewed_academic",
            SourceCategory::ThinkTank => "think_tank",
            SourceCategory::Other => "other",
        }
    }
}

/// Which scorer the profile is tuned for. The two differ only in the NGO and
/// think-tank weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Credibility,
    Corroboration,
}

impl ProfileKind {
    fn weight(self, category: SourceCategory) -> f64 {
        use SourceCategory::*;
        match (category, self) {
            (AutoSourceOrInternal | Newspaper, _) => 0.0,
            (InternationalInstitution | Judicial | PeerReviewedAcademic, _) => 1.0,
            (OfficialGovernment, _) => 0.75,
            (Ngo, ProfileKind::Credibility) => 0.65,
            (Ngo, ProfileKind::Corroboration) => 0.6,
            (ThinkTank, ProfileKind::Credibility) => 0.7,
            (ThinkTank, ProfileKind::Corroboration) => 0.5,
            (Other, _) => 0.3,
        }
    }
}

fn is_eligible(category: SourceCategory) -> bool {
    !matches!(
        category,
        SourceCategory::AutoSourceOrInternal | SourceCategory::Newspaper
    )
}

/// A classified source, kept per claim for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    pub source_id: String,
    pub label: SourceCategory,
    pub weight: f64,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl SourceProfile {
    /// Domain used for independence counting; a source without one counts
    /// as its own domain.
    pub fn independence_key(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| format!("source:{}", self.source_id))
    }
}

// ============================================================================
// Pattern lists
// ============================================================================

const NEWSPAPER_DOMAINS: &[&str] = &[
    "nytimes.com", "washingtonpost.com", "theguardian.com", "bbc.co.uk", "bbc.com",
    "reuters.com", "apnews.com", "wsj.com", "ft.com", "bloomberg.com", "cnn.com",
    "lemonde.fr", "spiegel.de", "economist.com", "politico.com", "politico.eu",
    "theatlantic.com", "aljazeera.com", "nbcnews.com", "cbsnews.com", "abcnews.go.com",
    "washingtontimes.com", "telegraph.co.uk", "independent.co.uk", "zeit.de", "faz.net",
    "theverge.com", "wired.com", "arstechnica.com", "vice.com", "axios.com",
];

const INTERNATIONAL_DOMAINS: &[&str] = &[
    "un.org", "nato.int", "europa.eu", "oecd.org", "osce.org", "icj-cij.org", "icc-cpi.int",
    "coe.int", "ohchr.org", "itu.int", "unodc.org", "unidir.org", "interpol.int", "enisa.europa.eu",
];

const INTERNATIONAL_KEYWORDS: &[&str] = &[
    "united nations", "nato", "european union", "oecd", "security council", "osce",
    "council of europe", "international court", "general assembly",
];

const GOVERNMENT_SUFFIXES: &[&str] = &[".gov", ".mil"];
const GOVERNMENT_INFIXES: &[&str] = &[".gov.", ".gouv.", ".mil.", ".gc.ca", ".bund.de", ".admin.ch"];

const GOVERNMENT_KEYWORDS: &[&str] = &[
    "ministry of", "department of", "government", "national cyber security centre",
    "federal bureau of investigation", "cybersecurity and infrastructure security agency",
    "foreign office", "white house", "attorney general",
];

const THINK_TANK_DOMAINS: &[&str] = &[
    "rand.org", "csis.org", "brookings.edu", "chathamhouse.org", "carnegieendowment.org",
    "atlanticcouncil.org", "cfr.org", "iiss.org", "rusi.org", "belfercenter.org", "heritage.org",
    "cnas.org", "ecfr.eu", "swp-berlin.org", "ifri.org", "aspi.org.au", "lawfaremedia.org",
];

const THINK_TANK_KEYWORDS: &[&str] = &[
    "think tank", "institute for", "policy institute", "council on", "centre for strategic",
    "center for strategic", "policy brief", "policy paper", "atlantic council",
];

const ACADEMIC_SUFFIXES: &[&str] = &[".edu"];
const ACADEMIC_INFIXES: &[&str] = &[".ac.", ".edu."];

const ACADEMIC_DOMAINS: &[&str] = &[
    "springer.com", "sciencedirect.com", "jstor.org", "tandfonline.com", "wiley.com",
    "cambridge.org", "academic.oup.com", "sagepub.com", "doi.org", "nature.com", "acm.org",
    "ieee.org", "muse.jhu.edu", "elsevier.com",
];

const ACADEMIC_KEYWORDS: &[&str] = &[
    "journal", "peer-reviewed", "peer reviewed", "university", "proceedings", "law review",
];

fn domain_matches(domain: &str, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|c| domain == *c || domain.ends_with(&format!(".{c}")))
}

fn ends_with_any(domain: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| domain.ends_with(s))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Whole-word keyword match; `title` must come from [`padded_words`].
fn title_mentions(title: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|k| title.contains(&padded_words(k)))
}

/// Lowercased words joined by single spaces, padded with a space each side.
fn padded_words(s: &str) -> String {
    format!(" {} ", words(s).join(" "))
}

fn looks_like_think_tank(domain: Option<&str>, title: &str) -> bool {
    domain.is_some_and(|d| domain_matches(d, THINK_TANK_DOMAINS))
        || title_mentions(title, THINK_TANK_KEYWORDS)
}

// ============================================================================
// Classification
// ============================================================================

fn classify_declared(source_type: &str, domain: Option<&str>, title: &str) -> Option<SourceCategory> {
    let category = match source_type.trim().to_ascii_lowercase().as_str() {
        "internal_document_section" => SourceCategory::AutoSourceOrInternal,
        "press_media" => SourceCategory::Newspaper,
        "international_institution" => SourceCategory::InternationalInstitution,
        "judicial" => SourceCategory::Judicial,
        "government" => SourceCategory::OfficialGovernment,
        "ngo" => SourceCategory::Ngo,
        "academic" if looks_like_think_tank(domain, title) => SourceCategory::ThinkTank,
        "academic" => SourceCategory::PeerReviewedAcademic,
        _ => return None,
    };
    Some(category)
}

fn classify_heuristic(domain: &str, title: &str) -> SourceCategory {
    if domain_matches(domain, NEWSPAPER_DOMAINS) {
        return SourceCategory::Newspaper;
    }
    if ends_with_any(domain, GOVERNMENT_SUFFIXES)
        || contains_any(domain, GOVERNMENT_INFIXES)
        || title_mentions(title, GOVERNMENT_KEYWORDS)
    {
        return SourceCategory::OfficialGovernment;
    }
    if domain_matches(domain, INTERNATIONAL_DOMAINS)
        || domain.ends_with(".int")
        || title_mentions(title, INTERNATIONAL_KEYWORDS)
    {
        return SourceCategory::InternationalInstitution;
    }
    if looks_like_think_tank(Some(domain), title) {
        return SourceCategory::ThinkTank;
    }
    if ends_with_any(domain, ACADEMIC_SUFFIXES)
        || contains_any(domain, ACADEMIC_INFIXES)
        || domain_matches(domain, ACADEMIC_DOMAINS)
        || title_mentions(title, ACADEMIC_KEYWORDS)
    {
        return SourceCategory::PeerReviewedAcademic;
    }
    SourceCategory::Other
}

/// Classify a source for the given scorer.
pub fn profile_source(source: &Source, kind: ProfileKind) -> SourceProfile {
    let domain = source.url.as_deref().and_then(domain_of);
    let title = padded_words(source.title.as_deref().unwrap_or_default());

    let declared = source
        .source_type
        .as_deref()
        .and_then(|t| classify_declared(t, domain.as_deref(), &title));

    let label = match (declared, domain.as_deref()) {
        (Some(category), _) => category,
        (None, Some(d)) => classify_heuristic(d, &title),
        (None, None) => SourceCategory::AutoSourceOrInternal,
    };

    SourceProfile {
        source_id: source.source_id.clone(),
        label,
        weight: kind.weight(label),
        eligible: is_eligible(label),
        domain,
    }
}

/// Profile every source, keeping input order.
pub fn profile_sources<'a, I>(sources: I, kind: ProfileKind) -> Vec<SourceProfile>
where
    I: IntoIterator<Item = &'a Source>,
{
    sources.into_iter().map(|s| profile_source(s, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(url: Option<&str>, title: &str, source_type: Option<&str>) -> Source {
        Source {
            source_id: "S".to_string(),
            url: url.map(String::from),
            title: Some(title.to_string()),
            authors: vec![],
            year: None,
            source_type: source_type.map(String::from),
        }
    }

    #[test]
    fn test_declared_type_wins() {
        let p = profile_source(
            &src(Some("https://nytimes.com/x"), "", Some("government")),
            ProfileKind::Credibility,
        );
        assert_eq!(p.label, SourceCategory::OfficialGovernment);
        assert_eq!(p.weight, 0.75);
        assert!(p.eligible);
    }

    #[test]
    fn test_academic_downgraded_to_think_tank() {
        let p = profile_source(
            &src(Some("https://www.rand.org/pubs/r1"), "Report", Some("academic")),
            ProfileKind::Corroboration,
        );
        assert_eq!(p.label, SourceCategory::ThinkTank);
        assert_eq!(p.weight, 0.5);
    }

    #[test]
    fn test_press_is_ineligible() {
        let p = profile_source(&src(None, "", Some("press_media")), ProfileKind::Credibility);
        assert_eq!(p.label, SourceCategory::Newspaper);
        assert!(!p.eligible);
        assert_eq!(p.weight, 0.0);
    }

    #[test]
    fn test_heuristics() {
        let cases = [
            ("https://www.theguardian.com/world/x", "", SourceCategory::Newspaper),
            ("https://www.justice.gov/opa/file", "", SourceCategory::OfficialGovernment),
            ("https://www.ncsc.gov.uk/news", "", SourceCategory::OfficialGovernment),
            ("https://www.nato.int/cps", "", SourceCategory::InternationalInstitution),
            ("https://digitallibrary.un.org/record", "", SourceCategory::InternationalInstitution),
            ("https://www.brookings.edu/articles/x", "", SourceCategory::ThinkTank),
            ("https://cyber.harvard.edu/paper", "", SourceCategory::PeerReviewedAcademic),
            ("https://example.org/x", "Journal of Cyber Policy", SourceCategory::PeerReviewedAcademic),
            ("https://example.org/x", "Blog post", SourceCategory::Other),
        ];
        for (url, title, expected) in cases {
            let p = profile_source(&src(Some(url), title, None), ProfileKind::Credibility);
            assert_eq!(p.label, expected, "{url}");
        }
    }

    #[test]
    fn test_title_keywords_match_whole_words() {
        let p = profile_source(
            &src(Some("https://example.org/x"), "A senator speaks", None),
            ProfileKind::Credibility,
        );
        assert_eq!(p.label, SourceCategory::Other);
    }

    #[test]
    fn test_no_url_no_type_is_internal() {
        let p = profile_source(&src(None, "Ministry of Defence", None), ProfileKind::Credibility);
        assert_eq!(p.label, SourceCategory::AutoSourceOrInternal);
        assert!(!p.eligible);
    }

    #[test]
    fn test_unrecognized_type_falls_back_to_heuristics() {
        let p = profile_source(
            &src(Some("https://www.osce.org/x"), "", Some("webpage")),
            ProfileKind::Credibility,
        );
        assert_eq!(p.label, SourceCategory::InternationalInstitution);
    }
}
