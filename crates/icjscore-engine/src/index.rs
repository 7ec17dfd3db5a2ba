//! Document index: anchor lookup, citations grouped by anchor, and citations
//! synthesized from URLs embedded in anchor text.

use std::collections::{HashMap, HashSet};

use crate::input::{Citation, Document, Source, TextBlock};
use crate::lexical::{extract_urls, normalize_url};

/// Prefix of citation ids recovered from anchor-text URLs.
pub const SYNTHESIZED_CITATION_PREFIX: &str = "AUTOURL";

pub struct DocumentIndex<'a> {
    doc: &'a Document,
    anchor_pos: HashMap<&'a str, usize>,
    sources_by_id: HashMap<&'a str, &'a Source>,
    /// Explicit citations first, then synthesized ones.
    citations: Vec<Citation>,
    by_anchor: HashMap<String, Vec<usize>>,
    synthesized: usize,
}

impl<'a> DocumentIndex<'a> {
    pub fn build(doc: &'a Document) -> Self {
        let anchor_pos = doc
            .anchors
            .iter()
            .enumerate()
            .map(|(i, a)| (a.anchor_id.as_str(), i))
            .collect();
        let sources_by_id: HashMap<&str, &Source> = doc
            .sources
            .iter()
            .map(|s| (s.source_id.as_str(), s))
            .collect();

        for c in &doc.citations {
            if let Some(id) = &c.resolved_source_id {
                if !sources_by_id.contains_key(id.as_str()) {
                    tracing::warn!(
                        citation = %c.citation_id,
                        source = %id,
                        "citation resolves to a source missing from the registry"
                    );
                }
            }
        }

        let mut citations = doc.citations.clone();
        let synthesized = synthesize_url_citations(doc);
        let synthesized_count = synthesized.len();
        citations.extend(synthesized);

        let mut by_anchor: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, c) in citations.iter().enumerate() {
            by_anchor.entry(c.intext_anchor_id.clone()).or_default().push(i);
        }

        Self {
            doc,
            anchor_pos,
            sources_by_id,
            citations,
            by_anchor,
            synthesized: synthesized_count,
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Anchors in document order.
    pub fn anchors(&self) -> &'a [TextBlock] {
        &self.doc.anchors
    }

    pub fn anchor_text(&self, anchor_id: &str) -> Option<&'a str> {
        self.anchor_pos
            .get(anchor_id)
            .map(|&i| self.doc.anchors[i].content.as_str())
    }

    pub fn source(&self, source_id: &str) -> Option<&'a Source> {
        self.sources_by_id.get(source_id).copied()
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn synthesized_count(&self) -> usize {
        self.synthesized
    }

    pub fn citations_for(&self, anchor_id: &str) -> impl Iterator<Item = &Citation> + '_ {
        self.by_anchor
            .get(anchor_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.citations[i])
    }

    /// Registry sources cited from any of `anchor_ids`, deduplicated, in
    /// first-citation order. Citations that do not resolve are skipped.
    pub fn resolved_sources<'s, I>(&self, anchor_ids: I) -> Vec<&'a Source>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for anchor_id in anchor_ids {
            for c in self.citations_for(anchor_id) {
                let Some(id) = c.resolved_source_id.as_deref() else {
                    continue;
                };
                if let Some(source) = self.source(id) {
                    if seen.insert(source.source_id.as_str()) {
                        out.push(source);
                    }
                }
            }
        }
        out
    }

    /// Distinct registry source ids referenced by any citation.
    pub fn cited_source_ids(&self) -> HashSet<&str> {
        self.citations
            .iter()
            .filter_map(|c| c.resolved_source_id.as_deref())
            .filter(|id| self.sources_by_id.contains_key(id))
            .collect()
    }
}

/// Scan every anchor for URLs that match a registry source.
///
/// Each (anchor, normalized URL) pair yields at most one citation; ids are
/// sequential in document order.
fn synthesize_url_citations(doc: &Document) -> Vec<Citation> {
    let mut url_index: HashMap<String, &str> = HashMap::new();
    for s in &doc.sources {
        if let Some(norm) = s.url.as_deref().and_then(normalize_url) {
            url_index.entry(norm).or_insert(s.source_id.as_str());
        }
    }

    let mut seen: HashSet<(&str, String)> = HashSet::new();
    let mut out = Vec::new();
    for anchor in &doc.anchors {
        for raw in extract_urls(&anchor.content) {
            let Some(norm) = normalize_url(raw) else {
                continue;
            };
            let Some(&source_id) = url_index.get(&norm) else {
                tracing::debug!(anchor = %anchor.anchor_id, url = %norm, "embedded url matches no source");
                continue;
            };
            if !seen.insert((anchor.anchor_id.as_str(), norm)) {
                continue;
            }
            out.push(Citation {
                citation_id: format!("{SYNTHESIZED_CITATION_PREFIX}{:04}", out.len() + 1),
                intext_anchor_id: anchor.anchor_id.clone(),
                raw_identifier: raw.to_string(),
                resolved_source_id: Some(source_id.to_string()),
                synthesized: true,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Citation, Document, Source, TextBlock};

    fn source(id: &str, url: &str) -> Source {
        Source {
            source_id: id.to_string(),
            url: Some(url.to_string()),
            title: None,
            authors: vec![],
            year: None,
            source_type: None,
        }
    }

    fn block(id: &str, content: &str) -> TextBlock {
        TextBlock {
            anchor_id: id.to_string(),
            content: content.to_string(),
        }
    }

    fn doc() -> Document {
        Document {
            sources: vec![
                source("S1", "https://www.justice.gov/opa/indictment/"),
                source("S2", "https://example.org/report"),
            ],
            anchors: vec![
                block("a1", "See https://WWW.justice.gov/opa/indictment?x=1 and again https://www.justice.gov/opa/indictment."),
                block("a2", "Unrelated https://nowhere.net/page and https://example.org/report#s2"),
            ],
            citations: vec![Citation {
                citation_id: "CIT0001".to_string(),
                intext_anchor_id: "a2".to_string(),
                raw_identifier: "[2]".to_string(),
                resolved_source_id: Some("S2".to_string()),
                synthesized: false,
            }],
            claims: vec![],
        }
    }

    #[test]
    fn test_synthesized_citations_are_deduplicated_per_anchor() {
        let doc = doc();
        let idx = DocumentIndex::build(&doc);
        assert_eq!(idx.synthesized_count(), 2);
        let a1: Vec<_> = idx.citations_for("a1").collect();
        assert_eq!(a1.len(), 1);
        assert_eq!(a1[0].citation_id, "AUTOURL0001");
        assert_eq!(a1[0].resolved_source_id.as_deref(), Some("S1"));
        assert!(a1[0].synthesized);
    }

    #[test]
    fn test_resolved_sources_union_is_deduplicated() {
        let doc = doc();
        let idx = DocumentIndex::build(&doc);
        let ids: Vec<_> = idx
            .resolved_sources(["a2", "a1"])
            .into_iter()
            .map(|s| s.source_id.as_str())
            .collect();
        assert_eq!(ids, vec!["S2", "S1"]);
        assert_eq!(idx.cited_source_ids().len(), 2);
        assert_eq!(idx.citations().len(), 3);
    }

    #[test]
    fn test_anchor_lookup() {
        let doc = doc();
        let idx = DocumentIndex::build(&doc);
        assert!(idx.anchor_text("a1").is_some());
        assert!(idx.anchor_text("missing").is_none());
        assert_eq!(idx.citations_for("missing").count(), 0);
    }
}
