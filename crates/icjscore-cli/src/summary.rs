//! Human-readable per-claim table.

use colored::{ColoredString, Colorize};
use icjscore_engine::DocumentReport;
use std::fmt::{self, Write};

fn belief_cell(belief: f64) -> ColoredString {
    let cell = format!("{belief:>6.1}");
    if belief >= 50.0 {
        cell.green().bold()
    } else if belief >= 20.0 {
        cell.yellow()
    } else {
        cell.red()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn render(report: &DocumentReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let header = format!(
        "{:<14} {:<11} {:>5} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "claim", "gravity", "thr", "grnd", "cust", "cred", "corr", "conf", "clar", "belief"
    );
    writeln!(out, "{}", header.bold())?;

    for c in &report.claims {
        let s = &c.scores;
        writeln!(
            out,
            "{:<14} {:<11} {:>5.2} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {}",
            truncate(&c.claim_id, 14),
            c.allegation_gravity.as_str(),
            c.required_threshold_0_1,
            s.grounding_0_100,
            s.custody_0_100,
            s.credibility_0_100,
            s.corroboration_0_100,
            s.confidence_0_100,
            s.clarity_0_100,
            belief_cell(s.belief_0_100),
        )?;
    }

    let d = &report.document_scores;
    writeln!(
        out,
        "{} belief(weighted)={} claims={} sources={} citations={} (synthesized={}) coverage={:.2}",
        "→".cyan(),
        belief_cell(d.belief_weighted_0_100),
        d.claims_total,
        d.sources_total,
        d.citations_total,
        d.synthesized_citations_total,
        d.citation_coverage_sources_0_1,
    )?;
    let cal = &report.calibration;
    writeln!(
        out,
        "{} calibration credible={:.2} corroborated={:.2}",
        "→".yellow(),
        cal.credible_claims_weighted_ratio,
        cal.corroborated_claims_weighted_ratio,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_ids() {
        assert_eq!(truncate("C1", 14), "C1");
        assert_eq!(truncate("abcdefghijklmnop", 5).chars().count(), 5);
    }

    #[test]
    fn test_render_empty_report() {
        colored::control::set_override(false);
        let report = icjscore_engine::score_json(
            r#"{"source_registry": [], "stage1_markdown_parse": {"pages": []},
                "stage2_claim_extraction": {"attribution_claims": []}}"#,
            &icjscore_engine::ScoringConfig::default(),
        )
        .unwrap();
        let text = render(&report).unwrap();
        assert!(text.starts_with("claim"));
        assert!(text.contains("claims=0"));
    }

    #[test]
    fn test_render_one_row_per_claim() {
        colored::control::set_override(false);
        let report = icjscore_engine::score_json(
            r#"{"source_registry": [], "stage1_markdown_parse": {"pages": [
                    {"text_blocks": [{"anchor_id": "a", "content": "GRU Unit 26165 conducted the intrusion."}]}
                ]},
                "stage2_claim_extraction": {"attribution_claims": [
                    {"claim_id": "C1", "allegation_gravity": "high",
                     "claim_statement": {"anchor_id": "a", "text": "GRU Unit 26165 conducted the intrusion."}},
                    {"claim_id": "C2", "allegation_gravity": "low",
                     "claim_statement": {"anchor_id": "a", "text": "GRU Unit 26165 conducted the intrusion."}}
                ]}}"#,
            &icjscore_engine::ScoringConfig::default(),
        )
        .unwrap();
        let text = render(&report).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().starts_with("C1"));
        assert!(text.lines().nth(2).unwrap().starts_with("C2"));
        assert!(text.contains("claims=2"));
    }
}
