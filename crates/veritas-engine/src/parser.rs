//! Turns raw model output into a normalized [`AnalysisVerdict`].
//!
//! Modeled as an ordered list of parse strategies: party-mode JSON first
//! (party requests only), labeled-text extraction second, and a total
//! raw-text fallback last. Each strategy returns `Option`; the first
//! success wins, so parsing never fails — it only degrades.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use veritas_core::types::{AnalysisMode, AnalysisVerdict, CriteriaScores, Verdict};

use crate::prompt::{BREAKDOWN_MARKER, EXPLANATION_MARKER, SIGNALS_MARKER};

static VERDICT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)VERDICT:\s*(TRUTH|DECEPTION)").expect("verdict regex"));
static CONFIDENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CONFIDENCE:\s*(\d+)").expect("confidence regex"));

const SECTION_MARKERS: [&str; 3] = [BREAKDOWN_MARKER, SIGNALS_MARKER, EXPLANATION_MARKER];

/// Keys the party-mode prompt asks the model to emit. All optional so a
/// partially conforming object still decodes; the external `judgment` key
/// maps to the internal `explanation` field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartyWire {
    verdict: Option<String>,
    confidence: Option<i64>,
    scores: Option<CriteriaScores>,
    total_score: Option<f64>,
    breakdown: Option<String>,
    signals: Option<String>,
    judgment: Option<String>,
    tip: Option<String>,
}

/// Parse raw model output into a normalized verdict. Never fails.
pub fn parse_verdict(raw_text: &str, mode: AnalysisMode) -> AnalysisVerdict {
    if mode == AnalysisMode::Party {
        if let Some(verdict) = parse_party_json(raw_text) {
            return verdict;
        }
    }
    if let Some(verdict) = parse_labeled_text(raw_text) {
        return verdict;
    }
    raw_fallback(raw_text)
}

/// Strategy 1: strict JSON, tolerating a surrounding fenced code block.
fn parse_party_json(raw_text: &str) -> Option<AnalysisVerdict> {
    let stripped = strip_code_fences(raw_text);
    let wire: PartyWire = serde_json::from_str(stripped).ok()?;

    Some(AnalysisVerdict {
        verdict: wire
            .verdict
            .as_deref()
            .map(Verdict::from_label)
            .unwrap_or_default(),
        confidence: clamp_confidence(wire.confidence.unwrap_or(50)),
        scores: wire.scores,
        total_score: wire.total_score.unwrap_or(0.0),
        breakdown: wire.breakdown.unwrap_or_default(),
        signals: wire.signals.unwrap_or_default(),
        explanation: wire.judgment.unwrap_or_default(),
        tip: wire.tip.unwrap_or_default(),
        raw_text: raw_text.to_string(),
    })
}

/// Strategy 2: labeled plain text. Succeeds when at least one label or
/// section marker matched; scores stay empty on this path.
fn parse_labeled_text(raw_text: &str) -> Option<AnalysisVerdict> {
    let verdict = VERDICT_RE
        .captures(raw_text)
        .map(|c| Verdict::from_label(&c[1]));
    let confidence = CONFIDENCE_RE
        .captures(raw_text)
        .and_then(|c| c[1].parse::<i64>().ok());
    let breakdown = extract_section(raw_text, BREAKDOWN_MARKER);
    let signals = extract_section(raw_text, SIGNALS_MARKER);
    let explanation = extract_section(raw_text, EXPLANATION_MARKER);

    if verdict.is_none()
        && confidence.is_none()
        && breakdown.is_none()
        && signals.is_none()
        && explanation.is_none()
    {
        return None;
    }

    Some(AnalysisVerdict {
        verdict: verdict.unwrap_or_default(),
        confidence: clamp_confidence(confidence.unwrap_or(50)),
        scores: None,
        total_score: 0.0,
        breakdown: breakdown.unwrap_or_default(),
        signals: signals.unwrap_or_default(),
        explanation: explanation.unwrap_or_default(),
        tip: String::new(),
        raw_text: raw_text.to_string(),
    })
}

/// Strategy 3 (total): the caller always gets the literal model output
/// back, in `breakdown`, with the UNKNOWN/50 defaults.
fn raw_fallback(raw_text: &str) -> AnalysisVerdict {
    AnalysisVerdict {
        breakdown: raw_text.to_string(),
        raw_text: raw_text.to_string(),
        ..AnalysisVerdict::default()
    }
}

/// Remove surrounding fenced-code-block lines (``` with an optional
/// language tag) so the JSON underneath can be decoded.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the rest of the fence line (e.g. a "json" tag).
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[newline + 1..].trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Slice out the text between `marker` and the next known marker (or end
/// of text).
fn extract_section(raw: &str, marker: &str) -> Option<String> {
    let start = raw.find(marker)? + marker.len();
    let rest = &raw[start..];
    let end = SECTION_MARKERS
        .iter()
        .filter_map(|m| rest.find(m))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

fn clamp_confidence(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_text_full_layout() {
        let raw = "VERDICT: DECEPTION\nCONFIDENCE: 87%\n🎯 THE BREAKDOWN:\nThey paused oddly.\n🔍 SUSPICIOUS SIGNALS:\nFiller words.\n💡 THE VERDICT EXPLAINED:\nBusted!";
        let v = parse_verdict(raw, AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Deception);
        assert_eq!(v.confidence, 87);
        assert_eq!(v.breakdown, "They paused oddly.");
        assert_eq!(v.signals, "Filler words.");
        assert_eq!(v.explanation, "Busted!");
        assert!(v.scores.is_none());
        assert_eq!(v.total_score, 0.0);
        assert!(v.tip.is_empty());
        assert_eq!(v.raw_text, raw);
    }

    #[test]
    fn party_json_inside_code_fence() {
        let raw = "```json\n{\"verdict\":\"TRUTH\",\"confidence\":91,\"scores\":{\"deception\":7.2,\"conviction\":8.8,\"creativity\":6.1,\"detail\":9.0,\"entertainment\":8.4},\"totalScore\":39.5,\"breakdown\":\"Solid.\",\"signals\":\"None.\",\"judgment\":\"Believable!\",\"tip\":\"Blink less.\"}\n```";
        let v = parse_verdict(raw, AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Truth);
        assert_eq!(v.confidence, 91);
        let scores = v.scores.expect("scores present");
        assert_eq!(scores.creativity, 6.1);
        assert_eq!(scores.detail, 9.0);
        assert_eq!(v.total_score, 39.5);
        assert_eq!(v.breakdown, "Solid.");
        assert_eq!(v.signals, "None.");
        assert_eq!(v.explanation, "Believable!");
        assert_eq!(v.tip, "Blink less.");
        assert_eq!(v.raw_text, raw);
    }

    #[test]
    fn party_json_without_fence() {
        let raw = r#"{"verdict":"DECEPTION","confidence":66,"judgment":"Caught."}"#;
        let v = parse_verdict(raw, AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Deception);
        assert_eq!(v.confidence, 66);
        assert_eq!(v.explanation, "Caught.");
        // Absent keys take their defaults.
        assert!(v.scores.is_none());
        assert_eq!(v.total_score, 0.0);
        assert!(v.breakdown.is_empty());
        assert!(v.tip.is_empty());
    }

    #[test]
    fn party_json_empty_object_is_all_defaults() {
        let v = parse_verdict("{}", AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Unknown);
        assert_eq!(v.confidence, 50);
        assert!(v.scores.is_none());
    }

    #[test]
    fn party_invalid_json_falls_back_to_labels() {
        let raw = "not json at all, but VERDICT: TRUTH and CONFIDENCE: 73 anyway";
        let v = parse_verdict(raw, AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Truth);
        assert_eq!(v.confidence, 73);
    }

    #[test]
    fn party_garbage_lands_in_raw_fallback() {
        let raw = "The model rambled with no structure whatsoever.";
        let v = parse_verdict(raw, AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Unknown);
        assert_eq!(v.confidence, 50);
        assert_eq!(v.breakdown, raw);
        assert_eq!(v.raw_text, raw);
    }

    #[test]
    fn standard_mode_ignores_valid_json() {
        // Outside party mode the JSON strategy never runs.
        let raw = r#"{"verdict":"TRUTH","confidence":90}"#;
        let v = parse_verdict(raw, AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Unknown);
        assert_eq!(v.confidence, 50);
        assert_eq!(v.breakdown, raw);
    }

    #[test]
    fn labels_are_case_insensitive() {
        let v = parse_verdict("verdict: truth\nconfidence: 64", AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Truth);
        assert_eq!(v.confidence, 64);
    }

    #[test]
    fn partial_labels_keep_defaults() {
        let v = parse_verdict("VERDICT: DECEPTION\nno confidence given", AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Deception);
        assert_eq!(v.confidence, 50);

        let v = parse_verdict("CONFIDENCE: 42", AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Unknown);
        assert_eq!(v.confidence, 42);
    }

    #[test]
    fn confidence_clamped_to_range() {
        let v = parse_verdict("VERDICT: TRUTH\nCONFIDENCE: 250", AnalysisMode::Standard);
        assert_eq!(v.confidence, 100);

        let v = parse_verdict(r#"{"confidence": -5}"#, AnalysisMode::Party);
        assert_eq!(v.confidence, 0);

        let v = parse_verdict(r#"{"confidence": 400}"#, AnalysisMode::Party);
        assert_eq!(v.confidence, 100);
    }

    #[test]
    fn absurdly_long_confidence_digits_degrade_to_default() {
        let raw = "VERDICT: TRUTH\nCONFIDENCE: 99999999999999999999999999";
        let v = parse_verdict(raw, AnalysisMode::Standard);
        assert_eq!(v.verdict, Verdict::Truth);
        assert_eq!(v.confidence, 50);
    }

    #[test]
    fn section_runs_to_end_of_text_without_next_marker() {
        let raw = "🎯 THE BREAKDOWN:\nOnly a breakdown here, nothing after.";
        let v = parse_verdict(raw, AnalysisMode::Standard);
        assert_eq!(v.breakdown, "Only a breakdown here, nothing after.");
        assert!(v.signals.is_empty());
        assert!(v.explanation.is_empty());
    }

    #[test]
    fn sections_tolerate_reordering() {
        let raw = "💡 THE VERDICT EXPLAINED:\nLast first.\n🎯 THE BREAKDOWN:\nMiddle.\n🔍 SUSPICIOUS SIGNALS:\nEnd.";
        let v = parse_verdict(raw, AnalysisMode::Standard);
        assert_eq!(v.explanation, "Last first.");
        assert_eq!(v.breakdown, "Middle.");
        assert_eq!(v.signals, "End.");
    }

    #[test]
    fn strip_fences_variants() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json\n{\"a\":1}\n```  "), "{\"a\":1}");
        // Unterminated fence still exposes the body.
        assert_eq!(strip_code_fences("```json\n{\"a\":1}"), "{\"a\":1}");
        // A bare fence with no newline is left alone.
        assert_eq!(strip_code_fences("```"), "```");
    }

    #[test]
    fn never_fails_on_adversarial_inputs() {
        let inputs = [
            "",
            "   \n\n  ",
            "```",
            "```json",
            "null",
            "[1,2,3]",
            "\"just a string\"",
            "VERDICT:",
            "🎯 THE BREAKDOWN:",
            "{\"scores\": \"not an object\"}",
        ];
        for (i, raw) in inputs.iter().enumerate() {
            for mode in [AnalysisMode::Standard, AnalysisMode::Party] {
                let v = parse_verdict(raw, mode);
                assert!(
                    matches!(v.verdict, Verdict::Truth | Verdict::Deception | Verdict::Unknown),
                    "input {i} produced an invalid verdict"
                );
                assert!(v.confidence <= 100);
                assert_eq!(v.raw_text, *raw);
            }
        }
    }

    #[test]
    fn malformed_scores_object_drops_to_next_strategy() {
        // `scores` with the wrong type makes the strict decode fail; the
        // labels inside the same text still win on the next strategy.
        let raw = "{\"scores\": 12} VERDICT: DECEPTION";
        let v = parse_verdict(raw, AnalysisMode::Party);
        assert_eq!(v.verdict, Verdict::Deception);
        assert!(v.scores.is_none());
    }

    #[test]
    fn party_partial_scores_default_to_zero() {
        let raw = r#"{"verdict":"TRUTH","scores":{"deception":3.3}}"#;
        let v = parse_verdict(raw, AnalysisMode::Party);
        let scores = v.scores.expect("scores present");
        assert_eq!(scores.deception, 3.3);
        assert_eq!(scores.conviction, 0.0);
    }
}
