use std::sync::OnceLock;

use regex::Regex;

use super::domain::word_count;

/// Fraction of a word limit that a sentence-boundary truncation must preserve
/// before falling back to a mid-sentence cut.
const SENTENCE_KEEP_RATIO: f64 = 0.7;

fn preamble_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // "Here is a draft answer:" / "Here's the response you asked for:"
            r"(?i)^\s*(here is|here's|here are|below is)[^:\n]*:\s*",
            // "Based on the information provided, ..."
            r"(?i)^\s*based on (the|your|this)[^,\n]*,\s*",
            // "Certainly! ..." / "Sure, ..." / "Of course. ..."
            r"(?i)^\s*(certainly|sure|of course|absolutely)[,!.]\s*",
            // "As requested, ..."
            r"(?i)^\s*as requested[,:]\s*",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static preamble pattern compiles"))
        .collect()
    })
}

fn blank_line_run() -> &'static Regex {
    static RUN: OnceLock<Regex> = OnceLock::new();
    RUN.get_or_init(|| Regex::new(r"\n{3,}").expect("static pattern compiles"))
}

/// Clean raw model output: strip AI preambles, collapse blank-line runs, then
/// enforce character and word limits. Word-limit truncation prefers the
/// nearest sentence boundary that keeps at least 70% of the allowed words.
pub fn clean_response(raw: &str, word_limit: Option<usize>, char_limit: Option<usize>) -> String {
    let mut text = raw.trim().to_string();

    for pattern in preamble_patterns() {
        if let Some(matched) = pattern.find(&text) {
            if matched.start() == 0 {
                text = text[matched.end()..].trim_start().to_string();
                break;
            }
        }
    }

    text = blank_line_run().replace_all(&text, "\n\n").into_owned();
    let mut text = text.trim().to_string();

    if let Some(limit) = char_limit {
        if text.chars().count() > limit {
            text = text
                .chars()
                .take(limit.saturating_sub(1))
                .collect::<String>()
                .trim_end()
                .to_string();
            text.push('…');
        }
    }

    if let Some(limit) = word_limit {
        if word_count(&text) > limit {
            text = truncate_at_sentence(&text, limit);
        }
    }

    text
}

/// Truncate to at most `limit` words, cutting at the latest sentence boundary
/// that still keeps `SENTENCE_KEEP_RATIO` of the limit. Only when no such
/// boundary exists is the text cut mid-sentence.
fn truncate_at_sentence(text: &str, limit: usize) -> String {
    let min_words = (limit as f64 * SENTENCE_KEEP_RATIO).ceil() as usize;

    let mut kept = String::new();
    let mut kept_words = 0;
    for sentence in sentences(text) {
        let words = word_count(sentence);
        if kept_words + words > limit {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(sentence);
        kept_words += words;
    }

    if kept_words >= min_words {
        return kept;
    }

    // No usable boundary; fall back to a hard word cut.
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Deterministic select-option matching by keyword overlap against the mapped
/// organization data. Ties resolve to the earliest option; returns `None` when
/// nothing overlaps, in which case the model is consulted.
pub fn select_by_overlap(options: &[String], context: &[String]) -> Option<String> {
    let haystack = context.join(" ").to_lowercase();

    let mut best: Option<(usize, &String)> = None;
    for option in options {
        let score: usize = option
            .to_lowercase()
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| word.len() > 3 && haystack.contains(word))
            .count();
        if score > 0 && best.map(|(top, _)| score > top).unwrap_or(true) {
            best = Some((score, option));
        }
    }

    best.map(|(_, option)| option.clone())
}

/// Validate a model's select reply against the literal option list. The reply
/// must match an option case-insensitively or it is rejected.
pub fn match_option_reply(options: &[String], reply: &str) -> Option<String> {
    let normalized = reply.trim().trim_matches('"');
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(normalized))
        .cloned()
}
