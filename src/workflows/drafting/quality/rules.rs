use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::{IssueCode, IssueSeverity, ValidationIssue};

/// A word must repeat this many times before the repetition rule fires.
const REPETITION_THRESHOLD: usize = 5;

/// Every rule group except placeholders requires recurrence before flagging.
const RECURRENCE_THRESHOLD: usize = 2;

struct RuleGroup {
    code: IssueCode,
    severity: IssueSeverity,
    message: &'static str,
    pattern: &'static str,
}

const RULE_GROUPS: &[RuleGroup] = &[
    RuleGroup {
        code: IssueCode::VagueLanguage,
        severity: IssueSeverity::Warning,
        message: "Vague quantifiers weaken the answer; replace words like 'several' and \
                  'significant' with actual figures",
        pattern: r"(?i)\b(several|various|numerous|many|some|significant|substantial|a number of|a variety of)\b",
    },
    RuleGroup {
        code: IssueCode::PassiveVoice,
        severity: IssueSeverity::Suggestion,
        message: "Repeated passive constructions; prefer active voice naming who acts",
        pattern: r"(?i)\b(was|were|been|being|is|are)\s+\w+ed\b",
    },
    RuleGroup {
        code: IssueCode::WeakVerbs,
        severity: IssueSeverity::Warning,
        message: "Uncertain verbs ('might', 'hope to', 'attempt to') undercut credibility; \
                  state what the organization will do",
        pattern: r"(?i)\b(might|may|could|hope to|hopes to|try to|attempt to|seek to|aim to|we believe|we feel|we think)\b",
    },
    RuleGroup {
        code: IssueCode::FillerPhrases,
        severity: IssueSeverity::Suggestion,
        message: "Filler phrases ('in order to', 'it is important to note') consume the word \
                  budget without adding substance",
        pattern: r"(?i)\b(in order to|it is important to note|it should be noted|needless to say|at the end of the day|the fact that)\b",
    },
];

const PLACEHOLDER_PATTERN: &str =
    r"(?i)(\[[^\]\n]{1,60}\])|\b(TBD|TODO|XXX|PLACEHOLDER|INSERT [A-Z])\b|lorem ipsum";

fn compiled_rules() -> &'static Vec<(usize, Regex)> {
    static RULES: OnceLock<Vec<(usize, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_GROUPS
            .iter()
            .enumerate()
            .map(|(idx, group)| {
                (idx, Regex::new(group.pattern).expect("static rule pattern compiles"))
            })
            .collect()
    })
}

fn placeholder_rule() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("static rule pattern compiles"))
}

const STOPWORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "will", "their", "they", "them", "then", "than",
    "would", "could", "should", "about", "which", "there", "these", "those", "been", "were",
    "when", "what", "your", "also", "into", "over", "such", "each", "more", "most", "other",
    "very", "through", "because", "where", "while", "within", "across", "being", "after",
    "before", "between", "during", "under", "every",
];

/// Run every heuristic rule group over the text. Each group contributes at
/// most one issue; recurrence is required except for placeholders, which flag
/// on first occurrence.
pub fn detect_issues(text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if placeholder_rule().is_match(text) {
        issues.push(ValidationIssue {
            severity: IssueSeverity::Error,
            code: IssueCode::UnresolvedPlaceholder,
            message: "Unresolved placeholder text remains in the answer".to_string(),
        });
    }

    for (idx, pattern) in compiled_rules() {
        let group = &RULE_GROUPS[*idx];
        let occurrences = pattern.find_iter(text).count();
        if occurrences >= RECURRENCE_THRESHOLD {
            issues.push(ValidationIssue {
                severity: group.severity,
                code: group.code,
                message: format!("{} ({occurrences} occurrences)", group.message),
            });
        }
    }

    if let Some((word, count)) = most_repeated_word(text) {
        if count >= REPETITION_THRESHOLD {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Suggestion,
                code: IssueCode::WordRepetition,
                message: format!("The word '{word}' appears {count} times; vary the phrasing"),
            });
        }
    }

    issues
}

/// Frequency analysis over non-stopwords longer than 3 characters. Ties break
/// alphabetically so repeated runs report the same word.
fn most_repeated_word(text: &str) -> Option<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in text.to_lowercase().split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if word.len() > 3 && !STOPWORDS.contains(&word) {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
}
