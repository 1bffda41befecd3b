//! Heuristic quality scoring for drafted answers: rule-based issue detection,
//! category requirement checks, and seven weighted metrics collapsing into a
//! single score and level.

pub mod requirements;
pub mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{word_count, QuestionCategory};
use requirements::requirements_for;

/// Issue severities. Only `Error` affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    WordLimitExceeded,
    UnresolvedPlaceholder,
    VagueLanguage,
    PassiveVoice,
    WeakVerbs,
    FillerPhrases,
    WordRepetition,
    BelowWordRange,
    AboveWordRange,
}

/// A single finding from validation, surfaced for human decision rather than
/// thrown as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub message: String,
}

/// Seven named sub-scores plus their weighted overall, all in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub clarity: u8,
    pub specificity: u8,
    pub relevance: u8,
    pub completeness: u8,
    pub professionalism: u8,
    pub persuasiveness: u8,
    pub compliance: u8,
    pub overall: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Excellent,
    Good,
    Acceptable,
    NeedsWork,
    Insufficient,
}

impl QualityLevel {
    /// Step function over the overall score. Thresholds are part of the
    /// public contract and covered by boundary tests.
    pub const fn from_score(score: u8) -> QualityLevel {
        if score >= 90 {
            QualityLevel::Excellent
        } else if score >= 75 {
            QualityLevel::Good
        } else if score >= 60 {
            QualityLevel::Acceptable
        } else if score >= 40 {
            QualityLevel::NeedsWork
        } else {
            QualityLevel::Insufficient
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub score: u8,
    pub level: QualityLevel,
    pub issues: Vec<ValidationIssue>,
    pub improvements: Vec<String>,
    pub strengths: Vec<String>,
    pub metrics: QualityMetrics,
    pub is_valid: bool,
}

impl QualityResult {
    /// Fixed assessment for verbatim profile copies: nothing was generated,
    /// so there is nothing heuristic to critique.
    pub fn direct_fill() -> Self {
        const DIRECT_SCORE: u8 = 95;
        Self {
            score: DIRECT_SCORE,
            level: QualityLevel::from_score(DIRECT_SCORE),
            issues: Vec::new(),
            improvements: Vec::new(),
            strengths: vec!["Verbatim organization data, no drafting risk".to_string()],
            metrics: QualityMetrics {
                clarity: DIRECT_SCORE,
                specificity: DIRECT_SCORE,
                relevance: DIRECT_SCORE,
                completeness: DIRECT_SCORE,
                professionalism: DIRECT_SCORE,
                persuasiveness: DIRECT_SCORE,
                compliance: DIRECT_SCORE,
                overall: DIRECT_SCORE,
            },
            is_valid: true,
        }
    }

    /// Assessment for sections with no usable content yet.
    pub fn insufficient() -> Self {
        Self {
            score: 0,
            level: QualityLevel::Insufficient,
            issues: Vec::new(),
            improvements: vec!["Provide an answer for this section".to_string()],
            strengths: Vec::new(),
            metrics: QualityMetrics {
                clarity: 0,
                specificity: 0,
                relevance: 0,
                completeness: 0,
                professionalism: 0,
                persuasiveness: 0,
                compliance: 0,
                overall: 0,
            },
            is_valid: true,
        }
    }
}

/// Penalty shared across all metrics, derived from issue counts.
fn issue_penalty(errors: usize, warnings: usize) -> u32 {
    ((errors as u32) * 15 + (warnings as u32) * 5).min(40)
}

fn clamp(value: i64, floor: u8) -> u8 {
    value.clamp(floor as i64, 100) as u8
}

const EVIDENTIARY: &[&str] = &[
    "data", "research", "evidence", "study", "studies", "survey", "according to", "documented",
    "demonstrated",
];

const OUTCOME_VERBS: &[&str] = &[
    "achieved", "increased", "reduced", "improved", "delivered", "expanded", "served",
    "strengthened", "completed", "launched",
];

const HEDGES: &[&str] = &["might", "maybe", "perhaps", "hopefully", "possibly", "sort of", "kind of"];

const SUPERLATIVES: &[&str] = &[
    "world-class", "best-in-class", "revolutionary", "amazing", "incredible", "unparalleled",
    "the best",
];

fn contains_count(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|needle| haystack.contains(*needle)).count()
}

/// Validate generated or user-provided text for one category. Pure function;
/// the same inputs always produce the same result.
pub fn validate(
    content: &str,
    category: QuestionCategory,
    word_limit: Option<usize>,
) -> QualityResult {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return QualityResult::insufficient();
    }

    let requirements = requirements_for(category);
    let words = word_count(trimmed);
    let lower = trimmed.to_lowercase();

    let mut issues = rules::detect_issues(trimmed);

    if let Some(limit) = word_limit {
        if words > limit {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Error,
                code: IssueCode::WordLimitExceeded,
                message: format!("Answer runs {words} words against a limit of {limit}"),
            });
        }
    }

    let (range_min, range_max) = requirements.word_range;
    if words < range_min {
        issues.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            code: IssueCode::BelowWordRange,
            message: format!(
                "Answers in this category usually run at least {range_min} words; this one has {words}"
            ),
        });
    } else if words > range_max {
        issues.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            code: IssueCode::AboveWordRange,
            message: format!(
                "Answers in this category usually stay under {range_max} words; this one has {words}"
            ),
        });
    }

    let mut improvements: Vec<String> = requirements
        .required
        .iter()
        .filter(|concept| !lower.contains(*concept))
        .map(|concept| format!("Address '{concept}' explicitly; reviewers look for it here"))
        .collect();

    let errors = issues.iter().filter(|i| i.severity == IssueSeverity::Error).count();
    let warnings = issues.iter().filter(|i| i.severity == IssueSeverity::Warning).count();
    let penalty = issue_penalty(errors, warnings) as i64;

    // clarity: sentence-length distribution.
    let sentence_count = trimmed
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
        .max(1);
    let avg_sentence_words = words / sentence_count;
    let clarity_base: i64 = match avg_sentence_words {
        12..=22 => 100,
        8..=11 | 23..=25 => 90,
        26..=30 => 75,
        0..=7 => 80,
        _ => 65,
    };
    let clarity = clamp(clarity_base - penalty, 50);

    // specificity: numeric, currency, and percentage signals.
    let mut specificity_base: i64 = 55;
    if lower.chars().any(|c| c.is_ascii_digit()) {
        specificity_base += 15;
    }
    if lower.contains('$') || lower.contains(" dollars") {
        specificity_base += 15;
    }
    if lower.contains('%') || lower.contains("percent") {
        specificity_base += 15;
    }
    let specificity = clamp(specificity_base - penalty, 40);

    // relevance: evidentiary language.
    let evidentiary_hits = contains_count(&lower, EVIDENTIARY);
    let mut relevance_base: i64 = 70;
    if evidentiary_hits >= 1 {
        relevance_base += 10;
    }
    if evidentiary_hits >= 3 {
        relevance_base += 10;
    }
    let relevance = clamp(relevance_base - penalty, 50);

    // completeness: word count against the category's expected range.
    let completeness_base: i64 = if words < range_min {
        ((words as f64 / range_min as f64) * 95.0).round() as i64
    } else if words > range_max {
        80
    } else {
        95
    };
    let completeness = clamp(completeness_base - penalty, 40);

    // professionalism: hedging, exclamations, superlatives.
    let hedge_hits = contains_count(&lower, HEDGES) as i64;
    let exclamations = trimmed.chars().filter(|c| *c == '!').count() as i64;
    let superlative_hits = contains_count(&lower, SUPERLATIVES) as i64;
    let professionalism_base: i64 =
        92 - (hedge_hits * 6).min(18) - (exclamations * 5).min(15) - (superlative_hits * 6).min(12);
    let professionalism = clamp(professionalism_base - penalty, 50);

    // persuasiveness: outcome and result verbs.
    let outcome_hits = contains_count(&lower, OUTCOME_VERBS) as i64;
    let persuasiveness = clamp(65 + (outcome_hits * 5).min(25) - penalty, 40);

    // compliance: inverse of the issue load itself.
    let compliance = clamp(100 - penalty, 40);

    let overall = (f64::from(clarity) * 0.15
        + f64::from(specificity) * 0.20
        + f64::from(relevance) * 0.15
        + f64::from(completeness) * 0.20
        + f64::from(professionalism) * 0.10
        + f64::from(persuasiveness) * 0.10
        + f64::from(compliance) * 0.10)
        .round() as u8;

    let mut strengths = Vec::new();
    let recommended_hits: Vec<&str> = requirements
        .recommended
        .iter()
        .copied()
        .filter(|concept| lower.contains(concept))
        .collect();
    if !recommended_hits.is_empty() {
        strengths.push(format!(
            "Covers themes reviewers favor here: {}",
            recommended_hits.join(", ")
        ));
    }
    if specificity >= 85 {
        strengths.push("Concrete figures back up the claims".to_string());
    }
    if persuasiveness >= 85 {
        strengths.push("Results language makes the case actively".to_string());
    }
    if professionalism >= 90 {
        strengths.push("Confident, professional register".to_string());
    }
    if clarity >= 95 {
        strengths.push("Sentences are easy to follow".to_string());
    }

    if specificity < 70 {
        improvements.push("Add concrete numbers, dollar figures, or percentages".to_string());
    }
    if evidentiary_hits == 0 {
        improvements.push("Cite data or research supporting the claims".to_string());
    }

    QualityResult {
        score: overall,
        level: QualityLevel::from_score(overall),
        issues,
        improvements,
        strengths,
        metrics: QualityMetrics {
            clarity,
            specificity,
            relevance,
            completeness,
            professionalism,
            persuasiveness,
            compliance,
            overall,
        },
        is_valid: errors == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds_match_at_boundaries() {
        assert_eq!(QualityLevel::from_score(90), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(89), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(75), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(74), QualityLevel::Acceptable);
        assert_eq!(QualityLevel::from_score(60), QualityLevel::Acceptable);
        assert_eq!(QualityLevel::from_score(59), QualityLevel::NeedsWork);
        assert_eq!(QualityLevel::from_score(40), QualityLevel::NeedsWork);
        assert_eq!(QualityLevel::from_score(39), QualityLevel::Insufficient);
    }

    #[test]
    fn word_limit_overage_is_an_error_and_invalidates() {
        let content = (0..320).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let result = validate(&content, QuestionCategory::ProblemNeed, Some(250));
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.code == IssueCode::WordLimitExceeded
                && issue.severity == IssueSeverity::Error));
        assert!(!result.is_valid);
    }

    #[test]
    fn placeholder_invalidates() {
        let result = validate(
            "We will serve [NUMBER] families across the county this year.",
            QuestionCategory::Other,
            None,
        );
        assert!(!result.is_valid);
    }

    #[test]
    fn strong_answer_scores_good_or_better() {
        let content = "Greenfield Pantry delivered 48,000 meals in 2025, a 22% increase over the \
                       prior year. Our survey data documented need in 14 rural towns. The program \
                       increased weekly deliveries from 400 to 650 households. Staff achieved a \
                       97% on-time rate, and we reduced per-meal cost to $2.10.";
        let result = validate(content, QuestionCategory::TrackRecord, Some(250));
        assert!(result.is_valid);
        assert!(result.score >= 75, "score {}", result.score);
        assert!(result.metrics.specificity >= 85);
        assert!(!result.strengths.is_empty());
    }

    #[test]
    fn missing_required_concepts_become_improvements_not_errors() {
        let content = "Our team has run this effort for years and knows the families well. The \
                       staff coordinate weekly deliveries across the region.";
        let result = validate(content, QuestionCategory::EvaluationPlan, None);
        assert!(result.is_valid);
        assert!(result
            .improvements
            .iter()
            .any(|note| note.contains("'measure'") || note.contains("'data'")));
    }

    #[test]
    fn recommended_concepts_surface_as_strengths() {
        let content = "The community need is acute. Our research and survey data show one in \
                       six households skips meals weekly, about 17 percent of local families.";
        let result = validate(content, QuestionCategory::ProblemNeed, None);
        assert!(result
            .strengths
            .iter()
            .any(|note| note.contains("research") && note.contains("percent")));
    }

    #[test]
    fn validation_is_deterministic() {
        let content = "We serve 300 families with measurable outcomes tracked monthly.";
        let first = validate(content, QuestionCategory::EvaluationPlan, Some(200));
        let second = validate(content, QuestionCategory::EvaluationPlan, Some(200));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_content_is_insufficient() {
        let result = validate("   ", QuestionCategory::ProblemNeed, Some(100));
        assert_eq!(result.level, QualityLevel::Insufficient);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn direct_fill_is_excellent_95() {
        let result = QualityResult::direct_fill();
        assert_eq!(result.score, 95);
        assert_eq!(result.level, QualityLevel::Excellent);
        assert!(result.is_valid);
    }
}
