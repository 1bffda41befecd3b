use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FieldType, GeneratedResponse, SectionSpec};
use super::quality::IssueSeverity;

/// Application-wide verdict on submittability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Ready,
    NeedsWork,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    MissingInfo,
    Improvement,
    Warning,
}

/// Prioritized, per-section guidance for the reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub section_id: String,
    pub section_title: String,
    pub priority: SuggestionPriority,
    pub kind: SuggestionKind,
    pub message: String,
}

/// Roll-up across every section of one application. Always a pure function of
/// the current response set; recompute after any section changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationAggregate {
    pub completion_score: u8,
    pub overall_confidence: u8,
    pub missing_requirements: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub readiness: ReadinessLevel,
}

const LOW_QUALITY_THRESHOLD: u8 = 50;
const SHORT_NARRATIVE_WORDS: usize = 50;
const READY_SCORE: u8 = 75;
const NOT_READY_SCORE: u8 = 60;
const NOT_READY_ERRORS: usize = 2;

pub fn aggregate(
    sections: &[SectionSpec],
    responses: &BTreeMap<String, GeneratedResponse>,
) -> ApplicationAggregate {
    let mut total_required = 0usize;
    let mut completed_required = 0usize;
    let mut missing_requirements = Vec::new();
    let mut suggestions = Vec::new();
    let mut score_sum = 0u32;
    let mut scored = 0u32;
    let mut error_count = 0usize;

    for section in sections {
        let response = responses.get(&section.id);
        let completed = response
            .map(|r| !r.content.trim().is_empty() && !r.needs_user_input)
            .unwrap_or(false);

        if section.required {
            total_required += 1;
            if completed {
                completed_required += 1;
            } else {
                missing_requirements.push(section.title.clone());
            }
        }

        let Some(response) = response else {
            continue;
        };

        score_sum += u32::from(response.quality.score);
        scored += 1;
        error_count += response
            .quality
            .issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count();

        if response.needs_user_input {
            suggestions.push(Suggestion {
                section_id: section.id.clone(),
                section_title: section.title.clone(),
                priority: SuggestionPriority::High,
                kind: SuggestionKind::MissingInfo,
                message: format!(
                    "'{}' needs information the organization profile does not have yet",
                    section.title
                ),
            });
        } else if response.quality.score < LOW_QUALITY_THRESHOLD {
            suggestions.push(Suggestion {
                section_id: section.id.clone(),
                section_title: section.title.clone(),
                priority: SuggestionPriority::Medium,
                kind: SuggestionKind::Improvement,
                message: format!(
                    "'{}' scored {} and should be strengthened before submission",
                    section.title, response.quality.score
                ),
            });
        }

        if let Some(limit) = section.question.metadata.word_limit {
            if response.word_count > limit {
                suggestions.push(Suggestion {
                    section_id: section.id.clone(),
                    section_title: section.title.clone(),
                    priority: SuggestionPriority::High,
                    kind: SuggestionKind::Warning,
                    message: format!(
                        "'{}' runs {} words over its {} word limit",
                        section.title,
                        response.word_count - limit,
                        limit
                    ),
                });
            }
        }

        if section.question.metadata.field_type == FieldType::Narrative
            && !response.needs_user_input
            && !response.content.trim().is_empty()
            && response.word_count < SHORT_NARRATIVE_WORDS
        {
            suggestions.push(Suggestion {
                section_id: section.id.clone(),
                section_title: section.title.clone(),
                priority: SuggestionPriority::Medium,
                kind: SuggestionKind::Warning,
                message: format!(
                    "'{}' is only {} words; narrative sections usually need more depth",
                    section.title, response.word_count
                ),
            });
        }
    }

    let completion_score = if total_required == 0 {
        100
    } else {
        ((completed_required as f64 / total_required as f64) * 100.0).round() as u8
    };

    let overall_confidence = if scored == 0 {
        0
    } else {
        ((score_sum as f64) / f64::from(scored)).round() as u8
    };

    let readiness = if error_count == 0 && overall_confidence >= READY_SCORE {
        ReadinessLevel::Ready
    } else if error_count > NOT_READY_ERRORS || overall_confidence < NOT_READY_SCORE {
        ReadinessLevel::NotReady
    } else {
        ReadinessLevel::NeedsWork
    };

    suggestions.sort_by(|a, b| a.priority.cmp(&b.priority));

    ApplicationAggregate {
        completion_score,
        overall_confidence,
        missing_requirements,
        suggestions,
        readiness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::drafting::domain::{word_count, Question};
    use crate::workflows::drafting::quality::QualityResult;

    fn section(id: &str, title: &str, required: bool) -> SectionSpec {
        SectionSpec {
            id: id.to_string(),
            title: title.to_string(),
            question: Question::new(title),
            required,
        }
    }

    fn answered(content: &str) -> GeneratedResponse {
        GeneratedResponse {
            content: content.to_string(),
            word_count: word_count(content),
            character_count: content.chars().count(),
            sources: Vec::new(),
            ai_generated: false,
            quality: QualityResult::direct_fill(),
            needs_review: false,
            review_prompt: None,
            needs_user_input: false,
        }
    }

    fn unanswered() -> GeneratedResponse {
        GeneratedResponse {
            content: String::new(),
            word_count: 0,
            character_count: 0,
            sources: Vec::new(),
            ai_generated: false,
            quality: QualityResult::insufficient(),
            needs_review: true,
            review_prompt: Some("Provide this information".to_string()),
            needs_user_input: true,
        }
    }

    #[test]
    fn completion_counts_only_required_sections() {
        let sections = vec![
            section("a", "Mission", true),
            section("b", "Need", true),
            section("c", "Optional extras", false),
        ];
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), answered("Our mission."));
        responses.insert("b".to_string(), unanswered());

        let rollup = aggregate(&sections, &responses);
        assert_eq!(rollup.completion_score, 50);
        assert_eq!(rollup.missing_requirements, vec!["Need".to_string()]);
    }

    #[test]
    fn completion_is_monotonic_as_sections_complete() {
        let sections = vec![section("a", "Mission", true), section("b", "Need", true)];
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), unanswered());
        responses.insert("b".to_string(), unanswered());
        let before = aggregate(&sections, &responses).completion_score;

        responses.insert("a".to_string(), answered("Our mission statement."));
        let middle = aggregate(&sections, &responses).completion_score;

        responses.insert("b".to_string(), answered("The need we address."));
        let after = aggregate(&sections, &responses).completion_score;

        assert!(before <= middle && middle <= after);
        assert_eq!(after, 100);
    }

    #[test]
    fn missing_info_suggestions_are_high_priority() {
        let sections = vec![section("a", "Evaluation Plan", true)];
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), unanswered());

        let rollup = aggregate(&sections, &responses);
        let suggestion = rollup.suggestions.first().expect("suggestion present");
        assert_eq!(suggestion.priority, SuggestionPriority::High);
        assert_eq!(suggestion.kind, SuggestionKind::MissingInfo);
    }

    #[test]
    fn clean_high_scoring_application_is_ready() {
        let sections = vec![section("a", "Mission", true)];
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), answered("Our mission is food security."));

        let rollup = aggregate(&sections, &responses);
        assert_eq!(rollup.readiness, ReadinessLevel::Ready);
        assert_eq!(rollup.overall_confidence, 95);
    }

    #[test]
    fn unanswered_required_sections_push_not_ready() {
        let sections = vec![section("a", "Mission", true), section("b", "Need", true)];
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), unanswered());
        responses.insert("b".to_string(), unanswered());

        let rollup = aggregate(&sections, &responses);
        // Confidence 0 with nothing answered lands below the not-ready floor.
        assert_eq!(rollup.readiness, ReadinessLevel::NotReady);
        assert_eq!(rollup.completion_score, 0);
    }

    #[test]
    fn short_narrative_sections_get_flagged() {
        let mut spec = section("a", "Project Description", true);
        spec.question.metadata.field_type = FieldType::Narrative;
        let mut responses = BTreeMap::new();
        responses.insert("a".to_string(), answered("Too short to convince anyone."));

        let rollup = aggregate(&[spec], &responses);
        assert!(rollup
            .suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Warning && s.message.contains("words")));
    }
}
