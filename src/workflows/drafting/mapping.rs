use super::domain::{
    Confidence, DataFitMapping, Document, FitStrategy, Intent, OrganizationProfile,
    PriorApplication,
};
use super::taxonomy;

const BASE_RELEVANCE: u32 = 30;
const FIELD_RELEVANCE: u32 = 15;
const FIELD_RELEVANCE_CAP: u32 = 45;
const DOCUMENT_RELEVANCE: u32 = 20;
const PRIOR_RELEVANCE: u32 = 25;
const MISSING_RELEVANCE_CAP: u32 = 20;

const HIGH_RATIO: f32 = 0.8;
const MEDIUM_RATIO: f32 = 0.5;
const DIRECT_RATIO: f32 = 0.7;

/// Minimum distinct keyword hits before a document or prior answer counts as
/// relevant. Intentionally a blunt, auditable threshold.
const MIN_KEYWORD_HITS: usize = 2;

const MAX_PRIOR_MATCHES: usize = 3;
const EXCERPT_CHAR_BUDGET: usize = 400;
const REUSE_CHAR_BUDGET: usize = 800;

/// Fit an intent against the organization's profile, documents, and prior
/// answers, producing the strategy and confidence that drive generation.
pub fn map_data(
    intent: &Intent,
    profile: &OrganizationProfile,
    documents: &[Document],
    prior_applications: &[PriorApplication],
    section_title: &str,
) -> DataFitMapping {
    let mut available_fields = Vec::new();
    let mut missing_fields = Vec::new();
    for &field in &intent.data_needed {
        if profile.value(field).is_some() {
            available_fields.push(field);
        } else {
            missing_fields.push(field);
        }
    }

    let keywords = section_keywords(intent, section_title);
    let relevant_excerpts = document_excerpts(intent, documents, &keywords);
    let reusable_text = prior_matches(prior_applications, &keywords);

    let data_ratio = available_fields.len() as f32 / intent.data_needed.len().max(1) as f32;

    let mut confidence = if data_ratio >= HIGH_RATIO {
        Confidence::High
    } else if data_ratio >= MEDIUM_RATIO {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    if !relevant_excerpts.is_empty() {
        confidence = confidence.upgraded();
    }
    if !reusable_text.is_empty() {
        confidence = Confidence::High;
    }

    let has_documents = !relevant_excerpts.is_empty();
    let has_prior = !reusable_text.is_empty();

    let strategy = if available_fields.is_empty() && !has_documents {
        FitStrategy::Missing
    } else if data_ratio >= DIRECT_RATIO {
        FitStrategy::Direct
    } else if has_prior || has_documents {
        FitStrategy::Adapt
    } else {
        FitStrategy::Generate
    };

    let mut relevance = BASE_RELEVANCE
        + (available_fields.len() as u32 * FIELD_RELEVANCE).min(FIELD_RELEVANCE_CAP);
    if has_documents {
        relevance += DOCUMENT_RELEVANCE;
    }
    if has_prior {
        relevance += PRIOR_RELEVANCE;
    }
    let mut relevance = relevance.min(100);
    if strategy == FitStrategy::Missing {
        relevance = relevance.min(MISSING_RELEVANCE_CAP);
    }

    DataFitMapping {
        available_fields,
        missing_fields,
        relevant_excerpts,
        reusable_text,
        strategy,
        confidence,
        relevance_score: relevance as u8,
    }
}

/// Keywords driving overlap checks: the category's pattern vocabulary plus the
/// section title's own words.
fn section_keywords(intent: &Intent, section_title: &str) -> Vec<String> {
    let mut keywords: Vec<String> = taxonomy::keywords(intent.category)
        .into_iter()
        .map(|word| word.to_string())
        .collect();
    keywords.extend(
        section_title
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.len() > 3)
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|word| word.len() > 3),
    );
    keywords.sort_unstable();
    keywords.dedup();
    keywords
}

fn distinct_hits(text_lower: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .count()
}

/// Substring/keyword document matching: a document is relevant when its
/// declared type is one the intent asks for, or its parsed text overlaps the
/// section vocabulary. Deliberately not semantic matching.
fn document_excerpts(
    intent: &Intent,
    documents: &[Document],
    keywords: &[String],
) -> Vec<String> {
    let mut excerpts = Vec::new();

    for document in documents {
        let kind_match = intent.document_sources.contains(&document.kind);

        let Some(text) = document.parsed_text.as_deref().map(str::trim) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        let lower = text.to_lowercase();
        if kind_match || distinct_hits(&lower, keywords) >= MIN_KEYWORD_HITS {
            excerpts.push(excerpt_around_match(text, keywords));
        }
    }

    excerpts
}

/// Window the excerpt on the first sentence containing a keyword, carrying the
/// following sentence for context, bounded by a character budget.
fn excerpt_around_match(text: &str, keywords: &[String]) -> String {
    let sentences: Vec<&str> = split_sentences(text);
    let hit = sentences.iter().position(|sentence| {
        let lower = sentence.to_lowercase();
        keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
    });

    let start = hit.unwrap_or(0);
    let window = sentences[start..(start + 2).min(sentences.len())].join(" ");
    truncate_chars(window.trim(), EXCERPT_CHAR_BUDGET)
}

/// Rank prior answers by keyword overlap; keep at most the three best, best
/// meaning more hits, then longer text.
fn prior_matches(prior_applications: &[PriorApplication], keywords: &[String]) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = Vec::new();

    for application in prior_applications {
        let narrative = application.narrative.trim();
        if !narrative.is_empty() {
            let hits = distinct_hits(&narrative.to_lowercase(), keywords);
            if hits >= MIN_KEYWORD_HITS {
                candidates.push((hits, narrative));
            }
        }
        for answer in application.responses.values() {
            let answer = answer.trim();
            if answer.is_empty() {
                continue;
            }
            let hits = distinct_hits(&answer.to_lowercase(), keywords);
            if hits >= MIN_KEYWORD_HITS {
                candidates.push((hits, answer));
            }
        }
    }

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.len().cmp(&a.1.len())));
    candidates
        .into_iter()
        .take(MAX_PRIOR_MATCHES)
        .map(|(_, text)| truncate_chars(text, REUSE_CHAR_BUDGET))
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn truncate_chars(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        text.to_string()
    } else {
        text.chars().take(budget).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::drafting::domain::{
        DocumentKind, ProfileField, Question, QuestionCategory,
    };
    use crate::workflows::drafting::intent::resolve_from_template;
    use std::collections::BTreeMap;

    fn need_intent() -> Intent {
        resolve_from_template(
            QuestionCategory::ProblemNeed,
            &Question::new("Describe the need"),
        )
        .expect("template exists")
    }

    fn profile_with(fields: &[(ProfileField, &str)]) -> OrganizationProfile {
        OrganizationProfile::from_pairs(
            fields.iter().map(|(field, value)| (*field, value.to_string())),
        )
    }

    #[test]
    fn empty_profile_and_no_documents_is_missing() {
        let mapping = map_data(
            &need_intent(),
            &OrganizationProfile::default(),
            &[],
            &[],
            "Statement of Need",
        );
        assert_eq!(mapping.strategy, FitStrategy::Missing);
        assert_eq!(mapping.confidence, Confidence::Low);
        assert!(mapping.relevance_score <= 20);
        assert_eq!(mapping.missing_fields.len(), 3);
    }

    #[test]
    fn full_profile_maps_direct_with_high_confidence() {
        let profile = profile_with(&[
            (ProfileField::ProblemStatement, "Rural food deserts"),
            (ProfileField::TargetMarket, "Low-income families"),
            (ProfileField::ImpactMetrics, "1,200 households served"),
        ]);
        let mapping = map_data(&need_intent(), &profile, &[], &[], "Statement of Need");
        assert_eq!(mapping.strategy, FitStrategy::Direct);
        assert_eq!(mapping.confidence, Confidence::High);
        assert_eq!(mapping.relevance_score, 75);
    }

    #[test]
    fn blank_values_do_not_count_as_available() {
        let profile = profile_with(&[(ProfileField::ProblemStatement, "   ")]);
        let mapping = map_data(&need_intent(), &profile, &[], &[], "Need");
        assert_eq!(mapping.strategy, FitStrategy::Missing);
        assert!(mapping.available_fields.is_empty());
    }

    #[test]
    fn matching_document_upgrades_confidence_and_forces_adapt() {
        let profile = profile_with(&[(ProfileField::ProblemStatement, "Food insecurity")]);
        let document = Document {
            id: "doc-1".to_string(),
            name: "Community needs assessment".to_string(),
            kind: DocumentKind::ImpactReport,
            parsed_text: Some(
                "Our community need assessment documents the problem in detail. \
                 Families face persistent barriers."
                    .to_string(),
            ),
        };
        let mapping = map_data(&need_intent(), &profile, &[document], &[], "Statement of Need");
        assert_eq!(mapping.strategy, FitStrategy::Adapt);
        assert_eq!(mapping.confidence, Confidence::Medium);
        assert_eq!(mapping.relevant_excerpts.len(), 1);
        assert_eq!(mapping.relevance_score, 30 + 15 + 20);
    }

    #[test]
    fn prior_answer_match_raises_confidence_to_high() {
        let mut responses = BTreeMap::new();
        responses.insert(
            "need".to_string(),
            "The community problem we address is acute need among families.".to_string(),
        );
        let prior = PriorApplication {
            id: "prior-1".to_string(),
            grant_title: "Community Fund 2024".to_string(),
            narrative: String::new(),
            responses,
            status: "submitted".to_string(),
        };
        let profile = profile_with(&[(ProfileField::ProblemStatement, "Food insecurity")]);
        let mapping = map_data(&need_intent(), &profile, &[], &[prior], "Statement of Need");
        assert_eq!(mapping.confidence, Confidence::High);
        assert_eq!(mapping.strategy, FitStrategy::Adapt);
        assert_eq!(mapping.reusable_text.len(), 1);
    }

    #[test]
    fn adding_fields_never_lowers_relevance() {
        let intent = need_intent();
        let sparse = profile_with(&[(ProfileField::ProblemStatement, "Need")]);
        let fuller = profile_with(&[
            (ProfileField::ProblemStatement, "Need"),
            (ProfileField::TargetMarket, "Families"),
        ]);
        let before = map_data(&intent, &sparse, &[], &[], "Need");
        let after = map_data(&intent, &fuller, &[], &[], "Need");
        assert!(after.relevance_score >= before.relevance_score);
        assert_ne!(after.strategy, FitStrategy::Missing);
    }

    #[test]
    fn prior_matches_keep_at_most_three() {
        let priors: Vec<PriorApplication> = (0..5)
            .map(|i| PriorApplication {
                id: format!("prior-{i}"),
                grant_title: format!("Grant {i}"),
                narrative: format!(
                    "Narrative {i}: the community problem and documented need persist."
                ),
                responses: BTreeMap::new(),
                status: "submitted".to_string(),
            })
            .collect();
        let mapping = map_data(
            &need_intent(),
            &OrganizationProfile::default(),
            &[],
            &priors,
            "Statement of Need",
        );
        assert_eq!(mapping.reusable_text.len(), 3);
    }
}
