use std::fmt::Write as _;

use super::domain::{
    DataFitMapping, FieldMetadata, FieldType, GrantContext, Intent, OrganizationProfile, Question,
};
use super::tone::{funder_kind_for, guidance_for, tone_for};

/// Hard ceiling on requested output units regardless of declared limits.
const OUTPUT_UNIT_CEILING: u32 = 1200;

const NARRATIVE_DEFAULT_UNITS: u32 = 600;
const SHORT_TEXT_DEFAULT_UNITS: u32 = 150;
const SELECT_DEFAULT_UNITS: u32 = 40;

/// Derive the generation budget from the field's declared limits: roughly
/// three times the allowed length, so the model has room before cleanup
/// trims, capped at a fixed ceiling. Falls back to type-based defaults.
pub fn output_budget(metadata: &FieldMetadata) -> u32 {
    if let Some(words) = metadata.word_limit {
        return (words as u32).saturating_mul(3).min(OUTPUT_UNIT_CEILING);
    }
    if let Some(chars) = metadata.char_limit {
        // Treat five characters as one word-equivalent unit.
        return ((chars as u32) / 5).saturating_mul(3).min(OUTPUT_UNIT_CEILING);
    }
    match metadata.field_type {
        FieldType::Narrative => NARRATIVE_DEFAULT_UNITS,
        FieldType::ShortText => SHORT_TEXT_DEFAULT_UNITS,
        FieldType::Select => SELECT_DEFAULT_UNITS,
    }
}

/// Render one generation request combining the question, resolved intent,
/// structural guidance, funder tone, and every piece of mapped data. The
/// literal word/character limit is always included in the instructions.
pub fn build_prompt(
    question: &Question,
    intent: &Intent,
    mapping: &DataFitMapping,
    profile: &OrganizationProfile,
    grant: &GrantContext,
) -> String {
    let tone = tone_for(funder_kind_for(grant));
    let guidance = guidance_for(intent.category);

    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are drafting one answer for a grant application to {funder} ({title}).",
        funder = grant.funder,
        title = grant.title
    );
    if !grant.description.trim().is_empty() {
        let _ = writeln!(prompt, "Grant focus: {}", grant.description.trim());
    }
    let _ = writeln!(prompt, "\nQuestion: {}", question.text);
    if let Some(help) = question.metadata.help_text.as_deref() {
        let _ = writeln!(prompt, "Funder guidance for this field: {help}");
    }
    let _ = writeln!(prompt, "\nWhat this question is really asking: {}", intent.core_question);

    if !intent.looking_for.is_empty() {
        let _ = writeln!(prompt, "\nA strong answer includes:");
        for criterion in &intent.looking_for {
            let _ = writeln!(prompt, "- {criterion}");
        }
    }
    if !intent.red_flags.is_empty() {
        let _ = writeln!(prompt, "\nAvoid these pitfalls:");
        for pitfall in &intent.red_flags {
            let _ = writeln!(prompt, "- {pitfall}");
        }
    }

    let _ = writeln!(prompt, "\nStructure: {}", guidance.structure);
    let _ = writeln!(prompt, "Cover: {}", guidance.key_elements.join("; "));
    if let Some(example) = guidance.example {
        let _ = writeln!(prompt, "Example of the expected register: {example}");
    }

    let _ = writeln!(
        prompt,
        "\nWrite in a tone that is {tone}. Emphasize: {emphasize}. Do not use: {avoid}.",
        tone = tone.tone,
        emphasize = tone.emphasize.join(", "),
        avoid = tone.avoid.join(", ")
    );

    if !mapping.available_fields.is_empty() {
        let _ = writeln!(prompt, "\nOrganization facts (use these, do not invent others):");
        for &field in &mapping.available_fields {
            if let Some(value) = profile.value(field) {
                let _ = writeln!(prompt, "- {}: {}", field.label(), value);
            }
        }
    }
    if !mapping.relevant_excerpts.is_empty() {
        let _ = writeln!(prompt, "\nRelevant excerpts from uploaded documents:");
        for excerpt in &mapping.relevant_excerpts {
            let _ = writeln!(prompt, "- {excerpt}");
        }
    }
    if !mapping.reusable_text.is_empty() {
        let _ = writeln!(
            prompt,
            "\nPassages from prior applications that may be adapted (rework, do not copy):"
        );
        for passage in &mapping.reusable_text {
            let _ = writeln!(prompt, "- {passage}");
        }
    }

    match (question.metadata.word_limit, question.metadata.char_limit) {
        (Some(words), _) => {
            let _ = writeln!(prompt, "\nHard limit: at most {words} words. Stay under it.");
        }
        (None, Some(chars)) => {
            let _ = writeln!(prompt, "\nHard limit: at most {chars} characters. Stay under it.");
        }
        (None, None) => {
            let _ = writeln!(prompt, "\nKeep the answer focused; no more than a few paragraphs.");
        }
    }
    let _ = writeln!(
        prompt,
        "Respond with the answer text only, no preamble or commentary."
    );

    prompt
}

/// Prompt asking the model to pick one option verbatim from a select field.
pub fn build_select_prompt(question: &Question, context_lines: &[String]) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Question: {}", question.text);
    if !context_lines.is_empty() {
        let _ = writeln!(prompt, "Organization context:");
        for line in context_lines {
            let _ = writeln!(prompt, "- {line}");
        }
    }
    let _ = writeln!(prompt, "Choose the single best option from this exact list:");
    for option in &question.metadata.options {
        let _ = writeln!(prompt, "- {option}");
    }
    let _ = writeln!(
        prompt,
        "Respond with one option copied verbatim from the list and nothing else."
    );
    prompt
}

/// Prompt asking the model to classify a question into one taxonomy slug.
pub fn build_classification_prompt(question: &Question, grant: &GrantContext) -> String {
    use super::domain::QuestionCategory;

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Classify this grant-application question into exactly one category."
    );
    let _ = writeln!(prompt, "\nQuestion: {}", question.text);
    if let Some(help) = question.metadata.help_text.as_deref() {
        let _ = writeln!(prompt, "Field help text: {help}");
    }
    if let Some(placeholder) = question.metadata.placeholder.as_deref() {
        let _ = writeln!(prompt, "Field placeholder: {placeholder}");
    }
    if !question.metadata.options.is_empty() {
        let _ = writeln!(prompt, "Field options: {}", question.metadata.options.join(", "));
    }
    if !grant.funder.trim().is_empty() {
        let _ = writeln!(prompt, "Grant funder: {}", grant.funder);
    }
    if !grant.description.trim().is_empty() {
        let _ = writeln!(prompt, "Grant description: {}", grant.description.trim());
    }
    let _ = writeln!(prompt, "\nCategories:");
    for category in QuestionCategory::ALL {
        let _ = writeln!(prompt, "- {}", category.slug());
    }
    let _ = writeln!(prompt, "\nRespond with one category slug and nothing else.");
    prompt
}

/// Prompt asking the model to produce a structured intent as JSON.
pub fn build_intent_prompt(question: &Question, category: super::domain::QuestionCategory, grant: &GrantContext) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Describe what a strong answer to this grant question needs. Question category: {}.",
        category.slug()
    );
    let _ = writeln!(prompt, "Question: {}", question.text);
    if !grant.description.trim().is_empty() {
        let _ = writeln!(prompt, "Grant description: {}", grant.description.trim());
    }
    let _ = writeln!(
        prompt,
        "\nRespond with JSON only, using this shape:\n\
         {{\"core_question\": string, \"looking_for\": [string], \"red_flags\": [string], \
         \"response_strategy\": \"direct\"|\"synthesize\"|\"generate\"|\"extract\"}}"
    );
    prompt
}
