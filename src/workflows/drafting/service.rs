use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::generation::{GenerationError, TextGenerator};

use super::aggregate::{aggregate, ApplicationAggregate};
use super::domain::{
    word_count, DataFitMapping, Document, FitStrategy, GeneratedResponse, GrantContext, Intent,
    OrganizationProfile, PriorApplication, Question, QuestionCategory, ResponseStrategy,
    SectionSpec,
};
use super::generator::{clean_response, match_option_reply, select_by_overlap};
use super::intent::resolve_from_template;
use super::mapping::map_data;
use super::prompt::{
    build_classification_prompt, build_intent_prompt, build_prompt, build_select_prompt,
    output_budget,
};
use super::quality::{validate, QualityResult};
use super::taxonomy::classify_by_patterns;

/// Budget for short structured calls (classification, option selection).
const STRUCTURED_CALL_UNITS: u32 = 60;
const INTENT_CALL_UNITS: u32 = 300;

/// Tuning for the drafting pipeline.
#[derive(Debug, Clone)]
pub struct DraftingConfig {
    /// Fan-out for generation batches. Batches run sequentially.
    pub max_concurrency: usize,
    /// Per-call ceiling so a stuck generation cannot block a batch forever.
    pub generation_timeout: Duration,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 3,
            generation_timeout: Duration::from_secs(30),
        }
    }
}

impl DraftingConfig {
    pub fn from_generator_config(config: &GeneratorConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency.max(1),
            generation_timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// A full drafting pass over one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub responses: BTreeMap<String, GeneratedResponse>,
    pub aggregate: ApplicationAggregate,
}

/// Shape the model must return for model-resolved intents.
#[derive(Debug, Deserialize)]
struct ModelIntent {
    core_question: String,
    #[serde(default)]
    looking_for: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    #[serde(default)]
    response_strategy: Option<String>,
}

/// Service composing classification, intent resolution, data-fit mapping,
/// generation, validation, and aggregation. Holds no per-application state;
/// every operation is a pure function of its inputs plus one optional
/// generation call.
pub struct DraftingService<G> {
    generator: Arc<G>,
    config: DraftingConfig,
}

impl<G> DraftingService<G>
where
    G: TextGenerator + 'static,
{
    pub fn new(generator: Arc<G>, config: DraftingConfig) -> Self {
        Self { generator, config }
    }

    /// Classify a question, consulting the model only when pattern confidence
    /// falls short. Never fails: ambiguity resolves toward `Other`.
    pub async fn classify(&self, question: &Question, grant: &GrantContext) -> QuestionCategory {
        let matched = classify_by_patterns(&question.text);
        if matched.accepted() {
            return matched.category;
        }

        let prompt = build_classification_prompt(question, grant);
        match self.call_generator(&prompt, STRUCTURED_CALL_UNITS).await {
            Ok(reply) => QuestionCategory::from_slug(&reply),
            Err(err) => {
                warn!(error = %err, "classification fallback failed, using pattern result");
                if matched.score > 0 {
                    matched.category
                } else {
                    QuestionCategory::Other
                }
            }
        }
    }

    /// Resolve an intent from the static templates, or via the model for
    /// uncovered categories. A missing or unparseable model response falls
    /// back to an empty generate-everything intent.
    pub async fn resolve_intent(
        &self,
        category: QuestionCategory,
        question: &Question,
        grant: &GrantContext,
    ) -> Intent {
        if let Some(intent) = resolve_from_template(category, question) {
            return intent;
        }

        let prompt = build_intent_prompt(question, category, grant);
        match self.call_generator(&prompt, INTENT_CALL_UNITS).await {
            Ok(reply) => parse_model_intent(&reply, category, question),
            Err(err) => {
                warn!(error = %err, category = category.slug(), "intent resolution failed");
                Intent::fallback(category, question)
            }
        }
    }

    /// Fit an intent against organization data. Pure and synchronous.
    pub fn map_data(
        &self,
        intent: &Intent,
        profile: &OrganizationProfile,
        documents: &[Document],
        prior_applications: &[PriorApplication],
        section_title: &str,
    ) -> DataFitMapping {
        map_data(intent, profile, documents, prior_applications, section_title)
    }

    /// Validate content for one category. Pure and synchronous.
    pub fn validate(
        &self,
        content: &str,
        category: QuestionCategory,
        word_limit: Option<usize>,
    ) -> QualityResult {
        validate(content, category, word_limit)
    }

    /// Produce one section's response according to the mapped strategy. All
    /// failure modes degrade to a needs-review placeholder.
    pub async fn generate_section(
        &self,
        section: &SectionSpec,
        intent: &Intent,
        mapping: &DataFitMapping,
        profile: &OrganizationProfile,
        grant: &GrantContext,
    ) -> GeneratedResponse {
        if !section.question.metadata.options.is_empty() {
            return self.answer_select(section, mapping, profile).await;
        }

        match mapping.strategy {
            FitStrategy::Missing => missing_response(section, mapping),
            FitStrategy::Direct => direct_response(mapping, profile)
                .unwrap_or_else(|| missing_response(section, mapping)),
            _ => self.generated_response(section, intent, mapping, profile, grant).await,
        }
    }

    /// Draft every section of an application in bounded-concurrency batches,
    /// then roll the results up. One section failing never aborts the rest.
    pub async fn draft_application(
        &self,
        sections: &[SectionSpec],
        profile: &OrganizationProfile,
        documents: &[Document],
        prior_applications: &[PriorApplication],
        grant: &GrantContext,
    ) -> ApplicationDraft {
        let mut responses: BTreeMap<String, GeneratedResponse> = BTreeMap::new();

        for batch in sections.chunks(self.config.max_concurrency.max(1)) {
            let drafts = join_all(batch.iter().map(|section| {
                self.draft_one(section, profile, documents, prior_applications, grant)
            }))
            .await;

            for (section_id, response) in drafts {
                responses.insert(section_id, response);
            }
        }

        let aggregate = aggregate(sections, &responses);
        info!(
            sections = sections.len(),
            completion = aggregate.completion_score,
            readiness = ?aggregate.readiness,
            "application draft complete"
        );

        ApplicationDraft { responses, aggregate }
    }

    /// Re-draft a single section from scratch. The caller replaces the prior
    /// response wholesale; other sections are untouched.
    pub async fn regenerate_section(
        &self,
        section: &SectionSpec,
        profile: &OrganizationProfile,
        documents: &[Document],
        prior_applications: &[PriorApplication],
        grant: &GrantContext,
    ) -> GeneratedResponse {
        let (_, response) = self
            .draft_one(section, profile, documents, prior_applications, grant)
            .await;
        response
    }

    async fn draft_one(
        &self,
        section: &SectionSpec,
        profile: &OrganizationProfile,
        documents: &[Document],
        prior_applications: &[PriorApplication],
        grant: &GrantContext,
    ) -> (String, GeneratedResponse) {
        let category = self.classify(&section.question, grant).await;
        let intent = self.resolve_intent(category, &section.question, grant).await;
        let mapping = self.map_data(&intent, profile, documents, prior_applications, &section.title);

        info!(
            section = %section.id,
            category = category.slug(),
            strategy = mapping.strategy.label(),
            relevance = mapping.relevance_score,
            "drafting section"
        );

        let response = self
            .generate_section(section, &intent, &mapping, profile, grant)
            .await;
        (section.id.clone(), response)
    }

    async fn generated_response(
        &self,
        section: &SectionSpec,
        intent: &Intent,
        mapping: &DataFitMapping,
        profile: &OrganizationProfile,
        grant: &GrantContext,
    ) -> GeneratedResponse {
        let prompt = build_prompt(&section.question, intent, mapping, profile, grant);
        let budget = output_budget(&section.question.metadata);

        match self.call_generator(&prompt, budget).await {
            Ok(raw) => {
                let content = clean_response(
                    &raw,
                    section.question.metadata.word_limit,
                    section.question.metadata.char_limit,
                );
                let quality = validate(
                    &content,
                    intent.category,
                    section.question.metadata.word_limit,
                );
                let needs_review = !quality.is_valid;
                GeneratedResponse {
                    word_count: word_count(&content),
                    character_count: content.chars().count(),
                    content,
                    sources: mapping.available_fields.clone(),
                    ai_generated: true,
                    quality,
                    needs_review,
                    review_prompt: None,
                    needs_user_input: false,
                }
            }
            Err(err) => {
                warn!(section = %section.id, error = %err, "generation failed");
                failure_response(section, &err)
            }
        }
    }

    /// Select fields: deterministic keyword overlap first; the model is only
    /// consulted when nothing overlaps, and its reply must match one of the
    /// literal options or the first option is used with review flagged.
    async fn answer_select(
        &self,
        section: &SectionSpec,
        mapping: &DataFitMapping,
        profile: &OrganizationProfile,
    ) -> GeneratedResponse {
        let options = &section.question.metadata.options;
        let mut context: Vec<String> = mapping
            .available_fields
            .iter()
            .filter_map(|&field| profile.value(field).map(|value| value.to_string()))
            .collect();
        context.extend(mapping.relevant_excerpts.iter().cloned());
        if context.is_empty() {
            // No mapped fields; fall back to the whole profile for overlap.
            context.extend(
                profile
                    .fields
                    .values()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty()),
            );
        }

        if let Some(choice) = select_by_overlap(options, &context) {
            return select_response(choice, mapping, false);
        }

        let prompt = build_select_prompt(&section.question, &context);
        let reply = self.call_generator(&prompt, STRUCTURED_CALL_UNITS).await;

        match reply.ok().and_then(|reply| match_option_reply(options, &reply)) {
            Some(choice) => select_response(choice, mapping, false),
            None => match options.first() {
                Some(first) => select_response(first.clone(), mapping, true),
                None => missing_response(section, mapping),
            },
        }
    }

    async fn call_generator(
        &self,
        prompt: &str,
        budget: u32,
    ) -> Result<String, GenerationError> {
        match tokio::time::timeout(
            self.config.generation_timeout,
            self.generator.generate(prompt, budget),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout),
        }
    }
}

fn parse_model_intent(reply: &str, category: QuestionCategory, question: &Question) -> Intent {
    let json = extract_json(reply);
    match serde_json::from_str::<ModelIntent>(json) {
        Ok(parsed) => Intent {
            category,
            sub_category: None,
            core_question: parsed.core_question,
            looking_for: parsed.looking_for,
            red_flags: parsed.red_flags,
            data_needed: Vec::new(),
            document_sources: Vec::new(),
            response_strategy: match parsed.response_strategy.as_deref() {
                Some("direct") => ResponseStrategy::Direct,
                Some("synthesize") => ResponseStrategy::Synthesize,
                Some("extract") => ResponseStrategy::Extract,
                _ => ResponseStrategy::Generate,
            },
        },
        Err(_) => Intent::fallback(category, question),
    }
}

/// Models often wrap JSON in prose or fences; take the outermost braces.
fn extract_json(reply: &str) -> &str {
    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if end > start => &reply[start..=end],
        _ => reply,
    }
}

fn direct_response(
    mapping: &DataFitMapping,
    profile: &OrganizationProfile,
) -> Option<GeneratedResponse> {
    let field = *mapping.available_fields.first()?;
    let content = profile.value(field)?.to_string();

    Some(GeneratedResponse {
        word_count: word_count(&content),
        character_count: content.chars().count(),
        content,
        sources: vec![field],
        ai_generated: false,
        quality: QualityResult::direct_fill(),
        needs_review: false,
        review_prompt: None,
        needs_user_input: false,
    })
}

fn select_response(
    choice: String,
    mapping: &DataFitMapping,
    needs_review: bool,
) -> GeneratedResponse {
    GeneratedResponse {
        word_count: word_count(&choice),
        character_count: choice.chars().count(),
        content: choice,
        sources: mapping.available_fields.clone(),
        ai_generated: false,
        quality: QualityResult::direct_fill(),
        needs_review,
        review_prompt: needs_review
            .then(|| "No option matched the organization's data; confirm the selection".to_string()),
        needs_user_input: false,
    }
}

fn missing_response(section: &SectionSpec, mapping: &DataFitMapping) -> GeneratedResponse {
    let fields = mapping
        .missing_fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ");
    let review_prompt = if fields.is_empty() {
        format!("'{}' needs an answer written by hand", section.title)
    } else {
        format!(
            "'{}' needs organization data first; add {} to the profile, then regenerate",
            section.title, fields
        )
    };

    GeneratedResponse {
        content: String::new(),
        word_count: 0,
        character_count: 0,
        sources: Vec::new(),
        ai_generated: false,
        quality: QualityResult::insufficient(),
        needs_review: true,
        review_prompt: Some(review_prompt),
        needs_user_input: true,
    }
}

fn failure_response(section: &SectionSpec, error: &GenerationError) -> GeneratedResponse {
    GeneratedResponse {
        content: String::new(),
        word_count: 0,
        character_count: 0,
        sources: Vec::new(),
        ai_generated: false,
        quality: QualityResult::insufficient(),
        needs_review: true,
        review_prompt: Some(format!(
            "Automatic drafting for '{}' failed ({error}); draft this section manually or retry",
            section.title
        )),
        needs_user_input: true,
    }
}
