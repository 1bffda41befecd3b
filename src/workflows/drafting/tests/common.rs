use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::generation::{GenerationError, TextGenerator};
use crate::workflows::drafting::domain::{
    FieldMetadata, FieldType, GrantContext, OrganizationProfile, ProfileField, Question,
    SectionSpec,
};
use crate::workflows::drafting::service::{DraftingConfig, DraftingService};

/// Generator double that pops scripted replies in order and counts calls.
/// Falls back to a fixed reply when the script runs dry.
#[derive(Default)]
pub(super) struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub(super) fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str, _budget: u32) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                "The program delivers measurable results for the community it serves.".to_string()
            });
        Ok(reply)
    }
}

/// Generator double whose every call fails.
pub(super) struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _budget: u32) -> Result<String, GenerationError> {
        Err(GenerationError::Malformed("scripted failure".to_string()))
    }
}

/// Generator double that never completes, for timeout coverage.
pub(super) struct StalledGenerator;

impl TextGenerator for StalledGenerator {
    async fn generate(&self, _prompt: &str, _budget: u32) -> Result<String, GenerationError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GenerationError::Timeout)
    }
}

pub(super) fn service_with<G: TextGenerator + 'static>(generator: G) -> DraftingService<G> {
    DraftingService::new(Arc::new(generator), DraftingConfig::default())
}

pub(super) fn grant() -> GrantContext {
    GrantContext {
        title: "Community Impact Fund".to_string(),
        funder: "The Greenfield Trust".to_string(),
        grant_type: "foundation".to_string(),
        description: "Supports food security programs in rural counties.".to_string(),
        ..GrantContext::default()
    }
}

pub(super) fn full_profile() -> OrganizationProfile {
    OrganizationProfile::from_pairs([
        (ProfileField::Name, "Greenfield Pantry Network".to_string()),
        (
            ProfileField::Mission,
            "Ending rural food insecurity through neighbor-led delivery.".to_string(),
        ),
        (
            ProfileField::ProblemStatement,
            "One in six rural households skips meals weekly.".to_string(),
        ),
        (
            ProfileField::TargetMarket,
            "Low-income families across 14 rural towns.".to_string(),
        ),
        (
            ProfileField::ImpactMetrics,
            "48,000 meals delivered in 2025; 97% on-time rate.".to_string(),
        ),
        (ProfileField::FundingSeeking, "$75,000".to_string()),
    ])
}

/// Name plus one of the three need-category fields: enough data to draft
/// from, too little to fill a narrative section verbatim.
pub(super) fn partial_profile() -> OrganizationProfile {
    OrganizationProfile::from_pairs([
        (ProfileField::Name, "Greenfield Pantry Network".to_string()),
        (
            ProfileField::ProblemStatement,
            "One in six rural households skips meals weekly.".to_string(),
        ),
    ])
}

pub(super) fn name_profile() -> OrganizationProfile {
    OrganizationProfile::from_pairs([(ProfileField::Name, "Acme Corp".to_string())])
}

pub(super) fn section(id: &str, title: &str, question_text: &str, required: bool) -> SectionSpec {
    SectionSpec {
        id: id.to_string(),
        title: title.to_string(),
        question: Question::new(question_text),
        required,
    }
}

pub(super) fn narrative_section(
    id: &str,
    title: &str,
    question_text: &str,
    word_limit: usize,
) -> SectionSpec {
    SectionSpec {
        id: id.to_string(),
        title: title.to_string(),
        question: Question {
            text: question_text.to_string(),
            metadata: FieldMetadata {
                field_type: FieldType::Narrative,
                word_limit: Some(word_limit),
                required: true,
                ..FieldMetadata::default()
            },
        },
        required: true,
    }
}
