//! Grant-application drafting pipeline: classify a question, resolve what a
//! strong answer needs, fit that against the organization's data, generate a
//! draft under the funder's tone and limits, score it, and roll sections up
//! into an application-level readiness verdict.

pub mod aggregate;
pub mod domain;
pub mod generator;
pub mod intent;
pub mod mapping;
pub mod prompt;
pub mod quality;
pub mod service;
pub mod taxonomy;
pub mod tone;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate, ApplicationAggregate, ReadinessLevel, Suggestion, SuggestionKind,
    SuggestionPriority,
};
pub use domain::{
    Confidence, DataFitMapping, Document, DocumentKind, FieldMetadata, FieldType, FitStrategy,
    FunderKind, GeneratedResponse, GrantContext, Intent, OrganizationProfile, PriorApplication,
    ProfileField, Question, QuestionCategory, ResponseStrategy, SectionSpec,
};
pub use mapping::map_data;
pub use quality::{
    validate, IssueCode, IssueSeverity, QualityLevel, QualityMetrics, QualityResult,
    ValidationIssue,
};
pub use service::{ApplicationDraft, DraftingConfig, DraftingService};
pub use taxonomy::{classify_by_patterns, PatternMatch};
