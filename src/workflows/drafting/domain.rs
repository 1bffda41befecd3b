use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed taxonomy of semantic question categories. Every incoming question is
/// assigned exactly one of these tags; anything the classifier cannot place
/// lands on `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    OrganizationIdentity,
    ContactInfo,
    MissionStatement,
    OrganizationHistory,
    LegalStatus,
    GeographicArea,
    ProblemNeed,
    TargetPopulation,
    ProposedSolution,
    ProjectDescription,
    GoalsObjectives,
    ProjectTimeline,
    EvaluationPlan,
    ExpectedOutcomes,
    Innovation,
    BudgetJustification,
    FundingRequest,
    OtherFundingSources,
    FinancialHealth,
    Sustainability,
    TeamQualifications,
    BoardGovernance,
    Partnerships,
    OrganizationalCapacity,
    TrackRecord,
    DiversityEquity,
    CommunityEngagement,
    RiskManagement,
    Dissemination,
    Other,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 30] = [
        QuestionCategory::OrganizationIdentity,
        QuestionCategory::ContactInfo,
        QuestionCategory::MissionStatement,
        QuestionCategory::OrganizationHistory,
        QuestionCategory::LegalStatus,
        QuestionCategory::GeographicArea,
        QuestionCategory::ProblemNeed,
        QuestionCategory::TargetPopulation,
        QuestionCategory::ProposedSolution,
        QuestionCategory::ProjectDescription,
        QuestionCategory::GoalsObjectives,
        QuestionCategory::ProjectTimeline,
        QuestionCategory::EvaluationPlan,
        QuestionCategory::ExpectedOutcomes,
        QuestionCategory::Innovation,
        QuestionCategory::BudgetJustification,
        QuestionCategory::FundingRequest,
        QuestionCategory::OtherFundingSources,
        QuestionCategory::FinancialHealth,
        QuestionCategory::Sustainability,
        QuestionCategory::TeamQualifications,
        QuestionCategory::BoardGovernance,
        QuestionCategory::Partnerships,
        QuestionCategory::OrganizationalCapacity,
        QuestionCategory::TrackRecord,
        QuestionCategory::DiversityEquity,
        QuestionCategory::CommunityEngagement,
        QuestionCategory::RiskManagement,
        QuestionCategory::Dissemination,
        QuestionCategory::Other,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            QuestionCategory::OrganizationIdentity => "organization_identity",
            QuestionCategory::ContactInfo => "contact_info",
            QuestionCategory::MissionStatement => "mission_statement",
            QuestionCategory::OrganizationHistory => "organization_history",
            QuestionCategory::LegalStatus => "legal_status",
            QuestionCategory::GeographicArea => "geographic_area",
            QuestionCategory::ProblemNeed => "problem_need",
            QuestionCategory::TargetPopulation => "target_population",
            QuestionCategory::ProposedSolution => "proposed_solution",
            QuestionCategory::ProjectDescription => "project_description",
            QuestionCategory::GoalsObjectives => "goals_objectives",
            QuestionCategory::ProjectTimeline => "project_timeline",
            QuestionCategory::EvaluationPlan => "evaluation_plan",
            QuestionCategory::ExpectedOutcomes => "expected_outcomes",
            QuestionCategory::Innovation => "innovation",
            QuestionCategory::BudgetJustification => "budget_justification",
            QuestionCategory::FundingRequest => "funding_request",
            QuestionCategory::OtherFundingSources => "other_funding_sources",
            QuestionCategory::FinancialHealth => "financial_health",
            QuestionCategory::Sustainability => "sustainability",
            QuestionCategory::TeamQualifications => "team_qualifications",
            QuestionCategory::BoardGovernance => "board_governance",
            QuestionCategory::Partnerships => "partnerships",
            QuestionCategory::OrganizationalCapacity => "organizational_capacity",
            QuestionCategory::TrackRecord => "track_record",
            QuestionCategory::DiversityEquity => "diversity_equity",
            QuestionCategory::CommunityEngagement => "community_engagement",
            QuestionCategory::RiskManagement => "risk_management",
            QuestionCategory::Dissemination => "dissemination",
            QuestionCategory::Other => "other",
        }
    }

    /// Parse a classifier-produced slug. Anything outside the enumeration is
    /// coerced to `Other` rather than erroring.
    pub fn from_slug(value: &str) -> QuestionCategory {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .unwrap_or(QuestionCategory::Other)
    }
}

/// Declared input type for an application field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    #[default]
    Narrative,
    Select,
}

/// Optional metadata a funder attaches to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldMetadata {
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub word_limit: Option<usize>,
    #[serde(default)]
    pub char_limit: Option<usize>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Immutable question input: the raw prompt text plus field metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub metadata: FieldMetadata,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: FieldMetadata::default(),
        }
    }
}

/// Named organization facts the pipeline can draw on. The profile store owns
/// the values; this core only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Mission,
    ProblemStatement,
    Solution,
    TargetMarket,
    TeamSize,
    FounderBackground,
    AnnualRevenue,
    FundingSeeking,
    PreviousFunding,
    Ein,
    Website,
    City,
    State,
    YearFounded,
    ProgramsOffered,
    BoardSize,
    ImpactMetrics,
}

impl ProfileField {
    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Mission => "mission",
            ProfileField::ProblemStatement => "problem_statement",
            ProfileField::Solution => "solution",
            ProfileField::TargetMarket => "target_market",
            ProfileField::TeamSize => "team_size",
            ProfileField::FounderBackground => "founder_background",
            ProfileField::AnnualRevenue => "annual_revenue",
            ProfileField::FundingSeeking => "funding_seeking",
            ProfileField::PreviousFunding => "previous_funding",
            ProfileField::Ein => "ein",
            ProfileField::Website => "website",
            ProfileField::City => "city",
            ProfileField::State => "state",
            ProfileField::YearFounded => "year_founded",
            ProfileField::ProgramsOffered => "programs_offered",
            ProfileField::BoardSize => "board_size",
            ProfileField::ImpactMetrics => "impact_metrics",
        }
    }
}

/// Flat read-only mapping of organization facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrganizationProfile {
    pub fields: BTreeMap<ProfileField, String>,
}

impl OrganizationProfile {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ProfileField, String)>) -> Self {
        Self {
            fields: pairs.into_iter().collect(),
        }
    }

    /// A field counts as present only when non-empty after trimming.
    pub fn value(&self, field: ProfileField) -> Option<&str> {
        self.fields
            .get(&field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Tags for uploaded document types; used by keyword relevance matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Budget,
    FinancialStatement,
    TaxDetermination,
    AnnualReport,
    ProgramPlan,
    ImpactReport,
    Resume,
    LetterOfSupport,
    Misc,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::Budget => "budget",
            DocumentKind::FinancialStatement => "financial_statement",
            DocumentKind::TaxDetermination => "tax_determination",
            DocumentKind::AnnualReport => "annual_report",
            DocumentKind::ProgramPlan => "program_plan",
            DocumentKind::ImpactReport => "impact_report",
            DocumentKind::Resume => "resume",
            DocumentKind::LetterOfSupport => "letter_of_support",
            DocumentKind::Misc => "misc",
        }
    }
}

/// Externally parsed document; this core never touches raw files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub parsed_text: Option<String>,
}

/// Previously submitted application used for reuse detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorApplication {
    pub id: String,
    pub grant_title: String,
    pub narrative: String,
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    pub status: String,
}

/// Funder archetypes driving tone selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunderKind {
    Federal,
    Foundation,
    Corporate,
    State,
}

/// Read-only grant metadata used for tone selection and prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrantContext {
    pub title: String,
    pub funder: String,
    #[serde(default)]
    pub grant_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub amount_min: Option<u64>,
    #[serde(default)]
    pub amount_max: Option<u64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// How an intent template expects an answer to be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    Direct,
    Synthesize,
    Generate,
    Extract,
}

/// Structured description of what a strong answer to a question needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub category: QuestionCategory,
    #[serde(default)]
    pub sub_category: Option<String>,
    pub core_question: String,
    pub looking_for: Vec<String>,
    pub red_flags: Vec<String>,
    pub data_needed: Vec<ProfileField>,
    pub document_sources: Vec<DocumentKind>,
    pub response_strategy: ResponseStrategy,
}

impl Intent {
    /// Last-resort intent when neither templates nor the model produced one.
    /// Generation must never hard-fail for lack of classification.
    pub fn fallback(category: QuestionCategory, question: &Question) -> Self {
        Self {
            category,
            sub_category: None,
            core_question: question.text.clone(),
            looking_for: Vec::new(),
            red_flags: Vec::new(),
            data_needed: Vec::new(),
            document_sources: Vec::new(),
            response_strategy: ResponseStrategy::Generate,
        }
    }
}

/// Strategy chosen after fitting an intent against actual organization data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    Direct,
    Adapt,
    Generate,
    Missing,
}

impl FitStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            FitStrategy::Direct => "direct",
            FitStrategy::Adapt => "adapt",
            FitStrategy::Generate => "generate",
            FitStrategy::Missing => "missing",
        }
    }
}

/// Confidence that available data can answer the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn upgraded(self) -> Confidence {
        match self {
            Confidence::Low => Confidence::Medium,
            Confidence::Medium | Confidence::High => Confidence::High,
        }
    }
}

/// Result of fitting an intent against the organization's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFitMapping {
    pub available_fields: Vec<ProfileField>,
    pub missing_fields: Vec<ProfileField>,
    pub relevant_excerpts: Vec<String>,
    pub reusable_text: Vec<String>,
    pub strategy: FitStrategy,
    pub confidence: Confidence,
    pub relevance_score: u8,
}

/// One question slot within an application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    pub question: Question,
    pub required: bool,
}

/// A drafted answer plus its quality assessment. Regeneration produces a new
/// instance; instances are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub content: String,
    pub word_count: usize,
    pub character_count: usize,
    pub sources: Vec<ProfileField>,
    pub ai_generated: bool,
    pub quality: super::quality::QualityResult,
    pub needs_review: bool,
    #[serde(default)]
    pub review_prompt: Option<String>,
    pub needs_user_input: bool,
}

/// Count words the same way limits are enforced: whitespace separation.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
