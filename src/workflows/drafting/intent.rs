use super::domain::{
    DocumentKind, Intent, ProfileField, Question, QuestionCategory, ResponseStrategy,
};

/// Static description of what a strong answer for a category needs. Categories
/// without a template are resolved by the model instead.
pub struct IntentTemplate {
    pub core_question: &'static str,
    pub looking_for: &'static [&'static str],
    pub red_flags: &'static [&'static str],
    pub data_needed: &'static [ProfileField],
    pub document_sources: &'static [DocumentKind],
    pub response_strategy: ResponseStrategy,
}

/// Resolve an intent from the static template table, or `None` when the
/// category needs model-based resolution.
pub fn resolve_from_template(category: QuestionCategory, question: &Question) -> Option<Intent> {
    template(category).map(|template| Intent {
        category,
        sub_category: None,
        core_question: template.core_question.to_string(),
        looking_for: template.looking_for.iter().map(|s| s.to_string()).collect(),
        red_flags: template.red_flags.iter().map(|s| s.to_string()).collect(),
        data_needed: template.data_needed.to_vec(),
        document_sources: template.document_sources.to_vec(),
        response_strategy: adjust_for_metadata(template.response_strategy, question),
    })
}

/// Select-type fields are answered by choosing among options, not by long-form
/// synthesis; keep the template's data requirements but force direct handling.
fn adjust_for_metadata(strategy: ResponseStrategy, question: &Question) -> ResponseStrategy {
    if !question.metadata.options.is_empty() {
        ResponseStrategy::Direct
    } else {
        strategy
    }
}

pub fn template(category: QuestionCategory) -> Option<&'static IntentTemplate> {
    use DocumentKind as D;
    use ProfileField as F;
    use QuestionCategory as C;
    use ResponseStrategy as S;

    static TEMPLATES: &[(QuestionCategory, IntentTemplate)] = &[
        (
            C::OrganizationIdentity,
            IntentTemplate {
                core_question: "What is the organization's official name?",
                looking_for: &["exact legal name as registered"],
                red_flags: &["nicknames or abbreviations instead of the registered name"],
                data_needed: &[F::Name],
                document_sources: &[D::TaxDetermination],
                response_strategy: S::Direct,
            },
        ),
        (
            C::ContactInfo,
            IntentTemplate {
                core_question: "How can the funder reach the organization?",
                looking_for: &["a named contact with working phone and email"],
                red_flags: &["generic inboxes with no named person"],
                data_needed: &[F::Name, F::Website, F::City, F::State],
                document_sources: &[],
                response_strategy: S::Direct,
            },
        ),
        (
            C::MissionStatement,
            IntentTemplate {
                core_question: "What is the organization's mission?",
                looking_for: &["a concise mission aligned with the funder's priorities"],
                red_flags: &["mission drift to chase this grant", "vague aspirations"],
                data_needed: &[F::Mission],
                document_sources: &[D::AnnualReport],
                response_strategy: S::Direct,
            },
        ),
        (
            C::OrganizationHistory,
            IntentTemplate {
                core_question: "How did the organization get here and what has it done?",
                looking_for: &["founding year", "growth milestones", "evidence of stability"],
                red_flags: &["gaps in activity", "no concrete milestones"],
                data_needed: &[F::YearFounded, F::Mission, F::ProgramsOffered],
                document_sources: &[D::AnnualReport],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::LegalStatus,
            IntentTemplate {
                core_question: "Is the organization legally eligible to receive this grant?",
                looking_for: &["current tax-exempt determination", "EIN"],
                red_flags: &["pending or lapsed status presented as current"],
                data_needed: &[F::Ein, F::State],
                document_sources: &[D::TaxDetermination],
                response_strategy: S::Direct,
            },
        ),
        (
            C::GeographicArea,
            IntentTemplate {
                core_question: "Where does the organization deliver services?",
                looking_for: &["specific counties, cities, or regions"],
                red_flags: &["claimed reach wider than actual operations"],
                data_needed: &[F::City, F::State, F::TargetMarket],
                document_sources: &[],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::ProblemNeed,
            IntentTemplate {
                core_question: "What specific problem does this work address, and for whom?",
                looking_for: &[
                    "local data quantifying the need",
                    "clear causal link between problem and population",
                    "urgency grounded in evidence",
                ],
                red_flags: &[
                    "national statistics with no local grounding",
                    "describing the organization instead of the problem",
                ],
                data_needed: &[F::ProblemStatement, F::TargetMarket, F::ImpactMetrics],
                document_sources: &[D::ImpactReport, D::ProgramPlan],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::TargetPopulation,
            IntentTemplate {
                core_question: "Who exactly benefits from this work?",
                looking_for: &["counts and demographics of those served", "how they are reached"],
                red_flags: &["'everyone' as a target population"],
                data_needed: &[F::TargetMarket, F::ImpactMetrics],
                document_sources: &[D::ImpactReport],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::ProposedSolution,
            IntentTemplate {
                core_question: "How will the organization address the problem?",
                looking_for: &[
                    "a concrete program model",
                    "evidence the approach works",
                    "fit between solution and stated need",
                ],
                red_flags: &["activities listed with no theory of change"],
                data_needed: &[F::Solution, F::ProgramsOffered, F::ProblemStatement],
                document_sources: &[D::ProgramPlan],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::ProjectDescription,
            IntentTemplate {
                core_question: "What, concretely, will this funded project do?",
                looking_for: &["scope, activities, and participants in plain terms"],
                red_flags: &["restating the mission instead of the project"],
                data_needed: &[F::Solution, F::ProgramsOffered, F::TargetMarket],
                document_sources: &[D::ProgramPlan],
                response_strategy: S::Generate,
            },
        ),
        (
            C::GoalsObjectives,
            IntentTemplate {
                core_question: "What measurable changes will this project produce?",
                looking_for: &["specific, measurable, time-bound objectives"],
                red_flags: &["goals that are activities in disguise", "unmeasurable aspirations"],
                data_needed: &[F::Solution, F::ImpactMetrics],
                document_sources: &[D::ProgramPlan],
                response_strategy: S::Generate,
            },
        ),
        (
            C::ProjectTimeline,
            IntentTemplate {
                core_question: "When will each phase of the work happen?",
                looking_for: &["phases with dates and responsible parties"],
                red_flags: &["timelines that ignore startup and hiring lead time"],
                data_needed: &[F::Solution, F::TeamSize],
                document_sources: &[D::ProgramPlan],
                response_strategy: S::Generate,
            },
        ),
        (
            C::EvaluationPlan,
            IntentTemplate {
                core_question: "How will the organization know the project worked?",
                looking_for: &[
                    "named indicators tied to objectives",
                    "data collection methods and cadence",
                    "who analyzes and reports results",
                ],
                red_flags: &["'we will track outcomes' with no instruments named"],
                data_needed: &[F::ImpactMetrics, F::Solution],
                document_sources: &[D::ImpactReport],
                response_strategy: S::Generate,
            },
        ),
        (
            C::ExpectedOutcomes,
            IntentTemplate {
                core_question: "What results should the funder expect, in numbers?",
                looking_for: &["quantified short- and long-term outcomes"],
                red_flags: &["outputs presented as outcomes"],
                data_needed: &[F::ImpactMetrics, F::TargetMarket],
                document_sources: &[D::ImpactReport],
                response_strategy: S::Generate,
            },
        ),
        (
            C::BudgetJustification,
            IntentTemplate {
                core_question: "Why does each budget line cost what it costs?",
                looking_for: &[
                    "line items tied to project activities",
                    "reasonable, documented cost assumptions",
                ],
                red_flags: &["round numbers with no basis", "overhead hidden in program lines"],
                data_needed: &[F::FundingSeeking, F::AnnualRevenue, F::TeamSize],
                document_sources: &[D::Budget],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::FundingRequest,
            IntentTemplate {
                core_question: "How much is being requested?",
                looking_for: &["a single figure within the funder's stated range"],
                red_flags: &["requests outside the published award band"],
                data_needed: &[F::FundingSeeking],
                document_sources: &[D::Budget],
                response_strategy: S::Direct,
            },
        ),
        (
            C::OtherFundingSources,
            IntentTemplate {
                core_question: "What other money supports this work?",
                looking_for: &["committed and pending sources with amounts"],
                red_flags: &["total dependence on this single grant"],
                data_needed: &[F::PreviousFunding, F::AnnualRevenue],
                document_sources: &[D::Budget, D::FinancialStatement],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::FinancialHealth,
            IntentTemplate {
                core_question: "Can the organization responsibly manage funds?",
                looking_for: &["recent revenue figures", "audit or review findings"],
                red_flags: &["unexplained deficits", "no financial oversight described"],
                data_needed: &[F::AnnualRevenue, F::PreviousFunding],
                document_sources: &[D::FinancialStatement, D::AnnualReport],
                response_strategy: S::Extract,
            },
        ),
        (
            C::Sustainability,
            IntentTemplate {
                core_question: "How does this work continue after the grant ends?",
                looking_for: &["named future revenue sources", "a realistic continuation plan"],
                red_flags: &["'we will seek additional grants' as the whole plan"],
                data_needed: &[F::AnnualRevenue, F::PreviousFunding, F::Solution],
                document_sources: &[D::Budget],
                response_strategy: S::Generate,
            },
        ),
        (
            C::TeamQualifications,
            IntentTemplate {
                core_question: "Why is this team the right one to do this work?",
                looking_for: &[
                    "relevant credentials and lived experience",
                    "named project leadership",
                ],
                red_flags: &["unnamed 'qualified staff'", "no connection to the community served"],
                data_needed: &[F::FounderBackground, F::TeamSize],
                document_sources: &[D::Resume],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::BoardGovernance,
            IntentTemplate {
                core_question: "Who governs the organization and how?",
                looking_for: &["board size, composition, and oversight role"],
                red_flags: &["founder-controlled boards with no independence"],
                data_needed: &[F::BoardSize],
                document_sources: &[D::AnnualReport],
                response_strategy: S::Extract,
            },
        ),
        (
            C::Partnerships,
            IntentTemplate {
                core_question: "Who else is committed to this work?",
                looking_for: &["named partners with defined roles"],
                red_flags: &["partners listed without evidence of commitment"],
                data_needed: &[F::ProgramsOffered],
                document_sources: &[D::LetterOfSupport],
                response_strategy: S::Generate,
            },
        ),
        (
            C::OrganizationalCapacity,
            IntentTemplate {
                core_question: "Does the organization have the systems to deliver?",
                looking_for: &["staffing, infrastructure, and grant-management systems"],
                red_flags: &["capacity claims with no staffing numbers"],
                data_needed: &[F::TeamSize, F::AnnualRevenue, F::ProgramsOffered],
                document_sources: &[D::AnnualReport],
                response_strategy: S::Synthesize,
            },
        ),
        (
            C::TrackRecord,
            IntentTemplate {
                core_question: "What has the organization already accomplished?",
                looking_for: &["past grants managed well", "quantified prior results"],
                red_flags: &["no comparable prior work"],
                data_needed: &[F::PreviousFunding, F::ImpactMetrics],
                document_sources: &[D::ImpactReport, D::AnnualReport],
                response_strategy: S::Synthesize,
            },
        ),
    ];

    TEMPLATES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, template)| template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::drafting::domain::FieldMetadata;

    #[test]
    fn identity_template_is_direct_and_needs_name() {
        let question = Question::new("What is your organization's legal name?");
        let intent = resolve_from_template(QuestionCategory::OrganizationIdentity, &question)
            .expect("template exists");
        assert_eq!(intent.response_strategy, ResponseStrategy::Direct);
        assert_eq!(intent.data_needed, vec![ProfileField::Name]);
    }

    #[test]
    fn uncovered_categories_have_no_template() {
        let question = Question::new("How is your approach innovative?");
        assert!(resolve_from_template(QuestionCategory::Innovation, &question).is_none());
        assert!(resolve_from_template(QuestionCategory::Other, &question).is_none());
    }

    #[test]
    fn select_fields_force_direct_strategy() {
        let question = Question {
            text: "What is your primary program area?".to_string(),
            metadata: FieldMetadata {
                options: vec!["Education".to_string(), "Health".to_string()],
                ..FieldMetadata::default()
            },
        };
        let intent = resolve_from_template(QuestionCategory::ProblemNeed, &question)
            .expect("template exists");
        assert_eq!(intent.response_strategy, ResponseStrategy::Direct);
    }

    #[test]
    fn fallback_intent_always_generates() {
        let question = Question::new("Anything at all");
        let intent = Intent::fallback(QuestionCategory::Other, &question);
        assert_eq!(intent.response_strategy, ResponseStrategy::Generate);
        assert!(intent.data_needed.is_empty());
        assert!(intent.looking_for.is_empty());
    }
}
