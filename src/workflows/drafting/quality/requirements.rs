use crate::workflows::drafting::domain::QuestionCategory;

/// Concept checklist and expected length for a category's answers.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRequirements {
    /// Concepts a complete answer must touch; absence becomes an improvement
    /// note, not a hard error.
    pub required: &'static [&'static str],
    /// Concepts that strengthen an answer; presence is reported as a
    /// strength, absence is neutral.
    pub recommended: &'static [&'static str],
    /// Expected word-count range; violations become warnings.
    pub word_range: (usize, usize),
}

const DEFAULT_REQUIREMENTS: CategoryRequirements = CategoryRequirements {
    required: &[],
    recommended: &[],
    word_range: (20, 500),
};

pub fn requirements_for(category: QuestionCategory) -> CategoryRequirements {
    match category {
        QuestionCategory::OrganizationIdentity
        | QuestionCategory::ContactInfo
        | QuestionCategory::LegalStatus
        | QuestionCategory::FundingRequest => CategoryRequirements {
            required: &[],
            recommended: &[],
            word_range: (1, 100),
        },
        QuestionCategory::MissionStatement => CategoryRequirements {
            required: &["mission"],
            recommended: &["serve", "community"],
            word_range: (10, 150),
        },
        QuestionCategory::ProblemNeed => CategoryRequirements {
            required: &["need", "community"],
            recommended: &["data", "percent", "research"],
            word_range: (100, 500),
        },
        QuestionCategory::TargetPopulation => CategoryRequirements {
            required: &["serve"],
            recommended: &["income", "age", "families"],
            word_range: (50, 300),
        },
        QuestionCategory::ProposedSolution | QuestionCategory::ProjectDescription => {
            CategoryRequirements {
                required: &["program", "will"],
                recommended: &["evidence", "participants"],
                word_range: (100, 600),
            }
        }
        QuestionCategory::GoalsObjectives => CategoryRequirements {
            required: &["goal", "by"],
            recommended: &["increase", "measure", "baseline"],
            word_range: (60, 400),
        },
        QuestionCategory::ProjectTimeline => CategoryRequirements {
            required: &["month"],
            recommended: &["phase", "milestone", "quarter"],
            word_range: (60, 400),
        },
        QuestionCategory::EvaluationPlan => CategoryRequirements {
            required: &["measure", "data"],
            recommended: &["survey", "indicator", "report"],
            word_range: (80, 450),
        },
        QuestionCategory::ExpectedOutcomes => CategoryRequirements {
            required: &["outcome"],
            recommended: &["increase", "reduce", "percent"],
            word_range: (60, 400),
        },
        QuestionCategory::BudgetJustification => CategoryRequirements {
            required: &["cost", "budget"],
            recommended: &["personnel", "salary", "supplies"],
            word_range: (80, 500),
        },
        QuestionCategory::Sustainability => CategoryRequirements {
            required: &["funding", "continue"],
            recommended: &["revenue", "partners", "diversif"],
            word_range: (60, 400),
        },
        QuestionCategory::TeamQualifications => CategoryRequirements {
            required: &["experience"],
            recommended: &["degree", "years", "led"],
            word_range: (60, 450),
        },
        QuestionCategory::TrackRecord => CategoryRequirements {
            required: &["grant"],
            recommended: &["managed", "results", "completed"],
            word_range: (50, 400),
        },
        _ => DEFAULT_REQUIREMENTS,
    }
}
