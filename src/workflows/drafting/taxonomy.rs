use serde::Serialize;

use super::domain::QuestionCategory;

/// Minimum normalized confidence at which a pattern match is accepted without
/// consulting the model fallback.
pub const ACCEPT_CONFIDENCE: f32 = 0.8;

/// Outcome of keyword-pattern classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternMatch {
    pub category: QuestionCategory,
    pub score: usize,
    pub confidence: f32,
}

impl PatternMatch {
    pub fn accepted(&self) -> bool {
        self.confidence >= ACCEPT_CONFIDENCE
    }
}

/// Static keyword phrases per category. Multi-word phrases score higher than
/// single keywords so that specific wording beats incidental substring hits.
/// The tables are data, not logic: identical inputs classify identically.
pub fn patterns(category: QuestionCategory) -> &'static [&'static str] {
    match category {
        QuestionCategory::OrganizationIdentity => &[
            "legal name",
            "organization name",
            "name of your organization",
            "name of the organization",
            "organization's legal name",
            "dba",
            "doing business as",
        ],
        QuestionCategory::ContactInfo => &[
            "contact information",
            "contact person",
            "phone number",
            "email address",
            "mailing address",
            "primary contact",
            "point of contact",
        ],
        QuestionCategory::MissionStatement => &[
            "mission statement",
            "your mission",
            "organization's mission",
            "vision statement",
            "core values",
            "purpose of your organization",
        ],
        QuestionCategory::OrganizationHistory => &[
            "organization history",
            "history of your organization",
            "when was your organization founded",
            "founding story",
            "background of your organization",
            "year founded",
        ],
        QuestionCategory::LegalStatus => &[
            "tax exempt status",
            "501c3",
            "501(c)(3)",
            "legal status",
            "ein",
            "employer identification number",
            "incorporation",
            "nonprofit status",
        ],
        QuestionCategory::GeographicArea => &[
            "geographic area",
            "service area",
            "communities served",
            "where do you operate",
            "counties served",
            "region served",
        ],
        QuestionCategory::ProblemNeed => &[
            "problem",
            "need",
            "statement of need",
            "needs statement",
            "community need",
            "problem you are addressing",
            "why is this needed",
            "challenge you address",
        ],
        QuestionCategory::TargetPopulation => &[
            "target population",
            "who do you serve",
            "population served",
            "beneficiaries",
            "target audience",
            "demographics of those served",
        ],
        QuestionCategory::ProposedSolution => &[
            "solution",
            "your approach",
            "proposed solution",
            "how will you address",
            "intervention",
            "program model",
        ],
        QuestionCategory::ProjectDescription => &[
            "project description",
            "describe your project",
            "describe the project",
            "summary of your project",
            "project overview",
            "proposed project",
            "project narrative",
        ],
        QuestionCategory::GoalsObjectives => &[
            "goals",
            "objectives",
            "goals and objectives",
            "project goals",
            "smart objectives",
            "what do you hope to accomplish",
        ],
        QuestionCategory::ProjectTimeline => &[
            "timeline",
            "project timeline",
            "implementation plan",
            "work plan",
            "schedule of activities",
            "key milestones",
            "project period",
        ],
        QuestionCategory::EvaluationPlan => &[
            "evaluation",
            "evaluation plan",
            "how will you measure",
            "how will you evaluate",
            "measure success",
            "data collection",
            "performance measures",
        ],
        QuestionCategory::ExpectedOutcomes => &[
            "outcomes",
            "expected outcomes",
            "anticipated results",
            "expected impact",
            "projected impact",
            "deliverables",
        ],
        QuestionCategory::Innovation => &[
            "innovative",
            "innovation",
            "what makes your approach unique",
            "novel approach",
            "how is this different",
        ],
        QuestionCategory::BudgetJustification => &[
            "budget justification",
            "budget narrative",
            "justify your budget",
            "how will funds be used",
            "use of funds",
            "explain your budget",
            "line item",
        ],
        QuestionCategory::FundingRequest => &[
            "amount requested",
            "funding requested",
            "how much are you requesting",
            "request amount",
            "grant amount",
            "total request",
        ],
        QuestionCategory::OtherFundingSources => &[
            "other funding",
            "other sources of funding",
            "matching funds",
            "additional funding",
            "leveraged funds",
            "cost share",
            "in-kind contributions",
        ],
        QuestionCategory::FinancialHealth => &[
            "financial statements",
            "annual budget",
            "operating budget",
            "financial health",
            "audit",
            "revenue",
            "fiscal year",
        ],
        QuestionCategory::Sustainability => &[
            "sustainability",
            "sustain the project",
            "after the grant period",
            "long-term funding",
            "continuation plan",
            "beyond the grant",
        ],
        QuestionCategory::TeamQualifications => &[
            "qualifications",
            "key personnel",
            "team qualifications",
            "staff experience",
            "who will lead",
            "project team",
            "leadership team",
            "resumes",
        ],
        QuestionCategory::BoardGovernance => &[
            "board of directors",
            "governance",
            "board members",
            "board composition",
            "advisory board",
        ],
        QuestionCategory::Partnerships => &[
            "partners",
            "partnerships",
            "collaborating organizations",
            "collaboration",
            "community partners",
            "letters of support",
        ],
        QuestionCategory::OrganizationalCapacity => &[
            "organizational capacity",
            "capacity to manage",
            "ability to carry out",
            "infrastructure",
            "capacity building",
        ],
        QuestionCategory::TrackRecord => &[
            "track record",
            "past performance",
            "previous grants",
            "prior experience",
            "similar projects",
            "accomplishments",
        ],
        QuestionCategory::DiversityEquity => &[
            "diversity",
            "equity",
            "inclusion",
            "dei",
            "underserved communities",
            "culturally responsive",
        ],
        QuestionCategory::CommunityEngagement => &[
            "community engagement",
            "community involvement",
            "stakeholder input",
            "community voice",
            "resident participation",
        ],
        QuestionCategory::RiskManagement => &[
            "risks",
            "risk management",
            "potential challenges",
            "barriers to success",
            "mitigation",
            "contingency plan",
        ],
        QuestionCategory::Dissemination => &[
            "dissemination",
            "share results",
            "share findings",
            "publication plan",
            "how will you share",
        ],
        QuestionCategory::Other => &[],
    }
}

/// Distinct lowercase keywords (longer than 3 characters) drawn from a
/// category's pattern phrases. Reused by the data-fit mapper for document and
/// prior-answer overlap checks.
pub fn keywords(category: QuestionCategory) -> Vec<&'static str> {
    let mut words: Vec<&'static str> = patterns(category)
        .iter()
        .flat_map(|phrase| phrase.split_whitespace())
        .filter(|word| word.len() > 3)
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Score every category's pattern table against the question text. A matched
/// phrase contributes its word count; the highest total wins and its
/// confidence is `min(score / 3, 1)`.
pub fn classify_by_patterns(text: &str) -> PatternMatch {
    let haystack = text.to_lowercase();

    let mut best = PatternMatch {
        category: QuestionCategory::Other,
        score: 0,
        confidence: 0.0,
    };

    for category in QuestionCategory::ALL {
        let score: usize = patterns(category)
            .iter()
            .filter(|phrase| haystack.contains(*phrase))
            .map(|phrase| phrase.split_whitespace().count())
            .sum();

        if score > best.score {
            best = PatternMatch {
                category,
                score,
                confidence: (score as f32 / 3.0).min(1.0),
            };
        }
    }

    best
}
