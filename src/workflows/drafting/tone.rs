use super::domain::{FunderKind, GrantContext, QuestionCategory};

/// Writing-style profile for a funder archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunderTone {
    pub tone: &'static str,
    pub emphasize: &'static [&'static str],
    pub avoid: &'static [&'static str],
}

pub fn tone_for(kind: FunderKind) -> FunderTone {
    match kind {
        FunderKind::Federal => FunderTone {
            tone: "formal, precise, and compliance-oriented",
            emphasize: &[
                "measurable outcomes",
                "evidence-based practices",
                "accountability and reporting",
                "alignment with program priorities",
            ],
            avoid: &["emotional appeals", "unsupported superlatives", "informal phrasing"],
        },
        FunderKind::Foundation => FunderTone {
            tone: "warm but substantive, mission-driven",
            emphasize: &[
                "community impact",
                "stories grounded in data",
                "alignment with the foundation's mission",
                "sustainability",
            ],
            avoid: &["bureaucratic jargon", "purely transactional framing"],
        },
        FunderKind::Corporate => FunderTone {
            tone: "concise, results-focused, partnership-minded",
            emphasize: &[
                "return on community investment",
                "brand-safe visibility",
                "employee engagement opportunities",
                "clear deliverables",
            ],
            avoid: &["lengthy background narrative", "academic hedging"],
        },
        FunderKind::State => FunderTone {
            tone: "plain, direct, and requirement-driven",
            emphasize: &[
                "statutory alignment",
                "service counts and geography",
                "cost effectiveness",
            ],
            avoid: &["speculative claims", "out-of-state comparisons"],
        },
    }
}

/// Sniff the funder archetype from grant metadata keywords. Defaults to
/// foundation, the most common archetype in the discovery feed.
pub fn funder_kind_for(grant: &GrantContext) -> FunderKind {
    let haystack = format!(
        "{} {} {}",
        grant.funder.to_lowercase(),
        grant.grant_type.to_lowercase(),
        grant.description.to_lowercase()
    );

    const FEDERAL: &[&str] = &[
        "federal", "national institutes", "nih", "nsf", "department of", "usda", "hhs", "hud",
        "cdc", "samhsa", "u.s.",
    ];
    const STATE: &[&str] = &["state of", "state agency", "governor", "county", "municipal"];
    const CORPORATE: &[&str] = &[
        "corporate", "company", "inc.", "llc", "bank", "insurance", "csr", "corporation",
    ];

    if FEDERAL.iter().any(|needle| haystack.contains(needle)) {
        FunderKind::Federal
    } else if STATE.iter().any(|needle| haystack.contains(needle)) {
        FunderKind::State
    } else if CORPORATE.iter().any(|needle| haystack.contains(needle)) {
        FunderKind::Corporate
    } else {
        FunderKind::Foundation
    }
}

/// Category-specific structural guidance injected into generation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralGuidance {
    pub structure: &'static str,
    pub key_elements: &'static [&'static str],
    pub example: Option<&'static str>,
}

const DEFAULT_GUIDANCE: StructuralGuidance = StructuralGuidance {
    structure: "Open with a direct answer to the question, support it with the most relevant \
                facts, and close with why it matters to this funder.",
    key_elements: &["direct answer", "supporting specifics", "funder relevance"],
    example: None,
};

pub fn guidance_for(category: QuestionCategory) -> StructuralGuidance {
    match category {
        QuestionCategory::ProblemNeed => StructuralGuidance {
            structure: "State the problem in one sentence, quantify it with local data, name who \
                        is affected, and explain the consequence of inaction.",
            key_elements: &[
                "one-sentence problem statement",
                "local statistics",
                "affected population",
                "urgency",
            ],
            example: Some(
                "In Linn County, 1 in 6 children lives in a food-insecure household, twice the \
                 state average.",
            ),
        },
        QuestionCategory::ProposedSolution | QuestionCategory::ProjectDescription => {
            StructuralGuidance {
                structure: "Describe what the project does, for whom, at what scale, and why this \
                            approach was chosen over alternatives.",
                key_elements: &[
                    "core activities",
                    "participants and scale",
                    "evidence for the approach",
                ],
                example: None,
            }
        }
        QuestionCategory::GoalsObjectives => StructuralGuidance {
            structure: "List 2-4 objectives, each specific, measurable, and time-bound, tied back \
                        to the stated need.",
            key_elements: &["numbered objectives", "baseline and target", "timeframe"],
            example: Some("By June 2027, increase weekly meal deliveries from 400 to 650."),
        },
        QuestionCategory::ProjectTimeline => StructuralGuidance {
            structure: "Walk through the project period phase by phase with months and owners; \
                        include startup and reporting milestones.",
            key_elements: &["phases with dates", "responsible roles", "reporting milestones"],
            example: None,
        },
        QuestionCategory::EvaluationPlan => StructuralGuidance {
            structure: "Name each indicator, the instrument that measures it, the collection \
                        cadence, and who reviews the results.",
            key_elements: &[
                "indicators tied to objectives",
                "instruments and cadence",
                "responsible evaluator",
            ],
            example: None,
        },
        QuestionCategory::ExpectedOutcomes => StructuralGuidance {
            structure: "Distinguish outputs from outcomes; quantify both, with timeframes.",
            key_elements: &["quantified outputs", "quantified outcomes", "timeframe"],
            example: None,
        },
        QuestionCategory::BudgetJustification => StructuralGuidance {
            structure: "Walk the budget top to bottom: each major line, its cost basis, and the \
                        activity it enables.",
            key_elements: &["line items", "cost basis", "link to activities"],
            example: None,
        },
        QuestionCategory::Sustainability => StructuralGuidance {
            structure: "Name the revenue mix that continues the work, current commitments, and \
                        the plan to close any gap.",
            key_elements: &["future revenue sources", "existing commitments", "gap plan"],
            example: None,
        },
        QuestionCategory::TeamQualifications => StructuralGuidance {
            structure: "Lead with the project director's relevant experience, then cover key \
                        staff and any lived-experience ties to the community.",
            key_elements: &["named leadership", "relevant credentials", "community ties"],
            example: None,
        },
        QuestionCategory::TrackRecord => StructuralGuidance {
            structure: "Cite comparable past work with funder, period, and quantified results.",
            key_elements: &["comparable projects", "quantified results", "grants managed"],
            example: None,
        },
        _ => DEFAULT_GUIDANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn federal_keywords_select_federal_tone() {
        let grant = GrantContext {
            title: "Rural Health Outreach".to_string(),
            funder: "Department of Health and Human Services".to_string(),
            ..GrantContext::default()
        };
        assert_eq!(funder_kind_for(&grant), FunderKind::Federal);
        assert!(tone_for(FunderKind::Federal)
            .emphasize
            .contains(&"measurable outcomes"));
    }

    #[test]
    fn unknown_funder_defaults_to_foundation() {
        let grant = GrantContext {
            title: "Community Grant".to_string(),
            funder: "The Greenfield Trust".to_string(),
            ..GrantContext::default()
        };
        assert_eq!(funder_kind_for(&grant), FunderKind::Foundation);
    }

    #[test]
    fn uncovered_categories_get_default_guidance() {
        let guidance = guidance_for(QuestionCategory::Dissemination);
        assert_eq!(guidance.structure, DEFAULT_GUIDANCE.structure);
    }
}
