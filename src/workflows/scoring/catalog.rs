use super::domain::ProgramCategory;

/// The seven complexity axes an assessor scores for a cohort, specific to
/// its program category. Static data, re-fetchable at any time.
pub fn dimension_labels(category: ProgramCategory) -> &'static [&'static str; 7] {
    match category {
        ProgramCategory::LearnToSwim => &LEARN_TO_SWIM,
        ProgramCategory::SpecialPopulations => &SPECIAL_POPULATIONS,
        ProgramCategory::Institutional => &INSTITUTIONAL,
        ProgramCategory::CompetitiveElite => &COMPETITIVE_ELITE,
        ProgramCategory::Certifications => &CERTIFICATIONS,
        ProgramCategory::SpecializedDisciplines => &SPECIALIZED_DISCIPLINES,
        ProgramCategory::AdjacentServices => &ADJACENT_SERVICES,
    }
}

const LEARN_TO_SWIM: [&str; 7] = [
    "Swimmer age spread",
    "Class size",
    "Skill level mix",
    "Water comfort baseline",
    "Parent coordination",
    "Progression tracking",
    "Supervision intensity",
];

const SPECIAL_POPULATIONS: [&str; 7] = [
    "Adaptive support needs",
    "Behavioral support load",
    "Medical protocol complexity",
    "Communication adaptations",
    "Caregiver coordination",
    "Session structure demands",
    "Specialist staffing",
];

const INSTITUTIONAL: [&str; 7] = [
    "Group size",
    "Institutional reporting",
    "Schedule coordination",
    "Curriculum constraints",
    "Site logistics",
    "Liability requirements",
    "Stakeholder management",
];

const COMPETITIVE_ELITE: [&str; 7] = [
    "Performance standard",
    "Training volume",
    "Periodization complexity",
    "Technique refinement depth",
    "Competition preparation",
    "Athlete load monitoring",
    "Performance analytics",
];

const CERTIFICATIONS: [&str; 7] = [
    "Certification level",
    "Assessment rigor",
    "Regulatory compliance",
    "Candidate experience spread",
    "Practical exam logistics",
    "Documentation burden",
    "Examiner accountability",
];

const SPECIALIZED_DISCIPLINES: [&str; 7] = [
    "Discipline technicality",
    "Equipment handling",
    "Prerequisite skill depth",
    "Risk profile",
    "Drill complexity",
    "Safety spotting demands",
    "Cross-discipline conditioning",
];

const ADJACENT_SERVICES: [&str; 7] = [
    "Service novelty",
    "Audience variability",
    "Equipment logistics",
    "Facility constraints",
    "Staffing flexibility",
    "Scheduling irregularity",
    "Client expectation management",
];
