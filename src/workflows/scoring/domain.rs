use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for cohorts (one scheduled running of a program).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CohortId(pub String);

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for coaching staff sourced from the member roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of program classifications. Each category carries its own
/// seven complexity dimensions and its own compensation bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    LearnToSwim,
    SpecialPopulations,
    Institutional,
    CompetitiveElite,
    Certifications,
    SpecializedDisciplines,
    AdjacentServices,
}

impl ProgramCategory {
    pub const ALL: [ProgramCategory; 7] = [
        ProgramCategory::LearnToSwim,
        ProgramCategory::SpecialPopulations,
        ProgramCategory::Institutional,
        ProgramCategory::CompetitiveElite,
        ProgramCategory::Certifications,
        ProgramCategory::SpecializedDisciplines,
        ProgramCategory::AdjacentServices,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProgramCategory::LearnToSwim => "learn_to_swim",
            ProgramCategory::SpecialPopulations => "special_populations",
            ProgramCategory::Institutional => "institutional",
            ProgramCategory::CompetitiveElite => "competitive_elite",
            ProgramCategory::Certifications => "certifications",
            ProgramCategory::SpecializedDisciplines => "specialized_disciplines",
            ProgramCategory::AdjacentServices => "adjacent_services",
        }
    }
}

impl FromStr for ProgramCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "learn_to_swim" => Ok(ProgramCategory::LearnToSwim),
            "special_populations" => Ok(ProgramCategory::SpecialPopulations),
            "institutional" => Ok(ProgramCategory::Institutional),
            "competitive_elite" => Ok(ProgramCategory::CompetitiveElite),
            "certifications" => Ok(ProgramCategory::Certifications),
            "specialized_disciplines" => Ok(ProgramCategory::SpecializedDisciplines),
            "adjacent_services" => Ok(ProgramCategory::AdjacentServices),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Raised when a category string falls outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown program category '{0}'")]
pub struct UnknownCategory(pub String);

/// Ordinal qualification tier. The derived ordering is load-bearing:
/// a coach qualifies for a cohort when their grade is >= the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachGrade {
    Grade1,
    Grade2,
    Grade3,
}

impl CoachGrade {
    pub const ALL: [CoachGrade; 3] = [CoachGrade::Grade1, CoachGrade::Grade2, CoachGrade::Grade3];

    pub const fn label(self) -> &'static str {
        match self {
            CoachGrade::Grade1 => "grade_1",
            CoachGrade::Grade2 => "grade_2",
            CoachGrade::Grade3 => "grade_3",
        }
    }
}

impl FromStr for CoachGrade {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "grade_1" | "1" => Ok(CoachGrade::Grade1),
            "grade_2" | "2" => Ok(CoachGrade::Grade2),
            "grade_3" | "3" => Ok(CoachGrade::Grade3),
            other => Err(format!("unknown coach grade '{other}'")),
        }
    }
}

/// One scored complexity axis. A full sheet holds seven of these, one per
/// dimension index, each scored 1-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub index: u8,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Compensation band expressed as a percentage-of-revenue range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayBand {
    pub min_percent: f32,
    pub max_percent: f32,
}

/// Committed complexity assessment for a cohort. `total_score`,
/// `required_grade`, and `pay_band` are derived by the calculator and stored
/// verbatim; `scores` is kept sorted by dimension index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScoreRecord {
    pub cohort_id: CohortId,
    pub category: ProgramCategory,
    pub scores: Vec<DimensionScore>,
    pub total_score: u8,
    pub required_grade: CoachGrade,
    pub pay_band: PayBand,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Roster lifecycle states. Only approved coaches can be assigned cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachStatus {
    Approved,
    Probationary,
    Suspended,
}

impl FromStr for CoachStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" | "active" => Ok(CoachStatus::Approved),
            "probationary" | "pending" => Ok(CoachStatus::Probationary),
            "suspended" | "inactive" => Ok(CoachStatus::Suspended),
            other => Err(format!("unknown coach status '{other}'")),
        }
    }
}

/// Coaching workload and quality statistics carried alongside roster entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachStats {
    pub coaching_hours: u32,
    pub avg_rating: f32,
}

/// Point-in-time roster entry supplied by the member roster collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachProfile {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub grade: CoachGrade,
    pub status: CoachStatus,
    pub stats: CoachStats,
}

/// Read-only projection of a coach cleared to run a scored cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleCoach {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub grade: CoachGrade,
    pub stats: CoachStats,
}

impl EligibleCoach {
    pub fn from_profile(profile: CoachProfile) -> Self {
        Self {
            member_id: profile.member_id,
            name: profile.name,
            email: profile.email,
            grade: profile.grade,
            stats: profile.stats,
        }
    }
}

/// Advisory-suggested score for one dimension, already sanitized to the
/// same bounds manual entry must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSuggestion {
    pub index: u8,
    pub score: u8,
    pub rationale: String,
    pub confidence: f32,
}

/// Full advisory proposal for a draft score sheet. Ephemeral: the engine
/// never writes one of these to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub category: ProgramCategory,
    pub dimensions: Vec<DimensionSuggestion>,
    pub overall_rationale: String,
    pub overall_confidence: f32,
}

/// One entry of the advisory fit ordering over the eligible pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachRankingSuggestion {
    pub member_id: MemberId,
    pub match_score: f32,
    pub rationale: String,
    pub grade: CoachGrade,
    pub stats: CoachStats,
}
