mod config;

pub use config::{IncompleteConfiguration, PayBandEntry, PayBandSchedule, ScheduleLoadError};

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{CoachGrade, DimensionScore, PayBand, ProgramCategory};

pub const DIMENSION_COUNT: u8 = 7;
pub const MIN_DIMENSION_SCORE: u8 = 1;
pub const MAX_DIMENSION_SCORE: u8 = 5;

/// Values derived from a validated score sheet. Persisted verbatim on the
/// record, and returned as-is by previews, so a preview and a subsequent
/// commit of the same inputs always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedScore {
    pub total_score: u8,
    pub required_grade: CoachGrade,
    pub pay_band: PayBand,
}

/// Stateless derivation of totals, grade requirements, and pay bands.
/// Holds the startup-validated pay band schedule; no other state.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    schedule: PayBandSchedule,
}

impl ScoreCalculator {
    pub fn new(schedule: PayBandSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &PayBandSchedule {
        &self.schedule
    }

    /// Validate a full seven-dimension sheet and derive every dependent
    /// field. Deterministic: identical inputs yield identical outputs.
    pub fn compute(
        &self,
        category: ProgramCategory,
        scores: &[DimensionScore],
    ) -> Result<DerivedScore, InvalidScoreInput> {
        validate_scores(scores)?;

        let total_score = scores.iter().map(|entry| entry.score).sum();
        let required_grade = required_grade_for(total_score);
        let pay_band = self.schedule.band_for(category, required_grade);

        Ok(DerivedScore {
            total_score,
            required_grade,
            pay_band,
        })
    }
}

/// Map a total onto the qualification tier partition. The cut points sit
/// exactly at 14/15 and 24/25; every total a validated sheet can produce
/// (7-35) lands in exactly one tier.
pub fn required_grade_for(total_score: u8) -> CoachGrade {
    match total_score {
        ..=14 => CoachGrade::Grade1,
        15..=24 => CoachGrade::Grade2,
        25.. => CoachGrade::Grade3,
    }
}

/// One defect found in a submitted score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "issue")]
pub enum ScoreInputIssue {
    WrongDimensionCount { found: usize },
    IndexOutOfRange { index: u8 },
    DuplicateIndex { index: u8 },
    MissingIndex { index: u8 },
    ScoreOutOfRange { index: u8, score: u8 },
}

impl fmt::Display for ScoreInputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreInputIssue::WrongDimensionCount { found } => {
                write!(f, "expected {DIMENSION_COUNT} dimensions, got {found}")
            }
            ScoreInputIssue::IndexOutOfRange { index } => {
                write!(f, "dimension index {index} outside 1-{DIMENSION_COUNT}")
            }
            ScoreInputIssue::DuplicateIndex { index } => {
                write!(f, "dimension index {index} submitted more than once")
            }
            ScoreInputIssue::MissingIndex { index } => {
                write!(f, "dimension index {index} missing")
            }
            ScoreInputIssue::ScoreOutOfRange { index, score } => {
                write!(
                    f,
                    "dimension {index} scored {score}, outside {MIN_DIMENSION_SCORE}-{MAX_DIMENSION_SCORE}"
                )
            }
        }
    }
}

/// Rejection carrying every defect in a submitted sheet, so a caller can
/// fix them all in one pass instead of resubmitting per error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidScoreInput {
    pub issues: Vec<ScoreInputIssue>,
}

impl fmt::Display for InvalidScoreInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid dimension scores: ")?;
        for (position, issue) in self.issues.iter().enumerate() {
            if position > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidScoreInput {}

pub(crate) fn validate_scores(scores: &[DimensionScore]) -> Result<(), InvalidScoreInput> {
    let mut issues = Vec::new();

    if scores.len() != DIMENSION_COUNT as usize {
        issues.push(ScoreInputIssue::WrongDimensionCount {
            found: scores.len(),
        });
    }

    let mut seen = [false; DIMENSION_COUNT as usize + 1];
    for entry in scores {
        if !(1..=DIMENSION_COUNT).contains(&entry.index) {
            issues.push(ScoreInputIssue::IndexOutOfRange { index: entry.index });
        } else if seen[entry.index as usize] {
            issues.push(ScoreInputIssue::DuplicateIndex { index: entry.index });
        } else {
            seen[entry.index as usize] = true;
        }

        if !(MIN_DIMENSION_SCORE..=MAX_DIMENSION_SCORE).contains(&entry.score) {
            issues.push(ScoreInputIssue::ScoreOutOfRange {
                index: entry.index,
                score: entry.score,
            });
        }
    }

    for index in 1..=DIMENSION_COUNT {
        if !seen[index as usize] {
            issues.push(ScoreInputIssue::MissingIndex { index });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(InvalidScoreInput { issues })
    }
}
