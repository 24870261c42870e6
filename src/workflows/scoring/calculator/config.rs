use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::{CoachGrade, PayBand, ProgramCategory};

/// One line of the compensation policy: the revenue-share band paid for a
/// (category, grade) pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBandEntry {
    pub category: ProgramCategory,
    pub grade: CoachGrade,
    pub min_percent: f32,
    pub max_percent: f32,
}

/// The compensation policy does not cover every (category, grade) pairing.
/// This is a boot defect: the schedule refuses construction rather than
/// failing a lookup later.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteConfiguration {
    pub missing: Vec<(ProgramCategory, CoachGrade)>,
}

impl fmt::Display for IncompleteConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pay band schedule missing {} pairing(s):", self.missing.len())?;
        for (category, grade) in &self.missing {
            write!(f, " {}/{}", category.label(), grade.label())?;
        }
        Ok(())
    }
}

impl std::error::Error for IncompleteConfiguration {}

/// Failure while loading a pay band schedule from an external source.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleLoadError {
    #[error("failed to read pay band file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse pay band file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Incomplete(#[from] IncompleteConfiguration),
}

/// Startup-validated lookup covering all 21 (category, grade) pairings.
///
/// The percentages are business policy supplied by the deploying
/// organization; nothing in the scoring algorithm derives them.
#[derive(Debug, Clone)]
pub struct PayBandSchedule {
    bands: BTreeMap<(ProgramCategory, CoachGrade), PayBand>,
}

impl PayBandSchedule {
    /// Build a schedule from explicit entries, rejecting any policy that
    /// leaves a (category, grade) pairing unmapped. Later entries for the
    /// same pairing override earlier ones.
    pub fn from_entries(
        entries: impl IntoIterator<Item = PayBandEntry>,
    ) -> Result<Self, IncompleteConfiguration> {
        let mut bands = BTreeMap::new();
        for entry in entries {
            bands.insert(
                (entry.category, entry.grade),
                PayBand {
                    min_percent: entry.min_percent,
                    max_percent: entry.max_percent,
                },
            );
        }

        let mut missing = Vec::new();
        for category in ProgramCategory::ALL {
            for grade in CoachGrade::ALL {
                if !bands.contains_key(&(category, grade)) {
                    missing.push((category, grade));
                }
            }
        }

        if missing.is_empty() {
            Ok(Self { bands })
        } else {
            Err(IncompleteConfiguration { missing })
        }
    }

    /// Parse a JSON array of entries (the shape a deploying organization
    /// supplies) and validate coverage.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ScheduleLoadError> {
        let entries: Vec<PayBandEntry> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, ScheduleLoadError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Band for a pairing. Coverage is guaranteed by construction.
    pub fn band_for(&self, category: ProgramCategory, grade: CoachGrade) -> PayBand {
        *self
            .bands
            .get(&(category, grade))
            .expect("pay band schedule covers every category/grade pairing")
    }

    /// The bundled compensation policy, used when no override file is
    /// supplied at startup.
    pub fn standard() -> Self {
        let entries = STANDARD_POLICY.iter().map(|&(category, grade, min, max)| PayBandEntry {
            category,
            grade,
            min_percent: min,
            max_percent: max,
        });
        Self::from_entries(entries).expect("standard policy covers every pairing")
    }
}

type PolicyLine = (ProgramCategory, CoachGrade, f32, f32);

const STANDARD_POLICY: [PolicyLine; 21] = [
    (ProgramCategory::LearnToSwim, CoachGrade::Grade1, 30.0, 34.0),
    (ProgramCategory::LearnToSwim, CoachGrade::Grade2, 34.0, 40.0),
    (ProgramCategory::LearnToSwim, CoachGrade::Grade3, 40.0, 46.0),
    (ProgramCategory::SpecialPopulations, CoachGrade::Grade1, 34.0, 38.0),
    (ProgramCategory::SpecialPopulations, CoachGrade::Grade2, 38.0, 44.0),
    (ProgramCategory::SpecialPopulations, CoachGrade::Grade3, 44.0, 52.0),
    (ProgramCategory::Institutional, CoachGrade::Grade1, 28.0, 32.0),
    (ProgramCategory::Institutional, CoachGrade::Grade2, 32.0, 38.0),
    (ProgramCategory::Institutional, CoachGrade::Grade3, 38.0, 44.0),
    (ProgramCategory::CompetitiveElite, CoachGrade::Grade1, 32.0, 36.0),
    (ProgramCategory::CompetitiveElite, CoachGrade::Grade2, 36.0, 44.0),
    (ProgramCategory::CompetitiveElite, CoachGrade::Grade3, 44.0, 55.0),
    (ProgramCategory::Certifications, CoachGrade::Grade1, 30.0, 35.0),
    (ProgramCategory::Certifications, CoachGrade::Grade2, 35.0, 42.0),
    (ProgramCategory::Certifications, CoachGrade::Grade3, 42.0, 50.0),
    (ProgramCategory::SpecializedDisciplines, CoachGrade::Grade1, 32.0, 36.0),
    (ProgramCategory::SpecializedDisciplines, CoachGrade::Grade2, 36.0, 42.0),
    (ProgramCategory::SpecializedDisciplines, CoachGrade::Grade3, 42.0, 50.0),
    (ProgramCategory::AdjacentServices, CoachGrade::Grade1, 26.0, 30.0),
    (ProgramCategory::AdjacentServices, CoachGrade::Grade2, 30.0, 36.0),
    (ProgramCategory::AdjacentServices, CoachGrade::Grade3, 36.0, 42.0),
];
