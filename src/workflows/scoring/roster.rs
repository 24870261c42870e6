use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{CoachProfile, CoachStats, CohortId, MemberId};

/// Confirms cohort identifiers against the enrollment system of record.
pub trait CohortDirectory: Send + Sync {
    fn exists(&self, cohort_id: &CohortId) -> Result<bool, RosterError>;
}

/// Point-in-time read of the coaching roster maintained by the member
/// service. Callers treat each read as a snapshot; nothing here caches.
pub trait CoachRoster: Send + Sync {
    fn coaches(&self) -> Result<Vec<CoachProfile>, RosterError>;
}

/// Failures reading roster or cohort data from a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed roster entry: {0}")]
    Malformed(String),
}

/// Accepts any non-blank cohort id. Stands in where no enrollment service
/// is wired up, e.g. the shipped demo binary.
#[derive(Debug, Default, Clone)]
pub struct OpenCohortDirectory;

impl CohortDirectory for OpenCohortDirectory {
    fn exists(&self, cohort_id: &CohortId) -> Result<bool, RosterError> {
        Ok(!cohort_id.0.trim().is_empty())
    }
}

/// Fixed roster snapshot, loaded once at startup or seeded in tests.
#[derive(Debug, Default, Clone)]
pub struct StaticRoster {
    coaches: Vec<CoachProfile>,
}

impl StaticRoster {
    pub fn new(coaches: Vec<CoachProfile>) -> Self {
        Self { coaches }
    }
}

impl CoachRoster for StaticRoster {
    fn coaches(&self) -> Result<Vec<CoachProfile>, RosterError> {
        Ok(self.coaches.clone())
    }
}

/// Load a roster snapshot from a member-service CSV export.
///
/// Expected columns: `Member ID`, `Name`, `Email`, `Grade`, `Status`,
/// `Coaching Hours`, `Avg Rating`.
pub fn roster_from_csv<R: Read>(reader: R) -> Result<Vec<CoachProfile>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut coaches = Vec::new();
    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record.map_err(|err| RosterError::Malformed(err.to_string()))?;
        coaches.push(row.into_profile()?);
    }

    Ok(coaches)
}

pub fn roster_from_csv_path(path: &Path) -> Result<Vec<CoachProfile>, RosterError> {
    let file = std::fs::File::open(path)
        .map_err(|err| RosterError::Unavailable(format!("{}: {err}", path.display())))?;
    roster_from_csv(file)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Member ID")]
    member_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Grade")]
    grade: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Coaching Hours", default)]
    coaching_hours: u32,
    #[serde(rename = "Avg Rating", default)]
    avg_rating: f32,
}

impl RosterRow {
    fn into_profile(self) -> Result<CoachProfile, RosterError> {
        let grade = self
            .grade
            .parse()
            .map_err(|err: String| RosterError::Malformed(err))?;
        let status = self
            .status
            .parse()
            .map_err(|err: String| RosterError::Malformed(err))?;

        Ok(CoachProfile {
            member_id: MemberId(self.member_id),
            name: self.name,
            email: self.email,
            grade,
            status,
            stats: CoachStats {
                coaching_hours: self.coaching_hours,
                avg_rating: self.avg_rating,
            },
        })
    }
}
