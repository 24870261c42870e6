//! Cohort complexity scoring, coach qualification, and advisory matching.
//!
//! An assessor scores a cohort on seven category-specific dimensions; the
//! calculator derives the total, the required coach grade, and the pay
//! band; the service keeps one committed record per cohort and resolves
//! which roster coaches qualify. Two advisory endpoints can pre-fill a
//! draft sheet and order the eligible pool, but their output is advice
//! only and never reaches storage on its own.

pub mod advisor;
pub mod calculator;
pub mod catalog;
pub mod domain;
pub mod draft;
pub mod eligibility;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use advisor::{
    AdviceUnavailable, AdvisoryGateway, ConfiguredAdvisory, DisabledAdvisory, HttpAdvisoryClient,
};
pub use calculator::{
    DerivedScore, IncompleteConfiguration, InvalidScoreInput, PayBandEntry, PayBandSchedule,
    ScheduleLoadError, ScoreCalculator, ScoreInputIssue,
};
pub use domain::{
    AiSuggestion, CoachGrade, CoachProfile, CoachRankingSuggestion, CoachStats, CoachStatus,
    CohortId, ComplexityScoreRecord, DimensionScore, DimensionSuggestion, EligibleCoach, MemberId,
    PayBand, ProgramCategory, UnknownCategory,
};
pub use draft::{DraftSource, ScoreDraft};
pub use repository::{InMemoryScoreRepository, RepositoryError, ScoreRepository};
pub use roster::{
    roster_from_csv, roster_from_csv_path, CoachRoster, CohortDirectory, OpenCohortDirectory,
    RosterError, StaticRoster,
};
pub use router::{scoring_router, ScoreSubmission, SuggestionParams};
pub use service::{CohortScoringService, ScoringServiceError};
