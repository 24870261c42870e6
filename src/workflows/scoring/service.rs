use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::advisor::{
    self, AdviceUnavailable, AdvisoryGateway, RankingCandidate, RankingRequest, SuggestionRequest,
};
use super::calculator::{DerivedScore, InvalidScoreInput, ScoreCalculator};
use super::catalog;
use super::domain::{
    AiSuggestion, CoachRankingSuggestion, CohortId, ComplexityScoreRecord, DimensionScore,
    EligibleCoach, ProgramCategory,
};
use super::eligibility::eligible_from_roster;
use super::repository::{RepositoryError, ScoreRepository};
use super::roster::{CoachRoster, CohortDirectory, RosterError};

/// Facade composing the score store, roster collaborators, calculator, and
/// advisory gateway. CRUD and eligibility are synchronous; only the two
/// advisory calls await the network.
pub struct CohortScoringService<R, D, N, A> {
    repository: Arc<R>,
    directory: Arc<D>,
    roster: Arc<N>,
    advisory: Arc<A>,
    calculator: Arc<ScoreCalculator>,
}

impl<R, D, N, A> CohortScoringService<R, D, N, A>
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        roster: Arc<N>,
        advisory: Arc<A>,
        calculator: ScoreCalculator,
    ) -> Self {
        Self {
            repository,
            directory,
            roster,
            advisory,
            calculator: Arc::new(calculator),
        }
    }

    /// Commit the first score sheet for a cohort.
    pub fn create(
        &self,
        cohort_id: CohortId,
        category: ProgramCategory,
        scores: Vec<DimensionScore>,
    ) -> Result<ComplexityScoreRecord, ScoringServiceError> {
        self.ensure_cohort(&cohort_id)?;
        let record = self.build_record(cohort_id, category, scores, None)?;
        let stored = self.repository.insert(record)?;
        info!(
            cohort_id = %stored.cohort_id,
            total_score = stored.total_score,
            required_grade = stored.required_grade.label(),
            "committed cohort complexity score"
        );
        Ok(stored)
    }

    /// Fully replace a cohort's committed sheet: category, all seven
    /// dimensions, and every derived field. Nothing from the prior sheet
    /// survives except `created_at`.
    pub fn update(
        &self,
        cohort_id: CohortId,
        category: ProgramCategory,
        scores: Vec<DimensionScore>,
    ) -> Result<ComplexityScoreRecord, ScoringServiceError> {
        let existing = self
            .repository
            .fetch(&cohort_id)?
            .ok_or(RepositoryError::NotFound)?;

        let record = self.build_record(cohort_id, category, scores, Some(existing.created_at))?;
        let stored = self.repository.replace(record)?;
        info!(
            cohort_id = %stored.cohort_id,
            total_score = stored.total_score,
            required_grade = stored.required_grade.label(),
            "replaced cohort complexity score"
        );
        Ok(stored)
    }

    pub fn get(&self, cohort_id: &CohortId) -> Result<ComplexityScoreRecord, ScoringServiceError> {
        let record = self
            .repository
            .fetch(cohort_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Remove a cohort's committed score. Eligibility immediately observes
    /// the absence; the cohort must be rescored before matching resumes.
    pub fn delete(&self, cohort_id: &CohortId) -> Result<(), ScoringServiceError> {
        self.repository.remove(cohort_id)?;
        info!(cohort_id = %cohort_id, "deleted cohort complexity score");
        Ok(())
    }

    /// Derive what a commit would store, without touching storage. Output
    /// is identical to the derived fields create/update would persist for
    /// the same inputs.
    pub fn preview(
        &self,
        category: ProgramCategory,
        scores: &[DimensionScore],
    ) -> Result<DerivedScore, ScoringServiceError> {
        Ok(self.calculator.compute(category, scores)?)
    }

    /// Coaches cleared to run the cohort at its committed grade
    /// requirement, in stable name order.
    pub fn eligible_coaches(
        &self,
        cohort_id: &CohortId,
    ) -> Result<Vec<EligibleCoach>, ScoringServiceError> {
        let record = self
            .repository
            .fetch(cohort_id)?
            .ok_or(ScoringServiceError::NotScored)?;
        let roster = self.roster.coaches()?;
        Ok(eligible_from_roster(roster, record.required_grade))
    }

    /// Ask the advisory service for a draft score sheet. The response is
    /// sanitized to manual-entry bounds and returned to the caller as draft
    /// material; nothing is persisted here.
    pub async fn suggest_dimensions(
        &self,
        cohort_id: CohortId,
        category: ProgramCategory,
    ) -> Result<AiSuggestion, ScoringServiceError> {
        self.ensure_cohort(&cohort_id)?;

        let labels = catalog::dimension_labels(category);
        let request = SuggestionRequest {
            cohort_id,
            category,
            dimension_labels: labels.iter().map(|label| label.to_string()).collect(),
        };

        let response = self.advisory.suggest(request).await?;
        Ok(advisor::sanitize_suggestion(category, response)?)
    }

    /// Advisory fit ordering over the eligible pool. An empty pool
    /// short-circuits to an empty list without calling the advisory
    /// service. The result is read-only advice: it never alters
    /// eligibility and never persists an assignment.
    pub async fn rank_coaches(
        &self,
        cohort_id: &CohortId,
    ) -> Result<Vec<CoachRankingSuggestion>, ScoringServiceError> {
        let record = self
            .repository
            .fetch(cohort_id)?
            .ok_or(ScoringServiceError::NotScored)?;

        let roster = self.roster.coaches()?;
        let eligible = eligible_from_roster(roster, record.required_grade);
        if eligible.is_empty() {
            return Ok(Vec::new());
        }

        let request = RankingRequest {
            cohort_id: record.cohort_id.clone(),
            category: record.category,
            required_grade: record.required_grade,
            coaches: eligible.iter().map(RankingCandidate::from).collect(),
        };

        let response = self.advisory.rank(request).await?;
        Ok(advisor::sanitize_ranking(response, &eligible))
    }

    fn ensure_cohort(&self, cohort_id: &CohortId) -> Result<(), ScoringServiceError> {
        if self.directory.exists(cohort_id)? {
            Ok(())
        } else {
            Err(ScoringServiceError::UnknownCohort(cohort_id.clone()))
        }
    }

    fn build_record(
        &self,
        cohort_id: CohortId,
        category: ProgramCategory,
        mut scores: Vec<DimensionScore>,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<ComplexityScoreRecord, ScoringServiceError> {
        let derived = self.calculator.compute(category, &scores)?;
        scores.sort_by_key(|entry| entry.index);

        let now = Utc::now();
        Ok(ComplexityScoreRecord {
            cohort_id,
            category,
            scores,
            total_score: derived.total_score,
            required_grade: derived.required_grade,
            pay_band: derived.pay_band,
            created_at: created_at.unwrap_or(now),
            updated_at: now,
        })
    }
}

/// Error raised by the scoring service facade.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    InvalidScores(#[from] InvalidScoreInput),
    #[error("unknown cohort '{0}'")]
    UnknownCohort(CohortId),
    #[error("cohort has not been scored yet")]
    NotScored,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Advice(#[from] AdviceUnavailable),
}
