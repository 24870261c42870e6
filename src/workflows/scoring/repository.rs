use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{CohortId, ComplexityScoreRecord};

/// Storage abstraction keeping at most one committed score per cohort.
///
/// Implementations must make each call atomic: `insert` performs its
/// duplicate check and write under one critical section (or unique-key
/// constraint), and likewise `replace`/`remove`, so concurrent submissions
/// for the same cohort serialize instead of losing updates.
pub trait ScoreRepository: Send + Sync {
    /// Insert the first record for a cohort. `Conflict` when one exists.
    fn insert(
        &self,
        record: ComplexityScoreRecord,
    ) -> Result<ComplexityScoreRecord, RepositoryError>;

    /// Replace the record of an already-scored cohort. `NotFound` when absent.
    fn replace(
        &self,
        record: ComplexityScoreRecord,
    ) -> Result<ComplexityScoreRecord, RepositoryError>;

    fn fetch(&self, cohort_id: &CohortId)
        -> Result<Option<ComplexityScoreRecord>, RepositoryError>;

    /// Remove the record. `NotFound` when absent. Subsequent reads observe
    /// the absence immediately.
    fn remove(&self, cohort_id: &CohortId) -> Result<(), RepositoryError>;
}

/// Error enumeration for score store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("cohort already has a committed score")]
    Conflict,
    #[error("no committed score for cohort")]
    NotFound,
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-backed store. The single lock serializes create/update/delete per
/// cohort; reads after a remove observe the absence immediately.
#[derive(Default, Clone)]
pub struct InMemoryScoreRepository {
    records: Arc<Mutex<HashMap<CohortId, ComplexityScoreRecord>>>,
}

impl ScoreRepository for InMemoryScoreRepository {
    fn insert(
        &self,
        record: ComplexityScoreRecord,
    ) -> Result<ComplexityScoreRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("score store mutex poisoned");
        if guard.contains_key(&record.cohort_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.cohort_id.clone(), record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        record: ComplexityScoreRecord,
    ) -> Result<ComplexityScoreRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("score store mutex poisoned");
        if !guard.contains_key(&record.cohort_id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.cohort_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        cohort_id: &CohortId,
    ) -> Result<Option<ComplexityScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("score store mutex poisoned");
        Ok(guard.get(cohort_id).cloned())
    }

    fn remove(&self, cohort_id: &CohortId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("score store mutex poisoned");
        match guard.remove(cohort_id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}
