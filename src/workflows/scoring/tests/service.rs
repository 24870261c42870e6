use std::sync::Arc;

use super::common::*;
use crate::workflows::scoring::domain::{CoachGrade, ProgramCategory};
use crate::workflows::scoring::repository::{InMemoryScoreRepository, RepositoryError, ScoreRepository};
use crate::workflows::scoring::service::{CohortScoringService, ScoringServiceError};

#[test]
fn create_persists_derived_fields() {
    let (service, repository, _, _) = build_service();

    let record = service
        .create(cohort("c-1"), ProgramCategory::LearnToSwim, uniform_scores(3))
        .expect("first score commits");

    assert_eq!(record.total_score, 21);
    assert_eq!(record.required_grade, CoachGrade::Grade2);
    assert_eq!(record.scores.len(), 7);
    assert_eq!(record.created_at, record.updated_at);

    let stored = repository
        .fetch(&cohort("c-1"))
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn create_rejects_a_second_score_for_the_same_cohort() {
    let (service, _, _, _) = build_service();
    service
        .create(cohort("c-2"), ProgramCategory::LearnToSwim, uniform_scores(3))
        .expect("first score commits");

    match service.create(cohort("c-2"), ProgramCategory::Institutional, uniform_scores(2)) {
        Err(ScoringServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn create_checks_the_cohort_directory() {
    let repository = Arc::new(InMemoryScoreRepository::default());
    let service = CohortScoringService::new(
        repository,
        Arc::new(ClosedDirectory::knowing(&["c-known"])),
        Arc::new(MemoryRoster::with_coaches(roster())),
        Arc::new(ScriptedAdvisory::default()),
        calculator(),
    );

    service
        .create(cohort("c-known"), ProgramCategory::LearnToSwim, uniform_scores(3))
        .expect("known cohort commits");

    match service.create(cohort("c-ghost"), ProgramCategory::LearnToSwim, uniform_scores(3)) {
        Err(ScoringServiceError::UnknownCohort(id)) => assert_eq!(id.0, "c-ghost"),
        other => panic!("expected unknown cohort, got {other:?}"),
    }
}

#[test]
fn preview_matches_what_create_would_store() {
    let (service, _, _, _) = build_service();
    let scores = scores_from([4, 3, 5, 2, 4, 3, 4]);

    let previewed = service
        .preview(ProgramCategory::Certifications, &scores)
        .expect("preview derives");
    let record = service
        .create(cohort("c-3"), ProgramCategory::Certifications, scores)
        .expect("commit succeeds");

    assert_eq!(previewed.total_score, record.total_score);
    assert_eq!(previewed.required_grade, record.required_grade);
    assert_eq!(previewed.pay_band, record.pay_band);
}

#[test]
fn preview_never_touches_storage() {
    let (service, repository, _, _) = build_service();
    service
        .preview(ProgramCategory::LearnToSwim, &uniform_scores(4))
        .expect("preview derives");

    assert!(repository
        .fetch(&cohort("c-preview"))
        .expect("fetch succeeds")
        .is_none());
}

#[test]
fn update_replaces_the_full_sheet() {
    let (service, _, _, _) = build_service();
    let original = service
        .create(cohort("c-4"), ProgramCategory::LearnToSwim, uniform_scores(5))
        .expect("first score commits");

    let mut replacement = uniform_scores(1);
    replacement[0].rationale = Some("small returning group".to_string());
    let updated = service
        .update(cohort("c-4"), ProgramCategory::Institutional, replacement)
        .expect("rescore commits");

    assert_eq!(updated.category, ProgramCategory::Institutional);
    assert_eq!(updated.total_score, 7);
    assert_eq!(updated.required_grade, CoachGrade::Grade1);
    assert_eq!(
        updated.scores[0].rationale.as_deref(),
        Some("small returning group")
    );
    assert!(updated.scores[1..].iter().all(|entry| entry.rationale.is_none()));
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    let fetched = service.get(&cohort("c-4")).expect("record readable");
    assert_eq!(fetched, updated);
}

#[test]
fn update_requires_an_existing_record() {
    let (service, _, _, _) = build_service();

    match service.update(cohort("c-5"), ProgramCategory::LearnToSwim, uniform_scores(3)) {
        Err(ScoringServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn invalid_sheets_reject_atomically() {
    let (service, repository, _, _) = build_service();
    let mut scores = uniform_scores(3);
    scores[2].score = 0;

    match service.create(cohort("c-6"), ProgramCategory::LearnToSwim, scores) {
        Err(ScoringServiceError::InvalidScores(_)) => {}
        other => panic!("expected invalid scores, got {other:?}"),
    }

    assert!(repository
        .fetch(&cohort("c-6"))
        .expect("fetch succeeds")
        .is_none());
}

#[test]
fn delete_then_get_reports_not_found() {
    let (service, _, _, _) = build_service();
    service
        .create(cohort("c-7"), ProgramCategory::LearnToSwim, uniform_scores(3))
        .expect("score commits");

    service.delete(&cohort("c-7")).expect("delete succeeds");

    match service.get(&cohort("c-7")) {
        Err(ScoringServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn delete_requires_an_existing_record() {
    let (service, _, _, _) = build_service();

    match service.delete(&cohort("c-8")) {
        Err(ScoringServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn scores_are_stored_sorted_by_dimension_index() {
    let (service, _, _, _) = build_service();
    let mut scores = uniform_scores(3);
    scores.reverse();

    let record = service
        .create(cohort("c-9"), ProgramCategory::LearnToSwim, scores)
        .expect("score commits");

    let indices: Vec<u8> = record.scores.iter().map(|entry| entry.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
}
