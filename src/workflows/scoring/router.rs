use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::advisor::AdvisoryGateway;
use super::calculator::DerivedScore;
use super::catalog;
use super::domain::{CohortId, DimensionScore, ProgramCategory, UnknownCategory};
use super::repository::{RepositoryError, ScoreRepository};
use super::roster::{CoachRoster, CohortDirectory};
use super::service::{CohortScoringService, ScoringServiceError};

/// Router builder exposing the scoring, eligibility, and advisory endpoints.
pub fn scoring_router<R, D, N, A>(service: Arc<CohortScoringService<R, D, N, A>>) -> Router
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/catalog/:category/dimensions",
            get(dimension_labels_handler),
        )
        .route("/api/v1/scores/preview", post(preview_handler::<R, D, N, A>))
        .route(
            "/api/v1/cohorts/:cohort_id/score",
            post(create_handler::<R, D, N, A>)
                .get(get_handler::<R, D, N, A>)
                .put(update_handler::<R, D, N, A>)
                .delete(delete_handler::<R, D, N, A>),
        )
        .route(
            "/api/v1/cohorts/:cohort_id/eligible-coaches",
            get(eligible_handler::<R, D, N, A>),
        )
        .route(
            "/api/v1/cohorts/:cohort_id/advice/dimensions",
            post(suggest_handler::<R, D, N, A>),
        )
        .route(
            "/api/v1/cohorts/:cohort_id/advice/ranking",
            post(ranking_handler::<R, D, N, A>),
        )
        .with_state(service)
}

/// Submission payload shared by create, update, and preview. The category
/// arrives as a string so unknown values surface as a typed error instead
/// of a bare deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub category: String,
    pub scores: Vec<DimensionScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionParams {
    pub category: String,
}

#[derive(Debug, Serialize)]
struct PreviewView {
    category: ProgramCategory,
    #[serde(flatten)]
    derived: DerivedScore,
}

#[derive(Debug, Serialize)]
struct DimensionLabelsView {
    category: ProgramCategory,
    labels: [&'static str; 7],
}

pub(crate) async fn dimension_labels_handler(Path(category): Path<String>) -> Response {
    match category.parse::<ProgramCategory>() {
        Ok(category) => {
            let view = DimensionLabelsView {
                category,
                labels: *catalog::dimension_labels(category),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => unknown_category_response(error),
    }
}

pub(crate) async fn create_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    let category = match submission.category.parse::<ProgramCategory>() {
        Ok(category) => category,
        Err(error) => return unknown_category_response(error),
    };

    match service.create(CohortId(cohort_id), category, submission.scores) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    let category = match submission.category.parse::<ProgramCategory>() {
        Ok(category) => category,
        Err(error) => return unknown_category_response(error),
    };

    match service.update(CohortId(cohort_id), category, submission.scores) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    match service.get(&CohortId(cohort_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    match service.delete(&CohortId(cohort_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    let category = match submission.category.parse::<ProgramCategory>() {
        Ok(category) => category,
        Err(error) => return unknown_category_response(error),
    };

    match service.preview(category, &submission.scores) {
        Ok(derived) => {
            let view = PreviewView { category, derived };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligible_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    match service.eligible_coaches(&CohortId(cohort_id)) {
        Ok(coaches) => (StatusCode::OK, axum::Json(coaches)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn suggest_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
    axum::Json(params): axum::Json<SuggestionParams>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    let category = match params.category.parse::<ProgramCategory>() {
        Ok(category) => category,
        Err(error) => return unknown_category_response(error),
    };

    match service.suggest_dimensions(CohortId(cohort_id), category).await {
        Ok(suggestion) => (StatusCode::OK, axum::Json(suggestion)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranking_handler<R, D, N, A>(
    State(service): State<Arc<CohortScoringService<R, D, N, A>>>,
    Path(cohort_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    D: CohortDirectory + 'static,
    N: CoachRoster + 'static,
    A: AdvisoryGateway + 'static,
{
    match service.rank_coaches(&CohortId(cohort_id)).await {
        Ok(rankings) => (StatusCode::OK, axum::Json(rankings)).into_response(),
        Err(error) => error_response(error),
    }
}

fn unknown_category_response(error: UnknownCategory) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn error_response(error: ScoringServiceError) -> Response {
    let status = match &error {
        ScoringServiceError::InvalidScores(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringServiceError::UnknownCohort(_) | ScoringServiceError::NotScored => {
            StatusCode::NOT_FOUND
        }
        ScoringServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ScoringServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScoringServiceError::Repository(RepositoryError::Unavailable(_))
        | ScoringServiceError::Roster(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ScoringServiceError::Advice(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let payload = match &error {
        ScoringServiceError::InvalidScores(detail) => json!({
            "error": error.to_string(),
            "issues": detail.issues,
        }),
        _ => json!({ "error": error.to_string() }),
    };

    (status, axum::Json(payload)).into_response()
}
