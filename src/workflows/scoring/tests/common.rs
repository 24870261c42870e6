use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::scoring::advisor::{
    AdviceUnavailable, AdvisoryGateway, RankingRequest, RankingResponse, RawCoachRanking,
    RawDimensionSuggestion, SuggestionRequest, SuggestionResponse,
};
use crate::workflows::scoring::calculator::{PayBandSchedule, ScoreCalculator};
use crate::workflows::scoring::domain::{
    CoachGrade, CoachProfile, CoachStats, CoachStatus, CohortId, DimensionScore, MemberId,
};
use crate::workflows::scoring::repository::InMemoryScoreRepository;
use crate::workflows::scoring::roster::{CoachRoster, CohortDirectory, OpenCohortDirectory, RosterError};
use crate::workflows::scoring::service::CohortScoringService;

pub(super) fn schedule() -> PayBandSchedule {
    PayBandSchedule::standard()
}

pub(super) fn calculator() -> ScoreCalculator {
    ScoreCalculator::new(schedule())
}

pub(super) fn cohort(id: &str) -> CohortId {
    CohortId(id.to_string())
}

pub(super) fn uniform_scores(score: u8) -> Vec<DimensionScore> {
    (1..=7)
        .map(|index| DimensionScore {
            index,
            score,
            rationale: None,
        })
        .collect()
}

pub(super) fn scores_from(values: [u8; 7]) -> Vec<DimensionScore> {
    values
        .iter()
        .enumerate()
        .map(|(position, &score)| DimensionScore {
            index: position as u8 + 1,
            score,
            rationale: None,
        })
        .collect()
}

pub(super) fn coach(
    id: &str,
    name: &str,
    grade: CoachGrade,
    status: CoachStatus,
) -> CoachProfile {
    CoachProfile {
        member_id: MemberId(id.to_string()),
        name: name.to_string(),
        email: format!("{id}@poolcoach.test"),
        grade,
        status,
        stats: CoachStats {
            coaching_hours: 250,
            avg_rating: 4.4,
        },
    }
}

pub(super) fn roster() -> Vec<CoachProfile> {
    vec![
        coach("m-101", "Avery Brooks", CoachGrade::Grade1, CoachStatus::Approved),
        coach("m-102", "Dana Whitfield", CoachGrade::Grade2, CoachStatus::Approved),
        coach("m-103", "Jordan Li", CoachGrade::Grade3, CoachStatus::Approved),
        coach("m-104", "Sam Ortiz", CoachGrade::Grade3, CoachStatus::Suspended),
    ]
}

/// Roster fake whose snapshot can be swapped between reads.
#[derive(Default, Clone)]
pub(super) struct MemoryRoster {
    coaches: Arc<Mutex<Vec<CoachProfile>>>,
}

impl MemoryRoster {
    pub(super) fn with_coaches(coaches: Vec<CoachProfile>) -> Self {
        Self {
            coaches: Arc::new(Mutex::new(coaches)),
        }
    }

    pub(super) fn set(&self, coaches: Vec<CoachProfile>) {
        *self.coaches.lock().expect("roster mutex poisoned") = coaches;
    }
}

impl CoachRoster for MemoryRoster {
    fn coaches(&self) -> Result<Vec<CoachProfile>, RosterError> {
        Ok(self.coaches.lock().expect("roster mutex poisoned").clone())
    }
}

/// Directory fake recognizing only a fixed id set.
pub(super) struct ClosedDirectory {
    known: Vec<String>,
}

impl ClosedDirectory {
    pub(super) fn knowing(ids: &[&str]) -> Self {
        Self {
            known: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl CohortDirectory for ClosedDirectory {
    fn exists(&self, cohort_id: &CohortId) -> Result<bool, RosterError> {
        Ok(self.known.iter().any(|id| id == &cohort_id.0))
    }
}

/// Advisory fake with scripted responses and call counters.
pub(super) struct ScriptedAdvisory {
    pub(super) suggestion: Mutex<Result<SuggestionResponse, AdviceUnavailable>>,
    pub(super) ranking: Mutex<Result<RankingResponse, AdviceUnavailable>>,
    pub(super) suggest_calls: AtomicUsize,
    pub(super) rank_calls: AtomicUsize,
}

impl Default for ScriptedAdvisory {
    fn default() -> Self {
        Self {
            suggestion: Mutex::new(Ok(suggestion_response())),
            ranking: Mutex::new(Ok(RankingResponse {
                rankings: Vec::new(),
            })),
            suggest_calls: AtomicUsize::new(0),
            rank_calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedAdvisory {
    pub(super) fn script_suggestion(&self, result: Result<SuggestionResponse, AdviceUnavailable>) {
        *self.suggestion.lock().expect("advisory mutex poisoned") = result;
    }

    pub(super) fn script_ranking(&self, result: Result<RankingResponse, AdviceUnavailable>) {
        *self.ranking.lock().expect("advisory mutex poisoned") = result;
    }

    pub(super) fn suggest_call_count(&self) -> usize {
        self.suggest_calls.load(Ordering::SeqCst)
    }

    pub(super) fn rank_call_count(&self) -> usize {
        self.rank_calls.load(Ordering::SeqCst)
    }
}

impl AdvisoryGateway for ScriptedAdvisory {
    async fn suggest(
        &self,
        _request: SuggestionRequest,
    ) -> Result<SuggestionResponse, AdviceUnavailable> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        self.suggestion
            .lock()
            .expect("advisory mutex poisoned")
            .clone()
    }

    async fn rank(&self, _request: RankingRequest) -> Result<RankingResponse, AdviceUnavailable> {
        self.rank_calls.fetch_add(1, Ordering::SeqCst);
        self.ranking.lock().expect("advisory mutex poisoned").clone()
    }
}

pub(super) fn suggestion_response() -> SuggestionResponse {
    SuggestionResponse {
        dimensions: (1..=7)
            .map(|index| RawDimensionSuggestion {
                index,
                score: 3,
                rationale: format!("dimension {index} looks moderate"),
                confidence: 0.8,
            })
            .collect(),
        overall_rationale: "balanced cohort".to_string(),
        overall_confidence: 0.75,
    }
}

pub(super) fn ranking_response(entries: &[(&str, f64)]) -> RankingResponse {
    RankingResponse {
        rankings: entries
            .iter()
            .map(|(member_id, match_score)| RawCoachRanking {
                member_id: member_id.to_string(),
                match_score: *match_score,
                rationale: format!("{member_id} fits"),
            })
            .collect(),
    }
}

pub(super) type TestService =
    CohortScoringService<InMemoryScoreRepository, OpenCohortDirectory, MemoryRoster, ScriptedAdvisory>;

pub(super) fn build_service() -> (
    Arc<TestService>,
    Arc<InMemoryScoreRepository>,
    Arc<MemoryRoster>,
    Arc<ScriptedAdvisory>,
) {
    let repository = Arc::new(InMemoryScoreRepository::default());
    let roster = Arc::new(MemoryRoster::with_coaches(roster()));
    let advisory = Arc::new(ScriptedAdvisory::default());
    let service = Arc::new(CohortScoringService::new(
        repository.clone(),
        Arc::new(OpenCohortDirectory),
        roster.clone(),
        advisory.clone(),
        calculator(),
    ));
    (service, repository, roster, advisory)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
