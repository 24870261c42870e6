mod http;

pub use http::HttpAdvisoryClient;

use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::calculator::{DIMENSION_COUNT, MAX_DIMENSION_SCORE, MIN_DIMENSION_SCORE};
use super::domain::{
    AiSuggestion, CoachGrade, CoachRankingSuggestion, CohortId, DimensionSuggestion, EligibleCoach,
    MemberId, ProgramCategory,
};

/// Advisory call failure. Always recoverable: the caller falls back to
/// manual entry (or an unranked eligible list) with no side effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdviceUnavailable {
    #[error("advisory service timed out")]
    Timeout,
    #[error("advisory service unreachable: {0}")]
    Transport(String),
    #[error("advisory service returned a malformed response: {0}")]
    Malformed(String),
    #[error("no advisory service configured")]
    Disabled,
}

/// Wire request asking for a draft score sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRequest {
    pub cohort_id: CohortId,
    pub category: ProgramCategory,
    pub dimension_labels: Vec<String>,
}

/// Raw advisory dimension proposal. Scores and confidences are untrusted
/// until sanitized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDimensionSuggestion {
    pub index: u8,
    pub score: i64,
    #[serde(default)]
    pub rationale: String,
    pub confidence: f64,
}

/// Raw advisory response for a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub dimensions: Vec<RawDimensionSuggestion>,
    #[serde(default)]
    pub overall_rationale: String,
    pub overall_confidence: f64,
}

/// One candidate sent to the ranking endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RankingCandidate {
    pub member_id: MemberId,
    pub grade: CoachGrade,
    pub coaching_hours: u32,
    pub avg_rating: f32,
}

impl From<&EligibleCoach> for RankingCandidate {
    fn from(coach: &EligibleCoach) -> Self {
        Self {
            member_id: coach.member_id.clone(),
            grade: coach.grade,
            coaching_hours: coach.stats.coaching_hours,
            avg_rating: coach.stats.avg_rating,
        }
    }
}

/// Wire request asking for a fit ordering over the eligible pool.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRequest {
    pub cohort_id: CohortId,
    pub category: ProgramCategory,
    pub required_grade: CoachGrade,
    pub coaches: Vec<RankingCandidate>,
}

/// Raw advisory ranking entry, untrusted until matched against the
/// eligible pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCoachRanking {
    pub member_id: String,
    pub match_score: f64,
    #[serde(default)]
    pub rationale: String,
}

/// Raw advisory response for a ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    pub rankings: Vec<RawCoachRanking>,
}

/// Transport seam for the two advisory endpoints. Implementations own the
/// network call and its timeout; callers only ever see `AdviceUnavailable`.
pub trait AdvisoryGateway: Send + Sync {
    fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> impl Future<Output = Result<SuggestionResponse, AdviceUnavailable>> + Send;

    fn rank(
        &self,
        request: RankingRequest,
    ) -> impl Future<Output = Result<RankingResponse, AdviceUnavailable>> + Send;
}

/// Gateway used when no advisory endpoint is configured; every call fails
/// with the recoverable `Disabled` error.
#[derive(Debug, Default, Clone)]
pub struct DisabledAdvisory;

impl AdvisoryGateway for DisabledAdvisory {
    async fn suggest(
        &self,
        _request: SuggestionRequest,
    ) -> Result<SuggestionResponse, AdviceUnavailable> {
        Err(AdviceUnavailable::Disabled)
    }

    async fn rank(&self, _request: RankingRequest) -> Result<RankingResponse, AdviceUnavailable> {
        Err(AdviceUnavailable::Disabled)
    }
}

/// Gateway selection resolved from configuration at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredAdvisory {
    Http(HttpAdvisoryClient),
    Disabled(DisabledAdvisory),
}

impl AdvisoryGateway for ConfiguredAdvisory {
    async fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, AdviceUnavailable> {
        match self {
            ConfiguredAdvisory::Http(client) => client.suggest(request).await,
            ConfiguredAdvisory::Disabled(gateway) => gateway.suggest(request).await,
        }
    }

    async fn rank(&self, request: RankingRequest) -> Result<RankingResponse, AdviceUnavailable> {
        match self {
            ConfiguredAdvisory::Http(client) => client.rank(request).await,
            ConfiguredAdvisory::Disabled(gateway) => gateway.rank(request).await,
        }
    }
}

/// Sanitize a raw advisory payload into a draft-ready suggestion.
///
/// Scores clamp to the manual-entry bounds and confidences to the unit
/// interval. A payload that does not carry exactly one proposal per
/// dimension is rejected outright rather than padded.
pub fn sanitize_suggestion(
    category: ProgramCategory,
    response: SuggestionResponse,
) -> Result<AiSuggestion, AdviceUnavailable> {
    if response.dimensions.len() != DIMENSION_COUNT as usize {
        return Err(AdviceUnavailable::Malformed(format!(
            "expected {DIMENSION_COUNT} dimension suggestions, got {}",
            response.dimensions.len()
        )));
    }

    let mut seen = [false; DIMENSION_COUNT as usize + 1];
    let mut dimensions = Vec::with_capacity(DIMENSION_COUNT as usize);
    for raw in response.dimensions {
        if !(1..=DIMENSION_COUNT).contains(&raw.index) {
            return Err(AdviceUnavailable::Malformed(format!(
                "dimension index {} outside 1-{DIMENSION_COUNT}",
                raw.index
            )));
        }
        if seen[raw.index as usize] {
            return Err(AdviceUnavailable::Malformed(format!(
                "dimension index {} suggested twice",
                raw.index
            )));
        }
        seen[raw.index as usize] = true;

        let score = raw
            .score
            .clamp(MIN_DIMENSION_SCORE as i64, MAX_DIMENSION_SCORE as i64) as u8;

        dimensions.push(DimensionSuggestion {
            index: raw.index,
            score,
            rationale: raw.rationale,
            confidence: clamp_unit(raw.confidence),
        });
    }

    dimensions.sort_by_key(|dimension| dimension.index);

    Ok(AiSuggestion {
        category,
        dimensions,
        overall_rationale: response.overall_rationale,
        overall_confidence: clamp_unit(response.overall_confidence),
    })
}

/// Apply the advisory ordering to the eligible pool.
///
/// Member ids the pool does not contain (and repeats of ones it does) are
/// dropped and logged as data-quality anomalies; the external order of the
/// survivors is preserved untouched. Ranking never changes who is eligible.
pub fn sanitize_ranking(
    response: RankingResponse,
    eligible: &[EligibleCoach],
) -> Vec<CoachRankingSuggestion> {
    let by_id: BTreeMap<&MemberId, &EligibleCoach> = eligible
        .iter()
        .map(|coach| (&coach.member_id, coach))
        .collect();

    let mut ranked_ids = std::collections::BTreeSet::new();
    let mut suggestions = Vec::new();
    for raw in response.rankings {
        let member_id = MemberId(raw.member_id);
        let Some(coach) = by_id.get(&member_id) else {
            warn!(member_id = %member_id, "advisory ranking referenced a coach outside the eligible pool");
            continue;
        };
        if !ranked_ids.insert(member_id.clone()) {
            warn!(member_id = %member_id, "advisory ranking repeated a coach");
            continue;
        }

        suggestions.push(CoachRankingSuggestion {
            member_id,
            match_score: clamp_unit(raw.match_score),
            rationale: raw.rationale,
            grade: coach.grade,
            stats: coach.stats,
        });
    }

    suggestions
}

fn clamp_unit(value: f64) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0) as f32
    } else {
        0.0
    }
}
