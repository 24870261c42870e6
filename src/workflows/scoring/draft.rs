use serde::{Deserialize, Serialize};

use super::domain::{AiSuggestion, DimensionScore, ProgramCategory};

/// Where a draft's values came from. Advisory drafts stay distinguishable
/// from hand-entered ones until an explicit save commits either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSource {
    Manual,
    Advisory,
}

/// Working score sheet a caller holds before an explicit save.
///
/// Drafts are plain values: accepting a suggestion or editing a dimension
/// builds a new draft and leaves both the current draft and any committed
/// record untouched. Only the service's create/update calls move a sheet
/// from draft to committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDraft {
    pub category: ProgramCategory,
    pub scores: Vec<DimensionScore>,
    pub source: DraftSource,
}

impl ScoreDraft {
    /// Fresh manual draft with every dimension at the minimum score.
    pub fn blank(category: ProgramCategory) -> Self {
        let scores = (1..=7)
            .map(|index| DimensionScore {
                index,
                score: 1,
                rationale: None,
            })
            .collect();

        Self {
            category,
            scores,
            source: DraftSource::Manual,
        }
    }

    /// The draft a caller sees after accepting an advisory proposal.
    pub fn with_suggestion(&self, suggestion: &AiSuggestion) -> Self {
        let scores = suggestion
            .dimensions
            .iter()
            .map(|dimension| DimensionScore {
                index: dimension.index,
                score: dimension.score,
                rationale: Some(dimension.rationale.clone()),
            })
            .collect();

        Self {
            category: suggestion.category,
            scores,
            source: DraftSource::Advisory,
        }
    }

    /// Replace one dimension by hand, turning the draft back into a manual
    /// edit.
    pub fn with_score(&self, index: u8, score: u8, rationale: Option<String>) -> Self {
        let scores = self
            .scores
            .iter()
            .map(|entry| {
                if entry.index == index {
                    DimensionScore {
                        index,
                        score,
                        rationale: rationale.clone(),
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();

        Self {
            category: self.category,
            scores,
            source: DraftSource::Manual,
        }
    }
}
