//! Evaluation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{DEFAULT_SUB_SCORE, MAX_SUB_SCORE, MIN_SUB_SCORE};

use super::role::Category;

/// One jury member's rubric score for one candidate
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub jury_id: Uuid,
    pub elocution: i32,
    pub relevance: i32,
    pub originality: i32,
    pub total_score: i32,
    /// Submitter's full name, joined from profiles
    #[sqlx(default)]
    pub jury_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn scores(&self) -> RubricScores {
        RubricScores {
            elocution: self.elocution,
            relevance: self.relevance,
            originality: self.originality,
        }
    }
}

/// Rubric criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Elocution and charisma
    Elocution,
    /// Relevance of the message
    Relevance,
    /// Originality / innovation
    Originality,
}

/// The three rubric sub-scores, each within [0, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScores {
    pub elocution: i32,
    pub relevance: i32,
    pub originality: i32,
}

impl Default for RubricScores {
    fn default() -> Self {
        Self {
            elocution: DEFAULT_SUB_SCORE,
            relevance: DEFAULT_SUB_SCORE,
            originality: DEFAULT_SUB_SCORE,
        }
    }
}

impl RubricScores {
    /// Sum of the sub-scores; no weighting
    pub fn total(&self) -> i32 {
        self.elocution + self.relevance + self.originality
    }

    pub fn get(&self, criterion: Criterion) -> i32 {
        match criterion {
            Criterion::Elocution => self.elocution,
            Criterion::Relevance => self.relevance,
            Criterion::Originality => self.originality,
        }
    }

    /// Move one sub-score by `delta`, staying within bounds
    pub fn adjust(mut self, criterion: Criterion, delta: i32) -> Self {
        let slot = match criterion {
            Criterion::Elocution => &mut self.elocution,
            Criterion::Relevance => &mut self.relevance,
            Criterion::Originality => &mut self.originality,
        };
        *slot = clamp_sub_score(slot.saturating_add(delta));
        self
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.elocution, self.relevance, self.originality]
            .iter()
            .all(|v| (MIN_SUB_SCORE..=MAX_SUB_SCORE).contains(v))
    }
}

/// `max(0, min(10, value))`
pub fn clamp_sub_score(value: i32) -> i32 {
    value.clamp(MIN_SUB_SCORE, MAX_SUB_SCORE)
}

/// Values for an evaluation upsert keyed by (candidate, jury)
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub candidate_id: Uuid,
    pub jury_id: Uuid,
    pub scores: RubricScores,
}

/// Equality filter over evaluations
#[derive(Debug, Clone, Default)]
pub struct EvaluationFilter {
    pub candidate_id: Option<Uuid>,
    pub jury_id: Option<Uuid>,
    /// Competition of the evaluated candidate
    pub competition: Option<Category>,
}

impl EvaluationFilter {
    pub fn by_jury(jury_id: Uuid) -> Self {
        Self {
            jury_id: Some(jury_id),
            ..Default::default()
        }
    }

    pub fn by_candidate(candidate_id: Uuid) -> Self {
        Self {
            candidate_id: Some(candidate_id),
            ..Default::default()
        }
    }

    pub fn in_competition(category: Category) -> Self {
        Self {
            competition: Some(category),
            ..Default::default()
        }
    }

    /// Whether the id filters accept an evaluation; `competition` needs the candidate profile
    pub fn matches_ids(&self, evaluation: &Evaluation) -> bool {
        self.candidate_id.is_none_or(|id| evaluation.candidate_id == id)
            && self.jury_id.is_none_or(|id| evaluation.jury_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_sub_score() {
        assert_eq!(clamp_sub_score(-3), 0);
        assert_eq!(clamp_sub_score(4), 4);
        assert_eq!(clamp_sub_score(11), 10);
    }

    #[test]
    fn test_delta_sequences_stay_in_bounds() {
        let sequences: [&[i32]; 5] = [
            &[1, 1, 1, 1, 1, 1, 1],
            &[-1, -1, -1, -1, -1, -1, -1],
            &[10, -25, 3],
            &[i32::MAX, i32::MIN, 1],
            &[2, -1, 7, -20, 15, -4],
        ];

        for deltas in sequences {
            let mut scores = RubricScores::default();
            for &delta in deltas {
                scores = scores.adjust(Criterion::Relevance, delta);
                assert!((0..=10).contains(&scores.relevance), "{:?}", deltas);
            }
            assert_eq!(scores.elocution, 5);
            assert_eq!(scores.originality, 5);
        }
    }

    #[test]
    fn test_adjust_saturates_at_edges() {
        let scores = RubricScores::default()
            .adjust(Criterion::Elocution, 6)
            .adjust(Criterion::Originality, -9);
        assert_eq!(scores.elocution, 10);
        assert_eq!(scores.originality, 0);
    }

    #[test]
    fn test_total_is_sum_within_range() {
        for (e, r, o) in [(0, 0, 0), (10, 10, 10), (3, 7, 9), (5, 5, 5)] {
            let scores = RubricScores {
                elocution: e,
                relevance: r,
                originality: o,
            };
            assert_eq!(scores.total(), e + r + o);
            assert!((0..=30).contains(&scores.total()));
        }
    }

    #[test]
    fn test_bounds_check() {
        assert!(RubricScores::default().is_within_bounds());
        let invalid = RubricScores {
            elocution: 11,
            ..Default::default()
        };
        assert!(!invalid.is_within_bounds());
    }
}
