//! Scoring and aggregation
//!
//! Pure computations over evaluations that were already fetched: the
//! per-candidate mean, category rankings and the jury/president boards.
//! The clamp rule for sub-scores lives with [`crate::models::RubricScores`].

pub mod board;
pub mod ranking;

pub use board::{
    CandidateCard, JuryBoardEntry, PeerEvaluation, PresidentBoardEntry, ScoreAction, ScoreView,
    jury_board, president_board,
};
pub use ranking::{
    CategoryRanking, RankingRow, ResultsSummary, ScoreSummary, rank_all, rank_category, round2,
};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::{Evaluation, Profile};

    pub fn candidate(name: &str, competition: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            role: "candidat".to_string(),
            speciality: None,
            competition: Some(competition.to_string()),
            phone: Some("70000000".to_string()),
            email: None,
            document_url: None,
            videos: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn evaluation(candidate_id: Uuid, jury_id: Uuid, total: i32) -> Evaluation {
        let third = total / 3;
        Evaluation {
            id: Uuid::new_v4(),
            candidate_id,
            jury_id,
            elocution: third,
            relevance: third,
            originality: total - 2 * third,
            total_score: total,
            jury_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn named_evaluation(candidate_id: Uuid, jury_id: Uuid, total: i32, name: &str) -> Evaluation {
        Evaluation {
            jury_name: Some(name.to_string()),
            ..evaluation(candidate_id, jury_id, total)
        }
    }
}
