//! Jury and president dashboards
//!
//! Both boards are computed from lists that were already fetched for the
//! jury's base category; nothing here touches a store.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Evaluation, Profile, RubricScores, VideoEntry};

use super::ranking::{ScoreSummary, round2};

/// Candidate as shown to jurors
#[derive(Debug, Clone, Serialize)]
pub struct CandidateCard {
    pub id: Uuid,
    pub full_name: String,
    pub competition: Option<String>,
    pub document_url: Option<String>,
    pub videos: Vec<VideoEntry>,
}

impl From<&Profile> for CandidateCard {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name.clone(),
            competition: profile.competition.clone(),
            document_url: profile.document_url.clone(),
            videos: profile.videos.clone(),
        }
    }
}

/// What the jury member can do next for a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAction {
    Submit,
    Modify,
}

/// Scores as displayed
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    #[serde(flatten)]
    pub scores: RubricScores,
    pub total: i32,
}

impl From<&Evaluation> for ScoreView {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            scores: evaluation.scores(),
            total: evaluation.total_score,
        }
    }
}

/// Row of a jury member's board
#[derive(Debug, Clone, Serialize)]
pub struct JuryBoardEntry {
    pub candidate: CandidateCard,
    pub evaluated: bool,
    pub action: ScoreAction,
    pub my_evaluation: Option<ScoreView>,
}

/// Another juror's evaluation, read-only for the president
#[derive(Debug, Clone, Serialize)]
pub struct PeerEvaluation {
    pub jury_id: Uuid,
    pub jury_name: String,
    #[serde(flatten)]
    pub score: ScoreView,
}

/// Row of a president's supervisory board
#[derive(Debug, Clone, Serialize)]
pub struct PresidentBoardEntry {
    pub candidate: CandidateCard,
    pub my_evaluation: Option<ScoreView>,
    /// Sorted by submitter name
    pub other_evaluations: Vec<PeerEvaluation>,
    pub evaluation_count: usize,
    /// Rounded to two decimals
    pub mean: f64,
}

/// Board for a jury member: candidates in fetch order, marked when already scored
pub fn jury_board(
    jury_id: Uuid,
    candidates: &[Profile],
    evaluations: &[Evaluation],
) -> Vec<JuryBoardEntry> {
    candidates
        .iter()
        .map(|candidate| {
            let mine = evaluations
                .iter()
                .find(|e| e.candidate_id == candidate.id && e.jury_id == jury_id);

            JuryBoardEntry {
                candidate: CandidateCard::from(candidate),
                evaluated: mine.is_some(),
                action: if mine.is_some() {
                    ScoreAction::Modify
                } else {
                    ScoreAction::Submit
                },
                my_evaluation: mine.map(ScoreView::from),
            }
        })
        .collect()
}

/// Board for a president: own score, peers' scores and the running mean
///
/// Evaluations for candidates outside `candidates` are ignored.
pub fn president_board(
    president_id: Uuid,
    candidates: &[Profile],
    evaluations: &[Evaluation],
) -> Vec<PresidentBoardEntry> {
    candidates
        .iter()
        .map(|candidate| {
            let relevant: Vec<&Evaluation> = evaluations
                .iter()
                .filter(|e| e.candidate_id == candidate.id)
                .collect();

            let (mine, others): (Vec<&Evaluation>, Vec<&Evaluation>) =
                relevant.iter().copied().partition(|e| e.jury_id == president_id);

            let mut other_evaluations: Vec<PeerEvaluation> = others
                .into_iter()
                .map(|e| PeerEvaluation {
                    jury_id: e.jury_id,
                    jury_name: e.jury_name.clone().unwrap_or_default(),
                    score: ScoreView::from(e),
                })
                .collect();
            other_evaluations.sort_by(|a, b| a.jury_name.cmp(&b.jury_name));

            let summary = ScoreSummary::from_totals(relevant.iter().map(|e| e.total_score));

            PresidentBoardEntry {
                candidate: CandidateCard::from(candidate),
                my_evaluation: mine.first().map(|e| ScoreView::from(*e)),
                other_evaluations,
                evaluation_count: summary.count,
                mean: round2(summary.mean),
            }
        })
        .collect()
}
