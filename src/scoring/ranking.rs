//! Per-candidate aggregation and category rankings

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, Evaluation, Profile};

/// Count and mean of the totals a candidate received
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
}

impl ScoreSummary {
    /// Mean of `totals`, 0 when there are none
    pub fn from_totals(totals: impl IntoIterator<Item = i32>) -> Self {
        let (count, sum) = totals
            .into_iter()
            .fold((0usize, 0i64), |(n, s), t| (n + 1, s + i64::from(t)));

        let mean = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };
        Self { count, mean }
    }

    /// Summary over the evaluations referencing `candidate_id`
    pub fn for_candidate(candidate_id: Uuid, evaluations: &[Evaluation]) -> Self {
        Self::from_totals(
            evaluations
                .iter()
                .filter(|e| e.candidate_id == candidate_id)
                .map(|e| e.total_score),
        )
    }
}

/// Round to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derived ranking entry; recomputed on demand, never stored
#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub candidate_id: Uuid,
    pub full_name: String,
    pub competition: Category,
    pub evaluation_count: usize,
    /// Rounded to two decimals
    pub mean: f64,
}

/// Ranking of one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRanking {
    pub competition: Category,
    pub rows: Vec<RankingRow>,
}

/// Headline figures over every ranked candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultsSummary {
    /// Candidates with at least one evaluation
    pub evaluated_count: usize,
    /// Mean of the candidate means, unevaluated candidates included; 0 with no rows
    pub global_mean: f64,
}

impl ResultsSummary {
    pub fn of(rankings: &[CategoryRanking]) -> Self {
        let rows = || rankings.iter().flat_map(|r| r.rows.iter());
        let row_count = rows().count();
        let global_mean = if row_count == 0 {
            0.0
        } else {
            round2(rows().map(|r| r.mean).sum::<f64>() / row_count as f64)
        };

        Self {
            evaluated_count: rows().filter(|r| r.evaluation_count > 0).count(),
            global_mean,
        }
    }
}

/// Mean descending, then evaluation count descending, then name, then id
fn compare(
    a: (&Profile, &ScoreSummary),
    b: (&Profile, &ScoreSummary),
) -> Ordering {
    b.1.mean
        .total_cmp(&a.1.mean)
        .then_with(|| b.1.count.cmp(&a.1.count))
        .then_with(|| a.0.full_name.to_lowercase().cmp(&b.0.full_name.to_lowercase()))
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// Rank the candidates of `category` by mean total
///
/// Candidates outside the category are ignored. Candidates without any
/// evaluation are ranked with a mean of 0.
pub fn rank_category(
    category: Category,
    candidates: &[Profile],
    evaluations: &[Evaluation],
) -> Vec<RankingRow> {
    let mut totals: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for evaluation in evaluations {
        totals
            .entry(evaluation.candidate_id)
            .or_default()
            .push(evaluation.total_score);
    }

    let mut scored: Vec<(&Profile, ScoreSummary)> = candidates
        .iter()
        .filter(|c| c.category() == Some(category))
        .map(|c| {
            let summary = totals
                .get(&c.id)
                .map(|t| ScoreSummary::from_totals(t.iter().copied()))
                .unwrap_or(ScoreSummary { count: 0, mean: 0.0 });
            (c, summary)
        })
        .collect();

    scored.sort_by(|a, b| compare((a.0, &a.1), (b.0, &b.1)));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (candidate, summary))| RankingRow {
            rank: i + 1,
            candidate_id: candidate.id,
            full_name: candidate.full_name.clone(),
            competition: category,
            evaluation_count: summary.count,
            mean: round2(summary.mean),
        })
        .collect()
}

/// Rankings for every category
pub fn rank_all(candidates: &[Profile], evaluations: &[Evaluation]) -> Vec<CategoryRanking> {
    Category::ALL
        .iter()
        .map(|&competition| CategoryRanking {
            competition,
            rows: rank_category(competition, candidates, evaluations),
        })
        .collect()
}
