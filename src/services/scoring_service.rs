//! Jury scoring: dashboards, notation sheets and evaluation upserts

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Category, Criterion, Evaluation, EvaluationFilter, NewEvaluation, Profile, ProfileFilter,
        Role, RubricScores, SessionContext,
    },
    scoring::{
        CandidateCard, JuryBoardEntry, PresidentBoardEntry, ScoreAction, jury_board,
        president_board,
    },
    store::DataStore,
};

/// Dashboard of a jury member or president
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "board", rename_all = "snake_case")]
pub enum Dashboard {
    Member {
        category: Category,
        entries: Vec<JuryBoardEntry>,
    },
    President {
        category: Category,
        entries: Vec<PresidentBoardEntry>,
    },
}

/// Data behind the notation page of one candidate
#[derive(Debug, Clone, Serialize)]
pub struct NotationSheet {
    pub candidate: CandidateCard,
    /// Existing scores, or the default draft
    pub scores: RubricScores,
    pub total: i32,
    pub action: ScoreAction,
}

/// Scoring service
pub struct ScoringService;

impl ScoringService {
    /// Dashboard for the session's jury role
    ///
    /// Candidates and evaluations are fetched concurrently; a failed fetch
    /// is logged and shown as an empty list.
    pub async fn dashboard(data: &dyn DataStore, session: &SessionContext) -> AppResult<Dashboard> {
        let category = session.require_jury()?;

        let evaluation_filter = match session.role {
            Role::JuryPresident(_) => EvaluationFilter::in_competition(category),
            _ => EvaluationFilter::by_jury(session.principal_id),
        };

        let (candidates, evaluations) = futures::join!(
            data.list_profiles(ProfileFilter::candidates().in_competition(category)),
            data.list_evaluations(evaluation_filter),
        );
        let candidates = or_empty(candidates, "candidates");
        let evaluations = or_empty(evaluations, "evaluations");

        let dashboard = match session.role {
            Role::JuryPresident(_) => Dashboard::President {
                category,
                entries: president_board(session.principal_id, &candidates, &evaluations),
            },
            _ => Dashboard::Member {
                category,
                entries: jury_board(session.principal_id, &candidates, &evaluations),
            },
        };
        Ok(dashboard)
    }

    /// Candidate and the caller's current scores
    pub async fn notation(
        data: &dyn DataStore,
        session: &SessionContext,
        candidate_id: Uuid,
    ) -> AppResult<NotationSheet> {
        let category = session.require_jury()?;
        let (candidate, existing) = futures::try_join!(
            Self::candidate_in(data, category, candidate_id),
            data.find_evaluation(candidate_id, session.principal_id),
        )?;

        let scores = existing.as_ref().map(Evaluation::scores).unwrap_or_default();
        Ok(NotationSheet {
            candidate: CandidateCard::from(&candidate),
            scores,
            total: scores.total(),
            action: if existing.is_some() {
                ScoreAction::Modify
            } else {
                ScoreAction::Submit
            },
        })
    }

    /// Submit or replace the caller's scores for a candidate
    pub async fn submit(
        data: &dyn DataStore,
        session: &SessionContext,
        candidate_id: Uuid,
        scores: RubricScores,
    ) -> AppResult<Evaluation> {
        let category = session.require_jury()?;
        if !scores.is_within_bounds() {
            return Err(AppError::Validation(
                "Each score must be between 0 and 10".to_string(),
            ));
        }
        Self::candidate_in(data, category, candidate_id).await?;

        Self::upsert(data, session, candidate_id, scores).await
    }

    /// Move one criterion by `delta`, clamped to [0, 10], and save
    pub async fn adjust(
        data: &dyn DataStore,
        session: &SessionContext,
        candidate_id: Uuid,
        criterion: Criterion,
        delta: i32,
    ) -> AppResult<Evaluation> {
        let category = session.require_jury()?;
        let (_, existing) = futures::try_join!(
            Self::candidate_in(data, category, candidate_id),
            data.find_evaluation(candidate_id, session.principal_id),
        )?;

        let scores = existing
            .as_ref()
            .map(Evaluation::scores)
            .unwrap_or_default()
            .adjust(criterion, delta);

        Self::upsert(data, session, candidate_id, scores).await
    }

    async fn upsert(
        data: &dyn DataStore,
        session: &SessionContext,
        candidate_id: Uuid,
        scores: RubricScores,
    ) -> AppResult<Evaluation> {
        let evaluation = data
            .upsert_evaluation(NewEvaluation {
                candidate_id,
                jury_id: session.principal_id,
                scores,
            })
            .await?;

        info!(
            %candidate_id,
            jury_id = %session.principal_id,
            total = evaluation.total_score,
            "Evaluation saved"
        );
        Ok(evaluation)
    }

    /// A candidate of `category`; anything else is not found
    async fn candidate_in(
        data: &dyn DataStore,
        category: Category,
        candidate_id: Uuid,
    ) -> AppResult<Profile> {
        data.find_profile(candidate_id)
            .await?
            .filter(|p| p.decoded_role().ok() == Some(Role::Candidate(category)))
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
    }
}

fn or_empty<T>(result: AppResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load {} for dashboard", what);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProfile;
    use crate::store::{MemoryDataStore, MockDataStore};

    async fn seed(data: &MemoryDataStore, name: &str, role: Role) -> SessionContext {
        let id = data
            .create_account(&format!("{}@jee.bf", name.to_lowercase()), "hash")
            .await
            .unwrap();
        data.insert_profile(NewProfile {
            id,
            full_name: name.to_string(),
            role,
            phone: None,
            email: None,
        })
        .await
        .unwrap();
        SessionContext {
            principal_id: id,
            full_name: name.to_string(),
            role,
            token_id: String::new(),
            expires_at: 0,
        }
    }

    fn scores(e: i32, r: i32, o: i32) -> RubricScores {
        RubricScores {
            elocution: e,
            relevance: r,
            originality: o,
        }
    }

    #[tokio::test]
    async fn test_resubmission_updates_single_evaluation() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::Slam)).await;
        let jury = seed(&data, "Issa", Role::JuryMember(Category::Slam)).await;

        ScoringService::submit(&data, &jury, candidate.principal_id, scores(4, 5, 6))
            .await
            .unwrap();
        let updated = ScoringService::submit(&data, &jury, candidate.principal_id, scores(9, 9, 9))
            .await
            .unwrap();
        assert_eq!(updated.total_score, 27);

        let stored = data
            .list_evaluations(EvaluationFilter::by_candidate(candidate.principal_id))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].total_score, 27);
    }

    #[tokio::test]
    async fn test_out_of_range_scores_rejected() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::Slam)).await;
        let jury = seed(&data, "Issa", Role::JuryMember(Category::Slam)).await;

        let err = ScoringService::submit(&data, &jury, candidate.principal_id, scores(11, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_other_category_candidate_not_found() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::AgroPitch)).await;
        let jury = seed(&data, "Issa", Role::JuryMember(Category::Slam)).await;

        let err = ScoringService::notation(&data, &jury, candidate.principal_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_adjust_starts_from_default_and_clamps() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::Slam)).await;
        let jury = seed(&data, "Issa", Role::JuryMember(Category::Slam)).await;
        let id = candidate.principal_id;

        let first = ScoringService::adjust(&data, &jury, id, Criterion::Elocution, 3)
            .await
            .unwrap();
        assert_eq!((first.elocution, first.relevance, first.originality), (8, 5, 5));

        let second = ScoringService::adjust(&data, &jury, id, Criterion::Elocution, 7)
            .await
            .unwrap();
        assert_eq!(second.elocution, 10);
        assert_eq!(second.total_score, 20);

        let sheet = ScoringService::notation(&data, &jury, id).await.unwrap();
        assert_eq!(sheet.action, ScoreAction::Modify);
        assert_eq!(sheet.total, 20);
    }

    #[tokio::test]
    async fn test_president_dashboard_sees_peers() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::Slam)).await;
        let member = seed(&data, "Issa", Role::JuryMember(Category::Slam)).await;
        let president = seed(&data, "Mariam", Role::JuryPresident(Category::Slam)).await;

        ScoringService::submit(&data, &member, candidate.principal_id, scores(6, 6, 6))
            .await
            .unwrap();
        ScoringService::submit(&data, &president, candidate.principal_id, scores(8, 8, 8))
            .await
            .unwrap();

        match ScoringService::dashboard(&data, &president).await.unwrap() {
            Dashboard::President { category, entries } => {
                assert_eq!(category, Category::Slam);
                assert_eq!(entries.len(), 1);
                let entry = &entries[0];
                assert_eq!(entry.my_evaluation.as_ref().unwrap().total, 24);
                assert_eq!(entry.other_evaluations.len(), 1);
                assert_eq!(entry.other_evaluations[0].jury_name, "Issa");
                assert_eq!(entry.evaluation_count, 2);
                assert_eq!(entry.mean, 21.0);
            }
            other => panic!("unexpected dashboard: {:?}", other),
        }

        match ScoringService::dashboard(&data, &member).await.unwrap() {
            Dashboard::Member { entries, .. } => {
                assert!(entries[0].evaluated);
                assert_eq!(entries[0].my_evaluation.as_ref().unwrap().total, 18);
            }
            other => panic!("unexpected dashboard: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dashboard_degrades_on_read_failure() {
        let mut data = MockDataStore::new();
        data.expect_list_profiles()
            .returning(|_| Err(AppError::Database("timeout".to_string())));
        data.expect_list_evaluations().returning(|_| Ok(Vec::new()));

        let session = SessionContext {
            principal_id: Uuid::new_v4(),
            full_name: "Issa".to_string(),
            role: Role::JuryMember(Category::AgroPitch),
            token_id: String::new(),
            expires_at: 0,
        };

        match ScoringService::dashboard(&data, &session).await.unwrap() {
            Dashboard::Member { entries, .. } => assert!(entries.is_empty()),
            other => panic!("unexpected dashboard: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_candidates_cannot_score() {
        let data = MemoryDataStore::new();
        let candidate = seed(&data, "Awa", Role::Candidate(Category::Slam)).await;

        let err = ScoringService::submit(&data, &candidate, candidate.principal_id, scores(5, 5, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
