//! Admin service: directories, account management and results

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    export,
    models::{
        Category, EvaluationFilter, Profile, ProfileFilter, ProfileOrder, Role, SessionContext,
        Speciality,
    },
    scoring::{CategoryRanking, ResultsSummary, rank_all},
    store::DataStore,
};

use super::AuthService;

/// Jury member as listed for admins
#[derive(Debug, Clone, Serialize)]
pub struct JuryMemberSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub president: bool,
}

/// Jury members of one category
#[derive(Debug, Clone, Serialize)]
pub struct JuryGroup {
    pub category: Category,
    pub members: Vec<JuryMemberSummary>,
}

/// Candidate headcount per competition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CandidateCounts {
    pub total: usize,
    pub agro_pitch: usize,
    pub slam: usize,
}

impl CandidateCounts {
    pub fn of(candidates: &[Profile]) -> Self {
        candidates
            .iter()
            .fold(Self::default(), |mut counts, c| {
                counts.total += 1;
                match c.category() {
                    Some(Category::AgroPitch) => counts.agro_pitch += 1,
                    Some(Category::Slam) => counts.slam += 1,
                    None => {}
                }
                counts
            })
    }
}

/// Filtered candidate listing plus the headcounts of the whole directory
#[derive(Debug, Clone)]
pub struct CandidateDirectory {
    pub candidates: Vec<Profile>,
    pub counts: CandidateCounts,
}

/// Admin service for contest management
pub struct AdminService;

impl AdminService {
    /// Candidates, newest first, optionally searched by name or phone
    pub async fn list_candidates(
        data: &dyn DataStore,
        search: Option<&str>,
        competition: Option<Category>,
    ) -> AppResult<Vec<Profile>> {
        Ok(Self::candidate_directory(data, search, competition)
            .await?
            .candidates)
    }

    /// Filtered candidates with counts taken before any filter applies
    pub async fn candidate_directory(
        data: &dyn DataStore,
        search: Option<&str>,
        competition: Option<Category>,
    ) -> AppResult<CandidateDirectory> {
        let all = data
            .list_profiles(ProfileFilter::candidates().ordered(ProfileOrder::NewestFirst))
            .await?;
        let counts = CandidateCounts::of(&all);

        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let candidates = all
            .into_iter()
            .filter(|c| competition.is_none_or(|cat| c.category() == Some(cat)))
            .filter(|c| match &needle {
                Some(needle) => {
                    c.full_name.to_lowercase().contains(needle)
                        || c.phone.as_deref().is_some_and(|p| p.contains(needle.as_str()))
                }
                None => true,
            })
            .collect();

        Ok(CandidateDirectory { candidates, counts })
    }

    /// Delete a candidate and the evaluations they received
    pub async fn delete_candidate(
        data: &dyn DataStore,
        session: &SessionContext,
        id: Uuid,
    ) -> AppResult<()> {
        Self::delete_profile(data, session, id, &[roles::CANDIDATE]).await
    }

    /// Jury members ordered by name, grouped by base category
    pub async fn list_juries(data: &dyn DataStore) -> AppResult<Vec<JuryGroup>> {
        let juries = data.list_profiles(ProfileFilter::juries()).await?;

        let mut groups: Vec<JuryGroup> = Category::ALL
            .iter()
            .map(|&category| JuryGroup {
                category,
                members: Vec::new(),
            })
            .collect();

        for jury in juries {
            let Ok(role) = jury.decoded_role() else {
                continue;
            };
            let (category, president) = match role {
                Role::JuryMember(c) => (c, false),
                Role::JuryPresident(c) => (c, true),
                _ => continue,
            };
            if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
                group.members.push(JuryMemberSummary {
                    id: jury.id,
                    full_name: jury.full_name,
                    email: jury.email,
                    phone: jury.phone,
                    president,
                });
            }
        }

        Ok(groups)
    }

    /// Create a jury member, jury president or administrator
    pub async fn create_staff(
        data: &dyn DataStore,
        email: &str,
        password: &str,
        full_name: &str,
        role: &str,
        speciality: Option<&str>,
    ) -> AppResult<Profile> {
        let role = Self::staff_role(role, speciality)?;
        AuthService::create_staff(data, email, password, full_name, role).await
    }

    /// Decode the requested role of a staff account
    pub fn staff_role(role: &str, speciality: Option<&str>) -> AppResult<Role> {
        match role {
            roles::ADMIN => Ok(Role::Admin),
            roles::JURY => {
                let speciality: Speciality = speciality
                    .ok_or_else(|| {
                        AppError::Validation("Jury members need a speciality".to_string())
                    })?
                    .parse()?;
                Ok(speciality.into())
            }
            other => Err(AppError::Validation(format!(
                "Cannot create a {} account",
                other
            ))),
        }
    }

    /// Delete a jury member or administrator and their evaluations
    pub async fn delete_staff(
        data: &dyn DataStore,
        session: &SessionContext,
        id: Uuid,
    ) -> AppResult<()> {
        Self::delete_profile(data, session, id, &[roles::JURY, roles::ADMIN]).await
    }

    async fn delete_profile(
        data: &dyn DataStore,
        session: &SessionContext,
        id: Uuid,
        allowed_roles: &[&str],
    ) -> AppResult<()> {
        if id == session.principal_id {
            return Err(AppError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        let profile = data
            .find_profile(id)
            .await?
            .filter(|p| allowed_roles.contains(&p.role.as_str()))
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        if !data.delete_account(id).await? {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }

        info!(profile_id = %id, role = %profile.role, admin_id = %session.principal_id, "Profile deleted");
        Ok(())
    }

    /// Rankings of every category
    pub async fn results(data: &dyn DataStore) -> AppResult<Vec<CategoryRanking>> {
        let (candidates, evaluations) = futures::try_join!(
            data.list_profiles(ProfileFilter::candidates()),
            data.list_evaluations(EvaluationFilter::default()),
        )?;

        Ok(rank_all(&candidates, &evaluations))
    }

    /// Rankings of every category with their overall summary
    pub async fn results_with_summary(
        data: &dyn DataStore,
    ) -> AppResult<(Vec<CategoryRanking>, ResultsSummary)> {
        let rankings = Self::results(data).await?;
        let summary = ResultsSummary::of(&rankings);
        Ok((rankings, summary))
    }

    /// Rankings as CSV
    pub async fn export_results(data: &dyn DataStore) -> AppResult<String> {
        let rankings = Self::results(data).await?;
        export::rankings_csv(&rankings)
    }

    /// Candidate directory as CSV, honouring the same filters as the listing
    pub async fn export_candidates(
        data: &dyn DataStore,
        search: Option<&str>,
        competition: Option<Category>,
    ) -> AppResult<String> {
        let candidates = Self::list_candidates(data, search, competition).await?;
        export::candidates_csv(&candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewEvaluation, NewProfile, RubricScores};
    use crate::store::MemoryDataStore;

    async fn seed(data: &MemoryDataStore, name: &str, phone: Option<&str>, role: Role) -> Uuid {
        let id = data
            .create_account(&format!("{}@jee.bf", name.to_lowercase()), "hash")
            .await
            .unwrap();
        data.insert_profile(NewProfile {
            id,
            full_name: name.to_string(),
            role,
            phone: phone.map(str::to_string),
            email: None,
        })
        .await
        .unwrap();
        id
    }

    fn admin_session(id: Uuid) -> SessionContext {
        SessionContext {
            principal_id: id,
            full_name: "Admin".to_string(),
            role: Role::Admin,
            token_id: String::new(),
            expires_at: 0,
        }
    }

    async fn score(data: &MemoryDataStore, candidate_id: Uuid, jury_id: Uuid, each: i32) {
        data.upsert_evaluation(NewEvaluation {
            candidate_id,
            jury_id,
            scores: RubricScores {
                elocution: each,
                relevance: each,
                originality: each,
            },
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_search_by_name_or_phone() {
        let data = MemoryDataStore::new();
        seed(&data, "Awa Traoré", Some("70123456"), Role::Candidate(Category::Slam)).await;
        seed(&data, "Issa Kaboré", Some("76543210"), Role::Candidate(Category::AgroPitch)).await;

        let by_name = AdminService::list_candidates(&data, Some("TRAO"), None).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].full_name, "Awa Traoré");

        let by_phone = AdminService::list_candidates(&data, Some("7654"), None).await.unwrap();
        assert_eq!(by_phone[0].full_name, "Issa Kaboré");

        let agro = AdminService::list_candidates(&data, None, Some(Category::AgroPitch))
            .await
            .unwrap();
        assert_eq!(agro.len(), 1);
    }

    #[tokio::test]
    async fn test_juries_grouped_by_base_category() {
        let data = MemoryDataStore::new();
        seed(&data, "Zongo", None, Role::JuryMember(Category::Slam)).await;
        seed(&data, "Bamba", None, Role::JuryPresident(Category::Slam)).await;
        seed(&data, "Sanou", None, Role::JuryMember(Category::AgroPitch)).await;
        seed(&data, "Admin", None, Role::Admin).await;

        let groups = AdminService::list_juries(&data).await.unwrap();
        let slam = groups.iter().find(|g| g.category == Category::Slam).unwrap();
        let names: Vec<&str> = slam.members.iter().map(|m| m.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bamba", "Zongo"]);
        assert!(slam.members[0].president);
        let agro = groups.iter().find(|g| g.category == Category::AgroPitch).unwrap();
        assert_eq!(agro.members.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_jury_removes_their_evaluations() {
        let data = MemoryDataStore::new();
        let admin = seed(&data, "Admin", None, Role::Admin).await;
        let candidate = seed(&data, "Awa", None, Role::Candidate(Category::Slam)).await;
        let jury = seed(&data, "Issa", None, Role::JuryMember(Category::Slam)).await;
        score(&data, candidate, jury, 7).await;

        AdminService::delete_staff(&data, &admin_session(admin), jury)
            .await
            .unwrap();

        let rankings = AdminService::results(&data).await.unwrap();
        let slam = rankings.iter().find(|r| r.competition == Category::Slam).unwrap();
        assert_eq!(slam.rows[0].evaluation_count, 0);
        assert_eq!(slam.rows[0].mean, 0.0);
    }

    #[tokio::test]
    async fn test_cannot_delete_self_or_wrong_kind() {
        let data = MemoryDataStore::new();
        let admin = seed(&data, "Admin", None, Role::Admin).await;
        let candidate = seed(&data, "Awa", None, Role::Candidate(Category::Slam)).await;
        let session = admin_session(admin);

        let err = AdminService::delete_staff(&data, &session, admin).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = AdminService::delete_staff(&data, &session, candidate).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        AdminService::delete_candidate(&data, &session, candidate).await.unwrap();
        assert!(data.find_profile(candidate).await.unwrap().is_none());
    }

    #[test]
    fn test_staff_role() {
        assert_eq!(AdminService::staff_role("admin", None).unwrap(), Role::Admin);
        assert_eq!(
            AdminService::staff_role("jury", Some("president_agro_pitch")).unwrap(),
            Role::JuryPresident(Category::AgroPitch)
        );
        assert!(AdminService::staff_role("jury", None).is_err());
        assert!(AdminService::staff_role("candidat", None).is_err());
    }

    #[tokio::test]
    async fn test_results_rank_and_export() {
        let data = MemoryDataStore::new();
        let jury = seed(&data, "Issa", None, Role::JuryMember(Category::Slam)).await;
        let low = seed(&data, "Binta", None, Role::Candidate(Category::Slam)).await;
        let high = seed(&data, "Awa", None, Role::Candidate(Category::Slam)).await;
        score(&data, low, jury, 5).await;
        score(&data, high, jury, 9).await;

        let csv = AdminService::export_results(&data).await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Rank,Full Name,Competition,Evaluations,Average");
        assert_eq!(lines[1], "1,Awa,slam,1,27.00");
        assert_eq!(lines[2], "2,Binta,slam,1,15.00");
    }

    #[tokio::test]
    async fn test_counts_ignore_listing_filters() {
        let data = MemoryDataStore::new();
        seed(&data, "Awa Traoré", None, Role::Candidate(Category::Slam)).await;
        seed(&data, "Issa Kaboré", None, Role::Candidate(Category::AgroPitch)).await;
        seed(&data, "Binta Sawadogo", None, Role::Candidate(Category::AgroPitch)).await;
        seed(&data, "Zongo", None, Role::JuryMember(Category::Slam)).await;

        let directory = AdminService::candidate_directory(&data, Some("awa"), Some(Category::Slam))
            .await
            .unwrap();
        assert_eq!(directory.candidates.len(), 1);
        assert_eq!(
            directory.counts,
            CandidateCounts {
                total: 3,
                agro_pitch: 2,
                slam: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_results_summary() {
        let data = MemoryDataStore::new();
        let (_, empty) = AdminService::results_with_summary(&data).await.unwrap();
        assert_eq!(empty.evaluated_count, 0);
        assert_eq!(empty.global_mean, 0.0);

        let jury = seed(&data, "Issa", None, Role::JuryMember(Category::Slam)).await;
        let scored = seed(&data, "Awa", None, Role::Candidate(Category::Slam)).await;
        seed(&data, "Binta", None, Role::Candidate(Category::AgroPitch)).await;
        score(&data, scored, jury, 8).await;

        let (rankings, summary) = AdminService::results_with_summary(&data).await.unwrap();
        assert_eq!(rankings.iter().map(|r| r.rows.len()).sum::<usize>(), 2);
        assert_eq!(summary.evaluated_count, 1);
        assert_eq!(summary.global_mean, 12.0);
    }
}
