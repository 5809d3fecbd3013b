//! In-process stores
//!
//! Mirror the PostgreSQL semantics closely enough for the service layer:
//! unique emails, cascading deletes, the (candidate, jury) upsert and the
//! jury name join.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Account, Evaluation, EvaluationFilter, NewEvaluation, NewProfile, Profile, ProfileFilter,
        VideoEntry,
    },
};

use super::{CacheStore, DataStore, ObjectStore, is_valid_object_name};

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("in-memory store lock poisoned")))
}

fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

#[derive(Default)]
struct Records {
    accounts: HashMap<Uuid, Account>,
    profiles: HashMap<Uuid, Profile>,
    /// Insertion order doubles as creation order
    evaluations: Vec<Evaluation>,
}

impl Records {
    fn with_jury_name(&self, evaluation: &Evaluation) -> Evaluation {
        Evaluation {
            jury_name: self
                .profiles
                .get(&evaluation.jury_id)
                .map(|p| p.full_name.clone()),
            ..evaluation.clone()
        }
    }
}

/// [`DataStore`] kept in process memory
#[derive(Default)]
pub struct MemoryDataStore {
    records: Mutex<Records>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryDataStore {
    async fn create_account(&self, email: &str, password_hash: &str) -> AppResult<Uuid> {
        let mut records = lock(&self.records)?;
        if records
            .accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(email))
        {
            return Err(AppError::Conflict("Resource already exists".to_string()));
        }

        let id = Uuid::new_v4();
        records.accounts.insert(
            id,
            Account {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let records = lock(&self.records)?;
        Ok(records
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<bool> {
        let mut records = lock(&self.records)?;
        let existed = records.accounts.remove(&id).is_some();
        records.profiles.remove(&id);
        records
            .evaluations
            .retain(|e| e.candidate_id != id && e.jury_id != id);
        Ok(existed)
    }

    async fn insert_profile(&self, profile: NewProfile) -> AppResult<Profile> {
        let mut records = lock(&self.records)?;
        if !records.accounts.contains_key(&profile.id) {
            return Err(AppError::Database(format!(
                "profile {} has no account",
                profile.id
            )));
        }
        if records.profiles.contains_key(&profile.id) {
            return Err(AppError::Conflict("Resource already exists".to_string()));
        }

        let now = Utc::now();
        let stored = Profile {
            id: profile.id,
            full_name: profile.full_name.clone(),
            role: profile.role.stored_role().to_string(),
            speciality: profile.speciality(),
            competition: profile.competition(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            document_url: None,
            videos: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        records.profiles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        Ok(lock(&self.records)?.profiles.get(&id).cloned())
    }

    async fn list_profiles(&self, filter: ProfileFilter) -> AppResult<Vec<Profile>> {
        let records = lock(&self.records)?;
        let mut profiles: Vec<Profile> = records
            .profiles
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        filter.order.sort(&mut profiles);
        Ok(profiles)
    }

    async fn set_document_url(&self, id: Uuid, url: &str) -> AppResult<Profile> {
        let mut records = lock(&self.records)?;
        let profile = records.profiles.get_mut(&id).ok_or_else(not_found)?;
        profile.document_url = Some(url.to_string());
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn set_videos(&self, id: Uuid, videos: Vec<VideoEntry>) -> AppResult<Profile> {
        let mut records = lock(&self.records)?;
        let profile = records.profiles.get_mut(&id).ok_or_else(not_found)?;
        profile.videos = videos;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn upsert_evaluation(&self, evaluation: NewEvaluation) -> AppResult<Evaluation> {
        let mut records = lock(&self.records)?;
        for id in [evaluation.candidate_id, evaluation.jury_id] {
            if !records.profiles.contains_key(&id) {
                return Err(AppError::Database(format!("profile {} does not exist", id)));
            }
        }

        let scores = evaluation.scores;
        let now = Utc::now();
        let position = records
            .evaluations
            .iter()
            .position(|e| e.candidate_id == evaluation.candidate_id && e.jury_id == evaluation.jury_id);

        let stored = match position {
            Some(index) => {
                let existing = &mut records.evaluations[index];
                existing.elocution = scores.elocution;
                existing.relevance = scores.relevance;
                existing.originality = scores.originality;
                existing.total_score = scores.total();
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = Evaluation {
                    id: Uuid::new_v4(),
                    candidate_id: evaluation.candidate_id,
                    jury_id: evaluation.jury_id,
                    elocution: scores.elocution,
                    relevance: scores.relevance,
                    originality: scores.originality,
                    total_score: scores.total(),
                    jury_name: None,
                    created_at: now,
                    updated_at: now,
                };
                records.evaluations.push(created.clone());
                created
            }
        };

        Ok(records.with_jury_name(&stored))
    }

    async fn find_evaluation(
        &self,
        candidate_id: Uuid,
        jury_id: Uuid,
    ) -> AppResult<Option<Evaluation>> {
        let records = lock(&self.records)?;
        Ok(records
            .evaluations
            .iter()
            .find(|e| e.candidate_id == candidate_id && e.jury_id == jury_id)
            .map(|e| records.with_jury_name(e)))
    }

    async fn list_evaluations(&self, filter: EvaluationFilter) -> AppResult<Vec<Evaluation>> {
        let records = lock(&self.records)?;
        Ok(records
            .evaluations
            .iter()
            .filter(|e| filter.matches_ids(e))
            .filter(|e| {
                filter.competition.is_none_or(|category| {
                    records
                        .profiles
                        .get(&e.candidate_id)
                        .and_then(Profile::category)
                        == Some(category)
                })
            })
            .map(|e| records.with_jury_name(e))
            .collect())
    }
}

/// [`ObjectStore`] kept in process memory
pub struct MemoryObjectStore {
    bucket: String,
    public_base_url: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> AppResult<()> {
        if !is_valid_object_name(name) {
            return Err(AppError::StorageFailure(format!("Invalid object name: {}", name)));
        }
        lock(&self.objects)?.insert(name.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, name: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(lock(&self.objects)?.get(name).cloned())
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        lock(&self.objects)?.remove(name);
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, name)
    }
}

/// [`CacheStore`] kept in process memory
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, (i64, Instant)>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Drop every entry whose window or flag has run out
fn purge_expired(entries: &mut HashMap<String, (i64, Instant)>, now: Instant) {
    entries.retain(|_, (_, expires)| *expires > now);
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set_flag(&self, key: &str, ttl_secs: u64) -> AppResult<()> {
        let now = Instant::now();
        let mut entries = lock(&self.entries)?;
        purge_expired(&mut entries, now);
        entries.insert(key.to_string(), (1, now + Duration::from_secs(ttl_secs)));
        Ok(())
    }

    async fn has_flag(&self, key: &str) -> AppResult<bool> {
        let mut entries = lock(&self.entries)?;
        match entries.get(key) {
            Some((_, expires)) if *expires > Instant::now() => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn incr_window(&self, key: &str, window_secs: i64) -> AppResult<i64> {
        let now = Instant::now();
        let mut entries = lock(&self.entries)?;
        purge_expired(&mut entries, now);
        let entry = entries
            .entry(key.to_string())
            .or_insert((0, now + Duration::from_secs(window_secs.max(0) as u64)));
        entry.0 += 1;
        Ok(entry.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RubricScores, Role};

    async fn seed(store: &MemoryDataStore, name: &str, role: Role) -> Uuid {
        let id = store
            .create_account(&format!("{}@jee.bf", name.to_lowercase()), "hash")
            .await
            .unwrap();
        store
            .insert_profile(NewProfile {
                id,
                full_name: name.to_string(),
                role,
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        id
    }

    fn scores(e: i32, r: i32, o: i32) -> RubricScores {
        RubricScores {
            elocution: e,
            relevance: r,
            originality: o,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryDataStore::new();
        store.create_account("a@jee.bf", "h").await.unwrap();
        let err = store.create_account("A@JEE.BF", "h").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_names_listed_case_insensitively() {
        let store = MemoryDataStore::new();
        seed(&store, "Zongo", Role::JuryMember(Category::Slam)).await;
        seed(&store, "bamba", Role::JuryMember(Category::Slam)).await;

        let names: Vec<String> = store
            .list_profiles(ProfileFilter::juries())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert_eq!(names, vec!["bamba", "Zongo"]);
    }

    #[tokio::test]
    async fn test_expired_cache_entries_are_dropped() {
        let cache = MemoryCacheStore::new();
        for i in 0..1000 {
            cache
                .incr_window(&format!("rate_limit:10.0.0.{}:general", i), 0)
                .await
                .unwrap();
            cache.set_flag(&format!("revoked_token:{}", i), 0).await.unwrap();
        }

        // Only the entry written by the last call can still be present
        assert!(cache.entries.lock().unwrap().len() <= 1);
        assert!(!cache.has_flag("revoked_token:999").await.unwrap());
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_live_window_keeps_counting() {
        let cache = MemoryCacheStore::new();
        cache.incr_window("rate_limit:ip:auth", 60).await.unwrap();
        cache.incr_window("rate_limit:other:auth", 0).await.unwrap();
        assert_eq!(cache.incr_window("rate_limit:ip:auth", 60).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_pair() {
        let store = MemoryDataStore::new();
        let candidate = seed(&store, "Awa", Role::Candidate(Category::Slam)).await;
        let jury = seed(&store, "Issa", Role::JuryMember(Category::Slam)).await;

        let first = store
            .upsert_evaluation(NewEvaluation {
                candidate_id: candidate,
                jury_id: jury,
                scores: scores(5, 5, 5),
            })
            .await
            .unwrap();
        let second = store
            .upsert_evaluation(NewEvaluation {
                candidate_id: candidate,
                jury_id: jury,
                scores: scores(9, 8, 7),
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.total_score, 24);
        assert_eq!(second.jury_name.as_deref(), Some("Issa"));
        let all = store
            .list_evaluations(EvaluationFilter::by_candidate(candidate))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_account_cascades() {
        let store = MemoryDataStore::new();
        let candidate = seed(&store, "Awa", Role::Candidate(Category::AgroPitch)).await;
        let jury = seed(&store, "Issa", Role::JuryMember(Category::AgroPitch)).await;
        store
            .upsert_evaluation(NewEvaluation {
                candidate_id: candidate,
                jury_id: jury,
                scores: RubricScores::default(),
            })
            .await
            .unwrap();

        assert!(store.delete_account(jury).await.unwrap());
        assert!(store.find_profile(jury).await.unwrap().is_none());
        assert!(
            store
                .list_evaluations(EvaluationFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
        assert!(!store.delete_account(jury).await.unwrap());
    }

    #[tokio::test]
    async fn test_competition_filter_uses_candidate_profile() {
        let store = MemoryDataStore::new();
        let slam = seed(&store, "Awa", Role::Candidate(Category::Slam)).await;
        let agro = seed(&store, "Bintou", Role::Candidate(Category::AgroPitch)).await;
        let jury = seed(&store, "Issa", Role::JuryMember(Category::Slam)).await;
        for candidate_id in [slam, agro] {
            store
                .upsert_evaluation(NewEvaluation {
                    candidate_id,
                    jury_id: jury,
                    scores: RubricScores::default(),
                })
                .await
                .unwrap();
        }

        let slam_only = store
            .list_evaluations(EvaluationFilter::in_competition(Category::Slam))
            .await
            .unwrap();
        assert_eq!(slam_only.len(), 1);
        assert_eq!(slam_only[0].candidate_id, slam);
    }

    #[tokio::test]
    async fn test_profiles_listed_by_name() {
        let store = MemoryDataStore::new();
        seed(&store, "Zoe", Role::Candidate(Category::Slam)).await;
        seed(&store, "Awa", Role::Candidate(Category::Slam)).await;
        seed(&store, "Issa", Role::JuryMember(Category::Slam)).await;

        let names: Vec<String> = store
            .list_profiles(ProfileFilter::candidates())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert_eq!(names, vec!["Awa", "Zoe"]);
    }

    #[tokio::test]
    async fn test_rate_window_counts_and_flags() {
        let cache = MemoryCacheStore::new();
        assert_eq!(cache.incr_window("k", 60).await.unwrap(), 1);
        assert_eq!(cache.incr_window("k", 60).await.unwrap(), 2);

        assert!(!cache.has_flag("revoked").await.unwrap());
        cache.set_flag("revoked", 60).await.unwrap();
        assert!(cache.has_flag("revoked").await.unwrap());
        cache.set_flag("gone", 0).await.unwrap();
        assert!(!cache.has_flag("gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_object_store_rejects_path_names() {
        let objects = MemoryObjectStore::new("candidatures", "http://localhost/files");
        assert!(objects.put("../x", vec![1]).await.is_err());
        objects.put("a.pdf", vec![1, 2]).await.unwrap();
        assert_eq!(objects.get("a.pdf").await.unwrap(), Some(vec![1, 2]));
        assert_eq!(
            objects.public_url("a.pdf"),
            "http://localhost/files/candidatures/a.pdf"
        );
    }
}
