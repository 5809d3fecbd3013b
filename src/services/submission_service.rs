//! Candidate submissions: one document and the video list

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    constants::{MAX_VIDEO_TITLE_LENGTH, upload_purposes},
    error::{AppError, AppResult},
    models::{Category, Profile, VideoEntry, apply_video_upload},
    store::{DataStore, ObjectStore},
    utils::{format_upload_date, now_utc},
};

/// A file received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Submission service
pub struct SubmissionService;

impl SubmissionService {
    /// Store a document and make it the candidate's only document
    pub async fn attach_document(
        data: &dyn DataStore,
        objects: &dyn ObjectStore,
        candidate_id: Uuid,
        file: UploadedFile,
    ) -> AppResult<Profile> {
        let name = Self::object_name(
            candidate_id,
            upload_purposes::DOCUMENT,
            file.file_name.as_deref(),
            now_utc(),
        );
        let url = Self::store(objects, &name, file.bytes).await?;

        match data.set_document_url(candidate_id, &url).await {
            Ok(profile) => {
                info!(%candidate_id, object = %name, "Document attached");
                Ok(profile)
            }
            Err(e) => {
                Self::discard(objects, &name).await;
                Err(e)
            }
        }
    }

    /// Store a video; agro pitch candidates accumulate videos, slam keeps one
    pub async fn attach_video(
        data: &dyn DataStore,
        objects: &dyn ObjectStore,
        candidate_id: Uuid,
        category: Category,
        title: &str,
        file: UploadedFile,
    ) -> AppResult<Profile> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Video title is required".to_string()));
        }
        if title.chars().count() > MAX_VIDEO_TITLE_LENGTH {
            return Err(AppError::Validation("Video title is too long".to_string()));
        }

        let profile = data
            .find_profile(candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

        let now = now_utc();
        let name = Self::object_name(
            candidate_id,
            upload_purposes::VIDEO,
            file.file_name.as_deref(),
            now,
        );
        let url = Self::store(objects, &name, file.bytes).await?;

        let entry = VideoEntry {
            url,
            title: title.to_string(),
            date: format_upload_date(now),
        };
        let videos = apply_video_upload(profile.videos, entry, category);

        match data.set_videos(candidate_id, videos).await {
            Ok(profile) => {
                info!(%candidate_id, object = %name, count = profile.videos.len(), "Video attached");
                Ok(profile)
            }
            Err(e) => {
                Self::discard(objects, &name).await;
                Err(e)
            }
        }
    }

    /// `<candidate id>-<purpose>-<unix millis>.<ext>`
    pub fn object_name(
        candidate_id: Uuid,
        purpose: &str,
        file_name: Option<&str>,
        at: DateTime<Utc>,
    ) -> String {
        format!(
            "{}-{}-{}.{}",
            candidate_id,
            purpose,
            at.timestamp_millis(),
            Self::extension(file_name)
        )
    }

    fn extension(file_name: Option<&str>) -> String {
        file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "bin".to_string())
    }

    async fn store(objects: &dyn ObjectStore, name: &str, bytes: Vec<u8>) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        objects.put(name, bytes).await?;
        Ok(objects.public_url(name))
    }

    /// Best-effort removal of an object whose profile update failed
    async fn discard(objects: &dyn ObjectStore, name: &str) {
        if let Err(e) = objects.delete(name).await {
            warn!(object = %name, error = %e, "Failed to remove orphaned upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::{NewProfile, Role};
    use crate::store::{MemoryDataStore, MemoryObjectStore, MockDataStore, MockObjectStore};

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    async fn candidate(data: &MemoryDataStore, category: Category) -> Uuid {
        let id = data.create_account("c@jee.bf", "hash").await.unwrap();
        data.insert_profile(NewProfile {
            id,
            full_name: "Awa".to_string(),
            role: Role::Candidate(category),
            phone: Some("70123456".to_string()),
            email: None,
        })
        .await
        .unwrap();
        id
    }

    fn objects() -> MemoryObjectStore {
        MemoryObjectStore::new("candidatures", "http://localhost:8080/files")
    }

    #[test]
    fn test_object_name() {
        let id = Uuid::nil();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let name = SubmissionService::object_name(id, "video", Some("Pitch Final.MP4"), at);
        assert_eq!(
            name,
            format!("{}-video-{}.mp4", id, at.timestamp_millis())
        );
        let name = SubmissionService::object_name(id, "document", Some("../../x"), at);
        assert!(name.ends_with(".bin"));
    }

    #[tokio::test]
    async fn test_document_replaces_previous() {
        let data = MemoryDataStore::new();
        let objects = objects();
        let id = candidate(&data, Category::Slam).await;

        let first = SubmissionService::attach_document(&data, &objects, id, file("a.pdf"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = SubmissionService::attach_document(&data, &objects, id, file("b.pdf"))
            .await
            .unwrap();

        assert!(first.document_url.is_some());
        assert_ne!(first.document_url, second.document_url);
        assert!(second.document_url.unwrap().starts_with("http://localhost:8080/files/candidatures/"));
    }

    #[tokio::test]
    async fn test_agro_pitch_videos_accumulate() {
        let data = MemoryDataStore::new();
        let objects = objects();
        let id = candidate(&data, Category::AgroPitch).await;

        for title in ["Présentation", "Démonstration"] {
            SubmissionService::attach_video(&data, &objects, id, Category::AgroPitch, title, file("v.mp4"))
                .await
                .unwrap();
        }

        let profile = data.find_profile(id).await.unwrap().unwrap();
        assert_eq!(profile.videos.len(), 2);
        assert_eq!(profile.videos[1].title, "Démonstration");
    }

    #[tokio::test]
    async fn test_slam_video_is_replaced() {
        let data = MemoryDataStore::new();
        let objects = objects();
        let id = candidate(&data, Category::Slam).await;

        for title in ["Premier", "Second"] {
            SubmissionService::attach_video(&data, &objects, id, Category::Slam, title, file("v.mp4"))
                .await
                .unwrap();
        }

        let profile = data.find_profile(id).await.unwrap().unwrap();
        assert_eq!(profile.videos.len(), 1);
        assert_eq!(profile.videos[0].title, "Second");
    }

    #[tokio::test]
    async fn test_video_requires_title() {
        let data = MemoryDataStore::new();
        let objects = objects();
        let id = candidate(&data, Category::Slam).await;

        let err = SubmissionService::attach_video(&data, &objects, id, Category::Slam, "  ", file("v.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let data = MemoryDataStore::new();
        let objects = objects();
        let id = candidate(&data, Category::Slam).await;

        let empty = UploadedFile {
            file_name: Some("a.pdf".to_string()),
            bytes: Vec::new(),
        };
        let err = SubmissionService::attach_document(&data, &objects, id, empty)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_profile_update_discards_upload() {
        let id = Uuid::new_v4();

        let mut data = MockDataStore::new();
        data.expect_set_document_url()
            .returning(|_, _| Err(AppError::Database("write failed".to_string())));

        let mut objects = MockObjectStore::new();
        objects.expect_put().times(1).returning(|_, _| Ok(()));
        objects
            .expect_public_url()
            .returning(|name| format!("http://files/{}", name));
        objects
            .expect_delete()
            .withf(move |name| name.starts_with(&format!("{}-document-", id)))
            .times(1)
            .returning(|_| Ok(()));

        let err = SubmissionService::attach_document(&data, &objects, id, file("a.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let id = Uuid::new_v4();
        let data = MockDataStore::new();

        let mut objects = MockObjectStore::new();
        objects
            .expect_put()
            .times(1)
            .returning(|_, _| Err(AppError::StorageFailure("bucket is full".to_string())));

        let err = SubmissionService::attach_document(&data, &objects, id, file("a.pdf"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Storage failure: bucket is full");
    }
}
