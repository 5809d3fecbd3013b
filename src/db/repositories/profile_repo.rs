//! Profile repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewProfile, Profile, ProfileFilter, VideoEntry},
};

/// Row as stored; `videos` may be null
#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: String,
    role: String,
    speciality: Option<String>,
    competition: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    document_url: Option<String>,
    videos: Option<Json<Vec<VideoEntry>>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            role: row.role,
            speciality: row.speciality,
            competition: row.competition,
            phone: row.phone,
            email: row.email,
            document_url: row.document_url,
            videos: row.videos.map(|Json(v)| v).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for profile database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Create a new profile
    pub async fn create(pool: &PgPool, profile: &NewProfile) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, full_name, role, speciality, competition, phone, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(profile.role.stored_role())
        .bind(profile.speciality())
        .bind(profile.competition())
        .bind(&profile.phone)
        .bind(&profile.email)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Find profile by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(r#"SELECT * FROM profiles WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Profile::from))
    }

    /// List profiles matching the equality filter
    pub async fn list(pool: &PgPool, filter: &ProfileFilter) -> AppResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT * FROM profiles
            WHERE
                ($1::text IS NULL OR role = $1)
                AND ($2::text IS NULL OR competition = $2)
            "#,
        )
        .bind(filter.role)
        .bind(filter.competition.map(|c| c.key()))
        .fetch_all(pool)
        .await?;

        let mut profiles: Vec<Profile> = rows.into_iter().map(Profile::from).collect();
        filter.order.sort(&mut profiles);
        Ok(profiles)
    }

    /// Replace the document reference
    pub async fn set_document_url(pool: &PgPool, id: &Uuid, url: &str) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles
            SET document_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the video list
    pub async fn set_videos(pool: &PgPool, id: &Uuid, videos: &[VideoEntry]) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles
            SET videos = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(videos))
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }
}
