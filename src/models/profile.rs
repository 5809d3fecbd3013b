//! Profile model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

use super::role::{Category, Role, Speciality};

/// Person record: admin, jury member/president or candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub speciality: Option<String>,
    pub competition: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub document_url: Option<String>,
    /// Always a sequence, even when the store holds null
    pub videos: Vec<VideoEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Decode the tagged role of this profile
    pub fn decoded_role(&self) -> AppResult<Role> {
        Role::decode(
            &self.role,
            self.speciality.as_deref(),
            self.competition.as_deref(),
        )
    }

    /// Competition of a candidate profile
    pub fn category(&self) -> Option<Category> {
        self.competition.as_deref().and_then(|c| c.parse().ok())
    }
}

/// One uploaded video of a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub url: String,
    pub title: String,
    /// Upload date, e.g. `19 oct. 2026`
    pub date: String,
}

/// Apply an uploaded video to a candidate's list
pub fn apply_video_upload(
    mut videos: Vec<VideoEntry>,
    entry: VideoEntry,
    category: Category,
) -> Vec<VideoEntry> {
    if category.allows_multiple_videos() {
        videos.push(entry);
        videos
    } else {
        vec![entry]
    }
}

/// Values for a profile insert
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewProfile {
    /// Stored `speciality` column (jury only)
    pub fn speciality(&self) -> Option<String> {
        match self.role {
            Role::JuryMember(category) => Some(
                Speciality {
                    category,
                    president: false,
                }
                .key(),
            ),
            Role::JuryPresident(category) => Some(
                Speciality {
                    category,
                    president: true,
                }
                .key(),
            ),
            Role::Admin | Role::Candidate(_) => None,
        }
    }

    /// Stored `competition` column (candidates only)
    pub fn competition(&self) -> Option<String> {
        match self.role {
            Role::Candidate(c) => Some(c.key().to_string()),
            _ => None,
        }
    }
}

/// Login account backing a profile
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Ordering of profile listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileOrder {
    #[default]
    FullName,
    NewestFirst,
}

impl ProfileOrder {
    /// Order a listing in process; every store applies it after filtering
    ///
    /// Names compare case-insensitively, ids break ties.
    pub fn sort(self, profiles: &mut [Profile]) {
        match self {
            Self::FullName => {
                profiles.sort_by_cached_key(|p| (p.full_name.to_lowercase(), p.id))
            }
            Self::NewestFirst => {
                profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)))
            }
        }
    }
}

/// Equality filter over profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    pub role: Option<&'static str>,
    pub competition: Option<Category>,
    pub order: ProfileOrder,
}

impl ProfileFilter {
    pub fn candidates() -> Self {
        Self {
            role: Some(crate::constants::roles::CANDIDATE),
            ..Default::default()
        }
    }

    pub fn juries() -> Self {
        Self {
            role: Some(crate::constants::roles::JURY),
            ..Default::default()
        }
    }

    pub fn admins() -> Self {
        Self {
            role: Some(crate::constants::roles::ADMIN),
            ..Default::default()
        }
    }

    pub fn in_competition(mut self, category: Category) -> Self {
        self.competition = Some(category);
        self
    }

    pub fn ordered(mut self, order: ProfileOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether a profile passes the equality filters
    pub fn matches(&self, profile: &Profile) -> bool {
        self.role.is_none_or(|r| profile.role == r)
            && self
                .competition
                .is_none_or(|c| profile.competition.as_deref() == Some(c.key()))
    }
}
