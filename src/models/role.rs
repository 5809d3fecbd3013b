//! Competition categories and decoded roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{PRESIDENT_MARKER, paths, roles},
    error::AppError,
};

/// Competition track a candidate enters or a jury member is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AgroPitch,
    Slam,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 2] = [Category::AgroPitch, Category::Slam];

    /// Stored key
    pub fn key(self) -> &'static str {
        match self {
            Self::AgroPitch => "agro_pitch",
            Self::Slam => "slam",
        }
    }

    /// Human label used in exports
    pub fn label(self) -> &'static str {
        match self {
            Self::AgroPitch => "agro pitch",
            Self::Slam => "slam",
        }
    }

    /// Agro pitch candidates may submit several videos; slam keeps exactly one
    pub fn allows_multiple_videos(self) -> bool {
        matches!(self, Self::AgroPitch)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agro_pitch" => Ok(Self::AgroPitch),
            "slam" => Ok(Self::Slam),
            other => Err(AppError::Validation(format!("Unknown competition: {}", other))),
        }
    }
}

/// Jury speciality: a category, optionally held as president
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speciality {
    pub category: Category,
    pub president: bool,
}

impl Speciality {
    /// Stored form, e.g. `slam` or `president_slam`
    pub fn key(self) -> String {
        if self.president {
            format!("{}{}", PRESIDENT_MARKER, self.category.key())
        } else {
            self.category.key().to_string()
        }
    }
}

impl FromStr for Speciality {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(PRESIDENT_MARKER) {
            Some(base) => Ok(Self {
                category: base.parse()?,
                president: true,
            }),
            None => Ok(Self {
                category: s.parse()?,
                president: false,
            }),
        }
    }
}

/// Role of an authenticated principal, decoded once from its profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum Role {
    Admin,
    JuryMember(Category),
    JuryPresident(Category),
    Candidate(Category),
}

impl Role {
    /// Decode the stored `role` / `speciality` / `competition` columns
    pub fn decode(
        role: &str,
        speciality: Option<&str>,
        competition: Option<&str>,
    ) -> Result<Self, AppError> {
        match role {
            roles::ADMIN => Ok(Self::Admin),
            roles::JURY => {
                let speciality: Speciality = speciality
                    .ok_or_else(|| AppError::Validation("Jury profile has no speciality".to_string()))?
                    .parse()?;
                Ok(speciality.into())
            }
            roles::CANDIDATE => {
                let category = competition
                    .ok_or_else(|| {
                        AppError::Validation("Candidate profile has no competition".to_string())
                    })?
                    .parse()?;
                Ok(Self::Candidate(category))
            }
            other => Err(AppError::Validation(format!("Unknown role: {}", other))),
        }
    }

    /// Stored role column value
    pub fn stored_role(self) -> &'static str {
        match self {
            Self::Admin => roles::ADMIN,
            Self::JuryMember(_) | Self::JuryPresident(_) => roles::JURY,
            Self::Candidate(_) => roles::CANDIDATE,
        }
    }

    /// Category with any presidency stripped; `None` for admins
    pub fn base_category(self) -> Option<Category> {
        match self {
            Self::Admin => None,
            Self::JuryMember(c) | Self::JuryPresident(c) | Self::Candidate(c) => Some(c),
        }
    }

    pub fn is_jury(self) -> bool {
        matches!(self, Self::JuryMember(_) | Self::JuryPresident(_))
    }

    /// View a principal lands on after login
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Admin => paths::ADMIN_DASHBOARD,
            Self::JuryMember(_) | Self::JuryPresident(_) => paths::JURY_DASHBOARD,
            Self::Candidate(_) => paths::CANDIDATE_DASHBOARD,
        }
    }
}

impl From<Speciality> for Role {
    fn from(speciality: Speciality) -> Self {
        if speciality.president {
            Self::JuryPresident(speciality.category)
        } else {
            Self::JuryMember(speciality.category)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_president_speciality_resolves_to_base_category() {
        let role = Role::decode("jury", Some("president_slam"), None).unwrap();
        assert_eq!(role, Role::JuryPresident(Category::Slam));
        assert_eq!(role.base_category(), Some(Category::Slam));
    }

    #[test]
    fn test_member_speciality() {
        let role = Role::decode("jury", Some("agro_pitch"), None).unwrap();
        assert_eq!(role, Role::JuryMember(Category::AgroPitch));
        assert!(role.is_jury());
    }

    #[test]
    fn test_candidate_and_admin() {
        assert_eq!(
            Role::decode("candidat", None, Some("slam")).unwrap(),
            Role::Candidate(Category::Slam)
        );
        assert_eq!(Role::decode("admin", None, None).unwrap(), Role::Admin);
        assert_eq!(Role::Admin.base_category(), None);
    }

    #[test]
    fn test_decode_rejects_unknown_values() {
        assert!(Role::decode("jury", None, None).is_err());
        assert!(Role::decode("jury", Some("president_poetry"), None).is_err());
        assert!(Role::decode("candidat", None, Some("chess")).is_err());
        assert!(Role::decode("organizer", None, None).is_err());
    }

    #[test]
    fn test_speciality_round_trips_through_key() {
        let speciality = Speciality {
            category: Category::AgroPitch,
            president: true,
        };
        assert_eq!(speciality.key(), "president_agro_pitch");
        assert_eq!(speciality.key().parse::<Speciality>().unwrap(), speciality);
    }

    #[test]
    fn test_video_policy() {
        assert!(Category::AgroPitch.allows_multiple_videos());
        assert!(!Category::Slam.allows_multiple_videos());
    }

    #[test]
    fn test_home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::JuryPresident(Category::Slam).home_path(), "/jury");
        assert_eq!(Role::Candidate(Category::Slam).home_path(), "/dashboard-candidat");
    }
}
