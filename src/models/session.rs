//! Session context and role-gated views

use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::paths,
    error::{AppError, AppResult},
};

use super::role::{Category, Role};

/// The authenticated principal for one request
///
/// Built by the resolver after the token is verified and the profile is
/// loaded; handlers receive it instead of re-reading identity themselves.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub principal_id: Uuid,
    pub full_name: String,
    pub role: Role,
    #[serde(skip)]
    pub token_id: String,
    #[serde(skip)]
    pub expires_at: i64,
}

impl SessionContext {
    pub fn require_admin(&self) -> AppResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Base category of a jury member or president
    pub fn require_jury(&self) -> AppResult<Category> {
        match self.role {
            Role::JuryMember(c) | Role::JuryPresident(c) => Ok(c),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Competition of a candidate
    pub fn require_candidate(&self) -> AppResult<Category> {
        match self.role {
            Role::Candidate(c) => Ok(c),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Capability a view requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Candidate,
    Jury,
    Admin,
}

impl Capability {
    pub fn granted_to(self, role: Option<Role>) -> bool {
        match (self, role) {
            (Self::Public, _) => true,
            (Self::Candidate, Some(Role::Candidate(_))) => true,
            (Self::Jury, Some(role)) => role.is_jury(),
            (Self::Admin, Some(Role::Admin)) => true,
            _ => false,
        }
    }
}

/// In-app views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Home,
    Login,
    Register,
    CandidateDashboard,
    JuryMemberDashboard,
    JuryPresidentDashboard,
    Notation { candidate_id: Uuid },
    AdminDashboard,
    AdminResults,
    AdminJuries,
}

/// A path before the role has been taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    CandidateDashboard,
    JuryDashboard,
    Notation(Uuid),
    AdminDashboard,
    AdminResults,
    AdminJuries,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => paths::HOME,
            p => p,
        };

        match path {
            paths::HOME => Some(Self::Home),
            paths::LOGIN => Some(Self::Login),
            paths::REGISTER => Some(Self::Register),
            paths::CANDIDATE_DASHBOARD => Some(Self::CandidateDashboard),
            paths::JURY_DASHBOARD => Some(Self::JuryDashboard),
            paths::ADMIN_DASHBOARD => Some(Self::AdminDashboard),
            paths::ADMIN_RESULTS => Some(Self::AdminResults),
            paths::ADMIN_JURIES => Some(Self::AdminJuries),
            other => other
                .strip_prefix(paths::JURY_NOTATION_PREFIX)
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(Self::Notation),
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Self::Home | Self::Login | Self::Register => Capability::Public,
            Self::CandidateDashboard => Capability::Candidate,
            Self::JuryDashboard | Self::Notation(_) => Capability::Jury,
            Self::AdminDashboard | Self::AdminResults | Self::AdminJuries => Capability::Admin,
        }
    }

    /// Pick the view for a principal, or send them to login
    pub fn resolve(self, role: Option<Role>) -> ViewDecision {
        if !self.capability().granted_to(role) {
            return ViewDecision::Redirect(paths::LOGIN);
        }

        let view = match (self, role) {
            (Self::Home, _) => View::Home,
            (Self::Login, _) => View::Login,
            (Self::Register, _) => View::Register,
            (Self::CandidateDashboard, _) => View::CandidateDashboard,
            (Self::JuryDashboard, Some(Role::JuryPresident(_))) => View::JuryPresidentDashboard,
            (Self::JuryDashboard, _) => View::JuryMemberDashboard,
            (Self::Notation(id), _) => View::Notation { candidate_id: id },
            (Self::AdminDashboard, _) => View::AdminDashboard,
            (Self::AdminResults, _) => View::AdminResults,
            (Self::AdminJuries, _) => View::AdminJuries,
        };
        ViewDecision::Render(view)
    }
}

/// Outcome of resolving a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecision {
    Render(View),
    Redirect(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jury_requesting_admin_view_is_redirected() {
        let role = Some(Role::JuryMember(Category::Slam));
        for path in ["/admin", "/admin/results", "/admin/jurys"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.resolve(role), ViewDecision::Redirect("/login"));
        }
    }

    #[test]
    fn test_anonymous_only_gets_public_views() {
        assert_eq!(
            Route::parse("/").unwrap().resolve(None),
            ViewDecision::Render(View::Home)
        );
        assert_eq!(
            Route::parse("/dashboard-candidat").unwrap().resolve(None),
            ViewDecision::Redirect("/login")
        );
    }

    #[test]
    fn test_jury_dashboard_dispatches_on_role() {
        let route = Route::parse("/jury").unwrap();
        assert_eq!(
            route.resolve(Some(Role::JuryPresident(Category::AgroPitch))),
            ViewDecision::Render(View::JuryPresidentDashboard)
        );
        assert_eq!(
            route.resolve(Some(Role::JuryMember(Category::AgroPitch))),
            ViewDecision::Render(View::JuryMemberDashboard)
        );
        assert_eq!(
            route.resolve(Some(Role::Candidate(Category::AgroPitch))),
            ViewDecision::Redirect("/login")
        );
    }

    #[test]
    fn test_notation_route_parses_candidate_id() {
        let id = Uuid::new_v4();
        let route = Route::parse(&format!("/jury/notation/{}", id)).unwrap();
        assert_eq!(route, Route::Notation(id));
        assert!(Route::parse("/jury/notation/not-a-uuid").is_none());
        assert!(Route::parse("/unknown").is_none());
    }

    #[test]
    fn test_session_gates() {
        let session = SessionContext {
            principal_id: Uuid::new_v4(),
            full_name: "Awa".into(),
            role: Role::JuryPresident(Category::Slam),
            token_id: "jti".into(),
            expires_at: 0,
        };
        assert_eq!(session.require_jury().unwrap(), Category::Slam);
        assert!(matches!(session.require_admin(), Err(AppError::Unauthorized)));
        assert!(matches!(session.require_candidate(), Err(AppError::Unauthorized)));
    }
}
