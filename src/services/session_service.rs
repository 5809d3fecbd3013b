//! Session resolution and view gating

use tracing::debug;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Route, SessionContext, ViewDecision},
    store::{CacheStore, DataStore},
};

use super::AuthService;

/// Turns a bearer token into a [`SessionContext`]
pub struct SessionService;

impl SessionService {
    /// Verify the token, check it was not revoked and decode the profile's role
    ///
    /// A missing or undecodable profile, or any lookup failure, is reported as
    /// `Unauthorized`.
    pub async fn resolve(
        data: &dyn DataStore,
        cache: &dyn CacheStore,
        config: &Config,
        token: &str,
    ) -> AppResult<SessionContext> {
        let claims = AuthService::verify_token(token, &config.jwt.secret)?;

        let revoked = cache
            .has_flag(&AuthService::revocation_key(&claims.jti))
            .await
            .map_err(|e| {
                debug!(error = %e, "Revocation lookup failed");
                AppError::Unauthorized
            })?;
        if revoked {
            debug!(sub = %claims.sub, "Token was revoked");
            return Err(AppError::Unauthorized);
        }

        let principal_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        let profile = match data.find_profile(principal_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!(%principal_id, "No profile for principal");
                return Err(AppError::Unauthorized);
            }
            Err(e) => {
                debug!(%principal_id, error = %e, "Profile lookup failed");
                return Err(AppError::Unauthorized);
            }
        };

        let role = profile.decoded_role().map_err(|e| {
            debug!(%principal_id, error = %e, "Profile role could not be decoded");
            AppError::Unauthorized
        })?;

        Ok(SessionContext {
            principal_id,
            full_name: profile.full_name,
            role,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }

    /// Decide which view a path shows to the session, if any
    pub fn resolve_view(path: &str, session: Option<&SessionContext>) -> AppResult<ViewDecision> {
        let route = Route::parse(path)
            .ok_or_else(|| AppError::NotFound(format!("Unknown view: {}", path)))?;
        Ok(route.resolve(session.map(|s| s.role)))
    }
}
