//! Authentication service

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::{BootstrapAdmin, Config},
    error::{AppError, AppResult},
    models::{Category, NewProfile, Profile, ProfileFilter, Role, SessionContext},
    store::{CacheStore, DataStore},
    utils::{normalize_phone, sha256_hex, validate_email, validate_password},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // profile id
    pub role: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// A signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub profile: Profile,
    pub role: Role,
    pub token: IssuedToken,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a candidate who logs in with their phone number
    pub async fn register_candidate(
        data: &dyn DataStore,
        config: &Config,
        full_name: &str,
        phone: &str,
        password: &str,
        competition: Category,
    ) -> AppResult<Profile> {
        let phone = normalize_phone(phone).map_err(|e| AppError::Validation(e.to_string()))?;
        let email = Self::phone_login_email(&phone, &config.auth.phone_login_domain);

        let profile = Self::create_account(
            data,
            &email,
            password,
            full_name,
            Role::Candidate(competition),
            Some(phone),
        )
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Conflict("Phone number already registered".to_string())
            }
            other => other,
        })?;

        info!(candidate_id = %profile.id, competition = %competition, "Candidate registered");
        Ok(profile)
    }

    /// Create a jury member, jury president or administrator
    pub async fn create_staff(
        data: &dyn DataStore,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> AppResult<Profile> {
        if matches!(role, Role::Candidate(_)) {
            return Err(AppError::Validation(
                "Candidates register themselves".to_string(),
            ));
        }

        let email = email.trim().to_lowercase();
        validate_email(&email).map_err(|e| AppError::Validation(e.to_string()))?;

        let profile = Self::create_account(data, &email, password, full_name, role, None)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => {
                    AppError::Conflict("Email already registered".to_string())
                }
                other => other,
            })?;

        info!(profile_id = %profile.id, role = %profile.role, "Staff account created");
        Ok(profile)
    }

    /// Account first, then its profile; a failed profile insert removes the account
    async fn create_account(
        data: &dyn DataStore,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
        phone: Option<String>,
    ) -> AppResult<Profile> {
        validate_password(password).map_err(|e| AppError::Validation(e.to_string()))?;
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }

        let password_hash = Self::hash_password(password)?;
        let id = data.create_account(email, &password_hash).await?;

        let profile = NewProfile {
            id,
            full_name: full_name.to_string(),
            role,
            phone,
            email: Some(email.to_string()),
        };

        match data.insert_profile(profile).await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                if let Err(cleanup) = data.delete_account(id).await {
                    warn!(account_id = %id, error = %cleanup, "Failed to remove account after profile insert failure");
                }
                Err(e)
            }
        }
    }

    /// Login with an email or a phone number
    pub async fn login(
        data: &dyn DataStore,
        config: &Config,
        identifier: &str,
        password: &str,
    ) -> AppResult<LoginOutcome> {
        let email = Self::login_email(identifier, &config.auth.phone_login_domain)?;

        let account = data
            .find_account_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let profile = data
            .find_profile(account.id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let role = profile.decoded_role().map_err(|_| AppError::Unauthorized)?;

        let token = Self::issue_token(&profile.id, role, config)?;

        info!(profile_id = %profile.id, role = %profile.role, "Login succeeded");
        Ok(LoginOutcome {
            profile,
            role,
            token,
        })
    }

    /// Revoke the session's token until it would have expired anyway
    pub async fn logout(cache: &dyn CacheStore, session: &SessionContext) -> AppResult<()> {
        let remaining = (session.expires_at - Utc::now().timestamp()).max(1) as u64;
        cache
            .set_flag(&Self::revocation_key(&session.token_id), remaining)
            .await
    }

    /// Cache key marking a token id as revoked
    pub fn revocation_key(token_id: &str) -> String {
        format!("revoked_token:{}", sha256_hex(token_id))
    }

    /// Create the configured administrator unless an admin already exists
    pub async fn bootstrap_admin(
        data: &dyn DataStore,
        admin: &BootstrapAdmin,
    ) -> AppResult<Option<Profile>> {
        if !data.list_profiles(ProfileFilter::admins()).await?.is_empty() {
            return Ok(None);
        }
        if data.find_account_by_email(&admin.email).await?.is_some() {
            warn!(email = %admin.email, "Bootstrap admin email is taken by another account");
            return Ok(None);
        }

        Self::create_staff(
            data,
            &admin.email,
            &admin.password,
            &admin.full_name,
            Role::Admin,
        )
        .await
        .map(Some)
    }

    /// Login email for a hybrid identifier
    ///
    /// Anything holding `@` is an email; everything else is a phone number.
    pub fn login_email(identifier: &str, phone_domain: &str) -> AppResult<String> {
        let identifier = identifier.trim();
        if identifier.contains('@') {
            return Ok(identifier.to_lowercase());
        }
        let phone = normalize_phone(identifier).map_err(|_| AppError::InvalidCredentials)?;
        Ok(Self::phone_login_email(&phone, phone_domain))
    }

    fn phone_login_email(phone: &str, domain: &str) -> String {
        format!("{}@{}", phone, domain)
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign an access token for a profile
    pub fn issue_token(profile_id: &Uuid, role: Role, config: &Config) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);

        let claims = Claims {
            sub: profile_id.to_string(),
            role: role.stored_role().to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: config.jwt.expiry_hours * 3600,
        })
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
