// ABOUTME: Password authentication using Argon2 hashes and HTTP Basic credentials
// ABOUTME: Handles login/logout and the extractor that gates mutating endpoints

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::Json,
};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use std::sync::OnceLock;

use crate::entities::user;
use crate::error::{AppError, Result};
use crate::types::LoginResponse;
use crate::{session, AppState};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::Internal(format!("Failed to hash password: {err}")))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::error!("Stored password hash is malformed: {}", err);
            false
        }
    }
}

/// Hash checked for unknown usernames so every failed login costs one Argon2 verification.
fn dummy_password_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("no-such-user").unwrap_or_default())
}

/// Decodes an `Authorization: Basic` header into `(username, password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .ok_or_else(|| AppError::Unauthorized("No basic credentials supplied".to_string()))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Unauthorized("Basic credentials are not valid base64".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AppError::Unauthorized("Basic credentials are not valid UTF-8".to_string()))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::Unauthorized("Basic credentials lack a password".to_string()))?;

    Ok((username.to_string(), password.to_string()))
}

/// The caller behind a valid, unexpired session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: user::Model,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = session::token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("No bearer token or session cookie".to_string()))?;

        let stored = state
            .storage
            .find_token(&token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown session token".to_string()))?;

        if session::is_expired(&stored, state.config.token_max_age_secs) {
            state.storage.remove_token(&token).await?;
            return Err(AppError::Unauthorized(format!(
                "Session token for user {} expired",
                stored.user_id
            )));
        }

        let user = match state.storage.get_user(stored.user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized(
                    "Session token belongs to a missing user".to_string(),
                ))
            }
            Err(err) => return Err(err),
        };

        Ok(Self { user, token })
    }
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let (username, password) = basic_credentials(&headers)?;

    let user = match state.storage.get_user_by_username(&username).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            verify_password(&password, dummy_password_hash());
            return Err(AppError::Unauthorized(format!("Unknown username {username}")));
        }
        Err(err) => return Err(err),
    };

    if !verify_password(&password, &user.password_hash) {
        return Err(AppError::Unauthorized(format!(
            "Wrong password for {username}"
        )));
    }

    let token = session::issue_token(&state.storage, user.id).await?;
    tracing::info!(user = %user.username, "user logged in");

    let cookie = session::create_session_cookie(
        token.clone(),
        state.config.secure_cookies,
        state.config.token_max_age_secs,
    );

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            user_id: user.id,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    state.storage.remove_token(&auth.token).await?;
    tracing::info!(user = %auth.user.username, "user logged out");

    Ok((jar.add(session::create_logout_cookie()), StatusCode::NO_CONTENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let dummy = dummy_password_hash();
        assert!(PasswordHash::new(dummy).is_ok());
        assert!(!verify_password("password", dummy));
    }

    #[test]
    fn test_basic_credentials_parsing() {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode("admin:pa:ss");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {encoded}")).unwrap(),
        );

        let (username, password) = basic_credentials(&headers).unwrap();
        assert_eq!(username, "admin");
        assert_eq!(password, "pa:ss");
    }

    #[test]
    fn test_basic_credentials_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            basic_credentials(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }
}
