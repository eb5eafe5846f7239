// ABOUTME: Session token issuance and lookup for bearer headers and HttpOnly cookies
// ABOUTME: Tokens are random, persisted in the database and expire after a configured age

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

use crate::entities::token;
use crate::error::Result;
use crate::storage::Storage;

pub const SESSION_COOKIE_NAME: &str = "acronyms_session";
const TOKEN_SIZE: usize = 32; // 256 bits

pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_SIZE];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Creates and stores a fresh token for `user_id`, returning its value.
pub async fn issue_token(storage: &Storage, user_id: Uuid) -> Result<String> {
    let value = generate_token();
    storage.store_token(user_id, &value).await?;
    Ok(value)
}

pub fn is_expired(token: &token::Model, max_age_secs: i64) -> bool {
    chrono::Utc::now().timestamp() - token.created_at >= max_age_secs
}

pub fn create_session_cookie(token: String, secure: bool, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_secs))
        .path("/")
        .build()
}

pub fn create_logout_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}

/// Finds the caller's token: an `Authorization: Bearer` header wins over the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_generated_tokens_are_unique() {
        let first = generate_token();
        let second = generate_token();
        assert_ne!(first, second);
        assert_eq!(first.len(), 43); // 32 bytes, unpadded base64
    }

    #[test]
    fn test_bearer_header_preferred_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("acronyms_session=from-cookie"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("from-header"));

        headers.remove(header::AUTHORIZATION);
        assert_eq!(token_from_headers(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_basic_authorization_is_not_a_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic YTpi"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn test_token_expiry() {
        let now = chrono::Utc::now().timestamp();
        let token = token::Model {
            id: Uuid::new_v4(),
            value: "abc".to_string(),
            user_id: Uuid::new_v4(),
            created_at: now - 100,
        };
        assert!(!is_expired(&token, 3600));
        assert!(is_expired(&token, 50));
    }
}
