// ABOUTME: Type definitions for API requests and responses
// ABOUTME: Includes acronym and user payloads plus the password-free public user projection

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user;
use crate::error::{AppError, Result};

// Acronym payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcronymPayload {
    pub short: String,
    pub long: String,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

impl AcronymPayload {
    /// Rejects blank short or long forms; the owner is checked against storage separately.
    pub fn validate(&self) -> Result<()> {
        if self.short.trim().is_empty() {
            return Err(AppError::BadRequest("short must not be empty".to_string()));
        }
        if self.long.trim().is_empty() {
            return Err(AppError::BadRequest("long must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

// User payloads
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(AppError::BadRequest("username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::BadRequest("password must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A user as exposed over the API, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<user::Model> for PublicUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

// Category payloads
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}
