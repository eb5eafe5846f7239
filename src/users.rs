// ABOUTME: HTTP handlers for registering and reading users and listing what they own
// ABOUTME: Every response uses the public projection, so password hashes never leave the server

use axum::{
    extract::{Path, State},
    response::Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::auth;
use crate::entities::acronym;
use crate::error::{AppError, Result};
use crate::types::{CreateUserRequest, PublicUser};
use crate::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> Result<Json<PublicUser>> {
    req.validate()?;

    let password_hash = auth::hash_password(&req.password)?;
    let user = state
        .storage
        .create_user(&req.name, &req.username, &password_hash)
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(Json(user.into()))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>> {
    let users = state.storage.list_users().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<PublicUser>> {
    Ok(Json(state.storage.get_user(user_id).await?.into()))
}

pub async fn get_user_acronyms(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<acronym::Model>>> {
    Ok(Json(state.storage.user_acronyms(user_id).await?))
}
