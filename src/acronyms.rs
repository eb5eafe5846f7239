// ABOUTME: HTTP handlers for the acronym collection, its owner and its categories
// ABOUTME: Reads are public; creating, updating, deleting and linking need a session token

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;

use crate::auth::AuthenticatedUser;
use crate::entities::{acronym, category};
use crate::error::{AppError, Result};
use crate::types::{AcronymPayload, PublicUser, SearchQuery};
use crate::AppState;

/// Lists every acronym, or only those matching `?term=` when it is given.
pub async fn list_acronyms(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<acronym::Model>>> {
    let acronyms = match query.term {
        Some(term) => state.storage.search_acronyms(&term).await?,
        None => state.storage.list_acronyms().await?,
    };

    Ok(Json(acronyms))
}

pub async fn create_acronym(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<AcronymPayload>, AppError>,
) -> Result<Json<acronym::Model>> {
    let acronym = state.storage.create_acronym(&payload).await?;
    tracing::info!(
        acronym_id = acronym.id,
        short = %acronym.short,
        by = %auth.user.username,
        "acronym created"
    );

    Ok(Json(acronym))
}

pub async fn get_acronym(
    State(state): State<AppState>,
    WithRejection(Path(acronym_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<acronym::Model>> {
    Ok(Json(state.storage.get_acronym(acronym_id).await?))
}

pub async fn update_acronym(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Path(acronym_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<AcronymPayload>, AppError>,
) -> Result<Json<acronym::Model>> {
    let acronym = state.storage.update_acronym(acronym_id, &payload).await?;
    tracing::info!(acronym_id, by = %auth.user.username, "acronym updated");

    Ok(Json(acronym))
}

pub async fn delete_acronym(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Path(acronym_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<StatusCode> {
    state.storage.delete_acronym(acronym_id).await?;
    tracing::info!(acronym_id, by = %auth.user.username, "acronym deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn first_acronym(State(state): State<AppState>) -> Result<Json<acronym::Model>> {
    Ok(Json(state.storage.first_acronym().await?))
}

pub async fn sorted_acronyms(State(state): State<AppState>) -> Result<Json<Vec<acronym::Model>>> {
    Ok(Json(state.storage.sorted_acronyms().await?))
}

pub async fn get_acronym_user(
    State(state): State<AppState>,
    WithRejection(Path(acronym_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<PublicUser>> {
    let owner = state.storage.acronym_owner(acronym_id).await?;
    Ok(Json(owner.into()))
}

pub async fn add_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Path((acronym_id, category_id)), _): WithRejection<Path<(i32, i32)>, AppError>,
) -> Result<StatusCode> {
    state
        .storage
        .attach_category(acronym_id, category_id)
        .await?;
    tracing::info!(acronym_id, category_id, by = %auth.user.username, "category attached");

    Ok(StatusCode::CREATED)
}

pub async fn remove_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Path((acronym_id, category_id)), _): WithRejection<Path<(i32, i32)>, AppError>,
) -> Result<StatusCode> {
    state
        .storage
        .detach_category(acronym_id, category_id)
        .await?;
    tracing::info!(acronym_id, category_id, by = %auth.user.username, "category detached");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_acronym_categories(
    State(state): State<AppState>,
    WithRejection(Path(acronym_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Vec<category::Model>>> {
    Ok(Json(state.storage.acronym_categories(acronym_id).await?))
}
