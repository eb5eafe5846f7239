// ABOUTME: HTTP handlers for categories and the acronyms tagged with them

use axum::{
    extract::{Path, State},
    response::Json,
};
use axum_extra::extract::WithRejection;

use crate::auth::AuthenticatedUser;
use crate::entities::{acronym, category};
use crate::error::{AppError, Result};
use crate::types::CreateCategoryRequest;
use crate::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    WithRejection(Json(req), _): WithRejection<Json<CreateCategoryRequest>, AppError>,
) -> Result<Json<category::Model>> {
    let category = state.storage.create_category(&req.name).await?;
    tracing::info!(
        category_id = category.id,
        name = %category.name,
        by = %auth.user.username,
        "category created"
    );

    Ok(Json(category))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<category::Model>>> {
    Ok(Json(state.storage.list_categories().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    WithRejection(Path(category_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<category::Model>> {
    Ok(Json(state.storage.get_category(category_id).await?))
}

pub async fn get_category_acronyms(
    State(state): State<AppState>,
    WithRejection(Path(category_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Vec<acronym::Model>>> {
    Ok(Json(state.storage.category_acronyms(category_id).await?))
}
