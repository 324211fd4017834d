//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::categories;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::AppResult;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories - all categories with item counts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = categories::find_all(state.pool()).await?;
    Ok(Json(categories))
}

/// POST /api/categories - add a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let name = validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let category = categories::create(state.pool(), &name).await?;
    Ok(Json(category))
}

/// PUT /api/categories/{id} - rename a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let name = validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let category = categories::update(state.pool(), id, &name).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - remove an empty category
///
/// Refused while any menu item still references it.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    categories::delete(state.pool(), id).await?;
    Ok(Json(true))
}
