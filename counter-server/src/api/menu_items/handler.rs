//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::menu_items;
use crate::orders::money;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

/// GET /api/menu-items - full catalog, grouped by category
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_items::find_all(state.pool()).await?;
    Ok(Json(items))
}

/// POST /api/menu-items - add a catalog entry
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let name = validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    money::validate_price(payload.price)?;

    let data = MenuItemCreate {
        name,
        // Stored prices are always 2-decimal
        price: money::to_f64(money::to_decimal(payload.price)),
        category_id: payload.category_id,
    };
    let item = menu_items::create(state.pool(), &data).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let name = match &payload.name {
        Some(raw) => Some(validate_required_text(raw, "name", MAX_NAME_LEN)?),
        None => None,
    };
    let price = match payload.price {
        Some(price) => {
            money::validate_price(price)?;
            Some(money::to_f64(money::to_decimal(price)))
        }
        None => None,
    };

    let data = MenuItemUpdate {
        name,
        price,
        category_id: payload.category_id,
    };
    let item = menu_items::update(state.pool(), id, &data).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - remove a catalog entry
///
/// Existing order lines keep their name and price snapshots, so history
/// is unaffected.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    menu_items::delete(state.pool(), id).await?;
    Ok(Json(true))
}
