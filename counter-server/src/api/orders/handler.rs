//! Order API Handlers
//!
//! Handlers stay thin: parse and sanitize the request, snapshot settings
//! where pricing needs them, then delegate to the repository. Client-sent
//! names and prices on order lines are advisory; the catalog is the only
//! pricing authority.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{menu_items, orders, settings};
use crate::orders::{KotTicket, TaxConfig, build_ticket, compute_totals, money};
use crate::utils::validation::{
    MAX_CUSTOMER_NAME_LEN, MAX_PHONE_LEN, MIN_CUSTOMER_NAME_LEN, MIN_PHONE_LEN,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, time};
use shared::models::{Order, OrderCreate, OrderItemInput, OrderItemsAdd, OrderStatus, OrderStatusUpdate};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Business day "YYYY-MM-DD", inclusive
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// Paginated listing response
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// GET /api/orders - paginated listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderPage>> {
    let tz = state.config.timezone;
    let from = match query.from.as_deref() {
        Some(date) => Some(parse_day(date, tz, "from")?.0),
        None => None,
    };
    let to = match query.to.as_deref() {
        Some(date) => Some(parse_day(date, tz, "to")?.1),
        None => None,
    };

    // Mirror the repository clamps so the echoed page math matches what
    // was actually served.
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);

    let filter = orders::OrderFilter {
        status: query.status,
        from,
        to,
        page,
        limit,
    };
    let (orders, total) = orders::find_page(state.pool(), &filter).await?;

    Ok(Json(OrderPage {
        orders,
        total,
        page,
        limit,
        total_pages: (total + limit - 1) / limit,
    }))
}

/// POST /api/orders - open a PENDING order with catalog-priced lines
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let settings = settings::load(state.pool()).await?;

    if let Some(table) = payload.table_number {
        if table < 1 || table > settings.table_count {
            return Err(AppError::new(ErrorCode::TableNumberInvalid)
                .with_detail("tableNumber", table)
                .with_detail("tableCount", settings.table_count));
        }
    }

    let lines = resolve_lines(state.pool(), &payload.items).await?;
    let totals = compute_totals(
        lines.iter().map(|l| (l.price, l.quantity)),
        TaxConfig {
            enabled: settings.tax_enabled,
            rate: settings.tax_rate,
        },
    );

    let day = time::day_key(shared::util::now_millis(), state.config.timezone);
    let order = orders::create(state.pool(), &day, payload.table_number, &lines, totals).await?;

    tracing::info!(
        order_id = order.id,
        token = order.token_number,
        total = order.total,
        "Order created"
    );
    Ok(Json(order))
}

/// GET /api/orders/{id} - one order with its lines
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id))?;
    Ok(Json(order))
}

/// PUT /api/orders/{id} - settle, cancel or collect an order
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let update = OrderStatusUpdate {
        status: payload.status,
        payment_method: payload.payment_method,
        customer_name: validate_optional_text(
            &payload.customer_name,
            "customerName",
            MIN_CUSTOMER_NAME_LEN,
            MAX_CUSTOMER_NAME_LEN,
        )?,
        customer_phone: validate_optional_text(
            &payload.customer_phone,
            "customerPhone",
            MIN_PHONE_LEN,
            MAX_PHONE_LEN,
        )?,
    };

    let order = orders::update_status(state.pool(), id, &update).await?;

    // The transition is committed at this point; only a PAID settlement
    // feeds the CRM. Both customer fields come off the updated order so
    // details captured at UNPAID time survive a later collection.
    if update.status == OrderStatus::Paid {
        state.crm.notify_paid(
            order.customer_name.clone(),
            order.customer_phone.clone(),
            order.total,
        );
        tracing::info!(order_id = order.id, total = order.total, "Order settled as PAID");
    }

    Ok(Json(order))
}

/// DELETE /api/orders/{id} - remove an order and its lines
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    orders::delete(state.pool(), id).await?;
    Ok(Json(true))
}

/// POST /api/orders/{id}/items - add lines to an open order
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemsAdd>,
) -> AppResult<Json<Order>> {
    let settings = settings::load(state.pool()).await?;
    let lines = resolve_lines(state.pool(), &payload.items).await?;

    let order = orders::add_items(
        state.pool(),
        id,
        &lines,
        TaxConfig {
            enabled: settings.tax_enabled,
            rate: settings.tax_rate,
        },
    )
    .await?;
    Ok(Json(order))
}

/// GET /api/orders/{id}/kot - incremental kitchen ticket
pub async fn kot_ticket(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<KotTicket>> {
    let order = orders::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id))?;
    Ok(Json(build_ticket(&order)))
}

/// PUT /api/orders/{id}/kot - mark every line as sent to the kitchen
pub async fn mark_kot_printed(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::mark_kot_printed(state.pool(), id).await?;
    Ok(Json(order))
}

fn parse_day(date: &str, tz: Tz, field: &str) -> AppResult<(i64, i64)> {
    time::day_bounds(date, tz).ok_or_else(|| {
        AppError::validation(format!("{field} must be a YYYY-MM-DD date")).with_detail(field, date)
    })
}

/// Resolve request lines against the catalog: validate quantities, merge
/// duplicate menu ids, and snapshot the authoritative name and price. One
/// unknown id fails the whole batch before anything is written.
async fn resolve_lines(
    pool: &SqlitePool,
    items: &[OrderItemInput],
) -> AppResult<Vec<orders::NewOrderLine>> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let mut lines = Vec::new();
    for (id, quantity) in consolidate(items) {
        money::validate_quantity(quantity).map_err(|e| e.with_detail("menuItemId", id))?;
        let (name, price) = menu_items::lookup_price(pool, id)
            .await?
            .ok_or_else(|| AppError::validation("Unknown menu item").with_detail("menuItemId", id))?;
        lines.push(orders::NewOrderLine {
            menu_item_id: id,
            name,
            price,
            quantity,
        });
    }
    Ok(lines)
}

/// Merge duplicate menu ids, preserving first-seen order. Quantities are
/// summed with saturation; the merged value is validated afterwards.
fn consolidate(items: &[OrderItemInput]) -> Vec<(i64, i32)> {
    let mut seen: Vec<i64> = Vec::new();
    let mut merged: HashMap<i64, i32> = HashMap::new();
    for item in items {
        if !merged.contains_key(&item.menu_item_id) {
            seen.push(item.menu_item_id);
        }
        let entry = merged.entry(item.menu_item_id).or_insert(0);
        *entry = entry.saturating_add(item.quantity);
    }
    seen.into_iter()
        .filter_map(|id| merged.remove(&id).map(|qty| (id, qty)))
        .collect()
}
