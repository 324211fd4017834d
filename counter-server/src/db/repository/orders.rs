//! Order Repository
//!
//! Every mutation runs in a transaction. Monetary columns are only ever
//! written from totals recomputed over the full line set, and lines are
//! only ever built from catalog lookups, so client-supplied amounts can
//! never reach disk.

use std::collections::HashMap;

use shared::models::{Order, OrderItem, OrderStatus, OrderStatusUpdate};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::db::repository::counters;
use crate::orders::lifecycle;
use crate::orders::pricing::{compute_totals, OrderTotals, TaxConfig};

const ORDER_SELECT: &str = "SELECT id, token_number, table_number, status, payment_method, \
     customer_name, customer_phone, subtotal, tax, total, created_at, updated_at FROM orders";

const ITEM_SELECT: &str =
    "SELECT id, order_id, menu_item_id, name, price, quantity, printed_quantity FROM order_items";

/// Authoritative order line, already resolved against the menu catalog.
/// One entry per menu item; callers consolidate duplicates before this point.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Create a PENDING order: allocates the day token and writes header plus
/// lines in one transaction. A unique-index hit on the table number means
/// another open order already holds that table.
pub async fn create(
    pool: &SqlitePool,
    day_key: &str,
    table_number: Option<i64>,
    lines: &[NewOrderLine],
    totals: OrderTotals,
) -> AppResult<Order> {
    let mut tx = pool.begin().await?;

    let token = counters::next_token(&mut tx, day_key).await?;
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    let inserted = sqlx::query(
        "INSERT INTO orders (id, token_number, table_number, status, subtotal, tax, total, created_at, updated_at)
         VALUES (?, ?, ?, 'PENDING', ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(token)
    .bind(table_number)
    .bind(totals.subtotal)
    .bind(totals.tax)
    .bind(totals.total)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await;
    if let Err(err) = inserted {
        return Err(map_table_conflict(err, table_number));
    }

    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, position, menu_item_id, name, price, quantity, printed_quantity)
             VALUES (?, ?, ?, ?, ?, ?, ?, 0)",
        )
        .bind(shared::util::snowflake_id())
        .bind(id)
        .bind(position as i64)
        .bind(line.menu_item_id)
        .bind(&line.name)
        .bind(line.price)
        .bind(line.quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to create order"))
}

fn map_table_conflict(err: sqlx::Error, table_number: Option<i64>) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let mut app = AppError::new(ErrorCode::TableOccupied);
            if let Some(n) = table_number {
                app = app.with_detail("tableNumber", n);
            }
            app
        }
        _ => err.into(),
    }
}

/// Add lines to an open order. A line matching an existing menu item merges
/// into it: quantity accumulates, name and price are refreshed from the
/// catalog, and printed_quantity is left alone so the kitchen only sees the
/// delta. Totals are recomputed from the full line set before commit.
pub async fn add_items(
    pool: &SqlitePool,
    order_id: i64,
    additions: &[NewOrderLine],
    tax: TaxConfig,
) -> AppResult<Order> {
    let mut tx = pool.begin().await?;

    let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(status) = status else {
        return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", order_id));
    };
    if status != OrderStatus::Pending {
        return Err(
            AppError::new(ErrorCode::OrderNotPending).with_detail("currentStatus", status.as_str())
        );
    }

    let mut next_position = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM order_items WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    for line in additions {
        let merged = sqlx::query(
            "UPDATE order_items SET quantity = quantity + ?, price = ?, name = ?
             WHERE order_id = ? AND menu_item_id = ?",
        )
        .bind(line.quantity)
        .bind(line.price)
        .bind(&line.name)
        .bind(order_id)
        .bind(line.menu_item_id)
        .execute(&mut *tx)
        .await?;
        if merged.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, position, menu_item_id, name, price, quantity, printed_quantity)
                 VALUES (?, ?, ?, ?, ?, ?, ?, 0)",
            )
            .bind(shared::util::snowflake_id())
            .bind(order_id)
            .bind(next_position)
            .bind(line.menu_item_id)
            .bind(&line.name)
            .bind(line.price)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
            next_position += 1;
        }
    }

    let full_lines = sqlx::query_as::<_, (f64, i32)>(
        "SELECT price, quantity FROM order_items WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_all(&mut *tx)
    .await?;
    let totals = compute_totals(full_lines, tax);

    sqlx::query("UPDATE orders SET subtotal = ?, tax = ?, total = ?, updated_at = ? WHERE id = ?")
        .bind(totals.subtotal)
        .bind(totals.tax)
        .bind(totals.total)
        .bind(shared::util::now_millis())
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Apply a status transition. Customer fields and payment method use
/// COALESCE so settlement data already on the order survives later
/// transitions (UNPAID keeps its method through collection or write-off).
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    update: &OrderStatusUpdate,
) -> AppResult<Order> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id))?;

    lifecycle::validate_transition(current, update.status)?;
    lifecycle::validate_settlement(
        update.status,
        update.payment_method,
        update.customer_name.as_deref(),
    )?;

    // Only settlements record a method; CANCELLED never overwrites one
    let method_to_store = match update.status {
        OrderStatus::Paid | OrderStatus::Unpaid => update.payment_method,
        _ => None,
    };

    sqlx::query(
        "UPDATE orders SET status = ?, payment_method = COALESCE(?, payment_method),
             customer_name = COALESCE(?, customer_name),
             customer_phone = COALESCE(?, customer_phone),
             updated_at = ?
         WHERE id = ?",
    )
    .bind(update.status)
    .bind(method_to_store)
    .bind(&update.customer_name)
    .bind(&update.customer_phone)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Mark every line as sent to the kitchen (printed_quantity = quantity).
pub async fn mark_kot_printed(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id));
    }

    sqlx::query(
        "UPDATE order_items SET printed_quantity = quantity
         WHERE order_id = ? AND printed_quantity < quantity",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE orders SET updated_at = ? WHERE id = ?")
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Delete an order; lines go with it via ON DELETE CASCADE.
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match order {
        Some(mut order) => {
            let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY position");
            order.items = sqlx::query_as::<_, OrderItem>(&sql)
                .bind(id)
                .fetch_all(pool)
                .await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

/// Listing filter; `page` is 1-based.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive created_at lower bound, unix millis
    pub from: Option<i64>,
    /// Inclusive created_at upper bound, unix millis
    pub to: Option<i64>,
    pub page: i64,
    pub limit: i64,
}

/// Newest-first page of orders plus the total row count under the same
/// filter, for client-side page math.
pub async fn find_page(pool: &SqlitePool, filter: &OrderFilter) -> AppResult<(Vec<Order>, i64)> {
    let mut clauses: Vec<&str> = Vec::new();
    if filter.status.is_some() {
        clauses.push("status = ?");
    }
    if filter.from.is_some() {
        clauses.push("created_at >= ?");
    }
    if filter.to.is_some() {
        clauses.push("created_at <= ?");
    }
    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM orders{where_sql}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(status) = filter.status {
        count_query = count_query.bind(status);
    }
    if let Some(from) = filter.from {
        count_query = count_query.bind(from);
    }
    if let Some(to) = filter.to {
        count_query = count_query.bind(to);
    }
    let total = count_query.fetch_one(pool).await?;

    let page = filter.page.max(1);
    let limit = filter.limit.clamp(1, 100);
    let offset = (page - 1) * limit;

    let page_sql = format!("{ORDER_SELECT}{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");
    let mut page_query = sqlx::query_as::<_, Order>(&page_sql);
    if let Some(status) = filter.status {
        page_query = page_query.bind(status);
    }
    if let Some(from) = filter.from {
        page_query = page_query.bind(from);
    }
    if let Some(to) = filter.to {
        page_query = page_query.bind(to);
    }
    let mut orders = page_query.bind(limit).bind(offset).fetch_all(pool).await?;

    attach_items(pool, &mut orders).await?;
    Ok((orders, total))
}

/// Newest `limit` orders regardless of status, with lines attached.
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> AppResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC, id DESC LIMIT ?");
    let mut orders = sqlx::query_as::<_, Order>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    attach_items(pool, &mut orders).await?;
    Ok(orders)
}

async fn attach_items(pool: &SqlitePool, orders: &mut [Order]) -> AppResult<()> {
    if orders.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; orders.len()].join(", ");
    let sql = format!("{ITEM_SELECT} WHERE order_id IN ({placeholders}) ORDER BY order_id, position");
    let mut query = sqlx::query_as::<_, OrderItem>(&sql);
    for order in orders.iter() {
        query = query.bind(order.id);
    }
    let items = query.fetch_all(pool).await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    for order in orders.iter_mut() {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(())
}

/// Aggregates for the dashboard. Revenue counts PAID orders created today;
/// pending_orders counts every open order regardless of day.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct DayStats {
    pub today_revenue: f64,
    pub cash_revenue: f64,
    pub online_revenue: f64,
    pub today_orders: i64,
    pub pending_orders: i64,
}

pub async fn today_stats(pool: &SqlitePool, day_start: i64) -> AppResult<DayStats> {
    let stats = sqlx::query_as::<_, DayStats>(
        "SELECT
             COALESCE(SUM(CASE WHEN status = 'PAID' AND created_at >= ? THEN total END), 0.0) AS today_revenue,
             COALESCE(SUM(CASE WHEN status = 'PAID' AND created_at >= ? AND payment_method = 'CASH' THEN total END), 0.0) AS cash_revenue,
             COALESCE(SUM(CASE WHEN status = 'PAID' AND created_at >= ? AND payment_method = 'ONLINE' THEN total END), 0.0) AS online_revenue,
             COALESCE(SUM(CASE WHEN created_at >= ? THEN 1 END), 0) AS today_orders,
             COALESCE(SUM(CASE WHEN status = 'PENDING' THEN 1 END), 0) AS pending_orders
         FROM orders",
    )
    .bind(day_start)
    .bind(day_start)
    .bind(day_start)
    .bind(day_start)
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// One row per occupied table, used to derive floor status. The partial
/// unique index guarantees at most one open order per table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingTableRow {
    pub id: i64,
    pub token_number: i64,
    pub table_number: i64,
    pub total: f64,
    /// Sum of line quantities, not the number of lines
    pub item_count: i64,
    pub created_at: i64,
}

pub async fn pending_by_table(pool: &SqlitePool) -> AppResult<Vec<PendingTableRow>> {
    let rows = sqlx::query_as::<_, PendingTableRow>(
        "SELECT o.id, o.token_number, o.table_number, o.total, o.created_at,
                COALESCE(SUM(oi.quantity), 0) AS item_count
         FROM orders o
         LEFT JOIN order_items oi ON oi.order_id = o.id
         WHERE o.status = 'PENDING' AND o.table_number IS NOT NULL
         GROUP BY o.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
