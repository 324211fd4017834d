//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::orders;
use crate::utils::{AppResult, time};
use shared::models::Order;

/// Orders shown in the dashboard's recent panel
const RECENT_ORDERS: i64 = 5;

/// Counter dashboard aggregates. "Today" follows the business timezone,
/// not UTC; pending counts every open order regardless of day.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_revenue: f64,
    pub cash_revenue: f64,
    pub online_revenue: f64,
    pub today_orders: i64,
    pub pending_orders: i64,
    pub recent_orders: Vec<Order>,
}

/// GET /api/statistics/dashboard - the counter home screen numbers
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let day_start = time::day_start_millis(shared::util::now_millis(), state.config.timezone);
    let stats = orders::today_stats(state.pool(), day_start).await?;
    let recent_orders = orders::find_recent(state.pool(), RECENT_ORDERS).await?;

    Ok(Json(DashboardStats {
        today_revenue: stats.today_revenue,
        cash_revenue: stats.cash_revenue,
        online_revenue: stats.online_revenue,
        today_orders: stats.today_orders,
        pending_orders: stats.pending_orders,
        recent_orders,
    }))
}
