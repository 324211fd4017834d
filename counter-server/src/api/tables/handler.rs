//! Table API Handlers
//!
//! Tables have no rows of their own. The floor view is derived on every
//! request from the configured table count and the set of PENDING orders
//! holding a table.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::orders::PendingTableRow;
use crate::db::repository::{orders, settings};
use crate::utils::AppResult;
use shared::models::{TableInfo, TableOrderSummary, TableStatus};

/// GET /api/tables - occupancy for tables 1..=tableCount
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TableInfo>>> {
    let settings = settings::load(state.pool()).await?;
    let open = orders::pending_by_table(state.pool()).await?;
    Ok(Json(build_floor(settings.table_count, open)))
}

/// One entry per table number. An open order at a number outside the
/// current floor plan is simply not shown; it still blocks that number.
fn build_floor(table_count: i64, open: Vec<PendingTableRow>) -> Vec<TableInfo> {
    let mut floor: Vec<TableInfo> = (1..=table_count.max(0))
        .map(|number| TableInfo {
            number,
            status: TableStatus::Available,
            order: None,
        })
        .collect();

    for row in open {
        if row.table_number < 1 {
            continue;
        }
        let Some(slot) = floor.get_mut((row.table_number - 1) as usize) else {
            continue;
        };
        slot.status = TableStatus::Occupied;
        slot.order = Some(TableOrderSummary {
            id: row.id,
            token_number: row.token_number,
            total: row.total,
            item_count: row.item_count,
            created_at: row.created_at,
        });
    }
    floor
}
