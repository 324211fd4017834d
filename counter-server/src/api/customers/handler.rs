//! Customer API Handlers
//!
//! Read-only. Rows are created by the CRM worker as orders settle; there
//! is no direct create or update endpoint.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::customers;
use crate::utils::AppResult;
use shared::models::Customer;

/// GET /api/customers - all customers, most recent visit first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customers::find_all(state.pool()).await?;
    Ok(Json(customers))
}
