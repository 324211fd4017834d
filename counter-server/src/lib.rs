//! Counter Server - restaurant counter and order management backend
//!
//! # Overview
//!
//! Single-process HTTP server for a counter-service restaurant:
//!
//! - **Orders** (`orders`, `api/orders`): daily-token order lifecycle with
//!   catalog-priced lines, settlement and kitchen tickets
//! - **Menu** (`api/menu_items`, `api/categories`): the pricing authority
//! - **Floor** (`api/tables`): occupancy derived from open orders
//! - **CRM** (`crm`): customer totals folded in as orders settle
//! - **Database** (`db`): embedded SQLite via sqlx, WAL mode
//!
//! # Module structure
//!
//! ```text
//! counter-server/src/
//! ├── core/     # configuration, state, server, process errors
//! ├── api/      # HTTP routes and handlers
//! ├── orders/   # pricing, lifecycle and KOT rules (pure)
//! ├── crm/      # settlement-driven customer tracking
//! ├── db/       # SQLite pool, migrations, repositories
//! └── utils/    # logging, business-day time, validation
//! ```

pub mod api;
pub mod core;
pub mod crm;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::crm::{CrmService, CustomerVisit};
pub use crate::db::DbService;

// Re-export unified error types from shared
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging before anything else reads the
/// environment.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("COUNTER_LOG_LEVEL").ok();
    let log_dir = std::env::var("COUNTER_LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______                  __
  / ____/___  __  ______  / /____  _____
 / /   / __ \/ / / / __ \/ __/ _ \/ ___/
/ /___/ /_/ / /_/ / / / / /_/  __/ /
\____/\____/\__,_/_/ /_/\__/\___/_/
    "#
    );
}
