//! Domain models shared between the server and its clients.
//!
//! All API-facing structs serialize as camelCase JSON. Database-backed
//! structs additionally derive `sqlx::FromRow` behind the `db` feature so
//! client builds stay free of the sqlx dependency.

pub mod category;
pub mod customer;
pub mod menu_item;
pub mod order;
pub mod settings;
pub mod table;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use customer::Customer;
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemInput, OrderItemsAdd, OrderStatus, OrderStatusUpdate,
    PaymentMethod,
};
pub use settings::{AppSettings, SettingsUpdate};
pub use table::{TableInfo, TableOrderSummary, TableStatus};
