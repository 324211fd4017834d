//! Repository Module
//!
//! CRUD operations over the SQLite pool. Functions are free functions
//! taking `&SqlitePool`; sqlx errors convert to `AppError` (DatabaseError)
//! via the shared `From` impl, domain failures map to specific codes.

pub mod categories;
pub mod counters;
pub mod customers;
pub mod menu_items;
pub mod orders;
pub mod settings;

/// In-memory pool with the production schema, for repository tests
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE categories (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
            created_at  INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE menu_items (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            price       REAL NOT NULL,
            category_id INTEGER NOT NULL REFERENCES categories(id),
            created_at  INTEGER NOT NULL,
            updated_at  INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE orders (
            id             INTEGER PRIMARY KEY,
            token_number   INTEGER NOT NULL,
            table_number   INTEGER,
            status         TEXT NOT NULL DEFAULT 'PENDING',
            payment_method TEXT,
            customer_name  TEXT,
            customer_phone TEXT,
            subtotal       REAL NOT NULL DEFAULT 0,
            tax            REAL NOT NULL DEFAULT 0,
            total          REAL NOT NULL DEFAULT 0,
            created_at     INTEGER NOT NULL,
            updated_at     INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE UNIQUE INDEX idx_orders_pending_table
         ON orders(table_number)
         WHERE status = 'PENDING' AND table_number IS NOT NULL",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE order_items (
            id               INTEGER PRIMARY KEY,
            order_id         INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            position         INTEGER NOT NULL,
            menu_item_id     INTEGER NOT NULL,
            name             TEXT NOT NULL,
            price            REAL NOT NULL,
            quantity         INTEGER NOT NULL,
            printed_quantity INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE customers (
            phone        TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            total_orders INTEGER NOT NULL DEFAULT 0,
            total_spent  REAL NOT NULL DEFAULT 0,
            last_visit   INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE token_counters (
            day_key TEXT PRIMARY KEY,
            seq     INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

/// Seed one category and return its id
#[cfg(test)]
pub(crate) async fn seed_category(pool: &sqlx::SqlitePool, name: &str) -> i64 {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(shared::util::now_millis())
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Seed one menu item and return its id
#[cfg(test)]
pub(crate) async fn seed_menu_item(
    pool: &sqlx::SqlitePool,
    category_id: i64,
    name: &str,
    price: f64,
) -> i64 {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_items (id, name, price, category_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(category_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap();
    id
}
