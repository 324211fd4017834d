//! Menu Item Repository

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

const MENU_ITEM_SELECT: &str = "SELECT m.id, m.name, m.price, m.category_id, c.name AS category_name \
     FROM menu_items m JOIN categories c ON c.id = m.category_id";

pub async fn find_all(pool: &SqlitePool) -> AppResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} ORDER BY m.category_id, m.name");
    let rows = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE m.id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Authoritative (name, price) for order lines. Client-supplied values
/// are never persisted; this is the only source order mutations accept.
pub async fn lookup_price(pool: &SqlitePool, id: i64) -> AppResult<Option<(String, f64)>> {
    let row = sqlx::query_as::<_, (String, f64)>("SELECT name, price FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: &MenuItemCreate) -> AppResult<MenuItem> {
    let category_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
        .bind(data.category_id)
        .fetch_optional(pool)
        .await?;
    if category_exists.is_none() {
        return Err(AppError::new(ErrorCode::CategoryNotFound)
            .with_detail("categoryId", data.category_id));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_items (id, name, price, category_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to create menu item"))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &MenuItemUpdate) -> AppResult<MenuItem> {
    if let Some(category_id) = data.category_id {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(
                AppError::new(ErrorCode::CategoryNotFound).with_detail("categoryId", category_id)
            );
        }
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_items SET name = COALESCE(?1, name), price = COALESCE(?2, price), \
         category_id = COALESCE(?3, category_id), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{seed_category, test_pool};

    #[tokio::test]
    async fn test_create_joins_category_name() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "South Indian").await;

        let item = create(
            &pool,
            &MenuItemCreate {
                name: "Masala Dosa".to_string(),
                price: 80.0,
                category_id: cat_id,
            },
        )
        .await
        .unwrap();
        assert_eq!(item.category_name, "South Indian");
        assert_eq!(item.price, 80.0);
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let pool = test_pool().await;
        let err = create(
            &pool,
            &MenuItemCreate {
                name: "Orphan".to_string(),
                price: 10.0,
                category_id: 12345,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Beverages").await;
        let item = create(
            &pool,
            &MenuItemCreate {
                name: "Chai".to_string(),
                price: 12.0,
                category_id: cat_id,
            },
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            item.id,
            &MenuItemUpdate {
                price: Some(15.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 15.0);
        assert_eq!(updated.name, "Chai");
    }

    #[tokio::test]
    async fn test_lookup_price() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Snacks").await;
        let item = create(
            &pool,
            &MenuItemCreate {
                name: "Samosa".to_string(),
                price: 20.0,
                category_id: cat_id,
            },
        )
        .await
        .unwrap();

        let (name, price) = lookup_price(&pool, item.id).await.unwrap().unwrap();
        assert_eq!(name, "Samosa");
        assert_eq!(price, 20.0);
        assert!(lookup_price(&pool, 777).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let pool = test_pool().await;
        let err = delete(&pool, 404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
    }
}
