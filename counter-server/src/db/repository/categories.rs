//! Category Repository

use shared::models::Category;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str = "SELECT c.id, c.name, COUNT(m.id) AS item_count \
     FROM categories c LEFT JOIN menu_items m ON m.category_id = c.id";

pub async fn find_all(pool: &SqlitePool) -> AppResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} GROUP BY c.id ORDER BY c.id");
    let rows = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE c.id = ? GROUP BY c.id");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, name: &str) -> AppResult<Category> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(now)
        .execute(pool)
        .await
        .map_err(map_name_conflict)?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to create category"))
}

pub async fn update(pool: &SqlitePool, id: i64, name: &str) -> AppResult<Category> {
    let rows = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await
        .map_err(map_name_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))
}

/// Delete a category; refused while menu items still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let item_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE category_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if item_count > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasItems)
            .with_detail("itemCount", item_count));
    }

    let rows = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }

    tx.commit().await?;
    Ok(())
}

fn map_name_conflict(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::new(ErrorCode::CategoryNameExists)
        }
        _ => AppError::from(err),
    }
}
