//! Customer Repository
//!
//! Keyed by normalized phone number. Visits are folded into running totals
//! rather than stored individually.

use shared::models::Customer;
use shared::AppResult;
use sqlx::SqlitePool;

/// Record one settled visit. Inserts the customer on first sight, otherwise
/// refreshes the name and folds the amount into the running totals.
pub async fn record_visit(
    pool: &SqlitePool,
    name: &str,
    phone: &str,
    amount: f64,
    now: i64,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO customers (phone, name, total_orders, total_spent, last_visit)
         VALUES (?, ?, 1, ?, ?)
         ON CONFLICT(phone) DO UPDATE SET
             name = excluded.name,
             total_orders = total_orders + 1,
             total_spent = total_spent + excluded.total_spent,
             last_visit = excluded.last_visit",
    )
    .bind(phone)
    .bind(name)
    .bind(amount)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recently seen first.
pub async fn find_all(pool: &SqlitePool) -> AppResult<Vec<Customer>> {
    let rows = sqlx::query_as::<_, Customer>(
        "SELECT phone, name, total_orders, total_spent, last_visit
         FROM customers ORDER BY last_visit DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_pool;

    #[tokio::test]
    async fn test_first_visit_inserts() {
        let pool = test_pool().await;
        record_visit(&pool, "Asha", "+919800011111", 250.0, 1_000)
            .await
            .unwrap();

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Asha");
        assert_eq!(all[0].total_orders, 1);
        assert_eq!(all[0].total_spent, 250.0);
        assert_eq!(all[0].last_visit, 1_000);
    }

    #[tokio::test]
    async fn test_repeat_visit_accumulates() {
        let pool = test_pool().await;
        record_visit(&pool, "Asha", "+919800011111", 250.0, 1_000)
            .await
            .unwrap();
        record_visit(&pool, "Asha Rao", "+919800011111", 100.0, 2_000)
            .await
            .unwrap();

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        // Latest name wins, totals accumulate
        assert_eq!(all[0].name, "Asha Rao");
        assert_eq!(all[0].total_orders, 2);
        assert_eq!(all[0].total_spent, 350.0);
        assert_eq!(all[0].last_visit, 2_000);
    }

    #[tokio::test]
    async fn test_listing_sorted_by_recency() {
        let pool = test_pool().await;
        record_visit(&pool, "Early", "111111", 10.0, 1_000)
            .await
            .unwrap();
        record_visit(&pool, "Late", "222222", 20.0, 5_000)
            .await
            .unwrap();

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all[0].name, "Late");
        assert_eq!(all[1].name, "Early");
    }
}
