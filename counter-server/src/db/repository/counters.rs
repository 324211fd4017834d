//! Token Counter Repository
//!
//! One row per business day. The UPSERT bumps and returns the sequence in a
//! single statement, so concurrent order creation cannot hand out duplicate
//! tokens even across connections.

use shared::AppResult;
use sqlx::SqliteConnection;

/// Allocate the next token number for `day_key`. Runs on the caller's
/// connection so it participates in the surrounding order transaction.
pub async fn next_token(conn: &mut SqliteConnection, day_key: &str) -> AppResult<i64> {
    let seq: i64 = sqlx::query_scalar(
        "INSERT INTO token_counters (day_key, seq) VALUES (?, 1)
         ON CONFLICT(day_key) DO UPDATE SET seq = seq + 1
         RETURNING seq",
    )
    .bind(day_key)
    .fetch_one(conn)
    .await?;
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_pool;

    #[tokio::test]
    async fn test_tokens_increment_within_a_day() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 1);
        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 2);
        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_tokens_reset_on_new_day() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 1);
        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 2);
        assert_eq!(next_token(&mut conn, "2026-02-02").await.unwrap(), 1);
        // The old day's counter is untouched
        assert_eq!(next_token(&mut conn, "2026-02-01").await.unwrap(), 3);
    }
}
