//! Settings Repository
//!
//! Settings live in a key-value table so new keys never need a migration.
//! Reads assemble the full struct, falling back to defaults for missing or
//! unparseable values; writes upsert only the keys given.

use shared::models::AppSettings;
use shared::AppResult;
use sqlx::SqlitePool;

pub async fn load(pool: &SqlitePool) -> AppResult<AppSettings> {
    let rows = sqlx::query_as::<_, (String, String)>("SELECT key, value FROM settings")
        .fetch_all(pool)
        .await?;

    let mut settings = AppSettings::default();
    for (key, value) in rows {
        match key.as_str() {
            "restaurantName" => settings.restaurant_name = value,
            "restaurantAddress" => settings.restaurant_address = value,
            "restaurantPhone" => settings.restaurant_phone = value,
            "restaurantTagline" => settings.restaurant_tagline = value,
            "currencyLocale" => settings.currency_locale = value,
            "currencyCode" => settings.currency_code = value,
            "currencySymbol" => settings.currency_symbol = value,
            "taxEnabled" => settings.tax_enabled = value == "true",
            "taxRate" => {
                if let Ok(rate) = value.parse() {
                    settings.tax_rate = rate;
                }
            }
            "taxLabel" => settings.tax_label = value,
            "tableCount" => {
                if let Ok(count) = value.parse() {
                    settings.table_count = count;
                }
            }
            _ => {}
        }
    }
    Ok(settings)
}

/// Write the given key-value pairs in one transaction.
pub async fn upsert_many(pool: &SqlitePool, pairs: &[(&str, String)]) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for (key, value) in pairs {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_pool;

    #[tokio::test]
    async fn test_load_empty_table_yields_defaults() {
        let pool = test_pool().await;
        let settings = load(&pool).await.unwrap();
        assert_eq!(settings.restaurant_name, "Restaurant");
        assert_eq!(settings.table_count, 12);
        assert!(!settings.tax_enabled);
    }

    #[tokio::test]
    async fn test_upsert_then_load() {
        let pool = test_pool().await;
        upsert_many(
            &pool,
            &[
                ("restaurantName", "Dosa Palace".to_string()),
                ("taxEnabled", "true".to_string()),
                ("taxRate", "0.05".to_string()),
                ("tableCount", "20".to_string()),
            ],
        )
        .await
        .unwrap();

        let settings = load(&pool).await.unwrap();
        assert_eq!(settings.restaurant_name, "Dosa Palace");
        assert!(settings.tax_enabled);
        assert_eq!(settings.tax_rate, 0.05);
        assert_eq!(settings.table_count, 20);
        // Untouched keys keep their defaults
        assert_eq!(settings.currency_code, "INR");
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing() {
        let pool = test_pool().await;
        upsert_many(&pool, &[("restaurantName", "First".to_string())])
            .await
            .unwrap();
        upsert_many(&pool, &[("restaurantName", "Second".to_string())])
            .await
            .unwrap();

        let settings = load(&pool).await.unwrap();
        assert_eq!(settings.restaurant_name, "Second");
    }

    #[tokio::test]
    async fn test_garbage_numeric_value_falls_back() {
        let pool = test_pool().await;
        upsert_many(&pool, &[("taxRate", "not-a-number".to_string())])
            .await
            .unwrap();

        let settings = load(&pool).await.unwrap();
        assert_eq!(settings.tax_rate, 0.0);
    }
}
