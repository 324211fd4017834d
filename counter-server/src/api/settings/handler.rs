//! Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::settings;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, MAX_TEXT_LEN, sanitize_text, validate_range,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{AppSettings, SettingsUpdate};

/// GET /api/settings - current settings snapshot
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppSettings>> {
    let settings = settings::load(state.pool()).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - partial update, returns the full fresh snapshot
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<AppSettings>> {
    let pairs = update_pairs(&payload)?;
    if !pairs.is_empty() {
        settings::upsert_many(state.pool(), &pairs).await?;
    }
    let settings = settings::load(state.pool()).await?;
    Ok(Json(settings))
}

/// Validate present fields and turn them into key-value writes. Keys
/// mirror the ones `settings::load` reads back.
fn update_pairs(update: &SettingsUpdate) -> AppResult<Vec<(&'static str, String)>> {
    let mut pairs = Vec::new();

    if let Some(name) = &update.restaurant_name {
        pairs.push((
            "restaurantName",
            validate_required_text(name, "restaurantName", MAX_NAME_LEN)?,
        ));
    }
    // Address, phone and tagline may be blanked to clear them
    if let Some(address) = &update.restaurant_address {
        pairs.push(("restaurantAddress", capped(address, "restaurantAddress", MAX_TEXT_LEN)?));
    }
    if let Some(phone) = &update.restaurant_phone {
        pairs.push(("restaurantPhone", capped(phone, "restaurantPhone", MAX_PHONE_LEN)?));
    }
    if let Some(tagline) = &update.restaurant_tagline {
        pairs.push(("restaurantTagline", capped(tagline, "restaurantTagline", MAX_TEXT_LEN)?));
    }
    if let Some(locale) = &update.currency_locale {
        pairs.push((
            "currencyLocale",
            validate_required_text(locale, "currencyLocale", MAX_NAME_LEN)?,
        ));
    }
    if let Some(code) = &update.currency_code {
        pairs.push((
            "currencyCode",
            validate_required_text(code, "currencyCode", MAX_NAME_LEN)?,
        ));
    }
    if let Some(symbol) = &update.currency_symbol {
        pairs.push((
            "currencySymbol",
            validate_required_text(symbol, "currencySymbol", MAX_NAME_LEN)?,
        ));
    }
    if let Some(enabled) = update.tax_enabled {
        pairs.push(("taxEnabled", enabled.to_string()));
    }
    if let Some(rate) = update.tax_rate {
        validate_range(rate, "taxRate", 0.0, 1.0)?;
        pairs.push(("taxRate", rate.to_string()));
    }
    if let Some(label) = &update.tax_label {
        pairs.push(("taxLabel", validate_required_text(label, "taxLabel", MAX_NAME_LEN)?));
    }
    if let Some(count) = update.table_count {
        validate_range(count as f64, "tableCount", 1.0, 100.0)?;
        pairs.push(("tableCount", count.to_string()));
    }

    Ok(pairs)
}

fn capped(raw: &str, field: &str, max_len: usize) -> AppResult<String> {
    let clean = sanitize_text(raw);
    if clean.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_writes_nothing() {
        let pairs = update_pairs(&SettingsUpdate::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_tax_fields_serialize_for_the_kv_store() {
        let update = SettingsUpdate {
            tax_enabled: Some(true),
            tax_rate: Some(0.05),
            ..Default::default()
        };
        let pairs = update_pairs(&update).unwrap();
        assert!(pairs.contains(&("taxEnabled", "true".to_string())));
        assert!(pairs.contains(&("taxRate", "0.05".to_string())));
    }

    #[test]
    fn test_tax_rate_must_be_a_fraction() {
        let update = SettingsUpdate {
            tax_rate: Some(5.0),
            ..Default::default()
        };
        assert!(update_pairs(&update).is_err());
    }

    #[test]
    fn test_table_count_bounds() {
        for (count, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let update = SettingsUpdate {
                table_count: Some(count),
                ..Default::default()
            };
            assert_eq!(update_pairs(&update).is_ok(), ok, "count={count}");
        }
    }

    #[test]
    fn test_blank_address_clears_but_blank_name_is_rejected() {
        let update = SettingsUpdate {
            restaurant_address: Some("   ".to_string()),
            ..Default::default()
        };
        let pairs = update_pairs(&update).unwrap();
        assert!(pairs.contains(&("restaurantAddress", String::new())));

        let update = SettingsUpdate {
            restaurant_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(update_pairs(&update).is_err());
    }
}
