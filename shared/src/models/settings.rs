//! Settings Model

use serde::{Deserialize, Serialize};

/// Application settings, stored as a key-value table and assembled into
/// this struct on read. Missing keys fall back to [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub restaurant_phone: String,
    pub restaurant_tagline: String,
    /// BCP 47 locale used for client-side currency formatting
    pub currency_locale: String,
    /// ISO 4217 code
    pub currency_code: String,
    pub currency_symbol: String,
    pub tax_enabled: bool,
    /// Fraction in [0, 1], e.g. 0.05 for 5%
    pub tax_rate: f64,
    /// Label printed on receipts, e.g. "GST"
    pub tax_label: String,
    /// Number of dine-in tables, in [1, 100]
    pub table_count: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            restaurant_name: "Restaurant".to_string(),
            restaurant_address: String::new(),
            restaurant_phone: String::new(),
            restaurant_tagline: String::new(),
            currency_locale: "en-IN".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            tax_enabled: false,
            tax_rate: 0.0,
            tax_label: "GST".to_string(),
            table_count: 12,
        }
    }
}

/// Partial settings update; only present fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub restaurant_address: Option<String>,
    #[serde(default)]
    pub restaurant_phone: Option<String>,
    #[serde(default)]
    pub restaurant_tagline: Option<String>,
    #[serde(default)]
    pub currency_locale: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub tax_enabled: Option<bool>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub tax_label: Option<String>,
    #[serde(default)]
    pub table_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_install() {
        let settings = AppSettings::default();
        assert_eq!(settings.restaurant_name, "Restaurant");
        assert_eq!(settings.currency_code, "INR");
        assert!(!settings.tax_enabled);
        assert_eq!(settings.tax_rate, 0.0);
        assert_eq!(settings.table_count, 12);
    }

    #[test]
    fn test_update_deserializes_partial_payload() {
        let json = r#"{"taxEnabled":true,"taxRate":0.05}"#;
        let update: SettingsUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.tax_enabled, Some(true));
        assert_eq!(update.tax_rate, Some(0.05));
        assert!(update.restaurant_name.is_none());
    }
}
