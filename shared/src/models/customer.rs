//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer record, keyed by normalized phone number.
///
/// Rows are upserted as a side effect of settling orders that carry
/// customer contact details; there is no direct create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    /// Digits and leading `+` only
    pub phone: String,
    pub name: String,
    pub total_orders: i64,
    pub total_spent: f64,
    /// Unix millis of the most recent settled order
    pub last_visit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_serializes_camel_case() {
        let customer = Customer {
            phone: "+919876543210".to_string(),
            name: "Asha".to_string(),
            total_orders: 4,
            total_spent: 1250.5,
            last_visit: 1_755_000_000_000,
        };
        let json = serde_json::to_string(&customer).unwrap();
        assert!(json.contains("\"totalOrders\":4"));
        assert!(json.contains("\"lastVisit\":1755000000000"));
    }
}
