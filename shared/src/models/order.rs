//! Order Model

use serde::{Deserialize, Serialize};

/// Order status state machine:
///
/// ```text
/// PENDING ──► PAID       (terminal)
///    │   ╲──► UNPAID ──► PAID | CANCELLED
///    ╰──────► CANCELLED  (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Unpaid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method recorded at settlement.
///
/// `Unpaid` marks credit extended to a named customer (unpaid dues),
/// collectable later by moving the order to PAID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Cash,
    Online,
    Unpaid,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Online => "ONLINE",
            Self::Unpaid => "UNPAID",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order line item
///
/// `name`/`price` are snapshots of the catalog at the time the line was
/// added, so historical receipts stay stable across menu edits.
/// `printed_quantity` tracks how much of the line has been sent to the
/// kitchen; 0 ≤ printed_quantity ≤ quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    /// Unit price in currency unit (2-decimal)
    pub price: f64,
    pub quantity: i32,
    pub printed_quantity: i32,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-facing kitchen token, resets each business day
    pub token_number: i64,
    /// None for take-away orders
    pub table_number: Option<i64>,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Monetary amounts in currency unit (2-decimal)
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    /// Unix millis; created_at fixes the order's day for token numbering
    pub created_at: i64,
    pub updated_at: i64,

    /// Line items in insertion order (populated by application code)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Incoming line item for create/add-items requests
///
/// `name` and `price` are advisory only: the server re-resolves both from
/// the menu catalog and persists the authoritative values, never these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
    /// None/omitted = take-away
    #[serde(default)]
    pub table_number: Option<i64>,
}

/// Add-items payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsAdd {
    pub items: Vec<OrderItemInput>,
}

/// Status update / settlement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"UNPAID\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unpaid);
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for m in [PaymentMethod::Cash, PaymentMethod::Online, PaymentMethod::Unpaid] {
            let json = serde_json::to_string(&m).unwrap();
            let parsed: PaymentMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(m, parsed);
        }
    }

    #[test]
    fn test_order_create_accepts_omitted_table() {
        let json = r#"{"items":[{"menuItemId":5,"quantity":2}]}"#;
        let payload: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.table_number, None);
        assert_eq!(payload.items[0].menu_item_id, 5);
        assert_eq!(payload.items[0].price, None);
    }

    #[test]
    fn test_order_item_input_keeps_client_price_advisory() {
        // Client-supplied price arrives but is carried separately from the
        // persisted model, so handlers can ignore it wholesale.
        let json = r#"{"menuItemId":5,"quantity":1,"name":"Tampered","price":0.01}"#;
        let input: OrderItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.price, Some(0.01));
        assert_eq!(input.name.as_deref(), Some("Tampered"));
    }
}
