//! Table Model
//!
//! Tables are not stored; occupancy is derived from active orders at
//! read time. A table is occupied while a PENDING order references it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
}

/// Condensed view of the PENDING order occupying a table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOrderSummary {
    pub id: i64,
    pub token_number: i64,
    pub total: f64,
    /// Total units across all lines
    pub item_count: i64,
    pub created_at: i64,
}

/// Per-table occupancy row returned by the floor view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub number: i64,
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<TableOrderSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TableStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&TableStatus::Occupied).unwrap(),
            "\"occupied\""
        );
    }

    #[test]
    fn test_available_table_omits_order() {
        let info = TableInfo {
            number: 4,
            status: TableStatus::Available,
            order: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("order"));
    }
}
