//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Number of menu items attached (computed on read)
    #[serde(default)]
    pub item_count: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_item_count() {
        let cat = Category {
            id: 3,
            name: "Beverages".to_string(),
            item_count: 7,
        };
        let json = serde_json::to_string(&cat).unwrap();
        assert!(json.contains("\"itemCount\":7"));
    }
}
