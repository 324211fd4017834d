//! Kitchen ticket (KOT) rendering
//!
//! A re-print shows only quantity added since the last print, so the
//! kitchen never re-fires items it already cooked. `printed_quantity`
//! on each line records what has been sent.

use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderItem};

/// One line on the incremental ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KotLine {
    pub name: String,
    /// Units not yet sent to the kitchen
    pub quantity: i32,
}

/// Printable kitchen ticket for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KotTicket {
    pub order_id: i64,
    pub token_number: i64,
    pub table_number: Option<i64>,
    pub created_at: i64,
    pub lines: Vec<KotLine>,
    /// Total units to prepare, summed across lines
    pub new_item_count: i32,
    /// False means "no new items": print an explicit indicator,
    /// not an empty table
    pub has_new_items: bool,
}

/// Units on this line not yet sent to the kitchen
pub fn unprinted_quantity(item: &OrderItem) -> i32 {
    (item.quantity - item.printed_quantity).max(0)
}

/// Build the incremental ticket from the order's current lines
pub fn build_ticket(order: &Order) -> KotTicket {
    let lines: Vec<KotLine> = order
        .items
        .iter()
        .filter_map(|item| {
            let delta = unprinted_quantity(item);
            (delta > 0).then(|| KotLine {
                name: item.name.clone(),
                quantity: delta,
            })
        })
        .collect();

    KotTicket {
        order_id: order.id,
        token_number: order.token_number,
        table_number: order.table_number,
        created_at: order.created_at,
        new_item_count: lines.iter().map(|l| l.quantity).sum(),
        has_new_items: !lines.is_empty(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus;

    fn item(name: &str, quantity: i32, printed: i32) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 10,
            menu_item_id: 5,
            name: name.to_string(),
            price: 80.0,
            quantity,
            printed_quantity: printed,
        }
    }

    fn order_with(items: Vec<OrderItem>) -> Order {
        Order {
            id: 10,
            token_number: 3,
            table_number: Some(4),
            status: OrderStatus::Pending,
            payment_method: None,
            customer_name: None,
            customer_phone: None,
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            created_at: 1_755_000_000_000,
            updated_at: 1_755_000_000_000,
            items,
        }
    }

    #[test]
    fn test_ticket_shows_only_delta() {
        let order = order_with(vec![item("Dosa", 7, 5), item("Chai", 2, 2)]);
        let ticket = build_ticket(&order);
        assert!(ticket.has_new_items);
        assert_eq!(ticket.lines.len(), 1);
        assert_eq!(ticket.lines[0].name, "Dosa");
        assert_eq!(ticket.lines[0].quantity, 2);
        assert_eq!(ticket.new_item_count, 2);
    }

    #[test]
    fn test_fully_printed_order_has_no_new_items() {
        let order = order_with(vec![item("Dosa", 3, 3)]);
        let ticket = build_ticket(&order);
        assert!(!ticket.has_new_items);
        assert!(ticket.lines.is_empty());
        assert_eq!(ticket.new_item_count, 0);
    }

    #[test]
    fn test_fresh_order_prints_everything() {
        let order = order_with(vec![item("Dosa", 3, 0), item("Chai", 1, 0)]);
        let ticket = build_ticket(&order);
        assert_eq!(ticket.lines.len(), 2);
        assert_eq!(ticket.new_item_count, 4);
        assert_eq!(ticket.token_number, 3);
        assert_eq!(ticket.table_number, Some(4));
    }
}
