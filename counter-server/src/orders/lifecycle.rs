//! Order lifecycle state machine
//!
//! Every status mutation passes through [`validate_transition`] before
//! any write. PAID and CANCELLED are terminal; UNPAID is the dues
//! ledger and may still be collected or written off.

use shared::models::{OrderStatus, PaymentMethod};
use shared::{AppError, AppResult, ErrorCode};

/// Allowed target statuses from `from`
pub fn allowed_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[
            OrderStatus::Paid,
            OrderStatus::Unpaid,
            OrderStatus::Cancelled,
        ],
        OrderStatus::Unpaid => &[OrderStatus::Paid, OrderStatus::Cancelled],
        OrderStatus::Paid | OrderStatus::Cancelled => &[],
    }
}

/// Reject transitions outside the table, naming the allowed set
pub fn validate_transition(current: OrderStatus, requested: OrderStatus) -> AppResult<()> {
    let allowed = allowed_transitions(current);
    if allowed.contains(&requested) {
        return Ok(());
    }
    let allowed_names: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
    let allowed_str = if allowed_names.is_empty() {
        "none (terminal state)".to_string()
    } else {
        allowed_names.join(", ")
    };
    Err(AppError::with_message(
        ErrorCode::InvalidTransition,
        format!("Cannot transition from {current} to {requested}. Allowed: {allowed_str}"),
    )
    .with_detail("currentStatus", current.as_str())
    .with_detail("newStatus", requested.as_str())
    .with_detail("allowed", allowed_names))
}

/// Settlement payload checks beyond the bare transition table:
/// PAID/UNPAID need a payment method, UNPAID needs a customer name.
pub fn validate_settlement(
    requested: OrderStatus,
    payment_method: Option<PaymentMethod>,
    customer_name: Option<&str>,
) -> AppResult<()> {
    match requested {
        OrderStatus::Paid | OrderStatus::Unpaid => {
            if payment_method.is_none() {
                return Err(AppError::new(ErrorCode::PaymentMethodRequired));
            }
            if requested == OrderStatus::Unpaid
                && !customer_name.is_some_and(|n| !n.trim().is_empty())
            {
                return Err(AppError::new(ErrorCode::CustomerNameRequired));
            }
            Ok(())
        }
        OrderStatus::Cancelled | OrderStatus::Pending => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_transition_table() {
        let legal = [
            (Pending, Paid),
            (Pending, Unpaid),
            (Pending, Cancelled),
            (Unpaid, Paid),
            (Unpaid, Cancelled),
        ];
        for (from, to) in legal {
            assert!(validate_transition(from, to).is_ok(), "{from} -> {to}");
        }

        let all = [Pending, Paid, Unpaid, Cancelled];
        for from in all {
            for to in all {
                if legal.contains(&(from, to)) {
                    continue;
                }
                assert!(validate_transition(from, to).is_err(), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_terminal_error_names_terminal_state() {
        let err = validate_transition(Paid, Cancelled).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidTransition);
        assert!(err.message.contains("Cannot transition from PAID to CANCELLED"));
        assert!(err.message.contains("none (terminal state)"));
    }

    #[test]
    fn test_error_details_carry_allowed_set() {
        let err = validate_transition(Unpaid, Unpaid).unwrap_err();
        let details = err.details.expect("details");
        assert_eq!(details["currentStatus"], "UNPAID");
        assert_eq!(details["newStatus"], "UNPAID");
        assert_eq!(details["allowed"], serde_json::json!(["PAID", "CANCELLED"]));
    }

    #[test]
    fn test_settlement_requires_payment_method() {
        let err = validate_settlement(Paid, None, None).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::PaymentMethodRequired);
        assert!(validate_settlement(Paid, Some(PaymentMethod::Cash), None).is_ok());
    }

    #[test]
    fn test_unpaid_requires_customer_name() {
        let method = Some(PaymentMethod::Unpaid);
        assert!(validate_settlement(Unpaid, method, None).is_err());
        assert!(validate_settlement(Unpaid, method, Some("   ")).is_err());
        assert!(validate_settlement(Unpaid, method, Some("Asha")).is_ok());
    }

    #[test]
    fn test_cancel_needs_nothing() {
        assert!(validate_settlement(Cancelled, None, None).is_ok());
    }
}
