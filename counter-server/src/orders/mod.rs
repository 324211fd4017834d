//! Order domain logic
//!
//! Pure rules with no I/O:
//! - [`pricing`] - authoritative subtotal/tax/total computation
//! - [`lifecycle`] - status transition table and settlement checks
//! - [`kot`] - incremental kitchen ticket rendering
//! - [`money`] - decimal rounding and money-field validation
//!
//! Persistence lives in `crate::db::repository::orders`, which calls
//! into this module before every write.

pub mod kot;
pub mod lifecycle;
pub mod money;
pub mod pricing;

pub use kot::{KotLine, KotTicket, build_ticket};
pub use lifecycle::{allowed_transitions, validate_settlement, validate_transition};
pub use pricing::{OrderTotals, TaxConfig, compute_totals};
