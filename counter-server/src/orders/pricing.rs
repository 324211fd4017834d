//! Pricing engine
//!
//! Authoritative subtotal/tax/total computation. Totals are recomputed
//! from the full line set at every order mutation; client-supplied
//! amounts never reach this module.

use rust_decimal::Decimal;

use super::money::{round_money, to_decimal, to_f64};

/// Tax configuration snapshot, taken from settings once per request
#[derive(Debug, Clone, Copy)]
pub struct TaxConfig {
    pub enabled: bool,
    /// Fraction in [0, 1]
    pub rate: f64,
}

impl TaxConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate: 0.0,
        }
    }
}

/// Computed order totals, each rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute totals from (unit price, quantity) lines.
///
/// Each line is rounded before summation so long receipts cannot
/// accumulate floating drift; `total == subtotal + tax` holds exactly.
pub fn compute_totals(lines: impl IntoIterator<Item = (f64, i32)>, tax: TaxConfig) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    for (price, quantity) in lines {
        let line = to_decimal(price) * Decimal::from(quantity);
        subtotal += round_money(line);
    }
    let subtotal = round_money(subtotal);

    let tax_amount = if tax.enabled && tax.rate > 0.0 {
        round_money(subtotal * to_decimal(tax.rate))
    } else {
        Decimal::ZERO
    };
    let total = round_money(subtotal + tax_amount);

    OrderTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax_amount),
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GST: TaxConfig = TaxConfig {
        enabled: true,
        rate: 0.05,
    };

    #[test]
    fn test_rounding_law() {
        // 19.99 x 3 @ 5%: tax rounds up from 2.9985
        let totals = compute_totals([(19.99, 3)], GST);
        assert_eq!(totals.subtotal, 59.97);
        assert_eq!(totals.tax, 3.00);
        assert_eq!(totals.total, 62.97);
    }

    #[test]
    fn test_total_is_exact_sum_of_parts() {
        let cases = [
            vec![(19.99, 3), (0.05, 7), (123.45, 2)],
            vec![(1.11, 9)],
            vec![(0.01, 1), (0.01, 1), (0.01, 1)],
        ];
        for lines in cases {
            let totals = compute_totals(lines.clone(), GST);
            let sum = to_decimal(totals.subtotal) + to_decimal(totals.tax);
            assert_eq!(to_f64(sum), totals.total, "drift for {lines:?}");
        }
    }

    #[test]
    fn test_tax_disabled_means_zero_tax() {
        let totals = compute_totals([(19.99, 3)], TaxConfig::disabled());
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_zero_rate_behaves_like_disabled() {
        let zero = TaxConfig {
            enabled: true,
            rate: 0.0,
        };
        let totals = compute_totals([(50.0, 2)], zero);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_lines_round_before_summation() {
        // Two lines of 33.333: per-line rounding gives 33.33 + 33.33,
        // not round(66.666) = 66.67
        let totals = compute_totals([(33.333, 1), (33.333, 1)], TaxConfig::disabled());
        assert_eq!(totals.subtotal, 66.66);
    }

    #[test]
    fn test_idempotent() {
        let lines = [(19.99, 3), (7.5, 2)];
        let a = compute_totals(lines, GST);
        let b = compute_totals(lines, GST);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_lines() {
        let totals = compute_totals([], GST);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}
