//! Per-phone visit counting and the repeat-guest discount.

use std::collections::HashMap;

use tracing::debug;

/// Visit count at which the discount starts to apply.
pub const DISCOUNT_THRESHOLD: u32 = 2;

/// Fraction of the bill a returning guest pays.
pub const DISCOUNT_FACTOR: f64 = 0.90;

/// Outcome of a discount lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    /// Amount to charge after any discount.
    pub amount: f64,
    /// Whether the returning-guest rate was applied.
    pub applied: bool,
}

/// Phone number to visit count, kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct LoyaltyLedger {
    visits: HashMap<String, u32>,
}

impl LoyaltyLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more visit for `phone` and return the new total.
    pub fn record_visit(&mut self, phone: &str) -> u32 {
        let count = self.visits.entry(phone.to_string()).or_insert(0);
        *count += 1;
        debug!(visits = *count, "Visit recorded");
        *count
    }

    /// Current visit count for `phone` (zero when never seen).
    pub fn visits(&self, phone: &str) -> u32 {
        self.visits.get(phone).copied().unwrap_or(0)
    }

    /// Apply the returning-guest discount to `bill_amount` if `phone` qualifies.
    pub fn discount_for(&self, phone: &str, bill_amount: f64) -> Discount {
        if self.visits(phone) >= DISCOUNT_THRESHOLD {
            Discount {
                amount: bill_amount * DISCOUNT_FACTOR,
                applied: true,
            }
        } else {
            Discount {
                amount: bill_amount,
                applied: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "9999999999";

    #[test]
    fn unknown_phone_has_no_visits() {
        let ledger = LoyaltyLedger::new();
        assert_eq!(ledger.visits(PHONE), 0);
    }

    #[test]
    fn record_visit_counts_up_from_one() {
        let mut ledger = LoyaltyLedger::new();
        assert_eq!(ledger.record_visit(PHONE), 1);
        assert_eq!(ledger.record_visit(PHONE), 2);
        assert_eq!(ledger.record_visit("0000000000"), 1);
        assert_eq!(ledger.visits(PHONE), 2);
    }

    #[test]
    fn discount_starts_on_second_visit() {
        let mut ledger = LoyaltyLedger::new();
        for amount in [0.0, 1.0, 999.5, 3000.0] {
            assert_eq!(
                ledger.discount_for(PHONE, amount),
                Discount {
                    amount,
                    applied: false
                }
            );
        }

        ledger.record_visit(PHONE);
        let first = ledger.discount_for(PHONE, 3000.0);
        assert!(!first.applied);
        assert_eq!(first.amount, 3000.0);

        ledger.record_visit(PHONE);
        for amount in [0.0, 1.0, 999.5, 1000.0] {
            let discount = ledger.discount_for(PHONE, amount);
            assert!(discount.applied);
            assert_eq!(discount.amount, amount * DISCOUNT_FACTOR);
        }

        ledger.record_visit(PHONE);
        assert!(ledger.discount_for(PHONE, 500.0).applied);
    }

    #[test]
    fn discount_lookup_does_not_touch_counts() {
        let mut ledger = LoyaltyLedger::new();
        ledger.record_visit(PHONE);
        let _ = ledger.discount_for(PHONE, 100.0);
        let _ = ledger.discount_for(PHONE, 100.0);
        assert_eq!(ledger.visits(PHONE), 1);
    }
}
