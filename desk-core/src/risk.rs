//! Fraud-risk classification
//!
//! Pure, total and deterministic: the tier is a function of
//! `(amount, payment method)` alone, computed once when the transaction
//! is created and never revisited. Comparisons use exact `Decimal`
//! arithmetic so the tier boundaries cannot drift through float error.

use crate::types::{PaymentMethod, RiskTier};
use rust_decimal::Decimal;

/// Classify a transaction into a risk tier
///
/// Rules, in precedence order:
/// 1. `DINHEIRO` -> LOW
/// 2. `PIX` -> LOW
/// 3. `CARTAO` -> LOW below 100.00, MEDIUM from 100.00 to 500.00
///    inclusive, HIGH above 500.00
/// 4. anything else (unrecognized or absent) -> MEDIUM
pub fn classify(amount: Decimal, method: Option<PaymentMethod>) -> RiskTier {
    match method {
        Some(PaymentMethod::Cash) | Some(PaymentMethod::Pix) => RiskTier::Low,
        Some(PaymentMethod::Card) => {
            let medium_from = Decimal::from(100);
            let high_above = Decimal::from(500);
            if amount < medium_from {
                RiskTier::Low
            } else if amount <= high_above {
                RiskTier::Medium
            } else {
                RiskTier::High
            }
        }
        None => RiskTier::Medium,
    }
}
