//! Transaction lifecycle
//!
//! A transaction moves `absent -> active` on create and `-> absent` on
//! delete. There is no update transition: the risk tier and creation
//! timestamp are stamped once and the record is a historical fact.

use crate::error::{Error, Result};
use crate::risk;
use crate::store::TransactionStore;
use crate::types::{NewTransaction, PaymentMethod, Transaction, TransactionDraft};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Maximum fractional digits on an amount
const MAX_SCALE: u32 = 2;

/// Transaction lifecycle service
pub struct TransactionService<S> {
    store: S,
}

impl<S: TransactionStore> TransactionService<S> {
    /// Create a new service over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a transaction from a draft payload
    ///
    /// Validates the amount (strictly positive, at most 2 fractional
    /// digits) and that a payment method was given, classifies the risk
    /// tier, and stamps the creation time. The method string is stored
    /// upper-cased even when unrecognized; unrecognized methods classify
    /// as MEDIUM.
    pub fn create(&self, draft: TransactionDraft) -> Result<Transaction> {
        let mut messages = Vec::new();

        let amount = match draft.amount {
            None => {
                messages.push("amount: is required".to_string());
                None
            }
            Some(a) if a <= Decimal::ZERO => {
                messages.push("amount: must be positive".to_string());
                None
            }
            Some(a) if a.normalize().scale() > MAX_SCALE => {
                messages.push(format!(
                    "amount: must have at most {MAX_SCALE} decimal places"
                ));
                None
            }
            Some(a) => Some(a),
        };

        let method = draft.payment_method.trim();
        if method.is_empty() {
            messages.push("payment_method: is required".to_string());
        }

        let mut amount = match (amount, messages.is_empty()) {
            (Some(a), true) => a,
            _ => return Err(Error::Validation { messages }),
        };
        amount.rescale(MAX_SCALE);

        let payment_method = method.to_uppercase();
        let fraud_risk = risk::classify(amount, PaymentMethod::parse(&payment_method));

        let transaction = self.store.insert(NewTransaction {
            amount,
            payment_method,
            fraud_risk,
            created_at: Utc::now(),
        })?;

        tracing::info!(
            transaction_id = %transaction.id,
            fraud_risk = %transaction.fraud_risk,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Fetch a transaction by id
    pub fn get(&self, id: Uuid) -> Result<Transaction> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction not found: {id}")))
    }

    /// List all transactions; order is unspecified but stable for the call
    pub fn list(&self) -> Result<Vec<Transaction>> {
        self.store.find_all()
    }

    /// Delete a transaction permanently
    pub fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_by_id(id)? {
            return Err(Error::NotFound(format!("Transaction not found: {id}")));
        }
        tracing::info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::RiskTier;

    fn service() -> TransactionService<MemoryStore> {
        TransactionService::new(MemoryStore::new())
    }

    fn draft(amount: &str, method: &str) -> TransactionDraft {
        TransactionDraft {
            amount: Some(amount.parse().unwrap()),
            payment_method: method.to_string(),
        }
    }

    #[test]
    fn test_create_classifies_and_stamps() {
        let svc = service();
        let tx = svc.create(draft("450.00", "cartao")).unwrap();

        assert_eq!(tx.amount, "450.00".parse::<Decimal>().unwrap());
        assert_eq!(tx.payment_method, "CARTAO");
        assert_eq!(tx.fraud_risk, RiskTier::Medium);
    }

    #[test]
    fn test_risk_is_immutable_across_reads() {
        let svc = service();
        let tx = svc.create(draft("600.00", "cartao")).unwrap();
        assert_eq!(tx.fraud_risk, RiskTier::High);

        let read = svc.get(tx.id).unwrap();
        assert_eq!(read.fraud_risk, tx.fraud_risk);
        assert_eq!(read.created_at, tx.created_at);
    }

    #[test]
    fn test_amount_normalized_to_scale_two() {
        let svc = service();
        let tx = svc.create(draft("450", "pix")).unwrap();
        assert_eq!(tx.amount.to_string(), "450.00");

        // One fractional digit is padded, not rejected
        let tx = svc.create(draft("9.5", "pix")).unwrap();
        assert_eq!(tx.amount.to_string(), "9.50");
    }

    #[test]
    fn test_rejects_bad_amounts() {
        let svc = service();

        for amount in ["0.00", "-1.00", "0.001"] {
            let err = svc.create(draft(amount, "pix")).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "amount {amount}");
        }

        let err = svc
            .create(TransactionDraft {
                amount: None,
                payment_method: "pix".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_rejects_missing_payment_method() {
        let svc = service();
        let err = svc.create(draft("10.00", "   ")).unwrap_err();
        match err {
            Error::Validation { messages } => {
                assert!(messages.iter().any(|m| m.starts_with("payment_method:")));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_method_stored_medium() {
        let svc = service();
        let tx = svc.create(draft("10.00", "boleto")).unwrap();
        assert_eq!(tx.payment_method, "BOLETO");
        assert_eq!(tx.fraud_risk, RiskTier::Medium);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let svc = service();
        let id = Uuid::new_v4();

        assert!(matches!(svc.get(id), Err(Error::NotFound(_))));
        assert!(matches!(svc.delete(id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_record() {
        let svc = service();
        let tx = svc.create(draft("10.00", "pix")).unwrap();
        svc.delete(tx.id).unwrap();
        assert!(svc.list().unwrap().is_empty());
    }
}
