//! Store traits and the in-memory store
//!
//! The lifecycle services depend on these traits, not on a concrete
//! database; implementations are passed in explicitly at construction.
//! The store is the authoritative guard for the CPF uniqueness
//! constraint: service-level pre-checks only improve the error message,
//! while `insert`/`update` must reject a duplicate normalized CPF
//! atomically, even under concurrent callers.

use crate::error::{Error, Result};
use crate::types::{NewOperator, NewTransaction, Operator, Transaction};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Persistence contract for operator records
pub trait OperatorStore: Send + Sync {
    /// Insert a new record, assigning its id
    ///
    /// Fails with [`Error::Conflict`] if the CPF is already taken.
    fn insert(&self, record: NewOperator) -> Result<Operator>;

    /// Look up a record by id
    fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>>;

    /// All records, order unspecified but stable for the call
    fn find_all(&self) -> Result<Vec<Operator>>;

    /// Whether any record holds this normalized CPF
    fn exists_by_cpf(&self, cpf: &str) -> Result<bool>;

    /// Replace a record in place, keyed by its id
    ///
    /// Fails with [`Error::NotFound`] if the id is gone and with
    /// [`Error::Conflict`] if the CPF now belongs to a different record.
    fn update(&self, record: &Operator) -> Result<()>;

    /// Remove a record; returns whether it existed
    fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

/// Persistence contract for transaction records
pub trait TransactionStore: Send + Sync {
    /// Insert a new record, assigning its id
    fn insert(&self, record: NewTransaction) -> Result<Transaction>;

    /// Look up a record by id
    fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>>;

    /// All records, order unspecified but stable for the call
    fn find_all(&self) -> Result<Vec<Transaction>>;

    /// Remove a record; returns whether it existed
    fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

impl<T: OperatorStore + ?Sized> OperatorStore for Arc<T> {
    fn insert(&self, record: NewOperator) -> Result<Operator> {
        (**self).insert(record)
    }
    fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>> {
        (**self).find_by_id(id)
    }
    fn find_all(&self) -> Result<Vec<Operator>> {
        (**self).find_all()
    }
    fn exists_by_cpf(&self, cpf: &str) -> Result<bool> {
        (**self).exists_by_cpf(cpf)
    }
    fn update(&self, record: &Operator) -> Result<()> {
        (**self).update(record)
    }
    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        (**self).delete_by_id(id)
    }
}

impl<T: TransactionStore + ?Sized> TransactionStore for Arc<T> {
    fn insert(&self, record: NewTransaction) -> Result<Transaction> {
        (**self).insert(record)
    }
    fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        (**self).find_by_id(id)
    }
    fn find_all(&self) -> Result<Vec<Transaction>> {
        (**self).find_all()
    }
    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        (**self).delete_by_id(id)
    }
}

/// In-memory store for tests and embedded use
///
/// A single `RwLock` guards both maps and the CPF index, so the
/// check-and-insert on the uniqueness constraint is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    operators: HashMap<Uuid, Operator>,
    cpf_index: HashMap<String, Uuid>,
    transactions: HashMap<Uuid, Transaction>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl OperatorStore for MemoryStore {
    fn insert(&self, record: NewOperator) -> Result<Operator> {
        let mut inner = self.inner.write();
        if inner.cpf_index.contains_key(&record.cpf) {
            return Err(Error::Conflict(format!(
                "CPF already registered: {}",
                record.cpf
            )));
        }

        let operator = Operator {
            id: Uuid::new_v4(),
            name: record.name,
            cpf: record.cpf,
            shift: record.shift,
        };
        inner.cpf_index.insert(operator.cpf.clone(), operator.id);
        inner.operators.insert(operator.id, operator.clone());
        Ok(operator)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>> {
        Ok(self.inner.read().operators.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Operator>> {
        Ok(self.inner.read().operators.values().cloned().collect())
    }

    fn exists_by_cpf(&self, cpf: &str) -> Result<bool> {
        Ok(self.inner.read().cpf_index.contains_key(cpf))
    }

    fn update(&self, record: &Operator) -> Result<()> {
        let mut inner = self.inner.write();

        let previous_cpf = match inner.operators.get(&record.id) {
            Some(current) => current.cpf.clone(),
            None => return Err(Error::NotFound(format!("Operator not found: {}", record.id))),
        };

        if let Some(&owner) = inner.cpf_index.get(&record.cpf) {
            if owner != record.id {
                return Err(Error::Conflict(format!(
                    "CPF already registered: {}",
                    record.cpf
                )));
            }
        }

        inner.cpf_index.remove(&previous_cpf);
        inner.cpf_index.insert(record.cpf.clone(), record.id);
        inner.operators.insert(record.id, record.clone());
        Ok(())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write();
        match inner.operators.remove(&id) {
            Some(operator) => {
                inner.cpf_index.remove(&operator.cpf);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl TransactionStore for MemoryStore {
    fn insert(&self, record: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount: record.amount,
            payment_method: record.payment_method,
            fraud_risk: record.fraud_risk,
            created_at: record.created_at,
        };
        self.inner
            .write()
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        Ok(self.inner.read().transactions.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.inner.read().transactions.values().cloned().collect())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        Ok(self.inner.write().transactions.remove(&id).is_some())
    }
}
