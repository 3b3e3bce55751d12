//! Persistent store backed by RocksDB
//!
//! # Column Families
//!
//! - `operators` - operator records (key: id)
//! - `transactions` - transaction records (key: id)
//! - `cpf_index` - normalized CPF -> operator id, the authoritative
//!   uniqueness constraint
//!
//! Operator writes are serialized by a mutex so the index check and the
//! record+index `WriteBatch` form one atomic step; a duplicate CPF can
//! never slip past the constraint between check and write.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{OperatorStore, TransactionStore};
use crate::types::{NewOperator, NewTransaction, Operator, RiskTier, Transaction};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Column family names
const CF_OPERATORS: &str = "operators";
const CF_TRANSACTIONS: &str = "transactions";
const CF_CPF_INDEX: &str = "cpf_index";

/// Transaction row as persisted
///
/// Amounts are stored in string form: bincode is not self-describing,
/// so `Decimal` needs the explicit string codec here.
#[derive(Serialize, Deserialize)]
struct TransactionRow {
    id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    payment_method: String,
    fraud_risk: RiskTier,
    created_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            amount: row.amount,
            payment_method: row.payment_method,
            fraud_risk: row.fraud_risk,
            created_at: row.created_at,
        }
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        TransactionRow {
            id: tx.id,
            amount: tx.amount,
            payment_method: tx.payment_method.clone(),
            fraud_risk: tx.fraud_risk,
            created_at: tx.created_at,
        }
    }
}

/// RocksDB-backed store implementing both store traits
#[derive(Clone)]
pub struct Storage {
    db: Arc<DB>,
    operator_write_lock: Arc<Mutex<()>>,
}

impl Storage {
    /// Open or create the database under `config.data_dir`
    pub fn open(config: &Config) -> Result<Self> {
        let path = &config.data_dir;
        std::fs::create_dir_all(path).map_err(|e| Error::Storage(e.to_string()))?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_write_buffer_size(config.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_background_jobs(config.max_background_jobs);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_OPERATORS, Options::default()),
            ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default()),
            ColumnFamilyDescriptor::new(CF_CPF_INDEX, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;
        tracing::info!("Opened RocksDB at {:?}", path);

        Ok(Self {
            db: Arc::new(db),
            operator_write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| Error::Storage(format!("missing column family: {name}")))
    }
}

impl OperatorStore for Storage {
    fn insert(&self, record: NewOperator) -> Result<Operator> {
        let _guard = self.operator_write_lock.lock();

        let index_cf = self.cf(CF_CPF_INDEX)?;
        if self.db.get_cf(&index_cf, record.cpf.as_bytes())?.is_some() {
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

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &self.cf(CF_OPERATORS)?,
            operator.id.as_bytes(),
            bincode::serialize(&operator)?,
        );
        batch.put_cf(&index_cf, operator.cpf.as_bytes(), operator.id.as_bytes());
        self.db.write(batch)?;

        Ok(operator)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>> {
        match self.db.get_cf(&self.cf(CF_OPERATORS)?, id.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> Result<Vec<Operator>> {
        let cf = self.cf(CF_OPERATORS)?;
        let mut operators = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item?;
            operators.push(bincode::deserialize(&value)?);
        }
        Ok(operators)
    }

    fn exists_by_cpf(&self, cpf: &str) -> Result<bool> {
        Ok(self
            .db
            .get_cf(&self.cf(CF_CPF_INDEX)?, cpf.as_bytes())?
            .is_some())
    }

    fn update(&self, record: &Operator) -> Result<()> {
        let _guard = self.operator_write_lock.lock();

        let current = match OperatorStore::find_by_id(self, record.id)? {
            Some(current) => current,
            None => {
                return Err(Error::NotFound(format!(
                    "Operator not found: {}",
                    record.id
                )))
            }
        };

        let index_cf = self.cf(CF_CPF_INDEX)?;
        if let Some(owner) = self.db.get_cf(&index_cf, record.cpf.as_bytes())? {
            if owner != record.id.as_bytes() {
                return Err(Error::Conflict(format!(
                    "CPF already registered: {}",
                    record.cpf
                )));
            }
        }

        let mut batch = WriteBatch::default();
        if current.cpf != record.cpf {
            batch.delete_cf(&index_cf, current.cpf.as_bytes());
            batch.put_cf(&index_cf, record.cpf.as_bytes(), record.id.as_bytes());
        }
        batch.put_cf(
            &self.cf(CF_OPERATORS)?,
            record.id.as_bytes(),
            bincode::serialize(record)?,
        );
        self.db.write(batch)?;
        Ok(())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let _guard = self.operator_write_lock.lock();

        let operator = match OperatorStore::find_by_id(self, id)? {
            Some(operator) => operator,
            None => return Ok(false),
        };

        let mut batch = WriteBatch::default();
        batch.delete_cf(&self.cf(CF_OPERATORS)?, id.as_bytes());
        batch.delete_cf(&self.cf(CF_CPF_INDEX)?, operator.cpf.as_bytes());
        self.db.write(batch)?;
        Ok(true)
    }
}

impl TransactionStore for Storage {
    fn insert(&self, record: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount: record.amount,
            payment_method: record.payment_method,
            fraud_risk: record.fraud_risk,
            created_at: record.created_at,
        };

        self.db.put_cf(
            &self.cf(CF_TRANSACTIONS)?,
            transaction.id.as_bytes(),
            bincode::serialize(&TransactionRow::from(&transaction))?,
        )?;
        Ok(transaction)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        match self.db.get_cf(&self.cf(CF_TRANSACTIONS)?, id.as_bytes())? {
            Some(bytes) => {
                let row: TransactionRow = bincode::deserialize(&bytes)?;
                Ok(Some(row.into()))
            }
            None => Ok(None),
        }
    }

    fn find_all(&self) -> Result<Vec<Transaction>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        let mut transactions = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item?;
            let row: TransactionRow = bincode::deserialize(&value)?;
            transactions.push(row.into());
        }
        Ok(transactions)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        if self.db.get_cf(&cf, id.as_bytes())?.is_none() {
            return Ok(false);
        }
        self.db.delete_cf(&cf, id.as_bytes())?;
        Ok(true)
    }
}
