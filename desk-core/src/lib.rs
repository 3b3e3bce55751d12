//! Domain core for CashDesk
//!
//! Operator registry and transaction ledger for a cash-handling desk:
//! - CPF-identified operators with a global uniqueness constraint
//! - Payment transactions with a fraud-risk tier stamped at creation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod identity;
pub mod operator;
pub mod risk;
pub mod storage;
pub mod store;
pub mod transaction;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use operator::OperatorService;
pub use storage::Storage;
pub use store::{MemoryStore, OperatorStore, TransactionStore};
pub use transaction::TransactionService;
pub use types::*;
