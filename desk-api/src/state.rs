//! Shared application state
//!
//! Services are plain structs wired over their stores at startup and
//! shared across handlers via `Arc`; no container, no globals.

use desk_core::{OperatorService, OperatorStore, Storage, TransactionService, TransactionStore};
use std::sync::Arc;

/// Handler state: one service per entity type
#[derive(Clone)]
pub struct AppState {
    /// Operator lifecycle service
    pub operators: Arc<OperatorService<Arc<dyn OperatorStore>>>,
    /// Transaction lifecycle service
    pub transactions: Arc<TransactionService<Arc<dyn TransactionStore>>>,
}

impl AppState {
    /// Wire both services over the persistent store
    pub fn new(storage: Storage) -> Self {
        Self::with_stores(Arc::new(storage.clone()), Arc::new(storage))
    }

    /// Wire services over explicit store implementations
    pub fn with_stores(
        operators: Arc<dyn OperatorStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            operators: Arc::new(OperatorService::new(operators)),
            transactions: Arc::new(TransactionService::new(transactions)),
        }
    }
}
