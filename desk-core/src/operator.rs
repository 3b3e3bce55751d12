//! Operator validation and lifecycle
//!
//! An operator record moves `absent -> active` on create, stays `active`
//! through whole-record updates, and returns to `absent` on delete. The
//! normalized CPF is globally unique across all operators at any point,
//! including across updates.

use crate::error::{Error, Result};
use crate::identity;
use crate::store::OperatorStore;
use crate::types::{NewOperator, Operator, OperatorDraft, Shift};
use uuid::Uuid;

/// Minimum operator name length, in characters
const MIN_NAME_LEN: usize = 3;

/// Canonical payload produced by validation
#[derive(Debug, Clone)]
struct ValidOperator {
    name: String,
    cpf: String,
    shift: Shift,
}

/// Validate a draft and produce the canonical payload
///
/// Field failures are collected so the caller sees every problem with
/// the payload at once, not just the first.
fn validate_draft(draft: &OperatorDraft) -> Result<ValidOperator> {
    let mut messages = Vec::new();

    let name = draft.name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        messages.push(format!("name: must have at least {MIN_NAME_LEN} characters"));
    }

    let cpf = identity::normalize(&draft.cpf);
    if !identity::is_valid_cpf(&cpf) {
        messages.push("cpf: invalid CPF".to_string());
    }

    let shift = Shift::parse(&draft.shift);
    if shift.is_none() {
        messages.push("shift: must be one of MANHA, TARDE, NOITE".to_string());
    }

    match shift {
        Some(shift) if messages.is_empty() => Ok(ValidOperator {
            name: name.to_string(),
            cpf,
            shift,
        }),
        _ => Err(Error::Validation { messages }),
    }
}

/// Operator lifecycle service
///
/// Plain struct over an explicit store dependency; construct once at
/// startup and share.
pub struct OperatorService<S> {
    store: S,
}

impl<S: OperatorStore> OperatorService<S> {
    /// Create a new service over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an operator from a draft payload
    ///
    /// The CPF existence pre-check gives a clear conflict message, but
    /// the store's own constraint is the authoritative race-free guard;
    /// both surface as [`Error::Conflict`].
    pub fn create(&self, draft: OperatorDraft) -> Result<Operator> {
        let valid = validate_draft(&draft)?;

        if self.store.exists_by_cpf(&valid.cpf)? {
            return Err(Error::Conflict(format!(
                "CPF already registered: {}",
                valid.cpf
            )));
        }

        let operator = self.store.insert(NewOperator {
            name: valid.name,
            cpf: valid.cpf,
            shift: valid.shift,
        })?;

        tracing::info!(operator_id = %operator.id, shift = %operator.shift, "operator created");
        Ok(operator)
    }

    /// Fetch an operator by id
    pub fn get(&self, id: Uuid) -> Result<Operator> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("Operator not found: {id}")))
    }

    /// List all operators; order is unspecified but stable for the call
    pub fn list(&self) -> Result<Vec<Operator>> {
        self.store.find_all()
    }

    /// Replace an operator's name, CPF and shift
    ///
    /// A record resubmitting its own CPF is exempt from the uniqueness
    /// check; the id never changes.
    pub fn update(&self, id: Uuid, draft: OperatorDraft) -> Result<Operator> {
        let current = self.get(id)?;
        let valid = validate_draft(&draft)?;

        if valid.cpf != current.cpf && self.store.exists_by_cpf(&valid.cpf)? {
            return Err(Error::Conflict(format!(
                "CPF already registered: {}",
                valid.cpf
            )));
        }

        let updated = Operator {
            id,
            name: valid.name,
            cpf: valid.cpf,
            shift: valid.shift,
        };
        self.store.update(&updated)?;

        tracing::info!(operator_id = %id, "operator updated");
        Ok(updated)
    }

    /// Delete an operator permanently
    pub fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_by_id(id)? {
            return Err(Error::NotFound(format!("Operator not found: {id}")));
        }
        tracing::info!(operator_id = %id, "operator deleted");
        Ok(())
    }
}
