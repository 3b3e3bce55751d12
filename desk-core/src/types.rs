//! Core types for operators and transactions
//!
//! Money uses exact `Decimal` arithmetic; all records are plain serde
//! structs so the same shapes flow through storage and the REST boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Work shift of a desk operator
///
/// Wire codes are the Portuguese values the desk uses (`MANHA`, `TARDE`,
/// `NOITE`); input is accepted case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    /// Morning shift
    #[serde(rename = "MANHA")]
    Morning,
    /// Afternoon shift
    #[serde(rename = "TARDE")]
    Afternoon,
    /// Night shift
    #[serde(rename = "NOITE")]
    Night,
}

impl Shift {
    /// Stored wire code
    pub fn code(&self) -> &'static str {
        match self {
            Shift::Morning => "MANHA",
            Shift::Afternoon => "TARDE",
            Shift::Night => "NOITE",
        }
    }

    /// Parse from a wire code, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MANHA" => Some(Shift::Morning),
            "TARDE" => Some(Shift::Afternoon),
            "NOITE" => Some(Shift::Night),
            _ => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Recognized payment methods
///
/// Transactions store the raw upper-cased method string; this enum only
/// exists for classification, so unrecognized methods stay representable
/// as `None` and fall through to the default risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash (`DINHEIRO`)
    Cash,
    /// Card (`CARTAO`)
    Card,
    /// Instant transfer (`PIX`)
    Pix,
}

impl PaymentMethod {
    /// Parse from a wire code, case-insensitively; `None` if unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DINHEIRO" => Some(PaymentMethod::Cash),
            "CARTAO" => Some(PaymentMethod::Card),
            "PIX" => Some(PaymentMethod::Pix),
            _ => None,
        }
    }
}

/// Fraud-risk tier, computed once at transaction creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low risk
    #[serde(rename = "LOW")]
    Low,
    /// Medium risk
    #[serde(rename = "MEDIUM")]
    Medium,
    /// High risk
    #[serde(rename = "HIGH")]
    High,
}

impl RiskTier {
    /// Stored wire code
    pub fn code(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stored operator record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Surrogate id, assigned by the store on insert, immutable
    pub id: Uuid,
    /// Display name, at least 3 characters
    pub name: String,
    /// CPF, digits only, globally unique
    pub cpf: String,
    /// Work shift
    pub shift: Shift,
}

/// Validated operator payload, ready for the store to assign an id
#[derive(Debug, Clone)]
pub struct NewOperator {
    /// Trimmed display name
    pub name: String,
    /// Normalized CPF (digits only)
    pub cpf: String,
    /// Work shift
    pub shift: Shift,
}

/// Inbound operator payload, not yet validated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperatorDraft {
    /// Display name as submitted
    #[serde(default)]
    pub name: String,
    /// CPF as submitted, any formatting
    #[serde(default)]
    pub cpf: String,
    /// Shift code as submitted, any casing
    #[serde(default)]
    pub shift: String,
}

/// Stored transaction record
///
/// `fraud_risk` and `created_at` are historical facts: no operation
/// mutates a transaction after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Surrogate id, assigned by the store on insert, immutable
    pub id: Uuid,
    /// Positive amount, scale 2
    pub amount: Decimal,
    /// Upper-cased payment method as submitted
    pub payment_method: String,
    /// Risk tier computed at creation
    pub fraud_risk: RiskTier,
    /// Creation timestamp, stamped by the service
    pub created_at: DateTime<Utc>,
}

/// Validated transaction payload, ready for the store to assign an id
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Positive amount, scale 2
    pub amount: Decimal,
    /// Upper-cased payment method
    pub payment_method: String,
    /// Risk tier computed at creation
    pub fraud_risk: RiskTier,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Inbound transaction payload, not yet validated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDraft {
    /// Amount as submitted (JSON number or string)
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Payment method as submitted, any casing
    #[serde(default)]
    pub payment_method: String,
}
