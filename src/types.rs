//! Core types and data structures for the ledger

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Number of decimal digits kept for every stored amount
pub const AMOUNT_SCALE: i64 = 2;

/// Render an amount with exactly two decimal digits, zero included ("0.00").
///
/// Extra digits are truncated; stored amounts never carry any.
pub fn format_amount(value: &BigDecimal) -> String {
    let (digits, _) = value.with_scale(AMOUNT_SCALE).into_bigint_and_exponent();
    let text = digits.to_string();
    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", text.as_str()),
    };

    let scale = AMOUNT_SCALE as usize;
    let padded = format!("{:0>width$}", magnitude, width = scale + 1);
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{sign}{whole}.{fraction}")
}

fn serialize_amount<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_amount(value))
}

/// A balance-bearing account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,
    /// Current balance, always the sum of the account's transaction amounts
    #[serde(serialize_with = "serialize_amount")]
    pub balance: BigDecimal,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            balance: BigDecimal::new(0.into(), AMOUNT_SCALE),
        }
    }

    /// Create an account with a given opening balance
    pub fn with_balance(id: Uuid, balance: BigDecimal) -> Self {
        Self { id, balance }
    }
}

/// Kind of movement recorded by a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money credited to the account, stored with a positive amount
    Deposit,
    /// Money taken from the account, stored with a negative amount
    Withdrawal,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "deposit"),
            TransactionType::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

/// Immutable, signed monetary event against an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, never reused
    pub transaction_id: Uuid,
    /// Signed amount: positive for deposits, negative for withdrawals
    #[serde(serialize_with = "serialize_amount")]
    pub amount: BigDecimal,
    /// Commit time in UTC
    pub timestamp: DateTime<Utc>,
    /// Deposit or withdrawal
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Create a deposit of `amount`, stamped now
    pub fn deposit(amount: BigDecimal) -> Self {
        Self::new(amount, TransactionType::Deposit)
    }

    /// Create a withdrawal of `amount`, stamped now. The stored amount is negated.
    pub fn withdrawal(amount: BigDecimal) -> Self {
        Self::new(-amount, TransactionType::Withdrawal)
    }

    fn new(amount: BigDecimal, transaction_type: TransactionType) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            amount,
            timestamp: Utc::now(),
            transaction_type,
        }
    }
}

/// One page of an account's transaction history, most recent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    /// Index of the following page, or 0 once the history is exhausted
    pub next_page: usize,
}

impl TransactionPage {
    /// An empty page with no continuation
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            next_page: 0,
        }
    }

    /// Whether more pages follow this one
    pub fn has_more(&self) -> bool {
        self.next_page != 0
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("not enough funds: balance {balance}, requested {requested}")]
    NotEnoughFunds {
        balance: BigDecimal,
        requested: BigDecimal,
    },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
