use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, freelance work, etc.)
    Income,
    /// Money going out (rent, groceries, etc.)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense record.
///
/// The amount is always non-negative; direction is carried entirely by
/// `kind`. The id is assigned at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Calendar date of the transaction (day granularity)
    pub date: NaiveDate,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    /// Category label, opaque to the ledger core (the UI constrains it
    /// to a fixed taxonomy, the store does not)
    pub category: String,
    /// Human-readable description
    pub description: String,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction with a fresh id. Amount validation happens
    /// at the service boundary, not here.
    pub fn new(
        date: NaiveDate,
        amount_cents: Cents,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount_cents,
            category: category.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }
}
