use thiserror::Error;

use crate::domain::{BudgetId, TransactionId};

/// Errors surfaced by ledger operations.
///
/// Update and delete on an unknown id fail loudly instead of silently
/// succeeding, so callers can tell a no-op from a stale reference.
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Budget not found: {0}")]
    BudgetNotFound(BudgetId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
