// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::NaiveDate;
use tally::application::LedgerService;
use tally::domain::{Cents, Transaction, TransactionKind};

/// Helper to create a test service over an empty in-memory ledger
pub fn test_service() -> LedgerService {
    LedgerService::in_memory()
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Fixed reference date used by tests that exercise windowed operations:
/// April 15, 2025 (the current month is April).
pub fn today() -> NaiveDate {
    parse_date("2025-04-15")
}

pub async fn add_income(
    service: &LedgerService,
    date: &str,
    amount: Cents,
    category: &str,
) -> Transaction {
    service
        .add_transaction(
            parse_date(date),
            amount,
            category.to_string(),
            String::new(),
            TransactionKind::Income,
        )
        .await
        .expect("failed to add income")
}

pub async fn add_expense(
    service: &LedgerService,
    date: &str,
    amount: Cents,
    category: &str,
) -> Transaction {
    service
        .add_transaction(
            parse_date(date),
            amount,
            category.to_string(),
            String::new(),
            TransactionKind::Expense,
        )
        .await
        .expect("failed to add expense")
}
