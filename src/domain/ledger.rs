use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Cents, Transaction, TransactionKind};

/// Returns true if `date` falls inside the half-open window `[start, end)`.
pub fn in_window(date: NaiveDate, window: (NaiveDate, NaiveDate)) -> bool {
    date >= window.0 && date < window.1
}

/// Sort transactions by date descending, most recent first.
/// The sort is stable: equal dates keep their insertion order.
pub fn sorted_by_date_desc(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// The `count` most recent transactions across the whole collection,
/// date descending, ties in insertion order.
pub fn recent(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut sorted = sorted_by_date_desc(transactions.to_vec());
    sorted.truncate(count);
    sorted
}

/// Sum amounts of the given kind within a date window.
pub fn sum_by_kind(
    transactions: &[Transaction],
    kind: TransactionKind,
    window: (NaiveDate, NaiveDate),
) -> Cents {
    transactions
        .iter()
        .filter(|t| t.kind == kind && in_window(t.date, window))
        .map(|t| t.amount_cents)
        .sum()
}

/// Sum expense amounts per category within a date window.
/// Returns a map of category -> total; only categories with at least one
/// matching expense appear.
pub fn expense_by_category(
    transactions: &[Transaction],
    window: (NaiveDate, NaiveDate),
) -> HashMap<String, Cents> {
    let mut totals: HashMap<String, Cents> = HashMap::new();

    for tx in transactions {
        if tx.is_expense() && in_window(tx.date, window) {
            *totals.entry(tx.category.clone()).or_insert(0) += tx.amount_cents;
        }
    }

    totals
}

/// Sum expense amounts for a single category within a date window.
/// Used for budget spend recomputation.
pub fn spent_for_category(
    transactions: &[Transaction],
    category: &str,
    window: (NaiveDate, NaiveDate),
) -> Cents {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category && in_window(t.date, window))
        .map(|t| t.amount_cents)
        .sum()
}
