use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Budget, BudgetHealth, Cents, Transaction};

/// How many transactions the dashboard shows as "recent".
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// Dashboard summary over the current calendar month.
///
/// The window is half-open `[month_start, month_end)`. Everything except
/// `recent_transactions` is scoped to the window; the recent list spans the
/// whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub total_income_cents: Cents,
    pub total_expenses_cents: Cents,
    /// Always `total_income_cents - total_expenses_cents`; may be negative
    pub net_income_cents: Cents,
    /// Expense totals per category present in the window
    pub expense_by_category: HashMap<String, Cents>,
    /// The 5 most recent transactions across the entire collection
    pub recent_transactions: Vec<Transaction>,
}

/// A budget paired with its derived health, for status displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget: Budget,
    pub health: BudgetHealth,
}

impl BudgetReport {
    pub fn remaining_cents(&self) -> Cents {
        self.budget.amount_cents - self.budget.spent_cents
    }
}
