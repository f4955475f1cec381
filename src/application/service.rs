use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::domain::{
    self, Budget, BudgetId, Cents, Period, Transaction, TransactionId, TransactionKind,
};
use crate::storage::Repository;

use super::{BudgetReport, LedgerError, MonthlySummary, RECENT_TRANSACTION_COUNT};

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct LedgerService {
    repo: Repository,
}

/// Filter for querying transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a service over an empty in-memory ledger.
    pub fn in_memory() -> Self {
        Self::new(Repository::new())
    }

    /// Create a service seeded with a small demo ledger, dated within the
    /// current month so the dashboard has something to show.
    pub async fn with_sample_data() -> Self {
        let service = Self::in_memory();
        let today = Utc::now().date_naive();
        // Keep sample dates inside the current month even early in the month
        let day_of_month = today.day0() as i64;
        let back = |days: i64| today - Duration::days(days.min(day_of_month));

        let samples = [
            (back(3), 200000, "Salary", "Monthly salary", TransactionKind::Income),
            (back(2), 50000, "Rent", "Monthly rent payment", TransactionKind::Expense),
            (back(2), 5000, "Groceries", "Weekly grocery shopping", TransactionKind::Expense),
            (back(1), 10000, "Utilities", "Electricity bill", TransactionKind::Expense),
            (back(0), 30000, "Freelance", "Website development project", TransactionKind::Income),
        ];
        for (date, amount, category, description, kind) in samples {
            let tx = Transaction::new(date, amount, category, kind).with_description(description);
            service.repo.insert_transaction(tx).await;
        }

        let budgets = [
            ("Groceries", 40000),
            ("Entertainment", 20000),
            ("Transportation", 15000),
            ("Dining Out", 30000),
        ];
        for (category, amount) in budgets {
            service
                .repo
                .insert_budget(Budget::new(category, amount, Period::Monthly))
                .await;
        }

        service
    }

    fn validate_amount(amount_cents: Cents) -> Result<(), LedgerError> {
        if amount_cents < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must not be negative, got {}",
                domain::format_cents(amount_cents)
            )));
        }
        Ok(())
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a new transaction. Assigns a fresh id and returns the stored
    /// record.
    pub async fn add_transaction(
        &self,
        date: NaiveDate,
        amount_cents: Cents,
        category: String,
        description: String,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        Self::validate_amount(amount_cents)?;

        let tx = Transaction::new(date, amount_cents, category, kind).with_description(description);
        self.repo.insert_transaction(tx.clone()).await;
        Ok(tx)
    }

    /// Replace the stored transaction with the same id (whole-record update).
    pub async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, LedgerError> {
        Self::validate_amount(tx.amount_cents)?;

        if self.repo.replace_transaction(&tx).await {
            Ok(tx)
        } else {
            Err(LedgerError::TransactionNotFound(tx.id))
        }
    }

    /// Delete a transaction by id.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), LedgerError> {
        if self.repo.remove_transaction(id).await {
            Ok(())
        } else {
            Err(LedgerError::TransactionNotFound(id))
        }
    }

    /// Get a transaction by id.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.repo
            .get_transaction(id)
            .await
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// List all transactions, most recent first (ties keep insertion order).
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        domain::sorted_by_date_desc(self.repo.list_transactions().await)
    }

    /// List transactions with filters, most recent first.
    pub async fn list_transactions_filtered(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let mut transactions: Vec<_> = self
            .repo
            .list_transactions()
            .await
            .into_iter()
            .filter(|t| filter.kind.is_none_or(|k| t.kind == k))
            .filter(|t| filter.category.as_deref().is_none_or(|c| t.category == c))
            .filter(|t| filter.from_date.is_none_or(|d| t.date >= d))
            .filter(|t| filter.to_date.is_none_or(|d| t.date <= d))
            .collect();

        transactions = domain::sorted_by_date_desc(transactions);
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        transactions
    }

    /// Dashboard summary for the calendar month containing today.
    pub async fn monthly_summary(&self) -> MonthlySummary {
        self.monthly_summary_at(Utc::now().date_naive()).await
    }

    /// Dashboard summary for the calendar month containing `today`.
    /// The explicit date keeps window logic deterministic under test.
    pub async fn monthly_summary_at(&self, today: NaiveDate) -> MonthlySummary {
        let transactions = self.repo.list_transactions().await;
        let window = Period::Monthly.current_window(today);

        let total_income_cents =
            domain::sum_by_kind(&transactions, TransactionKind::Income, window);
        let total_expenses_cents =
            domain::sum_by_kind(&transactions, TransactionKind::Expense, window);

        MonthlySummary {
            month_start: window.0,
            month_end: window.1,
            total_income_cents,
            total_expenses_cents,
            net_income_cents: total_income_cents - total_expenses_cents,
            expense_by_category: domain::expense_by_category(&transactions, window),
            recent_transactions: domain::recent(&transactions, RECENT_TRANSACTION_COUNT),
        }
    }

    // ========================
    // Budget operations
    // ========================

    /// Create a new budget with zero spend.
    pub async fn add_budget(
        &self,
        category: String,
        amount_cents: Cents,
        period: Period,
    ) -> Result<Budget, LedgerError> {
        Self::validate_amount(amount_cents)?;

        let budget = Budget::new(category, amount_cents, period);
        self.repo.insert_budget(budget.clone()).await;
        Ok(budget)
    }

    /// Replace the stored budget with the same id (whole-record update).
    pub async fn update_budget(&self, budget: Budget) -> Result<Budget, LedgerError> {
        Self::validate_amount(budget.amount_cents)?;

        if self.repo.replace_budget(&budget).await {
            Ok(budget)
        } else {
            Err(LedgerError::BudgetNotFound(budget.id))
        }
    }

    /// Delete a budget by id.
    pub async fn delete_budget(&self, id: BudgetId) -> Result<(), LedgerError> {
        if self.repo.remove_budget(id).await {
            Ok(())
        } else {
            Err(LedgerError::BudgetNotFound(id))
        }
    }

    /// Get a budget by id.
    pub async fn get_budget(&self, id: BudgetId) -> Result<Budget, LedgerError> {
        self.repo
            .get_budget(id)
            .await
            .ok_or(LedgerError::BudgetNotFound(id))
    }

    /// List all budgets in insertion order.
    pub async fn list_budgets(&self) -> Vec<Budget> {
        self.repo.list_budgets().await
    }

    /// Recompute every budget's spend from the transactions in its current
    /// period window.
    ///
    /// This is a full recomputation, not incremental, and it is never
    /// triggered by transaction mutations: callers invoke it before reading
    /// budgets whenever transactions may have changed.
    pub async fn recompute_spending(&self) {
        self.recompute_spending_at(Utc::now().date_naive()).await
    }

    /// Recompute spend with an explicit reference date.
    pub async fn recompute_spending_at(&self, today: NaiveDate) {
        let transactions = self.repo.list_transactions().await;
        let budgets = self.repo.list_budgets().await;

        let updates: Vec<(BudgetId, Cents)> = budgets
            .iter()
            .map(|budget| {
                let window = budget.current_window(today);
                let spent = domain::spent_for_category(&transactions, &budget.category, window);
                (budget.id, spent)
            })
            .collect();

        self.repo.apply_spent(&updates).await;
    }

    /// Every budget paired with its derived health, in insertion order.
    /// Reads stored spend; call `recompute_spending` first for fresh figures.
    pub async fn budget_reports(&self) -> Vec<BudgetReport> {
        self.repo
            .list_budgets()
            .await
            .into_iter()
            .map(|budget| {
                let health = budget.health();
                BudgetReport { budget, health }
            })
            .collect()
    }
}
