use tokio::sync::RwLock;

use crate::domain::{Budget, BudgetId, Cents, Transaction, TransactionId};

/// The owned ledger state. Vectors preserve insertion order, which is the
/// tie-break order for date sorting and the display order for budgets.
#[derive(Debug, Default)]
struct LedgerState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// In-memory repository for transactions and budgets.
///
/// The backing collections are never handed out; all access goes through
/// these operations. Mutations take the write lock for their whole duration,
/// so each operation is atomic and mutations are serialized even when the
/// repository is shared across tasks.
#[derive(Debug, Default)]
pub struct Repository {
    state: RwLock<LedgerState>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Transaction operations
    // ========================

    /// Append a transaction to the collection.
    pub async fn insert_transaction(&self, tx: Transaction) {
        self.state.write().await.transactions.push(tx);
    }

    /// Get a transaction by id.
    pub async fn get_transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.state
            .read()
            .await
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// List all transactions in insertion order.
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.state.read().await.transactions.clone()
    }

    /// Replace the stored transaction with the same id.
    /// Returns false (leaving the collection unchanged) if the id is unknown.
    pub async fn replace_transaction(&self, tx: &Transaction) -> bool {
        let mut state = self.state.write().await;
        match state.transactions.iter_mut().find(|t| t.id == tx.id) {
            Some(slot) => {
                *slot = tx.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a transaction by id. Returns false if the id is unknown.
    pub async fn remove_transaction(&self, id: TransactionId) -> bool {
        let mut state = self.state.write().await;
        let before = state.transactions.len();
        state.transactions.retain(|t| t.id != id);
        state.transactions.len() < before
    }

    // ========================
    // Budget operations
    // ========================

    /// Append a budget to the collection.
    pub async fn insert_budget(&self, budget: Budget) {
        self.state.write().await.budgets.push(budget);
    }

    /// Get a budget by id.
    pub async fn get_budget(&self, id: BudgetId) -> Option<Budget> {
        self.state
            .read()
            .await
            .budgets
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// List all budgets in insertion order.
    pub async fn list_budgets(&self) -> Vec<Budget> {
        self.state.read().await.budgets.clone()
    }

    /// Replace the stored budget with the same id.
    /// Returns false (leaving the collection unchanged) if the id is unknown.
    pub async fn replace_budget(&self, budget: &Budget) -> bool {
        let mut state = self.state.write().await;
        match state.budgets.iter_mut().find(|b| b.id == budget.id) {
            Some(slot) => {
                *slot = budget.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a budget by id. Returns false if the id is unknown.
    pub async fn remove_budget(&self, id: BudgetId) -> bool {
        let mut state = self.state.write().await;
        let before = state.budgets.len();
        state.budgets.retain(|b| b.id != id);
        state.budgets.len() < before
    }

    /// Apply recomputed spent amounts in one atomic pass.
    /// Unknown ids are ignored; spend recomputation races with deletes only
    /// across operations, never within one.
    pub async fn apply_spent(&self, updates: &[(BudgetId, Cents)]) {
        let mut state = self.state.write().await;
        for (id, spent) in updates {
            if let Some(budget) = state.budgets.iter_mut().find(|b| b.id == *id) {
                budget.spent_cents = *spent;
            }
        }
    }
}
