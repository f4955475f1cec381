use super::TransactionKind;

/// Fixed category taxonomy consumed by the presentation layer for selection
/// widgets. The ledger core treats categories as opaque strings and does not
/// validate membership.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investments",
    "Gift",
    "Other Income",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Transportation",
    "Food",
    "Utilities",
    "Insurance",
    "Healthcare",
    "Debt",
    "Entertainment",
    "Personal",
    "Education",
    "Clothing",
    "Gifts",
    "Travel",
    "Groceries",
    "Dining Out",
    "Rent",
    "Other Expense",
];

pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}
