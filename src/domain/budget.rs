use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type BudgetId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Period::Weekly),
            "monthly" => Some(Period::Monthly),
            "yearly" => Some(Period::Yearly),
            _ => None,
        }
    }

    /// Get the half-open date window `[start, end)` containing `today`.
    pub fn current_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Weekly => {
                // Week starts on Monday
                let weekday = today.weekday().num_days_from_monday();
                let start = today - Duration::days(weekday as i64);
                (start, start + Duration::days(7))
            }
            Period::Monthly => {
                // Month starts on the 1st
                let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
                let end = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap()
                };
                (start, end)
            }
            Period::Yearly => {
                // Year starts on January 1st
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();
                let end = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap();
                (start, end)
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending health bucket derived from the spent/amount ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived budget health: display percentage plus severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetHealth {
    /// Spend percentage clamped to [0, 100] for display
    pub percentage: f64,
    pub severity: Severity,
}

/// A spending cap for one expense category.
///
/// `spent_cents` is derived from transactions by the service's spend
/// recomputation; it is never authored directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    /// Matched against expense-transaction categories by string equality
    pub category: String,
    /// The budgeted cap in cents (never negative)
    pub amount_cents: Cents,
    /// Sum of matching expense amounts in the current period window
    pub spent_cents: Cents,
    pub period: Period,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount_cents: Cents, period: Period) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            amount_cents,
            spent_cents: 0,
            period,
        }
    }

    /// Get the current window for this budget.
    pub fn current_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        self.period.current_window(today)
    }

    /// Compute health from the stored spent amount.
    ///
    /// A zero (or negative) cap has no meaningful ratio; the contract is
    /// percentage 0, severity normal. Severity thresholds apply to the
    /// uncapped ratio, the percentage is clamped for display.
    pub fn health(&self) -> BudgetHealth {
        if self.amount_cents <= 0 {
            return BudgetHealth {
                percentage: 0.0,
                severity: Severity::Normal,
            };
        }

        let raw = 100.0 * self.spent_cents as f64 / self.amount_cents as f64;
        let severity = if raw > 90.0 {
            Severity::Critical
        } else if raw > 70.0 {
            Severity::Warning
        } else {
            Severity::Normal
        };

        BudgetHealth {
            percentage: raw.clamp(0.0, 100.0),
            severity,
        }
    }
}
