use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{format_cents, Budget, Transaction};

/// Ledger snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export transactions to CSV format. Amounts are written as decimal
    /// strings ("50.00") so files round-trip through the importer.
    pub async fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let transactions = self.service.list_transactions().await;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "amount", "category", "description", "type"])?;

        let mut count = 0;
        for tx in &transactions {
            csv_writer.write_record([
                tx.id.to_string(),
                tx.date.format("%Y-%m-%d").to_string(),
                format_cents(tx.amount_cents),
                tx.category.clone(),
                tx.description.clone(),
                tx.kind.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export budgets to CSV format.
    pub async fn export_budgets_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let budgets = self.service.list_budgets().await;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "category", "amount", "spent", "period"])?;

        let mut count = 0;
        for budget in &budgets {
            csv_writer.write_record([
                budget.id.to_string(),
                budget.category.clone(),
                format_cents(budget.amount_cents),
                format_cents(budget.spent_cents),
                budget.period.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            transactions: self.service.list_transactions().await,
            budgets: self.service.list_budgets().await,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
