use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;

use crate::application::LedgerService;
use crate::domain::{parse_cents, Period, TransactionKind};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred on one line during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Parse and validate without touching the ledger
    pub dry_run: bool,
}

/// Importer for loading data into the ledger
pub struct Importer<'a> {
    service: &'a LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Import transactions from CSV with columns
    /// `date,amount,category,description,type`. An optional leading `id`
    /// column (as written by the exporter) is ignored; ids are reassigned.
    ///
    /// Bad lines are collected as errors without aborting the batch.
    pub async fn import_transactions_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let has_id_column = csv_reader
            .headers()?
            .get(0)
            .is_some_and(|h| h.eq_ignore_ascii_case("id"));
        let offset = if has_id_column { 1 } else { 0 };

        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let date_str = record.get(offset).unwrap_or("");
            let amount_str = record.get(offset + 1).unwrap_or("");
            let category = record.get(offset + 2).unwrap_or("").to_string();
            let description = record.get(offset + 3).unwrap_or("").to_string();
            let kind_str = record.get(offset + 4).unwrap_or("");

            let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("date".to_string()),
                        error: format!("Invalid date '{}': {}", date_str, e),
                    });
                    continue;
                }
            };

            let amount_cents = match parse_cents(amount_str) {
                Ok(a) => a,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount '{}': {}", amount_str, e),
                    });
                    continue;
                }
            };

            let kind = match TransactionKind::from_str(kind_str) {
                Some(k) => k,
                None => {
                    errors.push(ImportError {
                        line,
                        field: Some("type".to_string()),
                        error: format!("Invalid type '{}': expected income or expense", kind_str),
                    });
                    continue;
                }
            };

            if options.dry_run {
                imported += 1;
                continue;
            }

            match self
                .service
                .add_transaction(date, amount_cents, category, description, kind)
                .await
            {
                Ok(_) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("Transaction creation failed: {}", e),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }

    /// Import budgets from CSV with columns `category,amount,period`.
    /// Optional leading `id` and trailing `spent` columns from the exporter
    /// are ignored; spend is derived, never imported.
    pub async fn import_budgets_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let has_id_column = headers
            .get(0)
            .is_some_and(|h| h.eq_ignore_ascii_case("id"));
        let offset = if has_id_column { 1 } else { 0 };
        // Exporter layout is id,category,amount,spent,period; the bare
        // layout is category,amount,period
        let period_index = if has_id_column { offset + 3 } else { offset + 2 };

        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let category = record.get(offset).unwrap_or("").to_string();
            let amount_str = record.get(offset + 1).unwrap_or("");
            let period_str = record.get(period_index).unwrap_or("");

            let amount_cents = match parse_cents(amount_str) {
                Ok(a) => a,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount '{}': {}", amount_str, e),
                    });
                    continue;
                }
            };

            let period = match Period::from_str(period_str) {
                Some(p) => p,
                None => {
                    errors.push(ImportError {
                        line,
                        field: Some("period".to_string()),
                        error: format!(
                            "Invalid period '{}': expected weekly, monthly or yearly",
                            period_str
                        ),
                    });
                    continue;
                }
            };

            if options.dry_run {
                imported += 1;
                continue;
            }

            match self.service.add_budget(category, amount_cents, period).await {
                Ok(_) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("Budget creation failed: {}", e),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }
}
