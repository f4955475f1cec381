use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::application::{LedgerService, TransactionFilter};
use crate::domain::{categories_for, format_cents, Transaction, TransactionKind};
use crate::io::{Exporter, ImportOptions, Importer};

/// Tally - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A single-user personal finance tracker with an in-memory ledger")]
#[command(version)]
pub struct Cli {
    /// Transactions CSV to load (date,amount,category,description,type)
    #[arg(long, global = true)]
    pub transactions: Option<String>,

    /// Budgets CSV to load (category,amount,period)
    #[arg(long, global = true)]
    pub budgets: Option<String>,

    /// Seed the built-in sample ledger
    #[arg(long, global = true)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List transactions, most recent first
    Transactions {
        /// Filter by type: income, expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter from date (YYYY-MM-DD)
        #[arg(long)]
        from_date: Option<String>,

        /// Filter to date (YYYY-MM-DD)
        #[arg(long)]
        to_date: Option<String>,

        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the dashboard summary for the current month
    Summary {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show budget status for the current period
    Budgets {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the category taxonomy
    Categories,

    /// Export data to CSV or JSON
    Export {
        /// What to export: transactions, budgets, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    /// Build the ledger for this invocation: optional sample seed plus any
    /// CSV files given on the command line.
    async fn load_service(&self) -> Result<LedgerService> {
        let service = if self.sample {
            LedgerService::with_sample_data().await
        } else {
            LedgerService::in_memory()
        };

        if let Some(path) = &self.transactions {
            let file = File::open(path)
                .with_context(|| format!("Could not open transactions file '{}'", path))?;
            let result = Importer::new(&service)
                .import_transactions_csv(file, ImportOptions::default())
                .await?;
            report_import_errors("transactions", &result.errors);
        }

        if let Some(path) = &self.budgets {
            let file = File::open(path)
                .with_context(|| format!("Could not open budgets file '{}'", path))?;
            let result = Importer::new(&service)
                .import_budgets_csv(file, ImportOptions::default())
                .await?;
            report_import_errors("budgets", &result.errors);
        }

        Ok(service)
    }

    pub async fn run(self) -> Result<()> {
        let service = self.load_service().await?;

        match self.command {
            Commands::Transactions {
                kind,
                category,
                from_date,
                to_date,
                limit,
            } => {
                let kind = kind
                    .map(|k| {
                        TransactionKind::from_str(&k).ok_or_else(|| {
                            anyhow::anyhow!("Invalid type '{}'. Valid types: income, expense", k)
                        })
                    })
                    .transpose()?;

                let filter = TransactionFilter {
                    kind,
                    category,
                    from_date: from_date.as_deref().map(parse_date).transpose()?,
                    to_date: to_date.as_deref().map(parse_date).transpose()?,
                    limit,
                };

                let transactions = service.list_transactions_filtered(filter).await;
                render_transactions(&transactions);
            }

            Commands::Summary { json } => {
                let summary = service.monthly_summary().await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!(
                        "Summary for {} to {}",
                        summary.month_start,
                        summary.month_end.pred_opt().unwrap_or(summary.month_end)
                    );
                    println!();
                    println!("{:<12} {:>12}", "Income", format_cents(summary.total_income_cents));
                    println!(
                        "{:<12} {:>12}",
                        "Expenses",
                        format_cents(summary.total_expenses_cents)
                    );
                    println!("{:<12} {:>12}", "Net", format_cents(summary.net_income_cents));

                    if !summary.expense_by_category.is_empty() {
                        println!();
                        println!("{:<20} {:>12}", "EXPENSE CATEGORY", "TOTAL");
                        println!("{}", "-".repeat(33));
                        // Largest first; the map itself has no useful order
                        let mut categories: Vec<_> =
                            summary.expense_by_category.iter().collect();
                        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                        for (category, total) in categories {
                            println!("{:<20} {:>12}", category, format_cents(*total));
                        }
                    }

                    if !summary.recent_transactions.is_empty() {
                        println!();
                        println!("RECENT TRANSACTIONS");
                        render_transactions(&summary.recent_transactions);
                    }
                }
            }

            Commands::Budgets { json } => {
                // Spend is derived; refresh it before reading
                service.recompute_spending().await;
                let reports = service.budget_reports().await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&reports)?);
                } else if reports.is_empty() {
                    println!("No budgets found.");
                } else {
                    println!(
                        "{:<20} {:<10} {:>12} {:>12} {:>12} {:>7} {:<10}",
                        "CATEGORY", "PERIOD", "LIMIT", "SPENT", "REMAINING", "USED", "STATUS"
                    );
                    println!("{}", "-".repeat(90));
                    for report in reports {
                        println!(
                            "{:<20} {:<10} {:>12} {:>12} {:>12} {:>6.1}% {:<10}",
                            report.budget.category,
                            report.budget.period,
                            format_cents(report.budget.amount_cents),
                            format_cents(report.budget.spent_cents),
                            format_cents(report.remaining_cents()),
                            report.health.percentage,
                            report.health.severity,
                        );
                    }
                }
            }

            Commands::Categories => {
                println!("INCOME");
                for category in categories_for(TransactionKind::Income) {
                    println!("  {}", category);
                }
                println!();
                println!("EXPENSE");
                for category in categories_for(TransactionKind::Expense) {
                    println!("  {}", category);
                }
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let writer: Box<dyn Write> = match &output {
                    Some(path) => Box::new(
                        File::create(path)
                            .with_context(|| format!("Could not create output file '{}'", path))?,
                    ),
                    None => Box::new(io::stdout()),
                };

                let exporter = Exporter::new(&service);
                match export_type.as_str() {
                    "transactions" => {
                        let count = exporter.export_transactions_csv(writer).await?;
                        eprintln!("Exported {} transaction(s)", count);
                    }
                    "budgets" => {
                        service.recompute_spending().await;
                        let count = exporter.export_budgets_csv(writer).await?;
                        eprintln!("Exported {} budget(s)", count);
                    }
                    "full" => {
                        service.recompute_spending().await;
                        let snapshot = exporter.export_full_json(writer).await?;
                        eprintln!(
                            "Exported {} transaction(s) and {} budget(s)",
                            snapshot.transactions.len(),
                            snapshot.budgets.len()
                        );
                    }
                    other => {
                        anyhow::bail!(
                            "Unknown export type '{}'. Valid types: transactions, budgets, full",
                            other
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", s))
}

fn render_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<12} {:<8} {:>12} {:<15} {}",
        "DATE", "TYPE", "AMOUNT", "CATEGORY", "DESCRIPTION"
    );
    println!("{}", "-".repeat(70));
    for tx in transactions {
        println!(
            "{:<12} {:<8} {:>12} {:<15} {}",
            tx.date.format("%Y-%m-%d"),
            tx.kind,
            format_cents(tx.amount_cents),
            tx.category,
            tx.description,
        );
    }
}

fn report_import_errors(what: &str, errors: &[crate::io::ImportError]) {
    for error in errors {
        match &error.field {
            Some(field) => eprintln!(
                "[{} line {}] {}: {}",
                what, error.line, field, error.error
            ),
            None => eprintln!("[{} line {}] {}", what, error.line, error.error),
        }
    }
}
