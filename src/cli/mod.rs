use std::fs::File;
use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::{AppError, HouseholdService};
use crate::domain::{format_balance, format_cents, parse_cents, Settlement};
use crate::io::Exporter;

/// Divvy - shared-expense tracker for roommates
#[derive(Parser)]
#[command(name = "divvy")]
#[command(about = "Track who paid what and split the total evenly")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "divvy.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Roommate management commands
    #[command(subcommand)]
    Roommate(RoommateCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show the equal-split settlement for the whole household
    Settle,

    /// Export data to CSV or JSON
    Export {
        /// What to export: balances, expenses, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv, json for full)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RoommateCommands {
    /// Add a roommate to the household
    Add {
        /// Roommate name (unique, case-sensitive)
        name: String,
    },

    /// List all roommates
    List,
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense paid by one roommate
    Add {
        /// Amount paid (e.g., "50.00" or "50")
        amount: String,

        /// Name of the roommate who paid
        #[arg(short, long)]
        payer: String,
    },

    /// List all recorded expenses
    List,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                HouseholdService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Roommate(roommate_cmd) => {
                let service = HouseholdService::connect(&self.database).await?;
                run_roommate_command(&service, roommate_cmd).await?;
            }

            Commands::Expense(expense_cmd) => {
                let service = HouseholdService::connect(&self.database).await?;
                run_expense_command(&service, expense_cmd).await?;
            }

            Commands::Settle => {
                let service = HouseholdService::connect(&self.database).await?;
                if let Some(settlement) = recover(service.settle().await)? {
                    print_settlement(&settlement);
                }
            }

            Commands::Export {
                export_type,
                output,
                format,
            } => {
                let service = HouseholdService::connect(&self.database).await?;
                run_export_command(&service, &export_type, output.as_deref(), format.as_deref())
                    .await?;
            }
        }

        Ok(())
    }
}

/// User mistakes (bad name, bad amount, unknown payer, empty household) are
/// reported and absorbed here at the input boundary; only real failures
/// propagate out of the process.
fn recover<T>(result: Result<T, AppError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_user_error() => {
            eprintln!("{}", err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_roommate_command(service: &HouseholdService, cmd: RoommateCommands) -> Result<()> {
    match cmd {
        RoommateCommands::Add { name } => {
            let Some(roommate) = recover(service.add_roommate(&name).await)? else {
                return Ok(());
            };
            println!("Added roommate: {}", roommate.name);

            let roommates = service.list_roommates().await?;
            println!("Household now has {} roommate(s).", roommates.len());
        }

        RoommateCommands::List => {
            let roommates = service.list_roommates().await?;
            if roommates.is_empty() {
                println!("No roommates yet.");
            } else {
                println!("{:<20} {:<12}", "NAME", "JOINED");
                println!("{}", "-".repeat(32));
                for roommate in roommates {
                    println!(
                        "{:<20} {:<12}",
                        roommate.name,
                        roommate.created_at.format("%Y-%m-%d").to_string()
                    );
                }
            }
        }
    }

    Ok(())
}

async fn run_expense_command(service: &HouseholdService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add { amount, payer } => {
            let amount_cents = match parse_cents(&amount) {
                Ok(cents) => cents,
                Err(err) => {
                    eprintln!("{}", AppError::InvalidAmount(err.to_string()));
                    return Ok(());
                }
            };

            let Some(record) = recover(service.record_expense(&payer, amount_cents).await)? else {
                return Ok(());
            };
            println!(
                "Recorded expense: {} paid by {}",
                format_cents(record.expense.amount_cents),
                record.payer_name
            );

            // Re-derive the settlement after every mutation, like the balance
            // table a resident UI would refresh.
            println!();
            print_settlement(&service.settle().await?);
        }

        ExpenseCommands::List => {
            let records = service.list_expenses().await?;
            if records.is_empty() {
                println!("No expenses recorded yet.");
            } else {
                println!("{:<6} {:<12} {:<20} {:>10}", "ID", "DATE", "PAYER", "AMOUNT");
                println!("{}", "-".repeat(50));
                for record in &records {
                    println!(
                        "{:<6} {:<12} {:<20} {:>10}",
                        record.expense.id,
                        record.expense.recorded_at.format("%Y-%m-%d").to_string(),
                        record.payer_name,
                        format_cents(record.expense.amount_cents)
                    );
                }
                let total: i64 = records.iter().map(|r| r.expense.amount_cents).sum();
                println!("{}", "-".repeat(50));
                println!("{:<40} {:>9}", "TOTAL", format_cents(total));
            }
        }
    }

    Ok(())
}

fn print_settlement(settlement: &Settlement) {
    println!("Total spent: {}", format_cents(settlement.total_cents));
    println!(
        "Fair share:  {} per roommate",
        format_balance(settlement.fair_share_cents)
    );
    println!();
    println!("{:<20} {:>10} {:>10}", "ROOMMATE", "PAID", "BALANCE");
    println!("{}", "-".repeat(42));
    for entry in &settlement.balances {
        println!(
            "{:<20} {:>10} {:>10}",
            entry.name,
            format_cents(entry.paid_cents),
            format_balance(entry.balance_cents)
        );
    }
    println!();
    println!("Positive balance: still owes the pool. Negative: is owed back.");
}

async fn run_export_command(
    service: &HouseholdService,
    export_type: &str,
    output: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    let format = format.unwrap_or(match export_type {
        "full" => "json",
        _ => "csv",
    });

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let count = match (export_type, format) {
        ("balances", "csv") => {
            // Surface the empty-household case as a user message, not a failure.
            if recover(service.settle().await)?.is_none() {
                return Ok(());
            }
            exporter.export_balances_csv(&mut writer).await?
        }
        ("expenses", "csv") => exporter.export_expenses_csv(&mut writer).await?,
        ("full", "json") => exporter.export_full_json(&mut writer).await?,
        _ => anyhow::bail!(
            "Unsupported export '{} as {}'. Try: balances (csv), expenses (csv), full (json)",
            export_type,
            format
        ),
    };

    if let Some(path) = output {
        println!("Exported {} record(s) to {}", count, path);
    }

    Ok(())
}
