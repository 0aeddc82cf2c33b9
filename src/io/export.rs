use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::HouseholdService;
use crate::domain::{format_balance, format_cents, Expense, Roommate};

/// Database snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub roommates: Vec<Roommate>,
    pub expenses: Vec<Expense>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a HouseholdService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a HouseholdService) -> Self {
        Self { service }
    }

    /// Export the per-roommate settlement balances to CSV format
    pub async fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let settlement = self.service.settle().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["roommate", "paid", "balance"])?;

        let mut count = 0;
        for entry in &settlement.balances {
            csv_writer.write_record([
                entry.name.clone(),
                format_cents(entry.paid_cents),
                format_balance(entry.balance_cents),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export expenses to CSV format
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let records = self.service.list_expenses().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "recorded_at", "payer", "amount"])?;

        let mut count = 0;
        for record in &records {
            csv_writer.write_record([
                record.expense.id.to_string(),
                record.expense.recorded_at.to_rfc3339(),
                record.payer_name.clone(),
                format_cents(record.expense.amount_cents),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole ledger as a JSON snapshot
    pub async fn export_full_json<W: Write>(&self, writer: W) -> Result<usize> {
        let roommates = self.service.list_roommates().await?;
        let expenses = self
            .service
            .list_expenses()
            .await?
            .into_iter()
            .map(|record| record.expense)
            .collect::<Vec<_>>();

        let count = roommates.len() + expenses.len();
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            roommates,
            expenses,
        };

        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(count)
    }
}
