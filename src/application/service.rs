use chrono::Utc;

use crate::domain::{
    compute_settlement, Cents, Expense, Roommate, Settlement, SettlementError,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations over the ledger.
/// This is the single interface any client (CLI, GUI, export) calls into.
pub struct HouseholdService {
    repo: Repository,
}

/// An expense joined with its payer's name, for display.
pub struct ExpenseRecord {
    pub expense: Expense,
    pub payer_name: String,
}

impl HouseholdService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Roommate operations
    // ========================

    /// Add a new roommate. The name is trimmed; empty and already-taken names
    /// are both rejected as `DuplicateName`.
    pub async fn add_roommate(&self, name: &str) -> Result<Roommate, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::DuplicateName("name is empty".to_string()));
        }

        if self.repo.get_roommate_by_name(name).await?.is_some() {
            return Err(AppError::DuplicateName(format!(
                "'{}' already exists",
                name
            )));
        }

        Ok(self.repo.save_roommate(name, Utc::now()).await?)
    }

    /// Get a roommate by name.
    pub async fn get_roommate(&self, name: &str) -> Result<Roommate, AppError> {
        self.repo
            .get_roommate_by_name(name)
            .await?
            .ok_or_else(|| AppError::UnknownRoommate(name.to_string()))
    }

    /// List all roommates in the order they joined.
    pub async fn list_roommates(&self) -> Result<Vec<Roommate>, AppError> {
        Ok(self.repo.list_roommates().await?)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record an expense paid by the named roommate. Validation happens before
    /// any write, so a rejected call leaves the store unchanged.
    pub async fn record_expense(
        &self,
        payer_name: &str,
        amount_cents: Cents,
    ) -> Result<ExpenseRecord, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let payer = self.get_roommate(payer_name).await?;
        let expense = self
            .repo
            .save_expense(payer.id, amount_cents, Utc::now())
            .await?;

        Ok(ExpenseRecord {
            expense,
            payer_name: payer.name,
        })
    }

    /// List all expenses with their payers' names, in insertion order.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>, AppError> {
        let roommates = self.repo.list_roommates().await?;
        let expenses = self.repo.list_expenses().await?;

        expenses
            .into_iter()
            .map(|expense| {
                let payer_name = roommates
                    .iter()
                    .find(|r| r.id == expense.roommate_id)
                    .map(|r| r.name.clone())
                    .ok_or_else(|| {
                        AppError::Database(anyhow::anyhow!(
                            "Expense {} references missing roommate {}",
                            expense.id,
                            expense.roommate_id
                        ))
                    })?;
                Ok(ExpenseRecord {
                    expense,
                    payer_name,
                })
            })
            .collect()
    }

    /// Total paid per roommate; zero for roommates with no expenses.
    pub async fn total_paid(&self) -> Result<Vec<(String, Cents)>, AppError> {
        Ok(self.repo.total_paid_per_roommate().await?)
    }

    // ========================
    // Settlement
    // ========================

    /// Recompute the equal-split settlement from the current ledger state.
    pub async fn settle(&self) -> Result<Settlement, AppError> {
        let totals = self.repo.total_paid_per_roommate().await?;
        compute_settlement(&totals).map_err(|err| match err {
            SettlementError::NoRoommates => AppError::NoRoommates,
        })
    }
}
