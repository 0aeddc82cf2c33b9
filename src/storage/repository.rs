use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{Cents, Expense, Roommate, RoommateId};

/// Repository for persisting and querying roommates and expenses.
/// Owns the database handle; no other component touches the tables.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(super::MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Roommate operations
    // ========================

    /// Insert a new roommate and return it with its assigned id.
    /// The UNIQUE constraint on name is the last line of defense; callers
    /// check for duplicates first to report them cleanly.
    pub async fn save_roommate(&self, name: &str, created_at: DateTime<Utc>) -> Result<Roommate> {
        let row = sqlx::query(
            r#"
            INSERT INTO roommates (name, created_at)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .context("Failed to save roommate")?;

        Ok(Roommate {
            id: row.get("id"),
            name: name.to_string(),
            created_at,
        })
    }

    /// Get a roommate by name (case-sensitive exact match).
    pub async fn get_roommate_by_name(&self, name: &str) -> Result<Option<Roommate>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM roommates
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch roommate by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_roommate(&row)?)),
            None => Ok(None),
        }
    }

    /// List all roommates in insertion order.
    pub async fn list_roommates(&self) -> Result<Vec<Roommate>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM roommates ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list roommates")?;

        rows.iter().map(Self::row_to_roommate).collect()
    }

    // ========================
    // Expense operations
    // ========================

    /// Insert a new expense and return it with its assigned id.
    pub async fn save_expense(
        &self,
        roommate_id: RoommateId,
        amount_cents: Cents,
        recorded_at: DateTime<Utc>,
    ) -> Result<Expense> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (roommate_id, amount_cents, recorded_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(roommate_id)
        .bind(amount_cents)
        .bind(recorded_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .context("Failed to save expense")?;

        Ok(Expense {
            id: row.get("id"),
            roommate_id,
            amount_cents,
            recorded_at,
        })
    }

    /// List all expenses in insertion order.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, roommate_id, amount_cents, recorded_at
            FROM expenses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Total paid per roommate, computed in SQL. Every roommate appears,
    /// with 0 for those who never paid anything. Insertion order.
    pub async fn total_paid_per_roommate(&self) -> Result<Vec<(String, Cents)>> {
        let rows = sqlx::query(
            r#"
            SELECT r.name, COALESCE(SUM(e.amount_cents), 0) as paid
            FROM roommates r
            LEFT JOIN expenses e ON r.id = e.roommate_id
            GROUP BY r.id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to total expenses per roommate")?;

        Ok(rows
            .iter()
            .map(|row| (row.get("name"), row.get("paid")))
            .collect())
    }

    fn row_to_roommate(row: &sqlx::sqlite::SqliteRow) -> Result<Roommate> {
        let created_at_str: String = row.get("created_at");

        Ok(Roommate {
            id: row.get("id"),
            name: row.get("name"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Expense {
            id: row.get("id"),
            roommate_id: row.get("roommate_id"),
            amount_cents: row.get("amount_cents"),
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
