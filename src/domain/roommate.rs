use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SQLite rowid of a roommate. Lookups from user input go by name; the id only
/// ties expenses back to their payer.
pub type RoommateId = i64;

/// A participant in the shared-expense pool.
/// Roommates are append-only: never renamed, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roommate {
    pub id: RoommateId,
    /// Unique within the household, case-sensitive.
    pub name: String,
    pub created_at: DateTime<Utc>,
}
