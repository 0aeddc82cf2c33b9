use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cents, RoommateId};

pub type ExpenseId = i64;

/// A single payment made by one roommate into the shared pool.
/// Expenses are immutable once recorded - there is no edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// The roommate who paid.
    pub roommate_id: RoommateId,
    /// Amount in cents, always positive.
    pub amount_cents: Cents,
    pub recorded_at: DateTime<Utc>,
}
