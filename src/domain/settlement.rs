use super::Cents;

/// Tolerance for the balances-sum-to-zero invariant. The fair share is the only
/// floating-point quantity in the system, so drift stays far below this.
pub const BALANCE_TOLERANCE: f64 = 1e-6;

/// One roommate's position relative to an equal split.
#[derive(Debug, Clone, PartialEq)]
pub struct RoommateBalance {
    pub name: String,
    /// Total the roommate has paid into the pool.
    pub paid_cents: Cents,
    /// Fair share minus paid, in fractional cents.
    /// Positive: still owes the pool. Negative: is owed money back.
    pub balance_cents: f64,
}

/// Result of an equal-split settlement over the whole ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// Sum of every expense ever recorded.
    pub total_cents: Cents,
    /// `total / roommate count`, in fractional cents.
    pub fair_share_cents: f64,
    /// One entry per roommate, in roommate insertion order.
    pub balances: Vec<RoommateBalance>,
}

/// Compute the equal-split settlement from per-roommate payment totals,
/// as produced by the store's aggregate query (one entry per roommate,
/// zero for roommates who paid nothing).
///
/// Stateless: recomputed from scratch after every mutation.
pub fn compute_settlement(totals: &[(String, Cents)]) -> Result<Settlement, SettlementError> {
    if totals.is_empty() {
        return Err(SettlementError::NoRoommates);
    }

    let total_cents: Cents = totals.iter().map(|(_, paid)| paid).sum();
    let fair_share_cents = total_cents as f64 / totals.len() as f64;

    let balances = totals
        .iter()
        .map(|(name, paid)| RoommateBalance {
            name: name.clone(),
            paid_cents: *paid,
            balance_cents: fair_share_cents - *paid as f64,
        })
        .collect();

    Ok(Settlement {
        total_cents,
        fair_share_cents,
        balances,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// Settlement requested with zero roommates. The equal share of nobody is
    /// undefined, so this is rejected rather than answered with an empty table.
    NoRoommates,
}

impl std::fmt::Display for SettlementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementError::NoRoommates => {
                write!(f, "no roommates yet, add one before settling")
            }
        }
    }
}

impl std::error::Error for SettlementError {}
