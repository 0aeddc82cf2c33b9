use thiserror::Error;

/// Errors surfaced to whoever sits at the input boundary. All of these are
/// recoverable: the caller reports them and carries on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Covers both an already-taken name and an empty/whitespace-only one;
    /// the payload says which.
    #[error("Cannot add roommate: {0}")]
    DuplicateName(String),

    #[error("Unknown roommate: {0}")]
    UnknownRoommate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No roommates yet, add one before settling")]
    NoRoommates,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors caused by user input rather than a failing system.
    /// These are printed as messages at the boundary, never propagated.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}
