//! Error types for turnstile storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    ///
    /// Account creation is caller-driven: mutating an account that was never
    /// `ensure_account`ed surfaces as this, never as a silent no-op.
    #[error("not found")]
    NotFound,

    /// The adjustment would drive the balance negative.
    ///
    /// A normal denial, not a fault: state is left untouched.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance.
        balance: i64,
        /// Credits the operation needed.
        required: i64,
    },
}
