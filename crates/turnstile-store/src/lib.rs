//! `RocksDB` ledger storage for turnstile.
//!
//! This crate provides persistent storage for accounts, usage history,
//! moderation entries, and per-day view counters using `RocksDB` with column
//! families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `accounts`: Primary account records, keyed by `user_id`
//! - `history`: Usage records, keyed by `history_id` (ULID)
//! - `history_by_user`: Index for listing a user's records
//! - `blocks`: Moderation audit rows, keyed by `user_id`
//! - `profile_views`: Per-day view counters, keyed by `user_id || date`
//!
//! # Atomicity
//!
//! Balance mutations are check-and-set operations serialized per user by an
//! internal lock table: two concurrent debits racing on the last credit
//! resolve to exactly one success, while unrelated users never contend.
//!
//! # Example
//!
//! ```no_run
//! use turnstile_store::{RocksStore, Store};
//! use turnstile_core::UserId;
//!
//! let store = RocksStore::open("/tmp/turnstile-db").unwrap();
//!
//! let user_id = UserId::new(42);
//! store.ensure_account(user_id).unwrap();
//! assert!(store.debit_one(user_id).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use chrono::NaiveDate;

use turnstile_core::{Account, BlockEntry, HistoryRecord, UserId};

/// The storage trait defining all ledger operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing). It is the only
/// component that touches durable state; managers above it never bypass it.
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Create the account with the default balance if it does not exist.
    ///
    /// Idempotent: a no-op when the account is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn ensure_account(&self, user_id: UserId) -> Result<()>;

    /// Get an account by user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, user_id: UserId) -> Result<Option<Account>>;

    /// Overwrite the balance unconditionally.
    ///
    /// Administrative escape hatch: any integer is accepted, including
    /// negative ones. Callers are responsible for the non-negative invariant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn set_balance(&self, user_id: UserId, credits: i64) -> Result<()>;

    /// Atomically add `delta` (positive or negative) to the balance.
    ///
    /// Returns the new balance. An adjustment that would end below zero fails
    /// with `StoreError::InsufficientCredits` and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn adjust_balance(&self, user_id: UserId, delta: i64) -> Result<i64>;

    /// Atomically check-and-decrement one credit.
    ///
    /// Returns `true` and debits only if the current balance is at least 1;
    /// otherwise returns `false` without mutating state. An unknown user is
    /// treated as a zero balance, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn debit_one(&self, user_id: UserId) -> Result<bool>;

    /// Unconditionally return one credit.
    ///
    /// Used to reverse a debit whose downstream action failed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn refund_one(&self, user_id: UserId) -> Result<()>;

    /// Apply the daily grant if `last_credit_date` differs from `today`.
    ///
    /// Adds `amount` and stamps `today`, returning `true`; returns `false`
    /// without change when the grant was already applied on `today`. At most
    /// one grant per user per day, even under concurrent invocations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn grant_daily(&self, user_id: UserId, today: NaiveDate, amount: i64) -> Result<bool>;

    /// Set the moderation flag on the account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn set_blocked(&self, user_id: UserId, blocked: bool) -> Result<()>;

    // =========================================================================
    // History Operations
    // =========================================================================

    /// Append one immutable history record.
    ///
    /// The record and its user index entry are written in a single atomic
    /// batch. Records are never edited or removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn append_history(&self, record: &HistoryRecord) -> Result<()>;

    /// List history records for a user, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_history(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<HistoryRecord>>;

    // =========================================================================
    // Moderation Operations
    // =========================================================================

    /// Insert or refresh the moderation audit row for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn upsert_block(&self, entry: &BlockEntry) -> Result<()>;

    /// Get the moderation audit row for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_block(&self, user_id: UserId) -> Result<Option<BlockEntry>>;

    // =========================================================================
    // Profile View Operations
    // =========================================================================

    /// Increment the view counter for `(user_id, date)` and return the new
    /// count. Creates the row on the first view of the day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn bump_profile_view(&self, user_id: UserId, date: NaiveDate) -> Result<u64>;

    /// Current view count for `(user_id, date)`; 0 when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_profile_views(&self, user_id: UserId, date: NaiveDate) -> Result<u64>;
}
