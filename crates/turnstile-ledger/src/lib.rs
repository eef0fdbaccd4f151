//! Credit ledger managers for turnstile.
//!
//! This crate owns the business semantics over the storage layer:
//!
//! - [`AccountManager`] — credit balance operations (init, daily grant,
//!   debit, refund, administrative adjustment, blocked-flag read)
//! - [`HistoryRecorder`] — append-only usage audit trail
//! - [`ModerationRegistry`] — block/unblock with audit entries
//! - [`ProfileViews`] — per-day view counters
//!
//! Each manager is an explicit handle over an injected [`Store`] (and
//! [`Clock`](turnstile_core::Clock) where calendar dates are involved),
//! constructed at startup and passed to callers; there is no global state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use turnstile_core::{SystemClock, UserId};
//! use turnstile_ledger::AccountManager;
//! use turnstile_store::RocksStore;
//!
//! let store = Arc::new(RocksStore::open("/tmp/turnstile-db").unwrap());
//! let accounts = AccountManager::new(store, Arc::new(SystemClock));
//!
//! let user = UserId::new(42);
//! accounts.ensure_account(user).unwrap();
//! accounts.grant_daily_if_due(user).unwrap();
//! if accounts.debit_one(user).unwrap() {
//!     // run the metered action; call refund_one on downstream failure
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accounts;
pub mod history;
pub mod moderation;
pub mod views;

pub use accounts::AccountManager;
pub use history::HistoryRecorder;
pub use moderation::ModerationRegistry;
pub use views::ProfileViews;

pub use turnstile_store::{Result, Store, StoreError};
