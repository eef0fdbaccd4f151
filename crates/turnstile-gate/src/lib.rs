//! Membership gating for turnstile.
//!
//! Every metered action must pass the [`MembershipGate`] before the ledger is
//! touched. The gate resolves each request to one of three terminal states:
//!
//! - `Allowed` — administrator bypass, or a confirmed channel member
//! - `DeniedBlocked` — the moderation flag is set
//! - `DeniedNotMember` — not a member, or the check could not be completed
//!   (fail-closed)
//!
//! The external membership lookup sits behind the [`MembershipChecker`]
//! trait; [`BotApiMembershipChecker`] is the production implementation over
//! the chat platform's Bot HTTP API with a bounded request timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use turnstile_core::{SystemClock, UserId};
//! use turnstile_gate::{BotApiMembershipChecker, GateConfig, MembershipGate};
//! use turnstile_ledger::AccountManager;
//! use turnstile_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GateConfig::from_env();
//! let store = Arc::new(RocksStore::open("/tmp/turnstile-db")?);
//! let accounts = AccountManager::new(store, Arc::new(SystemClock));
//! let checker = BotApiMembershipChecker::new(&config)?;
//! let gate = MembershipGate::new(checker, accounts, config.admin_id);
//!
//! let decision = gate.evaluate(UserId::new(42)).await?;
//! if decision.is_allowed() {
//!     // debit and run the feature handler
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bot_api;
pub mod checker;
pub mod config;
pub mod gate;

pub use bot_api::{BotApiMembershipChecker, ChatMemberStatus, CheckerError};
pub use checker::MembershipChecker;
pub use config::GateConfig;
pub use gate::MembershipGate;

pub use turnstile_core::{GateDecision, Membership};
