//! Core types for turnstile.
//!
//! This crate provides the foundational types used throughout the turnstile
//! access-control and metering library:
//!
//! - **Identifiers**: `UserId`, `HistoryId`
//! - **Accounts**: `Account` with its credit balance and blocked flag
//! - **Audit**: `HistoryRecord`, `RecordOutcome`, `BlockEntry`
//! - **Gating**: `GateDecision`, `Membership`
//! - **Time**: the injectable `Clock` abstraction
//!
//! # Credit Unit
//!
//! **1 credit = one metered action.**
//!
//! - New accounts start with 5 credits
//! - The daily grant adds 10 credits at most once per calendar day
//! - Stored as `i64` so administrative adjustments never saturate

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod clock;
pub mod gate;
pub mod history;
pub mod ids;
pub mod moderation;
pub mod views;

pub use account::{Account, DAILY_GRANT_CREDITS, DEFAULT_CREDITS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{GateDecision, Membership};
pub use history::{HistoryRecord, RecordOutcome};
pub use ids::{HistoryId, IdError, UserId};
pub use moderation::BlockEntry;
pub use views::ProfileViewCounter;
