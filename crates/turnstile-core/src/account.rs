//! Account types for turnstile.
//!
//! This module defines the per-user account row that the credit ledger
//! operates on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Credits a freshly created account starts with.
pub const DEFAULT_CREDITS: i64 = 5;

/// Credits added by the daily grant, at most once per calendar day.
pub const DAILY_GRANT_CREDITS: i64 = 10;

/// A metering account for a user.
///
/// The account tracks the spendable credit balance, the date of the last
/// daily grant, and the moderation flag. Accounts are created on first
/// contact and never deleted; moderation uses the soft `is_blocked` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The user this account belongs to.
    pub user_id: UserId,

    /// Current credit balance.
    ///
    /// Invariant: never negative at rest. Only the administrative
    /// `set_balance` escape hatch can persist a value that violates this.
    pub credits: i64,

    /// Calendar date on which the daily grant was last applied.
    ///
    /// `None` until the first grant.
    pub last_credit_date: Option<NaiveDate>,

    /// Whether the user is blocked by moderation.
    pub is_blocked: bool,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with the default starting balance.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            credits: DEFAULT_CREDITS,
            last_credit_date: None,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the account can afford one metered action.
    #[must_use]
    pub const fn has_credit(&self) -> bool {
        self.credits >= 1
    }

    /// Check whether the daily grant is due on the given date.
    #[must_use]
    pub fn grant_due(&self, today: NaiveDate) -> bool {
        self.last_credit_date != Some(today)
    }
}
