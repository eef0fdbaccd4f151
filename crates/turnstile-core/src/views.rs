//! Per-day profile view counter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Count of profile views for one user on one calendar date.
///
/// At most one row exists per `(user_id, date)`; the count only ever grows
/// within a day. This sits outside the credit ledger and is used for rate
/// observation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileViewCounter {
    /// The viewed user.
    pub user_id: UserId,

    /// The calendar date the views were counted on.
    pub date: NaiveDate,

    /// Number of views so far that day.
    pub count: u64,
}

impl ProfileViewCounter {
    /// Create a counter for the first view of the day.
    #[must_use]
    pub const fn first(user_id: UserId, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            count: 1,
        }
    }
}
