//! Moderation audit types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Audit row for a block action.
///
/// One entry per user that is or has been blocked. The entry is the audit
/// source of truth; `Account::is_blocked` is the fast-path read. Unblocking
/// keeps the entry so the history of having been blocked is not erased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    /// The blocked user.
    pub user_id: UserId,

    /// The moderator who issued the block.
    pub blocked_by: UserId,

    /// Why the user was blocked.
    pub reason: String,

    /// When the block was issued (refreshed on re-block).
    pub blocked_at: DateTime<Utc>,
}

impl BlockEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, blocked_by: UserId, reason: impl Into<String>) -> Self {
        Self {
            user_id,
            blocked_by,
            reason: reason.into(),
            blocked_at: Utc::now(),
        }
    }
}
