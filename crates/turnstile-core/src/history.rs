//! Audit history types for turnstile.
//!
//! History records are append-only: they are written once per metered action
//! attempt and never edited or removed. They exist for audit and analytics
//! only and are never consulted for gating decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{HistoryId, UserId};

/// One immutable usage record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Time-ordered surrogate key.
    pub id: HistoryId,

    /// The user who made the request.
    pub user_id: UserId,

    /// Free text of what was requested.
    pub query: String,

    /// Which feature handled the request.
    pub api_type: String,

    /// How the attempt ended.
    pub outcome: RecordOutcome,

    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Create a record with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(
        user_id: UserId,
        query: impl Into<String>,
        api_type: impl Into<String>,
        outcome: RecordOutcome,
    ) -> Self {
        Self {
            id: HistoryId::generate(),
            user_id,
            query: query.into(),
            api_type: api_type.into(),
            outcome,
            recorded_at: Utc::now(),
        }
    }
}

/// How a metered action attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The downstream feature call succeeded.
    Success,

    /// The downstream feature call failed; no credit was spent.
    Failed,

    /// The downstream feature call failed after a successful debit and the
    /// credit was returned.
    Refunded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_outcome() {
        let record = HistoryRecord::new(
            UserId::new(42),
            "110001",
            "pincode",
            RecordOutcome::Success,
        );
        assert_eq!(record.user_id, UserId::new(42));
        assert_eq!(record.query, "110001");
        assert_eq!(record.outcome, RecordOutcome::Success);
    }

    #[test]
    fn outcome_serde_snake_case() {
        let json = serde_json::to_string(&RecordOutcome::Refunded).unwrap();
        assert_eq!(json, "\"refunded\"");
    }
}
