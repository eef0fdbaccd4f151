//! Gating decision types.

use serde::{Deserialize, Serialize};

/// Terminal state of one gate evaluation.
///
/// Every action request resolves to exactly one of these before a metered
/// feature may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// The request may proceed to the debit step.
    Allowed,

    /// The requester is not a member of the gating channel. Callers present
    /// a join prompt; re-verification re-runs the gate.
    DeniedNotMember,

    /// The requester is blocked by moderation.
    DeniedBlocked,
}

impl GateDecision {
    /// Whether the request may proceed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Result of asking the external membership collaborator about a user.
///
/// `CheckFailed` is distinct from `NotMember` so callers can tell a confirmed
/// non-member apart from an unavailable check when logging, even though the
/// gate denies both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// The user is a member (or admin/creator) of the gating channel.
    Member,

    /// The user is confirmed not to be a member.
    NotMember,

    /// The check could not be completed (timeout, network, API error).
    CheckFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_allowed_proceeds() {
        assert!(GateDecision::Allowed.is_allowed());
        assert!(!GateDecision::DeniedNotMember.is_allowed());
        assert!(!GateDecision::DeniedBlocked.is_allowed());
    }
}
