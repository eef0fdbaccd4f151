//! The gate state machine.

use turnstile_core::{GateDecision, Membership, UserId};
use turnstile_ledger::AccountManager;
use turnstile_store::Result;

use crate::checker::MembershipChecker;

/// Decides whether a metered action may proceed for a user.
///
/// Evaluation order: administrator bypass, then the moderation flag, then the
/// external membership check. The gate reads state but never mutates it, so
/// re-verification is simply another [`evaluate`](Self::evaluate) call.
pub struct MembershipGate<C> {
    checker: C,
    accounts: AccountManager,
    admin_id: UserId,
}

impl<C: MembershipChecker> MembershipGate<C> {
    /// Create a gate over the given checker and account manager.
    #[must_use]
    pub fn new(checker: C, accounts: AccountManager, admin_id: UserId) -> Self {
        Self {
            checker,
            accounts,
            admin_id,
        }
    }

    /// Resolve one action request to a terminal decision.
    ///
    /// The membership call runs without any ledger lock held; a check that
    /// cannot be completed is logged and treated fail-closed as not-a-member
    /// rather than granting access on a transient error.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the moderation flag fails; storage faults
    /// are never folded into a denial.
    pub async fn evaluate(&self, user_id: UserId) -> Result<GateDecision> {
        if user_id == self.admin_id {
            return Ok(GateDecision::Allowed);
        }

        if self.accounts.is_blocked(user_id)? {
            return Ok(GateDecision::DeniedBlocked);
        }

        match self.checker.check(user_id).await {
            Membership::Member => Ok(GateDecision::Allowed),
            Membership::NotMember => Ok(GateDecision::DeniedNotMember),
            Membership::CheckFailed => {
                tracing::warn!(user_id = %user_id, "membership check unavailable, denying");
                Ok(GateDecision::DeniedNotMember)
            }
        }
    }
}
