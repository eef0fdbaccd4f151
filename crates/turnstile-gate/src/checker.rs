//! The external membership-check seam.

use async_trait::async_trait;

use turnstile_core::{Membership, UserId};

/// Asks the external collaborator whether a user belongs to the gating
/// channel.
///
/// Implementations must be fail-distinguished, not fail-silent: transport
/// problems surface as [`Membership::CheckFailed`] rather than masquerading
/// as a confirmed non-member. The gate denies both, but logs them apart.
///
/// Implementations may block on network I/O and must bound that wait with a
/// timeout; they are never called while a ledger lock is held.
#[async_trait]
pub trait MembershipChecker: Send + Sync {
    /// Current membership of `user_id` in the gating channel.
    async fn check(&self, user_id: UserId) -> Membership;
}
