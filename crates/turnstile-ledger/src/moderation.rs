//! Block/unblock moderation layer.

use std::sync::Arc;

use turnstile_core::{BlockEntry, UserId};
use turnstile_store::{Result, Store, StoreError};

/// Tracks block and unblock actions.
///
/// The audit entry is the source of truth for who blocked whom and why; the
/// account's `is_blocked` flag is the fast-path read the gate consults.
#[derive(Clone)]
pub struct ModerationRegistry {
    store: Arc<dyn Store>,
}

impl ModerationRegistry {
    /// Create a registry over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Block a user.
    ///
    /// Idempotent: re-blocking refreshes actor, reason, and timestamp. The
    /// account row is created if the user has never interacted before, so a
    /// block always sticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn block(
        &self,
        user_id: UserId,
        blocked_by: UserId,
        reason: impl Into<String>,
    ) -> Result<()> {
        let entry = BlockEntry::new(user_id, blocked_by, reason);
        self.store.ensure_account(user_id)?;
        self.store.upsert_block(&entry)?;
        self.store.set_blocked(user_id, true)?;
        tracing::info!(
            user_id = %user_id,
            blocked_by = %blocked_by,
            reason = %entry.reason,
            "user blocked"
        );
        Ok(())
    }

    /// Unblock a user.
    ///
    /// The audit entry is retained; only the account flag is cleared.
    /// Unblocking a user with no account (or one who was never blocked) is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn unblock(&self, user_id: UserId) -> Result<()> {
        match self.store.set_blocked(user_id, false) {
            Ok(()) => {
                tracing::info!(user_id = %user_id, "user unblocked");
                Ok(())
            }
            Err(StoreError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// The moderation audit entry for a user, if one was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn entry(&self, user_id: UserId) -> Result<Option<BlockEntry>> {
        self.store.get_block(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use turnstile_store::RocksStore;

    fn registry() -> (ModerationRegistry, Arc<RocksStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        (ModerationRegistry::new(store.clone()), store, dir)
    }

    #[test]
    fn block_is_idempotent_and_refreshes_the_entry() {
        let (registry, store, _dir) = registry();
        let user = UserId::new(42);
        let admin = UserId::new(1);

        registry.block(user, admin, "spam").unwrap();
        registry.block(user, admin, "ban evasion").unwrap();

        assert!(store.get_account(user).unwrap().unwrap().is_blocked);
        assert_eq!(registry.entry(user).unwrap().unwrap().reason, "ban evasion");
    }

    #[test]
    fn block_creates_the_account_for_unseen_users() {
        let (registry, store, _dir) = registry();
        let user = UserId::new(42);

        registry.block(user, UserId::new(1), "preemptive").unwrap();
        assert!(store.get_account(user).unwrap().unwrap().is_blocked);
    }

    #[test]
    fn unblock_clears_the_flag_but_keeps_the_audit_entry() {
        let (registry, store, _dir) = registry();
        let user = UserId::new(42);

        registry.block(user, UserId::new(1), "spam").unwrap();
        registry.unblock(user).unwrap();

        assert!(!store.get_account(user).unwrap().unwrap().is_blocked);
        assert_eq!(registry.entry(user).unwrap().unwrap().reason, "spam");
    }

    #[test]
    fn unblock_of_unseen_user_is_a_noop() {
        let (registry, _store, _dir) = registry();
        registry.unblock(UserId::new(404)).unwrap();
    }
}
