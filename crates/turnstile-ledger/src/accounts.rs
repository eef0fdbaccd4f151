//! Credit balance semantics.

use std::sync::Arc;

use turnstile_core::{Clock, UserId, DAILY_GRANT_CREDITS};
use turnstile_store::{Result, Store};

/// Owns all credit-balance operations.
///
/// Every mutation is a single atomic storage operation; the manager never
/// composes a read with a later write. The injected clock is the only source
/// of "today" for the daily grant, so all calls within one process day agree.
#[derive(Clone)]
pub struct AccountManager {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl AccountManager {
    /// Create a manager over the given store and clock.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Create the account with the default balance if absent. Idempotent.
    ///
    /// Creation is caller-driven: invoke this at first contact, before any
    /// grant or debit for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn ensure_account(&self, user_id: UserId) -> Result<()> {
        self.store.ensure_account(user_id)
    }

    /// Current balance; 0 for unknown users, without creating a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn balance(&self, user_id: UserId) -> Result<i64> {
        Ok(self.store.get_account(user_id)?.map_or(0, |a| a.credits))
    }

    /// Administrative overwrite of the balance. Accepts any integer.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown users.
    pub fn set_balance(&self, user_id: UserId, credits: i64) -> Result<()> {
        self.store.set_balance(user_id, credits)?;
        tracing::info!(user_id = %user_id, credits, "balance overridden");
        Ok(())
    }

    /// Atomically add `delta` to the balance and return the result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown users and
    /// `StoreError::InsufficientCredits` if the result would be negative.
    pub fn adjust_balance(&self, user_id: UserId, delta: i64) -> Result<i64> {
        let balance = self.store.adjust_balance(user_id, delta)?;
        tracing::info!(user_id = %user_id, delta, balance, "balance adjusted");
        Ok(balance)
    }

    /// Spend one credit if the balance allows it.
    ///
    /// Returns `false` without mutating state when the balance is below 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn debit_one(&self, user_id: UserId) -> Result<bool> {
        self.store.debit_one(user_id)
    }

    /// Return one credit after a downstream failure.
    ///
    /// The ledger does not auto-refund: only the caller knows whether the
    /// action that followed a successful debit actually failed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown users.
    pub fn refund_one(&self, user_id: UserId) -> Result<()> {
        self.store.refund_one(user_id)?;
        tracing::info!(user_id = %user_id, "credit refunded");
        Ok(())
    }

    /// Apply the daily grant if it has not been applied today.
    ///
    /// Returns `true` when credits were granted. Idempotent per calendar day
    /// and race-safe: at most one grant per user per day.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown users.
    pub fn grant_daily_if_due(&self, user_id: UserId) -> Result<bool> {
        let today = self.clock.today();
        let granted = self.store.grant_daily(user_id, today, DAILY_GRANT_CREDITS)?;
        if granted {
            tracing::info!(user_id = %user_id, %today, "daily credits granted");
        }
        Ok(granted)
    }

    /// Whether the user is blocked. Unknown users are not blocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn is_blocked(&self, user_id: UserId) -> Result<bool> {
        Ok(self
            .store
            .get_account(user_id)?
            .is_some_and(|a| a.is_blocked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use turnstile_core::{ManualClock, DEFAULT_CREDITS};
    use turnstile_store::RocksStore;

    fn manager_at(date: NaiveDate) -> (AccountManager, Arc<ManualClock>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        let clock = Arc::new(ManualClock::new(date));
        (AccountManager::new(store, clock.clone()), clock, dir)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn balance_is_zero_for_unknown_users() {
        let (accounts, _clock, _dir) = manager_at(day(2025, 6, 2));
        assert_eq!(accounts.balance(UserId::new(404)).unwrap(), 0);
        // Reading must not have created a row.
        assert!(!accounts.debit_one(UserId::new(404)).unwrap());
    }

    #[test]
    fn grant_applies_once_per_clock_day() {
        let (accounts, clock, _dir) = manager_at(day(2025, 6, 2));
        let user = UserId::new(42);
        accounts.ensure_account(user).unwrap();

        assert!(accounts.grant_daily_if_due(user).unwrap());
        assert!(!accounts.grant_daily_if_due(user).unwrap());
        assert_eq!(
            accounts.balance(user).unwrap(),
            DEFAULT_CREDITS + DAILY_GRANT_CREDITS
        );

        clock.advance(1);
        assert!(accounts.grant_daily_if_due(user).unwrap());
        assert_eq!(
            accounts.balance(user).unwrap(),
            DEFAULT_CREDITS + 2 * DAILY_GRANT_CREDITS
        );
    }

    #[test]
    fn unknown_users_are_not_blocked() {
        let (accounts, _clock, _dir) = manager_at(day(2025, 6, 2));
        assert!(!accounts.is_blocked(UserId::new(404)).unwrap());
    }
}
