//! Per-day profile view counting.

use std::sync::Arc;

use turnstile_core::{Clock, UserId};
use turnstile_store::{Result, Store};

/// Counts profile views per user per calendar day.
///
/// Sits beside the credit ledger, not inside it: views observe request rates
/// and never influence balances or gating.
#[derive(Clone)]
pub struct ProfileViews {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl ProfileViews {
    /// Create a counter over the given store and clock.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Count one view for today and return the new total.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn bump(&self, user_id: UserId) -> Result<u64> {
        self.store.bump_profile_view(user_id, self.clock.today())
    }

    /// Today's view count; 0 when the user has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn today(&self, user_id: UserId) -> Result<u64> {
        self.store.get_profile_views(user_id, self.clock.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use turnstile_core::ManualClock;
    use turnstile_store::RocksStore;

    #[test]
    fn counts_reset_at_day_rollover() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        let clock = Arc::new(ManualClock::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        ));
        let views = ProfileViews::new(store, clock.clone());
        let user = UserId::new(42);

        assert_eq!(views.bump(user).unwrap(), 1);
        assert_eq!(views.bump(user).unwrap(), 2);
        assert_eq!(views.today(user).unwrap(), 2);

        clock.advance(1);
        assert_eq!(views.today(user).unwrap(), 0);
        assert_eq!(views.bump(user).unwrap(), 1);
    }
}
