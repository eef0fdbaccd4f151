//! Append-only usage audit trail.

use std::sync::Arc;

use turnstile_core::{HistoryRecord, RecordOutcome, UserId};
use turnstile_store::{Result, Store};

/// Records metered action attempts for audit and analytics.
///
/// The trail is write-once: records are never edited or removed, and nothing
/// in the gating or ledger paths reads them back to make decisions.
#[derive(Clone)]
pub struct HistoryRecorder {
    store: Arc<dyn Store>,
}

impl HistoryRecorder {
    /// Create a recorder over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Append one record with a server-assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn record(
        &self,
        user_id: UserId,
        query: impl Into<String>,
        api_type: impl Into<String>,
        outcome: RecordOutcome,
    ) -> Result<()> {
        let record = HistoryRecord::new(user_id, query, api_type, outcome);
        self.store.append_history(&record)?;
        tracing::debug!(
            user_id = %user_id,
            api_type = %record.api_type,
            outcome = ?outcome,
            "usage recorded"
        );
        Ok(())
    }

    /// A user's records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn recent(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<HistoryRecord>> {
        self.store.list_history(user_id, limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use turnstile_store::RocksStore;

    fn recorder() -> (HistoryRecorder, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        (HistoryRecorder::new(store), dir)
    }

    #[test]
    fn records_carry_the_outcome() {
        let (recorder, _dir) = recorder();
        let user = UserId::new(42);

        recorder
            .record(user, "DL01AB1234", "vehicle", RecordOutcome::Refunded)
            .unwrap();

        let records = recorder.recent(user, 10, 0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].api_type, "vehicle");
        assert_eq!(records[0].outcome, RecordOutcome::Refunded);
    }
}
