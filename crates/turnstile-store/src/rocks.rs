//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use turnstile_core::{Account, BlockEntry, HistoryRecord, ProfileViewCounter, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// Per-user mutations run under an entry in the lock table, which serializes
/// conflicting writes for one user while leaving other users uncontended.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    user_locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            user_locks: DashMap::new(),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Get the mutation lock for a user.
    fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read an account row without taking the user lock.
    fn read_account(&self, user_id: UserId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        self.db
            .get_cf(&cf, keys::account_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Write an account row.
    fn write_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let value = Self::serialize(account)?;
        self.db
            .put_cf(&cf, keys::account_key(account.user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Run a closure over the existing account row under the user lock and
    /// persist the result.
    fn mutate_account<F, T>(&self, user_id: UserId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Account) -> Result<T>,
    {
        let lock = self.user_lock(user_id);
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Database("user lock poisoned".into()))?;

        let mut account = self.read_account(user_id)?.ok_or(StoreError::NotFound)?;
        let out = f(&mut account)?;
        account.updated_at = Utc::now();
        self.write_account(&account)?;
        Ok(out)
    }

    /// Read a history record by id.
    fn read_history(&self, key: [u8; 16]) -> Result<Option<HistoryRecord>> {
        let cf = self.cf(cf::HISTORY)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn ensure_account(&self, user_id: UserId) -> Result<()> {
        let lock = self.user_lock(user_id);
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Database("user lock poisoned".into()))?;

        if self.read_account(user_id)?.is_none() {
            self.write_account(&Account::new(user_id))?;
            tracing::debug!(user_id = %user_id, "account created");
        }
        Ok(())
    }

    fn get_account(&self, user_id: UserId) -> Result<Option<Account>> {
        self.read_account(user_id)
    }

    fn set_balance(&self, user_id: UserId, credits: i64) -> Result<()> {
        self.mutate_account(user_id, |account| {
            account.credits = credits;
            Ok(())
        })
    }

    fn adjust_balance(&self, user_id: UserId, delta: i64) -> Result<i64> {
        self.mutate_account(user_id, |account| {
            let next = account.credits + delta;
            if next < 0 {
                return Err(StoreError::InsufficientCredits {
                    balance: account.credits,
                    required: -delta,
                });
            }
            account.credits = next;
            Ok(next)
        })
    }

    fn debit_one(&self, user_id: UserId) -> Result<bool> {
        let lock = self.user_lock(user_id);
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Database("user lock poisoned".into()))?;

        // Unknown user reads as a zero balance, a denial rather than a fault.
        let Some(mut account) = self.read_account(user_id)? else {
            return Ok(false);
        };
        if !account.has_credit() {
            return Ok(false);
        }

        account.credits -= 1;
        account.updated_at = Utc::now();
        self.write_account(&account)?;
        Ok(true)
    }

    fn refund_one(&self, user_id: UserId) -> Result<()> {
        self.mutate_account(user_id, |account| {
            account.credits += 1;
            Ok(())
        })
    }

    fn grant_daily(&self, user_id: UserId, today: NaiveDate, amount: i64) -> Result<bool> {
        let lock = self.user_lock(user_id);
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Database("user lock poisoned".into()))?;

        let mut account = self.read_account(user_id)?.ok_or(StoreError::NotFound)?;
        // Already granted today: return without touching the row.
        if !account.grant_due(today) {
            return Ok(false);
        }

        account.credits += amount;
        account.last_credit_date = Some(today);
        account.updated_at = Utc::now();
        self.write_account(&account)?;
        Ok(true)
    }

    fn set_blocked(&self, user_id: UserId, blocked: bool) -> Result<()> {
        self.mutate_account(user_id, |account| {
            account.is_blocked = blocked;
            Ok(())
        })
    }

    // =========================================================================
    // History Operations
    // =========================================================================

    fn append_history(&self, record: &HistoryRecord) -> Result<()> {
        let cf_history = self.cf(cf::HISTORY)?;
        let cf_by_user = self.cf(cf::HISTORY_BY_USER)?;

        let record_key = keys::history_key(record.id);
        let user_key = keys::user_history_key(record.user_id, record.id);
        let value = Self::serialize(record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_history, record_key, &value);
        batch.put_cf(&cf_by_user, &user_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_history(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<HistoryRecord>> {
        let cf_by_user = self.cf(cf::HISTORY_BY_USER)?;
        let prefix = keys::user_history_prefix(user_id);

        let iter = self.db.iterator_cf(
            &cf_by_user,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULIDs are time-ordered, so the index iterates oldest first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        // Reverse to get newest first.
        all_keys.reverse();

        let mut records = Vec::new();
        for key in all_keys.into_iter().skip(offset) {
            if records.len() >= limit {
                break;
            }

            let id = keys::extract_history_id_from_user_key(&key);
            if let Some(record) = self.read_history(keys::history_key(id))? {
                records.push(record);
            }
        }

        Ok(records)
    }

    // =========================================================================
    // Moderation Operations
    // =========================================================================

    fn upsert_block(&self, entry: &BlockEntry) -> Result<()> {
        let cf = self.cf(cf::BLOCKS)?;
        let value = Self::serialize(entry)?;

        self.db
            .put_cf(&cf, keys::block_key(entry.user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_block(&self, user_id: UserId) -> Result<Option<BlockEntry>> {
        let cf = self.cf(cf::BLOCKS)?;
        self.db
            .get_cf(&cf, keys::block_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Profile View Operations
    // =========================================================================

    fn bump_profile_view(&self, user_id: UserId, date: NaiveDate) -> Result<u64> {
        let lock = self.user_lock(user_id);
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Database("user lock poisoned".into()))?;

        let cf = self.cf(cf::PROFILE_VIEWS)?;
        let key = keys::profile_view_key(user_id, date);

        let counter = match self
            .db
            .get_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<ProfileViewCounter>(&data))
            .transpose()?
        {
            Some(mut counter) => {
                counter.count += 1;
                counter
            }
            None => ProfileViewCounter::first(user_id, date),
        };
        let value = Self::serialize(&counter)?;
        self.db
            .put_cf(&cf, &key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(counter.count)
    }

    fn get_profile_views(&self, user_id: UserId, date: NaiveDate) -> Result<u64> {
        let cf = self.cf(cf::PROFILE_VIEWS)?;
        let counter: Option<ProfileViewCounter> = self
            .db
            .get_cf(&cf, keys::profile_view_key(user_id, date))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()?;

        Ok(counter.map_or(0, |c| c.count))
    }
}
