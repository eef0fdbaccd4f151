//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. User keys are fixed-width big-endian so that all of a
//! user's index entries share an 8-byte prefix.

use chrono::NaiveDate;

use turnstile_core::{HistoryId, UserId};

/// Create an account key from a user ID.
#[must_use]
pub fn account_key(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Create a moderation entry key from a user ID.
#[must_use]
pub fn block_key(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Create a history record key from a history ID.
#[must_use]
pub fn history_key(id: HistoryId) -> [u8; 16] {
    id.to_bytes()
}

/// Create a user-history index key.
///
/// Format: `user_id (8 bytes) || history_id (16 bytes)`
///
/// Since ULIDs are time-ordered, a user's records sort by creation time.
#[must_use]
pub fn user_history_key(user_id: UserId, id: HistoryId) -> Vec<u8> {
    let mut key = Vec::with_capacity(24);
    key.extend_from_slice(&user_id.to_be_bytes());
    key.extend_from_slice(&id.to_bytes());
    key
}

/// Create a prefix for iterating all history records for a user.
#[must_use]
pub fn user_history_prefix(user_id: UserId) -> Vec<u8> {
    user_id.to_be_bytes().to_vec()
}

/// Extract the history ID from a user-history index key.
///
/// # Panics
///
/// Panics if the key is not at least 24 bytes.
#[must_use]
pub fn extract_history_id_from_user_key(key: &[u8]) -> HistoryId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[8..24]);
    HistoryId::from_bytes(bytes)
}

/// Create a profile view counter key.
///
/// Format: `user_id (8 bytes) || ISO-8601 date (10 bytes)`. The date part is
/// textual, which keeps it human-readable in tooling and still sorts
/// chronologically.
#[must_use]
pub fn profile_view_key(user_id: UserId, date: NaiveDate) -> Vec<u8> {
    let mut key = Vec::with_capacity(18);
    key.extend_from_slice(&user_id.to_be_bytes());
    key.extend_from_slice(date.to_string().as_bytes());
    key
}
