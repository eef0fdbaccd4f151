//! Identifier types for turnstile.
//!
//! This module provides strongly-typed identifiers for users and history
//! records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A user identifier.
///
/// User IDs are the numeric chat-platform identifiers of the people talking
/// to the bot. They are assigned externally and are never generated here.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a `UserId` from a raw platform identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Return the identifier as fixed-width big-endian bytes.
    ///
    /// Used for storage keys so that all keys for a user share an 8-byte
    /// prefix.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Reconstruct a `UserId` from big-endian key bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(i64::from_be_bytes(bytes))
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| IdError::InvalidUserId)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A history record identifier using ULID for time-ordering.
///
/// History IDs are monotonic surrogate keys: ULIDs sort by creation time, so
/// a user's records iterate in chronological order without a separate
/// sequence column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(Ulid);

impl HistoryId {
    /// Generate a new `HistoryId` with the current timestamp.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Return the bytes of the ULID (16 bytes).
    #[must_use]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// Reconstruct a `HistoryId` from key bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Ulid::from_bytes(bytes))
    }
}

impl FromStr for HistoryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|_| IdError::InvalidHistoryId)
    }
}

impl fmt::Debug for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HistoryId({})", self.0)
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid numeric user identifier.
    #[error("invalid user id")]
    InvalidUserId,

    /// The input is not a valid ULID.
    #[error("invalid history id")]
    InvalidHistoryId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_roundtrip() {
        let id = UserId::new(8_401_733_642);
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_key_bytes_roundtrip() {
        // Channel identifiers on the platform are negative.
        for raw in [42_i64, -1_002_331_607_869] {
            let id = UserId::new(raw);
            assert_eq!(UserId::from_be_bytes(id.to_be_bytes()), id);
        }
    }

    #[test]
    fn user_id_serde_is_plain_integer() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert_eq!("not-a-number".parse::<UserId>(), Err(IdError::InvalidUserId));
    }

    #[test]
    fn history_id_roundtrip() {
        let id = HistoryId::generate();
        let parsed: HistoryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn history_id_bytes_roundtrip() {
        let id = HistoryId::generate();
        assert_eq!(HistoryId::from_bytes(id.to_bytes()), id);
    }
}
