//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary account records, keyed by `user_id`.
    pub const ACCOUNTS: &str = "accounts";

    /// Usage history records, keyed by `history_id` (ULID).
    pub const HISTORY: &str = "history";

    /// Index: history by user, keyed by `user_id || history_id`.
    /// Value is empty (index only).
    pub const HISTORY_BY_USER: &str = "history_by_user";

    /// Moderation audit rows, keyed by `user_id`.
    pub const BLOCKS: &str = "blocks";

    /// Per-day view counters, keyed by `user_id || date`.
    pub const PROFILE_VIEWS: &str = "profile_views";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::HISTORY,
        cf::HISTORY_BY_USER,
        cf::BLOCKS,
        cf::PROFILE_VIEWS,
    ]
}
