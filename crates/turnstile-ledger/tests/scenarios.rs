//! End-to-end ledger scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use turnstile_core::{ManualClock, RecordOutcome, UserId, DAILY_GRANT_CREDITS, DEFAULT_CREDITS};
use turnstile_ledger::{AccountManager, HistoryRecorder, ModerationRegistry};
use turnstile_store::RocksStore;

struct Harness {
    accounts: AccountManager,
    recorder: HistoryRecorder,
    moderation: ModerationRegistry,
    clock: Arc<ManualClock>,
    _temp_dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));
        let clock = Arc::new(ManualClock::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        ));

        Self {
            accounts: AccountManager::new(store.clone(), clock.clone()),
            recorder: HistoryRecorder::new(store.clone()),
            moderation: ModerationRegistry::new(store),
            clock,
            _temp_dir: temp_dir,
        }
    }
}

#[test]
fn new_user_spends_down_then_replenishes_next_day() {
    let harness = Harness::new();
    let user = UserId::new(42);

    harness.accounts.ensure_account(user).unwrap();
    assert_eq!(harness.accounts.balance(user).unwrap(), DEFAULT_CREDITS);

    // Five debits succeed, walking the balance down to zero.
    for expected in (0..DEFAULT_CREDITS).rev() {
        assert!(harness.accounts.debit_one(user).unwrap());
        assert_eq!(harness.accounts.balance(user).unwrap(), expected);
    }

    // The sixth fails and leaves the balance untouched.
    assert!(!harness.accounts.debit_one(user).unwrap());
    assert_eq!(harness.accounts.balance(user).unwrap(), 0);

    // Next calendar day the grant is due exactly once.
    harness.clock.advance(1);
    assert!(harness.accounts.grant_daily_if_due(user).unwrap());
    assert_eq!(harness.accounts.balance(user).unwrap(), DAILY_GRANT_CREDITS);
    assert!(!harness.accounts.grant_daily_if_due(user).unwrap());
    assert_eq!(harness.accounts.balance(user).unwrap(), DAILY_GRANT_CREDITS);
}

#[test]
fn failed_action_is_refunded_and_audited() {
    let harness = Harness::new();
    let user = UserId::new(42);
    harness.accounts.ensure_account(user).unwrap();

    // Caller debits, the downstream feature fails, caller refunds and records.
    assert!(harness.accounts.debit_one(user).unwrap());
    harness.accounts.refund_one(user).unwrap();
    harness
        .recorder
        .record(user, "110001", "pincode", RecordOutcome::Refunded)
        .unwrap();

    assert_eq!(harness.accounts.balance(user).unwrap(), DEFAULT_CREDITS);
    let records = harness.recorder.recent(user, 10, 0).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, RecordOutcome::Refunded);
}

#[test]
fn blocking_flips_the_flag_the_gate_reads() {
    let harness = Harness::new();
    let user = UserId::new(42);
    let admin = UserId::new(1);

    harness.accounts.ensure_account(user).unwrap();
    assert!(!harness.accounts.is_blocked(user).unwrap());

    harness.moderation.block(user, admin, "spam").unwrap();
    harness.moderation.block(user, admin, "spam").unwrap();
    assert!(harness.accounts.is_blocked(user).unwrap());

    // Blocking never takes credits away.
    assert_eq!(harness.accounts.balance(user).unwrap(), DEFAULT_CREDITS);

    harness.moderation.unblock(user).unwrap();
    assert!(!harness.accounts.is_blocked(user).unwrap());
    assert!(harness.moderation.entry(user).unwrap().is_some());
}

#[test]
fn balance_never_observed_negative() {
    let harness = Harness::new();
    let user = UserId::new(42);
    harness.accounts.ensure_account(user).unwrap();

    // Exhaust the balance, then keep hammering operations that could, if
    // unguarded, push it below zero.
    while harness.accounts.debit_one(user).unwrap() {}
    assert!(!harness.accounts.debit_one(user).unwrap());
    assert!(harness.accounts.adjust_balance(user, -1).is_err());
    assert_eq!(harness.accounts.balance(user).unwrap(), 0);

    assert!(harness.accounts.grant_daily_if_due(user).unwrap());
    assert!(harness.accounts.adjust_balance(user, -DAILY_GRANT_CREDITS).is_ok());
    assert_eq!(harness.accounts.balance(user).unwrap(), 0);
}
