//! Tests for quota accounting across several excerpt requests.

use excerptor::fragment::{decode_all, encode_all, Fragment};
use excerptor::quota::{QuotaAccount, QuotaError, QuotaKey, QuotaLedger, QuotaPolicy};

fn frags(s: &str) -> Vec<Fragment> {
    decode_all(s).unwrap()
}

#[test]
fn repeated_requests_are_charged_once() {
    let policy = QuotaPolicy::default();
    let limit = policy.limit_for(100);
    let mut ledger = QuotaLedger::new();
    let key = QuotaKey::new("user-1", "book-42");

    ledger.release(key.clone(), &frags("1-6"), limit).unwrap();
    // pages 1-6 are already released and cost nothing again
    let check = ledger.release(key.clone(), &frags("1-6,7-10"), limit).unwrap();
    assert_eq!(check.used, 10);
    assert_eq!(check.remaining(), 0);

    let err = ledger.release(key.clone(), &frags("11"), limit).unwrap_err();
    assert_eq!(err, QuotaError::Exceeded { used: 11, limit: 10 });
    assert_eq!(encode_all(ledger.account(&key).unwrap().fragments()), "1-10");
}

#[test]
fn cleared_account_starts_over() {
    let mut ledger = QuotaLedger::new();
    let key = QuotaKey::new("user-1", "book-42");
    ledger.release(key.clone(), &frags("1-5"), 5).unwrap();

    assert!(ledger.clear(&key));
    assert!(ledger.account(&key).is_none());
    ledger.release(key.clone(), &frags("6-10"), 5).unwrap();
    assert_eq!(ledger.account(&key).unwrap().size(), 5);
}

#[test]
fn account_serializes_as_fragment_strings() {
    let account = QuotaAccount::from_fragments(frags("4-6,1-2"));
    let json = serde_json::to_string(&account).unwrap();
    assert_eq!(json, r#"{"fragments":["1-2","4-6"]}"#);
}

#[test]
fn stored_account_is_normalized_on_load() {
    let account = QuotaAccount::from_fragments(frags("3-4,1-2,2"));
    assert_eq!(encode_all(account.fragments()), "1-4");
    assert_eq!(account.remaining(10), 6);
}

#[test]
fn check_reports_without_merging() {
    let account = QuotaAccount::from_fragments(frags("1-4"));
    let check = account.check(&frags("5-20"), 10);
    assert!(check.exceeded());
    assert_eq!(check.used, 20);
    assert_eq!(check.remaining(), 0);
    assert_eq!(account.size(), 4);
}
