//! Integration test: transfer failures.
//!
//! Payee pushes and fan claims fail differently:
//! - A payee whose transfer fails does not block the other payees or the
//!   fan pool; its share stays distributable and is re-split next time.
//! - A fan claim whose transfer fails is rolled back completely and can be
//!   retried later for the same amount.

use royalty_ledger::{InMemoryTreasury, LedgerConfig, LedgerError, Payee, PayoutStatus, RoyaltyLedger};
use royalty_types::events::LedgerEvent;
use royalty_types::Identity;

fn id(label: &str) -> Identity {
    Identity::from_label(label)
}

/// Helper: artist1 80 / artist2 20, 2% fans, fan1 holding every token.
fn ledger() -> RoyaltyLedger {
    let mut ledger = RoyaltyLedger::new(LedgerConfig {
        owner: id("artist1"),
        payees: vec![
            Payee {
                address: id("artist1"),
                weight: 80,
            },
            Payee {
                address: id("artist2"),
                weight: 20,
            },
        ],
        fan_share_bps: 200,
    })
    .expect("valid config");
    ledger
        .mint_fan(&id("artist1"), &id("fan1"), 10)
        .expect("mint");
    ledger.take_events();
    ledger
}

#[test]
fn failed_payee_is_retained_and_retried() {
    let mut ledger = ledger();
    let mut treasury = InMemoryTreasury::new();
    treasury.reject(id("artist2"));

    // =========================================================
    // First distribution: artist2 refuses
    // =========================================================
    ledger.fund(&id("deployer"), 10_000).expect("fund");
    let report = ledger.distribute(&mut treasury).expect("distribute");

    assert_eq!(report.fan_share, 200);
    assert_eq!(report.payees[0].status, PayoutStatus::Paid);
    assert!(matches!(report.payees[1].status, PayoutStatus::Failed { .. }));
    assert_eq!(report.paid_total(), 7_840);
    assert_eq!(report.retained(), 1_960);

    assert_eq!(treasury.balance_of(&id("artist1")), 7_840);
    assert_eq!(treasury.balance_of(&id("artist2")), 0);
    assert_eq!(ledger.held_balance(), 2_160);
    assert_eq!(ledger.distributable_balance(), 1_960);

    // The fan pool was credited regardless, and fans can draw on it.
    assert_eq!(ledger.total_fan_pool(), 200);
    assert_eq!(
        ledger.claim_fan(&id("fan1"), &mut treasury).expect("claim"),
        200
    );

    let names: Vec<&str> = ledger.take_events().iter().map(LedgerEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "funded",
            "fan_pool_credited",
            "payee_paid",
            "payee_transfer_failed",
            "fan_claimed",
        ]
    );

    // =========================================================
    // artist2 accepts again: the retained share is re-split
    // =========================================================
    treasury.accept(&id("artist2"));
    let report = ledger.distribute(&mut treasury).expect("redistribute");

    assert_eq!(report.distributable, 1_960);
    assert_eq!(report.fan_share, 39);
    assert_eq!(report.payees[0].amount, 1_536);
    assert_eq!(report.payees[1].amount, 384);
    assert_eq!(report.dust, 1);
    assert_eq!(report.failed_total(), 0);
    assert_eq!(treasury.balance_of(&id("artist2")), 384);
    assert_eq!(ledger.distributable_balance(), 1);

    assert_eq!(
        ledger.total_received(),
        ledger.total_paid_to_payees() + ledger.total_fan_claimed() + ledger.held_balance()
    );
}

#[test]
fn every_payee_failing_keeps_everything_but_the_fan_share() {
    let mut ledger = ledger();
    let mut treasury = InMemoryTreasury::new();
    treasury.reject(id("artist1"));
    treasury.reject(id("artist2"));

    ledger.fund(&id("deployer"), 10_000).expect("fund");
    let report = ledger.distribute(&mut treasury).expect("distribute");

    assert_eq!(report.paid_total(), 0);
    assert_eq!(report.failed_total(), 9_800);
    assert_eq!(ledger.held_balance(), 10_000);
    assert_eq!(ledger.unclaimed_fan_pool(), 200);
    assert_eq!(ledger.distributable_balance(), 9_800);
    assert_eq!(treasury.transfer_count(), 0);
}

#[test]
fn failed_claim_rolls_back() {
    let mut ledger = ledger();
    let mut treasury = InMemoryTreasury::new();
    ledger.fund(&id("deployer"), 10_000).expect("fund");
    ledger.distribute(&mut treasury).expect("distribute");
    ledger.take_events();

    let before = ledger.snapshot();
    treasury.reject(id("fan1"));

    let err = ledger
        .claim_fan(&id("fan1"), &mut treasury)
        .expect_err("claim should fail");
    assert!(matches!(
        err,
        LedgerError::TransferFailed { recipient, amount: 200, .. } if recipient == id("fan1")
    ));
    assert_eq!(ledger.snapshot(), before);
    assert!(ledger.events().is_empty());

    // =========================================================
    // Retry once the fan can receive
    // =========================================================
    treasury.accept(&id("fan1"));
    assert_eq!(
        ledger.claim_fan(&id("fan1"), &mut treasury).expect("retry"),
        200
    );
    assert_eq!(ledger.unclaimed_fan_pool(), 0);
}
