//! Integration test: minting order and fan-pool dilution.
//!
//! A fan's share is evaluated against token holdings at claim time, over
//! the whole pool credited so far. These tests pin down what that means
//! when tokens are minted after revenue has already been distributed:
//! 1. A late mint dilutes fans who have not claimed yet
//! 2. A fan who claimed before the late mint keeps what they were paid
//! 3. The late minter can never draw more than the unclaimed pool
//! 4. Later distributions even the shares out again

use royalty_ledger::{InMemoryTreasury, LedgerConfig, Payee, RoyaltyLedger};
use royalty_types::Identity;

fn id(label: &str) -> Identity {
    Identity::from_label(label)
}

/// Helper: one payee, 2% to fans, owned by the artist.
fn ledger() -> RoyaltyLedger {
    RoyaltyLedger::new(LedgerConfig {
        owner: id("artist"),
        payees: vec![Payee {
            address: id("artist"),
            weight: 1,
        }],
        fan_share_bps: 200,
    })
    .expect("valid config")
}

/// Helper: fund 10_000 and distribute, crediting 200 to the fan pool.
fn revenue_round(ledger: &mut RoyaltyLedger, treasury: &mut InMemoryTreasury) {
    ledger.fund(&id("label"), 10_000).expect("fund");
    let report = ledger.distribute(treasury).expect("distribute");
    assert_eq!(report.fan_share, 200);
}

#[test]
fn late_mint_dilutes_unclaimed_share() {
    let mut treasury = InMemoryTreasury::new();

    // =========================================================
    // Without the late mint, fan1 owns the whole pool
    // =========================================================
    let mut alone = ledger();
    alone.mint_fan(&id("artist"), &id("fan1"), 1000).expect("mint");
    revenue_round(&mut alone, &mut treasury);
    assert_eq!(alone.claimable(&id("fan1")).expect("claimable"), 200);

    // =========================================================
    // Same history plus a late mint before fan1 claims
    // =========================================================
    let mut diluted = ledger();
    diluted.mint_fan(&id("artist"), &id("fan1"), 1000).expect("mint");
    revenue_round(&mut diluted, &mut treasury);
    diluted.mint_fan(&id("artist"), &id("fan2"), 1000).expect("late mint");

    assert_eq!(diluted.claimable(&id("fan1")).expect("claimable"), 100);
    assert_eq!(diluted.claimable(&id("fan2")).expect("claimable"), 100);
    assert_eq!(diluted.total_fan_pool(), alone.total_fan_pool());
}

#[test]
fn same_token_totals_different_mint_order_pay_differently() {
    let mut treasury = InMemoryTreasury::new();

    // Both fans hold tokens before revenue arrives.
    let mut early = ledger();
    early.mint_fan(&id("artist"), &id("fan1"), 3).expect("mint");
    early.mint_fan(&id("artist"), &id("fan2"), 1).expect("mint");
    revenue_round(&mut early, &mut treasury);
    let early_fan1 = early.claim_fan(&id("fan1"), &mut treasury).expect("claim");
    let early_fan2 = early.claimable(&id("fan2")).expect("claimable");

    // fan2's tokens arrive after distribution and after fan1 claimed.
    let mut late = ledger();
    late.mint_fan(&id("artist"), &id("fan1"), 3).expect("mint");
    revenue_round(&mut late, &mut treasury);
    let late_fan1 = late.claim_fan(&id("fan1"), &mut treasury).expect("claim");
    late.mint_fan(&id("artist"), &id("fan2"), 1).expect("mint");
    let late_fan2 = late.claimable(&id("fan2")).expect("claimable");

    assert_eq!(early.fan_total_supply(), late.fan_total_supply());
    assert_eq!(early.total_fan_pool(), late.total_fan_pool());
    assert_eq!((early_fan1, early_fan2), (150, 50));
    assert_eq!((late_fan1, late_fan2), (200, 0));
}

#[test]
fn claim_before_late_mint_keeps_payment_and_caps_newcomer() {
    let mut ledger = ledger();
    let mut treasury = InMemoryTreasury::new();

    ledger.mint_fan(&id("artist"), &id("fan1"), 1000).expect("mint");
    revenue_round(&mut ledger, &mut treasury);
    assert_eq!(
        ledger.claim_fan(&id("fan1"), &mut treasury).expect("claim"),
        200
    );

    // fan2 is nominally entitled to half of the 200 pool, but all of it
    // has already been paid out.
    ledger.mint_fan(&id("artist"), &id("fan2"), 1000).expect("late mint");
    assert_eq!(ledger.unclaimed_fan_pool(), 0);
    assert_eq!(
        ledger.claim_fan(&id("fan2"), &mut treasury).expect("claim"),
        0
    );
    assert_eq!(ledger.total_fan_claimed(), ledger.total_fan_pool());

    // =========================================================
    // Next round: the pool reaches 400 and both entitlements 200
    // =========================================================
    revenue_round(&mut ledger, &mut treasury);
    assert_eq!(ledger.claimable(&id("fan1")).expect("claimable"), 0);
    assert_eq!(
        ledger.claim_fan(&id("fan2"), &mut treasury).expect("claim"),
        200
    );
    assert_eq!(ledger.total_fan_claimed(), 400);
    assert_eq!(ledger.unclaimed_fan_pool(), 0);
    assert_eq!(treasury.balance_of(&id("fan1")), 200);
    assert_eq!(treasury.balance_of(&id("fan2")), 200);
}

#[test]
fn only_the_owner_mints() {
    let mut ledger = ledger();
    let err = ledger
        .mint_fan(&id("fan1"), &id("fan1"), 1_000_000)
        .expect_err("non-owner mint");
    assert!(matches!(err, royalty_ledger::LedgerError::Unauthorized { .. }));
    assert_eq!(ledger.fan_total_supply(), 0);
    assert!(ledger.events().is_empty());
}
