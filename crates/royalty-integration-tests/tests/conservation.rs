//! Integration test: value conservation under random operation sequences.
//!
//! Drives ledgers through seeded random mixes of fund, distribute, mint,
//! claim and treasury refusals, checking after every step that:
//! - everything received is paid to payees, claimed by fans, or still held
//! - the treasury saw exactly what the ledger says it paid
//! - fans never claim more than the pool was credited
//! - the unclaimed pool is always covered by the held balance
//! - a failed claim leaves the ledger exactly as it was

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use royalty_ledger::{InMemoryTreasury, LedgerConfig, LedgerError, Payee, RoyaltyLedger};
use royalty_types::{Amount, Identity};

const PAYEES: [&str; 3] = ["artist1", "artist2", "producer"];
const FANS: [&str; 5] = ["fan1", "fan2", "fan3", "fan4", "fan5"];
const STEPS: usize = 400;

fn id(label: &str) -> Identity {
    Identity::from_label(label)
}

fn random_ledger(rng: &mut StdRng) -> RoyaltyLedger {
    let payees = PAYEES
        .iter()
        .map(|label| Payee {
            address: id(label),
            weight: rng.gen_range(1..=1_000),
        })
        .collect();
    RoyaltyLedger::new(LedgerConfig {
        owner: id("artist1"),
        payees,
        fan_share_bps: rng.gen_range(0..=10_000),
    })
    .expect("valid config")
}

fn check_invariants(ledger: &RoyaltyLedger, treasury: &InMemoryTreasury, step: usize) {
    let claimed = ledger.total_fan_claimed();
    assert_eq!(
        ledger.total_received(),
        ledger.total_paid_to_payees() + claimed + ledger.held_balance(),
        "conservation broken at step {step}"
    );
    assert_eq!(
        treasury.total_paid(),
        ledger.total_paid_to_payees() + claimed,
        "treasury mismatch at step {step}"
    );
    assert!(
        claimed <= ledger.total_fan_pool(),
        "over-claimed at step {step}"
    );
    assert!(
        ledger.unclaimed_fan_pool() <= ledger.held_balance(),
        "fan pool uncovered at step {step}"
    );
    let per_fan: Amount = ledger
        .fan_accounts()
        .accounts()
        .map(|a| a.cumulative_claimed)
        .sum();
    assert_eq!(per_fan, claimed, "claim totals diverge at step {step}");
}

fn run_seed(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ledger = random_ledger(&mut rng);
    let mut treasury = InMemoryTreasury::new();
    let owner = ledger.owner();

    for step in 0..STEPS {
        match rng.gen_range(0..6) {
            0 => {
                let amount: Amount = rng.gen_range(0..1_000_000_000_000_000_000_000);
                ledger.fund(&id("deployer"), amount).expect("fund");
            }
            1 => {
                ledger.distribute(&mut treasury).expect("distribute");
            }
            2 => {
                let fan = FANS[rng.gen_range(0..FANS.len())];
                let amount: u128 = rng.gen_range(1..=10_000);
                ledger.mint_fan(&owner, &id(fan), amount).expect("mint");
            }
            3 | 4 => {
                let fan = id(FANS[rng.gen_range(0..FANS.len())]);
                let before = ledger.snapshot();
                let expected = ledger.claimable(&fan).expect("claimable");
                match ledger.claim_fan(&fan, &mut treasury) {
                    Ok(paid) => assert_eq!(paid, expected),
                    Err(LedgerError::TransferFailed { amount, .. }) => {
                        assert_eq!(amount, expected);
                        assert_eq!(ledger.snapshot(), before, "failed claim mutated state");
                    }
                    Err(other) => unreachable!("unexpected claim error: {other}"),
                }
            }
            _ => {
                let labels: Vec<&str> = PAYEES.iter().chain(FANS.iter()).copied().collect();
                let who = id(labels[rng.gen_range(0..labels.len())]);
                if rng.gen_bool(0.5) {
                    treasury.reject(who);
                } else {
                    treasury.accept(&who);
                }
            }
        }
        check_invariants(&ledger, &treasury, step);
    }

    // =========================================================
    // Drain: everyone accepts, distribute, every fan claims
    // =========================================================
    for label in PAYEES.iter().chain(FANS.iter()) {
        treasury.accept(&id(label));
    }
    ledger.distribute(&mut treasury).expect("final distribute");
    for fan in FANS {
        ledger.claim_fan(&id(fan), &mut treasury).expect("final claim");
    }
    check_invariants(&ledger, &treasury, STEPS);

    // Only rounding remainders may be left behind.
    let leftover = ledger.held_balance();
    let fans = FANS.len() as Amount;
    let payees = PAYEES.len() as Amount;
    assert!(
        leftover < fans + payees + 1,
        "seed {seed}: {leftover} wei left after draining"
    );
}

#[test]
fn random_sequences_conserve_value() {
    for seed in 0..25 {
        run_seed(seed);
    }
}
