//! Scripted revenue flows.
//!
//! Each scenario drives a [`RoyaltyLedger`] through mint, fund, distribute
//! and claim against an [`InMemoryTreasury`], writing a readable transcript.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use royalty_ledger::{DistributionReport, InMemoryTreasury, PayoutStatus, RoyaltyLedger};
use royalty_types::units::format_ether;
use royalty_types::{Amount, FanTokens, Identity};

use crate::config::DemoConfig;

/// Which flow to replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Mint fans, fund, distribute, claim.
    RevenueFlow,
    /// Mint the first fan only, fund and distribute, then mint the rest
    /// before anyone claims. Shows that pool shares follow holdings at
    /// claim time.
    LateMint,
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "revenue-flow" | "flow" => Ok(Self::RevenueFlow),
            "late-mint" => Ok(Self::LateMint),
            other => anyhow::bail!("unknown scenario {other:?} (expected revenue-flow or late-mint)"),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevenueFlow => f.write_str("revenue-flow"),
            Self::LateMint => f.write_str("late-mint"),
        }
    }
}

/// What a scenario produced.
#[derive(Debug)]
pub struct FlowSummary {
    pub report: DistributionReport,
    /// `(fan, amount paid)` per claimant, in claim order.
    pub claims: Vec<(Identity, Amount)>,
}

/// Replay `scenario` on `ledger`, writing the transcript to `out`.
pub fn run(
    config: &DemoConfig,
    scenario: Scenario,
    ledger: &mut RoyaltyLedger,
    treasury: &mut InMemoryTreasury,
    out: &mut dyn Write,
) -> anyhow::Result<FlowSummary> {
    tracing::info!(%scenario, "running scenario");

    let mints = config.mints()?;
    let funder = config.funder()?;
    let fund = config.fund_amount()?;

    print_ledger(ledger, out)?;

    let (early, late) = match scenario {
        Scenario::RevenueFlow => mints.split_at(mints.len()),
        Scenario::LateMint => mints.split_at(mints.len().min(1)),
    };

    mint_all(ledger, early, out)?;

    ledger.fund(&funder, fund)?;
    writeln!(out, "Funded {} ETH from {funder}", format_ether(fund))?;

    let report = ledger.distribute(treasury)?;
    print_report(&report, out)?;

    if !late.is_empty() {
        writeln!(out, "Minting after distribution:")?;
        mint_all(ledger, late, out)?;
    }

    let mut claims = Vec::new();
    for fan in config.claimants()? {
        let paid = ledger.claim_fan(&fan, treasury)?;
        writeln!(
            out,
            "Fan {fan} claimed {} ETH (holds {} of {} tokens)",
            format_ether(paid),
            ledger.fan_balance(&fan),
            ledger.fan_total_supply()
        )?;
        claims.push((fan, paid));
    }

    print_balances(ledger, treasury, out)?;

    if config.logging.print_events {
        for event in ledger.take_events() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }

    Ok(FlowSummary { report, claims })
}

fn mint_all(
    ledger: &mut RoyaltyLedger,
    mints: &[(Identity, FanTokens)],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let owner = ledger.owner();
    for (fan, amount) in mints {
        ledger.mint_fan(&owner, fan, *amount)?;
        writeln!(out, "Minted {amount} fan tokens to {fan}")?;
    }
    Ok(())
}

fn print_ledger(ledger: &RoyaltyLedger, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "Ledger owner: {}", ledger.owner())?;
    let (addresses, weights) = ledger.payees();
    for (address, weight) in addresses.iter().zip(&weights) {
        writeln!(out, "  payee {address} weight {weight}")?;
    }
    writeln!(out, "  fan share: {} bps", ledger.fan_share_bps())?;
    Ok(())
}

fn print_report(report: &DistributionReport, out: &mut dyn Write) -> anyhow::Result<()> {
    if report.is_empty() {
        writeln!(out, "Nothing to distribute")?;
        return Ok(());
    }
    writeln!(out, "Distributed {} ETH:", format_ether(report.distributable))?;
    for outcome in &report.payees {
        let status = match &outcome.status {
            PayoutStatus::Paid => "paid".to_string(),
            PayoutStatus::Empty => "nothing due".to_string(),
            PayoutStatus::Failed { reason } => format!("FAILED ({reason}), retained"),
        };
        writeln!(
            out,
            "  {} -> {} ETH {status}",
            outcome.payee,
            format_ether(outcome.amount)
        )?;
    }
    writeln!(out, "  fan pool += {} ETH", format_ether(report.fan_share))?;
    if report.dust > 0 {
        writeln!(out, "  dust retained: {} wei", report.dust)?;
    }
    writeln!(out, "Total fan pool: {} ETH", format_ether(report.total_fan_pool))?;
    Ok(())
}

fn print_balances(
    ledger: &RoyaltyLedger,
    treasury: &InMemoryTreasury,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    // The treasury only lives for this run; lifetime totals come from the ledger.
    writeln!(out, "Paid out this run:")?;
    let (payees, _) = ledger.payees();
    let fans = ledger.fan_accounts().accounts().map(|a| a.identity);
    let mut seen: Vec<Identity> = Vec::new();
    for account in payees.into_iter().chain(fans) {
        if seen.contains(&account) {
            continue;
        }
        seen.push(account);
        writeln!(
            out,
            "  {account}: {} ETH",
            format_ether(treasury.balance_of(&account))
        )?;
    }
    writeln!(out, "Ledger totals:")?;
    writeln!(
        out,
        "  received: {} ETH",
        format_ether(ledger.total_received())
    )?;
    writeln!(
        out,
        "  paid to payees: {} ETH",
        format_ether(ledger.total_paid_to_payees())
    )?;
    writeln!(
        out,
        "  claimed by fans: {} ETH",
        format_ether(ledger.total_fan_claimed())
    )?;
    writeln!(out, "  held: {} ETH", format_ether(ledger.held_balance()))?;
    writeln!(
        out,
        "  unclaimed fan pool: {} ETH",
        format_ether(ledger.unclaimed_fan_pool())
    )?;
    Ok(())
}
