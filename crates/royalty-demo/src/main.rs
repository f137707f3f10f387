//! royalty-demo: replays the royalty ledger's revenue flows.
//!
//! Usage: `royalty-demo [config.toml | -] [revenue-flow | late-mint]`
//!
//! With `[storage] db_path` set, the ledger is loaded from that SQLite file
//! if one was saved before, and saved back after the run.

mod config;
mod flow;

use std::path::PathBuf;

use royalty_ledger::{InMemoryTreasury, RoyaltyLedger};
use tracing::info;

use crate::config::DemoConfig;
use crate::flow::Scenario;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .get(1)
        .filter(|a| a.as_str() != "-")
        .map(PathBuf::from);
    let config = DemoConfig::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("royalty={}", config.logging.log_level).parse()?),
        )
        .init();

    let scenario = match args.get(2) {
        Some(name) => name.parse::<Scenario>()?,
        None => Scenario::RevenueFlow,
    };

    // 1. Open storage and restore the ledger, or build a fresh one
    let mut conn = match config.db_path() {
        Some(path) => Some(royalty_db::open(&path)?),
        None => None,
    };
    let restored = match &conn {
        Some(conn) => royalty_db::queries::ledger::load_snapshot(conn)?,
        None => None,
    };
    let mut ledger = match restored {
        Some(snapshot) => {
            info!("restoring saved ledger; [ledger] settings ignored");
            RoyaltyLedger::from_snapshot(snapshot)?
        }
        None => RoyaltyLedger::new(config.ledger_config()?)?,
    };

    // 2. Run the scenario
    let mut treasury = InMemoryTreasury::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = flow::run(&config, scenario, &mut ledger, &mut treasury, &mut out)?;

    info!(
        distributed = summary.report.distributable,
        claims = summary.claims.len(),
        transfers = treasury.transfer_count(),
        "scenario finished"
    );

    // 3. Persist
    if let Some(conn) = conn.as_mut() {
        royalty_db::queries::ledger::save_snapshot(conn, &ledger.snapshot())?;
        info!("ledger saved");
    }

    Ok(())
}
