//! Demo configuration file.
//!
//! Accounts are written either as `0x` addresses or as labels ("artist1"),
//! which resolve to deterministic identities. A missing file yields the
//! defaults below, which match the stock deployment: two artists split
//! 80/20, fans get 2%, the main artist owns the ledger.

use std::path::{Path, PathBuf};

use anyhow::Context;
use royalty_ledger::{LedgerConfig, Payee};
use royalty_types::units::parse_ether;
use royalty_types::{Amount, FanTokens, Identity};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "royalty.toml";

/// Complete demo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Ledger construction parameters.
    #[serde(default)]
    pub ledger: LedgerSection,
    /// Scripted flow parameters.
    #[serde(default)]
    pub demo: FlowSection,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Ledger construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    /// Account allowed to mint fan tokens.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Fan pool share in basis points.
    #[serde(default = "default_fan_share_bps")]
    pub fan_share_bps: u16,
    /// Weighted payees.
    #[serde(default = "default_payees")]
    pub payees: Vec<PayeeEntry>,
}

/// One payee line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeEntry {
    /// `0x` address or label.
    pub account: String,
    /// Relative weight.
    pub weight: u64,
}

/// Scripted flow parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSection {
    /// Account that sends revenue to the ledger.
    #[serde(default = "default_funder")]
    pub funder: String,
    /// Revenue sent per funding round, in ether.
    #[serde(default = "default_fund_ether")]
    pub fund_ether: String,
    /// Fan token mints.
    #[serde(default = "default_mints")]
    pub mints: Vec<MintEntry>,
    /// Accounts that claim after distribution. Empty = every minted fan.
    #[serde(default)]
    pub claimants: Vec<String>,
}

/// One mint line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEntry {
    /// `0x` address or label.
    pub fan: String,
    /// Fan tokens to mint.
    pub amount: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for the royalty crates: "debug" | "info" | "warn" | "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Print drained ledger events as JSON lines.
    #[serde(default = "default_true")]
    pub print_events: bool,
}

/// Persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file holding the ledger between runs. Empty = in memory only.
    #[serde(default)]
    pub db_path: String,
}

// Default value functions

fn default_owner() -> String {
    "artist1".to_string()
}

fn default_fan_share_bps() -> u16 {
    200
}

fn default_payees() -> Vec<PayeeEntry> {
    vec![
        PayeeEntry {
            account: "artist1".to_string(),
            weight: 80,
        },
        PayeeEntry {
            account: "artist2".to_string(),
            weight: 20,
        },
    ]
}

fn default_funder() -> String {
    "deployer".to_string()
}

fn default_fund_ether() -> String {
    "5".to_string()
}

fn default_mints() -> Vec<MintEntry> {
    vec![
        MintEntry {
            fan: "artist1".to_string(),
            amount: 1000,
        },
        MintEntry {
            fan: "artist2".to_string(),
            amount: 500,
        },
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            fan_share_bps: default_fan_share_bps(),
            payees: default_payees(),
        }
    }
}

impl Default for FlowSection {
    fn default() -> Self {
        Self {
            funder: default_funder(),
            fund_ether: default_fund_ether(),
            mints: default_mints(),
            claimants: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            print_events: true,
        }
    }
}

impl DemoConfig {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`].
    ///
    /// Falls back to defaults if the default file does not exist. An
    /// explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let config: DemoConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        Ok(config)
    }

    /// Resolve accounts into ledger construction parameters.
    pub fn ledger_config(&self) -> anyhow::Result<LedgerConfig> {
        let payees = self
            .ledger
            .payees
            .iter()
            .map(|p| {
                Ok(Payee {
                    address: resolve(&p.account)?,
                    weight: p.weight,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(LedgerConfig {
            owner: resolve(&self.ledger.owner)?,
            payees,
            fan_share_bps: self.ledger.fan_share_bps,
        })
    }

    /// Revenue per funding round, in wei.
    pub fn fund_amount(&self) -> anyhow::Result<Amount> {
        parse_ether(&self.demo.fund_ether)
            .with_context(|| format!("demo.fund_ether = {:?}", self.demo.fund_ether))
    }

    /// Resolved `(fan, amount)` mints.
    pub fn mints(&self) -> anyhow::Result<Vec<(Identity, FanTokens)>> {
        self.demo
            .mints
            .iter()
            .map(|m| Ok((resolve(&m.fan)?, FanTokens::from(m.amount))))
            .collect()
    }

    /// Accounts that claim: the configured list, or every minted fan.
    pub fn claimants(&self) -> anyhow::Result<Vec<Identity>> {
        if self.demo.claimants.is_empty() {
            let mut fans: Vec<Identity> = Vec::new();
            for (fan, _) in self.mints()? {
                if !fans.contains(&fan) {
                    fans.push(fan);
                }
            }
            return Ok(fans);
        }
        self.demo.claimants.iter().map(|c| resolve(c)).collect()
    }

    /// The funding account.
    pub fn funder(&self) -> anyhow::Result<Identity> {
        resolve(&self.demo.funder)
    }

    /// Database path, if persistence is enabled.
    pub fn db_path(&self) -> Option<PathBuf> {
        if self.storage.db_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.storage.db_path))
        }
    }
}

fn resolve(reference: &str) -> anyhow::Result<Identity> {
    Identity::resolve(reference).with_context(|| format!("account {reference:?}"))
}
