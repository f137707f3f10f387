//! SQL schema definitions.

/// Complete schema for the v1 ledger database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Ledger configuration and counters (single row)
-- ============================================================

CREATE TABLE IF NOT EXISTS ledger (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    owner TEXT NOT NULL,
    fan_share_bps INTEGER NOT NULL CHECK (fan_share_bps BETWEEN 0 AND 10000),
    total_fan_pool TEXT NOT NULL,
    held TEXT NOT NULL,
    total_received TEXT NOT NULL,
    total_paid_to_payees TEXT NOT NULL,
    saved_at INTEGER NOT NULL
);

-- ============================================================
-- Payees (immutable, ordered)
-- ============================================================

CREATE TABLE IF NOT EXISTS payees (
    position INTEGER PRIMARY KEY,
    ledger_id INTEGER NOT NULL REFERENCES ledger(id) ON DELETE CASCADE,
    address TEXT NOT NULL UNIQUE,
    weight INTEGER NOT NULL CHECK (weight > 0)
);

-- ============================================================
-- Fan accounts
-- ============================================================

CREATE TABLE IF NOT EXISTS fan_accounts (
    identity TEXT PRIMARY KEY,
    ledger_id INTEGER NOT NULL REFERENCES ledger(id) ON DELETE CASCADE,
    token_balance TEXT NOT NULL,
    cumulative_claimed TEXT NOT NULL
);
"#;
