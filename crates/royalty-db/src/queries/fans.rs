//! Fan account queries.

use rusqlite::{Connection, OptionalExtension};

use royalty_ledger::fans::FanAccount;
use royalty_types::Identity;

use super::ledger::fan_from_columns;
use crate::{DbError, Result};

/// All stored fan accounts ordered by identity.
pub fn list(conn: &Connection) -> Result<Vec<FanAccount>> {
    let mut stmt = conn.prepare(
        "SELECT identity, token_balance, cumulative_claimed
         FROM fan_accounts ORDER BY identity",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.iter()
        .map(|(identity, balance, claimed)| fan_from_columns(identity, balance, claimed))
        .collect()
}

/// A single fan account.
pub fn get(conn: &Connection, fan: &Identity) -> Result<FanAccount> {
    let row = conn
        .query_row(
            "SELECT identity, token_balance, cumulative_claimed
             FROM fan_accounts WHERE identity = ?1",
            [fan.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((identity, balance, claimed)) => fan_from_columns(&identity, &balance, &claimed),
        None => Err(DbError::NotFound(format!("fan {fan}"))),
    }
}

/// Number of stored fan accounts.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM fan_accounts", [], |row| row.get(0))?;
    Ok(count as u64)
}
