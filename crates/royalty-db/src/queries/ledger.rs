//! Whole-ledger save and load.

use rusqlite::{Connection, OptionalExtension};

use royalty_ledger::fans::FanAccount;
use royalty_ledger::{LedgerSnapshot, Payee, RoyaltyLedger};
use royalty_types::{Amount, Identity};

use crate::{DbError, Result};

/// Replace the stored ledger with `snapshot` in a single transaction.
pub fn save_snapshot(conn: &mut Connection, snapshot: &LedgerSnapshot) -> Result<()> {
    let tx = conn.transaction()?;

    // Cascades to payees and fan_accounts.
    tx.execute("DELETE FROM ledger", [])?;
    tx.execute(
        "INSERT INTO ledger (id, owner, fan_share_bps, total_fan_pool, held, total_received,
                             total_paid_to_payees, saved_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            snapshot.owner.to_string(),
            snapshot.fan_share_bps,
            snapshot.total_fan_pool.to_string(),
            snapshot.held.to_string(),
            snapshot.total_received.to_string(),
            snapshot.total_paid_to_payees.to_string(),
            current_timestamp() as i64,
        ],
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO payees (position, ledger_id, address, weight) VALUES (?1, 1, ?2, ?3)",
        )?;
        for (position, payee) in snapshot.payees.iter().enumerate() {
            let weight = i64::try_from(payee.weight).map_err(|_| DbError::Corrupt {
                column: "payees.weight",
                detail: format!("{} does not fit in INTEGER", payee.weight),
            })?;
            stmt.execute(rusqlite::params![
                position as i64,
                payee.address.to_string(),
                weight,
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO fan_accounts (identity, ledger_id, token_balance, cumulative_claimed)
             VALUES (?1, 1, ?2, ?3)",
        )?;
        for fan in &snapshot.fans {
            stmt.execute(rusqlite::params![
                fan.identity.to_string(),
                fan.token_balance.to_string(),
                fan.cumulative_claimed.to_string(),
            ])?;
        }
    }

    tx.commit()?;

    tracing::debug!(
        payees = snapshot.payees.len(),
        fans = snapshot.fans.len(),
        "ledger snapshot saved"
    );
    Ok(())
}

/// Load the stored ledger state, if any.
pub fn load_snapshot(conn: &Connection) -> Result<Option<LedgerSnapshot>> {
    let row = conn
        .query_row(
            "SELECT owner, fan_share_bps, total_fan_pool, held, total_received, total_paid_to_payees
             FROM ledger WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u16>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((owner, fan_share_bps, pool, held, received, paid)) = row else {
        return Ok(None);
    };

    let mut stmt =
        conn.prepare("SELECT address, weight FROM payees WHERE ledger_id = 1 ORDER BY position")?;
    let payees = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .map(|(address, weight)| {
            Ok(Payee {
                address: parse_identity("payees.address", &address)?,
                weight: u64::try_from(weight).map_err(|_| DbError::Corrupt {
                    column: "payees.weight",
                    detail: weight.to_string(),
                })?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let fans = super::fans::list(conn)?;

    Ok(Some(LedgerSnapshot {
        owner: parse_identity("ledger.owner", &owner)?,
        fan_share_bps,
        payees,
        fans,
        total_fan_pool: parse_amount("ledger.total_fan_pool", &pool)?,
        held: parse_amount("ledger.held", &held)?,
        total_received: parse_amount("ledger.total_received", &received)?,
        total_paid_to_payees: parse_amount("ledger.total_paid_to_payees", &paid)?,
    }))
}

/// Load and validate the stored ledger.
///
/// # Errors
///
/// - [`DbError::NotFound`] if nothing has been saved
/// - [`DbError::Ledger`] if the stored state breaks a ledger invariant
pub fn load_ledger(conn: &Connection) -> Result<RoyaltyLedger> {
    let snapshot =
        load_snapshot(conn)?.ok_or_else(|| DbError::NotFound("stored ledger".into()))?;
    Ok(RoyaltyLedger::from_snapshot(snapshot)?)
}

pub(crate) fn parse_amount(column: &'static str, text: &str) -> Result<Amount> {
    text.parse().map_err(|e: std::num::ParseIntError| DbError::Corrupt {
        column,
        detail: format!("{text:?}: {e}"),
    })
}

pub(crate) fn parse_identity(column: &'static str, text: &str) -> Result<Identity> {
    text.parse().map_err(|e: royalty_types::IdentityError| DbError::Corrupt {
        column,
        detail: e.to_string(),
    })
}

/// Build a [`FanAccount`] from its TEXT columns.
pub(crate) fn fan_from_columns(identity: &str, balance: &str, claimed: &str) -> Result<FanAccount> {
    Ok(FanAccount {
        identity: parse_identity("fan_accounts.identity", identity)?,
        token_balance: parse_amount("fan_accounts.token_balance", balance)?,
        cumulative_claimed: parse_amount("fan_accounts.cumulative_claimed", claimed)?,
    })
}

/// Get the current Unix timestamp in seconds.
fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
