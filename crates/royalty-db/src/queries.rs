//! Database query functions organized by domain.

pub mod fans;
pub mod ledger;
