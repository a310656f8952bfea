//! Ledger engine: planning signed movements against account balances.

mod error;
mod movement;
#[cfg(test)]
mod props;

pub use error::LedgerError;
pub use movement::{MovementDraft, plan_movement};
