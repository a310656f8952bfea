//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while planning a movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Applying the movement would leave the account below zero.
    #[error("insufficient balance: {balance} available, movement of {amount} rejected")]
    InsufficientFunds {
        /// Balance at the time the movement was planned.
        balance: Decimal,
        /// Signed amount of the rejected movement.
        amount: Decimal,
    },
}
