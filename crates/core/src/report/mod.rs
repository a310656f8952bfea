//! Account statement reports.
//!
//! A statement joins a client (fetched remotely), their accounts, and each
//! account's movements inside a closed date window. Assembly is pure and
//! side-effect free; the caller supplies everything already fetched.

mod statement;
mod window;

pub use statement::{
    AccountActivity, AccountStatement, ClientInfo, MovementLine, StatementAccount,
    StatementMovement, build_statement,
};
pub use window::ReportWindow;
