//! Account domain logic.

mod number;

pub use number::{ACCOUNT_NUMBER_LEN, generate_account_number};
