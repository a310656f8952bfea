//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod client;
pub mod movement;

pub use account::{
    AccountError, AccountRepository, OpenAccountInput, SaveAccountInput, UpdateAccountInput,
};
pub use client::{ClientError, ClientRepository, CreateClientInput, UpdateClientInput};
pub use movement::{MovementError, MovementRepository, SaveMovementInput, UpdateMovementInput};
