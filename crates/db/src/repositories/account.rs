//! Account repository for the ledger service.

use rand::rng;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use neobank_core::account::generate_account_number;
use neobank_shared::{AccountType, AppError};

use crate::entities::accounts;

/// How many generated numbers to try before giving up.
///
/// The number space is only 10^6; a busy installation can plausibly collide,
/// so generation checks for an existing row and redraws.
const MAX_NUMBER_ATTEMPTS: u32 = 5;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("account not found: {0}")]
    NotFound(String),

    /// A caller-supplied account number is already taken.
    #[error("account number '{0}' already exists")]
    DuplicateNumber(String),

    /// Could not draw an unused account number.
    #[error("could not generate an unused account number after {0} attempts")]
    NumberSpaceExhausted(u32),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => Self::NotFound(err.to_string()),
            AccountError::DuplicateNumber(_) => Self::Validation(err.to_string()),
            AccountError::NumberSpaceExhausted(_) => Self::Internal(err.to_string()),
            AccountError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for the structured account-opening operation.
#[derive(Debug, Clone)]
pub struct OpenAccountInput {
    /// Owning client id (already validated against the clients service).
    pub client_id: i64,
    /// Account type.
    pub account_type: AccountType,
    /// Opening balance.
    pub initial_balance: Decimal,
    /// Caller-supplied account number; absent or empty means generate one.
    pub account_number: Option<String>,
}

/// Normalizes the caller-supplied account number: an empty string counts as
/// not supplied and routes into generation.
fn requested_number(candidate: Option<String>) -> Option<String> {
    candidate.filter(|number| !number.is_empty())
}

/// Input for the generic save operation, all fields caller-supplied.
#[derive(Debug, Clone)]
pub struct SaveAccountInput {
    /// Account number.
    pub account_number: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance.
    pub balance: Decimal,
    /// Whether the account is active.
    pub active: bool,
    /// Owning client id.
    pub client_id: i64,
}

/// Input for overwriting an account.
#[derive(Debug, Clone)]
pub struct UpdateAccountInput {
    /// Account type.
    pub account_type: AccountType,
    /// Balance.
    pub balance: Decimal,
    /// Whether the account is active.
    pub active: bool,
}

/// Account repository for CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all accounts ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Finds an account by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_number(
        &self,
        account_number: &str,
    ) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(account_number)
            .one(&self.db)
            .await?;
        Ok(account)
    }

    /// Lists the accounts owned by a client. An empty list is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::ClientId.eq(client_id))
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Opens an account, generating an unused number when none is supplied
    /// or the supplied one is empty.
    ///
    /// New accounts are always created active.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateNumber`] for a taken caller-supplied
    /// number and [`AccountError::NumberSpaceExhausted`] when generation
    /// keeps colliding.
    pub async fn open(&self, input: OpenAccountInput) -> Result<accounts::Model, AccountError> {
        let account_number = match requested_number(input.account_number) {
            Some(number) => {
                if self.find_by_number(&number).await?.is_some() {
                    return Err(AccountError::DuplicateNumber(number));
                }
                number
            }
            None => self.draw_unused_number().await?,
        };

        let account = accounts::ActiveModel {
            account_number: Set(account_number),
            account_type: Set(input.account_type.as_str().to_string()),
            balance: Set(input.initial_balance),
            is_active: Set(true),
            client_id: Set(input.client_id),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Persists a fully specified account (generic save, no remote checks).
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateNumber`] if the number is taken.
    pub async fn save(&self, input: SaveAccountInput) -> Result<accounts::Model, AccountError> {
        if self.find_by_number(&input.account_number).await?.is_some() {
            return Err(AccountError::DuplicateNumber(input.account_number));
        }

        let account = accounts::ActiveModel {
            account_number: Set(input.account_number),
            account_type: Set(input.account_type.as_str().to_string()),
            balance: Set(input.balance),
            is_active: Set(input.active),
            client_id: Set(input.client_id),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Overwrites an account's type, balance, and active flag.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist.
    pub async fn update(
        &self,
        account_number: &str,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(account_number)
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_number.to_string()))?;

        let mut active: accounts::ActiveModel = account.into();
        active.account_type = Set(input.account_type.as_str().to_string());
        active.balance = Set(input.balance);
        active.is_active = Set(input.active);

        let account = active.update(&self.db).await?;
        Ok(account)
    }

    /// Deletes an account, returning the removed row. Movements cascade.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist.
    pub async fn delete(&self, account_number: &str) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(account_number)
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_number.to_string()))?;

        account.clone().delete(&self.db).await?;
        Ok(account)
    }

    /// Deletes every account owned by a client, returning the count removed.
    ///
    /// Zero accounts is success, not an error; the caller in the clients
    /// service treats any non-success as a reason to abort its own delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_client(&self, client_id: i64) -> Result<u64, AccountError> {
        let result = accounts::Entity::delete_many()
            .filter(accounts::Column::ClientId.eq(client_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Draws account numbers until one is unused, bounded by
    /// [`MAX_NUMBER_ATTEMPTS`].
    async fn draw_unused_number(&self) -> Result<String, AccountError> {
        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let candidate = generate_account_number(&mut rng());
            if self.find_by_number(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            warn!(attempt, candidate = %candidate, "generated account number collided");
        }
        Err(AccountError::NumberSpaceExhausted(MAX_NUMBER_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account_number_routes_into_generation() {
        // An empty string must never survive as a primary key candidate.
        assert_eq!(requested_number(Some(String::new())), None);
        assert_eq!(requested_number(None), None);
    }

    #[test]
    fn test_supplied_account_number_is_kept() {
        assert_eq!(
            requested_number(Some("478758".to_string())),
            Some("478758".to_string())
        );
    }
}
