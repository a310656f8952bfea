//! Movement repository for the ledger service.
//!
//! Movement registration is the one read-modify-write path in the system.
//! The balance update is a compare-and-swap inside a transaction with the
//! movement insert, so a concurrent registration against the same account
//! makes the CAS miss and the whole cycle re-reads and retries.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use neobank_core::ledger::{LedgerError, plan_movement};
use neobank_core::report::ReportWindow;
use neobank_shared::AppError;

use crate::entities::{accounts, movements};

/// How many times to retry a registration whose balance CAS missed.
const MAX_BALANCE_RETRIES: u32 = 3;

/// Error types for movement operations.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    /// The referenced account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Movement not found.
    #[error("movement not found with id: {0}")]
    NotFound(i64),

    /// Business-rule rejection from the ledger engine.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The balance kept changing under us across all retries.
    #[error("account {0} is under concurrent modification, registration aborted")]
    ContendedBalance(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<MovementError> for AppError {
    fn from(err: MovementError) -> Self {
        match err {
            MovementError::AccountNotFound(_) | MovementError::NotFound(_) => {
                Self::NotFound(err.to_string())
            }
            MovementError::Ledger(LedgerError::InsufficientFunds { .. }) => {
                Self::InsufficientFunds(err.to_string())
            }
            MovementError::ContendedBalance(_) => Self::Internal(err.to_string()),
            MovementError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for the generic save operation.
#[derive(Debug, Clone)]
pub struct SaveMovementInput {
    /// When the movement occurred.
    pub occurred_at: chrono::DateTime<chrono::FixedOffset>,
    /// Description text.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Balance snapshot.
    pub balance: Decimal,
    /// Owning account number.
    pub account_number: String,
}

/// Input for the generic overwrite operation.
///
/// Overwrites historical fields without re-validating them against the
/// ledger; this is an administrative override, not a booking path.
#[derive(Debug, Clone)]
pub struct UpdateMovementInput {
    /// When the movement occurred.
    pub occurred_at: chrono::DateTime<chrono::FixedOffset>,
    /// Description text.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Balance snapshot.
    pub balance: Decimal,
}

/// Movement repository for registration and CRUD operations.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a movement against an account.
    ///
    /// Reads the account, plans the movement, then in one transaction
    /// conditionally updates the balance (`WHERE balance = <read value>`)
    /// and inserts the movement row. A CAS miss rolls back and retries the
    /// whole cycle up to [`MAX_BALANCE_RETRIES`] times.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::AccountNotFound`] for an unknown account,
    /// [`MovementError::Ledger`] when the balance would go negative, and
    /// [`MovementError::ContendedBalance`] when every retry lost the race.
    pub async fn register(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<movements::Model, MovementError> {
        for attempt in 0..MAX_BALANCE_RETRIES {
            let txn = self.db.begin().await?;

            let account = accounts::Entity::find_by_id(account_number)
                .one(&txn)
                .await?
                .ok_or_else(|| MovementError::AccountNotFound(account_number.to_string()))?;

            let draft = plan_movement(account.balance, amount)?;

            let update = accounts::Entity::update_many()
                .col_expr(accounts::Column::Balance, Expr::value(draft.balance_after))
                .filter(accounts::Column::AccountNumber.eq(account_number))
                .filter(accounts::Column::Balance.eq(account.balance))
                .exec(&txn)
                .await?;

            if update.rows_affected == 0 {
                // Someone else moved the balance between our read and write.
                txn.rollback().await?;
                debug!(account_number, attempt, "balance CAS missed, retrying");
                continue;
            }

            let movement = movements::ActiveModel {
                id: sea_orm::ActiveValue::NotSet,
                occurred_at: Set(Utc::now().into()),
                description: Set(draft.description),
                amount: Set(amount),
                balance: Set(draft.balance_after),
                account_number: Set(account_number.to_string()),
            }
            .insert(&txn)
            .await?;

            txn.commit().await?;
            info!(
                account_number,
                movement_id = movement.id,
                %amount,
                balance = %movement.balance,
                "movement registered"
            );
            return Ok(movement);
        }

        Err(MovementError::ContendedBalance(account_number.to_string()))
    }

    /// Lists all movements ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<movements::Model>, MovementError> {
        let movements = movements::Entity::find()
            .order_by_asc(movements::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movements)
    }

    /// Finds a movement by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<movements::Model>, MovementError> {
        let movement = movements::Entity::find_by_id(id).one(&self.db).await?;
        Ok(movement)
    }

    /// Lists an account's movements whose timestamp falls inside the report
    /// window, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_account_in_window(
        &self,
        account_number: &str,
        window: &ReportWindow,
    ) -> Result<Vec<movements::Model>, MovementError> {
        let (lower, upper) = window.bounds();

        let movements = movements::Entity::find()
            .filter(movements::Column::AccountNumber.eq(account_number))
            .filter(movements::Column::OccurredAt.gte(lower))
            .filter(movements::Column::OccurredAt.lt(upper))
            .order_by_asc(movements::Column::OccurredAt)
            .all(&self.db)
            .await?;
        Ok(movements)
    }

    /// Persists a fully specified movement (generic save).
    ///
    /// Does not touch the account balance; see the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::AccountNotFound`] if the account is unknown.
    pub async fn save(&self, input: SaveMovementInput) -> Result<movements::Model, MovementError> {
        let account = accounts::Entity::find_by_id(&input.account_number)
            .one(&self.db)
            .await?;
        if account.is_none() {
            return Err(MovementError::AccountNotFound(input.account_number));
        }

        let movement = movements::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            occurred_at: Set(input.occurred_at),
            description: Set(input.description),
            amount: Set(input.amount),
            balance: Set(input.balance),
            account_number: Set(input.account_number),
        };

        let movement = movement.insert(&self.db).await?;
        Ok(movement)
    }

    /// Overwrites a movement's historical fields (generic update).
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::NotFound`] if the movement does not exist.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateMovementInput,
    ) -> Result<movements::Model, MovementError> {
        let movement = movements::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MovementError::NotFound(id))?;

        let mut active: movements::ActiveModel = movement.into();
        active.occurred_at = Set(input.occurred_at);
        active.description = Set(input.description);
        active.amount = Set(input.amount);
        active.balance = Set(input.balance);

        let movement = active.update(&self.db).await?;
        Ok(movement)
    }

    /// Deletes a movement, returning the removed row.
    ///
    /// The account balance is deliberately not recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::NotFound`] if the movement does not exist.
    pub async fn delete(&self, id: i64) -> Result<movements::Model, MovementError> {
        let movement = movements::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MovementError::NotFound(id))?;

        movement.clone().delete(&self.db).await?;
        Ok(movement)
    }
}
