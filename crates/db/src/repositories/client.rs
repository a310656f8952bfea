//! Client repository for the customer registry.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder, Set,
};

use neobank_core::auth::{self, PasswordError};
use neobank_shared::AppError;

use crate::entities::clients;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("client not found with id: {0}")]
    NotFound(i64),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => Self::NotFound(err.to_string()),
            ClientError::Password(_) => Self::Internal(err.to_string()),
            ClientError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for registering a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Display name.
    pub name: String,
    /// Gender label.
    pub gender: String,
    /// Age in years.
    pub age: i64,
    /// National identification string.
    pub national_id: String,
    /// Postal address.
    pub address: String,
    /// Phone number, if known.
    pub phone: Option<String>,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Whether the client starts active.
    pub active: bool,
}

/// Input for overwriting a client.
///
/// All attribute fields are overwritten; the password is re-hashed only when
/// a non-empty value is supplied.
#[derive(Debug, Clone)]
pub struct UpdateClientInput {
    /// Display name.
    pub name: String,
    /// Gender label.
    pub gender: String,
    /// Age in years.
    pub age: i64,
    /// National identification string.
    pub national_id: String,
    /// Postal address.
    pub address: String,
    /// Phone number, if known.
    pub phone: Option<String>,
    /// New plaintext password, when changing it.
    pub password: Option<String>,
    /// Whether the client is active.
    pub active: bool,
}

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all clients ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<clients::Model>, ClientError> {
        let clients = clients::Entity::find()
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await?;
        Ok(clients)
    }

    /// Finds a client by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<clients::Model>, ClientError> {
        let client = clients::Entity::find_by_id(id).one(&self.db).await?;
        Ok(client)
    }

    /// Registers a client, hashing the password before storage.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails.
    pub async fn create(&self, input: CreateClientInput) -> Result<clients::Model, ClientError> {
        let password_hash = auth::hash_password(&input.password)?;

        let client = clients::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(input.name),
            gender: Set(input.gender),
            age: Set(input.age),
            national_id: Set(input.national_id),
            address: Set(input.address),
            phone: Set(input.phone),
            password_hash: Set(password_hash),
            is_active: Set(input.active),
        };

        let client = client.insert(&self.db).await?;
        Ok(client)
    }

    /// Overwrites a client's attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the client does not exist.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateClientInput,
    ) -> Result<clients::Model, ClientError> {
        let client = clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(id))?;

        let mut active: clients::ActiveModel = client.into();
        active.name = Set(input.name);
        active.gender = Set(input.gender);
        active.age = Set(input.age);
        active.national_id = Set(input.national_id);
        active.address = Set(input.address);
        active.phone = Set(input.phone);
        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            active.password_hash = Set(auth::hash_password(&password)?);
        }
        active.is_active = Set(input.active);

        let client = active.update(&self.db).await?;
        Ok(client)
    }

    /// Deletes a client, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the client does not exist.
    pub async fn delete(&self, id: i64) -> Result<clients::Model, ClientError> {
        let client = clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(id))?;

        client.clone().delete(&self.db).await?;
        Ok(client)
    }
}
