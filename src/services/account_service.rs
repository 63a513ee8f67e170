//! Domain service for registration, login, and admin user management.

use thiserror::Error;

use crate::models::user::UserAccount;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("That email is already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User {0} not found")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result of a successful login. `promoted` is true when this login
/// elevated the account to admin via the promotion token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserAccount,
    pub promoted: bool,
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates a new account with role `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateEmail`] when the email is taken.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AccountError>;

    /// Verifies credentials. A matching promotion token elevates the
    /// account to admin before the outcome is returned; the elevation is
    /// persisted and survives later logins with any code.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when the email is
    /// unknown or the password does not match.
    async fn login(
        &self,
        email: &str,
        password: &str,
        secret_code: Option<&str>,
    ) -> Result<LoginOutcome, AccountError>;

    /// Looks up an account by id.
    async fn get_user(&self, id: i32) -> Result<Option<UserAccount>, AccountError>;

    /// Deletes an account. Cafes authored by the user keep existing with
    /// their author reference cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the id does not resolve.
    async fn delete_user(&self, id: i32) -> Result<(), AccountError>;
}
