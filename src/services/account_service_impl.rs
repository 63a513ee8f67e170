//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::user::hash_password;
use crate::models::user::UserAccount;
use crate::services::account_service::{AccountError, AccountService, LoginOutcome};

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AccountError> {
        // Pre-check; the unique index on email is the backstop for races.
        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .map_err(|e| AccountError::Internal(format!("Password hashing task panicked: {e}")))??;

        let user = self
            .store
            .create_user(username, email, &password_hash)
            .await?;

        info!("Registered new user: {}", user.username);

        Ok(user)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        secret_code: Option<&str>,
    ) -> Result<LoginOutcome, AccountError> {
        let user = self
            .store
            .verify_user_credentials(email, password)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let token_matches = matches!(
            (secret_code, self.security.admin_promotion_token.as_deref()),
            (Some(code), Some(token)) if !token.is_empty() && code == token
        );

        if token_matches && !user.is_admin() {
            self.store.promote_user_to_admin(user.id).await?;

            // Re-read so the outcome carries the persisted role.
            let user = self
                .store
                .get_user_by_id(user.id)
                .await?
                .ok_or(AccountError::NotFound(user.id))?;

            info!("Promoted user {} to admin", user.username);

            return Ok(LoginOutcome {
                user,
                promoted: true,
            });
        }

        Ok(LoginOutcome {
            user,
            promoted: false,
        })
    }

    async fn get_user(&self, id: i32) -> Result<Option<UserAccount>, AccountError> {
        Ok(self.store.get_user_by_id(id).await?)
    }

    async fn delete_user(&self, id: i32) -> Result<(), AccountError> {
        let removed = self.store.delete_user(id).await?;

        if !removed {
            return Err(AccountError::NotFound(id));
        }

        info!("Deleted user with ID: {}", id);
        Ok(())
    }
}
