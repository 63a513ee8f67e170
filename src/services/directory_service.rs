//! Domain service for browsing and administering the cafe directory.

use thiserror::Error;

use crate::models::cafe::{Cafe, NewCafe};

/// Errors specific to directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("No cafes available")]
    EmptyDirectory,

    #[error("A cafe named '{0}' already exists")]
    DuplicateName(String),

    #[error("Cafe {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for DirectoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for the cafe directory.
#[async_trait::async_trait]
pub trait DirectoryService: Send + Sync {
    /// Every cafe in storage. An empty directory is an empty vec, not an
    /// error.
    async fn list_all(&self) -> Result<Vec<Cafe>, DirectoryError>;

    /// Detail lookup by id.
    async fn get(&self, id: i32) -> Result<Option<Cafe>, DirectoryError>;

    /// One cafe chosen uniformly at random from the full set.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::EmptyDirectory`] when there are none.
    async fn random_one(&self) -> Result<Cafe, DirectoryError>;

    /// Exact-match filter on the location attribute. May be empty.
    async fn search_by_location(&self, location: &str) -> Result<Vec<Cafe>, DirectoryError>;

    /// Persists a new cafe authored by the acting admin.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateName`] when the name is taken.
    async fn add_cafe(&self, cafe: NewCafe, author_id: i32) -> Result<Cafe, DirectoryError>;

    /// Overwrites the coffee price and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when the id does not resolve.
    async fn update_price(&self, id: i32, new_price: &str) -> Result<Cafe, DirectoryError>;

    /// Removes a cafe.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when the id does not resolve.
    async fn delete_cafe(&self, id: i32) -> Result<(), DirectoryError>;
}
