//! `SeaORM` implementation of the `DirectoryService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::cafe::{Cafe, NewCafe};
use crate::services::directory_service::{DirectoryError, DirectoryService};

pub struct SeaOrmDirectoryService {
    store: Store,
}

impl SeaOrmDirectoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DirectoryService for SeaOrmDirectoryService {
    async fn list_all(&self) -> Result<Vec<Cafe>, DirectoryError> {
        Ok(self.store.list_cafes().await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Cafe>, DirectoryError> {
        Ok(self.store.get_cafe(id).await?)
    }

    async fn random_one(&self) -> Result<Cafe, DirectoryError> {
        use rand::Rng;

        let mut cafes = self.store.list_cafes().await?;

        if cafes.is_empty() {
            return Err(DirectoryError::EmptyDirectory);
        }

        let idx = rand::rng().random_range(0..cafes.len());
        Ok(cafes.swap_remove(idx))
    }

    async fn search_by_location(&self, location: &str) -> Result<Vec<Cafe>, DirectoryError> {
        Ok(self.store.find_cafes_by_location(location).await?)
    }

    async fn add_cafe(&self, cafe: NewCafe, author_id: i32) -> Result<Cafe, DirectoryError> {
        // Pre-check; the unique index on name is the backstop for races.
        if self.store.find_cafe_by_name(&cafe.name).await?.is_some() {
            return Err(DirectoryError::DuplicateName(cafe.name));
        }

        let created = self.store.add_cafe(&cafe, Some(author_id)).await?;

        info!("Added cafe: {} ({})", created.name, created.location);

        Ok(created)
    }

    async fn update_price(&self, id: i32, new_price: &str) -> Result<Cafe, DirectoryError> {
        let updated = self
            .store
            .update_cafe_price(id, new_price)
            .await?
            .ok_or(DirectoryError::NotFound(id))?;

        info!("Updated price for cafe {} to {}", id, new_price);

        Ok(updated)
    }

    async fn delete_cafe(&self, id: i32) -> Result<(), DirectoryError> {
        let removed = self.store.delete_cafe(id).await?;

        if !removed {
            return Err(DirectoryError::NotFound(id));
        }

        info!("Deleted cafe with ID: {}", id);
        Ok(())
    }
}
