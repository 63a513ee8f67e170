use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::cafe::{Cafe, NewCafe};
use crate::models::user::UserAccount;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn cafe_repo(&self) -> repositories::cafe::CafeRepository {
        repositories::cafe::CafeRepository::new(self.conn.clone())
    }

    // ========== User Repository Methods ==========

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserAccount> {
        self.user_repo().create(username, email, password_hash).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<UserAccount>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn verify_user_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserAccount>> {
        self.user_repo().verify_credentials(email, password).await
    }

    pub async fn promote_user_to_admin(&self, id: i32) -> Result<()> {
        self.user_repo().promote_to_admin(id).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // ========== Cafe Repository Methods ==========

    pub async fn add_cafe(&self, cafe: &NewCafe, author_id: Option<i32>) -> Result<Cafe> {
        self.cafe_repo().insert(cafe, author_id).await
    }

    pub async fn get_cafe(&self, id: i32) -> Result<Option<Cafe>> {
        self.cafe_repo().get(id).await
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>> {
        self.cafe_repo().list_all().await
    }

    pub async fn find_cafe_by_name(&self, name: &str) -> Result<Option<Cafe>> {
        self.cafe_repo().find_by_name(name).await
    }

    pub async fn find_cafes_by_location(&self, location: &str) -> Result<Vec<Cafe>> {
        self.cafe_repo().find_by_location(location).await
    }

    pub async fn update_cafe_price(&self, id: i32, new_price: &str) -> Result<Option<Cafe>> {
        self.cafe_repo().update_price(id, new_price).await
    }

    pub async fn delete_cafe(&self, id: i32) -> Result<bool> {
        self.cafe_repo().delete(id).await
    }

    pub async fn count_cafes(&self) -> Result<u64> {
        self.cafe_repo().count().await
    }
}
