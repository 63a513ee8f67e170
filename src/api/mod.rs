use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use time;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, DirectoryService, SeaOrmAccountService, SeaOrmDirectoryService,
};

pub mod auth;
pub mod cafes;
mod error;
mod observability;
mod system;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub accounts: Arc<dyn AccountService>,

    pub directory: Arc<dyn DirectoryService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn AccountService> {
        &self.accounts
    }

    #[must_use]
    pub fn directory(&self) -> &Arc<dyn DirectoryService> {
        &self.directory
    }
}

pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let accounts = Arc::new(SeaOrmAccountService::new(
        store.clone(),
        config.security.clone(),
    )) as Arc<dyn AccountService>;

    let directory = Arc::new(SeaOrmDirectoryService::new(store.clone())) as Arc<dyn DirectoryService>;

    Ok(Arc::new(AppState {
        config,
        store,
        accounts,
        directory,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    // Sessions persist next to the application data, in the same SQLite
    // database the entities live in.
    let session_store = SqliteStore::new(state.store.conn.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_ttl_minutes,
        )));

    let admin_routes = create_admin_router(state.clone());

    let api_router = Router::new()
        .route("/cafes", get(cafes::list_cafes))
        .route("/cafes/random", get(cafes::random_cafe))
        .route("/cafes/search", post(cafes::search_cafes))
        .route("/cafes/{id}", get(cafes::get_cafe))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .merge(admin_routes)
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Ok(Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware)))
}

fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/cafes", post(cafes::add_cafe))
        .route(
            "/cafes/{id}/price",
            put(cafes::update_price).patch(cafes::update_price),
        )
        .route("/cafes/{id}", delete(cafes::delete_cafe))
        .route("/users/{id}", delete(users::delete_user))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
