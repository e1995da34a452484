//! Service entry-point: wires storage adapters, REST endpoints, and
//! OpenAPI docs.
//!
//! Configuration comes from the environment:
//!
//! - `BIND_ADDR` - listen address, default `0.0.0.0:8080`.
//! - `DATABASE_URL` - PostgreSQL URL for the relational backend.
//! - `MONGODB_URI` / `MONGODB_DATABASE` - document backend connection.
//! - `RUST_LOG` - tracing filter.
//!
//! A backend whose URL is absent falls back to an in-memory fixture store
//! so the server still runs in development.

mod server;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{FixtureUserStore, UserStore};
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, DieselUserStore, MongoUserStore, PoolConfig};
use server::ServerConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let relational_store = build_relational_store().await?;
    let document_store = build_document_store().await?;

    let config = ServerConfig::new(bind_addr)
        .with_relational_store(relational_store)
        .with_document_store(document_store);

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}

/// Build the relational store, running pending migrations first.
///
/// Falls back to the in-memory fixture when `DATABASE_URL` is not set.
async fn build_relational_store() -> std::io::Result<Arc<dyn UserStore>> {
    let Ok(database_url) = env::var("DATABASE_URL") else {
        warn!("DATABASE_URL not set, using in-memory relational store");
        return Ok(Arc::new(FixtureUserStore::new()));
    };

    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("relational pool: {e}")))?;
    info!("relational backend connected");
    Ok(Arc::new(DieselUserStore::new(pool)))
}

/// Run embedded migrations on a blocking thread.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;

        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("database connection: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(format!("migrations: {e}")))
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task: {e}")))?
}

/// Build the document store, ensuring its unique index exists.
///
/// Falls back to the in-memory fixture when `MONGODB_URI` is not set.
async fn build_document_store() -> std::io::Result<Arc<dyn UserStore>> {
    let Ok(uri) = env::var("MONGODB_URI") else {
        warn!("MONGODB_URI not set, using in-memory document store");
        return Ok(Arc::new(FixtureUserStore::new()));
    };
    let database_name = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "users".into());

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .map_err(|e| std::io::Error::other(format!("mongodb client: {e}")))?;
    let store = MongoUserStore::new(&client.database(&database_name));
    store
        .ensure_indexes()
        .await
        .map_err(|e| std::io::Error::other(format!("mongodb indexes: {e}")))?;
    info!(database = %database_name, "document backend connected");
    Ok(Arc::new(store))
}
