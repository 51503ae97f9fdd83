use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::FromRef, Router};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{error, info};

use crate::{cors, database::PostgresConnection};

pub struct Options {
    pub database_pool_size: u32,
    pub database_timeout_seconds: u8,
    pub database_url: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    db: PgPool,
}

pub async fn serve(opts: Options) -> anyhow::Result<()> {
    let db_pool = PgPoolOptions::new()
        .max_connections(opts.database_pool_size)
        .acquire_timeout(Duration::from_secs(opts.database_timeout_seconds.into()))
        .connect(&opts.database_url)
        .await?;

    let state = AppState {
        db: db_pool.clone(),
    };

    let app = Router::new()
        .merge(crate::accounts::http::routes())
        .merge(crate::transactions::http::routes())
        .merge(crate::cheques::http::routes())
        .merge(crate::reports::http::routes())
        .layer(cors::layer())
        .with_state(state);

    let address = SocketAddr::from(([0, 0, 0, 0], opts.port));
    info!(%address, "Starting server.");

    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain the pool so in-flight statements finish before the process exits.
    db_pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(?error, "Failed to listen for the shutdown signal.");
    }

    info!("Shutting down.");
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for PostgresConnection {
    fn from_ref(state: &AppState) -> Self {
        PostgresConnection::new(state.db.clone())
    }
}
