//! CodeTrack - aggregated competitive-programming statistics
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the HTTP API with database-backed cookie sessions
//! - One adapter per external platform (LeetCode, GeeksforGeeks,
//!   CodeForces) normalizing into a common shape
//! - Tokio for the async runtime

mod entity;
mod error;
mod migration;
mod model;
mod platforms;
mod prelude;
mod server;
mod state;
mod sv;
mod utils;

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{prelude::*, state::AppState};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "codetrack=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:codetrack.db?mode=rwc".into());

  info!("Starting CodeTrack v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(&db_url).await);

  // Expired-session sweeper
  let gc_app = app.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_secs(
      gc_app.config.session_gc_interval,
    ));
    loop {
      interval.tick().await;
      match gc_app.sv().session.prune_expired().await {
        Ok(0) => {}
        Ok(pruned) => debug!("Pruned {pruned} expired sessions"),
        Err(err) => error!("Session pruning failed: {err}"),
      }
    }
  });

  let router = server::router(app);

  let port: u16 =
    env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {addr}");

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(listener, router).await.expect("Server error");
}
