//! Riddle Worksheets · math practice generator backend
//!
//! - Axum HTTP API producing worksheets whose answers spell a riddle's answer
//! - Built-in generators per standard and a built-in riddle bank (lengths 3-15)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   WORKSHEET_CONFIG_PATH : path to TOML config (engine tuning + extra riddles)
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod catalog;
mod config;
mod decoys;
mod domain;
mod error;
mod logic;
mod normalize;
mod planner;
mod problems;
mod protocol;
mod routes;
mod seeds;
mod sequencer;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Catalog, provider and engine tuning are built once and shared read-only.
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "riddle_worksheets", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "riddle_worksheets", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "riddle_worksheets", "Shutdown signal received");
}
