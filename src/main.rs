//! Coaching-site backend
//!
//! - Axum HTTP API for the quiz-generation pipeline and its collaborators
//! - Static site pages served from ./static
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   SITE_CONFIG_PATH      : path to TOML config (webhooks, branding, limits)
//!   GENERATOR_WEBHOOK_URL : quiz generation endpoint override
//!   LEAD_WEBHOOK_URL      : enrollment lead endpoint override
//!   CHAT_WEBHOOK_URL      : chat widget endpoint override
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod normalize;
mod schema;
mod config;
mod client;
mod controller;
mod render;
mod chat;
mod protocol;
mod state;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (config, webhook client, controller).
  let state = Arc::new(AppState::new()?);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "coachsite_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
