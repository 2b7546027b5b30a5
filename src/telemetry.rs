//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! LOG_LEVEL takes an EnvFilter string ("debug", or directives such as
//! "info,quiz=debug,coachsite_backend=debug"). LOG_FORMAT picks "pretty"
//! (default) or "json" structured output. The tower-http TraceLayer adds
//! per-request spans on top of this.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
    EnvFilter::new("info,quiz=debug,coachsite_backend=debug,tower_http=info,axum=info")
  });

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    _ => builder.init(),
  }
}
