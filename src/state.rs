//! Shared application state: site config, the webhook client, and the
//! generation controller. The controller is the sole writer of the request
//! lifecycle; handlers only call into it or read snapshots.

use tracing::{info, instrument};

use crate::client::GenerationClient;
use crate::config::{load_site_config_from_env, SiteConfig};
use crate::controller::GenerationController;

pub struct AppState {
  pub config: SiteConfig,
  pub client: GenerationClient,
  pub controller: GenerationController<GenerationClient>,
}

impl AppState {
  /// Build state from env: load config and construct the HTTP client.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Result<Self, reqwest::Error> {
    let config = load_site_config_from_env();
    info!(
      target: "coachsite_backend",
      generator = %config.generator_webhook_url,
      max_questions = config.max_questions,
      timeout_secs = config.request_timeout_secs,
      "Site config loaded"
    );

    let client = GenerationClient::new(&config)?;
    let controller = GenerationController::new(client.clone());
    Ok(Self { config, client, controller })
  }
}
