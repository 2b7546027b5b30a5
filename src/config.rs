//! Site configuration: webhook URLs, branding, and pipeline limits.
//!
//! Loaded from a TOML file at `SITE_CONFIG_PATH` when present; every field
//! has a default so the server also boots bare. The three webhook URLs can
//! additionally be overridden via environment variables, which is how
//! deployments point at their own workflow instances:
//!
//!   GENERATOR_WEBHOOK_URL : quiz generation endpoint
//!   LEAD_WEBHOOK_URL      : enrollment lead endpoint
//!   CHAT_WEBHOOK_URL      : chat widget endpoint

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  pub generator_webhook_url: String,
  pub lead_webhook_url: String,
  pub chat_webhook_url: String,

  /// Display name used in branded widget strings.
  pub coaching_name: String,
  /// Branches a lead may pick; validated by the lead schema.
  pub branches: Vec<String>,
  /// Courses offered, surfaced to the enrollment form.
  pub courses: Vec<String>,

  /// Inclusive upper bound on questions per generation request.
  pub max_questions: u32,
  /// Outbound HTTP timeout; bounds a hung generation call so the pipeline
  /// cannot sit in-flight forever.
  pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      generator_webhook_url: "http://localhost:5678/webhook/generate-quiz".into(),
      lead_webhook_url: "http://localhost:5678/webhook/enroll-lead".into(),
      chat_webhook_url: "http://localhost:5678/webhook/chat".into(),
      coaching_name: "Pinnacle Coaching Center".into(),
      branches: vec![
        "ECIL , Hyderabad".into(),
        "Ameerpet , Hyderabad".into(),
        "Koti , Hyderabad".into(),
      ],
      courses: vec![
        "IIT-JEE".into(),
        "NEET".into(),
        "EAMCET".into(),
        "Foundation (8th-10th)".into(),
        "CLAT".into(),
        "CA Foundation".into(),
      ],
      max_questions: 30,
      request_timeout_secs: 30,
    }
  }
}

/// Load config from `SITE_CONFIG_PATH` (TOML) with env-var webhook overrides.
/// Any read/parse failure is logged and falls back to defaults rather than
/// refusing to boot.
pub fn load_site_config_from_env() -> SiteConfig {
  let mut cfg = match std::env::var("SITE_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<SiteConfig>(&s) {
        Ok(cfg) => {
          info!(target: "coachsite_backend", %path, "Loaded site config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "coachsite_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          SiteConfig::default()
        }
      },
      Err(e) => {
        error!(target: "coachsite_backend", %path, error = %e, "Failed to read config file; using defaults");
        SiteConfig::default()
      }
    },
    Err(_) => SiteConfig::default(),
  };

  if let Ok(url) = std::env::var("GENERATOR_WEBHOOK_URL") {
    cfg.generator_webhook_url = url;
  }
  if let Ok(url) = std::env::var("LEAD_WEBHOOK_URL") {
    cfg.lead_webhook_url = url;
  }
  if let Ok(url) = std::env::var("CHAT_WEBHOOK_URL") {
    cfg.chat_webhook_url = url;
  }
  cfg
}
