//! Chat-widget collaborator boundary.
//!
//! The core never manages chat state: it only hands the embeddable
//! third-party widget its webhook URL and static display configuration. The
//! configuration is an explicit value built once per page load (served at
//! `GET /api/v1/chat/config`), not a global mutation; the widget owns its own
//! lifecycle from there.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::util::fill_template;

/// Bootstrap options for the embedded chat widget. Field names follow the
/// widget's own camelCase contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatWidgetConfig {
  pub webhook_url: String,
  pub mode: &'static str,
  pub chat_input_key: &'static str,
  pub chat_session_key: &'static str,
  pub show_welcome_screen: bool,
  pub default_language: &'static str,
  pub i18n: ChatStrings,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStrings {
  pub title: String,
  pub subtitle: String,
  pub footer: String,
  pub get_started: String,
  pub input_placeholder: String,
  pub welcome_message: String,
}

impl ChatWidgetConfig {
  pub fn from_site(cfg: &SiteConfig) -> Self {
    let name: &[(&str, &str)] = &[("name", &cfg.coaching_name)];
    Self {
      webhook_url: cfg.chat_webhook_url.clone(),
      mode: "window",
      chat_input_key: "chatInput",
      chat_session_key: "sessionId",
      show_welcome_screen: true,
      default_language: "en",
      i18n: ChatStrings {
        title: fill_template("Welcome to {name}", name),
        subtitle: "How can we help you today? Our team is available 24/7.".into(),
        footer: "Powered by AI Assistant".into(),
        get_started: "Start New Chat".into(),
        input_placeholder: "Type your question here...".into(),
        welcome_message: fill_template(
          "Hi there! 👋 Welcome to {name}. I'm your virtual assistant. Ask me anything about our courses, admissions, or learning support!",
          name,
        ),
      },
    }
  }
}
