//! HTTP client for the external webhooks: quiz generation and lead forwarding.
//!
//! Exactly one outbound POST per user-initiated submission, no retries. The
//! generation body keys are the human-readable field labels the external
//! workflow contract dictates; they must be preserved byte-for-byte.
//!
//! Outcome classification:
//!   - network failure / non-2xx status  -> `GenerationError::Transport`
//!   - 2xx body that is not a sequence   -> `GenerationError::InvalidFormat`
//!
//! We log status codes and truncated bodies, never visitor emails.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::config::SiteConfig;
use crate::domain::QuestionModel;
use crate::normalize::{normalize_elements, unwrap_elements};
use crate::schema::{GenerationRequest, LeadRequest};
use crate::util::trunc_for_log;

/// Failures the generation pipeline can surface. Field-level validation never
/// reaches this type; it is handled before a client is involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
  /// Network failure or non-2xx response.
  Transport(String),
  /// Response received but its body is not a question sequence.
  InvalidFormat,
}

impl fmt::Display for GenerationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Transport(reason) => write!(f, "generation request failed: {reason}"),
      Self::InvalidFormat => write!(f, "invalid response format"),
    }
  }
}

impl std::error::Error for GenerationError {}

/// Seam between the controller and the transport, so the state machine is
/// testable without a network.
pub trait QuestionSource {
  fn generate(
    &self,
    request: &GenerationRequest,
  ) -> impl Future<Output = Result<Vec<QuestionModel>, GenerationError>> + Send;
}

#[derive(Clone)]
pub struct GenerationClient {
  client: reqwest::Client,
  quiz_webhook: String,
  lead_webhook: String,
}

impl GenerationClient {
  pub fn new(cfg: &SiteConfig) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.request_timeout_secs))
      .build()?;
    Ok(Self {
      client,
      quiz_webhook: cfg.generator_webhook_url.clone(),
      lead_webhook: cfg.lead_webhook_url.clone(),
    })
  }

  /// One POST to the generation webhook; classify and normalize the outcome.
  #[instrument(level = "info", skip(self, request), fields(count = request.question_count(), difficulty = request.difficulty().label()))]
  pub async fn post_quiz(
    &self,
    request: &GenerationRequest,
  ) -> Result<Vec<QuestionModel>, GenerationError> {
    // Keys dictated by the external workflow; do not rename.
    let body = serde_json::json!({
      "Subject/Topic": request.topic(),
      "Number of Questions": request.question_count(),
      "Difficulty Level": request.difficulty().label(),
      "Question Format": request.format().label(),
      "Your Mail ID": request.email(),
    });

    let res = self
      .client
      .post(&self.quiz_webhook)
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/json")
      .json(&body)
      .send()
      .await
      .map_err(|e| {
        error!(target: "quiz", error = %e, "Generation request did not reach the webhook");
        GenerationError::Transport(e.to_string())
      })?;

    let status = res.status();
    let text = res.text().await.map_err(|e| {
      error!(target: "quiz", error = %e, "Failed reading generation response body");
      GenerationError::Transport(e.to_string())
    })?;

    if !status.is_success() {
      error!(target: "quiz", %status, body = %trunc_for_log(&text, 200), "Generation webhook returned an error status");
      return Err(GenerationError::Transport(format!("HTTP {status}")));
    }

    let value: Value = serde_json::from_str(&text).map_err(|e| {
      warn!(target: "quiz", error = %e, body = %trunc_for_log(&text, 200), "Generation response is not JSON");
      GenerationError::InvalidFormat
    })?;
    let elements = unwrap_elements(&value).ok_or_else(|| {
      warn!(target: "quiz", body = %trunc_for_log(&text, 200), "Generation response is not a question sequence");
      GenerationError::InvalidFormat
    })?;

    let questions = normalize_elements(&elements);
    info!(target: "quiz", received = questions.len(), "Generation response normalized");
    Ok(questions)
  }

  /// Forward a validated enrollment lead: a one-element JSON array with the
  /// original human-readable keys, as the lead workflow expects.
  #[instrument(level = "info", skip(self, lead), fields(courses = lead.courses.len(), branch = %lead.branch))]
  pub async fn post_lead(&self, lead: &LeadRequest) -> Result<(), GenerationError> {
    let mobile_number = lead
      .mobile
      .chars()
      .filter(char::is_ascii_digit)
      .collect::<String>()
      .parse::<u64>()
      .unwrap_or(0);

    let payload = serde_json::json!([{
      "What is your name": lead.name,
      "What is your email?": lead.email,
      "Mobile Number": mobile_number,
      "Which Course you are interested in": lead.courses,
      "Preferred learning mode": lead.mode.label(),
      "City/Branch": lead.branch,
      "Learning Goal": lead.goal,
      "submittedAt": chrono::Utc::now().to_rfc3339(),
      "formMode": "test",
    }]);

    let res = self
      .client
      .post(&self.lead_webhook)
      .header(CONTENT_TYPE, "application/json")
      .json(&payload)
      .send()
      .await
      .map_err(|e| {
        error!(target: "coachsite_backend", error = %e, "Lead submission did not reach the webhook");
        GenerationError::Transport(e.to_string())
      })?;

    let status = res.status();
    if !status.is_success() {
      error!(target: "coachsite_backend", %status, "Lead webhook returned an error status");
      return Err(GenerationError::Transport(format!("HTTP {status}")));
    }
    info!(target: "coachsite_backend", "Lead forwarded");
    Ok(())
  }
}

impl QuestionSource for GenerationClient {
  fn generate(
    &self,
    request: &GenerationRequest,
  ) -> impl Future<Output = Result<Vec<QuestionModel>, GenerationError>> + Send {
    self.post_quiz(request)
  }
}
