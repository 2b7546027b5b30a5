//! HTTP endpoint handlers. Thin instrumented wrappers over the pipeline:
//! schema validates, the controller runs the single-flight attempt, the
//! renderer shapes the success payload. All failure classes resolve to a JSON
//! body here; nothing propagates past this boundary.

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::chat::ChatWidgetConfig;
use crate::controller::Submission;
use crate::protocol::*;
use crate::render::render;
use crate::schema::{validate_lead_form, validate_quiz_form};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(topic_len = body.topic.len(), count = %body.question_count))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> Response {
  let raw = body.into_raw();
  let request = match validate_quiz_form(&raw, state.config.max_questions) {
    Ok(request) => request,
    Err(errors) => {
      info!(target: "quiz", fields = errors.len(), "Generate request rejected by schema");
      return (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationOut { errors })).into_response();
    }
  };

  match state.controller.submit(request).await {
    Submission::Succeeded(questions) => {
      let blocks = render(&questions);
      info!(target: "quiz", blocks = blocks.len(), "Generate request served");
      Json(GenerateOut { count: blocks.len(), blocks }).into_response()
    }
    Submission::Failed(reason) => {
      (StatusCode::BAD_GATEWAY, Json(ErrorOut { message: reason })).into_response()
    }
    Submission::Rejected => (
      StatusCode::CONFLICT,
      Json(ErrorOut { message: "a generation request is already in flight".into() }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let outcome = state.controller.snapshot().await;
  Json(StatusOut::from_outcome(&outcome))
}

#[instrument(level = "info", skip(state, body), fields(courses = body.courses.len()))]
pub async fn http_post_enroll(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EnrollIn>,
) -> Response {
  let raw = body.into_raw();
  let lead = match validate_lead_form(&raw, &state.config.branches) {
    Ok(lead) => lead,
    Err(errors) => {
      info!(target: "coachsite_backend", fields = errors.len(), "Lead rejected by schema");
      return (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationOut { errors })).into_response();
    }
  };

  match state.client.post_lead(&lead).await {
    Ok(()) => Json(EnrollOut { submitted: true }).into_response(),
    Err(e) => (StatusCode::BAD_GATEWAY, Json(ErrorOut { message: e.to_string() })).into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_chat_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(ChatWidgetConfig::from_site(&state.config))
}
