//! Public HTTP request/response DTOs (serde ready).
//! Kept small and separate from the domain so the API can evolve
//! independently of the pipeline's internal types.

use serde::{Deserialize, Serialize};

use crate::controller::GenerationOutcome;
use crate::render::QuestionBlock;
use crate::schema::{FieldError, LeadFormRaw, QuizFormRaw};

/// Raw quiz-form fields as the page submits them. Everything arrives as text;
/// coercion and validation happen in the schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIn {
  pub topic: String,
  pub question_count: String,
  pub difficulty: String,
  pub format: String,
  pub email: String,
}

impl GenerateIn {
  pub fn into_raw(self) -> QuizFormRaw {
    QuizFormRaw {
      topic: self.topic,
      question_count: self.question_count,
      difficulty: self.difficulty,
      format: self.format,
      email: self.email,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct GenerateOut {
  pub count: usize,
  pub blocks: Vec<QuestionBlock>,
}

/// Field-level validation failures, surfaced inline next to each field.
#[derive(Debug, Serialize)]
pub struct ValidationOut {
  pub errors: Vec<FieldError>,
}

/// Single user-visible message for transport/format failures.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
  pub message: String,
}

/// Lifecycle snapshot for the polling UI.
#[derive(Debug, Serialize)]
pub struct StatusOut {
  pub state: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub questions: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl StatusOut {
  pub fn from_outcome(outcome: &GenerationOutcome) -> Self {
    match outcome {
      GenerationOutcome::Idle => Self { state: "idle", questions: None, error: None },
      GenerationOutcome::InFlight => Self { state: "in_flight", questions: None, error: None },
      GenerationOutcome::Succeeded { questions } => {
        Self { state: "succeeded", questions: Some(questions.len()), error: None }
      }
      GenerationOutcome::Failed { reason } => {
        Self { state: "failed", questions: None, error: Some(reason.clone()) }
      }
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct EnrollIn {
  pub name: String,
  pub email: String,
  pub mobile: String,
  pub courses: Vec<String>,
  pub mode: String,
  pub branch: String,
  pub goal: String,
}

impl EnrollIn {
  pub fn into_raw(self) -> LeadFormRaw {
    LeadFormRaw {
      name: self.name,
      email: self.email,
      mobile: self.mobile,
      courses: self.courses,
      mode: self.mode,
      branch: self.branch,
      goal: self.goal,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct EnrollOut {
  pub submitted: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
