//! The generation request lifecycle: a single-flight state machine.
//!
//! States: Idle -> InFlight -> Succeeded | Failed, re-entrant from the two
//! terminal states. The controller is the only writer of the outcome value;
//! everything else reads snapshots. The single-flight guard lives here in the
//! state machine, not in any UI wiring: a submit arriving while a request is
//! in flight is rejected before a network call is even attempted.

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::client::QuestionSource;
use crate::domain::QuestionModel;
use crate::schema::GenerationRequest;

/// Lifecycle state of the most recent generation attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationOutcome {
  Idle,
  InFlight,
  Succeeded { questions: Vec<QuestionModel> },
  Failed { reason: String },
}

/// Result of a submit call, as seen by the caller that initiated it.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
  Succeeded(Vec<QuestionModel>),
  Failed(String),
  /// A request was already in flight; no network call was made.
  Rejected,
}

pub struct GenerationController<S> {
  source: S,
  outcome: RwLock<GenerationOutcome>,
}

impl<S: QuestionSource> GenerationController<S> {
  pub fn new(source: S) -> Self {
    Self { source, outcome: RwLock::new(GenerationOutcome::Idle) }
  }

  /// Run one generation attempt to completion.
  ///
  /// Rejects when already `InFlight` (at most one outstanding request).
  /// Otherwise the prior result or error is discarded, the state moves to
  /// `InFlight`, the source is called exactly once, and the terminal outcome
  /// is stored and returned.
  pub async fn submit(&self, request: GenerationRequest) -> Submission {
    {
      let mut outcome = self.outcome.write().await;
      if matches!(*outcome, GenerationOutcome::InFlight) {
        warn!(target: "quiz", "Submit rejected: a generation request is already in flight");
        return Submission::Rejected;
      }
      *outcome = GenerationOutcome::InFlight;
    }

    let (submission, terminal) = match self.source.generate(&request).await {
      Ok(questions) => {
        info!(target: "quiz", count = questions.len(), "Generation succeeded");
        (
          Submission::Succeeded(questions.clone()),
          GenerationOutcome::Succeeded { questions },
        )
      }
      Err(e) => {
        warn!(target: "quiz", error = %e, "Generation failed");
        let reason = e.to_string();
        (Submission::Failed(reason.clone()), GenerationOutcome::Failed { reason })
      }
    };

    let mut outcome = self.outcome.write().await;
    *outcome = terminal;
    submission
  }

  /// Snapshot of the current outcome for status readers.
  pub async fn snapshot(&self) -> GenerationOutcome {
    self.outcome.read().await.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::GenerationError;
  use crate::render::render;
  use crate::schema::{validate_quiz_form, QuizFormRaw};
  use serde_json::json;
  use std::future::Future;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;
  use tokio::sync::Notify;

  fn request(topic: &str, count: &str, format: &str) -> GenerationRequest {
    validate_quiz_form(
      &QuizFormRaw {
        topic: topic.into(),
        question_count: count.into(),
        difficulty: "Easy".into(),
        format: format.into(),
        email: "a@b.com".into(),
      },
      30,
    )
    .expect("valid request")
  }

  /// Source scripted with a fixed wire-shaped payload (or an error).
  struct ScriptedSource {
    calls: AtomicUsize,
    result: Result<Vec<serde_json::Value>, GenerationError>,
  }

  impl QuestionSource for ScriptedSource {
    fn generate(
      &self,
      _request: &GenerationRequest,
    ) -> impl Future<Output = Result<Vec<QuestionModel>, GenerationError>> + Send {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let result = self
        .result
        .clone()
        .map(|elements| crate::normalize::normalize_elements(&elements));
      async move { result }
    }
  }

  /// Source that parks until released, to hold the controller in flight.
  struct BlockingSource {
    calls: Arc<AtomicUsize>,
    release: Arc<Notify>,
  }

  impl QuestionSource for BlockingSource {
    fn generate(
      &self,
      _request: &GenerationRequest,
    ) -> impl Future<Output = Result<Vec<QuestionModel>, GenerationError>> + Send {
      let calls = Arc::clone(&self.calls);
      let release = Arc::clone(&self.release);
      async move {
        calls.fetch_add(1, Ordering::SeqCst);
        release.notified().await;
        Ok(Vec::new())
      }
    }
  }

  fn mcq_element(question: &str, answer: &str) -> serde_json::Value {
    json!({
      "type": "mcq",
      "question": question,
      "options": ["Berlin", "Madrid", answer, "Rome"],
      "answer": answer,
      "explanation": "Because."
    })
  }

  #[tokio::test]
  async fn valid_submit_resolves_to_succeeded_with_rendered_blocks() {
    let source = ScriptedSource {
      calls: AtomicUsize::new(0),
      result: Ok(vec![
        mcq_element("Q1?", "Paris"),
        mcq_element("Q2?", "Osmosis"),
        mcq_element("Q3?", "Diffusion"),
      ]),
    };
    let controller = GenerationController::new(source);

    let submission = controller.submit(request("Osmosis", "3", "MCQ")).await;
    let questions = match submission {
      Submission::Succeeded(questions) => questions,
      other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(questions.len(), 3);

    // The snapshot holds the same terminal state.
    match controller.snapshot().await {
      GenerationOutcome::Succeeded { questions: snap } => assert_eq!(snap.len(), 3),
      other => panic!("expected succeeded snapshot, got {other:?}"),
    }

    // Render round-trip: three mcq blocks, each pre-selecting its answer.
    let blocks = render(&questions);
    assert_eq!(blocks.len(), 3);
    for (block, expected) in blocks.iter().zip(["Paris", "Osmosis", "Diffusion"]) {
      assert_eq!(block.variant, "mcq");
      match &block.body {
        crate::render::BlockBody::Choices { options, answer, .. } => {
          assert_eq!(answer, expected);
          let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
          assert_eq!(selected.len(), 1);
          assert_eq!(selected[0].text, *expected);
        }
        other => panic!("expected choices body, got {other:?}"),
      }
    }
  }

  #[tokio::test]
  async fn non_sequence_response_resolves_to_failed_with_format_message() {
    let source = ScriptedSource {
      calls: AtomicUsize::new(0),
      result: Err(GenerationError::InvalidFormat),
    };
    let controller = GenerationController::new(source);

    let submission = controller.submit(request("Osmosis", "3", "MCQ")).await;
    assert_eq!(submission, Submission::Failed("invalid response format".into()));
    match controller.snapshot().await {
      GenerationOutcome::Failed { reason } => assert_eq!(reason, "invalid response format"),
      other => panic!("expected failed snapshot, got {other:?}"),
    }
    // Nothing to render in the failed state.
    assert!(render(&[]).is_empty());
  }

  #[tokio::test]
  async fn submit_while_in_flight_is_rejected_without_a_second_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let release = Arc::new(Notify::new());
    let controller = Arc::new(GenerationController::new(BlockingSource {
      calls: Arc::clone(&calls),
      release: Arc::clone(&release),
    }));

    let first = {
      let controller = Arc::clone(&controller);
      tokio::spawn(async move { controller.submit(request("Osmosis", "3", "MCQ")).await })
    };

    // Wait until the first request is actually in flight.
    while calls.load(Ordering::SeqCst) == 0 {
      tokio::task::yield_now().await;
    }
    assert_eq!(controller.snapshot().await, GenerationOutcome::InFlight);

    let second = controller.submit(request("Photosynthesis", "5", "Mixed")).await;
    assert_eq!(second, Submission::Rejected);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no second network call");

    release.notify_one();
    let resolved = first.await.expect("first submit completes");
    assert!(matches!(resolved, Submission::Succeeded(_)));

    // Terminal states are re-entrant: a fresh submit supersedes the outcome.
    release.notify_one();
    let third = controller.submit(request("Optics", "2", "True/False")).await;
    assert!(matches!(third, Submission::Succeeded(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn new_submit_discards_prior_failure() {
    let failing = ScriptedSource {
      calls: AtomicUsize::new(0),
      result: Err(GenerationError::Transport("HTTP 500".into())),
    };
    let controller = GenerationController::new(failing);
    let first = controller.submit(request("Osmosis", "1", "MCQ")).await;
    assert!(matches!(first, Submission::Failed(_)));

    // Same controller, second attempt: InFlight replaces the failure before
    // the source resolves, and the terminal state reflects only the retry.
    let second = controller.submit(request("Osmosis", "1", "MCQ")).await;
    assert!(matches!(second, Submission::Failed(_)));
    match controller.snapshot().await {
      GenerationOutcome::Failed { reason } => assert!(reason.contains("HTTP 500")),
      other => panic!("expected failed snapshot, got {other:?}"),
    }
  }
}
