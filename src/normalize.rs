//! Normalization of the generation service's loosely-typed response.
//!
//! Two stages, per the service's observed shapes:
//!   1. Envelope unwrapping — the body must resolve to a JSON array. Accepted
//!      top-level shapes: the array itself, or an object whose `output` field
//!      is a string that parses to an array. Each element may carry the
//!      question object directly or nested one level under a `json` key.
//!   2. Variant dispatch on the `type` tag into [`QuestionModel`].
//!
//! Elements with an unknown tag, or a known tag whose contract is violated
//! (mcq with fewer than two options or an answer matching no option, missing
//! question/answer text), degrade to the `Other` fallback and are logged,
//! never dropped.

use serde_json::Value;
use tracing::warn;

use crate::domain::QuestionModel;

/// Stage 1: unwrap the response body to its element array.
/// Returns `None` when the body is not a sequence in any accepted shape.
pub fn unwrap_elements(body: &Value) -> Option<Vec<Value>> {
  match body {
    Value::Array(items) => Some(items.clone()),
    Value::Object(map) => {
      let output = map.get("output")?.as_str()?;
      match serde_json::from_str::<Value>(output) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
      }
    }
    _ => None,
  }
}

/// Stage 2: dispatch every element into the closed variant set.
/// Infallible by policy: one model out per element in, in source order.
pub fn normalize_elements(elements: &[Value]) -> Vec<QuestionModel> {
  elements.iter().map(normalize_element).collect()
}

fn normalize_element(element: &Value) -> QuestionModel {
  // Unwrap the per-element `json` envelope if present.
  let obj = match element.get("json") {
    Some(inner) if inner.is_object() => inner,
    _ => element,
  };

  let tag = obj.get("type").and_then(Value::as_str).unwrap_or("").to_string();
  let question = text_field(obj, "question").unwrap_or_default();

  let model = match tag.as_str() {
    "mcq" => normalize_mcq(obj, &question),
    "short_answer" => text_field(obj, "answer").map(|answer| QuestionModel::ShortAnswer {
      question: question.clone(),
      answer,
      keywords: string_list(obj.get("keywords")),
    }),
    "long_answer" => text_field(obj, "answer").map(|answer| QuestionModel::LongAnswer {
      question: question.clone(),
      answer,
      key_points: string_list(obj.get("key_points")),
    }),
    "true_false" => bool_field(obj, "answer").map(|answer| QuestionModel::TrueFalse {
      question: question.clone(),
      answer,
      explanation: text_field(obj, "explanation"),
    }),
    _ => None,
  };

  match model {
    Some(m) => m,
    None => {
      warn!(target: "quiz", %tag, "Element did not match its variant contract; rendering as fallback");
      QuestionModel::Other {
        question,
        answer: raw_answer(obj),
        tag,
      }
    }
  }
}

fn normalize_mcq(obj: &Value, question: &str) -> Option<QuestionModel> {
  let options = string_list(obj.get("options"));
  let answer = text_field(obj, "answer")?;
  // The correct answer must equal one option by value; two options minimum.
  if options.len() < 2 || !options.iter().any(|o| o == &answer) {
    return None;
  }
  Some(QuestionModel::Mcq {
    question: question.to_string(),
    options,
    answer,
    explanation: text_field(obj, "explanation"),
  })
}

/// Non-empty string field, trimmed at the edges of emptiness only.
fn text_field(obj: &Value, key: &str) -> Option<String> {
  let s = obj.get(key)?.as_str()?;
  if s.trim().is_empty() {
    None
  } else {
    Some(s.to_string())
  }
}

/// Boolean field; tolerates "true"/"false" strings (any casing).
fn bool_field(obj: &Value, key: &str) -> Option<bool> {
  match obj.get(key)? {
    Value::Bool(b) => Some(*b),
    Value::String(s) => match s.to_ascii_lowercase().as_str() {
      "true" => Some(true),
      "false" => Some(false),
      _ => None,
    },
    _ => None,
  }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
  value
    .and_then(Value::as_array)
    .map(|items| {
      items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default()
}

/// Best-effort answer text for the fallback variant.
fn raw_answer(obj: &Value) -> String {
  match obj.get("answer") {
    Some(Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
    None => String::new(),
  }
}
