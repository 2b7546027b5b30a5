//! Pure rendering of a question sequence into presentation blocks.
//!
//! `render` is a function of its input only: no network, no mutable state,
//! and the same `QuestionModel` slice always produces the same block tree.
//! One block per question, tagged with its source variant.

use serde::Serialize;

use crate::domain::{split_numbered_points, QuestionModel};

/// One rendered question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionBlock {
  /// Source variant tag: mcq / short_answer / long_answer / true_false / other.
  pub variant: &'static str,
  pub question: String,
  pub body: BlockBody,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockBody {
  /// Exclusive-choice list with the stored correct answer pre-selected.
  /// Display-only: the selection shows the answer, it captures no input.
  Choices {
    options: Vec<ChoiceOption>,
    answer: String,
    explanation: Option<String>,
  },
  /// Expected answer text plus keyword badges.
  Answer {
    answer: String,
    keywords: Vec<String>,
  },
  /// Segmented numbered points plus the key-point list.
  Points {
    points: Vec<String>,
    key_points: Vec<String>,
  },
  /// Disabled checked/unchecked indicator matching the boolean answer.
  Indicator {
    checked: bool,
    label: &'static str,
    explanation: Option<String>,
  },
  /// Fallback for unrecognized variants: question + raw answer, so generated
  /// content is shown rather than silently lost.
  Raw {
    answer: String,
    tag: String,
  },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChoiceOption {
  pub text: String,
  pub selected: bool,
}

/// Map every question to its block, preserving order. Idempotent.
pub fn render(questions: &[QuestionModel]) -> Vec<QuestionBlock> {
  questions.iter().map(render_one).collect()
}

fn render_one(question: &QuestionModel) -> QuestionBlock {
  let body = match question {
    QuestionModel::Mcq { options, answer, explanation, .. } => BlockBody::Choices {
      options: options
        .iter()
        .map(|text| ChoiceOption { text: text.clone(), selected: text == answer })
        .collect(),
      answer: answer.clone(),
      explanation: explanation.clone(),
    },
    QuestionModel::ShortAnswer { answer, keywords, .. } => BlockBody::Answer {
      answer: answer.clone(),
      keywords: keywords.clone(),
    },
    QuestionModel::LongAnswer { answer, key_points, .. } => {
      let mut points = split_numbered_points(answer);
      // An answer with no numbered prefix still gets shown, as one block.
      if points.is_empty() && !answer.trim().is_empty() {
        points.push(answer.trim().to_string());
      }
      BlockBody::Points { points, key_points: key_points.clone() }
    }
    QuestionModel::TrueFalse { answer, explanation, .. } => BlockBody::Indicator {
      checked: *answer,
      label: if *answer { "True" } else { "False" },
      explanation: explanation.clone(),
    },
    QuestionModel::Other { answer, tag, .. } => BlockBody::Raw {
      answer: answer.clone(),
      tag: tag.clone(),
    },
  };

  QuestionBlock {
    variant: question.variant(),
    question: question.question().to_string(),
    body,
  }
}
