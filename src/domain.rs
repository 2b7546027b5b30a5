//! Domain models: generation parameters (difficulty/format enums), the closed
//! question-variant set, and the numbered-point segmentation rule for
//! long-form answers.

use serde::Serialize;

/// Difficulty levels accepted by the generation service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Difficulty {
  Easy,
  Moderate,
  High,
}

impl Difficulty {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Easy" => Some(Self::Easy),
      "Moderate" => Some(Self::Moderate),
      "High" => Some(Self::High),
      _ => None,
    }
  }

  /// Wire label expected by the generation webhook.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Easy => "Easy",
      Self::Moderate => "Moderate",
      Self::High => "High",
    }
  }
}

pub const MIXED_FORMAT_LABEL: &str =
  "Mixed of Short Answers, Long Answers, True/False, MCQ";

/// Question formats accepted by the generation service. `label()` returns the
/// exact strings the external workflow keys on, including the long "Mixed"
/// label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QuestionFormat {
  Mixed,
  Mcq,
  TrueFalse,
  ShortAnswer,
  LongAnswer,
}

impl QuestionFormat {
  /// Accepts both the short UI name ("Mixed") and the full wire labels.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Mixed" => Some(Self::Mixed),
      s if s == MIXED_FORMAT_LABEL => Some(Self::Mixed),
      "MCQ" => Some(Self::Mcq),
      "True/False" => Some(Self::TrueFalse),
      "Short Answers" => Some(Self::ShortAnswer),
      "Long Answers" => Some(Self::LongAnswer),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Mixed => MIXED_FORMAT_LABEL,
      Self::Mcq => "MCQ",
      Self::TrueFalse => "True/False",
      Self::ShortAnswer => "Short Answers",
      Self::LongAnswer => "Long Answers",
    }
  }
}

/// A generated question, discriminated by the service's `type` tag.
///
/// The set is closed: anything the normalizer cannot place in one of the four
/// known variants lands in `Other`, which keeps the question and the raw
/// answer text so generated content is never dropped.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionModel {
  Mcq {
    question: String,
    options: Vec<String>,
    /// Equals one of `options` by value (enforced by the normalizer).
    answer: String,
    explanation: Option<String>,
  },
  ShortAnswer {
    question: String,
    answer: String,
    keywords: Vec<String>,
  },
  LongAnswer {
    question: String,
    /// Free text in "1. ... 2. ..." form; see [`split_numbered_points`].
    answer: String,
    key_points: Vec<String>,
  },
  TrueFalse {
    question: String,
    answer: bool,
    explanation: Option<String>,
  },
  Other {
    question: String,
    answer: String,
    /// The unrecognized (or contract-violating) `type` tag, kept for display.
    tag: String,
  },
}

impl QuestionModel {
  pub fn variant(&self) -> &'static str {
    match self {
      Self::Mcq { .. } => "mcq",
      Self::ShortAnswer { .. } => "short_answer",
      Self::LongAnswer { .. } => "long_answer",
      Self::TrueFalse { .. } => "true_false",
      Self::Other { .. } => "other",
    }
  }

  pub fn question(&self) -> &str {
    match self {
      Self::Mcq { question, .. }
      | Self::ShortAnswer { question, .. }
      | Self::LongAnswer { question, .. }
      | Self::TrueFalse { question, .. }
      | Self::Other { question, .. } => question,
    }
  }
}

/// Segment a long-form answer into its numbered points.
///
/// A segment begins at a run of decimal digits followed by `.` when that run
/// sits at the start of the string or right after whitespace. Each segment
/// keeps its leading numeral and runs up to the next segment start. Segments
/// are trimmed; empty ones are discarded; text before the first numbered
/// prefix belongs to no segment. Pure and deterministic: the same input
/// always yields the same sequence.
pub fn split_numbered_points(text: &str) -> Vec<String> {
  let mut starts: Vec<usize> = Vec::new();
  let mut at_boundary = true;
  let mut chars = text.char_indices().peekable();

  while let Some((i, ch)) = chars.next() {
    if at_boundary && ch.is_ascii_digit() {
      let mut end = i + ch.len_utf8();
      while let Some(&(j, next)) = chars.peek() {
        if next.is_ascii_digit() {
          chars.next();
          end = j + next.len_utf8();
        } else {
          break;
        }
      }
      if text[end..].starts_with('.') {
        starts.push(i);
      }
      at_boundary = false;
    } else {
      at_boundary = ch.is_whitespace();
    }
  }

  let mut points = Vec::with_capacity(starts.len());
  for (k, &start) in starts.iter().enumerate() {
    let end = starts.get(k + 1).copied().unwrap_or(text.len());
    let segment = text[start..end].trim();
    if !segment.is_empty() {
      points.push(segment.to_string());
    }
  }
  points
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_three_numbered_points() {
    let points = split_numbered_points("1. A. 2. B. 3. C.");
    assert_eq!(points, vec!["1. A.", "2. B.", "3. C."]);
  }

  #[test]
  fn split_is_idempotent() {
    let text = "1. Photosynthesis begins with sunlight.\n\n2. Water is absorbed through the roots.";
    let first = split_numbered_points(text);
    let second = split_numbered_points(text);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first[0].starts_with("1."));
    assert!(first[1].starts_with("2."));
  }

  #[test]
  fn multi_digit_numerals_start_segments() {
    let points = split_numbered_points("9. ninth 10. tenth 11. eleventh");
    assert_eq!(points.len(), 3);
    assert!(points[1].starts_with("10."));
  }

  #[test]
  fn text_without_numbered_prefix_yields_no_segments() {
    assert!(split_numbered_points("Plain prose with no numbering.").is_empty());
    assert!(split_numbered_points("").is_empty());
    assert!(split_numbered_points("   \n\t ").is_empty());
  }

  #[test]
  fn leading_prose_belongs_to_no_segment() {
    let points = split_numbered_points("Intro text 1. first point 2. second point");
    assert_eq!(points, vec!["1. first point", "2. second point"]);
  }

  #[test]
  fn mid_word_digits_do_not_start_segments() {
    let points = split_numbered_points("1. Uses protocol v1.2 everywhere. 2. Done.");
    assert_eq!(points.len(), 2);
    assert!(points[0].contains("v1.2"));
  }

  #[test]
  fn digits_without_period_are_plain_text() {
    assert!(split_numbered_points("has 42 items but no list").is_empty());
  }

  #[test]
  fn format_labels_round_trip_through_parse() {
    for f in [
      QuestionFormat::Mixed,
      QuestionFormat::Mcq,
      QuestionFormat::TrueFalse,
      QuestionFormat::ShortAnswer,
      QuestionFormat::LongAnswer,
    ] {
      assert_eq!(QuestionFormat::parse(f.label()), Some(f));
    }
    assert_eq!(QuestionFormat::parse("Mixed"), Some(QuestionFormat::Mixed));
    assert_eq!(QuestionFormat::parse("essay"), None);
    assert_eq!(Difficulty::parse("Moderate"), Some(Difficulty::Moderate));
    assert_eq!(Difficulty::parse("easy"), None);
  }
}
