//! Synchronous validation of raw form fields.
//!
//! Both forms follow the same contract: raw text fields in, either a fully
//! valid immutable request value out or a field-keyed list of validation
//! failures. Validation is pure and cheap enough to re-run on every field
//! change; nothing here performs I/O.

use serde::Serialize;

use crate::domain::{Difficulty, QuestionFormat};

/// One field-level validation failure, keyed for inline display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

impl FieldError {
  fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

/// Quiz-generation fields exactly as entered by the visitor.
#[derive(Clone, Debug, Default)]
pub struct QuizFormRaw {
  pub topic: String,
  pub question_count: String,
  pub difficulty: String,
  pub format: String,
  pub email: String,
}

/// A validated generation request. Constructed only by [`validate_quiz_form`]
/// and immutable afterwards, so a submitted attempt can never carry an
/// invalid or half-edited field.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
  topic: String,
  question_count: u32,
  difficulty: Difficulty,
  format: QuestionFormat,
  email: String,
}

impl GenerationRequest {
  pub fn topic(&self) -> &str {
    &self.topic
  }
  pub fn question_count(&self) -> u32 {
    self.question_count
  }
  pub fn difficulty(&self) -> Difficulty {
    self.difficulty
  }
  pub fn format(&self) -> QuestionFormat {
    self.format
  }
  pub fn email(&self) -> &str {
    &self.email
  }
}

/// Validate raw quiz fields. Collects every failure rather than stopping at
/// the first, so the UI can mark all offending fields at once.
pub fn validate_quiz_form(
  raw: &QuizFormRaw,
  max_questions: u32,
) -> Result<GenerationRequest, Vec<FieldError>> {
  let mut errors = Vec::new();

  let topic = raw.topic.trim();
  if topic.is_empty() {
    errors.push(FieldError::new("topic", "Subject or topic is required"));
  }

  let question_count = match raw.question_count.trim().parse::<u32>() {
    Ok(n) if n >= 1 && n <= max_questions => Some(n),
    Ok(n) if n < 1 => {
      errors.push(FieldError::new("questionCount", "At least 1 question is required"));
      None
    }
    Ok(_) => {
      errors.push(FieldError::new(
        "questionCount",
        format!("At most {max_questions} questions per request"),
      ));
      None
    }
    Err(_) => {
      errors.push(FieldError::new("questionCount", "Number of questions must be a whole number"));
      None
    }
  };

  let difficulty = Difficulty::parse(raw.difficulty.trim());
  if difficulty.is_none() {
    errors.push(FieldError::new("difficulty", "Difficulty must be Easy, Moderate or High"));
  }

  let format = QuestionFormat::parse(raw.format.trim());
  if format.is_none() {
    errors.push(FieldError::new("format", "Unknown question format"));
  }

  let email = raw.email.trim();
  if !is_valid_email(email) {
    errors.push(FieldError::new("email", "Invalid email address"));
  }

  match (question_count, difficulty, format) {
    (Some(question_count), Some(difficulty), Some(format)) if errors.is_empty() => {
      Ok(GenerationRequest {
        topic: topic.to_string(),
        question_count,
        difficulty,
        format,
        email: email.to_string(),
      })
    }
    _ => Err(errors),
  }
}

/// Standard email shape: one `@`, non-empty local part, domain with a dot and
/// no whitespace anywhere.
pub fn is_valid_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let mut parts = s.splitn(2, '@');
  let local = parts.next().unwrap_or("");
  let domain = parts.next().unwrap_or("");
  !local.is_empty()
    && !domain.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
}

//
// Enrollment lead form (collaborator; same validate-or-field-errors contract)
//

/// Preferred learning mode offered by the center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LearningMode {
  Online,
  Offline,
  Hybrid,
}

impl LearningMode {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Online" => Some(Self::Online),
      "Offline" => Some(Self::Offline),
      "Hybrid" => Some(Self::Hybrid),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Online => "Online",
      Self::Offline => "Offline",
      Self::Hybrid => "Hybrid",
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct LeadFormRaw {
  pub name: String,
  pub email: String,
  pub mobile: String,
  pub courses: Vec<String>,
  pub mode: String,
  pub branch: String,
  pub goal: String,
}

/// A validated enrollment lead, ready to forward to the lead webhook.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadRequest {
  pub name: String,
  pub email: String,
  pub mobile: String,
  pub courses: Vec<String>,
  pub mode: LearningMode,
  pub branch: String,
  pub goal: String,
}

pub fn validate_lead_form(
  raw: &LeadFormRaw,
  branches: &[String],
) -> Result<LeadRequest, Vec<FieldError>> {
  let mut errors = Vec::new();

  let name = raw.name.trim();
  if name.is_empty() {
    errors.push(FieldError::new("name", "Name is required"));
  }

  let email = raw.email.trim();
  if !is_valid_email(email) {
    errors.push(FieldError::new("email", "Invalid email address"));
  }

  let mobile = raw.mobile.trim();
  if mobile.chars().filter(char::is_ascii_digit).count() < 10 {
    errors.push(FieldError::new("mobile", "Mobile number must be at least 10 digits"));
  }

  let courses: Vec<String> = raw
    .courses
    .iter()
    .map(|c| c.trim().to_string())
    .filter(|c| !c.is_empty())
    .collect();
  if courses.is_empty() {
    errors.push(FieldError::new("courses", "Select at least one course"));
  }

  let mode = LearningMode::parse(raw.mode.trim());
  if mode.is_none() {
    errors.push(FieldError::new("mode", "Mode must be Online, Offline or Hybrid"));
  }

  let branch = raw.branch.trim();
  if !branches.iter().any(|b| b == branch) {
    errors.push(FieldError::new("branch", "Unknown branch"));
  }

  let goal = raw.goal.trim();
  if goal.is_empty() {
    errors.push(FieldError::new("goal", "Learning goal is required"));
  }

  match mode {
    Some(mode) if errors.is_empty() => Ok(LeadRequest {
      name: name.to_string(),
      email: email.to_string(),
      mobile: mobile.to_string(),
      courses,
      mode,
      branch: branch.to_string(),
      goal: goal.to_string(),
    }),
    _ => Err(errors),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_quiz_raw() -> QuizFormRaw {
    QuizFormRaw {
      topic: "Bipolar Junction Transistors".into(),
      question_count: "5".into(),
      difficulty: "Moderate".into(),
      format: "MCQ".into(),
      email: "student@example.com".into(),
    }
  }

  fn field_keys(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
  }

  #[test]
  fn valid_form_produces_no_field_errors() {
    let req = validate_quiz_form(&valid_quiz_raw(), 30).expect("valid form");
    assert_eq!(req.topic(), "Bipolar Junction Transistors");
    assert_eq!(req.question_count(), 5);
    assert_eq!(req.difficulty(), Difficulty::Moderate);
    assert_eq!(req.format(), QuestionFormat::Mcq);
    assert_eq!(req.email(), "student@example.com");
  }

  #[test]
  fn long_mixed_label_is_accepted() {
    let raw = QuizFormRaw {
      format: crate::domain::MIXED_FORMAT_LABEL.into(),
      ..valid_quiz_raw()
    };
    let req = validate_quiz_form(&raw, 30).expect("valid form");
    assert_eq!(req.format(), QuestionFormat::Mixed);
  }

  #[test]
  fn zero_count_is_a_question_count_error() {
    let raw = QuizFormRaw { question_count: "0".into(), ..valid_quiz_raw() };
    let errors = validate_quiz_form(&raw, 30).unwrap_err();
    assert_eq!(field_keys(&errors), vec!["questionCount"]);
  }

  #[test]
  fn non_numeric_count_is_a_question_count_error() {
    for bad in ["", "five", "3.5", "-2"] {
      let raw = QuizFormRaw { question_count: bad.into(), ..valid_quiz_raw() };
      let errors = validate_quiz_form(&raw, 30).unwrap_err();
      assert_eq!(field_keys(&errors), vec!["questionCount"], "input {bad:?}");
    }
  }

  #[test]
  fn count_above_bound_is_rejected() {
    let raw = QuizFormRaw { question_count: "31".into(), ..valid_quiz_raw() };
    let errors = validate_quiz_form(&raw, 30).unwrap_err();
    assert_eq!(field_keys(&errors), vec!["questionCount"]);
    // bound is inclusive
    let raw = QuizFormRaw { question_count: "30".into(), ..valid_quiz_raw() };
    assert!(validate_quiz_form(&raw, 30).is_ok());
  }

  #[test]
  fn email_without_at_sign_is_an_email_error() {
    for bad in ["plainaddress", "no-at.example.com", ""] {
      let raw = QuizFormRaw { email: bad.into(), ..valid_quiz_raw() };
      let errors = validate_quiz_form(&raw, 30).unwrap_err();
      assert_eq!(field_keys(&errors), vec!["email"], "input {bad:?}");
    }
  }

  #[test]
  fn blank_topic_is_a_topic_error() {
    let raw = QuizFormRaw { topic: "   ".into(), ..valid_quiz_raw() };
    let errors = validate_quiz_form(&raw, 30).unwrap_err();
    assert_eq!(field_keys(&errors), vec!["topic"]);
  }

  #[test]
  fn all_failures_are_collected_at_once() {
    let raw = QuizFormRaw {
      topic: "".into(),
      question_count: "zero".into(),
      difficulty: "Impossible".into(),
      format: "Essay".into(),
      email: "not-an-email".into(),
    };
    let errors = validate_quiz_form(&raw, 30).unwrap_err();
    assert_eq!(errors.len(), 5);
  }

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last+tag@sub.domain.org"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.com"));
    assert!(!is_valid_email("a@.com"));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@@b.com"));
  }

  fn valid_lead_raw() -> LeadFormRaw {
    LeadFormRaw {
      name: "Asha".into(),
      email: "asha@example.com".into(),
      mobile: "9876543210".into(),
      courses: vec!["NEET".into()],
      mode: "Hybrid".into(),
      branch: "ECIL , Hyderabad".into(),
      goal: "Crack the entrance exam".into(),
    }
  }

  #[test]
  fn valid_lead_passes() {
    let branches = vec!["ECIL , Hyderabad".to_string()];
    let lead = validate_lead_form(&valid_lead_raw(), &branches).expect("valid lead");
    assert_eq!(lead.mode, LearningMode::Hybrid);
    assert_eq!(lead.courses, vec!["NEET"]);
  }

  #[test]
  fn short_mobile_and_empty_courses_are_rejected() {
    let branches = vec!["ECIL , Hyderabad".to_string()];
    let raw = LeadFormRaw {
      mobile: "12345".into(),
      courses: vec![],
      ..valid_lead_raw()
    };
    let errors = validate_lead_form(&raw, &branches).unwrap_err();
    assert_eq!(field_keys(&errors), vec!["mobile", "courses"]);
  }

  #[test]
  fn unknown_branch_is_rejected() {
    let branches = vec!["ECIL , Hyderabad".to_string()];
    let raw = LeadFormRaw { branch: "Elsewhere".into(), ..valid_lead_raw() };
    let errors = validate_lead_form(&raw, &branches).unwrap_err();
    assert_eq!(field_keys(&errors), vec!["branch"]);
  }
}
