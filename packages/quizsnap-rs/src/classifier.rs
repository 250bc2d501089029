//! Turns free-form model output into a question type and the literal answers to look for.
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// `A → 1` style pairing lines. Any arrow spelling counts, since a match answer is never clicked.
static MATCH_PAIR: OnceLock<Option<Regex>> = OnceLock::new();

/// Leading bullet glyph on an answer line.
static BULLET: OnceLock<Option<Regex>> = OnceLock::new();

/// Lines starting with these (case-insensitive) are commentary, not answers.
const COMMENTARY_PREFIXES: &[&str] = &["explanation", "note:", "because"];

fn match_pair() -> Option<&'static Regex> {
  MATCH_PAIR
    .get_or_init(|| Regex::new(r"[A-Z]\s*(?:→|->|⟶|➔|⇒)\s*\d").ok())
    .as_ref()
}

fn bullet() -> Option<&'static Regex> {
  BULLET.get_or_init(|| Regex::new(r"^[•\-\*]\s*").ok()).as_ref()
}

fn strip_bullet(line: &str) -> String {
  match bullet() {
    Some(re) => re.replace(line, "").into_owned(),
    None => line.to_string(),
  }
}

/// Question shape inferred from a model answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  Match,
  MultipleChoice,
  SingleChoice,
  TrueFalse,
  Unknown,
}

impl QuestionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      QuestionType::Match => "match",
      QuestionType::MultipleChoice => "multiple_choice",
      QuestionType::SingleChoice => "single_choice",
      QuestionType::TrueFalse => "true_false",
      QuestionType::Unknown => "unknown",
    }
  }

  /// Whether answers of this type may be clicked on screen.
  pub fn is_clickable(&self) -> bool {
    matches!(
      self,
      QuestionType::MultipleChoice | QuestionType::SingleChoice | QuestionType::TrueFalse
    )
  }
}

impl fmt::Display for QuestionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Result of classifying one model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
  pub question_type: QuestionType,
  pub answers: Vec<String>,
}

impl Classification {
  fn unknown() -> Self {
    Self {
      question_type: QuestionType::Unknown,
      answers: Vec::new(),
    }
  }
}

fn is_commentary(line: &str) -> bool {
  let lower = line.to_lowercase();
  COMMENTARY_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Classifies a model response.
///
/// This is lexical and deliberately conservative: anything that looks like a
/// pairing answer becomes [`QuestionType::Match`], and an answer with nothing
/// left after dropping commentary becomes [`QuestionType::Unknown`]. Neither is
/// ever clicked.
pub fn classify(response: &str) -> Classification {
  let lines: Vec<&str> = response
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect();

  let is_pair = |line: &&str| match_pair().is_some_and(|re| re.is_match(line));
  if lines.iter().any(is_pair) {
    return Classification {
      question_type: QuestionType::Match,
      answers: lines.iter().map(|line| line.to_string()).collect(),
    };
  }

  let answers: Vec<String> = lines
    .iter()
    .map(|line| strip_bullet(line))
    .filter(|line| !line.is_empty() && !is_commentary(line))
    .collect();

  let question_type = match answers.as_slice() {
    [] => return Classification::unknown(),
    [only] => match only.to_lowercase().as_str() {
      "true" | "false" => QuestionType::TrueFalse,
      _ => QuestionType::SingleChoice,
    },
    _ => QuestionType::MultipleChoice,
  };

  Classification {
    question_type,
    answers,
  }
}
