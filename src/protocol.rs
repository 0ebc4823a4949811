//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve the engine and its clients independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PlacedProblem, RiddleSource, Worksheet};
use crate::error::PlanError;
use crate::logic::BatchItem;

fn default_true() -> bool {
  true
}

//
// Requests
//

#[derive(Debug, Deserialize)]
pub struct WorksheetIn {
  pub standard: String,
  pub count: usize,
  #[serde(default = "default_true")]
  pub use_riddles: bool,
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub allow_plain_fallback: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchIn {
  pub standards: Vec<String>,
  pub count: usize,
  pub versions: usize,
  #[serde(default = "default_true")]
  pub use_riddles: bool,
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub allow_plain_fallback: bool,
}

//
// Responses
//

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandardOut {
  pub id: String,
  pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RiddleLengthOut {
  pub length: usize,
  pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerBankEntry {
  pub value: String,
  pub letter: char,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemOut {
  pub position: usize,
  pub statement: String,
  pub answer: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub letter: Option<char>,
}

/// Worksheet plus answer key, as handed to the rendering stage.
/// Riddle fields are empty strings for plain worksheets.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorksheetOut {
  pub id: String,
  pub standard: String,
  pub count: usize,
  pub problems: Vec<ProblemOut>,
  pub riddle_prompt: String,
  pub riddle_display_answer: String,
  pub riddle_letters: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub riddle_source: Option<RiddleSource>,
  pub low_confidence: bool,
  pub decoder_table: BTreeMap<char, String>,
  pub answer_bank: Vec<AnswerBankEntry>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub riddle_skipped_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
  pub error: String,
  pub message: String,
}

impl From<&PlanError> for ErrorOut {
  fn from(e: &PlanError) -> Self {
    Self { error: e.kind().to_string(), message: e.to_string() }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchItemOut {
  pub standard: String,
  pub version: usize,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub worksheet: Option<WorksheetOut>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<ErrorOut>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchOut {
  pub worksheets: Vec<BatchItemOut>,
}

fn problem_out(p: &PlacedProblem) -> ProblemOut {
  ProblemOut {
    position: p.position,
    statement: p.statement.clone(),
    answer: p.answer.clone(),
    letter: p.letter,
  }
}

/// Convert the internal `Worksheet` to the public DTO.
pub fn to_out(w: &Worksheet) -> WorksheetOut {
  let riddle = w.riddle.as_ref();
  WorksheetOut {
    id: w.id.clone(),
    standard: w.standard.clone(),
    count: w.problems.len(),
    problems: w.problems.iter().map(problem_out).collect(),
    riddle_prompt: riddle.map(|r| r.prompt.clone()).unwrap_or_default(),
    riddle_display_answer: riddle.map(|r| r.display_answer.clone()).unwrap_or_default(),
    riddle_letters: riddle.map(|r| r.letters.clone()).unwrap_or_default(),
    riddle_source: riddle.map(|r| r.source),
    low_confidence: w.low_confidence,
    decoder_table: w.decoder.clone(),
    answer_bank: w
      .answer_bank
      .iter()
      .map(|(value, letter)| AnswerBankEntry { value: value.clone(), letter: *letter })
      .collect(),
    riddle_skipped_reason: w.riddle_skipped_reason.clone(),
  }
}

pub fn batch_item_out(item: &BatchItem) -> BatchItemOut {
  let (worksheet, error) = match &item.result {
    Ok(w) => (Some(to_out(w)), None),
    Err(e) => (None, Some(ErrorOut::from(e))),
  };
  BatchItemOut { standard: item.standard.clone(), version: item.version, worksheet, error }
}
