//! Domain models used by the worksheet engine: problems, riddles, letter
//! assignments, decoder tables and the assembled worksheet itself.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The 26 letters every decoder table covers.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One practice problem as produced by a pool provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
  pub statement: String,
  pub raw_answer: String,
}

impl Problem {
  pub fn new(statement: impl Into<String>, raw_answer: impl Into<String>) -> Self {
    Self { statement: statement.into(), raw_answer: raw_answer.into() }
  }
}

/// Where a riddle came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiddleSource {
  Seed,        // built-in bank
  Config,      // appended from the TOML config
  Placeholder, // synthesized when no entry of the length exists
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiddleEntry {
  pub prompt: String,
  /// Human readable answer, may contain spaces ("PALM TREE").
  pub display_answer: String,
  /// The exact characters mapped to problem answers; its length is the bank key.
  pub letters: String,
  pub source: RiddleSource,
}

impl RiddleEntry {
  pub fn len(&self) -> usize {
    self.letters.chars().count()
  }

  /// Distinct letters in first-occurrence order.
  pub fn unique_letters(&self) -> Vec<char> {
    let mut seen = Vec::new();
    for c in self.letters.chars() {
      if !seen.contains(&c) {
        seen.push(c);
      }
    }
    seen
  }

  /// How many positions each letter occupies.
  pub fn occurrences(&self) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in self.letters.chars() {
      *counts.entry(c).or_insert(0) += 1;
    }
    counts
  }
}

/// Injective map from each distinct riddle letter to a normalized answer.
pub type LetterAssignment = BTreeMap<char, String>;

/// Total map from A..Z to the value printed next to the letter.
pub type DecoderTable = BTreeMap<char, String>;

/// A problem placed at a worksheet position, tagged with the letter it decodes to.
#[derive(Clone, Debug, Serialize)]
pub struct PlacedProblem {
  pub position: usize,
  pub statement: String,
  pub answer: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub letter: Option<char>,
}

/// Result of a successful riddle plan.
#[derive(Clone, Debug)]
pub struct RiddlePlan {
  pub problems: Vec<Problem>,
  pub riddle: RiddleEntry,
  pub assignment: LetterAssignment,
  pub decoder: DecoderTable,
  /// Set when the riddle is a synthesized placeholder.
  pub low_confidence: bool,
}

/// The assembled worksheet handed to the rendering stage.
#[derive(Clone, Debug)]
pub struct Worksheet {
  pub id: String,
  pub standard: String,
  pub problems: Vec<PlacedProblem>,
  pub riddle: Option<RiddleEntry>,
  pub decoder: DecoderTable,
  /// Decoder entries in display order (shuffled).
  pub answer_bank: Vec<(String, char)>,
  pub low_confidence: bool,
  pub riddle_skipped_reason: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn clock() -> RiddleEntry {
    RiddleEntry {
      prompt: "What has hands but can't clap?".into(),
      display_answer: "CLOCK".into(),
      letters: "CLOCK".into(),
      source: RiddleSource::Seed,
    }
  }

  #[test]
  fn unique_letters_keep_first_occurrence_order() {
    assert_eq!(clock().unique_letters(), vec!['C', 'L', 'O', 'K']);
  }

  #[test]
  fn occurrences_count_repeats() {
    let occ = clock().occurrences();
    assert_eq!(occ[&'C'], 2);
    assert_eq!(occ[&'K'], 1);
    assert_eq!(clock().len(), 5);
  }
}
