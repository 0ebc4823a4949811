//! Riddle catalog: immutable riddle bank partitioned by letter-sequence length.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::config::RiddleCfg;
use crate::domain::{RiddleEntry, RiddleSource, ALPHABET};
use crate::seeds::seed_riddles;

/// Letters of a display answer, uppercased, with spaces and punctuation dropped.
pub fn letters_from_display(display: &str) -> String {
  display
    .chars()
    .filter(|c| c.is_ascii_alphabetic())
    .map(|c| c.to_ascii_uppercase())
    .collect()
}

#[derive(Clone, Debug, Default)]
pub struct RiddleCatalog {
  by_length: BTreeMap<usize, Vec<RiddleEntry>>,
}

impl RiddleCatalog {
  /// File entries under the length of their letter sequence.
  /// Entries that are empty or contain anything outside A..Z are skipped.
  pub fn new(entries: impl IntoIterator<Item = RiddleEntry>) -> Self {
    let mut by_length: BTreeMap<usize, Vec<RiddleEntry>> = BTreeMap::new();
    for entry in entries {
      if entry.letters.is_empty() || !entry.letters.chars().all(|c| c.is_ascii_uppercase()) {
        warn!(target: "worksheet", answer = %entry.display_answer, letters = %entry.letters, "Skipping riddle: letters must be A-Z");
        continue;
      }
      by_length.entry(entry.len()).or_default().push(entry);
    }
    Self { by_length }
  }

  /// Built-in seeds plus any riddles appended by config.
  pub fn with_config(extra: &[RiddleCfg]) -> Self {
    let mut entries = seed_riddles();
    entries.extend(extra.iter().map(|r| RiddleEntry {
      prompt: r.prompt.clone(),
      display_answer: r.answer.clone(),
      letters: r
        .letters
        .as_deref()
        .map(|l| l.trim().to_ascii_uppercase())
        .unwrap_or_else(|| letters_from_display(&r.answer)),
      source: RiddleSource::Config,
    }));
    let catalog = Self::new(entries);
    for (length, count) in catalog.lengths() {
      info!(target: "worksheet", length, count, "Riddle bank inventory");
    }
    catalog
  }

  /// All entries of exactly `length` letters, in a fresh random order.
  pub fn pick_riddles<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Vec<RiddleEntry> {
    let mut out = self.by_length.get(&length).cloned().unwrap_or_default();
    out.shuffle(rng);
    out
  }

  pub fn has_length(&self, length: usize) -> bool {
    self.by_length.get(&length).is_some_and(|v| !v.is_empty())
  }

  /// (length, entry count) for every populated length, ascending.
  pub fn lengths(&self) -> Vec<(usize, usize)> {
    self.by_length.iter().map(|(k, v)| (*k, v.len())).collect()
  }

  /// Deterministic placeholder used when the bank has no entry of `length`.
  /// Walks the alphabet, wrapping after Z.
  pub fn fallback(length: usize) -> RiddleEntry {
    let letters: String = ALPHABET.chars().cycle().take(length).collect();
    RiddleEntry {
      prompt: format!("What {length}-letter sequence follows the alphabet?"),
      display_answer: letters.clone(),
      letters,
      source: RiddleSource::Placeholder,
    }
  }
}
