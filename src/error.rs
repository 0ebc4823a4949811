//! Typed failures surfaced by the worksheet engine.
//!
//! Every riddle-mode failure reaches the caller as a distinct variant; the
//! caller decides whether to relax parameters or fall back to plain problems.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
  #[error("problem count must be at least 1")]
  InvalidCount,

  #[error("at most {max} problems per worksheet, requested {requested}")]
  CountTooLarge { requested: usize, max: usize },

  #[error("riddles support {min}..={max} letters, requested {length}")]
  RiddleLengthOutOfRange { length: usize, min: usize, max: usize },

  #[error("no riddle of length {length} in the catalog")]
  NoRiddleOfLength { length: usize },

  #[error("riddles of length {length} need {required} distinct answers, pool has {available}")]
  InsufficientPoolDiversity { length: usize, required: usize, available: usize },

  #[error("letter '{letter}' needs {required} distinct problems answering {answer:?}, only {available} available")]
  BucketExhaustion { letter: char, answer: String, required: usize, available: usize },

  #[error("requested {requested} problems but the pool only had {available} distinct statements")]
  PoolTooSmall { requested: usize, available: usize },
}

impl PlanError {
  /// Stable identifier used in API error bodies.
  pub fn kind(&self) -> &'static str {
    match self {
      PlanError::InvalidCount => "invalid_count",
      PlanError::CountTooLarge { .. } => "count_too_large",
      PlanError::RiddleLengthOutOfRange { .. } => "riddle_length_out_of_range",
      PlanError::NoRiddleOfLength { .. } => "no_riddle_of_length",
      PlanError::InsufficientPoolDiversity { .. } => "insufficient_pool_diversity",
      PlanError::BucketExhaustion { .. } => "bucket_exhaustion",
      PlanError::PoolTooSmall { .. } => "pool_too_small",
    }
  }

  /// Whether the request itself is malformed rather than unsatisfiable.
  pub fn is_bad_request(&self) -> bool {
    matches!(self, PlanError::InvalidCount | PlanError::CountTooLarge { .. })
  }

  /// Whether the caller may retry in plain (non-riddle) mode.
  pub fn is_riddle_specific(&self) -> bool {
    !matches!(self, PlanError::InvalidCount | PlanError::CountTooLarge { .. } | PlanError::PoolTooSmall { .. })
  }
}
