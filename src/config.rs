//! Loading engine configuration (tuning knobs + optional extra riddles) from TOML.
//!
//! See `WorksheetConfig` and `EngineConfig` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct WorksheetConfig {
  #[serde(default)]
  pub engine: EngineConfig,
  #[serde(default)]
  pub riddles: Vec<RiddleCfg>,
}

/// Riddle entry accepted in TOML configuration.
/// `letters` defaults to the letters of `answer` with spaces and punctuation removed.
#[derive(Clone, Debug, Deserialize)]
pub struct RiddleCfg {
  pub prompt: String,
  pub answer: String,
  #[serde(default)] pub letters: Option<String>,
}

/// Tuning for pool sizing, riddle bounds and decoy synthesis.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// k in `max(N * k, floor)`.
  pub pool_multiplier: usize,
  pub pool_floor: usize,
  /// Largest worksheet accepted, in either mode.
  pub max_problem_count: usize,
  /// Extra attempts with a doubled pool once every riddle candidate failed.
  pub pool_growth_rounds: usize,
  pub min_riddle_length: usize,
  pub max_riddle_length: usize,
  /// 0 means every candidate of the length is tried.
  pub max_riddle_candidates: usize,
  pub decoy_max_attempts: usize,
  /// Substitute a placeholder riddle instead of failing with `NoRiddleOfLength`.
  pub placeholder_riddles: bool,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      pool_multiplier: 20,
      pool_floor: 100,
      max_problem_count: 100,
      pool_growth_rounds: 1,
      min_riddle_length: 3,
      max_riddle_length: 15,
      max_riddle_candidates: 0,
      decoy_max_attempts: 100,
      placeholder_riddles: false,
    }
  }
}

impl EngineConfig {
  /// Pool size requested for a worksheet of `count` problems.
  pub fn pool_size(&self, count: usize) -> usize {
    count.saturating_mul(self.pool_multiplier).max(self.pool_floor)
  }
}

/// Parse a config document. Exposed separately so tests can skip the filesystem.
pub fn parse_config(s: &str) -> Result<WorksheetConfig, toml::de::Error> {
  toml::from_str::<WorksheetConfig>(s)
}

/// Attempt to load `WorksheetConfig` from WORKSHEET_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<WorksheetConfig> {
  let path = std::env::var("WORKSHEET_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "riddle_worksheets", %path, riddles = cfg.riddles.len(), "Loaded worksheet config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "riddle_worksheets", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "riddle_worksheets", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_uses_defaults() {
    let cfg = parse_config("").expect("parse");
    assert_eq!(cfg.engine.pool_multiplier, 20);
    assert_eq!(cfg.engine.max_riddle_length, 15);
    assert_eq!(cfg.engine.max_problem_count, 100);
    assert!(!cfg.engine.placeholder_riddles);
    assert!(cfg.riddles.is_empty());
  }

  #[test]
  fn partial_engine_table_keeps_other_defaults() {
    let cfg = parse_config(
      r#"
      [engine]
      pool_floor = 40
      placeholder_riddles = true

      [[riddles]]
      prompt = "What has a tongue but cannot talk?"
      answer = "A SHOE"
      "#,
    )
    .expect("parse");
    assert_eq!(cfg.engine.pool_floor, 40);
    assert_eq!(cfg.engine.decoy_max_attempts, 100);
    assert!(cfg.engine.placeholder_riddles);
    assert_eq!(cfg.riddles.len(), 1);
    assert!(cfg.riddles[0].letters.is_none());
  }

  #[test]
  fn pool_size_respects_floor() {
    let engine = EngineConfig::default();
    assert_eq!(engine.pool_size(3), 100);
    assert_eq!(engine.pool_size(10), 200);
  }
}
