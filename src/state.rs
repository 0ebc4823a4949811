//! Application state: riddle catalog, problem provider and engine tuning.
//!
//! Everything here is built once at startup and never mutated afterwards, so
//! handlers share it behind a plain `Arc` without locks.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::catalog::RiddleCatalog;
use crate::config::{load_config_from_env, EngineConfig, WorksheetConfig};
use crate::planner::Planner;
use crate::problems::{ProblemProvider, StandardsProvider, STANDARDS};

#[derive(Clone)]
pub struct AppState {
  pub catalog: RiddleCatalog,
  pub provider: Arc<dyn ProblemProvider>,
  pub engine: EngineConfig,
}

impl AppState {
  /// Build state from env: load optional TOML config, then seed the catalog.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let cfg = load_config_from_env().unwrap_or_default();
    Self::from_config(cfg, Arc::new(StandardsProvider))
  }

  pub fn from_config(cfg: WorksheetConfig, provider: Arc<dyn ProblemProvider>) -> Self {
    let catalog = RiddleCatalog::with_config(&cfg.riddles);
    let e = &cfg.engine;
    info!(
      target: "riddle_worksheets",
      standards = STANDARDS.len(),
      min_len = e.min_riddle_length,
      max_len = e.max_riddle_length,
      pool_multiplier = e.pool_multiplier,
      pool_floor = e.pool_floor,
      placeholder_riddles = e.placeholder_riddles,
      "Worksheet engine ready"
    );
    Self { catalog, provider, engine: cfg.engine }
  }

  pub fn planner(&self) -> Planner<'_> {
    Planner::new(self.provider.as_ref(), &self.catalog, &self.engine)
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::from_config(WorksheetConfig::default(), Arc::new(StandardsProvider))
  }
}
