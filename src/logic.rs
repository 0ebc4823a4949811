//! Worksheet assembly: the boundary between the HTTP handlers and the engine.
//!
//! A request either goes through the riddle planner or, when riddles are off,
//! through plain selection. Riddle failures are returned as-is unless the
//! caller opted into `allow_plain_fallback`, in which case the worksheet is
//! rebuilt without a riddle and records why.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{PlacedProblem, Problem, RiddlePlan, Worksheet};
use crate::error::PlanError;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Upper bound on versions per standard in one batch.
pub const MAX_VERSIONS: usize = 50;

#[derive(Clone, Debug)]
pub struct WorksheetRequest {
  pub standard: String,
  pub count: usize,
  pub use_riddles: bool,
  pub allow_plain_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct BatchRequest {
  pub standards: Vec<String>,
  pub count: usize,
  pub versions: usize,
  pub use_riddles: bool,
  pub allow_plain_fallback: bool,
  pub seed: Option<u64>,
}

/// One generated version; failures stay per item.
#[derive(Debug)]
pub struct BatchItem {
  pub standard: String,
  pub version: usize,
  pub result: Result<Worksheet, PlanError>,
}

/// RNG for the `index`-th generation of a request: derived from `seed` when
/// given, otherwise fresh entropy.
pub fn rng_for(seed: Option<u64>, index: u64) -> StdRng {
  match seed {
    Some(s) => StdRng::seed_from_u64(s.wrapping_add(index)),
    None => StdRng::from_entropy(),
  }
}

#[instrument(level = "info", target = "worksheet", skip(state, rng), fields(standard = %req.standard, count = req.count, use_riddles = req.use_riddles))]
pub fn generate_worksheet(
  state: &AppState,
  req: &WorksheetRequest,
  rng: &mut dyn RngCore,
) -> Result<Worksheet, PlanError> {
  let planner = state.planner();
  if !req.use_riddles {
    let problems = planner.plain(&req.standard, req.count, rng)?;
    return Ok(plain_worksheet(&req.standard, problems, None));
  }

  match planner.plan(&req.standard, req.count, rng) {
    Ok(plan) => Ok(riddle_worksheet(&req.standard, plan, rng)),
    Err(e) if req.allow_plain_fallback && e.is_riddle_specific() => {
      warn!(target: "worksheet", standard = %req.standard, kind = e.kind(), error = %e, "Riddle skipped; falling back to plain problems");
      let problems = planner.plain(&req.standard, req.count, rng)?;
      Ok(plain_worksheet(&req.standard, problems, Some(e.to_string())))
    }
    Err(e) => Err(e),
  }
}

/// Generate `versions` worksheets for every standard, each with its own RNG.
#[instrument(level = "info", target = "worksheet", skip(state, req), fields(standards = req.standards.len(), versions = req.versions, count = req.count))]
pub fn generate_batch(state: &AppState, req: &BatchRequest) -> Vec<BatchItem> {
  let mut items = Vec::with_capacity(req.standards.len() * req.versions);
  let mut index = 0u64;
  for standard in &req.standards {
    let single = WorksheetRequest {
      standard: standard.clone(),
      count: req.count,
      use_riddles: req.use_riddles,
      allow_plain_fallback: req.allow_plain_fallback,
    };
    for version in 1..=req.versions {
      let mut rng = rng_for(req.seed, index);
      index += 1;
      let result = generate_worksheet(state, &single, &mut rng);
      if let Err(e) = &result {
        debug!(target: "worksheet", %standard, version, kind = e.kind(), "Batch item failed");
      }
      items.push(BatchItem { standard: standard.clone(), version, result });
    }
  }
  let failed = items.iter().filter(|i| i.result.is_err()).count();
  info!(target: "worksheet", total = items.len(), failed, "Batch generated");
  items
}

fn riddle_worksheet(standard: &str, plan: RiddlePlan, rng: &mut dyn RngCore) -> Worksheet {
  let problems: Vec<PlacedProblem> = plan
    .problems
    .iter()
    .zip(plan.riddle.letters.chars())
    .enumerate()
    .map(|(i, (p, letter))| PlacedProblem {
      position: i + 1,
      statement: p.statement.clone(),
      answer: p.raw_answer.clone(),
      letter: Some(letter),
    })
    .collect();

  let mut answer_bank: Vec<(String, char)> = plan.decoder.iter().map(|(c, v)| (v.clone(), *c)).collect();
  answer_bank.shuffle(rng);

  info!(
    target: "worksheet",
    %standard,
    riddle = %trunc_for_log(&plan.riddle.prompt, 60),
    answer = %plan.riddle.display_answer,
    distinct_letters = plan.assignment.len(),
    low_confidence = plan.low_confidence,
    "Worksheet assembled"
  );

  Worksheet {
    id: Uuid::new_v4().to_string(),
    standard: standard.to_string(),
    problems,
    riddle: Some(plan.riddle),
    decoder: plan.decoder,
    answer_bank,
    low_confidence: plan.low_confidence,
    riddle_skipped_reason: None,
  }
}

fn plain_worksheet(standard: &str, problems: Vec<Problem>, skipped: Option<String>) -> Worksheet {
  let problems = problems
    .into_iter()
    .enumerate()
    .map(|(i, p)| PlacedProblem {
      position: i + 1,
      statement: p.statement,
      answer: p.raw_answer,
      letter: None,
    })
    .collect();
  Worksheet {
    id: Uuid::new_v4().to_string(),
    standard: standard.to_string(),
    problems,
    riddle: None,
    decoder: Default::default(),
    answer_bank: Vec::new(),
    low_confidence: false,
    riddle_skipped_reason: skipped,
  }
}
