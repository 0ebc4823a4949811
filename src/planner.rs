//! Assignment planner: matches a riddle of length N to a pool of problems.
//!
//! Flow:
//! 1) Request an oversized pool from the provider and group it by normalized answer.
//! 2) For each shuffled riddle candidate of length N, map every distinct letter to a
//!    distinct answer bucket holding enough distinct statements for that letter.
//! 3) Sequence the problems in riddle order and complete the decoder table.
//! 4) If every candidate fails, retry with a doubled pool before giving up.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, info, instrument, warn};

use crate::catalog::RiddleCatalog;
use crate::config::EngineConfig;
use crate::decoys::complete_decoder;
use crate::domain::{LetterAssignment, Problem, RiddleEntry, RiddlePlan, RiddleSource};
use crate::error::PlanError;
use crate::normalize::normalize;
use crate::problems::ProblemProvider;
use crate::sequencer::sequence;

/// Pool problems grouped by normalized answer.
///
/// Keys keep first-seen order and each bucket keeps pool order, so the same
/// pool always yields the same buckets. Exact duplicate statements within a
/// bucket are dropped.
#[derive(Debug, Default, Clone)]
pub struct AnswerBuckets {
  keys: Vec<String>,
  buckets: HashMap<String, Vec<Problem>>,
}

impl AnswerBuckets {
  pub fn from_pool(pool: &[Problem]) -> Self {
    let mut out = Self::default();
    for p in pool {
      let key = normalize(&p.raw_answer);
      let bucket = out.buckets.entry(key.clone()).or_insert_with(|| {
        out.keys.push(key);
        Vec::new()
      });
      if !bucket.iter().any(|q| q.statement == p.statement) {
        bucket.push(p.clone());
      }
    }
    out
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn keys(&self) -> &[String] {
    &self.keys
  }

  pub fn get(&self, key: &str) -> Option<&Vec<Problem>> {
    self.buckets.get(key)
  }
}

/// Map each distinct letter of `riddle` to a distinct bucket key.
///
/// Letters that occur most often are placed first, each onto the first unused
/// key (in a per-attempt random order) whose bucket can cover every occurrence.
pub fn assign_letters(
  riddle: &RiddleEntry,
  buckets: &AnswerBuckets,
  rng: &mut dyn RngCore,
) -> Result<LetterAssignment, PlanError> {
  let unique = riddle.unique_letters();
  if buckets.len() < unique.len() {
    return Err(PlanError::InsufficientPoolDiversity {
      length: riddle.len(),
      required: unique.len(),
      available: buckets.len(),
    });
  }

  let occurrences = riddle.occurrences();
  let mut letters = unique;
  // Stable: ties keep first-occurrence order.
  letters.sort_by(|a, b| occurrences[b].cmp(&occurrences[a]));

  let mut keys: Vec<&String> = buckets.keys().iter().collect();
  keys.shuffle(rng);

  let mut taken: HashSet<&String> = HashSet::new();
  let mut assignment = LetterAssignment::new();
  for letter in letters {
    let required = occurrences[&letter];
    let size = |k: &String| buckets.get(k).map_or(0, Vec::len);
    let chosen = keys.iter().copied().find(|k| !taken.contains(*k) && size(k) >= required);
    match chosen {
      Some(key) => {
        taken.insert(key);
        assignment.insert(letter, key.clone());
      }
      None => {
        // Report the largest bucket still free, the closest miss.
        let best = keys
          .iter()
          .copied()
          .filter(|k| !taken.contains(*k))
          .max_by_key(|k| size(k));
        return Err(PlanError::BucketExhaustion {
          letter,
          answer: best.cloned().unwrap_or_default(),
          required,
          available: best.map_or(0, |k| size(k)),
        });
      }
    }
  }
  Ok(assignment)
}

/// Keep the more informative of two failures: a stockout says more than a diversity miss.
fn prefer(current: Option<PlanError>, next: PlanError) -> Option<PlanError> {
  match (&current, &next) {
    (Some(PlanError::BucketExhaustion { .. }), PlanError::InsufficientPoolDiversity { .. }) => current,
    _ => Some(next),
  }
}

pub struct Planner<'a> {
  pub provider: &'a dyn ProblemProvider,
  pub catalog: &'a RiddleCatalog,
  pub engine: &'a EngineConfig,
}

impl<'a> Planner<'a> {
  pub fn new(provider: &'a dyn ProblemProvider, catalog: &'a RiddleCatalog, engine: &'a EngineConfig) -> Self {
    Self { provider, catalog, engine }
  }

  /// Reject counts no worksheet can hold before any pool is requested.
  fn check_count(&self, count: usize) -> Result<(), PlanError> {
    if count == 0 {
      return Err(PlanError::InvalidCount);
    }
    if count > self.engine.max_problem_count {
      return Err(PlanError::CountTooLarge { requested: count, max: self.engine.max_problem_count });
    }
    Ok(())
  }

  /// Riddle-constrained selection of `count` problems for `standard`.
  #[instrument(level = "info", target = "worksheet", skip(self, rng), fields(%standard, count))]
  pub fn plan(&self, standard: &str, count: usize, rng: &mut dyn RngCore) -> Result<RiddlePlan, PlanError> {
    self.check_count(count)?;
    let (min, max) = (self.engine.min_riddle_length, self.engine.max_riddle_length);
    if count < min || count > max {
      return Err(PlanError::RiddleLengthOutOfRange { length: count, min, max });
    }

    let low_confidence = !self.catalog.has_length(count);
    let mut candidates = self.catalog.pick_riddles(count, rng);
    if low_confidence {
      if !self.engine.placeholder_riddles {
        return Err(PlanError::NoRiddleOfLength { length: count });
      }
      warn!(target: "worksheet", length = count, "No riddle of this length; using placeholder");
      candidates.push(RiddleCatalog::fallback(count));
    }
    if self.engine.max_riddle_candidates > 0 {
      candidates.truncate(self.engine.max_riddle_candidates);
    }

    let mut pool_size = self.engine.pool_size(count);
    let mut failure: Option<PlanError> = None;

    for round in 0..=self.engine.pool_growth_rounds {
      let pool = self.provider.generate(standard, pool_size, rng);
      let buckets = AnswerBuckets::from_pool(&pool);
      debug!(target: "worksheet", round, pool = pool.len(), distinct_answers = buckets.len(), "Pool grouped");

      for riddle in &candidates {
        let attempt = assign_letters(riddle, &buckets, rng)
          .and_then(|assignment| sequence(&riddle.letters, &assignment, &buckets).map(|p| (assignment, p)));
        match attempt {
          Ok((assignment, problems)) => {
            let mut used: HashSet<String> = assignment.values().cloned().collect();
            let decoder = complete_decoder(&assignment, &mut used, self.engine.decoy_max_attempts, rng);
            info!(
              target: "worksheet",
              answer = %riddle.display_answer,
              round,
              placeholder = riddle.source == RiddleSource::Placeholder,
              "Riddle plan accepted"
            );
            return Ok(RiddlePlan { problems, riddle: riddle.clone(), assignment, decoder, low_confidence });
          }
          Err(e) => {
            debug!(target: "worksheet", answer = %riddle.display_answer, error = %e, "Riddle candidate rejected");
            failure = prefer(failure, e);
          }
        }
      }
      pool_size = pool_size.saturating_mul(2);
    }

    let err = failure.unwrap_or(PlanError::NoRiddleOfLength { length: count });
    warn!(target: "worksheet", %standard, count, error = %err, "Riddle planning failed");
    Err(err)
  }

  /// Plain selection: `count` problems with pairwise distinct statements, no riddle.
  #[instrument(level = "info", target = "worksheet", skip(self, rng), fields(%standard, count))]
  pub fn plain(&self, standard: &str, count: usize, rng: &mut dyn RngCore) -> Result<Vec<Problem>, PlanError> {
    self.check_count(count)?;
    let pool = self.provider.generate(standard, self.engine.pool_size(count), rng);
    let mut seen = HashSet::new();
    let picked: Vec<Problem> = pool
      .into_iter()
      .filter(|p| seen.insert(p.statement.clone()))
      .take(count)
      .collect();
    if picked.len() < count {
      return Err(PlanError::PoolTooSmall { requested: count, available: picked.len() });
    }
    Ok(picked)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::letters_from_display;
  use crate::domain::ALPHABET;
  use crate::problems::StandardsProvider;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::BTreeMap;
  use std::sync::Mutex;

  /// Hands out a fixed pool, recording requested quantities.
  struct FixedProvider {
    pool: Vec<Problem>,
    requests: Mutex<Vec<usize>>,
  }

  impl FixedProvider {
    fn new(pairs: Vec<(String, String)>) -> Self {
      Self {
        pool: pairs.into_iter().map(|(s, a)| Problem::new(s, a)).collect(),
        requests: Mutex::new(Vec::new()),
      }
    }
  }

  impl ProblemProvider for FixedProvider {
    fn generate(&self, _standard: &str, quantity: usize, _rng: &mut dyn RngCore) -> Vec<Problem> {
      self.requests.lock().unwrap().push(quantity);
      self.pool.iter().take(quantity).cloned().collect()
    }
  }

  fn riddle(answer: &str) -> RiddleEntry {
    RiddleEntry {
      prompt: "What has hands but can't clap?".into(),
      display_answer: answer.into(),
      letters: letters_from_display(answer),
      source: RiddleSource::Seed,
    }
  }

  /// `per_answer` distinct statements for each of `answers` distinct answers.
  fn integer_pool(answers: usize, per_answer: usize) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for a in 1..=answers {
      for k in 0..per_answer {
        out.push((format!("{} + {} = ?", a * 10 + k, 0), format!("{}", a + 100)));
      }
    }
    out
  }

  fn decode(plan: &RiddlePlan) -> String {
    let reverse: BTreeMap<&String, char> = plan.decoder.iter().map(|(c, v)| (v, *c)).collect();
    plan.problems.iter().map(|p| reverse[&normalize(&p.raw_answer)]).collect()
  }

  #[test]
  fn clock_scenario_decodes() {
    let provider = FixedProvider::new(integer_pool(6, 2));
    let catalog = RiddleCatalog::new(vec![riddle("CLOCK")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(31);

    let plan = planner.plan("6.NS.C.5", 5, &mut rng).expect("plan");
    assert_eq!(plan.problems.len(), 5);
    assert_eq!(decode(&plan), "CLOCK");
    assert_eq!(plan.problems[0].raw_answer, plan.problems[3].raw_answer);
    assert_ne!(plan.problems[0].statement, plan.problems[3].statement);
    let statements: HashSet<&String> = plan.problems.iter().map(|p| &p.statement).collect();
    assert_eq!(statements.len(), 5);
    assert_eq!(plan.decoder.len(), 26);
    let values: HashSet<&String> = plan.decoder.values().collect();
    assert_eq!(values.len(), 26);
    assert!(!plan.low_confidence);
  }

  #[test]
  fn two_answers_cannot_cover_three_letters() {
    let provider = FixedProvider::new(integer_pool(2, 5));
    let catalog = RiddleCatalog::new(vec![riddle("CAT"), riddle("DOG"), riddle("AIR")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(32);

    let err = planner.plan("any", 3, &mut rng).unwrap_err();
    assert_eq!(err, PlanError::InsufficientPoolDiversity { length: 3, required: 3, available: 2 });
  }

  #[test]
  fn pool_grows_after_all_candidates_fail() {
    let provider = FixedProvider::new(integer_pool(2, 5));
    let catalog = RiddleCatalog::new(vec![riddle("CAT")]);
    let engine = EngineConfig { pool_growth_rounds: 2, ..EngineConfig::default() };
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(33);

    assert!(planner.plan("any", 3, &mut rng).is_err());
    assert_eq!(*provider.requests.lock().unwrap(), vec![100, 200, 400]);
  }

  #[test]
  fn single_statement_buckets_cannot_cover_repeats() {
    // Plenty of answers, but each has one statement and BEE repeats E.
    let provider = FixedProvider::new(integer_pool(10, 1));
    let catalog = RiddleCatalog::new(vec![riddle("BEE")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(34);

    match planner.plan("any", 3, &mut rng).unwrap_err() {
      PlanError::BucketExhaustion { letter, required, available, .. } => {
        assert_eq!(letter, 'E');
        assert_eq!(required, 2);
        assert_eq!(available, 1);
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn repeated_letter_gets_the_deep_bucket() {
    // One answer has two statements; E must land there for BEE to work.
    let mut pool = integer_pool(4, 1);
    pool.push(("extra = ?".into(), "103".into()));
    let provider = FixedProvider::new(pool);
    let catalog = RiddleCatalog::new(vec![riddle("BEE")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);

    for seed in 0..10 {
      let mut rng = StdRng::seed_from_u64(seed);
      let plan = planner.plan("any", 3, &mut rng).expect("plan");
      assert_eq!(plan.assignment[&'E'], "103");
      assert_eq!(decode(&plan), "BEE");
    }
  }

  #[test]
  fn length_gate_and_missing_riddles() {
    let provider = FixedProvider::new(integer_pool(20, 2));
    let catalog = RiddleCatalog::new(vec![riddle("CLOCK")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(35);

    assert_eq!(planner.plan("any", 0, &mut rng).unwrap_err(), PlanError::InvalidCount);
    assert_eq!(
      planner.plan("any", 2, &mut rng).unwrap_err(),
      PlanError::RiddleLengthOutOfRange { length: 2, min: 3, max: 15 }
    );
    assert_eq!(planner.plan("any", 6, &mut rng).unwrap_err(), PlanError::NoRiddleOfLength { length: 6 });
  }

  #[test]
  fn placeholder_policy_is_flagged() {
    let provider = FixedProvider::new(integer_pool(20, 2));
    let catalog = RiddleCatalog::new(vec![riddle("CLOCK")]);
    let engine = EngineConfig { placeholder_riddles: true, ..EngineConfig::default() };
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(36);

    let plan = planner.plan("any", 6, &mut rng).expect("plan");
    assert!(plan.low_confidence);
    assert_eq!(plan.riddle.source, RiddleSource::Placeholder);
    assert_eq!(decode(&plan), "ABCDEF");
  }

  #[test]
  fn seeded_bank_plans_with_builtin_provider() {
    let catalog = RiddleCatalog::with_config(&[]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&StandardsProvider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(37);

    for count in [3, 5, 8] {
      let plan = planner.plan("6.NS.C.5", count, &mut rng).expect("plan");
      assert_eq!(plan.problems.len(), count);
      assert_eq!(decode(&plan), plan.riddle.letters);
      assert!(ALPHABET.chars().all(|c| plan.decoder.contains_key(&c)));
    }
  }

  #[test]
  fn different_seeds_vary_the_result() {
    let catalog = RiddleCatalog::with_config(&[]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&StandardsProvider, &catalog, &engine);

    let outcomes: HashSet<(String, Vec<String>)> = (0..8)
      .map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = planner.plan("6.NS.C.5", 5, &mut rng).expect("plan");
        (plan.riddle.letters.clone(), plan.decoder.values().cloned().collect())
      })
      .collect();
    assert!(outcomes.len() > 1);
  }

  #[test]
  fn oversized_counts_are_rejected_before_generation() {
    let provider = FixedProvider::new(integer_pool(20, 2));
    let catalog = RiddleCatalog::new(vec![riddle("CLOCK")]);
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(39);

    let huge = usize::MAX / 2;
    assert_eq!(planner.plain("any", huge, &mut rng).unwrap_err(), PlanError::CountTooLarge { requested: huge, max: 100 });
    assert_eq!(planner.plan("any", 101, &mut rng).unwrap_err(), PlanError::CountTooLarge { requested: 101, max: 100 });
    assert!(provider.requests.lock().unwrap().is_empty());
  }

  #[test]
  fn plain_mode_dedupes_statements() {
    let mut pairs = integer_pool(3, 1);
    pairs.extend(integer_pool(3, 1));
    let provider = FixedProvider::new(pairs);
    let catalog = RiddleCatalog::default();
    let engine = EngineConfig::default();
    let planner = Planner::new(&provider, &catalog, &engine);
    let mut rng = StdRng::seed_from_u64(38);

    assert_eq!(planner.plain("any", 3, &mut rng).expect("plain").len(), 3);
    assert_eq!(
      planner.plain("any", 4, &mut rng).unwrap_err(),
      PlanError::PoolTooSmall { requested: 4, available: 3 }
    );
  }
}
