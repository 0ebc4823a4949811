//! Sequencer: emits one problem per riddle position, never reusing a statement.

use std::collections::{HashMap, HashSet};

use crate::domain::{LetterAssignment, Problem};
use crate::error::PlanError;
use crate::planner::AnswerBuckets;

/// Walk `letters` left to right and take, for each position, the next unused
/// problem from the bucket of that letter's assigned answer.
///
/// A letter repeated in the riddle gets distinct statements that share the
/// same normalized answer.
pub fn sequence(
  letters: &str,
  assignment: &LetterAssignment,
  buckets: &AnswerBuckets,
) -> Result<Vec<Problem>, PlanError> {
  let mut used_statements: HashSet<&str> = HashSet::new();
  let mut cursors: HashMap<&str, usize> = HashMap::new();
  let mut out = Vec::with_capacity(letters.len());

  for letter in letters.chars() {
    let exhausted = |answer: &str, available: usize| PlanError::BucketExhaustion {
      letter,
      answer: answer.to_string(),
      required: letters.chars().filter(|c| *c == letter).count(),
      available,
    };

    let answer = assignment.get(&letter).ok_or_else(|| exhausted("", 0))?;
    let bucket = buckets.get(answer).ok_or_else(|| exhausted(answer, 0))?;
    let cursor = cursors.entry(answer.as_str()).or_insert(0);

    let mut picked = None;
    while *cursor < bucket.len() {
      let candidate = &bucket[*cursor];
      *cursor += 1;
      if used_statements.insert(candidate.statement.as_str()) {
        picked = Some(candidate);
        break;
      }
    }

    match picked {
      Some(p) => out.push(p.clone()),
      None => return Err(exhausted(answer, bucket.len())),
    }
  }

  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn buckets(pairs: &[(&str, &str)]) -> AnswerBuckets {
    AnswerBuckets::from_pool(&pairs.iter().map(|(s, a)| Problem::new(*s, *a)).collect::<Vec<_>>())
  }

  fn assign(pairs: &[(char, &str)]) -> LetterAssignment {
    pairs.iter().map(|(c, v)| (*c, v.to_string())).collect()
  }

  #[test]
  fn repeated_letter_uses_distinct_statements() {
    let b = buckets(&[("2 + 2", "4"), ("1 + 3", "4"), ("2 + 3", "5"), ("3 + 3", "6")]);
    let a = assign(&[('A', "4"), ('B', "5"), ('C', "6")]);
    let out = sequence("ABCA", &a, &b).expect("sequenced");
    let statements: Vec<&str> = out.iter().map(|p| p.statement.as_str()).collect();
    assert_eq!(statements, vec!["2 + 2", "2 + 3", "3 + 3", "1 + 3"]);
  }

  #[test]
  fn stockout_is_reported_with_counts() {
    let b = buckets(&[("2 + 2", "4"), ("2 + 3", "5")]);
    let a = assign(&[('A', "4"), ('B', "5")]);
    let err = sequence("ABA", &a, &b).unwrap_err();
    assert_eq!(
      err,
      PlanError::BucketExhaustion { letter: 'A', answer: "4".into(), required: 2, available: 1 }
    );
  }

  #[test]
  fn statement_shared_across_buckets_is_not_reused() {
    // Same text with two different answers: the second bucket must skip it.
    let b = buckets(&[("mystery", "1"), ("mystery", "2"), ("other", "2")]);
    let a = assign(&[('A', "1"), ('B', "2")]);
    let out = sequence("AB", &a, &b).expect("sequenced");
    assert_eq!(out[1].statement, "other");
  }
}
