//! Decoy synthesis: fills the decoder table for letters the riddle does not use.
//!
//! Decoys copy the style of the real answers (ratios stay ratios, algebraic
//! terms stay algebraic) so a student can't spot the real entries by format,
//! and every value in the finished table is unique.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use crate::domain::{DecoderTable, LetterAssignment, ALPHABET};
use crate::util::{format_tenths, gcd};

/// Answer formats, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnswerStyle {
  Factored,
  Linear,
  VariableTerm,
  Ratio,
  Fraction,
  Decimal,
  SignedInteger,
  Integer,
}

/// What decoys should look like: style, variable name and numeric bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
  pub style: AnswerStyle,
  pub variable: char,
  pub signed: bool,
  pub lo: i64,
  pub hi: i64,
}

/// Minimum spread of the integer bounds, so a full table always has room.
const MIN_SPAN: i64 = 40;

/// Largest magnitude used for bounds; bigger answers are clamped to it.
const MAX_MAGNITUDE: f64 = 1e12;

/// A lowercase letter standing alone, e.g. the `x` in `3x + 2`, but not the letters of `yes`.
fn variable_of(value: &str) -> Option<char> {
  let chars: Vec<char> = value.chars().collect();
  chars.iter().enumerate().find_map(|(i, &c)| {
    let prev_alpha = i > 0 && chars[i - 1].is_alphabetic();
    let next_alpha = chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
    (c.is_ascii_lowercase() && !prev_alpha && !next_alpha).then_some(c)
  })
}

fn style_of(value: &str) -> AnswerStyle {
  if variable_of(value).is_some() {
    if value.contains('(') && value.contains(')') {
      return AnswerStyle::Factored;
    }
    if value.chars().skip(1).any(|c| c == '+' || c == '-') {
      return AnswerStyle::Linear;
    }
    return AnswerStyle::VariableTerm;
  }
  if value.contains(':') {
    AnswerStyle::Ratio
  } else if value.contains('/') {
    AnswerStyle::Fraction
  } else if value.contains('.') {
    AnswerStyle::Decimal
  } else if value.starts_with('-') {
    AnswerStyle::SignedInteger
  } else {
    AnswerStyle::Integer
  }
}

/// Infer the decoy profile from the answers already in the table.
pub fn infer_profile<'a>(used: impl IntoIterator<Item = &'a String>) -> StyleProfile {
  let mut style = AnswerStyle::Integer;
  let mut variable = None;
  let mut signed = false;
  let mut magnitudes: Vec<f64> = Vec::new();

  for value in used {
    style = style.min(style_of(value));
    if variable.is_none() {
      variable = variable_of(value);
    }
    signed |= value.starts_with('-');
    if !value.contains(':') && !value.contains('/') {
      if let Ok(v) = value.trim().parse::<f64>() {
        magnitudes.push(v.abs());
      }
    }
  }

  let (lo, hi) = if magnitudes.is_empty() {
    (1, 100)
  } else {
    let min = magnitudes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = magnitudes.iter().cloned().fold(0.0, f64::max);
    (min.min(MAX_MAGNITUDE).floor() as i64, max.min(MAX_MAGNITUDE).ceil() as i64)
  };
  let hi = hi.max(lo.saturating_add(MIN_SPAN));

  StyleProfile { style, variable: variable.unwrap_or('x'), signed, lo, hi }
}

/// One candidate in the profile's style. `None` asks the caller to draw again.
fn draw<R: Rng + ?Sized>(p: &StyleProfile, rng: &mut R) -> Option<String> {
  let v = p.variable;
  let value = match p.style {
    AnswerStyle::Factored => {
      let factor = rng.gen_range(2..=8);
      let coeff = rng.gen_range(1..=6);
      let constant = rng.gen_range(1..=10);
      format!("{factor}({coeff}{v} + {constant})")
    }
    AnswerStyle::Linear => {
      let coeff = rng.gen_range(1..=20);
      let constant = rng.gen_range(1..=15);
      let sign = if rng.gen_bool(0.5) { '+' } else { '-' };
      format!("{coeff}{v} {sign} {constant}")
    }
    AnswerStyle::VariableTerm => {
      let coeff = rng.gen_range(1..=40);
      if coeff == 1 { v.to_string() } else { format!("{coeff}{v}") }
    }
    AnswerStyle::Ratio => {
      let a = rng.gen_range(1..=30u32);
      let b = rng.gen_range(1..=30u32);
      let g = gcd(a, b);
      if a == b {
        return None;
      }
      format!("{}:{}", a / g, b / g)
    }
    AnswerStyle::Fraction => {
      let num = rng.gen_range(1..=20u32);
      let den = rng.gen_range(2..=20u32);
      let g = gcd(num, den);
      if den / g == 1 {
        return None;
      }
      format!("{}/{}", num / g, den / g)
    }
    AnswerStyle::Decimal => {
      let hi = p.hi.saturating_mul(10);
      let lo = if p.signed { -hi } else { p.lo.saturating_mul(10) };
      format_tenths(rng.gen_range(lo..=hi))
    }
    AnswerStyle::SignedInteger => rng.gen_range(-p.hi..=p.hi).to_string(),
    AnswerStyle::Integer => rng.gen_range(p.lo..=p.hi).to_string(),
  };
  Some(value)
}

/// First positive integer not yet used. Only reached when drawing keeps colliding.
fn unique_integer(used: &HashSet<String>) -> String {
  (1u64..)
    .map(|n| n.to_string())
    .find(|s| !used.contains(s))
    .unwrap_or_default()
}

/// Complete the decoder table: real assignments plus one fresh decoy per unused letter.
/// Every accepted decoy is added to `used`.
pub fn complete_decoder<R: Rng + ?Sized>(
  assignment: &LetterAssignment,
  used: &mut HashSet<String>,
  max_attempts: usize,
  rng: &mut R,
) -> DecoderTable {
  used.extend(assignment.values().cloned());
  let profile = infer_profile(used.iter());
  debug!(target: "worksheet", style = ?profile.style, lo = profile.lo, hi = profile.hi, "Decoy profile inferred");

  let mut table: DecoderTable = assignment.clone();
  for letter in ALPHABET.chars() {
    if table.contains_key(&letter) {
      continue;
    }
    let mut value = None;
    for _ in 0..max_attempts {
      if let Some(candidate) = draw(&profile, rng) {
        if !used.contains(&candidate) {
          value = Some(candidate);
          break;
        }
      }
    }
    let value = value.unwrap_or_else(|| {
      let fallback = unique_integer(used);
      warn!(target: "worksheet", %letter, %fallback, "Decoy attempts exhausted; using plain integer");
      fallback
    });
    used.insert(value.clone());
    table.insert(letter, value);
  }
  table
}
