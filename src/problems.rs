//! Problem pool providers.
//!
//! The planner only sees the `ProblemProvider` capability. The built-in
//! `StandardsProvider` keeps one generator strategy per standard id; each
//! strategy produces a single (statement, answer) pair per call and the
//! provider calls it `quantity` times. Duplicates are allowed, the planner
//! groups and de-duplicates.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::domain::Problem;
use crate::util::{format_tenths, gcd};

/// Source of candidate problems for one standard.
pub trait ProblemProvider: Send + Sync {
  /// Up to `quantity` problems for `standard`. May contain duplicates or fall short.
  fn generate(&self, standard: &str, quantity: usize, rng: &mut dyn RngCore) -> Vec<Problem>;
}

type GenFn = fn(&mut dyn RngCore) -> Problem;

pub struct StandardDef {
  pub id: &'static str,
  pub description: &'static str,
  generate: GenFn,
}

/// Every standard with a dedicated generator.
pub const STANDARDS: &[StandardDef] = &[
  StandardDef { id: "6.RP.A.1", description: "Simplify ratios", generate: ratio },
  StandardDef { id: "6.RP.A.2", description: "Unit rates", generate: unit_rate },
  StandardDef { id: "6.RP.A.3", description: "Percent of a quantity", generate: percent_of },
  StandardDef { id: "6.NS.A.1", description: "Divide fractions", generate: fraction_division },
  StandardDef { id: "6.NS.B.2", description: "Multi-digit division", generate: long_division },
  StandardDef { id: "6.NS.B.3", description: "Decimal operations", generate: decimal_operations },
  StandardDef { id: "6.NS.B.4", description: "Greatest common factor and least common multiple", generate: gcf_lcm },
  StandardDef { id: "6.NS.C.5", description: "Add and subtract integers", generate: integer_operations },
  StandardDef { id: "6.NS.C.7", description: "Absolute value", generate: absolute_value },
  StandardDef { id: "6.EE.A.1", description: "Whole-number exponents", generate: exponents },
  StandardDef { id: "6.EE.A.2", description: "Evaluate expressions", generate: evaluate_expression },
  StandardDef { id: "6.EE.B.7", description: "One-step equations", generate: one_step_equation },
  StandardDef { id: "7.NS.A.2", description: "Multiply and divide rational numbers", generate: multiply_divide_rationals },
  StandardDef { id: "7.NS.A.3", description: "Temperature changes", generate: temperature_change },
  StandardDef { id: "7.EE.A.1", description: "Combine, factor and expand linear expressions", generate: linear_expressions },
  StandardDef { id: "7.G.B.4", description: "Circle radius and diameter", generate: circle_diameter },
];

/// Registry-backed provider; unknown ids get two-digit addition.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardsProvider;

impl StandardsProvider {
  pub fn lookup(standard: &str) -> Option<&'static StandardDef> {
    STANDARDS.iter().find(|s| s.id == standard)
  }
}

impl ProblemProvider for StandardsProvider {
  fn generate(&self, standard: &str, quantity: usize, rng: &mut dyn RngCore) -> Vec<Problem> {
    let generate = match Self::lookup(standard) {
      Some(def) => def.generate,
      None => {
        debug!(target: "worksheet", %standard, "Unknown standard; using generic problems");
        generic_addition as GenFn
      }
    };
    (0..quantity).map(|_| generate(&mut *rng)).collect()
  }
}

// -------- Generator strategies --------

fn ratio(rng: &mut dyn RngCore) -> Problem {
  let factor = rng.gen_range(2..=10);
  let a = rng.gen_range(1..=10u32);
  let mut b = rng.gen_range(1..=10u32);
  while gcd(a, b) > 1 {
    b = rng.gen_range(1..=10);
  }
  Problem::new(format!("Simplify the ratio {}:{}", a * factor, b * factor), format!("{a}:{b}"))
}

fn unit_rate(rng: &mut dyn RngCore) -> Problem {
  let units = rng.gen_range(2..=10);
  let rate = rng.gen_range(3..=25);
  Problem::new(format!("If {units} items cost ${}, what does one item cost?", units * rate), format!("${rate}"))
}

// Only pairs with a whole-number result are kept.
fn percent_of(rng: &mut dyn RngCore) -> Problem {
  let (percent, base) = loop {
    let percent = *[10u32, 20, 25, 30, 40, 50, 60, 75, 80].choose(&mut *rng).unwrap_or(&50);
    let base = *[40u32, 50, 60, 80, 100, 120, 150, 200].choose(&mut *rng).unwrap_or(&100);
    if (percent * base) % 100 == 0 {
      break (percent, base);
    }
  };
  Problem::new(format!("Find {percent}% of {base}"), (base * percent / 100).to_string())
}

fn fraction_division(rng: &mut dyn RngCore) -> Problem {
  let (n1, d1) = (rng.gen_range(1..=5u32), rng.gen_range(2..=6u32));
  let (n2, d2) = (rng.gen_range(1..=3u32), rng.gen_range(2..=4u32));
  let (num, den) = (n1 * d2, d1 * n2);
  let g = gcd(num, den);
  let (num, den) = (num / g, den / g);
  let answer = if den == 1 { num.to_string() } else { format!("{num}/{den}") };
  Problem::new(format!("{n1}/{d1} ÷ {n2}/{d2}"), answer)
}

fn long_division(rng: &mut dyn RngCore) -> Problem {
  let divisor = rng.gen_range(12..=25);
  let quotient = rng.gen_range(10..=50);
  Problem::new(format!("{} ÷ {}", divisor * quotient, divisor), quotient.to_string())
}

// Operands are held in tenths so answers stay exact.
fn decimal_operations(rng: &mut dyn RngCore) -> Problem {
  let a: i64 = rng.gen_range(100..=500);
  let b: i64 = rng.gen_range(50..=200);
  match rng.gen_range(0..3) {
    0 => Problem::new(format!("{} + {}", format_tenths(a), format_tenths(b)), format_tenths(a + b)),
    1 => {
      let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
      Problem::new(format!("{} - {}", format_tenths(hi), format_tenths(lo)), format_tenths(hi - lo))
    }
    _ => {
      let k: i64 = rng.gen_range(2..=9);
      Problem::new(format!("{} × {}", format_tenths(b), k), format_tenths(b * k))
    }
  }
}

fn gcf_lcm(rng: &mut dyn RngCore) -> Problem {
  let a = rng.gen_range(12..=60u32);
  let b = rng.gen_range(12..=60u32);
  if rng.gen_bool(0.5) {
    Problem::new(format!("GCF of {a} and {b}"), gcd(a, b).to_string())
  } else {
    Problem::new(format!("LCM of {a} and {b}"), (a * b / gcd(a, b)).to_string())
  }
}

fn integer_operations(rng: &mut dyn RngCore) -> Problem {
  let a: i32 = rng.gen_range(-20..=20);
  let b: i32 = rng.gen_range(-20..=20);
  if rng.gen_bool(0.5) {
    Problem::new(format!("({a}) + ({b})"), (a + b).to_string())
  } else {
    Problem::new(format!("({a}) - ({b})"), (a - b).to_string())
  }
}

fn absolute_value(rng: &mut dyn RngCore) -> Problem {
  let v: i32 = rng.gen_range(-30..=30);
  Problem::new(format!("|{v}|"), v.abs().to_string())
}

fn exponents(rng: &mut dyn RngCore) -> Problem {
  let base = *[2u32, 3, 4, 5, 10].choose(rng).unwrap_or(&2);
  let exp = rng.gen_range(2..=4u32);
  Problem::new(format!("{base}^{exp}"), base.pow(exp).to_string())
}

fn evaluate_expression(rng: &mut dyn RngCore) -> Problem {
  let a = rng.gen_range(2..=5);
  let b = rng.gen_range(1..=10);
  let x = rng.gen_range(1..=10);
  Problem::new(format!("Evaluate {a}x + {b} when x = {x}"), (a * x + b).to_string())
}

fn one_step_equation(rng: &mut dyn RngCore) -> Problem {
  let x: i32 = rng.gen_range(3..=15);
  match rng.gen_range(0..4) {
    0 => {
      let b = rng.gen_range(5..=20);
      Problem::new(format!("x + {b} = {}", x + b), x.to_string())
    }
    1 => {
      let b = rng.gen_range(5..=15);
      Problem::new(format!("x - {b} = {}", x - b), x.to_string())
    }
    2 => {
      let b = rng.gen_range(2..=8);
      Problem::new(format!("{b}x = {}", x * b), x.to_string())
    }
    _ => {
      let b = rng.gen_range(2..=6);
      Problem::new(format!("x/{b} = {x}"), (x * b).to_string())
    }
  }
}

fn nonzero(rng: &mut dyn RngCore, lo: i32, hi: i32) -> i32 {
  loop {
    let v = rng.gen_range(lo..=hi);
    if v != 0 {
      return v;
    }
  }
}

fn multiply_divide_rationals(rng: &mut dyn RngCore) -> Problem {
  if rng.gen_bool(0.5) {
    let a = nonzero(&mut *rng, -12, 12);
    let b = nonzero(&mut *rng, -8, 8);
    Problem::new(format!("({a}) × ({b})"), (a * b).to_string())
  } else {
    let divisor = nonzero(&mut *rng, -10, 10);
    let quotient: i32 = rng.gen_range(-8..=8);
    Problem::new(format!("({}) ÷ ({divisor})", divisor * quotient), quotient.to_string())
  }
}

fn temperature_change(rng: &mut dyn RngCore) -> Problem {
  let start: i32 = rng.gen_range(-10..=30);
  let drop = rng.gen_range(5..=20);
  Problem::new(
    format!("The temperature is {start}°F and drops {drop}°F. What is the new temperature?"),
    format!("{}°F", start - drop),
  )
}

fn linear_expressions(rng: &mut dyn RngCore) -> Problem {
  match rng.gen_range(0..4) {
    0 => {
      let (a, b, c) = (rng.gen_range(2..=8), rng.gen_range(2..=8), rng.gen_range(1..=5));
      Problem::new(format!("Simplify: {a}x + {b}x + {c}"), format!("{}x + {c}", a + b))
    }
    1 => {
      let (a, b) = (rng.gen_range(5..=12), rng.gen_range(2..=4));
      Problem::new(format!("Simplify: {a}x - {b}x"), format!("{}x", a - b))
    }
    2 => {
      let (a, b, c) = (rng.gen_range(2..=6), rng.gen_range(3..=8), rng.gen_range(2..=7));
      Problem::new(format!("Factor: {}x + {}", a * b, a * c), format!("{a}({b}x + {c})"))
    }
    _ => {
      let (a, b, c) = (rng.gen_range(2..=6), rng.gen_range(3..=8), rng.gen_range(2..=7));
      Problem::new(format!("Expand: {a}({b}x + {c})"), format!("{}x + {}", a * b, a * c))
    }
  }
}

fn circle_diameter(rng: &mut dyn RngCore) -> Problem {
  let radius = rng.gen_range(3..=15);
  Problem::new(format!("A circle has radius {radius} cm. What is its diameter?"), format!("{} cm", 2 * radius))
}

fn generic_addition(rng: &mut dyn RngCore) -> Problem {
  let a = rng.gen_range(10..=99);
  let b = rng.gen_range(10..=99);
  Problem::new(format!("{a} + {b} = ?"), (a + b).to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::normalize::normalize;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  #[test]
  fn returns_requested_quantity() {
    let mut rng = StdRng::seed_from_u64(7);
    for def in STANDARDS {
      let pool = StandardsProvider.generate(def.id, 25, &mut rng);
      assert_eq!(pool.len(), 25, "{}", def.id);
    }
  }

  #[test]
  fn unknown_standard_falls_back_to_addition() {
    let mut rng = StdRng::seed_from_u64(8);
    let pool = StandardsProvider.generate("X.NOPE", 5, &mut rng);
    assert_eq!(pool.len(), 5);
    assert!(pool.iter().all(|p| p.statement.ends_with("= ?")));
  }

  #[test]
  fn ratio_answers_are_reduced() {
    let mut rng = StdRng::seed_from_u64(9);
    for p in StandardsProvider.generate("6.RP.A.1", 50, &mut rng) {
      let (a, b) = p.raw_answer.split_once(':').expect("ratio");
      assert_eq!(gcd(a.parse().unwrap(), b.parse().unwrap()), 1, "{}", p.raw_answer);
    }
  }

  #[test]
  fn percent_answers_are_exact() {
    let mut rng = StdRng::seed_from_u64(12);
    for p in StandardsProvider.generate("6.RP.A.3", 200, &mut rng) {
      let rest = p.statement.strip_prefix("Find ").expect("percent statement");
      let (percent, base) = rest.split_once("% of ").expect("percent statement");
      let (percent, base): (u32, u32) = (percent.parse().unwrap(), base.parse().unwrap());
      let answer: u32 = p.raw_answer.parse().unwrap();
      assert_eq!(answer * 100, percent * base, "{} -> {}", p.statement, p.raw_answer);
    }
  }

  #[test]
  fn decimal_answers_have_one_place() {
    let mut rng = StdRng::seed_from_u64(10);
    for p in StandardsProvider.generate("6.NS.B.3", 50, &mut rng) {
      let (_, frac) = p.raw_answer.split_once('.').expect("decimal");
      assert_eq!(frac.len(), 1);
    }
  }

  #[test]
  fn unit_answers_normalize_to_numbers() {
    let mut rng = StdRng::seed_from_u64(11);
    for id in ["6.RP.A.2", "7.NS.A.3", "7.G.B.4"] {
      for p in StandardsProvider.generate(id, 30, &mut rng) {
        let key = normalize(&p.raw_answer);
        assert!(key.parse::<i32>().is_ok(), "{id}: {:?} -> {key:?}", p.raw_answer);
      }
    }
  }

  #[test]
  fn standards_have_distinct_ids() {
    let ids: HashSet<_> = STANDARDS.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), STANDARDS.len());
  }
}
