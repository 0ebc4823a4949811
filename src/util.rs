//! Small utility helpers used across modules.

/// Greatest common divisor on non-negative integers; `gcd(0, 0) == 0`.
pub fn gcd(a: u32, b: u32) -> u32 {
  let (mut a, mut b) = (a, b);
  while b != 0 {
    let t = a % b;
    a = b;
    b = t;
  }
  a
}

/// Render a count of tenths as a one-decimal string ("-12.5", "0.3", "4.0").
/// Keeps decimal answers exact instead of going through f64 rounding.
pub fn format_tenths(tenths: i64) -> String {
  let sign = if tenths < 0 { "-" } else { "" };
  let abs = tenths.unsigned_abs();
  format!("{}{}.{}", sign, abs / 10, abs % 10)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with long riddle prompts or request payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} chars total)", head, s.chars().count())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gcd_basics() {
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(gcd(7, 0), 7);
    assert_eq!(gcd(1, 9), 1);
  }

  #[test]
  fn tenths_render_exactly() {
    assert_eq!(format_tenths(125), "12.5");
    assert_eq!(format_tenths(-3), "-0.3");
    assert_eq!(format_tenths(40), "4.0");
  }

  #[test]
  fn trunc_keeps_short_strings() {
    assert_eq!(trunc_for_log("abc", 5), "abc");
    assert!(trunc_for_log("abcdefgh", 3).starts_with("abc…"));
  }
}
