//! Answer normalization: the comparison key used to group problems by answer.

/// Tokens stripped from raw answers. Longer tokens come first so "°F" wins over "°"
/// and "mph" over "m".
const UNIT_TOKENS: &[&str] = &["°F", "°C", "°", "$", "%", "mph", "km", "cm", "ft", "m"];

/// Canonicalize a raw answer into a comparable key.
///
/// Ratio (`3:4`) and fraction (`7/8`) forms are already comparison safe and are
/// returned verbatim. Everything else has unit, currency and degree tokens
/// removed and is trimmed. Stripping repeats until nothing changes, so the
/// result is stable under a second pass.
pub fn normalize(raw: &str) -> String {
  if raw.contains(':') || raw.contains('/') {
    return raw.to_string();
  }

  let mut out = raw.to_string();
  loop {
    let before = out.len();
    for token in UNIT_TOKENS {
      out = out.replace(token, "");
    }
    if out.len() == before {
      break;
    }
  }
  out.trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_currency_and_percent() {
    assert_eq!(normalize("$45"), "45");
    assert_eq!(normalize("12%"), "12");
  }

  #[test]
  fn keeps_ratio_and_fraction_forms() {
    assert_eq!(normalize("3:4"), "3:4");
    assert_eq!(normalize("7/8"), "7/8");
    assert_eq!(normalize(" 3 : 4 "), " 3 : 4 ");
  }

  #[test]
  fn strips_degrees_and_units() {
    assert_eq!(normalize("-4°F"), "-4");
    assert_eq!(normalize("21°"), "21");
    assert_eq!(normalize("55 mph"), "55");
    assert_eq!(normalize("12 cm"), "12");
    assert_eq!(normalize("  7  "), "7");
  }

  #[test]
  fn algebraic_answers_survive() {
    assert_eq!(normalize("7x + 3"), "7x + 3");
    assert_eq!(normalize("2(3x + 4)"), "2(3x + 4)");
  }

  #[test]
  fn is_idempotent() {
    for raw in ["$45", "12%", "3:4", "7/8", "ccmm", "k°m", " 5 ft ", "", "x"] {
      let once = normalize(raw);
      assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
    }
  }
}
