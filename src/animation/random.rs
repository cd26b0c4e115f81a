use crate::foundation::math::{Fnv1a64, mix64, unit_f64};

/// Seed accepted by [`pseudo_random`]: a string key or a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Seed<'a> {
    /// Stable string key, e.g. `"spark-angle-3"`.
    Text(&'a str),
    /// Numeric seed.
    Number(f64),
}

impl<'a> From<&'a str> for Seed<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for Seed<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl From<f64> for Seed<'_> {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<u64> for Seed<'_> {
    fn from(v: u64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i64> for Seed<'_> {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<usize> for Seed<'_> {
    fn from(v: usize) -> Self {
        Self::Number(v as f64)
    }
}

/// Deterministic value in `[0, 1)` for `seed`.
///
/// Same seed, same value, on every call and every frame; distinct seeds decorrelate. Strings and
/// numbers hash into separate domains, so `"1"` and `1` differ.
pub fn pseudo_random<'a>(seed: impl Into<Seed<'a>>) -> f64 {
    let mut h = Fnv1a64::new_default();
    match seed.into() {
        Seed::Text(s) => {
            h.write_u8(0);
            h.write_bytes(s.as_bytes());
        }
        Seed::Number(v) => {
            // -0.0 and 0.0 are the same seed.
            let v = if v == 0.0 { 0.0 } else { v };
            h.write_u8(1);
            h.write_u64(v.to_bits());
        }
    }
    unit_f64(mix64(h.finish()))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/random.rs"]
mod tests;
