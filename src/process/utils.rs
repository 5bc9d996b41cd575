use once_cell::sync::Lazy;
use regex::Regex;

// digits [. digits] [e|E [+|-] digits], with at least one mantissa digit
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid decimal pattern")
});

static INFINITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)Infinity$").expect("valid infinity pattern"));

/// Numeric coercion with browser `Number()` rules: surrounding whitespace is
/// ignored, an empty string is `0`, `Infinity` is accepted, and anything that
/// is not a complete decimal literal is `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(caps) = INFINITY.captures(s) {
        return if &caps[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if !DECIMAL.is_match(s) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `parse_number`, except empty and non-numeric text become `0`.
pub fn parse_pct_or_zero(raw: &str) -> f64 {
    let v = parse_number(raw);
    if v.is_nan() {
        0.0
    } else {
        v
    }
}
