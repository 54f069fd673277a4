//! Scalar parsing: booleans, numbers and enum symbols.

/// Parse a boolean value from a string.
///
/// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
///
/// # Examples
///
/// ```
/// use unicfg::coerce::scalar::parse_bool;
///
/// assert_eq!(parse_bool("ON"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a signed decimal integer.
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Parse a finite floating point number. Negative zero is read as zero.
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(normalize_zero)
}

/// Maps `-0.0` to `0.0` and leaves every other value unchanged.
#[must_use]
pub fn normalize_zero(x: f64) -> f64 {
    // -0.0 + 0.0 == +0.0 under round-to-nearest
    x + 0.0
}

/// Match `s` against `symbols`, returning the declared spelling.
///
/// An exact case-insensitive match wins; otherwise dashes, underscores and
/// spaces are ignored, so `segment-file` matches `SEGMENT_FILE`.
///
/// # Examples
///
/// ```
/// use unicfg::coerce::scalar::match_symbol;
///
/// let symbols = vec!["SEGMENT_FILE".to_string(), "NONE".to_string()];
/// assert_eq!(match_symbol("segment-file", &symbols), Some("SEGMENT_FILE".to_string()));
/// assert_eq!(match_symbol("none", &symbols), Some("NONE".to_string()));
/// assert_eq!(match_symbol("all", &symbols), None);
/// ```
#[must_use]
pub fn match_symbol(s: &str, symbols: &[String]) -> Option<String> {
    let s = s.trim();
    if let Some(exact) = symbols.iter().find(|symbol| symbol.eq_ignore_ascii_case(s)) {
        return Some(exact.clone());
    }

    let lenient = lenient_form(s);
    if lenient.is_empty() {
        return None;
    }
    symbols
        .iter()
        .find(|symbol| lenient_form(symbol) == lenient)
        .cloned()
}

fn lenient_form(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
