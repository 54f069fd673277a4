//! Duration parsing.
//!
//! Three notations are accepted:
//! - a bare integer, in milliseconds (`20000`)
//! - ISO-8601 (`PT10S`, `P2DT3H`, `pt0.5s`)
//! - human notation (`10s`, `20ms`, `5h`, `1h 30m`, `5d`), parsed with
//!   `humantime`

use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;

/// Parse a duration in any supported notation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use unicfg::coerce::duration::parse_duration;
///
/// assert_eq!(parse_duration("20000"), Some(Duration::from_secs(20)));
/// assert_eq!(parse_duration("PT10S"), Some(Duration::from_secs(10)));
/// assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
/// assert_eq!(parse_duration("soon"), None);
/// ```
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().map(Duration::from_millis);
    }

    if s.starts_with(['P', 'p']) {
        return parse_iso8601(s);
    }

    humantime::parse_duration(s).ok()
}

/// Parse the `P[nD][T[nH][nM][n[.f]S]]` subset of ISO-8601 durations.
fn parse_iso8601(s: &str) -> Option<Duration> {
    let upper = s.to_ascii_uppercase();
    let rest = upper.strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    if date.is_empty() && time.is_none() {
        return None;
    }

    let mut total = Duration::ZERO;

    if !date.is_empty() {
        let days: u64 = date.strip_suffix('D')?.parse().ok()?;
        total = total.checked_add(Duration::from_secs(days.checked_mul(SECONDS_PER_DAY)?))?;
    }

    if let Some(time) = time {
        total = total.checked_add(parse_iso_time(time)?)?;
    }

    Some(total)
}

/// Parse the time part after `T`: hours, minutes and seconds in that order,
/// with a fraction allowed on seconds only.
fn parse_iso_time(time: &str) -> Option<Duration> {
    if time.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    let mut number = String::new();
    // 0 = nothing yet, 1 = hours, 2 = minutes, 3 = seconds
    let mut last_unit = 0;

    for c in time.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        let (unit, seconds_per_unit) = match c {
            'H' => (1, 3_600),
            'M' => (2, 60),
            'S' => (3, 1),
            _ => return None,
        };
        if unit <= last_unit || number.is_empty() {
            return None;
        }
        last_unit = unit;

        let part = if unit == 3 {
            parse_seconds(&number)?
        } else {
            let whole: u64 = number.parse().ok()?;
            Duration::from_secs(whole.checked_mul(seconds_per_unit)?)
        };
        total = total.checked_add(part)?;
        number.clear();
    }

    if number.is_empty() {
        Some(total)
    } else {
        None
    }
}

fn parse_seconds(number: &str) -> Option<Duration> {
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };

    let secs: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let nanos: u32 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse().ok()?
    };

    Some(Duration::new(secs, nanos))
}
