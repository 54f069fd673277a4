//! Byte quantities such as `512MB` or `1GB`.
//!
//! Units are binary: `KB` is 1024 bytes and `MB` is 1024 KB. The IEC
//! spellings (`KiB`, `MiB`, `GiB`, `TiB`, `PiB`) are accepted as well. A bare
//! integer is a number of bytes. Unit suffixes are case-insensitive and
//! may be separated from the number by whitespace.

use std::fmt;

use byte_unit::Byte;
use serde::{Serialize, Serializer};

const KIB: u64 = 1024;

/// Binary unit suffixes, largest first, with their multipliers.
const UNITS: [(&str, u64); 4] = [
    ("TB", KIB * KIB * KIB * KIB),
    ("GB", KIB * KIB * KIB),
    ("MB", KIB * KIB),
    ("KB", KIB),
];

/// A quantity of bytes.
///
/// # Examples
///
/// ```
/// use unicfg::coerce::ByteSize;
///
/// let size = ByteSize::parse("512MB").unwrap();
/// assert_eq!(size.as_u64(), 512 * 1024 * 1024);
/// assert_eq!(size, ByteSize::parse("512 mb").unwrap());
/// assert_eq!(size.to_string(), "512MB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(u64);

impl ByteSize {
    /// Creates a size from a number of bytes.
    #[must_use]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a size from a number of kibibytes (`KB`).
    #[must_use]
    pub const fn from_kib(kib: u64) -> Self {
        Self(kib * KIB)
    }

    /// Creates a size from a number of mebibytes (`MB`).
    #[must_use]
    pub const fn from_mib(mib: u64) -> Self {
        Self(mib * KIB * KIB)
    }

    /// Returns the number of bytes.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Parses `<integer>[B|KB|MB|GB|TB]` or an IEC unit such as `MiB`.
    ///
    /// Returns `None` for negative numbers, fractions, unknown units and
    /// quantities that overflow `u64`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        let digits_end = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(s.len(), |(i, _)| i);
        let (number, unit) = s.split_at(digits_end);
        if number.is_empty() {
            return None;
        }

        let unit = match unit.trim().to_ascii_uppercase().as_str() {
            "" | "B" => "B",
            "KB" | "KIB" => "KiB",
            "MB" | "MIB" => "MiB",
            "GB" | "GIB" => "GiB",
            "TB" | "TIB" => "TiB",
            "PIB" => "PiB",
            _ => return None,
        };

        Byte::parse_str(format!("{number} {unit}"), false)
            .ok()
            .map(|byte| Self(byte.as_u64()))
    }
}

impl fmt::Display for ByteSize {
    /// Formats with the largest unit that divides the size exactly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            for (suffix, multiplier) in UNITS {
                if self.0 % multiplier == 0 {
                    return write!(f, "{}{suffix}", self.0 / multiplier);
                }
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units_are_binary() {
        assert_eq!(ByteSize::parse("1KB"), Some(ByteSize::from_bytes(1024)));
        assert_eq!(ByteSize::parse("50MB"), Some(ByteSize::from_mib(50)));
        assert_eq!(
            ByteSize::parse("2GB").map(ByteSize::as_u64),
            Some(2 * 1024 * 1024 * 1024)
        );
        assert_eq!(
            ByteSize::parse("1TB").map(ByteSize::as_u64),
            Some(1024_u64.pow(4))
        );
    }

    #[test]
    fn test_parse_iec_units() {
        assert_eq!(ByteSize::parse("1KiB"), Some(ByteSize::from_kib(1)));
        assert_eq!(ByteSize::parse("512MiB"), Some(ByteSize::from_mib(512)));
        assert_eq!(ByteSize::parse("512MiB"), ByteSize::parse("512MB"));
        assert_eq!(ByteSize::parse("10 mib"), Some(ByteSize::from_mib(10)));
        assert_eq!(
            ByteSize::parse("1GiB").map(ByteSize::as_u64),
            Some(1024 * 1024 * 1024)
        );
        assert_eq!(ByteSize::parse("2TiB"), ByteSize::parse("2TB"));
        assert_eq!(
            ByteSize::parse("1PiB").map(ByteSize::as_u64),
            Some(1024_u64.pow(5))
        );
    }

    #[test]
    fn test_parse_bare_number_is_bytes() {
        assert_eq!(ByteSize::parse("4096"), Some(ByteSize::from_bytes(4096)));
        assert_eq!(ByteSize::parse("4096B"), Some(ByteSize::from_bytes(4096)));
        assert_eq!(ByteSize::parse("0"), Some(ByteSize::default()));
    }

    #[test]
    fn test_parse_is_lenient_on_case_and_spacing() {
        assert_eq!(ByteSize::parse(" 50 mb "), Some(ByteSize::from_mib(50)));
        assert_eq!(ByteSize::parse("50Mb"), Some(ByteSize::from_mib(50)));
        assert_eq!(ByteSize::parse("+8kb"), Some(ByteSize::from_kib(8)));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for s in ["", "MB", "-1KB", "1.5MB", "10PB", "1.5MiB", "10 Kib b", "lots"] {
            assert_eq!(ByteSize::parse(s), None, "{s}");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(ByteSize::parse("99999999999999TB"), None);
    }

    #[test]
    fn test_display_uses_largest_exact_unit() {
        assert_eq!(ByteSize::from_bytes(0).to_string(), "0B");
        assert_eq!(ByteSize::from_bytes(1000).to_string(), "1000B");
        assert_eq!(ByteSize::from_kib(1).to_string(), "1KB");
        assert_eq!(ByteSize::from_kib(1536).to_string(), "1536KB");
        assert_eq!(ByteSize::from_mib(2048).to_string(), "2GB");
    }
}
