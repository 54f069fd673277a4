//! Property keys and runtime profiles.
//!
//! A [`PropertyKey`] is a dotted path naming one configuration slot. Keys
//! written in different styles (`longPolling`, `long-polling`,
//! `long_polling`, `LONGPOLLING`) address the same slot; comparisons go
//! through the key's canonical form.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// A validated, dotted configuration key.
///
/// Equality, ordering and hashing use the canonical form, so keys that
/// differ only in case, dashes, underscores or index notation are equal.
///
/// # Examples
///
/// ```
/// use unicfg::PropertyKey;
///
/// let camel = PropertyKey::new("zeebe.gateway.longPolling.timeout").unwrap();
/// let kebab = PropertyKey::new("zeebe.gateway.long-polling.timeout").unwrap();
/// assert_eq!(camel, kebab);
/// assert_eq!(camel.canonical(), "zeebe.gateway.longpolling.timeout");
///
/// assert!(PropertyKey::new("").is_err());
/// assert!(PropertyKey::new("zeebe..timeout").is_err());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PropertyKey {
    raw: String,
    #[serde(skip)]
    canonical: String,
}

impl PropertyKey {
    /// Creates a key from its written form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key is empty, has an empty
    /// segment or a malformed `[index]` suffix.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let canonical = canonicalize(&raw).map_err(|reason| Error::InvalidKey {
            key: raw.clone(),
            reason,
        })?;
        Ok(Self { raw, canonical })
    }

    /// Returns the key as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the canonical form used for comparisons.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Returns the key of the element at `index` below this key.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self {
            raw: format!("{}[{index}]", self.raw),
            canonical: format!("{}.{index}", self.canonical),
        }
    }

    /// Returns `true` if `other` is a direct indexed child of this key
    /// (`key.0`, `key[3]`), returning the index.
    #[must_use]
    pub fn child_index(&self, other: &Self) -> Option<usize> {
        let rest = other.canonical.strip_prefix(&self.canonical)?;
        let index = rest.strip_prefix('.')?;
        if index.bytes().all(|b| b.is_ascii_digit()) {
            index.parse().ok()
        } else {
            None
        }
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PropertyKey {}

impl PartialOrd for PropertyKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl std::hash::Hash for PropertyKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PropertyKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PropertyKey {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for PropertyKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Computes the canonical form of a written key.
///
/// `a.b[0].c-d` becomes `a.b.0.cd`.
fn canonicalize(raw: &str) -> std::result::Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("key is empty".into());
    }

    let mut segments = Vec::new();
    for segment in trimmed.split('.') {
        let (name, indices) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };

        let name = canonical_segment(name);
        if name.is_empty() {
            return Err("key contains an empty segment".into());
        }
        segments.push(name);

        let mut rest = indices;
        while !rest.is_empty() {
            let Some(inner) = rest.strip_prefix('[') else {
                return Err(format!("unexpected characters after index in '{segment}'"));
            };
            let Some(end) = inner.find(']') else {
                return Err(format!("unclosed index in '{segment}'"));
            };
            let index = inner[..end].trim();
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("index '{index}' is not a number"));
            }
            segments.push(index.to_string());
            rest = &inner[end + 1..];
        }
    }

    Ok(segments.join("."))
}

fn canonical_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A runtime profile such as `broker` or `gateway`.
///
/// Profiles compare case-insensitively.
///
/// # Examples
///
/// ```
/// use unicfg::Profile;
///
/// assert_eq!(Profile::new("Broker"), Profile::new("broker"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Profile(String);

impl Profile {
    /// Creates a profile, normalizing it to lowercase.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Returns the profile name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Profile {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Profile> for String {
    fn from(profile: Profile) -> Self {
        profile.0
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of active runtime profiles.
///
/// # Examples
///
/// ```
/// use unicfg::{Profile, Profiles};
///
/// let active = Profiles::parse("broker, restore");
/// assert!(active.contains(&Profile::new("broker")));
/// assert!(!active.contains(&Profile::new("gateway")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profiles(BTreeSet<Profile>);

impl Profiles {
    /// Creates an empty profile set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated profile list, ignoring blank entries.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Profile::new)
            .collect()
    }

    /// Returns `true` if `profile` is active.
    #[must_use]
    pub fn contains(&self, profile: &Profile) -> bool {
        self.0.contains(profile)
    }

    /// Returns `true` if any of `profiles` is active.
    #[must_use]
    pub fn intersects(&self, profiles: &BTreeSet<Profile>) -> bool {
        profiles.iter().any(|p| self.0.contains(p))
    }

    /// Returns `true` if no profile is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the active profiles in order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.0.iter()
    }
}

impl FromIterator<Profile> for Profiles {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for Profiles {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Profile::new).collect()
    }
}

impl fmt::Display for Profiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Profile::as_str).collect();
        f.write_str(&names.join(","))
    }
}
