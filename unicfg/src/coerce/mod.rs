//! Type coercion of raw property values.
//!
//! Raw values are converted into a typed [`Value`] according to a
//! [`TargetType`] before they are compared or returned. Comparing typed
//! values means `10s` and `PT10S` are the same duration, and `a,b` and
//! `[ "a", "b" ]` are the same list.
//!
//! Supported targets:
//! - scalars: string, boolean, integer, floating point
//! - enums, matched case-insensitively against a fixed symbol set
//! - durations (see [`duration`]) and byte sizes (see [`bytes`])
//! - lists and sets in any of the four collection syntaxes (see [`list`])
//!
//! # Examples
//!
//! ```
//! use unicfg::coerce::{coerce, TargetType, Value};
//! use unicfg::source::RawValue;
//! use unicfg::PropertyKey;
//! use std::time::Duration;
//!
//! let key = PropertyKey::new("camunda.api.long-polling.timeout").unwrap();
//! let human = coerce(&key, &RawValue::Text("10s".into()), &TargetType::Duration).unwrap();
//! let iso = coerce(&key, &RawValue::Text("PT10S".into()), &TargetType::Duration).unwrap();
//! assert_eq!(human, iso);
//! assert_eq!(human, Value::Duration(Duration::from_secs(10)));
//! ```

pub mod bytes;
pub mod duration;
pub mod list;
pub mod property;
pub mod scalar;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use bytes::ByteSize;
pub use property::Property;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{Error, Result};
use crate::key::PropertyKey;
use crate::source::RawValue;

/// A coerced, strongly typed property value.
///
/// Values are totally ordered so collections can be deduplicated; floats
/// compare with [`f64::total_cmp`].
#[derive(Debug, Clone)]
pub enum Value {
    /// Text.
    String(String),
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// An enum symbol, in its declared spelling.
    Symbol(String),
    /// A duration.
    Duration(Duration),
    /// A byte quantity.
    Bytes(ByteSize),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A sorted, duplicate-free collection.
    Set(Vec<Value>),
}

impl Value {
    /// Builds a set value: sorts and removes duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::coerce::Value;
    ///
    /// let a = Value::set(vec![Value::from("b"), Value::from("a"), Value::from("b")]);
    /// let b = Value::set(vec![Value::from("a"), Value::from("b")]);
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn set(mut items: Vec<Value>) -> Self {
        items.sort();
        items.dedup();
        Self::Set(items)
    }

    /// Returns the enum symbol, if this is a symbol value.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns the text, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements of a list or set value.
    #[must_use]
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::String(_) => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) => 2,
            Self::Float(_) => 3,
            Self::Symbol(_) => 4,
            Self::Duration(_) => 5,
            Self::Bytes(_) => 6,
            Self::List(_) => 7,
            Self::Set(_) => 8,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::String(a), Self::String(b)) | (Self::Symbol(a), Self::Symbol(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Duration(a), Self::Duration(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Set(a), Self::Set(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) | Self::Symbol(text) => f.write_str(text),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
            Self::Bytes(b) => write!(f, "{b}"),
            Self::List(items) | Self::Set(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::String(text) | Self::Symbol(text) => serializer.serialize_str(text),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Duration(_) => serializer.collect_str(self),
            Self::Bytes(b) => serializer.serialize_u64(b.as_u64()),
            Self::List(items) | Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

/// The type a raw value is coerced into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// Text, with surrounding whitespace trimmed.
    String,
    /// A boolean (`true/false/yes/no/on/off/1/0`).
    Bool,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit floating point number.
    Float,
    /// One of the given symbols, matched case-insensitively.
    Enum(Vec<String>),
    /// A duration.
    Duration,
    /// A byte quantity.
    ByteSize,
    /// An ordered sequence of elements.
    List(Box<TargetType>),
    /// A sorted, duplicate-free collection of elements.
    Set(Box<TargetType>),
}

impl TargetType {
    /// Builds an enum target from its symbols.
    #[must_use]
    pub fn enumeration(symbols: &[&str]) -> Self {
        Self::Enum(symbols.iter().map(|s| (*s).to_string()).collect())
    }

    /// Builds a list target.
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Builds a set target.
    #[must_use]
    pub fn set_of(element: Self) -> Self {
        Self::Set(Box::new(element))
    }

    /// Returns `true` for list and set targets.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_))
    }

    /// Returns the textual form accepted by [`FromStr`], e.g.
    /// `list:duration` or `enum:NONE|GZIP`.
    #[must_use]
    pub fn notation(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Float => "float".to_string(),
            Self::Enum(symbols) => format!("enum:{}", symbols.join("|")),
            Self::Duration => "duration".to_string(),
            Self::ByteSize => "bytes".to_string(),
            Self::List(element) => format!("list:{}", element.notation()),
            Self::Set(element) => format!("set:{}", element.notation()),
        }
    }
}

impl Serialize for TargetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.notation())
    }
}

impl<'de> Deserialize<'de> for TargetType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let notation = String::deserialize(deserializer)?;
        notation.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Enum(symbols) => write!(f, "one of [{}]", symbols.join(", ")),
            Self::Duration => write!(f, "duration"),
            Self::ByteSize => write!(f, "byte size"),
            Self::List(element) => write!(f, "list of {element}"),
            Self::Set(element) => write!(f, "set of {element}"),
        }
    }
}

impl FromStr for TargetType {
    type Err = String;

    /// Parses `string`, `bool`, `integer`, `float`, `duration`, `bytes`,
    /// `enum:a|b|c`, `list:<type>` and `set:<type>`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_prefix("list:") {
            return Ok(Self::list_of(element.parse()?));
        }
        if let Some(element) = s.strip_prefix("set:") {
            return Ok(Self::set_of(element.parse()?));
        }
        if let Some(symbols) = s.strip_prefix("enum:") {
            let symbols: Vec<&str> = symbols.split('|').map(str::trim).collect();
            if symbols.iter().any(|symbol| symbol.is_empty()) {
                return Err(format!("invalid enum symbols: '{s}'"));
            }
            return Ok(Self::enumeration(&symbols));
        }

        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            "duration" => Ok(Self::Duration),
            "bytes" | "bytesize" | "datasize" => Ok(Self::ByteSize),
            _ => Err(format!("unknown type: '{s}'")),
        }
    }
}

/// Coerces the raw value supplied for `key` into `target`.
///
/// # Errors
///
/// Returns [`Error::TypeCoercion`] naming the key (or the indexed element
/// key) and the rejected raw text.
pub fn coerce(key: &PropertyKey, raw: &RawValue, target: &TargetType) -> Result<Value> {
    match target {
        TargetType::List(element) => Ok(Value::List(coerce_elements(key, raw, element)?)),
        TargetType::Set(element) => Ok(Value::set(coerce_elements(key, raw, element)?)),
        scalar => match raw {
            RawValue::Text(text) => coerce_text(key, text, scalar),
            RawValue::Indexed(_) => Err(mismatch(key, &raw.to_string(), target)),
        },
    }
}

/// Coerces a single textual value.
///
/// # Errors
///
/// Returns [`Error::TypeCoercion`] if `text` cannot be parsed as `target`.
pub fn coerce_text(key: &PropertyKey, text: &str, target: &TargetType) -> Result<Value> {
    let parsed = match target {
        TargetType::String => Some(Value::String(text.trim().to_string())),
        TargetType::Bool => scalar::parse_bool(text).map(Value::Bool),
        TargetType::Integer => scalar::parse_integer(text).map(Value::Integer),
        TargetType::Float => scalar::parse_float(text).map(Value::Float),
        TargetType::Enum(symbols) => scalar::match_symbol(text, symbols).map(Value::Symbol),
        TargetType::Duration => duration::parse_duration(text).map(Value::Duration),
        TargetType::ByteSize => ByteSize::parse(text).map(Value::Bytes),
        TargetType::List(_) | TargetType::Set(_) => {
            return coerce(key, &RawValue::Text(text.to_string()), target)
        }
    };

    parsed.ok_or_else(|| mismatch(key, text, target))
}

fn coerce_elements(key: &PropertyKey, raw: &RawValue, element: &TargetType) -> Result<Vec<Value>> {
    list::elements(raw)
        .iter()
        .enumerate()
        .map(|(index, text)| coerce_text(&key.index(index), text, element))
        .collect()
}

fn mismatch(key: &PropertyKey, raw: &str, target: &TargetType) -> Error {
    Error::TypeCoercion {
        key: key.to_string(),
        raw: raw.to_string(),
        expected: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PropertyKey {
        PropertyKey::new("camunda.test.property").unwrap()
    }

    fn text(raw: &str, target: &TargetType) -> Result<Value> {
        coerce(&key(), &RawValue::Text(raw.to_string()), target)
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(text("hello", &TargetType::String).unwrap(), Value::from("hello"));
        assert_eq!(text("TRUE", &TargetType::Bool).unwrap(), Value::Bool(true));
        assert_eq!(text("20000", &TargetType::Integer).unwrap(), Value::Integer(20000));
        assert_eq!(text("0.5", &TargetType::Float).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_enum_coercion_uses_declared_spelling() {
        let target = TargetType::enumeration(&["NONE", "GZIP", "SNAPPY"]);
        assert_eq!(text("gzip", &target).unwrap(), Value::Symbol("GZIP".into()));
        assert!(text("zstd", &target).is_err());
    }

    #[test]
    fn test_coercion_error_carries_key_and_raw() {
        let err = text("ten seconds", &TargetType::Duration).unwrap_err();
        match err {
            Error::TypeCoercion { key, raw, expected } => {
                assert_eq!(key, "camunda.test.property");
                assert_eq!(raw, "ten seconds");
                assert_eq!(expected, "duration");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_list_element_error_names_element() {
        let err = text("10s,soon", &TargetType::list_of(TargetType::Duration)).unwrap_err();
        match err {
            Error::TypeCoercion { key, raw, .. } => {
                assert_eq!(key, "camunda.test.property[1]");
                assert_eq!(raw, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_indexed_value_for_scalar_target_fails() {
        let raw = RawValue::Indexed(vec!["a".into(), "b".into()]);
        assert!(matches!(
            coerce(&key(), &raw, &TargetType::String),
            Err(Error::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_list_keeps_order_set_does_not() {
        let list = TargetType::list_of(TargetType::String);
        let set = TargetType::set_of(TargetType::String);

        assert_ne!(text("a,b", &list).unwrap(), text("b,a", &list).unwrap());
        assert_eq!(text("a,b", &set).unwrap(), text("[b, a, b]", &set).unwrap());
    }

    #[test]
    fn test_value_ordering_across_variants() {
        assert!(Value::from("z") < Value::Bool(false));
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::Float(1.0), Value::Float(1.00));
    }

    #[test]
    fn test_target_type_notation_parses_back() {
        for notation in ["string", "bool", "bytes", "enum:NONE|GZIP", "set:list:duration"] {
            let target: TargetType = notation.parse().unwrap();
            assert_eq!(target.notation(), notation);
        }
        let yaml: TargetType = serde_yaml::from_str("list:integer").unwrap();
        assert_eq!(yaml, TargetType::list_of(TargetType::Integer));
        assert!(serde_yaml::from_str::<TargetType>("decimal").is_err());
    }

    #[test]
    fn test_negative_zero_float_equals_zero() {
        assert_eq!(
            text("-0", &TargetType::Float).unwrap(),
            text("0.0", &TargetType::Float).unwrap()
        );
        assert_eq!((-0.0_f64).into_value(), Value::Float(0.0));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Duration(Duration::from_secs(10)).to_string(), "10s");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::Integer(2)]).to_string(),
            "[a, 2]"
        );
        assert_eq!(Value::Bytes(ByteSize::from_mib(50)).to_string(), "50MB");
    }

    #[test]
    fn test_value_serialization() {
        let value = Value::List(vec![
            Value::from("a"),
            Value::Bool(true),
            Value::Duration(Duration::from_millis(1500)),
            Value::Bytes(ByteSize::from_kib(1)),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["a",true,"1s 500ms",1024]"#);
    }

    #[test]
    fn test_target_type_parsing() {
        assert_eq!("duration".parse::<TargetType>().unwrap(), TargetType::Duration);
        assert_eq!("BOOL".parse::<TargetType>().unwrap(), TargetType::Bool);
        assert_eq!(
            "list:bytes".parse::<TargetType>().unwrap(),
            TargetType::list_of(TargetType::ByteSize)
        );
        assert_eq!(
            "set:enum:gzip|snappy".parse::<TargetType>().unwrap(),
            TargetType::set_of(TargetType::enumeration(&["gzip", "snappy"]))
        );
        assert!("enum:a||b".parse::<TargetType>().is_err());
        assert!("uuid".parse::<TargetType>().is_err());
    }

    #[test]
    fn test_target_type_display() {
        assert_eq!(
            TargetType::list_of(TargetType::Duration).to_string(),
            "list of duration"
        );
        assert_eq!(
            TargetType::enumeration(&["a", "b"]).to_string(),
            "one of [a, b]"
        );
    }
}
