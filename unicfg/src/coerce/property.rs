//! Mapping between Rust types and coerced values.

use std::collections::BTreeSet;
use std::time::Duration;

use super::{ByteSize, TargetType, Value};

/// A Rust type a property can be resolved into.
///
/// Each implementation names the [`TargetType`] raw values are coerced into
/// and converts the coerced [`Value`] back. `from_value` returns `None`
/// when the value is of the right kind but out of range for the type, for
/// example `70000` for a `u16`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use unicfg::coerce::{Property, TargetType, Value};
///
/// assert_eq!(<Duration as Property>::target(), TargetType::Duration);
/// assert_eq!(u16::from_value(Value::Integer(26500)), Some(26500));
/// assert_eq!(u16::from_value(Value::Integer(70000)), None);
/// ```
pub trait Property: Sized {
    /// The target raw values are coerced into.
    fn target() -> TargetType;

    /// Extracts `Self` from a coerced value.
    fn from_value(value: Value) -> Option<Self>;

    /// Converts `self` into a value of [`Property::target`].
    fn into_value(self) -> Value;
}

impl Property for String {
    fn target() -> TargetType {
        TargetType::String
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) | Value::Symbol(text) => Some(text),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl Property for bool {
    fn target() -> TargetType {
        TargetType::Bool
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Property for f64 {
    fn target() -> TargetType {
        TargetType::Float
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(super::scalar::normalize_zero(self))
    }
}

impl Property for Duration {
    fn target() -> TargetType {
        TargetType::Duration
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Duration(self)
    }
}

impl Property for ByteSize {
    fn target() -> TargetType {
        TargetType::ByteSize
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(size) => Some(size),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bytes(self)
    }
}

/// Integers are coerced as `i64` and narrowed on extraction.
macro_rules! impl_integer_property {
    ($($ty:ty),*) => {
        $(
            impl Property for $ty {
                fn target() -> TargetType {
                    TargetType::Integer
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).ok(),
                        _ => None,
                    }
                }

                /// Values above `i64::MAX` saturate.
                fn into_value(self) -> Value {
                    Value::Integer(i64::try_from(self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_integer_property!(i32, i64, u16, u32, u64, usize);

impl<T: Property> Property for Vec<T> {
    fn target() -> TargetType {
        TargetType::list_of(T::target())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) | Value::Set(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }
}

impl<T: Property + Ord> Property for BTreeSet<T> {
    fn target() -> TargetType {
        TargetType::set_of(T::target())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) | Value::Set(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::set(self.into_iter().map(T::into_value).collect())
    }
}
