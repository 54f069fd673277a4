//! Mutually exclusive configuration fields.
//!
//! Some concepts can be configured through alternative fields, such as a
//! single `url` or a list of `urls` for the secondary storage. At most one
//! of them may be set.

use crate::coerce::{coerce, TargetType, Value};
use crate::error::{Error, Result};
use crate::key::PropertyKey;
use crate::source::PropertySource;

/// A group of alternative fields configuring one concept.
///
/// # Examples
///
/// ```
/// use unicfg::coerce::{TargetType, Value};
/// use unicfg::exclusive::ExclusiveGroup;
/// use unicfg::source::MapSource;
///
/// let group = ExclusiveGroup::new(
///     "secondary storage",
///     &[
///         "camunda.data.secondary-storage.elasticsearch.url",
///         "camunda.data.secondary-storage.elasticsearch.urls",
///     ],
/// )
/// .unwrap();
///
/// let source = MapSource::from_pairs([(
///     "camunda.data.secondary-storage.elasticsearch.urls",
///     "http://a:9200,http://b:9200",
/// )])
/// .unwrap();
///
/// let urls = group
///     .value(
///         &source,
///         "camunda.data.secondary-storage.elasticsearch.urls",
///         &TargetType::list_of(TargetType::String),
///     )
///     .unwrap();
/// assert_eq!(urls.and_then(|v| v.elements().map(<[Value]>::len)), Some(2));
///
/// let both = MapSource::from_pairs([
///     ("camunda.data.secondary-storage.elasticsearch.url", "http://a:9200"),
///     ("camunda.data.secondary-storage.elasticsearch.urls", "http://b:9200"),
/// ])
/// .unwrap();
/// assert!(group.configured(&both).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    concept: String,
    fields: Vec<PropertyKey>,
}

impl ExclusiveGroup {
    /// Creates a group from the concept name and its alternative field keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if a field key is malformed.
    pub fn new(concept: impl Into<String>, fields: &[&str]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|field| PropertyKey::new(*field))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            concept: concept.into(),
            fields,
        })
    }

    /// Returns the concept name.
    #[must_use]
    pub fn concept(&self) -> &str {
        &self.concept
    }

    /// Returns the field keys.
    #[must_use]
    pub fn fields(&self) -> &[PropertyKey] {
        &self.fields
    }

    /// Returns the field that is explicitly set, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MutuallyExclusive`] if more than one field is set.
    pub fn configured<S: PropertySource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Option<&PropertyKey>> {
        let set: Vec<&PropertyKey> = self
            .fields
            .iter()
            .filter(|field| source.is_explicitly_set(field))
            .collect();

        match set.as_slice() {
            [] => Ok(None),
            [field] => Ok(Some(*field)),
            _ => Err(Error::MutuallyExclusive {
                concept: self.concept.clone(),
                fields: set.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// Returns the coerced value of `field` if it is the field that is set.
    ///
    /// `None` means `field` is unset; the caller supplies the structural
    /// default, such as an empty list.
    ///
    /// # Errors
    ///
    /// - [`Error::MutuallyExclusive`] if more than one field of the group is
    ///   set
    /// - [`Error::InvalidKey`] if `field` is malformed or not part of the
    ///   group
    /// - [`Error::TypeCoercion`] if the value cannot be coerced
    pub fn value<S: PropertySource + ?Sized>(
        &self,
        source: &S,
        field: &str,
        target: &TargetType,
    ) -> Result<Option<Value>> {
        let field = PropertyKey::new(field)?;
        if !self.fields.contains(&field) {
            return Err(Error::InvalidKey {
                key: field.to_string(),
                reason: format!("not a field of the {} group", self.concept),
            });
        }

        match self.configured(source)? {
            Some(set) if *set == field => source
                .raw_value(set)
                .map(|raw| coerce(set, &raw, target))
                .transpose(),
            _ => Ok(None),
        }
    }
}
