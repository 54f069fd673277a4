//! Per-property resolution builder.

use crate::coerce::{coerce, Property, TargetType, Value};
use crate::error::{Error, Result};
use crate::key::PropertyKey;
use crate::resolve::{CompatibilityMode, ResolutionRequest, Resolver};
use crate::source::PropertySource;

/// Resolution of one unified property through a [`Resolver`].
///
/// The request reads the unified key from the resolver's source, gathers
/// the legacy keys the registry lists for it under the active profiles and
/// runs the resolution. A key without a catalogue entry resolves from the
/// unified key alone.
///
/// # Examples
///
/// ```
/// use unicfg::catalogue::MappingRegistry;
/// use unicfg::resolve::{CompatibilityMode, Resolver};
/// use unicfg::source::MapSource;
///
/// let source = MapSource::from_pairs([("camunda.cluster.size", "3")]).unwrap();
/// let resolver = Resolver::new(source, MappingRegistry::empty());
///
/// let size: u32 = resolver
///     .property("camunda.cluster.size")
///     .unwrap()
///     .mode(CompatibilityMode::NotSupported)
///     .resolve_or(1)
///     .unwrap();
/// assert_eq!(size, 3);
///
/// let replicas: u32 = resolver
///     .property("camunda.cluster.replication-factor")
///     .unwrap()
///     .resolve_or(1)
///     .unwrap();
/// assert_eq!(replicas, 1);
/// ```
#[derive(Debug)]
#[must_use]
pub struct PropertyRequest<'r, S> {
    resolver: &'r Resolver<S>,
    key: PropertyKey,
    mode: CompatibilityMode,
    require_match: bool,
    default_value: Option<Value>,
}

impl<'r, S: PropertySource> PropertyRequest<'r, S> {
    pub(crate) fn new(resolver: &'r Resolver<S>, key: PropertyKey) -> Self {
        Self {
            resolver,
            key,
            mode: CompatibilityMode::default(),
            require_match: false,
            default_value: None,
        }
    }

    /// Sets the compatibility mode.
    pub fn mode(mut self, mode: CompatibilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Requires unified and legacy values to match.
    pub fn require_match(mut self) -> Self {
        self.require_match = true;
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Property) -> Self {
        self.default_value = Some(value.into_value());
        self
    }

    /// Returns the unified key.
    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    /// Builds the resolution request for `target`.
    ///
    /// The unified value is only taken when the source reports the key as
    /// explicitly set; a value that merely carries a default is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeCoercion`] if the unified value cannot be
    /// coerced into `target`.
    pub fn to_request(&self, target: TargetType) -> Result<ResolutionRequest> {
        let source = self.resolver.source();
        let supplied = if source.is_explicitly_set(&self.key) {
            source
                .raw_value(&self.key)
                .map(|raw| coerce(&self.key, &raw, &target))
                .transpose()?
        } else {
            None
        };

        let candidates = self
            .resolver
            .registry()
            .eligible_legacy_keys(&self.key, self.resolver.profiles());

        Ok(ResolutionRequest {
            unified_key: self.key.clone(),
            supplied_value: supplied,
            default_value: self.default_value.clone(),
            target,
            mode: self.mode,
            require_match: self.require_match,
            candidate_legacy_keys: candidates,
        })
    }

    /// Resolves into a dynamically typed value.
    ///
    /// Returns `None` if nothing is configured and no default is set.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Resolver::try_resolve`], and
    /// [`Error::TypeCoercion`] if the unified value cannot be coerced.
    pub fn resolve(&self, target: TargetType) -> Result<Option<Value>> {
        let request = self.to_request(target)?;
        self.resolver.try_resolve(&request)
    }

    /// Resolves into `T`, returning `None` if nothing is configured and no
    /// default is set.
    ///
    /// # Errors
    ///
    /// As [`PropertyRequest::resolve`]; also [`Error::TypeCoercion`] if the
    /// value is out of range for `T`.
    pub fn resolve_optional<T: Property>(&self) -> Result<Option<T>> {
        self.resolve(T::target())?
            .map(|value| self.extract(value))
            .transpose()
    }

    /// Resolves into `T`.
    ///
    /// # Errors
    ///
    /// As [`PropertyRequest::resolve_optional`]; also
    /// [`Error::MissingValue`] if nothing is configured and no default is
    /// set.
    pub fn resolve_as<T: Property>(&self) -> Result<T> {
        self.resolve_optional()?.ok_or_else(|| Error::MissingValue {
            key: self.key.to_string(),
        })
    }

    /// Resolves into `T`, using `default` if nothing is configured.
    ///
    /// # Errors
    ///
    /// As [`PropertyRequest::resolve_optional`].
    pub fn resolve_or<T: Property>(self, default: T) -> Result<T> {
        self.default_value(default).resolve_as()
    }

    fn extract<T: Property>(&self, value: Value) -> Result<T> {
        let raw = value.to_string();
        T::from_value(value).ok_or_else(|| Error::TypeCoercion {
            key: self.key.to_string(),
            raw,
            expected: std::any::type_name::<T>().to_string(),
        })
    }
}
