//! Layered property sources and precedence handling.
//!
//! A [`LayeredSource`] stacks sources from highest to lowest precedence,
//! e.g. environment variables over an application file over a defaults
//! file. The first layer that explicitly sets a key supplies its value;
//! layers are never merged below the level of a single key.

use super::{PropertySource, RawValue};
use crate::key::PropertyKey;

/// Ordered stack of property sources, highest precedence first.
///
/// # Examples
///
/// ```
/// use unicfg::source::{LayeredSource, MapSource, PropertySource, RawValue};
/// use unicfg::PropertyKey;
///
/// let high = MapSource::from_pairs([("camunda.cluster.size", "5")]).unwrap();
/// let low = MapSource::from_pairs([
///     ("camunda.cluster.size", "3"),
///     ("camunda.cluster.replication-factor", "3"),
/// ])
/// .unwrap();
///
/// let layered = LayeredSource::new().with(high).with(low);
/// let size = PropertyKey::new("camunda.cluster.size").unwrap();
/// let factor = PropertyKey::new("camunda.cluster.replicationFactor").unwrap();
/// assert_eq!(layered.raw_value(&size), Some(RawValue::Text("5".into())));
/// assert_eq!(layered.raw_value(&factor), Some(RawValue::Text("3".into())));
/// ```
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn PropertySource + Send + Sync>>,
}

impl LayeredSource {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer below all existing layers.
    #[must_use]
    pub fn with(mut self, layer: impl PropertySource + Send + Sync + 'static) -> Self {
        self.push(layer);
        self
    }

    /// Adds a layer below all existing layers.
    pub fn push(&mut self, layer: impl PropertySource + Send + Sync + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PropertySource for LayeredSource {
    fn raw_value(&self, key: &PropertyKey) -> Option<RawValue> {
        self.layers
            .iter()
            .find(|layer| layer.is_explicitly_set(key))
            .and_then(|layer| layer.raw_value(key))
            .or_else(|| self.layers.iter().find_map(|layer| layer.raw_value(key)))
    }

    fn is_explicitly_set(&self, key: &PropertyKey) -> bool {
        self.layers.iter().any(|layer| layer.is_explicitly_set(key))
    }
}

impl std::fmt::Debug for LayeredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}
