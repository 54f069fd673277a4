//! Deprecation reporting.

use std::sync::Arc;

use crate::key::PropertyKey;

/// Receives a notice whenever a resolution consumes legacy properties.
///
/// Notices are advisory; a sink cannot fail a resolution.
#[cfg_attr(test, mockall::automock)]
pub trait DeprecationSink {
    /// Reports that `legacy_keys` supplied the value of `unified_key`.
    fn legacy_used(&self, unified_key: &PropertyKey, legacy_keys: &[PropertyKey]);
}

/// Forwards deprecation notices to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DeprecationSink for LogSink {
    fn legacy_used(&self, unified_key: &PropertyKey, legacy_keys: &[PropertyKey]) {
        log::warn!("{}", deprecation_message(unified_key, legacy_keys));
    }
}

impl<T: DeprecationSink + ?Sized> DeprecationSink for Arc<T> {
    fn legacy_used(&self, unified_key: &PropertyKey, legacy_keys: &[PropertyKey]) {
        (**self).legacy_used(unified_key, legacy_keys);
    }
}

/// Formats the warning shown for legacy keys in use.
///
/// # Examples
///
/// ```
/// use unicfg::resolve::deprecation_message;
/// use unicfg::PropertyKey;
///
/// let unified = PropertyKey::new("camunda.cluster.node-id").unwrap();
/// let legacy = [PropertyKey::new("zeebe.broker.cluster.nodeId").unwrap()];
/// assert_eq!(
///     deprecation_message(&unified, &legacy),
///     "The following legacy configuration properties should be removed in favor of \
///      'camunda.cluster.node-id': zeebe.broker.cluster.nodeId"
/// );
/// ```
#[must_use]
pub fn deprecation_message(unified_key: &PropertyKey, legacy_keys: &[PropertyKey]) -> String {
    let keys: Vec<&str> = legacy_keys.iter().map(PropertyKey::as_str).collect();
    format!(
        "The following legacy configuration properties should be removed in favor of '{unified_key}': {}",
        keys.join(", ")
    )
}
