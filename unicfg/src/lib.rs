#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # unicfg
//!
//! A library for resolving configuration properties that moved from legacy
//! keys to a unified scheme.
//!
//! Each unified property may still be supplied through one or more legacy
//! properties. A declarative catalogue lists those aliases, scoped by
//! runtime profile; the resolver reads the unified and legacy values from a
//! property source, coerces them into the requested type and either agrees
//! on one value or fails with a precise error.
//!
//! ## Core Types
//!
//! - [`PropertyKey`], [`Profile`] and [`Profiles`]: keys and runtime tags
//! - [`source::PropertySource`]: where raw values come from
//! - [`catalogue::MappingRegistry`]: the validated legacy catalogue
//! - [`resolve::Resolver`]: the resolution engine
//! - [`coerce::Value`] and [`coerce::TargetType`]: typed values
//! - [`exclusive::ExclusiveGroup`]: alternative fields of one concept
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use unicfg::catalogue::MappingRegistry;
//! use unicfg::resolve::Resolver;
//! use unicfg::source::MapSource;
//! use unicfg::{Error, Profiles};
//!
//! let registry = MappingRegistry::bundled().unwrap();
//! let source = MapSource::from_properties_str(
//!     "camunda.api.long-polling.enabled=true\n\
//!      zeebe.broker.gateway.longPolling.enabled=false\n",
//! )
//! .unwrap();
//!
//! let resolver = Resolver::new(source, registry).with_profiles(Profiles::parse("broker"));
//! let result = resolver
//!     .property("camunda.api.long-polling.enabled")
//!     .unwrap()
//!     .resolve_as::<bool>();
//!
//! assert!(matches!(result, Err(Error::AmbiguousConfiguration { .. })));
//! ```

pub mod catalogue;
pub mod coerce;
pub mod error;
pub mod exclusive;
pub mod key;
pub mod logging;
pub mod resolve;
pub mod source;

// Re-export key types at crate root for convenience
pub use catalogue::MappingRegistry;
pub use coerce::{Property, TargetType, Value};
pub use error::{Error, Result};
pub use exclusive::ExclusiveGroup;
pub use key::{Profile, Profiles, PropertyKey};
pub use logging::{init_logger, LogLevel, Logger};
pub use resolve::{CompatibilityMode, DeprecationSink, ResolutionRequest, Resolver};
pub use source::{LayeredSource, MapSource, PropertySource, RawValue};
