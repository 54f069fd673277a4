//! Property-based tests for the resolution decision.

use super::{CompatibilityMode, ResolutionRequest, Resolver};
use crate::catalogue::MappingRegistry;
use crate::coerce::{TargetType, Value};
use crate::error::Error;
use crate::key::PropertyKey;
use crate::source::MapSource;
use proptest::prelude::*;

const UNIFIED: &str = "camunda.api.long-polling.timeout";
const LEGACY: [&str; 3] = [
    "zeebe.gateway.longPolling.timeout",
    "zeebe.broker.gateway.longPolling.timeout",
    "zeebe.legacy.timeout",
];

fn key(raw: &str) -> PropertyKey {
    PropertyKey::new(raw).unwrap()
}

// Strategy for the values of the legacy keys; None leaves a key unset
fn legacy_strategy() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(0i64..4), LEGACY.len())
}

fn resolver(legacy: &[Option<i64>]) -> Resolver<MapSource> {
    let pairs: Vec<(&str, String)> = LEGACY
        .iter()
        .zip(legacy)
        .filter_map(|(k, v)| v.map(|v| (*k, v.to_string())))
        .collect();
    Resolver::new(MapSource::from_pairs(pairs).unwrap(), MappingRegistry::empty())
}

fn request(supplied: Option<i64>, default: i64) -> ResolutionRequest {
    let request = ResolutionRequest::new(key(UNIFIED), TargetType::Integer)
        .with_default(Value::Integer(default))
        .with_candidates(LEGACY.iter().map(|k| key(k)).collect());
    match supplied {
        Some(value) => request.with_supplied(Value::Integer(value)),
        None => request,
    }
}

fn distinct(legacy: &[Option<i64>]) -> Vec<i64> {
    let mut values: Vec<i64> = legacy.iter().flatten().copied().collect();
    values.sort_unstable();
    values.dedup();
    values
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Resolving the same request twice gives the same outcome
    #[test]
    fn resolution_is_idempotent(
        legacy in legacy_strategy(),
        supplied in prop::option::of(0i64..4),
        default in 0i64..4,
    ) {
        let resolver = resolver(&legacy);
        let request = request(supplied, default);

        let first = resolver.resolve(&request).map_err(|e| e.to_string());
        let second = resolver.resolve(&request).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    // The outcome follows the decision table in Supported mode
    #[test]
    fn supported_mode_decision(
        legacy in legacy_strategy(),
        supplied in prop::option::of(0i64..4),
        default in 0i64..4,
    ) {
        let result = resolver(&legacy).resolve(&request(supplied, default));
        let values = distinct(&legacy);

        match (values.as_slice(), supplied) {
            ([], Some(s)) => {
                prop_assert_eq!(result.unwrap(), Value::Integer(s));
            }
            ([], None) => {
                prop_assert_eq!(result.unwrap(), Value::Integer(default));
            }
            ([_, _, ..], _) => {
                prop_assert!(matches!(result, Err(Error::AmbiguousLegacyConfiguration { .. })), "expected Error::AmbiguousLegacyConfiguration, got {:?}", result);
            }
            ([v], None) => {
                prop_assert_eq!(result.unwrap(), Value::Integer(*v));
            }
            ([v], Some(s)) if *v == s => {
                prop_assert_eq!(result.unwrap(), Value::Integer(s));
            }
            ([_], Some(_)) => {
                prop_assert!(matches!(result, Err(Error::AmbiguousConfiguration { .. })), "expected Error::AmbiguousConfiguration, got {:?}", result);
            }
        }
    }

    // In NotSupported mode any set legacy key fails, otherwise the unified
    // value or default is used
    #[test]
    fn not_supported_mode_decision(
        legacy in legacy_strategy(),
        supplied in prop::option::of(0i64..4),
        default in 0i64..4,
    ) {
        let request = request(supplied, default).with_mode(CompatibilityMode::NotSupported);
        let result = resolver(&legacy).resolve(&request);

        if legacy.iter().any(Option::is_some) {
            prop_assert!(matches!(result, Err(Error::LegacyNotSupported { .. })), "expected Error::LegacyNotSupported, got {:?}", result);
        } else {
            prop_assert_eq!(result.unwrap(), Value::Integer(supplied.unwrap_or(default)));
        }
    }

    // A value set only under the unified key or only under one legacy key
    // resolves the same way
    #[test]
    fn unified_and_legacy_are_symmetric(value in any::<i64>(), slot in 0usize..LEGACY.len()) {
        let mut legacy = vec![None; LEGACY.len()];
        legacy[slot] = Some(value);

        let from_legacy = resolver(&legacy).resolve(&request(None, 0)).unwrap();
        let from_unified = resolver(&[]).resolve(&request(Some(value), 0)).unwrap();
        prop_assert_eq!(from_legacy, from_unified);
    }
}
