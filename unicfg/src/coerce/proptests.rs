//! Property-based tests for type coercion.

use std::time::Duration;

use super::{coerce, ByteSize, TargetType, Value};
use crate::key::PropertyKey;
use crate::source::{MapSource, PropertySource, RawValue};
use proptest::prelude::*;

// Strategy for list elements that need no quoting in any syntax
fn element_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9:/.-]{0,15}"
}

fn key() -> PropertyKey {
    PropertyKey::new("camunda.data.secondary-storage.elasticsearch.urls").unwrap()
}

fn coerce_list(raw: &RawValue) -> Value {
    coerce(&key(), raw, &TargetType::list_of(TargetType::String)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // All four collection syntaxes produce the same list
    #[test]
    fn collection_syntaxes_are_equivalent(items in prop::collection::vec(element_strategy(), 1..6)) {
        let comma = RawValue::Text(items.join(","));
        let quoted: Vec<String> = items.iter().map(|item| format!("\"{item}\"")).collect();
        let bracketed = RawValue::Text(format!("[{}]", quoted.join(", ")));
        let indexed = RawValue::Indexed(items.clone());

        let yaml_items: Vec<String> = items.iter().map(|item| format!("      - \"{item}\"")).collect();
        let yaml = format!(
            "camunda:\n  data:\n    secondary-storage.elasticsearch.urls:\n{}\n",
            yaml_items.join("\n")
        );
        let from_yaml = MapSource::from_yaml_str(&yaml).unwrap().raw_value(&key()).unwrap();

        let expected = Value::List(items.iter().cloned().map(Value::String).collect());
        prop_assert_eq!(coerce_list(&comma), expected.clone());
        prop_assert_eq!(coerce_list(&bracketed), expected.clone());
        prop_assert_eq!(coerce_list(&indexed), expected.clone());
        prop_assert_eq!(coerce_list(&from_yaml), expected);
    }

    // Set coercion ignores order and duplicates
    #[test]
    fn set_ignores_order(items in prop::collection::vec(element_strategy(), 0..8)) {
        let target = TargetType::set_of(TargetType::String);
        let mut reversed = items.clone();
        reversed.reverse();
        reversed.extend(items.iter().cloned());

        let forward = coerce(&key(), &RawValue::Text(items.join(",")), &target).unwrap();
        let backward = coerce(&key(), &RawValue::Indexed(reversed), &target).unwrap();
        prop_assert_eq!(forward, backward);
    }

    // Seconds, ISO-8601 seconds and bare milliseconds agree
    #[test]
    fn duration_notations_agree(secs in 0u64..1_000_000) {
        let human = coerce(&key(), &RawValue::Text(format!("{secs}s")), &TargetType::Duration).unwrap();
        let iso = coerce(&key(), &RawValue::Text(format!("PT{secs}S")), &TargetType::Duration).unwrap();
        let millis = coerce(&key(), &RawValue::Text((secs * 1000).to_string()), &TargetType::Duration).unwrap();

        prop_assert_eq!(&human, &Value::Duration(Duration::from_secs(secs)));
        prop_assert_eq!(&human, &iso);
        prop_assert_eq!(human, millis);
    }

    // KB is 1024 bytes
    #[test]
    fn kilobytes_are_binary(kb in 0u64..1_000_000_000) {
        let parsed = ByteSize::parse(&format!("{kb}KB")).unwrap();
        prop_assert_eq!(parsed.as_u64(), kb * 1024);
    }

    // Display output parses back to the same size
    #[test]
    fn byte_size_display_parses_back(bytes in any::<u32>()) {
        let size = ByteSize::from_bytes(u64::from(bytes));
        prop_assert_eq!(ByteSize::parse(&size.to_string()), Some(size));
    }

    // Any integer accepted as text coerces to itself
    #[test]
    fn integer_text_coerces_exactly(n in any::<i64>()) {
        let value = coerce(&key(), &RawValue::Text(n.to_string()), &TargetType::Integer).unwrap();
        prop_assert_eq!(value, Value::Integer(n));
    }
}
