//! Property-based tests for the conversion and probing guarantees
//!
//! These complement the example-driven tests by checking the width rules,
//! numeric coercions and map hashing across a wide range of generated inputs.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_dynamic::{from_value, to_value, DynamicMap, DynamicValue, Kind};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_value(value) {
        Ok(dynamic) => match from_value::<T>(dynamic.clone()) {
            Ok(back) => *value == back,
            Err(e) => {
                eprintln!("from_value failed: {}", e);
                eprintln!("Dynamic value was: {}", dynamic);
                false
            }
        },
        Err(e) => {
            eprintln!("to_value failed: {}", e);
            false
        }
    }
}

fn narrowest_kind(n: i64) -> Kind {
    if n >= 0 {
        if u8::try_from(n).is_ok() {
            Kind::UInt8
        } else if u16::try_from(n).is_ok() {
            Kind::UInt16
        } else if u32::try_from(n).is_ok() {
            Kind::UInt32
        } else {
            Kind::UInt64
        }
    } else if i8::try_from(n).is_ok() {
        Kind::Int8
    } else if i16::try_from(n).is_ok() {
        Kind::Int16
    } else if i32::try_from(n).is_ok() {
        Kind::Int32
    } else {
        Kind::Int64
    }
}

fn hash_of(value: &DynamicValue) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i16(v in prop::collection::vec(any::<i16>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_string_map(m in prop::collection::hash_map("[a-z]{1,8}", any::<u32>(), 0..10)) {
        prop_assert!(roundtrip(&m));
    }

    // Integers decode at the narrowest width that holds them
    #[test]
    fn prop_integer_width(n in any::<i64>()) {
        let value: DynamicValue = serde_json::from_str(&n.to_string()).unwrap();
        prop_assert_eq!(value.kind(), narrowest_kind(n));
        prop_assert_eq!(value.as_i64(), Some(n));
    }

    #[test]
    fn prop_float_text_survives(x in -1.0e12f64..1.0e12f64) {
        let value: DynamicValue = serde_json::from_str(&serde_json::to_string(&x).unwrap()).unwrap();
        prop_assert!(value.is_number());
        let reparsed: f64 = value.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, x);
    }

    #[test]
    fn prop_coercion_matches_casts(n in any::<i64>()) {
        let value = DynamicValue::Int64(n);
        prop_assert_eq!(value.as_i8(), Some(n as i8));
        prop_assert_eq!(value.as_u16(), Some(n as u16));
        prop_assert_eq!(value.as_u64(), Some(n as u64));
        prop_assert_eq!(value.as_f32(), Some(n as f32));
        prop_assert_eq!(value.as_f64(), Some(n as f64));
    }

    #[test]
    fn prop_float_coercion_matches_casts(x in any::<f64>()) {
        let value = DynamicValue::Float64(x);
        prop_assert_eq!(value.as_i32(), Some(x as i32));
        prop_assert_eq!(value.as_u8(), Some(x as u8));
        prop_assert_eq!(value.as_isize(), Some(x as isize));
    }

    #[test]
    fn prop_mapping_order_is_irrelevant(m in prop::collection::hash_map("[a-z]{1,8}", any::<i32>(), 0..10)) {
        let forward: DynamicMap = m.iter().map(|(k, v)| (k.as_str(), DynamicValue::from(*v))).collect();
        let mut entries: Vec<_> = m.into_iter().collect();
        entries.reverse();
        let backward: DynamicMap = entries.into_iter().map(|(k, v)| (k, DynamicValue::from(v))).collect();

        let forward = DynamicValue::Mapping(forward);
        let backward = DynamicValue::Mapping(backward);
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(hash_of(&forward), hash_of(&backward));
    }

    #[test]
    fn prop_json_roundtrip_of_lists(v in prop::collection::vec(any::<i64>(), 0..20)) {
        let value: DynamicValue = serde_json::from_str(&serde_json::to_string(&v).unwrap()).unwrap();
        let encoded = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(serde_json::from_str::<Vec<i64>>(&encoded).unwrap(), v);
    }
}

#[test]
fn test_unit_has_no_dynamic_form() {
    assert!(to_value(&()).is_err());
    assert!(to_value(&None::<i32>).is_err());
    assert!(to_value(&vec![()]).is_err());
}
