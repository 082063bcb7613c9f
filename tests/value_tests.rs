use serde::de::value::{BytesDeserializer, Error as ValueError};
use serde::{Deserialize, Serialize};
use serde_dynamic::{dynamic, DynamicKey, DynamicMap, DynamicValue, Kind};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Extremes {
    bool: bool,
    string: String,
    double: f64,
    float: f32,
    integer: isize,
    integer8: i8,
    integer16: i16,
    integer32: i32,
    integer64: i64,
    unsigned_integer: usize,
    unsigned_integer8: u8,
    unsigned_integer16: u16,
    unsigned_integer32: u32,
    unsigned_integer64: u64,
    dictionary: HashMap<i64, String>,
    array: Vec<String>,
}

fn extremes() -> Extremes {
    Extremes {
        bool: true,
        string: "example".to_string(),
        double: 12345.6789,
        float: 12345.6789,
        integer: isize::MIN,
        integer8: i8::MIN,
        integer16: i16::MIN,
        integer32: i32::MIN,
        integer64: i64::MIN,
        unsigned_integer: usize::MAX,
        unsigned_integer8: u8::MAX,
        unsigned_integer16: u16::MAX,
        unsigned_integer32: u32::MAX,
        unsigned_integer64: u64::MAX,
        dictionary: HashMap::from([(12345, "example".to_string())]),
        array: vec!["example".to_string()],
    }
}

#[test]
fn test_decode_picks_narrowest_width() {
    let json = serde_json::to_string(&extremes()).unwrap();
    let decoded: HashMap<String, DynamicValue> = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded["bool"], DynamicValue::Bool(true));
    assert_eq!(decoded["string"], DynamicValue::from("example"));
    assert_eq!(decoded["double"], DynamicValue::Float64(12345.6789));
    assert_eq!(decoded["float"], DynamicValue::Float32(12345.6789));
    assert_eq!(decoded["integer"], DynamicValue::Int64(i64::MIN));
    assert_eq!(decoded["integer8"], DynamicValue::Int8(i8::MIN));
    assert_eq!(decoded["integer16"], DynamicValue::Int16(i16::MIN));
    assert_eq!(decoded["integer32"], DynamicValue::Int32(i32::MIN));
    assert_eq!(decoded["integer64"], DynamicValue::Int64(i64::MIN));
    assert_eq!(decoded["unsigned_integer"], DynamicValue::UInt64(u64::MAX));
    assert_eq!(decoded["unsigned_integer8"], DynamicValue::UInt8(u8::MAX));
    assert_eq!(decoded["unsigned_integer16"], DynamicValue::UInt16(u16::MAX));
    assert_eq!(decoded["unsigned_integer32"], DynamicValue::UInt32(u32::MAX));
    assert_eq!(decoded["unsigned_integer64"], DynamicValue::UInt64(u64::MAX));

    let child = decoded["dictionary"].as_mapping().unwrap();
    assert_eq!(child.len(), 1);
    assert_eq!(child.get("12345"), Some(&DynamicValue::from("example")));

    let list = decoded["array"].as_list().unwrap();
    assert_eq!(list, &vec![DynamicValue::from("example")]);
}

#[test]
fn test_encode_keeps_every_width() {
    let mut map = DynamicMap::new();
    map.insert("bool", DynamicValue::Bool(true));
    map.insert("string", DynamicValue::from("example"));
    map.insert("double", DynamicValue::Float64(12345.6789));
    map.insert("float", DynamicValue::Float32(12345.6789));
    map.insert("integer", DynamicValue::Int(isize::MIN));
    map.insert("integer8", DynamicValue::Int8(i8::MIN));
    map.insert("integer16", DynamicValue::Int16(i16::MIN));
    map.insert("integer32", DynamicValue::Int32(i32::MIN));
    map.insert("integer64", DynamicValue::Int64(i64::MIN));
    map.insert("unsigned_integer", DynamicValue::UInt(usize::MAX));
    map.insert("unsigned_integer8", DynamicValue::UInt8(u8::MAX));
    map.insert("unsigned_integer16", DynamicValue::UInt16(u16::MAX));
    map.insert("unsigned_integer32", DynamicValue::UInt32(u32::MAX));
    map.insert("unsigned_integer64", DynamicValue::UInt64(u64::MAX));
    map.insert("dictionary", dynamic!({ 12345: "example" }));
    map.insert("array", dynamic!(["example"]));

    let json = serde_json::to_string(&DynamicValue::Mapping(map)).unwrap();
    let decoded: Extremes = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, extremes());
}

#[test]
fn test_example_payload() {
    let json = r#"{ "key": 123, "nested": [1, "two", 0.3] }"#;
    let decoded: HashMap<String, DynamicValue> = serde_json::from_str(json).unwrap();

    assert_eq!(decoded["key"].as_isize(), Some(123));
    assert_eq!(decoded["key"].kind(), Kind::UInt8);
    assert_eq!(
        decoded["nested"],
        DynamicValue::List(vec![
            DynamicValue::UInt8(1),
            DynamicValue::from("two"),
            DynamicValue::Float32(0.3),
        ])
    );
}

#[test]
fn test_null_is_not_a_value() {
    assert!(serde_json::from_str::<DynamicValue>("null").is_err());
    assert!(serde_json::from_str::<DynamicValue>(r#"{"a": null}"#).is_err());
    assert!(serde_json::from_str::<Vec<DynamicValue>>("[1, null]").is_err());
}

#[test]
fn test_text_is_never_reinterpreted() {
    let decoded: Vec<DynamicValue> =
        serde_json::from_str(r#"["true", "12", "2025-01-01T12:34:56Z"]"#).unwrap();

    assert!(decoded.iter().all(DynamicValue::is_string));
}

#[test]
fn test_decode_bytes_from_binary_format() {
    let deserializer = BytesDeserializer::<ValueError>::new(&[0, 11, 22, 33, 44, 55]);
    let value = DynamicValue::deserialize(deserializer).unwrap();

    assert_eq!(value, DynamicValue::Bytes(vec![0, 11, 22, 33, 44, 55]));
    assert_eq!(value.to_string(), "<000b16212c37>");
}

#[test]
fn test_json_roundtrip_is_stable() {
    let json = r#"{"a":[1,-2,300,4.5,"x",true],"b":{"c":{}},"d":[]}"#;
    let value: DynamicValue = serde_json::from_str(json).unwrap();
    let encoded = serde_json::to_string(&value).unwrap();

    assert_eq!(encoded, json);
    assert_eq!(serde_json::from_str::<DynamicValue>(&encoded).unwrap(), value);
}

#[test]
fn test_wrap_native_values() {
    assert_eq!(DynamicValue::from_any(&true), Some(DynamicValue::Bool(true)));
    assert_eq!(
        DynamicValue::from_any(&"example".to_string()),
        Some(DynamicValue::from("example"))
    );
    assert_eq!(DynamicValue::from_any(&12345.6789f64), Some(DynamicValue::Float64(12345.6789)));
    assert_eq!(DynamicValue::from_any(&-12345isize), Some(DynamicValue::Int(-12345)));
    assert_eq!(DynamicValue::from_any(&12345u16), Some(DynamicValue::UInt16(12345)));
    assert_eq!(
        DynamicValue::from_any(&vec![0u8, 11, 22]),
        Some(DynamicValue::Bytes(vec![0, 11, 22]))
    );
    assert_eq!(
        DynamicValue::from_any(&HashMap::from([(
            DynamicKey::from(12345),
            DynamicValue::from("example")
        )])),
        Some(dynamic!({ 12345: "example" }))
    );
    assert_eq!(DynamicValue::from_any(&()), None);
    assert_eq!(DynamicValue::from_any(&'c'), None);
}

#[test]
fn test_typed_accessors_only_match_their_variant() {
    let values = [
        DynamicValue::Bool(true),
        DynamicValue::from("example"),
        DynamicValue::Float64(12345.6789),
        DynamicValue::Int8(-123),
        DynamicValue::Bytes(vec![0, 11]),
        dynamic!({ 12345: "example" }),
        dynamic!(["example"]),
    ];

    assert_eq!(values.iter().filter(|v| v.as_bool().is_some()).count(), 1);
    assert_eq!(values.iter().filter(|v| v.as_str().is_some()).count(), 1);
    assert_eq!(values.iter().filter(|v| v.as_bytes().is_some()).count(), 1);
    assert_eq!(values.iter().filter(|v| v.as_mapping().is_some()).count(), 1);
    assert_eq!(values.iter().filter(|v| v.as_list().is_some()).count(), 1);
    assert_eq!(values.iter().filter(|v| v.as_date().is_some()).count(), 0);
    assert_eq!(values.iter().filter(|v| v.as_f64().is_some()).count(), 2);
}

#[test]
fn test_numeric_coercion() {
    assert_eq!(DynamicValue::Float64(123.0).as_u8(), Some(123));
    assert_eq!(DynamicValue::Float32(123.0).as_i64(), Some(123));
    assert_eq!(DynamicValue::UInt8(123).as_f64(), Some(123.0));
    assert_eq!(DynamicValue::Int16(123).as_f32(), Some(123.0));
    assert_eq!(DynamicValue::Int8(-1).as_u8(), Some(255));
    assert_eq!(DynamicValue::Float64(-1.5).as_u32(), Some(0));
    assert_eq!(DynamicValue::Float64(f64::NAN).as_i32(), Some(0));
    assert_eq!(DynamicValue::Bool(true).as_i32(), None);
    assert_eq!(DynamicValue::from("1").as_i32(), None);
}

#[test]
fn test_equality_and_hashing() {
    use std::collections::HashSet;

    assert_ne!(DynamicValue::UInt8(1), DynamicValue::Int8(1));
    assert_eq!(DynamicValue::Float64(f64::NAN), DynamicValue::Float64(f64::NAN));
    assert_eq!(DynamicValue::Float64(0.0), DynamicValue::Float64(-0.0));

    let set: HashSet<DynamicValue> = [
        dynamic!({ "a": 1, "b": 2 }),
        dynamic!({ "b": 2, "a": 1 }),
        DynamicValue::Float32(-0.0),
        DynamicValue::Float32(0.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.len(), 2);
}

#[test]
fn test_display() {
    let value = dynamic!({ "a": [1u8, "two"], 3: true });
    assert_eq!(value.to_string(), r#"{"a": [1, "two"], 3: true}"#);
}
