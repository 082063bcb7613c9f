/// Builds a [`DynamicValue`](crate::DynamicValue) from literal syntax.
///
/// Brackets build a list, braces build a mapping with literal keys, and any
/// other expression goes through the matching `From` impl, so `42` becomes
/// `Int32` and `42u8` becomes `UInt8`.
///
/// ```rust
/// use serde_dynamic::{dynamic, DynamicValue};
///
/// let value = dynamic!({
///     "name": "Alice",
///     "scores": [1u8, 2u8],
///     7: true
/// });
///
/// let map = value.as_mapping().unwrap();
/// assert_eq!(map.get("name"), Some(&DynamicValue::from("Alice")));
/// assert_eq!(map.get(7), Some(&DynamicValue::Bool(true)));
/// ```
#[macro_export]
macro_rules! dynamic {
    ([]) => {
        $crate::DynamicValue::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::DynamicValue::List(vec![$($crate::dynamic!($elem)),*])
    };

    ({}) => {
        $crate::DynamicValue::Mapping($crate::DynamicMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::DynamicMap::new();
        $(
            mapping.insert($crate::DynamicKey::from($key), $crate::dynamic!($value));
        )*
        $crate::DynamicValue::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::DynamicValue::from($other)
    };
}
