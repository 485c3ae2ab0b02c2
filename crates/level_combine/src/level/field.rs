//! Typed access to numeric object attributes.
//!
//! Object attributes are free-form JSON values. The engine only manipulates a
//! handful of them numerically, and a lookup can fail in two ways that are
//! treated identically: the key is missing, or the value does not parse as an
//! integer. Both produce [`Field::Absent`]; neither is an error.
use serde_json::Value;

use crate::level::object::Attributes;

/// An attribute lookup that is either present and numeric, or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Present(T),
    Absent,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Apply `f` to a present value. Absent stays absent.
    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> Field<R> {
        match self {
            Field::Present(v) => Field::Present(f(v)),
            Field::Absent => Field::Absent,
        }
    }

    /// Combine two fields; present only if both are.
    pub fn zip<U>(self, other: Field<U>) -> Field<(T, U)> {
        match (self, other) {
            (Field::Present(a), Field::Present(b)) => Field::Present((a, b)),
            _ => Field::Absent,
        }
    }

    pub fn get_or(self, default: T) -> T {
        match self {
            Field::Present(v) => v,
            Field::Absent => default,
        }
    }

    pub fn get_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Field::Present(v) => v,
            Field::Absent => default(),
        }
    }

    pub fn if_present(self, f: impl FnOnce(T)) {
        if let Field::Present(v) = self {
            f(v);
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }
}

/// Interpret a JSON value as an integer.
///
/// Integers pass through, floats truncate toward zero, and strings are parsed
/// after trimming surrounding whitespace. Everything else (booleans, null,
/// arrays, maps, unparsable strings, floats outside the `i64` range) is absent.
pub fn parse_integer(value: &Value) -> Field<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Field::Present(i)
            } else {
                match n.as_f64().map(f64::trunc) {
                    // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
                    Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Field::Present(f as i64)
                    }
                    _ => Field::Absent,
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok().into(),
        _ => Field::Absent,
    }
}

/// Look up `name` in `attrs` and parse it as an integer.
pub fn get(attrs: &Attributes, name: &str) -> Field<i64> {
    attrs.get(name).map_or(Field::Absent, parse_integer)
}

/// Write a present value to `name`, overwriting whatever was there. Writing
/// [`Field::Absent`] leaves `attrs` untouched.
pub fn set(attrs: &mut Attributes, name: &str, value: Field<i64>) {
    if let Field::Present(v) = value {
        attrs.insert(name.to_owned(), Value::from(v));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn absent_propagates_through_map() {
        let f: Field<i64> = Field::Absent;
        assert_eq!(f.map(|v| v + 1), Field::Absent);
        assert_eq!(Field::Present(2).map(|v| v * 10), Field::Present(20));
    }

    #[test]
    fn get_or_falls_back_only_when_absent() {
        assert_eq!(Field::Present(3).get_or(7), 3);
        assert_eq!(Field::<i64>::Absent.get_or(7), 7);
        assert_eq!(Field::<i64>::Absent.get_or_else(|| 9), 9);
    }

    #[test]
    fn zip_requires_both_sides() {
        assert_eq!(Field::Present(1).zip(Field::Present(2)), Field::Present((1, 2)));
        assert_eq!(Field::Present(1).zip(Field::<i64>::Absent), Field::Absent);
        assert_eq!(Field::<i64>::Absent.zip(Field::Present(2)), Field::Absent);
    }

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let a = attrs(json!({
            "x": 12,
            "y": "-4",
            "w": 3.9,
            "h": -2.5,
            "pad": " 8 ",
        }));
        assert_eq!(get(&a, "x"), Field::Present(12));
        assert_eq!(get(&a, "y"), Field::Present(-4));
        assert_eq!(get(&a, "w"), Field::Present(3));
        assert_eq!(get(&a, "h"), Field::Present(-2));
        assert_eq!(get(&a, "pad"), Field::Present(8));
    }

    #[test]
    fn malformed_values_degrade_to_absent() {
        let a = attrs(json!({
            "text": "left",
            "frac": "1.5",
            "flag": true,
            "list": [1, 2],
            "nothing": null,
        }));
        for name in ["text", "frac", "flag", "list", "nothing", "missing"] {
            assert_eq!(get(&a, name), Field::Absent, "{name} should be absent");
        }
    }

    #[test]
    fn out_of_range_floats_are_absent() {
        let a = attrs(json!({ "big": 1e300, "small": -1e19, "edge": -9.2e18 }));
        assert_eq!(get(&a, "big"), Field::Absent);
        assert_eq!(get(&a, "small"), Field::Absent);
        assert!(get(&a, "edge").is_present());
        assert!(!get(&a, "big").is_present());
    }

    #[test]
    fn if_present_runs_only_for_present_values() {
        let mut seen = Vec::new();
        Field::Present(5).if_present(|v| seen.push(v));
        Field::<i64>::Absent.if_present(|v| seen.push(v));
        assert_eq!(seen, vec![5]);
    }

    #[test]
    fn setting_absent_is_a_no_op() {
        let mut a = attrs(json!({ "x": "keep" }));
        set(&mut a, "x", Field::Absent);
        set(&mut a, "y", Field::Absent);
        assert_eq!(a.get("x"), Some(&json!("keep")));
        assert!(!a.contains_key("y"));
    }

    #[test]
    fn setting_present_overwrites_in_place() {
        let mut a = attrs(json!({ "x": 1, "y": 2, "groups": [] }));
        set(&mut a, "x", Field::Present(40));
        assert_eq!(a.get("x"), Some(&json!(40)));
        let keys: Vec<_> = a.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y", "groups"]);
    }
}
