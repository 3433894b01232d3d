//! Dynamic values and the input dictionary.
//!
//! The dictionary is what a scripting caller hands over (`{"verbose": true}`).
//! Values stay untyped until an operator asks for a concrete type; the
//! conversions below are the only place where "what did the caller pass"
//! is checked.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single named-parameter value.
///
/// Deserializes from plain JSON: `true`, `42`, `0.5`, `"epick"`,
/// `[[0,0,0],[1,0,0]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Points(Vec<[f64; 3]>),
}

impl ParamValue {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Points(_) => "points",
        }
    }

    /// `Bool`, or `Int` 0/1 (script bindings commonly pass flags as ints).
    pub fn as_bool(&self, key: &str) -> Result<bool, ParamError> {
        match *self {
            Self::Bool(b) => Ok(b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            _ => Err(ParamError::mismatch(key, "bool", self.kind())),
        }
    }

    pub fn as_i64(&self, key: &str) -> Result<i64, ParamError> {
        match *self {
            Self::Int(i) => Ok(i),
            _ => Err(ParamError::mismatch(key, "int", self.kind())),
        }
    }

    /// `Float`, or `Int` widened.
    pub fn as_f64(&self, key: &str) -> Result<f64, ParamError> {
        match *self {
            Self::Float(x) => Ok(x),
            Self::Int(i) => Ok(i as f64),
            _ => Err(ParamError::mismatch(key, "float", self.kind())),
        }
    }

    pub fn as_str(&self, key: &str) -> Result<&str, ParamError> {
        match self {
            Self::Text(s) => Ok(s),
            _ => Err(ParamError::mismatch(key, "text", self.kind())),
        }
    }

    pub fn as_points(&self, key: &str) -> Result<&[[f64; 3]], ParamError> {
        match self {
            Self::Points(p) => Ok(p),
            _ => Err(ParamError::mismatch(key, "points", self.kind())),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<[f64; 3]>> for ParamValue {
    fn from(p: Vec<[f64; 3]>) -> Self {
        Self::Points(p)
    }
}

/// Input dictionary: string key → value, unique keys, no meaningful order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamDict {
    entries: HashMap<String, ParamValue>,
}

impl ParamDict {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object such as `{"verbose": true, "tolerance": 1e-4}`.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Insert or replace; returns the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder form of [`ParamDict::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ParamDict
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_values_pick_the_narrowest_variant() {
        let dict = ParamDict::from_json_str(
            r#"{"verbose": true, "vertex_point_map": 42, "tolerance": 0.5,
                "geom_traits": "epick", "points": [[0, 0, 0], [1.5, 0, 2]]}"#,
        )
        .unwrap();
        assert_eq!(dict.get("verbose"), Some(&ParamValue::Bool(true)));
        assert_eq!(dict.get("vertex_point_map"), Some(&ParamValue::Int(42)));
        assert_eq!(dict.get("tolerance"), Some(&ParamValue::Float(0.5)));
        assert_eq!(dict.get("geom_traits"), Some(&ParamValue::Text("epick".into())));
        assert_eq!(
            dict.get("points"),
            Some(&ParamValue::Points(vec![[0.0, 0.0, 0.0], [1.5, 0.0, 2.0]]))
        );
    }

    #[test]
    fn int_flags_convert_to_bool() {
        assert_eq!(ParamValue::Int(1).as_bool("verbose"), Ok(true));
        assert_eq!(ParamValue::Int(0).as_bool("verbose"), Ok(false));
        let err = ParamValue::Int(2).as_bool("verbose").unwrap_err();
        assert!(matches!(err, ParamError::TypeMismatch { found: "int", .. }));
    }

    #[test]
    fn int_widens_to_float_but_not_back() {
        assert_eq!(ParamValue::Int(3).as_f64("tolerance"), Ok(3.0));
        assert!(ParamValue::Float(3.0).as_i64("max_iterations").is_err());
    }

    #[test]
    fn borrowed_accessors_check_the_variant() {
        let name = ParamValue::from("epick");
        assert_eq!(name.as_str("geom_traits"), Ok("epick"));
        let points = ParamValue::from(vec![[0.0, 1.0, 2.0]]);
        assert_eq!(points.as_points("vertex_point_map"), Ok(&[[0.0, 1.0, 2.0]][..]));
        assert!(matches!(
            points.as_str("geom_traits"),
            Err(ParamError::TypeMismatch { expected: "text", found: "points", .. })
        ));
        assert!(matches!(
            ParamValue::Int(4).as_points("vertex_point_map"),
            Err(ParamError::TypeMismatch { expected: "points", found: "int", .. })
        ));
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut dict = ParamDict::new().with("verbose", true);
        let prev = dict.insert("verbose", false);
        assert_eq!(prev, Some(ParamValue::Bool(true)));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(ParamDict::from_json_str("[1, 2]").is_err());
    }
}
