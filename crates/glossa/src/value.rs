//! Primitive substitution values and the variable maps built from them.
//!
//! Constants and caller-supplied variables share one representation so the
//! merge order (constants, then context, then caller) is a plain overlay.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive value usable in `{name}` substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Short name of the value's kind, used in schema diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Equality that compares floats by bit pattern, so `NaN` matches itself.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }

    /// Interpret the value as a plural count.
    ///
    /// Strings are parsed leniently (surrounding whitespace ignored); booleans
    /// are not counts.
    #[must_use]
    pub fn as_count(&self) -> Option<Count> {
        match self {
            Self::Integer(n) => Some(Count::Integer(*n)),
            Self::Float(f) => Some(Count::Float(*f)),
            Self::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Count::Integer)
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(Count::Float))
            }
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Integer(i64::from(n))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// A numeric count extracted from the `count` variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Count {
    Integer(i64),
    Float(f64),
}

/// An ordered name → value map.
///
/// Ordering is by key, which keeps iteration (and therefore diagnostics and
/// dangerous-key checks) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    entries: BTreeMap<String, Value>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Overlay `other` onto `self`; `other` wins on shared names.
    pub fn overlay(&mut self, other: &Variables) {
        for (name, value) in other.iter() {
            self.entries.insert(name.to_owned(), value.clone());
        }
    }

    /// The `count` variable as a number, if present and numeric.
    #[must_use]
    pub fn count(&self) -> Option<Count> {
        self.get("count").and_then(Value::as_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Variables {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_primitives() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-3i64).to_string(), "-3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(2.0).to_string(), "2");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn count_parsing() {
        assert_eq!(Value::from(3).as_count(), Some(Count::Integer(3)));
        assert_eq!(Value::from(" 7 ").as_count(), Some(Count::Integer(7)));
        assert_eq!(Value::from("2.5").as_count(), Some(Count::Float(2.5)));
        assert_eq!(Value::from("many").as_count(), None);
        assert_eq!(Value::from(true).as_count(), None);
    }

    #[test]
    fn overlay_prefers_right_side() {
        let mut base = Variables::from([("a", "1"), ("b", "2")]);
        base.overlay(&Variables::new().with("b", "override").with("c", 3));
        assert_eq!(base.get("a"), Some(&Value::from("1")));
        assert_eq!(base.get("b"), Some(&Value::from("override")));
        assert_eq!(base.get("c"), Some(&Value::Integer(3)));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn deserializes_flat_primitive_map() {
        let vars: Variables =
            serde_json::from_str(r#"{"Site": "Acme", "Year": 2024, "Ratio": 0.5, "Beta": false}"#)
                .expect("valid json");
        assert_eq!(vars.get("Site"), Some(&Value::from("Acme")));
        assert_eq!(vars.get("Year"), Some(&Value::Integer(2024)));
        assert_eq!(vars.get("Ratio"), Some(&Value::Float(0.5)));
        assert_eq!(vars.get("Beta"), Some(&Value::Bool(false)));
        let keys: Vec<_> = vars.keys().collect();
        assert_eq!(keys, vec!["Beta", "Ratio", "Site", "Year"]);
    }
}
