//! Loosely-typed parameter values and the query-parameter normalizer.
//!
//! Raw request parameters arrive as a flat multimap: each key maps to an
//! ordered sequence of string values, of which only the first is used.
//! [`ParamMap::from_query_params`] reshapes that input into the (at most
//! two-level) nested mapping the binder consumes:
//!
//! - A key with exactly one `.` is split into outer and inner segments;
//!   both segments have their first character upper-cased and the pair is
//!   merged into `outer -> { inner -> value }`. An outer key seen more
//!   than once extends its inner map.
//! - A key with no `.` (or more than one) is kept whole and upper-cased in
//!   full. The two normalization strategies differ on purpose; existing
//!   clients depend on both.
//!
//! ```rust
//! use sift_query::params::{ParamMap, ParamValue};
//!
//! let params = ParamMap::from_query_params([
//!     ("age.gte", vec!["18".to_string()]),
//!     ("limit", vec!["10".to_string()]),
//! ]);
//!
//! let age = params.get("Age").and_then(ParamValue::as_map).unwrap();
//! assert_eq!(age.get("Gte").and_then(ParamValue::as_str), Some("18"));
//! assert_eq!(params.get("LIMIT").and_then(ParamValue::as_str), Some("10"));
//! ```

use indexmap::IndexMap;
use tracing::debug;

/// A single normalized parameter value: either a raw string or a nested
/// map of further parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A raw string value, coerced to the target type at bind time.
    Str(String),
    /// A nested parameter map, bound into a nested composite.
    Map(ParamMap),
}

impl ParamValue {
    /// Get the string value, if this is a raw string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Map(_) => None,
        }
    }

    /// Get the nested map, if this is a map.
    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            Self::Str(_) => None,
            Self::Map(m) => Some(m),
        }
    }

    /// Check whether this value is a nested map.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(m: ParamMap) -> Self {
        Self::Map(m)
    }
}

/// An insertion-ordered mapping from normalized key to parameter value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamMap(IndexMap<String, ParamValue>);

impl ParamMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under the given key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a value by exact key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Normalize a flat multi-value parameter mapping into a nested map.
    ///
    /// Only the first value of each key is used; keys with an empty value
    /// sequence are skipped.
    pub fn from_query_params<K, V, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (key, values) in params {
            let key = key.as_ref();
            let Some(first) = values.into_iter().next() else {
                continue;
            };
            let first: String = first.into();

            let segments: Vec<&str> = key.split('.').collect();
            if segments.len() == 2 {
                let outer = ucfirst(segments[0]);
                let inner = ucfirst(segments[1]);
                let slot = map
                    .0
                    .entry(outer)
                    .or_insert_with(|| ParamValue::Map(ParamMap::new()));
                if !slot.is_map() {
                    // A whole key landed here earlier; the dotted form wins.
                    debug!(key, "replacing scalar entry with nested map");
                    *slot = ParamValue::Map(ParamMap::new());
                }
                if let ParamValue::Map(inner_map) = slot {
                    inner_map.insert(inner, first);
                }
            } else {
                map.insert(key.to_uppercase(), first);
            }
        }
        map
    }

    /// Normalize a sequence of repeated `(key, value)` pairs, as produced
    /// by a URL query string. Repeated keys keep their first value.
    pub fn from_query_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in pairs {
            grouped.entry(key.into()).or_default().push(value.into());
        }
        Self::from_query_params(grouped)
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Upper-case the first character of a string, leaving the rest untouched.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
