//! The built-in filter value objects.
//!
//! One struct per primitive type, each field an optional operator value.
//! `None` means "no constraint for this operator"; several operators may
//! be set at once and each contributes an independent ANDed predicate.
//!
//! The structs are plain data: populate them by hand, through serde, or
//! by binding normalized request parameters. Membership (`is_in`) fields
//! hold the raw comma-separated string and are split at clause-build
//! time.
//!
//! ```rust
//! use sift_query::criteria::IntFilter;
//! use sift_query::bind::bind_params;
//! use sift_query::params::ParamMap;
//!
//! let mut params = ParamMap::new();
//! params.insert("Gte", "18");
//!
//! let mut filter = IntFilter::default();
//! bind_params(&mut filter, &params).unwrap();
//! assert_eq!(filter.gte, Some(18));
//! ```

use serde::{Deserialize, Serialize};

/// Comparison operators for string columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StringFilter {
    /// Database-native regular expression match.
    pub regexp: Option<String>,
    /// Substring match.
    pub contains: Option<String>,
    /// Exact equality.
    pub equals: Option<String>,
    /// Exact inequality.
    pub not_equals: Option<String>,
    /// Comma-separated membership list.
    #[serde(rename = "In")]
    pub is_in: Option<String>,
}

bind_composite!(StringFilter {
    "Regexp" => regexp,
    "Contains" => contains,
    "Equals" => equals,
    "NotEquals" => not_equals,
    "In" => is_in,
});

/// Comparison operators for integer columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IntFilter {
    /// Exact equality.
    pub equals: Option<i64>,
    /// Exact inequality.
    pub not_equals: Option<i64>,
    /// Less than or equal.
    pub lte: Option<i64>,
    /// Strictly less than.
    pub lt: Option<i64>,
    /// Strictly greater than.
    pub gt: Option<i64>,
    /// Greater than or equal.
    pub gte: Option<i64>,
    /// Comma-separated membership list; elements parsed base-10,
    /// unparsable elements default to zero.
    #[serde(rename = "In")]
    pub is_in: Option<String>,
}

bind_composite!(IntFilter {
    "Equals" => equals,
    "NotEquals" => not_equals,
    "Lte" => lte,
    "Lt" => lt,
    "Gt" => gt,
    "Gte" => gte,
    "In" => is_in,
});

/// Comparison operators for float columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FloatFilter {
    /// Exact equality.
    pub equals: Option<f64>,
    /// Exact inequality.
    pub not_equals: Option<f64>,
    /// Less than or equal.
    pub lte: Option<f64>,
    /// Strictly less than.
    pub lt: Option<f64>,
    /// Strictly greater than.
    pub gt: Option<f64>,
    /// Greater than or equal.
    pub gte: Option<f64>,
    /// Comma-separated membership list; elements parsed as decimals,
    /// unparsable elements default to zero.
    #[serde(rename = "In")]
    pub is_in: Option<String>,
}

bind_composite!(FloatFilter {
    "Equals" => equals,
    "NotEquals" => not_equals,
    "Lte" => lte,
    "Lt" => lt,
    "Gt" => gt,
    "Gte" => gte,
    "In" => is_in,
});

/// Range operators for timestamp columns.
///
/// Fields hold the raw literal; parsing happens at clause-build time
/// against the fixed `YYYY-MM-DD HH:MM:SS` format in the local zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TimeFilter {
    /// Less than or equal.
    pub lte: Option<String>,
    /// Strictly less than.
    pub lt: Option<String>,
    /// Strictly greater than.
    pub gt: Option<String>,
    /// Greater than or equal.
    pub gte: Option<String>,
}

bind_composite!(TimeFilter {
    "Lte" => lte,
    "Lt" => lt,
    "Gt" => gt,
    "Gte" => gte,
});

/// Equality operator for boolean columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BoolFilter {
    /// Exact equality.
    pub equals: Option<bool>,
}

bind_composite!(BoolFilter {
    "Equals" => equals,
});
