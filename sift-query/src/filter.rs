//! Filter predicates and bound-parameter values.
//!
//! A [`Filter`] is a tree of WHERE predicates; [`FilterValue`] is the
//! value bound to a placeholder. Predicates produced from one criteria
//! object are independent and combine with logical AND.
//!
//! ```rust
//! use sift_query::filter::{Filter, FilterValue};
//! use sift_query::sql::DatabaseType;
//!
//! let filter = Filter::Equals("email".into(), "a@b.c".into())
//!     .and_then(Filter::Gte("age".into(), FilterValue::Int(18)));
//!
//! let (sql, params) = filter.to_sql(DatabaseType::PostgreSQL, 0);
//! assert_eq!(sql, "(email = $1 AND age >= $2)");
//! assert_eq!(params.len(), 2);
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::sql::DatabaseType;

/// Operator-to-SQL-fragment table. Fixed at compile time; predicates are
/// rendered from these constants only.
pub mod ops {
    /// Equality comparison.
    pub const EQUALS: &str = "=";
    /// Inequality comparison.
    pub const NOT_EQUALS: &str = "<>";
    /// Strictly less than.
    pub const LT: &str = "<";
    /// Less than or equal.
    pub const LTE: &str = "<=";
    /// Strictly greater than.
    pub const GT: &str = ">";
    /// Greater than or equal.
    pub const GTE: &str = ">=";
    /// Substring match; the bound value is wrapped in `%` wildcards.
    pub const CONTAINS: &str = "LIKE";
    /// Database-native regular expression match.
    pub const REGEXP: &str = "REGEXP";
    /// Membership in a value list.
    pub const IN: &str = "IN";
}

/// A value bound to a SQL parameter placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Timestamp in the local time zone.
    Timestamp(DateTime<Local>),
    /// String value.
    String(String),
    /// List of values (IN clauses).
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<DateTime<Local>> for FilterValue {
    fn from(v: DateTime<Local>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// A WHERE predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// No filter (always true).
    None,

    /// Equality comparison.
    Equals(String, FilterValue),
    /// Inequality comparison.
    NotEquals(String, FilterValue),

    /// Less than comparison.
    Lt(String, FilterValue),
    /// Less than or equal comparison.
    Lte(String, FilterValue),
    /// Greater than comparison.
    Gt(String, FilterValue),
    /// Greater than or equal comparison.
    Gte(String, FilterValue),

    /// Membership in a list of values.
    In(String, Vec<FilterValue>),

    /// Substring match (`LIKE %value%`).
    Contains(String, FilterValue),
    /// Database-native regular expression match.
    Regexp(String, FilterValue),

    /// A raw SQL fragment with `?` markers and its positional arguments.
    Raw(String, Vec<FilterValue>),

    /// Logical AND of multiple predicates.
    And(Vec<Filter>),
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn none() -> Self {
        Self::None
    }

    /// Check if this filter is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// AND a collection of filters, dropping empty ones.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        let filters: Vec<_> = filters.into_iter().filter(|f| !f.is_none()).collect();
        match filters.len() {
            0 => Self::None,
            1 => filters.into_iter().next().unwrap(),
            _ => Self::And(filters),
        }
    }

    /// Combine with another filter using AND.
    pub fn and_then(self, other: Filter) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Render SQL for this filter with dialect placeholders.
    ///
    /// `param_offset` is the number of placeholders already emitted by the
    /// surrounding statement. Returns the fragment and the values to bind.
    pub fn to_sql(&self, db_type: DatabaseType, param_offset: usize) -> (String, Vec<FilterValue>) {
        let mut params = Vec::new();
        let mut sql = String::with_capacity(64);
        let mut next = param_offset + 1;
        self.write_sql(db_type, &mut next, &mut params, &mut sql);
        (sql, params)
    }

    fn write_sql(
        &self,
        db_type: DatabaseType,
        next: &mut usize,
        params: &mut Vec<FilterValue>,
        out: &mut String,
    ) {
        match self {
            Self::None => out.push_str("TRUE"),

            Self::Equals(col, val) => {
                if val.is_null() {
                    out.push_str(col);
                    out.push_str(" IS NULL");
                } else {
                    write_comparison(db_type, col, ops::EQUALS, val, next, params, out);
                }
            }
            Self::NotEquals(col, val) => {
                if val.is_null() {
                    out.push_str(col);
                    out.push_str(" IS NOT NULL");
                } else {
                    write_comparison(db_type, col, ops::NOT_EQUALS, val, next, params, out);
                }
            }

            Self::Lt(col, val) => write_comparison(db_type, col, ops::LT, val, next, params, out),
            Self::Lte(col, val) => write_comparison(db_type, col, ops::LTE, val, next, params, out),
            Self::Gt(col, val) => write_comparison(db_type, col, ops::GT, val, next, params, out),
            Self::Gte(col, val) => write_comparison(db_type, col, ops::GTE, val, next, params, out),

            Self::In(col, values) => {
                if values.is_empty() {
                    out.push_str("FALSE");
                    return;
                }
                out.push_str(col);
                out.push(' ');
                out.push_str(ops::IN);
                out.push_str(" (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&push_param(db_type, next, params, value.clone()));
                }
                out.push(')');
            }

            Self::Contains(col, val) => {
                let wrapped = match val {
                    FilterValue::String(s) => FilterValue::String(format!("%{s}%")),
                    other => other.clone(),
                };
                out.push_str(col);
                out.push(' ');
                out.push_str(ops::CONTAINS);
                out.push(' ');
                out.push_str(&push_param(db_type, next, params, wrapped));
            }

            Self::Regexp(col, val) => {
                out.push_str(col);
                out.push(' ');
                out.push_str(ops::REGEXP);
                out.push(' ');
                out.push_str(&push_param(db_type, next, params, val.clone()));
            }

            Self::Raw(fragment, args) => {
                let mut arg_iter = args.iter();
                for ch in fragment.chars() {
                    if ch == '?' {
                        let value = arg_iter.next().cloned().unwrap_or(FilterValue::Null);
                        out.push_str(&push_param(db_type, next, params, value));
                    } else {
                        out.push(ch);
                    }
                }
            }

            Self::And(filters) => {
                if filters.is_empty() {
                    out.push_str("TRUE");
                    return;
                }
                out.push('(');
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" AND ");
                    }
                    filter.write_sql(db_type, next, params, out);
                }
                out.push(')');
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::None
    }
}

fn write_comparison(
    db_type: DatabaseType,
    col: &str,
    op: &str,
    val: &FilterValue,
    next: &mut usize,
    params: &mut Vec<FilterValue>,
    out: &mut String,
) {
    out.push_str(col);
    out.push(' ');
    out.push_str(op);
    out.push(' ');
    out.push_str(&push_param(db_type, next, params, val.clone()));
}

fn push_param(
    db_type: DatabaseType,
    next: &mut usize,
    params: &mut Vec<FilterValue>,
    value: FilterValue,
) -> String {
    params.push(value);
    let placeholder = db_type.placeholder(*next);
    *next += 1;
    placeholder
}
