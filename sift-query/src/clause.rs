//! Per-type clause builders.
//!
//! Each builder takes the query handle, a column name, and a populated
//! filter value object, and appends one independent WHERE predicate per
//! set operator. The handle ANDs the accumulated predicates; the builders
//! never choose AND/OR themselves.
//!
//! ```rust
//! use sift_query::clause::build_int_specification;
//! use sift_query::criteria::IntFilter;
//! use sift_query::query::SelectQuery;
//!
//! let filter = IntFilter { equals: Some(5), gte: Some(1), ..Default::default() };
//! let query = build_int_specification(SelectQuery::postgres("users"), "age", &filter);
//!
//! let (sql, params) = query.build_sql();
//! assert_eq!(sql, "SELECT * FROM users WHERE (age = $1 AND age >= $2)");
//! assert_eq!(params.len(), 2);
//! ```

use chrono::{DateTime, Local, NaiveDateTime};
use smallvec::SmallVec;
use tracing::trace;

use crate::bind::Coerce;
use crate::criteria::{BoolFilter, FloatFilter, IntFilter, StringFilter, TimeFilter};
use crate::filter::{Filter, FilterValue};
use crate::query::SelectQuery;

/// The one accepted time-literal format, interpreted in the local zone.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append integer predicates for every set operator of `filter`.
pub fn build_int_specification(
    query: SelectQuery,
    column: &str,
    filter: &IntFilter,
) -> SelectQuery {
    let mut clauses: SmallVec<[Filter; 4]> = SmallVec::new();
    if let Some(v) = filter.equals {
        clauses.push(Filter::Equals(column.to_string(), v.into()));
    }
    if let Some(v) = filter.not_equals {
        clauses.push(Filter::NotEquals(column.to_string(), v.into()));
    }
    if let Some(v) = filter.lt {
        clauses.push(Filter::Lt(column.to_string(), v.into()));
    }
    if let Some(v) = filter.lte {
        clauses.push(Filter::Lte(column.to_string(), v.into()));
    }
    if let Some(v) = filter.gt {
        clauses.push(Filter::Gt(column.to_string(), v.into()));
    }
    if let Some(v) = filter.gte {
        clauses.push(Filter::Gte(column.to_string(), v.into()));
    }
    if let Some(raw) = &filter.is_in {
        clauses.push(Filter::In(column.to_string(), parse_list::<i64>(raw)));
    }
    apply_clauses(query, column, clauses)
}

/// Append float predicates for every set operator of `filter`.
pub fn build_float_specification(
    query: SelectQuery,
    column: &str,
    filter: &FloatFilter,
) -> SelectQuery {
    let mut clauses: SmallVec<[Filter; 4]> = SmallVec::new();
    if let Some(v) = filter.equals {
        clauses.push(Filter::Equals(column.to_string(), v.into()));
    }
    if let Some(v) = filter.not_equals {
        clauses.push(Filter::NotEquals(column.to_string(), v.into()));
    }
    if let Some(v) = filter.lt {
        clauses.push(Filter::Lt(column.to_string(), v.into()));
    }
    if let Some(v) = filter.lte {
        clauses.push(Filter::Lte(column.to_string(), v.into()));
    }
    if let Some(v) = filter.gt {
        clauses.push(Filter::Gt(column.to_string(), v.into()));
    }
    if let Some(v) = filter.gte {
        clauses.push(Filter::Gte(column.to_string(), v.into()));
    }
    if let Some(raw) = &filter.is_in {
        clauses.push(Filter::In(column.to_string(), parse_list::<f64>(raw)));
    }
    apply_clauses(query, column, clauses)
}

/// Append string predicates for every set operator of `filter`.
pub fn build_string_specification(
    query: SelectQuery,
    column: &str,
    filter: &StringFilter,
) -> SelectQuery {
    let mut clauses: SmallVec<[Filter; 4]> = SmallVec::new();
    if let Some(v) = &filter.equals {
        clauses.push(Filter::Equals(column.to_string(), v.clone().into()));
    }
    if let Some(v) = &filter.not_equals {
        clauses.push(Filter::NotEquals(column.to_string(), v.clone().into()));
    }
    if let Some(v) = &filter.contains {
        clauses.push(Filter::Contains(column.to_string(), v.clone().into()));
    }
    if filter.regexp.is_some() {
        // Long-standing wire behavior: the regexp predicate binds the
        // contains value. Kept for compatibility with existing clients.
        clauses.push(Filter::Regexp(
            column.to_string(),
            filter.contains.clone().into(),
        ));
    }
    if let Some(raw) = &filter.is_in {
        let values = raw
            .split(',')
            .map(|element| FilterValue::String(element.to_string()))
            .collect();
        clauses.push(Filter::In(column.to_string(), values));
    }
    apply_clauses(query, column, clauses)
}

/// Append timestamp range predicates for every set operator of `filter`.
///
/// # Panics
///
/// Panics if any set field fails to parse as `YYYY-MM-DD HH:MM:SS` in the
/// local time zone, carrying the offending literal.
pub fn build_time_specification(
    query: SelectQuery,
    column: &str,
    filter: &TimeFilter,
) -> SelectQuery {
    let mut clauses: SmallVec<[Filter; 4]> = SmallVec::new();
    if let Some(raw) = &filter.lt {
        clauses.push(Filter::Lt(column.to_string(), parse_time(raw).into()));
    }
    if let Some(raw) = &filter.lte {
        clauses.push(Filter::Lte(column.to_string(), parse_time(raw).into()));
    }
    if let Some(raw) = &filter.gt {
        clauses.push(Filter::Gt(column.to_string(), parse_time(raw).into()));
    }
    if let Some(raw) = &filter.gte {
        clauses.push(Filter::Gte(column.to_string(), parse_time(raw).into()));
    }
    apply_clauses(query, column, clauses)
}

/// Append a boolean equality predicate if set. Booleans support no other
/// operator.
pub fn build_bool_specification(
    query: SelectQuery,
    column: &str,
    filter: &BoolFilter,
) -> SelectQuery {
    let mut clauses: SmallVec<[Filter; 4]> = SmallVec::new();
    if let Some(v) = filter.equals {
        clauses.push(Filter::Equals(column.to_string(), v.into()));
    }
    apply_clauses(query, column, clauses)
}

fn apply_clauses(
    mut query: SelectQuery,
    column: &str,
    clauses: SmallVec<[Filter; 4]>,
) -> SelectQuery {
    trace!(column, count = clauses.len(), "appending predicates");
    for clause in clauses {
        query = query.r#where(clause);
    }
    query
}

/// Split a comma-separated membership list, coercing each element.
/// Unparsable elements degrade to the type's default value.
fn parse_list<T: Coerce + Into<FilterValue>>(raw: &str) -> Vec<FilterValue> {
    raw.split(',').map(|element| T::coerce(element).into()).collect()
}

/// Parse a time literal in the fixed format, in the local zone.
///
/// # Panics
///
/// Panics if the literal does not match [`TIME_FORMAT`] or has no valid
/// local-zone interpretation.
pub fn parse_time(raw: &str) -> DateTime<Local> {
    let parsed = NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .unwrap_or_else(|_| panic!("unparsable time literal: {raw}"));
    parsed
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| panic!("unparsable time literal: {raw}"))
}
