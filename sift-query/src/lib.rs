//! # sift-query
//!
//! Translate loosely-typed filter criteria into SQL WHERE predicates and
//! query shaping.
//!
//! Request parameters arrive as a flat string multimap; `sift-query`
//! normalizes them, binds them into a typed criteria composite, and turns
//! the populated filters into parameterized predicates on a chainable
//! query handle. The caller hands the final `(sql, params)` pair to its
//! database layer.
//!
//! ```rust
//! use sift_query::criteria;
//! use sift_query::prelude::*;
//!
//! criteria! {
//!     pub struct UserCriteria {
//!         "Name" => name: StringFilter,
//!         "Age" => age: IntFilter,
//!     }
//! }
//!
//! // e.g. from `?name.contains=al&age.gte=18`
//! let mut criteria = UserCriteria::default();
//! bind_query_params(&mut criteria, [
//!     ("name.contains", vec!["al".to_string()]),
//!     ("age.gte", vec!["18".to_string()]),
//! ]).unwrap();
//!
//! let query = SelectQuery::postgres("users");
//! let query = build_string_specification(query, "name", &criteria.name);
//! let query = build_int_specification(query, "age", &criteria.age);
//!
//! let (sql, params) = query.build_sql();
//! assert_eq!(sql, "SELECT * FROM users WHERE (name LIKE $1 AND age >= $2)");
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`params`] - parameter model and query-key normalizer
//! - [`bind`] - coercion and generic binding into criteria composites
//! - [`criteria`] - the built-in filter value objects
//! - [`clause`] - per-type clause builders
//! - [`filter`] - predicate tree and bound values
//! - [`shaping`] - preloads, ordering, grouping, having, limits
//! - [`query`] - the chainable select handle
//! - [`sql`] - dialect placeholders and identifier quoting
//! - [`logging`] - opt-in `tracing` subscriber setup

#[macro_use]
pub mod macros;

pub mod bind;
pub mod clause;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod logging;
pub mod params;
pub mod query;
pub mod shaping;
pub mod sql;

pub use bind::{bind_params, bind_query_params, BindTarget, Coerce};
pub use clause::{
    build_bool_specification, build_float_specification, build_int_specification,
    build_string_specification, build_time_specification,
};
pub use criteria::{BoolFilter, FloatFilter, IntFilter, StringFilter, TimeFilter};
pub use error::{BindError, BindResult};
pub use filter::{Filter, FilterValue};
pub use params::{ParamMap, ParamValue};
pub use query::SelectQuery;
pub use shaping::{Preload, PreloadScope, QueryShape};
pub use sql::DatabaseType;

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use crate::bind::{bind_params, bind_query_params, BindTarget, Coerce};
    pub use crate::clause::{
        build_bool_specification, build_float_specification, build_int_specification,
        build_string_specification, build_time_specification,
    };
    pub use crate::criteria::{BoolFilter, FloatFilter, IntFilter, StringFilter, TimeFilter};
    pub use crate::error::{BindError, BindResult};
    pub use crate::filter::{Filter, FilterValue};
    pub use crate::params::{ParamMap, ParamValue};
    pub use crate::query::SelectQuery;
    pub use crate::shaping::{Preload, QueryShape};
    pub use crate::sql::DatabaseType;
}
