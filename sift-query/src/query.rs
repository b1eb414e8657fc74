//! The query-builder handle.
//!
//! [`SelectQuery`] accumulates WHERE predicates, shaping directives, and
//! preload directives, and renders a parameterized SELECT statement for
//! an external database layer to execute. Builder methods consume and
//! return the handle so calls chain.
//!
//! ```rust
//! use sift_query::filter::Filter;
//! use sift_query::query::SelectQuery;
//!
//! let (sql, params) = SelectQuery::postgres("users")
//!     .r#where(Filter::Equals("email".into(), "a@b.c".into()))
//!     .order("created_at DESC")
//!     .limit(10)
//!     .build_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM users WHERE email = $1 ORDER BY created_at DESC LIMIT 10"
//! );
//! assert_eq!(params.len(), 1);
//! ```

use std::fmt::Write as _;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::filter::{Filter, FilterValue};
use crate::shaping::Preload;
use crate::sql::{quote_identifier, DatabaseType};

/// A chainable SELECT statement under construction.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    db_type: DatabaseType,
    filter: Filter,
    select: Option<Vec<String>>,
    orders: SmallVec<[String; 4]>,
    groups: SmallVec<[String; 4]>,
    havings: Vec<Filter>,
    limit: Option<u64>,
    preloads: IndexMap<String, Preload>,
}

impl SelectQuery {
    /// Create a query against `table` for the given dialect.
    pub fn new(table: impl Into<String>, db_type: DatabaseType) -> Self {
        Self {
            table: table.into(),
            db_type,
            filter: Filter::None,
            select: None,
            orders: SmallVec::new(),
            groups: SmallVec::new(),
            havings: Vec::new(),
            limit: None,
            preloads: IndexMap::new(),
        }
    }

    /// Create a PostgreSQL query.
    pub fn postgres(table: impl Into<String>) -> Self {
        Self::new(table, DatabaseType::PostgreSQL)
    }

    /// Create a MySQL query.
    pub fn mysql(table: impl Into<String>) -> Self {
        Self::new(table, DatabaseType::MySQL)
    }

    /// Create a SQLite query.
    pub fn sqlite(table: impl Into<String>) -> Self {
        Self::new(table, DatabaseType::SQLite)
    }

    /// AND a predicate onto the WHERE clause.
    pub fn r#where(mut self, filter: Filter) -> Self {
        self.filter = self.filter.and_then(filter);
        self
    }

    /// Replace the selected column list. `None` selects everything.
    pub fn select(mut self, columns: Vec<String>) -> Self {
        self.select = Some(columns);
        self
    }

    /// Append an ORDER BY expression.
    pub fn order(mut self, expr: impl Into<String>) -> Self {
        self.orders.push(expr.into());
        self
    }

    /// Append a GROUP BY expression.
    pub fn group(mut self, expr: impl Into<String>) -> Self {
        self.groups.push(expr.into());
        self
    }

    /// Append a HAVING fragment with `?` markers and its arguments.
    pub fn having(mut self, fragment: impl Into<String>, args: Vec<FilterValue>) -> Self {
        self.havings.push(Filter::Raw(fragment.into(), args));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Register a preload directive for an association.
    pub fn preload(mut self, association: impl Into<String>, directive: Preload) -> Self {
        self.preloads.insert(association.into(), directive);
        self
    }

    /// The target table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The placeholder dialect.
    pub fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    /// The accumulated WHERE predicate tree.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Registered preload directives, in insertion order. These do not
    /// render into the primary statement; the execution layer resolves
    /// them into follow-up queries.
    pub fn preloads(&self) -> &IndexMap<String, Preload> {
        &self.preloads
    }

    /// Render the statement and its bound parameters.
    pub fn build_sql(&self) -> (String, Vec<FilterValue>) {
        let mut sql = String::with_capacity(128);
        let mut params = Vec::new();

        sql.push_str("SELECT ");
        match &self.select {
            Some(columns) if !columns.is_empty() => sql.push_str(&columns.join(", ")),
            _ => sql.push('*'),
        }
        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(&self.table));

        if !self.filter.is_none() {
            let (fragment, mut filter_params) = self.filter.to_sql(self.db_type, 0);
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
            params.append(&mut filter_params);
        }

        if !self.groups.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.groups.join(", "));
        }

        if !self.havings.is_empty() {
            let having = Filter::and(self.havings.iter().cloned());
            let (fragment, mut having_params) = having.to_sql(self.db_type, params.len());
            sql.push_str(" HAVING ");
            sql.push_str(&fragment);
            params.append(&mut having_params);
        }

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.orders.join(", "));
        }

        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }

        debug!(table = %self.table, params = params.len(), "built select statement");
        (sql, params)
    }
}
