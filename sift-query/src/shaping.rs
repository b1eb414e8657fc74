//! Non-predicate query shaping: preloads, column selection, ordering,
//! grouping, having, and row limits.
//!
//! [`QueryShape`] is a one-shot descriptor assembled by the caller and
//! applied to a [`SelectQuery`] in a fixed category order. [`Preload`]
//! is the eager-load directive, with three explicit shapes resolved by
//! pattern match.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::filter::FilterValue;
use crate::query::SelectQuery;

/// A scope closure applied to an association's query before it runs.
pub type PreloadScope = Arc<dyn Fn(SelectQuery) -> SelectQuery + Send + Sync>;

/// An eager-load directive for one association.
#[derive(Clone)]
pub enum Preload {
    /// Load the association in full.
    All,
    /// Load with extra positional arguments forwarded to the execution
    /// layer.
    Args(Vec<FilterValue>),
    /// Load through a scope closure that reshapes the association query.
    Scoped(PreloadScope),
}

impl Preload {
    /// Create a scoped directive from a closure.
    pub fn scoped<F>(scope: F) -> Self
    where
        F: Fn(SelectQuery) -> SelectQuery + Send + Sync + 'static,
    {
        Self::Scoped(Arc::new(scope))
    }

    /// Apply this directive's scope to an association query. `All` and
    /// `Args` leave the query untouched.
    pub fn apply_scope(&self, query: SelectQuery) -> SelectQuery {
        match self {
            Self::All | Self::Args(_) => query,
            Self::Scoped(scope) => scope(query),
        }
    }
}

impl fmt::Debug for Preload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "Preload::All"),
            Self::Args(args) => f.debug_tuple("Preload::Args").field(args).finish(),
            Self::Scoped(_) => write!(f, "Preload::Scoped(..)"),
        }
    }
}

/// A one-shot query shaping descriptor.
///
/// Every category is optional; empty categories are no-ops. Consumed by
/// [`QueryShape::apply`].
#[derive(Debug, Clone, Default)]
pub struct QueryShape {
    selects: Option<Vec<String>>,
    preloads: IndexMap<String, Preload>,
    orders: Vec<String>,
    groups: Vec<String>,
    havings: IndexMap<String, Vec<FilterValue>>,
    limit: Option<u64>,
}

impl QueryShape {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selected column list.
    pub fn selects(mut self, columns: Vec<String>) -> Self {
        self.selects = Some(columns);
        self
    }

    /// Register a preload directive for an association.
    pub fn preload(mut self, association: impl Into<String>, directive: Preload) -> Self {
        self.preloads.insert(association.into(), directive);
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

    /// Register a HAVING fragment with its arguments.
    pub fn having(mut self, fragment: impl Into<String>, args: Vec<FilterValue>) -> Self {
        self.havings.insert(fragment.into(), args);
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply every set category to the query, in fixed order: preloads,
    /// selected columns, order expressions, limit, groups, having
    /// fragments.
    pub fn apply(self, mut query: SelectQuery) -> SelectQuery {
        for (association, directive) in self.preloads {
            query = query.preload(association, directive);
        }
        if let Some(columns) = self.selects {
            query = query.select(columns);
        }
        for expr in self.orders {
            query = query.order(expr);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        for expr in self.groups {
            query = query.group(expr);
        }
        for (fragment, args) in self.havings {
            query = query.having(fragment, args);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::filter::Filter;

    #[test]
    fn test_empty_shape_is_noop() {
        let (sql, params) = QueryShape::new()
            .apply(SelectQuery::postgres("users"))
            .build_sql();
        assert_eq!(sql, "SELECT * FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_apply_full_shape() {
        let shaped = QueryShape::new()
            .selects(vec!["day".to_string(), "count(id)".to_string()])
            .order("day ASC")
            .group("day")
            .having("count(id) > ?", vec![FilterValue::Int(3)])
            .limit(7)
            .apply(SelectQuery::postgres("events"));

        let (sql, params) = shaped.build_sql();
        assert_eq!(
            sql,
            "SELECT day, count(id) FROM events GROUP BY day \
             HAVING count(id) > $1 ORDER BY day ASC LIMIT 7"
        );
        assert_eq!(params, vec![FilterValue::Int(3)]);
    }

    #[test]
    fn test_preload_directives_carry_through() {
        let shaped = QueryShape::new()
            .preload("Orders", Preload::All)
            .preload("Tags", Preload::Args(vec![FilterValue::Int(1)]))
            .apply(SelectQuery::postgres("users"));

        assert_eq!(shaped.preloads().len(), 2);
        assert!(matches!(shaped.preloads()["Orders"], Preload::All));
    }

    #[test]
    fn test_scoped_preload_reshapes_association_query() {
        let directive = Preload::scoped(|q| {
            q.r#where(Filter::Equals("active".into(), FilterValue::Bool(true)))
        });

        let scoped = directive.apply_scope(SelectQuery::postgres("orders"));
        let (sql, _) = scoped.build_sql();
        assert_eq!(sql, "SELECT * FROM orders WHERE active = $1");
    }

    #[test]
    fn test_all_and_args_scopes_are_identity() {
        let query = SelectQuery::postgres("orders");
        let (before, _) = query.build_sql();

        let (after, _) = Preload::All.apply_scope(query).build_sql();
        assert_eq!(before, after);
    }
}
