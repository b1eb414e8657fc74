//! SQL dialect helpers: placeholder styles and identifier quoting.

/// Placeholder dialect of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL uses `$1`, `$2`, …
    PostgreSQL,
    /// MySQL uses `?`.
    MySQL,
    /// SQLite uses `?`.
    SQLite,
}

impl DatabaseType {
    /// Get the parameter placeholder for a 1-based index.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Self::PostgreSQL => format!("${index}"),
            Self::MySQL | Self::SQLite => "?".to_string(),
        }
    }
}

impl Default for DatabaseType {
    fn default() -> Self {
        Self::PostgreSQL
    }
}

/// Escape an identifier by double-quoting it, doubling embedded quotes.
pub fn escape_identifier(name: &str) -> String {
    let escaped = name.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// Check if an identifier needs quoting: reserved words and anything
/// beyond plain `[A-Za-z0-9_]`.
pub fn needs_quoting(name: &str) -> bool {
    let reserved = [
        "user", "order", "group", "select", "from", "where", "table", "index",
        "key", "limit", "offset", "having", "in", "is", "like", "and", "or",
        "not", "null", "join", "on", "as", "case", "when", "then", "else",
        "end", "union", "distinct", "values",
    ];

    if reserved.contains(&name.to_lowercase().as_str()) {
        return true;
    }

    !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote an identifier if needed.
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        escape_identifier(name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholders() {
        assert_eq!(DatabaseType::PostgreSQL.placeholder(1), "$1");
        assert_eq!(DatabaseType::PostgreSQL.placeholder(7), "$7");
        assert_eq!(DatabaseType::MySQL.placeholder(1), "?");
        assert_eq!(DatabaseType::SQLite.placeholder(3), "?");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "users");
        assert_eq!(quote_identifier("user"), "\"user\"");
        assert_eq!(quote_identifier("weird name"), "\"weird name\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
