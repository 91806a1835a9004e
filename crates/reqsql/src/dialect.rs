//! Dialect configuration.
//!
//! A [`Dialect`] holds every quoting, keyword, and separator choice that
//! differs between SQL engines. It is an immutable value handed to
//! [`Grammar::new`](crate::Grammar::new), so several dialects can be used side
//! by side in one process.
//!
//! # Example
//! ```ignore
//! use reqsql::Dialect;
//!
//! let dialect = Dialect::from_toml_str(r#"
//!     identifier_quote_open = '"'
//!     identifier_quote_close = '"'
//!     placeholder = { numbered = "$" }
//! "#)?;
//! # Ok::<(), reqsql::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};

/// How parameter placeholders are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// The same token for every parameter (`?`).
    Positional(String),
    /// Prefix followed by the 1-based parameter number (`$1`, `$2`, ...).
    Numbered(String),
}

impl Placeholder {
    /// Render the placeholder for the parameter at 1-based `index`.
    pub fn render(&self, index: usize) -> String {
        match self {
            Placeholder::Positional(token) => token.clone(),
            Placeholder::Numbered(prefix) => format!("{prefix}{index}"),
        }
    }

    pub fn is_numbered(&self) -> bool {
        matches!(self, Placeholder::Numbered(_))
    }

    fn token(&self) -> &str {
        match self {
            Placeholder::Positional(token) | Placeholder::Numbered(token) => token,
        }
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Placeholder::Positional("?".to_string())
    }
}

/// Quoting, keyword, and separator configuration for one SQL dialect.
///
/// Missing fields fall back to the MySQL defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Opening identifier quote.
    pub identifier_quote_open: String,
    /// Closing identifier quote.
    pub identifier_quote_close: String,
    /// Separator between identifier path segments (`schema.table.column`).
    pub identifier_separator: String,
    /// Parameter placeholder style.
    pub placeholder: Placeholder,
    /// Separator for inline lists (`IN (?, ?)`, column lists).
    pub list_separator: String,
    /// Separator for lists spread over several lines (`SET` assignments).
    pub list_separator_multi_line: String,
    /// Ascending keyword for ORDER BY.
    pub ascending: String,
    /// Descending keyword for ORDER BY.
    pub descending: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::mysql()
    }
}

impl Dialect {
    /// MySQL / MariaDB: backtick identifiers, `?` placeholders.
    pub fn mysql() -> Self {
        Self {
            identifier_quote_open: "`".to_string(),
            identifier_quote_close: "`".to_string(),
            identifier_separator: ".".to_string(),
            placeholder: Placeholder::default(),
            list_separator: ", ".to_string(),
            list_separator_multi_line: ",\n\t".to_string(),
            ascending: "ASC".to_string(),
            descending: "DESC".to_string(),
        }
    }

    /// PostgreSQL: double-quoted identifiers, `$n` placeholders.
    pub fn postgres() -> Self {
        Self {
            identifier_quote_open: "\"".to_string(),
            identifier_quote_close: "\"".to_string(),
            placeholder: Placeholder::Numbered("$".to_string()),
            ..Self::mysql()
        }
    }

    /// SQLite: double-quoted identifiers, `?` placeholders.
    pub fn sqlite() -> Self {
        Self {
            identifier_quote_open: "\"".to_string(),
            identifier_quote_close: "\"".to_string(),
            ..Self::mysql()
        }
    }

    /// SQL Server: bracket identifiers, `?` placeholders.
    pub fn mssql() -> Self {
        Self {
            identifier_quote_open: "[".to_string(),
            identifier_quote_close: "]".to_string(),
            ..Self::mysql()
        }
    }

    /// Look up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> SqlResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::mysql()),
            "postgres" | "postgresql" | "pg" => Ok(Self::postgres()),
            "sqlite" => Ok(Self::sqlite()),
            "mssql" | "sqlserver" => Ok(Self::mssql()),
            other => Err(SqlError::config(format!("unknown dialect '{other}'"))),
        }
    }

    /// Parse and validate a dialect from TOML.
    pub fn from_toml_str(s: &str) -> SqlResult<Self> {
        let dialect: Dialect = toml::from_str(s)?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Parse and validate a dialect from JSON.
    pub fn from_json_str(s: &str) -> SqlResult<Self> {
        let dialect: Dialect =
            serde_json::from_str(s).map_err(|e| SqlError::config(e.to_string()))?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Override the placeholder style.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Override the identifier quotes.
    pub fn with_quotes(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.identifier_quote_open = open.into();
        self.identifier_quote_close = close.into();
        self
    }

    /// Check that no token the grammar relies on is empty.
    pub fn validate(&self) -> SqlResult<()> {
        let required = [
            ("identifier_quote_open", self.identifier_quote_open.as_str()),
            ("identifier_quote_close", self.identifier_quote_close.as_str()),
            ("identifier_separator", self.identifier_separator.as_str()),
            ("placeholder", self.placeholder.token()),
            ("list_separator", self.list_separator.as_str()),
            ("list_separator_multi_line", self.list_separator_multi_line.as_str()),
            ("ascending", self.ascending.as_str()),
            ("descending", self.descending.as_str()),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(SqlError::config(format!("dialect field '{field}' cannot be empty")));
            }
        }
        Ok(())
    }
}
