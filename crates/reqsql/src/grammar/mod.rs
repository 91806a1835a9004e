//! SQL grammar: compiles [`Request`]s into [`CompiledQuery`]s.
//!
//! Every public entry point creates exactly one [`QueryBuffer`] and threads
//! it through the whole render, including nested requests (subqueries,
//! EXISTS, unions). The buffer is dropped on error, so a failed compile never
//! yields partial SQL.
//!
//! # Example
//! ```ignore
//! use reqsql::{Grammar, Request, Where};
//!
//! let grammar = Grammar::default();
//! let query = grammar.compile(
//!     &Request::new("users").filter(Where::new().gte("age", 18)),
//! )?;
//! assert_eq!(query.text(), "SELECT *\nFROM `users`\nWHERE `age` >= ?\n");
//! # Ok::<(), reqsql::SqlError>(())
//! ```

mod operand;
mod statement;
mod where_render;


use crate::buffer::QueryBuffer;
use crate::compiled::CompiledQuery;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::quote::Quoter;
use crate::request::{Assignments, Request};

#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL: usize = 200;

/// Request compiler for one dialect.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    dialect: Dialect,
}

impl Grammar {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn quoter(&self) -> Quoter<'_> {
        Quoter::new(&self.dialect)
    }

    /// Compile `request` as a SELECT statement.
    pub fn compile(&self, request: &Request) -> SqlResult<CompiledQuery> {
        self.select(request)
    }

    pub fn select(&self, request: &Request) -> SqlResult<CompiledQuery> {
        self.run("select", |buf| self.assemble_select(request, buf))
    }

    /// `SELECT EXISTS(<select>)`
    pub fn exists(&self, request: &Request) -> SqlResult<CompiledQuery> {
        self.run("exists", |buf| {
            let sub = self.render_nested_select(request, buf)?;
            buf.append_clause("SELECT", &format!("EXISTS({sub})"));
            Ok(())
        })
    }

    /// `DELETE FROM <name>` with the request's WHERE, ORDER BY and LIMIT.
    pub fn delete(&self, request: &Request) -> SqlResult<CompiledQuery> {
        self.run("delete", |buf| self.assemble_delete(request, buf))
    }

    /// `UPDATE <name> SET ...` with the request's WHERE, ORDER BY and LIMIT.
    pub fn update(&self, set: &Assignments, request: &Request) -> SqlResult<CompiledQuery> {
        self.run("update", |buf| self.assemble_update(set, request, buf))
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<values>)`
    pub fn insert(&self, table: &str, set: &Assignments) -> SqlResult<CompiledQuery> {
        self.run("insert", |buf| self.assemble_insert(table, set, buf))
    }

    /// `INSERT INTO <table>` followed by the SELECT of `request`.
    pub fn insert_into(&self, table: &str, request: &Request) -> SqlResult<CompiledQuery> {
        self.run("insert_into", |buf| self.assemble_insert_into(table, request, buf))
    }

    fn run(
        &self,
        statement: &'static str,
        assemble: impl FnOnce(&mut QueryBuffer) -> SqlResult<()>,
    ) -> SqlResult<CompiledQuery> {
        #[cfg(not(feature = "tracing"))]
        let _ = statement;

        let mut buf = QueryBuffer::new();
        match assemble(&mut buf) {
            Ok(()) => {
                let compiled = buf.finish();
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "reqsql.sql",
                    statement,
                    param_count = compiled.params().len(),
                    sql = %truncate_sql(compiled.text(), MAX_LOGGED_SQL),
                );
                Ok(compiled)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "reqsql.sql",
                    statement,
                    error = %err,
                    "compile failed",
                );
                Err(err)
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn truncate_sql(sql: &str, max_bytes: usize) -> String {
    if sql.len() <= max_bytes {
        return sql.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}
