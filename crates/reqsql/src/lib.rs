//! # reqsql
//!
//! Compile structured query requests into dialect-specific SQL text plus an
//! ordered list of bound parameters.
//!
//! ## Features
//!
//! - **Composable requests**: filters, nested groups, subqueries, EXISTS, unions
//! - **Strict parameter order**: the Nth placeholder always binds the Nth parameter,
//!   however deeply requests are nested
//! - **Identifier quoting**: bare identifier paths are quoted, expressions pass through
//! - **Runtime dialects**: quoting, placeholders and keywords come from a [`Dialect`] value
//!   (presets for MySQL, PostgreSQL, SQLite and SQL Server, or load one from TOML/JSON)
//! - **Located errors**: malformed requests fail with the node kind and its path in the tree
//!
//! ## Example
//!
//! ```ignore
//! use reqsql::{Dialect, Grammar, Request, Where};
//!
//! let request = Request::new("users")
//!     .filter(
//!         Where::new()
//!             .gte("age", 18)
//!             .in_list("status", ["active", "pending"]),
//!     )
//!     .order_by_desc("created_at")
//!     .limit(10);
//!
//! let query = Grammar::new(Dialect::postgres()).compile(&request)?;
//! // SELECT *
//! // FROM "users"
//! // WHERE "age" >= $1
//! //      AND "status" IN ($2, $3)
//! // ORDER BY "created_at" DESC
//! // LIMIT 10
//! client.query(query.text(), &query.params_ref()).await?;
//! ```

pub mod buffer;
pub mod compiled;
pub mod dialect;
pub mod error;
pub mod grammar;
pub mod quote;
pub mod request;
pub mod value;

pub use buffer::QueryBuffer;
pub use compiled::CompiledQuery;
pub use dialect::{Dialect, Placeholder};
pub use error::{NodeKind, NodePath, PathSegment, SqlError, SqlResult};
pub use grammar::Grammar;
pub use quote::{EXPRESSION_TERMINALS, Quoter, is_bare_identifier};
pub use request::{
    Assignments, Column, EntityId, Expression, Join, Operand, OrderBy, Request, Tag, TagKind,
    Union, UnionKind, Where,
};
pub use value::Value;
