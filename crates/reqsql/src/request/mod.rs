//! Query-intent model.
//!
//! A [`Request`] describes one query's source, filters, ordering, and paging.
//! It is plain data: nothing here knows about SQL text. Hand it to
//! [`Grammar`](crate::Grammar) to compile it.
//!
//! # Example
//! ```ignore
//! use reqsql::{Request, Where};
//!
//! let request = Request::new("users")
//!     .filter(Where::new().gte("age", 18).in_list("status", ["active", "pending"]))
//!     .order_by("created_at", "desc")
//!     .limit(20);
//! ```

pub mod operand;
pub mod where_tree;

pub use operand::{EntityId, Expression, Operand};
pub use where_tree::{Join, Tag, TagKind, Where};

/// A selected column with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub operand: Operand,
    pub alias: Option<String>,
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBy {
    /// Column with a direction token. Only the dialect's descending keyword
    /// (any case) means descending; anything else sorts ascending.
    Column { identifier: String, direction: String },
    /// A bare identifier or expression, emitted without a direction.
    Operand(Operand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    Normal,
    All,
}

impl UnionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            UnionKind::Normal => "UNION",
            UnionKind::All => "UNION ALL",
        }
    }
}

/// A request combined with the enclosing one by `UNION [ALL]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub kind: UnionKind,
    pub request: Request,
}

/// A query-intent value.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    table: String,
    alias: Option<String>,
    columns: Vec<Column>,
    distinct: bool,
    where_tree: Where,
    group_by: Vec<Operand>,
    having: Where,
    unions: Vec<Union>,
    order_by: Vec<OrderBy>,
    offset: u64,
    limit: u64,
}

impl Request {
    /// Create a request reading from `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            columns: Vec::new(),
            distinct: false,
            where_tree: Where::new(),
            group_by: Vec::new(),
            having: Where::new(),
            unions: Vec::new(),
            order_by: Vec::new(),
            offset: 0,
            limit: 0,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    // ==================== Columns ====================

    /// Append columns (identifiers or expressions). No columns means `*`.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(|c| Column {
            operand: Operand::ident(c),
            alias: None,
        }));
        self
    }

    /// Append one column (or expression/subquery operand) under an alias.
    pub fn column_as(mut self, column: impl Into<Operand>, alias: impl Into<String>) -> Self {
        self.columns.push(Column {
            operand: column.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Append an expression column without alias.
    pub fn column_expr(mut self, expression: impl Into<Operand>) -> Self {
        self.columns.push(Column {
            operand: expression.into(),
            alias: None,
        });
        self
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    // ==================== Filters ====================

    /// Replace the WHERE tree.
    pub fn filter(mut self, tree: Where) -> Self {
        self.where_tree = tree;
        self
    }

    /// Extend the WHERE tree in place.
    pub fn where_with(mut self, build: impl FnOnce(Where) -> Where) -> Self {
        self.where_tree = build(std::mem::take(&mut self.where_tree));
        self
    }

    /// Append GROUP BY items.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by
            .extend(columns.into_iter().map(Operand::ident));
        self
    }

    /// Replace the HAVING tree.
    pub fn having(mut self, tree: Where) -> Self {
        self.having = tree;
        self
    }

    pub fn union(mut self, request: Request) -> Self {
        self.unions.push(Union {
            kind: UnionKind::Normal,
            request,
        });
        self
    }

    pub fn union_all(mut self, request: Request) -> Self {
        self.unions.push(Union {
            kind: UnionKind::All,
            request,
        });
        self
    }

    // ==================== Ordering & paging ====================

    /// Add `identifier ASC|DESC`. The direction is matched case-insensitively
    /// against the descending keyword; any other token sorts ascending.
    pub fn order_by(mut self, identifier: impl Into<String>, direction: impl Into<String>) -> Self {
        self.order_by.push(OrderBy::Column {
            identifier: identifier.into(),
            direction: direction.into(),
        });
        self
    }

    pub fn order_by_asc(self, identifier: impl Into<String>) -> Self {
        self.order_by(identifier, "ASC")
    }

    pub fn order_by_desc(self, identifier: impl Into<String>) -> Self {
        self.order_by(identifier, "DESC")
    }

    /// Add a bare ORDER BY item (identifier or expression, no direction).
    pub fn order_by_operand(mut self, operand: impl Into<Operand>) -> Self {
        self.order_by.push(OrderBy::Operand(operand.into()));
        self
    }

    /// Set OFFSET. Zero means no OFFSET clause.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set LIMIT. Zero means no LIMIT clause.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let size = per_page.max(1);
        self.limit = size;
        self.offset = (page - 1) * size;
        self
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn selected_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn where_tree(&self) -> &Where {
        &self.where_tree
    }

    pub fn group_by_items(&self) -> &[Operand] {
        &self.group_by
    }

    pub fn having_tree(&self) -> &Where {
        &self.having
    }

    pub fn unions(&self) -> &[Union] {
        &self.unions
    }

    pub fn order_by_items(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn offset_value(&self) -> u64 {
        self.offset
    }

    pub fn limit_value(&self) -> u64 {
        self.limit
    }
}

/// Ordered `column = value` pairs for INSERT and UPDATE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments(Vec<(String, Operand)>);

impl Assignments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.0.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v))
    }
}
