//! Condition trees ("where tags").
//!
//! A [`Where`] is an ordered list of [`Tag`]s. Each tag carries the operator
//! joining it to the previous tag and a negation flag. Tags are rendered left
//! to right exactly in insertion order; there is no precedence reordering, so
//! use [`Where::nested`] to group.

use crate::request::Request;
use crate::request::operand::{Expression, Operand};
use crate::value::Value;

/// Operator joining a tag to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Join {
    #[default]
    And,
    Or,
}

impl Join {
    pub fn keyword(self) -> &'static str {
        match self {
            Join::And => "AND",
            Join::Or => "OR",
        }
    }
}

/// Kind-specific payload of a [`Tag`].
#[derive(Debug, Clone, PartialEq)]
pub enum TagKind {
    /// `left <operator> right`
    Compare {
        left: Operand,
        operator: String,
        right: Operand,
    },
    /// `identifier BETWEEN min AND max`
    Between {
        identifier: Operand,
        min: Operand,
        max: Operand,
    },
    /// `identifier IN (values)`; `values` is a list or a request.
    In { identifier: Operand, values: Operand },
    /// Null test on `identifier`.
    ///
    /// The keyword is chosen from the negation flag: a plain tag renders
    /// `IS NOT NULL`, a negated tag renders `IS NULL`. Prefer the
    /// [`Where::is_null`] / [`Where::is_not_null`] helpers.
    Null { identifier: Operand },
    /// `EXISTS(request)`
    Exists { request: Box<Request> },
    /// Parenthesized sub-tree.
    Nested { group: Where },
}

/// One condition node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    join: Join,
    negated: bool,
    kind: TagKind,
}

impl Tag {
    pub fn new(kind: TagKind) -> Self {
        Self {
            join: Join::And,
            negated: false,
            kind,
        }
    }

    pub fn compare(left: impl Into<Operand>, operator: impl Into<String>, right: impl Into<Operand>) -> Self {
        Self::new(TagKind::Compare {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
        })
    }

    pub fn between(identifier: impl Into<Operand>, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        Self::new(TagKind::Between {
            identifier: identifier.into(),
            min: min.into(),
            max: max.into(),
        })
    }

    pub fn in_values(identifier: impl Into<Operand>, values: impl Into<Operand>) -> Self {
        Self::new(TagKind::In {
            identifier: identifier.into(),
            values: values.into(),
        })
    }

    /// A plain null tag (renders `IS NOT NULL` unless negated).
    pub fn null(identifier: impl Into<Operand>) -> Self {
        Self::new(TagKind::Null {
            identifier: identifier.into(),
        })
    }

    pub fn exists(request: Request) -> Self {
        Self::new(TagKind::Exists {
            request: Box::new(request),
        })
    }

    pub fn nested(group: Where) -> Self {
        Self::new(TagKind::Nested { group })
    }

    /// Join with `OR`.
    pub fn or(mut self) -> Self {
        self.join = Join::Or;
        self
    }

    /// Join with `AND` (the default).
    pub fn and(mut self) -> Self {
        self.join = Join::And;
        self
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn join(&self) -> Join {
        self.join
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn kind(&self) -> &TagKind {
        &self.kind
    }
}

/// An ordered condition tree.
///
/// # Example
/// ```ignore
/// let w = Where::new()
///     .gte("age", 18)
///     .in_list("status", ["active", "pending"])
///     .or_nested(|w| w.eq("role", "admin").is_not_null("verified_at"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    tags: Vec<Tag>,
}

impl Where {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Append a fully configured tag.
    pub fn push(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    fn push_and(self, tag: Tag) -> Self {
        self.push(tag)
    }

    fn push_or(self, tag: Tag) -> Self {
        self.push(tag.or())
    }

    // ==================== Compare ====================

    /// `identifier <operator> value`; the identifier side is quoted.
    pub fn compare(self, identifier: &str, operator: &str, value: impl Into<Operand>) -> Self {
        self.push_and(Tag::compare(Expression::new(identifier), operator, value))
    }

    pub fn or_compare(self, identifier: &str, operator: &str, value: impl Into<Operand>) -> Self {
        self.push_or(Tag::compare(Expression::new(identifier), operator, value))
    }

    /// Compare two arbitrary operands.
    pub fn compare_operands(self, left: impl Into<Operand>, operator: &str, right: impl Into<Operand>) -> Self {
        self.push_and(Tag::compare(left, operator, right))
    }

    pub fn eq(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, "=", value)
    }

    pub fn ne(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, "<>", value)
    }

    pub fn gt(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, ">", value)
    }

    pub fn gte(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, ">=", value)
    }

    pub fn lt(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, "<", value)
    }

    pub fn lte(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.compare(identifier, "<=", value)
    }

    pub fn like(self, identifier: &str, pattern: impl Into<Operand>) -> Self {
        self.compare(identifier, "LIKE", pattern)
    }

    pub fn or_eq(self, identifier: &str, value: impl Into<Operand>) -> Self {
        self.or_compare(identifier, "=", value)
    }

    // ==================== Between ====================

    pub fn between(self, identifier: impl Into<Operand>, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.push_and(Tag::between(identifier, min, max))
    }

    pub fn not_between(self, identifier: impl Into<Operand>, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.push_and(Tag::between(identifier, min, max).negated(true))
    }

    pub fn or_between(self, identifier: impl Into<Operand>, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.push_or(Tag::between(identifier, min, max))
    }

    // ==================== In ====================

    pub fn in_list<T: Into<Value>>(self, identifier: impl Into<Operand>, values: impl IntoIterator<Item = T>) -> Self {
        self.push_and(Tag::in_values(identifier, Operand::values(values)))
    }

    pub fn not_in<T: Into<Value>>(self, identifier: impl Into<Operand>, values: impl IntoIterator<Item = T>) -> Self {
        self.push_and(Tag::in_values(identifier, Operand::values(values)).negated(true))
    }

    pub fn or_in_list<T: Into<Value>>(self, identifier: impl Into<Operand>, values: impl IntoIterator<Item = T>) -> Self {
        self.push_or(Tag::in_values(identifier, Operand::values(values)))
    }

    /// `identifier IN (SELECT ...)`
    pub fn in_request(self, identifier: impl Into<Operand>, request: Request) -> Self {
        self.push_and(Tag::in_values(identifier, request))
    }

    pub fn not_in_request(self, identifier: impl Into<Operand>, request: Request) -> Self {
        self.push_and(Tag::in_values(identifier, request).negated(true))
    }

    // ==================== Null ====================

    /// `identifier IS NULL`
    pub fn is_null(self, identifier: impl Into<Operand>) -> Self {
        self.push_and(Tag::null(identifier).negated(true))
    }

    /// `identifier IS NOT NULL`
    pub fn is_not_null(self, identifier: impl Into<Operand>) -> Self {
        self.push_and(Tag::null(identifier))
    }

    pub fn or_is_null(self, identifier: impl Into<Operand>) -> Self {
        self.push_or(Tag::null(identifier).negated(true))
    }

    pub fn or_is_not_null(self, identifier: impl Into<Operand>) -> Self {
        self.push_or(Tag::null(identifier))
    }

    // ==================== Exists ====================

    pub fn exists(self, request: Request) -> Self {
        self.push_and(Tag::exists(request))
    }

    pub fn not_exists(self, request: Request) -> Self {
        self.push_and(Tag::exists(request).negated(true))
    }

    pub fn or_exists(self, request: Request) -> Self {
        self.push_or(Tag::exists(request))
    }

    // ==================== Nested ====================

    /// Add a parenthesized group built by `build`.
    pub fn nested(self, build: impl FnOnce(Where) -> Where) -> Self {
        self.push_and(Tag::nested(build(Where::new())))
    }

    pub fn or_nested(self, build: impl FnOnce(Where) -> Where) -> Self {
        self.push_or(Tag::nested(build(Where::new())))
    }

    pub fn not_nested(self, build: impl FnOnce(Where) -> Where) -> Self {
        self.push_and(Tag::nested(build(Where::new())).negated(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_insertion_order_and_joins() {
        let w = Where::new().eq("a", 1).or_eq("b", 2).is_null("c");
        let joins: Vec<Join> = w.tags().iter().map(Tag::join).collect();
        assert_eq!(joins, vec![Join::And, Join::Or, Join::And]);
    }

    #[test]
    fn null_helpers_set_negation_for_literal_mapping() {
        let w = Where::new().is_null("a").is_not_null("b");
        assert!(w.tags()[0].is_negated());
        assert!(!w.tags()[1].is_negated());
    }

    #[test]
    fn compare_wraps_identifier_as_expression() {
        let w = Where::new().gte("age", 18);
        match w.tags()[0].kind() {
            TagKind::Compare { left, operator, right } => {
                assert_eq!(left, &Operand::Expr(Expression::new("age")));
                assert_eq!(operator, ">=");
                assert_eq!(right, &Operand::Value(Value::Int(18)));
            }
            other => panic!("unexpected tag {other:?}"),
        }
    }

    #[test]
    fn nested_builds_inner_group() {
        let w = Where::new().nested(|w| w.eq("x", 1).or_eq("y", 2));
        match w.tags()[0].kind() {
            TagKind::Nested { group } => assert_eq!(group.len(), 2),
            other => panic!("unexpected tag {other:?}"),
        }
    }
}
