//! Operands: anything that can appear inside a condition.

use crate::request::Request;
use crate::value::Value;

/// A pre-formed SQL fragment carrying its own parameters.
///
/// The text is merged verbatim, except that a bare identifier (no terminal
/// characters) is quoted. `?` markers bind the expression's parameters in
/// order.
///
/// # Example
/// ```ignore
/// Expression::new("users.id");                         // quoted as an identifier
/// Expression::with_params("score > ? * 2", vec![10.into()]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text: String,
    params: Vec<Value>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(text: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Ordered key parts identifying an entity (a possibly composite primary key).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityId(Vec<Value>);

impl EntityId {
    pub fn new(parts: Vec<Value>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<Value>> FromIterator<T> for EntityId {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A condition operand.
///
/// Where a value is expected, `Value` becomes a bound parameter. Where an
/// identifier is expected (BETWEEN/IN/NULL subjects, column lists), a text
/// `Value` is quoted as an identifier instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    Id(EntityId),
    List(Vec<Operand>),
    Expr(Expression),
    Request(Box<Request>),
}

impl Operand {
    /// An identifier operand (`Value::Text`).
    pub fn ident(name: impl Into<String>) -> Self {
        Operand::Value(Value::Text(name.into()))
    }

    /// A list of identifiers, e.g. a composite key's columns.
    pub fn idents<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Operand::List(names.into_iter().map(Operand::ident).collect())
    }

    /// A list of bound values.
    pub fn values<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Operand::List(
            values
                .into_iter()
                .map(|v| Operand::Value(v.into()))
                .collect(),
        )
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Operand::Value(v) => v.type_name(),
            Operand::Id(_) => "entity id",
            Operand::List(_) => "list",
            Operand::Expr(_) => "expression",
            Operand::Request(_) => "request",
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(v.into())
                }
            }
        )*
    };
}

impl_from_value!(
    Value,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    bool,
    &str,
    String,
    &String,
    Vec<u8>,
    uuid::Uuid,
    chrono::DateTime<chrono::Utc>,
    serde_json::Value
);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(v.into())
    }
}

impl From<EntityId> for Operand {
    fn from(id: EntityId) -> Self {
        Operand::Id(id)
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Operand::Expr(expr)
    }
}

impl From<Request> for Operand {
    fn from(request: Request) -> Self {
        Operand::Request(Box::new(request))
    }
}
