//! Error types for reqsql

use std::fmt;
use thiserror::Error;

/// Result type alias for reqsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Kind of node a contract violation was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Request,
    Compare,
    Nested,
    Operand,
    Identifier,
    OrderBy,
    Assignment,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Request => "request",
            NodeKind::Compare => "compare tag",
            NodeKind::Nested => "nested where tag",
            NodeKind::Operand => "operand",
            NodeKind::Identifier => "identifier",
            NodeKind::OrderBy => "order by item",
            NodeKind::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

/// One step of a [`NodePath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Tag index inside a WHERE tree.
    Where(usize),
    /// Tag index inside a HAVING tree.
    Having(usize),
    /// Entered a nested request (subquery, EXISTS, IN values).
    Subquery,
    Column(usize),
    GroupBy(usize),
    OrderBy(usize),
    Union(usize),
    Set(usize),
    /// Element index inside an operand list or composite id.
    Item(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Where(i) => write!(f, "where[{i}]"),
            PathSegment::Having(i) => write!(f, "having[{i}]"),
            PathSegment::Subquery => f.write_str("subquery"),
            PathSegment::Column(i) => write!(f, "columns[{i}]"),
            PathSegment::GroupBy(i) => write!(f, "group_by[{i}]"),
            PathSegment::OrderBy(i) => write!(f, "order_by[{i}]"),
            PathSegment::Union(i) => write!(f, "union[{i}]"),
            PathSegment::Set(i) => write!(f, "set[{i}]"),
            PathSegment::Item(i) => write!(f, "item[{i}]"),
        }
    }
}

/// Location of a node inside a request tree, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Error types for request compilation
#[derive(Debug, Error)]
pub enum SqlError {
    /// A request node broke a rendering precondition.
    #[error("Contract violation in {kind} at {path}: {message}")]
    Contract {
        kind: NodeKind,
        path: NodePath,
        message: String,
    },

    /// Invalid dialect configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SqlError {
    /// Create a contract violation located at the current node.
    ///
    /// The path is filled in by the renderers while the error unwinds.
    pub fn contract(kind: NodeKind, message: impl Into<String>) -> Self {
        Self::Contract {
            kind,
            path: NodePath::default(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a contract violation
    pub fn is_contract(&self) -> bool {
        matches!(self, Self::Contract { .. })
    }

    /// Node path of a contract violation.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Self::Contract { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Node kind of a contract violation.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Self::Contract { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Prefix the error's node path with the segment of an enclosing node.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        if let Self::Contract { path, .. } = &mut self {
            path.0.insert(0, segment);
        }
        self
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
