//! Scalar parameter values.
//!
//! Every placeholder emitted by the grammar binds exactly one [`Value`].

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::Json(_) => "json",
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Value;
    use bytes::BytesMut;
    use chrono::{DateTime, Utc};
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, WrongType};

    impl Value {
        fn accepts_type(&self, ty: &Type) -> bool {
            match self {
                Value::Null => true,
                Value::Bool(_) => <bool as ToSql>::accepts(ty),
                Value::Int(_) => matches!(*ty, Type::INT2 | Type::INT4 | Type::INT8),
                Value::Float(_) => matches!(*ty, Type::FLOAT4 | Type::FLOAT8),
                Value::Text(_) => <String as ToSql>::accepts(ty),
                Value::Bytes(_) => <Vec<u8> as ToSql>::accepts(ty),
                Value::Uuid(_) => <uuid::Uuid as ToSql>::accepts(ty),
                Value::Timestamp(_) => <DateTime<Utc> as ToSql>::accepts(ty),
                Value::Json(_) => <serde_json::Value as ToSql>::accepts(ty),
            }
        }
    }

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql(ty, out),
                Value::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                    _ => v.to_sql(ty, out),
                },
                Value::Float(v) => {
                    if *ty == Type::FLOAT4 {
                        (*v as f32).to_sql(ty, out)
                    } else {
                        v.to_sql(ty, out)
                    }
                }
                Value::Text(v) => v.to_sql(ty, out),
                Value::Bytes(v) => v.as_slice().to_sql(ty, out),
                Value::Uuid(v) => v.to_sql(ty, out),
                Value::Timestamp(v) => v.to_sql(ty, out),
                Value::Json(v) => v.to_sql(ty, out),
            }
        }

        // Per-variant check happens in `to_sql_checked`.
        fn accepts(_ty: &Type) -> bool {
            true
        }

        fn to_sql_checked(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            if !self.accepts_type(ty) {
                return Err(Box::new(WrongType::new::<Value>(ty.clone())));
            }
            self.to_sql(ty, out)
        }
    }
}
