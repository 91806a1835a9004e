//! Finished statement text paired with its bound parameters.

use crate::error::SqlResult;
use crate::value::Value;
use serde::Serialize;

/// The output of a compile: SQL text plus parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    text: String,
    params: Vec<Value>,
}

impl CompiledQuery {
    pub(crate) fn new(text: String, params: Vec<Value>) -> Self {
        Self { text, params }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.params)
    }

    /// JSON dump of text and parameters, for logs and snapshots.
    pub fn to_json(&self) -> SqlResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_dump_has_text_and_params() {
        let q = CompiledQuery::new("SELECT ?\n".into(), vec![Value::from(1)]);
        assert_eq!(q.to_json().unwrap(), r#"{"text":"SELECT ?\n","params":[1]}"#);
    }

    #[test]
    fn json_dump_writes_non_finite_floats_as_null() {
        let q = CompiledQuery::new("?".into(), vec![Value::Float(f64::NAN)]);
        assert_eq!(q.to_json().unwrap(), r#"{"text":"?","params":[null]}"#);
    }

    #[test]
    fn into_parts_returns_both() {
        let q = CompiledQuery::new("x".into(), vec![Value::Null]);
        let (text, params) = q.into_parts();
        assert_eq!(text, "x");
        assert_eq!(params, vec![Value::Null]);
    }
}
