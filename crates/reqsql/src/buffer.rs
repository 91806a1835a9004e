//! Shared text and parameter accumulator for one compilation.

use crate::compiled::CompiledQuery;
use crate::dialect::Dialect;
use crate::value::Value;

/// Growing SQL text plus the ordered list of bound parameters.
///
/// One buffer exists per top-level compile. Nested requests render into the
/// same buffer, so the Nth placeholder in the final text always binds the Nth
/// parameter.
#[derive(Debug, Clone, Default)]
pub struct QueryBuffer {
    text: String,
    params: Vec<Value>,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text.
    pub fn append_text(&mut self, s: &str) -> &mut Self {
        self.text.push_str(s);
        self
    }

    /// Append `"<keyword> <s>\n"`.
    pub fn append_clause(&mut self, keyword: &str, s: &str) -> &mut Self {
        self.text.push_str(keyword);
        self.text.push(' ');
        self.text.push_str(s);
        self.text.push('\n');
        self
    }

    /// Append `"<w> "`.
    pub fn append_word(&mut self, w: &str) -> &mut Self {
        self.text.push_str(w);
        self.text.push(' ');
        self
    }

    /// Register a parameter and return its 1-based position.
    pub fn add_parameter(&mut self, value: Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Register several parameters, preserving their order.
    pub fn add_parameters(&mut self, values: impl IntoIterator<Item = Value>) -> &mut Self {
        self.params.extend(values);
        self
    }

    /// Register a parameter and return the placeholder that binds it.
    pub fn bind(&mut self, value: Value, dialect: &Dialect) -> String {
        let index = self.add_parameter(value);
        dialect.placeholder.render(index)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[Value] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Detach the current text, leaving the parameter list in place.
    ///
    /// Used to render a nested statement on its own while its parameters keep
    /// flowing into the shared list. Pair with [`QueryBuffer::restore_text`].
    pub(crate) fn take_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Put back text detached by [`QueryBuffer::take_text`], returning the
    /// text rendered in between.
    pub(crate) fn restore_text(&mut self, outer: String) -> String {
        std::mem::replace(&mut self.text, outer)
    }

    /// Drop parameters registered after the first `len`.
    pub(crate) fn truncate_params(&mut self, len: usize) {
        self.params.truncate(len);
    }

    /// Finish the compile.
    pub fn finish(self) -> CompiledQuery {
        CompiledQuery::new(self.text, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_clause_word_and_text() {
        let mut buf = QueryBuffer::new();
        buf.append_clause("SELECT", "*")
            .append_word("FROM")
            .append_text("`users`");
        assert_eq!(buf.text(), "SELECT *\nFROM `users`");
    }

    #[test]
    fn parameters_keep_call_order() {
        let mut buf = QueryBuffer::new();
        assert_eq!(buf.add_parameter(Value::from(1)), 1);
        buf.add_parameters(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(buf.add_parameter(Value::Null), 4);
        assert_eq!(
            buf.parameters(),
            &[Value::Int(1), Value::from("a"), Value::from("b"), Value::Null]
        );
    }

    #[test]
    fn bind_uses_dialect_placeholder() {
        let mut buf = QueryBuffer::new();
        buf.add_parameter(Value::from(1));
        assert_eq!(buf.bind(Value::from(2), &Dialect::postgres()), "$2");
        assert_eq!(buf.bind(Value::from(3), &Dialect::mysql()), "?");
    }

    #[test]
    fn take_and_restore_keep_params_shared() {
        let mut buf = QueryBuffer::new();
        buf.append_text("outer ");
        buf.add_parameter(Value::from(1));

        let outer = buf.take_text();
        buf.append_text("inner");
        buf.add_parameter(Value::from(2));
        let inner = buf.restore_text(outer);

        assert_eq!(inner, "inner");
        assert_eq!(buf.text(), "outer ");
        assert_eq!(buf.param_count(), 2);
    }
}
