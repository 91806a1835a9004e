//! Operand rendering (values, identifiers, expressions, subqueries).

use super::Grammar;
use crate::buffer::QueryBuffer;
use crate::error::{NodeKind, PathSegment, SqlError, SqlResult};
use crate::quote::is_bare_identifier;
use crate::request::{EntityId, Expression, Operand, Request};
use crate::value::Value;

impl Grammar {
    /// Render an operand in value position.
    ///
    /// Scalars become placeholders, lists render as `(a, b, ...)`, entity
    /// ids collapse to their single part or render as a list, expressions
    /// merge their own parameters, and requests render as `(SELECT ...)`.
    pub fn render_operand(&self, operand: &Operand, buf: &mut QueryBuffer) -> SqlResult<String> {
        match operand {
            Operand::List(items) => {
                let rendered = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.render_operand(item, buf)
                            .map_err(|e| e.within(PathSegment::Item(i)))
                    })
                    .collect::<SqlResult<Vec<_>>>()?;
                Ok(format!("({})", rendered.join(&self.dialect.list_separator)))
            }
            Operand::Expr(expr) => self.render_expression(expr, buf),
            Operand::Request(request) => self.render_subquery(request, buf),
            Operand::Id(id) => self.render_entity_id(id, buf),
            Operand::Value(value) => Ok(buf.bind(value.clone(), &self.dialect)),
        }
    }

    /// Render an operand in identifier position.
    ///
    /// Text is quoted instead of bound; lists of names are quoted per
    /// element. Anything else that cannot name a column is rejected.
    pub fn render_identifier(&self, operand: &Operand, buf: &mut QueryBuffer) -> SqlResult<String> {
        match operand {
            Operand::Expr(expr) => self.render_expression(expr, buf),
            Operand::Request(request) => self.render_subquery(request, buf),
            Operand::List(items) => {
                if items.is_empty() {
                    return Err(SqlError::contract(
                        NodeKind::Identifier,
                        "identifier list cannot be empty",
                    ));
                }
                let quoted = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.render_list_identifier(item, buf)
                            .map_err(|e| e.within(PathSegment::Item(i)))
                    })
                    .collect::<SqlResult<Vec<_>>>()?;
                match quoted.as_slice() {
                    [single] => Ok(single.clone()),
                    _ => Ok(format!("({})", quoted.join(&self.dialect.list_separator))),
                }
            }
            Operand::Value(Value::Text(name)) => self.quote_name(name),
            other => Err(SqlError::contract(
                NodeKind::Identifier,
                format!("expected an identifier, got {}", other.describe()),
            )),
        }
    }

    fn render_list_identifier(&self, operand: &Operand, buf: &mut QueryBuffer) -> SqlResult<String> {
        match operand {
            Operand::Value(Value::Text(name)) => self.quote_name(name),
            Operand::Expr(expr) => self.render_expression(expr, buf),
            other => Err(SqlError::contract(
                NodeKind::Identifier,
                format!("expected an identifier in list, got {}", other.describe()),
            )),
        }
    }

    /// Quote a caller-supplied name, rejecting empty ones.
    pub(crate) fn quote_name(&self, name: &str) -> SqlResult<String> {
        if name.trim().is_empty() {
            return Err(SqlError::contract(
                NodeKind::Identifier,
                "identifier cannot be empty",
            ));
        }
        Ok(self.quoter().quote_identifier(name))
    }

    /// Merge an expression's parameters and return its text.
    ///
    /// A bare identifier is quoted. With numbered placeholders, the first
    /// `params.len()` `?` markers outside quoted literals are rewritten to
    /// the positions the parameters landed at.
    pub(crate) fn render_expression(&self, expr: &Expression, buf: &mut QueryBuffer) -> SqlResult<String> {
        let trimmed = expr.text().trim();
        if trimmed.is_empty() {
            return Err(SqlError::contract(
                NodeKind::Identifier,
                "expression cannot be empty",
            ));
        }

        let start = buf.param_count();
        buf.add_parameters(expr.params().iter().cloned());

        if is_bare_identifier(trimmed) {
            return Ok(self.quoter().quote_identifier(trimmed));
        }
        if self.dialect.placeholder.is_numbered() && !expr.params().is_empty() {
            return Ok(self.number_markers(expr.text(), start, expr.params().len()));
        }
        Ok(expr.text().to_string())
    }

    fn number_markers(&self, text: &str, start: usize, count: usize) -> String {
        let mut out = String::with_capacity(text.len() + count * 2);
        let mut used = 0;
        // An escaped quote ('' or "") toggles twice and leaves the state unchanged.
        let mut in_single = false;
        let mut in_double = false;
        for ch in text.chars() {
            match ch {
                '\'' if !in_double => in_single = !in_single,
                '"' if !in_single => in_double = !in_double,
                '?' if !in_single && !in_double && used < count => {
                    used += 1;
                    out.push_str(&self.dialect.placeholder.render(start + used));
                    continue;
                }
                _ => {}
            }
            out.push(ch);
        }
        out
    }

    fn render_entity_id(&self, id: &EntityId, buf: &mut QueryBuffer) -> SqlResult<String> {
        match id.parts() {
            [] => Err(SqlError::contract(NodeKind::Operand, "entity id has no parts")),
            [single] => Ok(buf.bind(single.clone(), &self.dialect)),
            parts => {
                let placeholders: Vec<String> = parts
                    .iter()
                    .map(|part| buf.bind(part.clone(), &self.dialect))
                    .collect();
                Ok(format!("({})", placeholders.join(&self.dialect.list_separator)))
            }
        }
    }

    /// `(SELECT ...)` sharing the caller's parameter list.
    pub(crate) fn render_subquery(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<String> {
        let inner = self
            .render_nested_select(request, buf)
            .map_err(|e| e.within(PathSegment::Subquery))?;
        Ok(format!("({inner})"))
    }

    /// Render a full SELECT for `request` into the shared buffer and return
    /// its text (trailing newline trimmed) without leaving it in the buffer.
    pub(crate) fn render_nested_select(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<String> {
        let outer = buf.take_text();
        let result = self.assemble_select(request, buf);
        let inner = buf.restore_text(outer);
        result?;
        Ok(inner.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::request::Where;

    #[test]
    fn scalar_becomes_placeholder() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        assert_eq!(g.render_operand(&Operand::from(5), &mut buf).unwrap(), "?");
        assert_eq!(buf.parameters(), &[Value::Int(5)]);
    }

    #[test]
    fn text_in_identifier_position_is_quoted_not_bound() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        assert_eq!(
            g.render_identifier(&Operand::ident("u.name"), &mut buf).unwrap(),
            "`u`.`name`"
        );
        assert_eq!(buf.param_count(), 0);
    }

    #[test]
    fn identifier_list_quotes_each_element() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        let out = g
            .render_identifier(&Operand::idents(["a", "b"]), &mut buf)
            .unwrap();
        assert_eq!(out, "(`a`, `b`)");

        let out = g.render_identifier(&Operand::idents(["a"]), &mut buf).unwrap();
        assert_eq!(out, "`a`");
    }

    #[test]
    fn non_text_identifier_is_rejected() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        let err = g.render_identifier(&Operand::from(3), &mut buf).unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::Identifier));

        let err = g.render_identifier(&Operand::ident("  "), &mut buf).unwrap_err();
        assert!(err.to_string().contains("identifier cannot be empty"));
    }

    #[test]
    fn entity_id_of_one_part_collapses() {
        let g = Grammar::default();
        let mut single = QueryBuffer::new();
        let mut plain = QueryBuffer::new();
        let id: EntityId = [7].into_iter().collect();

        let a = g.render_operand(&Operand::from(id), &mut single).unwrap();
        let b = g.render_operand(&Operand::from(7), &mut plain).unwrap();
        assert_eq!(a, b);
        assert_eq!(single.parameters(), plain.parameters());
    }

    #[test]
    fn composite_entity_id_renders_list() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        let id = EntityId::new(vec![Value::from(1), Value::from("x")]);
        assert_eq!(g.render_operand(&id.into(), &mut buf).unwrap(), "(?, ?)");
        assert_eq!(buf.parameters(), &[Value::Int(1), Value::from("x")]);
    }

    #[test]
    fn expression_merges_params_and_keeps_text() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        let expr = Expression::with_params("score > ? * 2", vec![Value::from(10)]);
        assert_eq!(g.render_operand(&expr.into(), &mut buf).unwrap(), "score > ? * 2");
        assert_eq!(buf.parameters(), &[Value::Int(10)]);
    }

    #[test]
    fn numbered_dialect_rewrites_expression_markers() {
        let g = Grammar::new(Dialect::postgres());
        let mut buf = QueryBuffer::new();
        buf.add_parameter(Value::from(1));
        let expr = Expression::with_params(
            "a BETWEEN ? AND ? OR b = ?",
            vec![Value::from(2), Value::from(3)],
        );
        assert_eq!(
            g.render_operand(&expr.into(), &mut buf).unwrap(),
            "a BETWEEN $2 AND $3 OR b = ?"
        );
    }

    #[test]
    fn numbered_rewrite_skips_quoted_literals() {
        let g = Grammar::new(Dialect::postgres());
        let mut buf = QueryBuffer::new();
        let expr = Expression::with_params(
            "note <> '?' AND tag <> 'it''s ?' AND \"odd?\" = ? AND id = ?",
            vec![Value::from("x"), Value::from(5)],
        );
        assert_eq!(
            g.render_operand(&expr.into(), &mut buf).unwrap(),
            "note <> '?' AND tag <> 'it''s ?' AND \"odd?\" = $1 AND id = $2"
        );
        assert_eq!(buf.param_count(), 2);
    }

    #[test]
    fn empty_expression_is_rejected() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        let err = g
            .render_identifier(&Expression::new("  ").into(), &mut buf)
            .unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::Identifier));
        assert_eq!(buf.param_count(), 0);
    }

    #[test]
    fn subquery_is_parenthesized_and_shares_params() {
        let g = Grammar::default();
        let mut buf = QueryBuffer::new();
        buf.append_text("outer");
        let sub = Request::new("t")
            .columns(["id"])
            .filter(Where::new().eq("a", 1));

        let out = g.render_operand(&sub.into(), &mut buf).unwrap();
        assert_eq!(out, "(SELECT `id`\nFROM `t`\nWHERE `a` = ?)");
        assert_eq!(buf.text(), "outer");
        assert_eq!(buf.parameters(), &[Value::Int(1)]);
    }
}
