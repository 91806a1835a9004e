//! Condition-tree rendering.

use super::Grammar;
use crate::buffer::QueryBuffer;
use crate::error::{NodeKind, PathSegment, SqlError, SqlResult};
use crate::request::{Operand, Tag, TagKind, Where};

impl Grammar {
    /// Render `tree` as `"<prefix> <tags>\n"`, or an empty string when the
    /// tree has no tags.
    ///
    /// Tags after the first are preceded by `"\n\t <JOIN> "` using the tag's
    /// own join operator. An empty `prefix` renders the body alone.
    pub fn render_where(&self, prefix: &str, tree: &Where, buf: &mut QueryBuffer) -> SqlResult<String> {
        self.render_condition_tree(prefix, tree, buf, PathSegment::Where)
    }

    pub(crate) fn render_condition_tree(
        &self,
        prefix: &str,
        tree: &Where,
        buf: &mut QueryBuffer,
        segment: fn(usize) -> PathSegment,
    ) -> SqlResult<String> {
        if tree.is_empty() {
            return Ok(String::new());
        }

        let mut out = String::new();
        if !prefix.is_empty() {
            out.push_str(prefix);
            out.push(' ');
        }
        for (index, tag) in tree.tags().iter().enumerate() {
            if index > 0 {
                out.push_str("\n\t ");
                out.push_str(tag.join().keyword());
                out.push(' ');
            }
            let fragment = self
                .render_tag(tag, buf, segment)
                .map_err(|e| e.within(segment(index)))?;
            out.push_str(&fragment);
        }
        out.push('\n');
        Ok(out)
    }

    fn render_tag(
        &self,
        tag: &Tag,
        buf: &mut QueryBuffer,
        segment: fn(usize) -> PathSegment,
    ) -> SqlResult<String> {
        let not = if tag.is_negated() { "NOT " } else { "" };
        match tag.kind() {
            TagKind::Compare {
                left,
                operator,
                right,
            } => {
                check_operator(operator)?;
                let left = self.render_operand(left, buf)?;
                let right = self.render_operand(right, buf)?;
                Ok(format!("{not}{left} {operator} {right}"))
            }
            TagKind::Between {
                identifier,
                min,
                max,
            } => {
                let identifier = self.render_identifier(identifier, buf)?;
                let min = self.render_operand(min, buf)?;
                let max = self.render_operand(max, buf)?;
                Ok(format!("{identifier} {not}BETWEEN {min} AND {max}"))
            }
            TagKind::In { identifier, values } => {
                let mark = buf.param_count();
                let identifier = self.render_identifier(identifier, buf)?;
                if matches!(values, Operand::List(items) if items.is_empty()) {
                    // Nothing can match an empty set.
                    buf.truncate_params(mark);
                    return Ok(if tag.is_negated() { "1=1" } else { "1=0" }.to_string());
                }
                let values = match values {
                    Operand::List(_) | Operand::Request(_) => self.render_operand(values, buf)?,
                    single => format!("({})", self.render_operand(single, buf)?),
                };
                Ok(format!("{identifier} {not}IN {values}"))
            }
            TagKind::Null { identifier } => {
                let identifier = self.render_identifier(identifier, buf)?;
                let keyword = if tag.is_negated() {
                    "IS NULL"
                } else {
                    "IS NOT NULL"
                };
                Ok(format!("{identifier} {keyword}"))
            }
            TagKind::Exists { request } => {
                let sub = self
                    .render_nested_select(request, buf)
                    .map_err(|e| e.within(PathSegment::Subquery))?;
                Ok(format!("{not}EXISTS({sub})"))
            }
            TagKind::Nested { group } => {
                if group.is_empty() {
                    return Err(SqlError::contract(
                        NodeKind::Nested,
                        "nested group has no conditions",
                    ));
                }
                let inner = self.render_condition_tree("", group, buf, segment)?;
                Ok(format!("{not}(\n\t{})", inner.trim_end()))
            }
        }
    }
}

fn check_operator(operator: &str) -> SqlResult<()> {
    let op = operator.trim();
    if op.is_empty() {
        return Err(SqlError::contract(NodeKind::Compare, "operator cannot be empty"));
    }
    let forbidden = op.contains([';', '\'', '"', '`']) || op.contains("--") || op.contains("/*");
    if forbidden {
        return Err(SqlError::contract(
            NodeKind::Compare,
            format!("invalid operator '{op}'"),
        ));
    }
    Ok(())
}
