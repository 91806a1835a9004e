//! Statement assembly: SELECT/DELETE/UPDATE/INSERT clause layout.

use super::Grammar;
use crate::buffer::QueryBuffer;
use crate::error::{NodeKind, PathSegment, SqlError, SqlResult};
use crate::request::{Assignments, Column, Operand, OrderBy, Request};

impl Grammar {
    /// Assemble a SELECT for `request` into `buf`.
    ///
    /// Clause order: SELECT, FROM, WHERE, GROUP BY, HAVING, unions,
    /// ORDER BY, OFFSET, LIMIT. Empty clauses are omitted.
    pub(crate) fn assemble_select(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<()> {
        let columns = self.render_columns(request, buf)?;
        let keyword = if request.is_distinct() {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        buf.append_clause(keyword, &columns);

        let name = self.render_name(request)?;
        buf.append_clause("FROM", &name);

        self.append_where(request, buf)?;

        if !request.group_by_items().is_empty() {
            let items = request
                .group_by_items()
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    self.render_identifier(item, buf)
                        .map_err(|e| e.within(PathSegment::GroupBy(i)))
                })
                .collect::<SqlResult<Vec<_>>>()?;
            buf.append_clause("GROUP BY", &items.join(&self.dialect.list_separator));
        }

        let having = self.render_condition_tree("HAVING", request.having_tree(), buf, PathSegment::Having)?;
        buf.append_text(&having);

        for (i, union) in request.unions().iter().enumerate() {
            let sub = self
                .render_nested_select(&union.request, buf)
                .map_err(|e| e.within(PathSegment::Union(i)))?;
            buf.append_clause(union.kind.keyword(), &format!("({sub})"));
        }

        self.append_order_by(request, buf)?;
        self.append_limits(request, buf);
        Ok(())
    }

    /// `<name>` or `<name> AS <alias>` when an alias differs from the name.
    pub(crate) fn render_name(&self, request: &Request) -> SqlResult<String> {
        let table = request.table();
        if table.trim().is_empty() {
            return Err(SqlError::contract(NodeKind::Request, "table name cannot be empty"));
        }
        let quoter = self.quoter();
        match request.alias_name() {
            Some(alias) if !alias.trim().is_empty() && alias != table => Ok(format!(
                "{} AS {}",
                quoter.quote_identifier(table),
                quoter.quote_identifier(alias)
            )),
            _ => Ok(quoter.quote_identifier(table)),
        }
    }

    fn render_columns(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<String> {
        let columns = request.selected_columns();
        if columns.is_empty() {
            return Ok("*".to_string());
        }
        let rendered = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.render_column(column, buf)
                    .map_err(|e| e.within(PathSegment::Column(i)))
            })
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(rendered.join(&self.dialect.list_separator))
    }

    fn render_column(&self, column: &Column, buf: &mut QueryBuffer) -> SqlResult<String> {
        let text = self.render_identifier(&column.operand, buf)?;
        match &column.alias {
            Some(alias) => Ok(format!("{text} AS {}", self.quote_name(alias)?)),
            None => Ok(text),
        }
    }

    pub(crate) fn append_where(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<()> {
        let clause = self.render_where("WHERE", request.where_tree(), buf)?;
        buf.append_text(&clause);
        Ok(())
    }

    pub(crate) fn append_order_by(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<()> {
        let items = request.order_by_items();
        if items.is_empty() {
            return Ok(());
        }
        let rendered = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.render_order_item(item, buf)
                    .map_err(|e| e.within(PathSegment::OrderBy(i)))
            })
            .collect::<SqlResult<Vec<_>>>()?;
        buf.append_clause("ORDER BY", &rendered.join(&self.dialect.list_separator));
        Ok(())
    }

    fn render_order_item(&self, item: &OrderBy, buf: &mut QueryBuffer) -> SqlResult<String> {
        match item {
            OrderBy::Column {
                identifier,
                direction,
            } => {
                if identifier.trim().is_empty() {
                    return Err(SqlError::contract(
                        NodeKind::OrderBy,
                        "order by identifier cannot be empty",
                    ));
                }
                let direction = if direction.trim().eq_ignore_ascii_case(&self.dialect.descending) {
                    &self.dialect.descending
                } else {
                    &self.dialect.ascending
                };
                Ok(format!("{} {direction}", self.quoter().quote_identifier(identifier)))
            }
            OrderBy::Operand(operand) => self.render_identifier(operand, buf),
        }
    }

    /// OFFSET then LIMIT, each only when nonzero.
    pub(crate) fn append_limits(&self, request: &Request, buf: &mut QueryBuffer) {
        if request.offset_value() != 0 {
            buf.append_clause("OFFSET", &request.offset_value().to_string());
        }
        if request.limit_value() != 0 {
            buf.append_clause("LIMIT", &request.limit_value().to_string());
        }
    }

    pub(crate) fn assemble_delete(&self, request: &Request, buf: &mut QueryBuffer) -> SqlResult<()> {
        reject_offset(request, "DELETE")?;
        let name = self.render_name(request)?;
        buf.append_clause("DELETE FROM", &name);
        self.append_where(request, buf)?;
        self.append_order_by(request, buf)?;
        self.append_limits(request, buf);
        Ok(())
    }

    pub(crate) fn assemble_update(
        &self,
        set: &Assignments,
        request: &Request,
        buf: &mut QueryBuffer,
    ) -> SqlResult<()> {
        reject_offset(request, "UPDATE")?;
        if set.is_empty() {
            return Err(SqlError::contract(
                NodeKind::Assignment,
                "UPDATE requires at least one assignment",
            ));
        }
        let name = self.render_name(request)?;
        buf.append_clause("UPDATE", &name);

        let assignments = set
            .iter()
            .enumerate()
            .map(|(i, (column, value))| {
                self.render_assignment(column, value, buf)
                    .map_err(|e| e.within(PathSegment::Set(i)))
            })
            .collect::<SqlResult<Vec<_>>>()?;
        buf.append_clause("SET", &assignments.join(&self.dialect.list_separator_multi_line));

        self.append_where(request, buf)?;
        self.append_order_by(request, buf)?;
        self.append_limits(request, buf);
        Ok(())
    }

    fn render_assignment(&self, column: &str, value: &Operand, buf: &mut QueryBuffer) -> SqlResult<String> {
        let column = self.quote_name(column)?;
        let value = self.render_operand(value, buf)?;
        Ok(format!("{column} = {value}"))
    }

    pub(crate) fn assemble_insert(&self, table: &str, set: &Assignments, buf: &mut QueryBuffer) -> SqlResult<()> {
        if set.is_empty() {
            return Err(SqlError::contract(
                NodeKind::Assignment,
                "INSERT requires at least one assignment",
            ));
        }
        let table = self.quote_table(table)?;

        let mut columns = Vec::with_capacity(set.len());
        let mut values = Vec::with_capacity(set.len());
        for (i, (column, value)) in set.iter().enumerate() {
            columns.push(
                self.quote_name(column)
                    .map_err(|e| e.within(PathSegment::Set(i)))?,
            );
            values.push(
                self.render_operand(value, buf)
                    .map_err(|e| e.within(PathSegment::Set(i)))?,
            );
        }

        let separator = &self.dialect.list_separator;
        buf.append_clause("INSERT INTO", &format!("{table} ({})", columns.join(separator)));
        buf.append_clause("VALUES", &format!("({})", values.join(separator)));
        Ok(())
    }

    pub(crate) fn assemble_insert_into(&self, table: &str, request: &Request, buf: &mut QueryBuffer) -> SqlResult<()> {
        let table = self.quote_table(table)?;
        buf.append_clause("INSERT INTO", &table);
        self.assemble_select(request, buf)
    }

    fn quote_table(&self, table: &str) -> SqlResult<String> {
        if table.trim().is_empty() {
            return Err(SqlError::contract(NodeKind::Request, "table name cannot be empty"));
        }
        Ok(self.quoter().quote_identifier(table))
    }
}

fn reject_offset(request: &Request, statement: &str) -> SqlResult<()> {
    if request.offset_value() != 0 {
        return Err(SqlError::contract(
            NodeKind::Request,
            format!("{statement} does not support OFFSET"),
        ));
    }
    Ok(())
}
