//! Identifier quoting.
//!
//! A string is treated as a bare identifier path (`schema.table.column`) when,
//! after trimming, it contains none of the [`EXPRESSION_TERMINALS`]. Anything
//! else is assumed to be a ready-made SQL expression and is left untouched.

use crate::dialect::Dialect;

/// Characters that cannot appear in a bare identifier.
pub const EXPRESSION_TERMINALS: &str = "\n\r\t '\"`()[]+-*/<>!=&|^,?@";

/// Whether `s` (already trimmed) contains no terminal character.
pub fn is_bare_identifier(s: &str) -> bool {
    !s.contains(|c| EXPRESSION_TERMINALS.contains(c))
}

/// Applies a dialect's identifier quoting.
#[derive(Debug, Clone, Copy)]
pub struct Quoter<'a> {
    dialect: &'a Dialect,
}

impl<'a> Quoter<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    /// Quote every segment of a bare identifier path.
    ///
    /// Segments that already start with the opening quote are kept as they
    /// are. Strings containing terminal characters are returned unmodified.
    /// An empty identifier yields an empty quoted pair.
    pub fn quote_identifier(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if !is_bare_identifier(trimmed) {
            return raw.to_string();
        }

        let open = &self.dialect.identifier_quote_open;
        let close = &self.dialect.identifier_quote_close;
        let separator = &self.dialect.identifier_separator;

        let mut out = String::with_capacity(trimmed.len() + 2);
        for (i, segment) in trimmed.split(separator.as_str()).enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            if segment.starts_with(open.as_str()) {
                out.push_str(segment);
            } else {
                out.push_str(open);
                out.push_str(segment);
                out.push_str(close);
            }
        }
        out
    }

    /// Quote `raw` if it is a bare identifier, otherwise return it unmodified.
    pub fn quote_expression(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if is_bare_identifier(trimmed) {
            self.quote_identifier(trimmed)
        } else {
            raw.to_string()
        }
    }

    /// Quote a list of identifiers: one element renders bare, more render as
    /// a parenthesized list.
    pub fn quote_identifier_list<S: AsRef<str>>(&self, identifiers: &[S]) -> String {
        match identifiers {
            [single] => self.quote_identifier(single.as_ref()),
            _ => {
                let quoted: Vec<String> = identifiers
                    .iter()
                    .map(|s| self.quote_identifier(s.as_ref()))
                    .collect();
                format!("({})", quoted.join(&self.dialect.list_separator))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mysql() -> Dialect {
        Dialect::mysql()
    }

    #[test]
    fn dotted_path_quotes_each_segment() {
        let d = mysql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_identifier("a.b"), "`a`.`b`");
        assert_eq!(q.quote_identifier("  users  "), "`users`");
    }

    #[test]
    fn expression_with_terminals_is_untouched() {
        let d = mysql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_expression("a = 1"), "a = 1");
        assert_eq!(q.quote_expression("COUNT(*)"), "COUNT(*)");
        assert_eq!(q.quote_identifier("COUNT(*)"), "COUNT(*)");
    }

    #[test]
    fn expression_without_terminals_is_quoted() {
        let d = mysql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_expression("a"), "`a`");
        assert_eq!(q.quote_expression(" users.id "), "`users`.`id`");
    }

    #[test]
    fn empty_identifier_is_empty_quoted_pair() {
        let d = mysql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_identifier(""), "``");
        assert_eq!(q.quote_identifier("   "), "``");
    }

    #[test]
    fn bracket_dialect_uses_distinct_close_quote() {
        let d = Dialect::mssql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_identifier("dbo.users"), "[dbo].[users]");
    }

    #[test]
    fn pre_quoted_segment_passes_through() {
        // `~` is not a terminal, so a `~`-quoted dialect can see pre-quoted input.
        let d = Dialect::mysql().with_quotes("~", "~");
        let q = Quoter::new(&d);
        assert_eq!(q.quote_identifier("~Weird Name~.id").as_str(), "~Weird Name~.id");
        assert_eq!(q.quote_identifier("~schema~.id"), "~schema~.~id~");
    }

    #[test]
    fn identifier_list_collapses_single_element() {
        let d = mysql();
        let q = Quoter::new(&d);
        assert_eq!(q.quote_identifier_list(&["id"]), "`id`");
        assert_eq!(q.quote_identifier_list(&["a", "b"]), "(`a`, `b`)");
    }

    #[test]
    fn terminal_classification() {
        assert!(is_bare_identifier("users.id"));
        assert!(is_bare_identifier("snake_case$1"));
        assert!(!is_bare_identifier("a b"));
        assert!(!is_bare_identifier("x?"));
        assert!(!is_bare_identifier("@var"));
    }
}
