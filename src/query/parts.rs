//! Clause buffers of a SELECT under construction.

/// SELECT list modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectFormat {
    pub distinct: bool,
    /// `SELECT TOP n`, for engines limiting in the select list
    pub top: Option<u64>,
    /// Replace the select list with `COUNT(*)`
    pub count: bool,
}

impl SelectFormat {
    /// Apply the modifiers to a rendered column list.
    pub fn apply(&self, columns: &str) -> String {
        let mut out = String::new();
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        if let Some(n) = self.top {
            out.push_str(&format!("TOP {} ", n));
        }
        if self.count {
            out.push_str("COUNT(*)");
        } else {
            out.push_str(columns);
        }
        out
    }
}

/// The clause buffers a query accumulates before assembly.
///
/// Conditions are combined left-deep: the second term is appended with the
/// connective, every later term wraps what came before in parentheses.
#[derive(Debug, Clone, Default)]
pub struct QueryParts {
    pub table_name: String,
    pub from_clause: String,
    pub columns: String,
    pub where_clause: String,
    /// Row-limiting condition ANDed onto the finished WHERE clause
    pub row_window: String,
    pub group_by_clause: String,
    pub having_clause: String,
    pub order_by_clause: String,
    pub select_format: SelectFormat,
    pub end_clause: String,
    where_terms: usize,
    having_terms: usize,
}

fn combine(buffer: &mut String, terms: &mut usize, connective: &str, fragment: &str) {
    *buffer = match *terms {
        0 => fragment.to_string(),
        1 => format!("{} {} {}", buffer, connective, fragment),
        _ => format!("({}) {} {}", buffer, connective, fragment),
    };
    *terms += 1;
}

fn append_list(buffer: &mut String, fragment: &str) {
    if !buffer.is_empty() {
        buffer.push_str(", ");
    }
    buffer.push_str(fragment);
}

impl QueryParts {
    pub fn new(table_name: impl Into<String>, from_clause: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            from_clause: from_clause.into(),
            ..Self::default()
        }
    }

    pub fn and_where(&mut self, fragment: &str) {
        combine(&mut self.where_clause, &mut self.where_terms, "AND", fragment);
    }

    pub fn or_where(&mut self, fragment: &str) {
        combine(&mut self.where_clause, &mut self.where_terms, "OR", fragment);
    }

    pub fn and_having(&mut self, fragment: &str) {
        combine(&mut self.having_clause, &mut self.having_terms, "AND", fragment);
    }

    pub fn push_column(&mut self, fragment: &str) {
        append_list(&mut self.columns, fragment);
    }

    pub fn push_group_by(&mut self, fragment: &str) {
        append_list(&mut self.group_by_clause, fragment);
    }

    pub fn push_order_by(&mut self, fragment: &str) {
        append_list(&mut self.order_by_clause, fragment);
    }

    /// WHERE body with the row window applied to everything before it.
    fn where_body(&self) -> String {
        match (self.where_clause.trim().is_empty(), self.row_window.trim().is_empty()) {
            (_, true) => self.where_clause.clone(),
            (true, false) => self.row_window.clone(),
            (false, false) if self.where_terms > 1 => {
                format!("({}) AND {}", self.where_clause, self.row_window)
            }
            (false, false) => format!("{} AND {}", self.where_clause, self.row_window),
        }
    }

    /// Assemble the final statement. Empty buffers are skipped.
    ///
    /// `default_order_by` fills ORDER BY when an end clause needs one and none was given.
    pub fn assemble(&self, default_order_by: Option<&str>) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.select_format.apply(&self.columns),
            self.from_clause
        );

        let where_body = self.where_body();
        let clauses = [
            ("WHERE", &where_body),
            ("GROUP BY", &self.group_by_clause),
            ("HAVING", &self.having_clause),
        ];
        for (keyword, body) in clauses {
            if !body.trim().is_empty() {
                sql.push_str(&format!(" {} {}", keyword, body));
            }
        }

        let has_end = !self.end_clause.trim().is_empty();
        if !self.order_by_clause.trim().is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by_clause));
        } else if let (true, Some(order)) = (has_end, default_order_by) {
            sql.push_str(&format!(" ORDER BY {}", order));
        }

        if has_end {
            sql.push(' ');
            sql.push_str(&self.end_clause);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_where_combination_is_left_deep() {
        let mut parts = QueryParts::new("T", "T");
        parts.and_where("(a)");
        assert_eq!(parts.where_clause, "(a)");
        parts.and_where("(b)");
        assert_eq!(parts.where_clause, "(a) AND (b)");
        parts.or_where("(c)");
        assert_eq!(parts.where_clause, "((a) AND (b)) OR (c)");
    }

    #[test]
    fn test_row_window_wraps_whole_where() {
        let mut parts = QueryParts::new("T", "T");
        parts.push_column("T.a");
        parts.row_window = "(ROWNUM <= :p0)".into();
        assert_eq!(parts.assemble(None), "SELECT T.a FROM T WHERE (ROWNUM <= :p0)");

        parts.and_where("(a)");
        assert_eq!(parts.assemble(None), "SELECT T.a FROM T WHERE (a) AND (ROWNUM <= :p0)");

        parts.or_where("(b)");
        assert_eq!(
            parts.assemble(None),
            "SELECT T.a FROM T WHERE ((a) OR (b)) AND (ROWNUM <= :p0)"
        );
    }

    #[test]
    fn test_assemble_skips_empty_clauses() {
        let mut parts = QueryParts::new("T", "T");
        parts.push_column("T.a");
        parts.push_column("T.b");
        assert_eq!(parts.assemble(None), "SELECT T.a, T.b FROM T");

        parts.push_group_by("T.a");
        parts.and_having("(COUNT(*) > @p0)");
        parts.push_order_by("T.a DESC");
        parts.end_clause = "LIMIT 5".into();
        assert_eq!(
            parts.assemble(None),
            "SELECT T.a, T.b FROM T GROUP BY T.a HAVING (COUNT(*) > @p0) ORDER BY T.a DESC LIMIT 5"
        );
    }

    #[test]
    fn test_default_order_only_with_end_clause() {
        let mut parts = QueryParts::new("T", "T");
        parts.push_column("*");
        assert_eq!(parts.assemble(Some("(SELECT NULL)")), "SELECT * FROM T");

        parts.end_clause = "OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY".into();
        assert_eq!(
            parts.assemble(Some("(SELECT NULL)")),
            "SELECT * FROM T ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn test_select_format() {
        let format = SelectFormat {
            distinct: true,
            top: Some(3),
            count: false,
        };
        assert_eq!(format.apply("a"), "DISTINCT TOP 3 a");

        let count = SelectFormat {
            count: true,
            ..SelectFormat::default()
        };
        assert_eq!(count.apply("a, b"), "COUNT(*)");
    }
}
