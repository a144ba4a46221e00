//! Type definitions of a low-level SQL string representation.

/// How literal strings are written into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `$1`, `$2`, ... with the values collected in `SQL::params`.
    Positional,
    /// Single-quoted literals written straight into the SQL text.
    Inline,
}

/// A rendered SQL statement.
#[derive(Debug, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
    /// for internal use and tests only
    pub param_index: u64,
    pub style: ParamStyle,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A literal string
    String(String),
}

impl SQL {
    pub fn new() -> SQL {
        SQL::with_style(ParamStyle::Positional)
    }

    pub fn inline() -> SQL {
        SQL::with_style(ParamStyle::Inline)
    }

    fn with_style(style: ParamStyle) -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
            param_index: 0,
            style,
        }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn append_identifier(&mut self, identifier: &str) {
        self.sql.push('"');
        self.sql.push_str(&identifier.replace('"', "\"\""));
        self.sql.push('"');
    }

    pub fn append_param(&mut self, param: Param) {
        match self.style {
            ParamStyle::Positional => {
                self.param_index += 1;
                self.sql.push_str(format!("${}", self.param_index).as_str());
                self.params.push(param);
            }
            ParamStyle::Inline => match param {
                Param::String(s) => {
                    self.sql.push('\'');
                    self.sql.push_str(&s.replace('\'', "''"));
                    self.sql.push('\'');
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_escape_double_quotes() {
        let mut sql = SQL::new();
        sql.append_identifier("we\"ird");
        assert_eq!(sql.sql, "\"we\"\"ird\"");
    }

    #[test]
    fn inline_strings_escape_single_quotes() {
        let mut sql = SQL::inline();
        sql.append_param(Param::String("it's".to_string()));
        assert_eq!(sql.sql, "'it''s'");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn positional_params_are_numbered() {
        let mut sql = SQL::new();
        sql.append_param(Param::String("a".to_string()));
        sql.append_syntax(", ");
        sql.append_param(Param::String("b".to_string()));
        assert_eq!(sql.sql, "$1, $2");
        assert_eq!(sql.param_index, 2);
        assert_eq!(
            sql.params,
            vec![Param::String("a".to_string()), Param::String("b".to_string())]
        );
    }
}
