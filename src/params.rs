//! Named-parameter binding for staff-db
//!
//! The driver binds positionally, so `:name` placeholders are expanded here:
//! [`NamedParams::bind`] rewrites a statement's named placeholders to `?`
//! and returns the values in placeholder order, ready for
//! `turso::params_from_iter`. Values travel as strings; SQLite column
//! affinity performs numeric coercion on the database side.

use crate::error::{DirectoryError, Result};

/// An ordered set of named parameter values
#[derive(Debug, Clone, Default)]
pub struct NamedParams {
    params: Vec<(String, String)>,
}

impl NamedParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Number of named values in the set
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Expand `:name` placeholders in `sql` into positional `?` placeholders.
    ///
    /// Returns the rewritten statement plus the bound values in placeholder
    /// order. Placeholders inside quoted SQL text (`'...'` or `"..."`, with
    /// doubled-quote escapes) are left untouched. A placeholder with no
    /// matching value, or a value never used by the statement, is an error.
    pub fn bind(&self, sql: &str) -> Result<(String, Vec<String>)> {
        let mut statement = String::with_capacity(sql.len());
        let mut values = Vec::new();
        let mut used = vec![false; self.params.len()];

        let mut chars = sql.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\'' | '"' => {
                    statement.push(c);
                    while let Some(inner) = chars.next() {
                        statement.push(inner);
                        if inner == c {
                            // A doubled quote is an escape, not the end of the literal
                            if chars.peek() == Some(&c) {
                                chars.next();
                                statement.push(c);
                            } else {
                                break;
                            }
                        }
                    }
                }
                ':' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            name.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }

                    if name.is_empty() {
                        statement.push(':');
                        continue;
                    }

                    match self.params.iter().position(|(key, _)| *key == name) {
                        Some(index) => {
                            used[index] = true;
                            values.push(self.params[index].1.clone());
                            statement.push('?');
                        }
                        None => {
                            return Err(DirectoryError::binding(format!(
                                "no value provided for placeholder ':{name}'"
                            )));
                        }
                    }
                }
                _ => statement.push(c),
            }
        }

        for (index, (name, _)) in self.params.iter().enumerate() {
            if !used[index] {
                return Err(DirectoryError::binding(format!(
                    "parameter '{name}' does not appear in the statement"
                )));
            }
        }

        Ok((statement, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let params = NamedParams::new().with("department", "Sales");
        let (sql, values) = params
            .bind("SELECT * FROM employee WHERE department_id = :department")
            .unwrap();

        assert_eq!(sql, "SELECT * FROM employee WHERE department_id = ?");
        assert_eq!(values, ["Sales"]);
    }

    #[test]
    fn test_placeholders_bound_in_statement_order() {
        let params = NamedParams::new()
            .with("last", "Smith")
            .with("first", "Bob");
        let (sql, values) = params
            .bind("SELECT * FROM employee WHERE employee_firstname = :first AND employee_lastname = :last")
            .unwrap();

        assert_eq!(
            sql,
            "SELECT * FROM employee WHERE employee_firstname = ? AND employee_lastname = ?"
        );
        assert_eq!(values, ["Bob", "Smith"]);
    }

    #[test]
    fn test_repeated_placeholder_binds_each_occurrence() {
        let params = NamedParams::new().with("name", "Manufacturing");
        let (sql, values) = params
            .bind("SELECT :name WHERE department_name = :name")
            .unwrap();

        assert_eq!(sql, "SELECT ? WHERE department_name = ?");
        assert_eq!(values, ["Manufacturing", "Manufacturing"]);
    }

    #[test]
    fn test_quoted_text_is_skipped() {
        let params = NamedParams::new().with("id", "3");
        let (sql, values) = params
            .bind("SELECT ':not_a_param' AS label FROM department WHERE department_id = :id")
            .unwrap();

        assert_eq!(
            sql,
            "SELECT ':not_a_param' AS label FROM department WHERE department_id = ?"
        );
        assert_eq!(values, ["3"]);
    }

    #[test]
    fn test_doubled_quote_escape_stays_inside_literal() {
        let params = NamedParams::new().with("id", "1");
        let (sql, values) = params
            .bind("SELECT 'it''s :quoted' FROM department WHERE department_id = :id")
            .unwrap();

        assert_eq!(sql, "SELECT 'it''s :quoted' FROM department WHERE department_id = ?");
        assert_eq!(values, ["1"]);
    }

    #[test]
    fn test_unknown_placeholder_is_an_error() {
        let params = NamedParams::new().with("department", "Sales");
        let result = params.bind("SELECT * FROM employee WHERE department_id = :dept");

        assert!(result.is_err());
    }

    #[test]
    fn test_unused_parameter_is_an_error() {
        let params = NamedParams::new()
            .with("department", "Sales")
            .with("extra", "unused");
        let result = params.bind("SELECT * FROM employee WHERE department_id = :department");

        assert!(result.is_err());
    }

    #[test]
    fn test_bare_colon_passes_through() {
        let params = NamedParams::new().with("id", "1");
        let (sql, _) = params
            .bind("SELECT ': ' FROM department WHERE department_id = :id")
            .unwrap();

        assert_eq!(sql, "SELECT ': ' FROM department WHERE department_id = ?");
    }

    #[test]
    fn test_empty_set_on_plain_statement() {
        let params = NamedParams::new();
        assert!(params.is_empty());

        let (sql, values) = params.bind("SELECT * FROM department").unwrap();
        assert_eq!(sql, "SELECT * FROM department");
        assert!(values.is_empty());
    }
}
