//! Record types for the staff directory
//!
//! Two passive shapes populated from query result rows: `Employee`, a flat
//! denormalized projection of the employee-department join, and
//! `Department`, which exposes its columns only through read-only accessors.

use crate::{
    error::{DirectoryError, Result},
    row::{DeclaredQuery, FromRow},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One employee row joined to its department name.
///
/// Fields mirror the select list in [`Employee::COLUMNS`], in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
}

impl Employee {
    /// Select list this type's `FromRow` mapping expects, against the
    /// aliased join `employee e JOIN department d`.
    pub const COLUMNS: &'static str =
        "e.employee_id, e.employee_firstname, e.employee_lastname, d.department_name";
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee[id={}, name={} {}, department={}]",
            self.id, self.first_name, self.last_name, self.department
        )
    }
}

impl FromRow for Employee {
    fn from_row(row: &turso::Row) -> Result<Self> {
        Ok(Self {
            id: row
                .get(0)
                .map_err(|e| DirectoryError::mapping(0, "Employee", e))?,
            first_name: row
                .get(1)
                .map_err(|e| DirectoryError::mapping(1, "Employee", e))?,
            last_name: row
                .get(2)
                .map_err(|e| DirectoryError::mapping(2, "Employee", e))?,
            department: row
                .get(3)
                .map_err(|e| DirectoryError::mapping(3, "Employee", e))?,
        })
    }
}

/// One department row, readable only through accessor methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: i64,
    name: String,
}

impl Department {
    /// Department identifier
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Department name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromRow for Department {
    fn from_row(row: &turso::Row) -> Result<Self> {
        Ok(Self {
            id: row
                .get(0)
                .map_err(|e| DirectoryError::mapping(0, "Department", e))?,
            name: row
                .get(1)
                .map_err(|e| DirectoryError::mapping(1, "Department", e))?,
        })
    }
}

impl DeclaredQuery for Department {
    const SQL: &'static str =
        "SELECT department_id, department_name FROM department ORDER BY department_id";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_display() {
        let employee = Employee {
            id: 1,
            first_name: "Bob".to_string(),
            last_name: "Smith".to_string(),
            department: "Manufacturing".to_string(),
        };

        assert_eq!(
            employee.to_string(),
            "Employee[id=1, name=Bob Smith, department=Manufacturing]"
        );
    }

    #[test]
    fn test_employee_columns_order_matches_fields() {
        let columns: Vec<&str> = Employee::COLUMNS.split(", ").collect();
        assert_eq!(
            columns,
            [
                "e.employee_id",
                "e.employee_firstname",
                "e.employee_lastname",
                "d.department_name"
            ]
        );
    }

    #[test]
    fn test_department_declared_query_selects_accessor_columns() {
        assert!(Department::SQL.starts_with("SELECT department_id, department_name"));
    }

    #[test]
    fn test_employee_serializes_to_json() {
        let employee = Employee {
            id: 7,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            department: "Sales".to_string(),
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["department"], "Sales");
    }
}
