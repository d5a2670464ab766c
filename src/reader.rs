//! Database reader module for staff-db
//!
//! Provides the read-only query surface the demo scenarios drive: plain
//! selects with manual field extraction, trait-driven mapping via
//! [`FromRow`], declared queries, and named-parameter binding.

use crate::{
    error::{DirectoryError, Result},
    model::{Department, Employee},
    params::NamedParams,
    row::{DeclaredQuery, FromRow},
};
use tracing::{debug, info};

/// Database reader for the staff directory
pub struct DirectoryReader {
    conn: turso::Connection,
}

impl DirectoryReader {
    /// Create a new directory reader with an existing connection
    pub fn new(conn: turso::Connection) -> Self {
        Self { conn }
    }

    /// Create a new directory reader from configuration
    pub async fn from_config(config: crate::DatabaseConfig) -> Result<Self> {
        let db = turso::Builder::new_local(&config.path)
            .build()
            .await
            .map_err(|e| {
                DirectoryError::connection_with_source(
                    format!("Failed to open database: {}", config.path),
                    e,
                )
            })?;

        let conn = db.connect().map_err(|e| {
            DirectoryError::connection_with_source("Failed to establish database connection", e)
        })?;

        Ok(Self { conn })
    }

    /// Find employees whose first name matches a LIKE pattern.
    ///
    /// Manual field-by-field extraction; the demo drives this with
    /// "Barbara" to show the empty result set.
    pub async fn employees_matching_first_name(&self, pattern: &str) -> Result<Vec<Employee>> {
        let query = "SELECT e.employee_id, e.employee_firstname, e.employee_lastname, d.department_name
             FROM employee e JOIN department d ON e.department_id = d.department_id
             WHERE e.employee_firstname LIKE ?";

        debug!("[DB] Querying employees by first name pattern: {query}");

        let mut rows = self
            .conn
            .query(query, [pattern])
            .await
            .map_err(|e| DirectoryError::query(query, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(query, e))?
        {
            employees.push(Employee {
                id: row.get(0).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get employee id", e)
                })?,
                first_name: row.get(1).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get first name", e)
                })?,
                last_name: row.get(2).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get last name", e)
                })?,
                department: row.get(3).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get department name", e)
                })?,
            });
        }

        info!(
            "[DB] Retrieved {} employees matching first name '{}'",
            employees.len(),
            pattern
        );
        Ok(employees)
    }

    /// Get every employee joined to its department name
    pub async fn all_employees(&self) -> Result<Vec<Employee>> {
        let query = "SELECT e.employee_id, e.employee_firstname, e.employee_lastname, d.department_name
             FROM employee e JOIN department d ON e.department_id = d.department_id
             ORDER BY e.employee_id";

        debug!("[DB] Querying all employees: {query}");

        let mut rows = self
            .conn
            .query(query, ())
            .await
            .map_err(|e| DirectoryError::query(query, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(query, e))?
        {
            employees.push(Employee {
                id: row.get(0).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get employee id", e)
                })?,
                first_name: row.get(1).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get first name", e)
                })?,
                last_name: row.get(2).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get last name", e)
                })?,
                department: row.get(3).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get department name", e)
                })?,
            });
        }

        info!("[DB] Retrieved {} employees", employees.len());
        Ok(employees)
    }

    /// Get all employees of one department by department name
    pub async fn employees_in_department(&self, name: &str) -> Result<Vec<Employee>> {
        let query = "SELECT e.employee_id, e.employee_firstname, e.employee_lastname, d.department_name
             FROM employee e JOIN department d ON e.department_id = d.department_id
             WHERE d.department_name = ?
             ORDER BY e.employee_id";

        debug!("[DB] Querying employees by department: {query}");

        let mut rows = self
            .conn
            .query(query, [name])
            .await
            .map_err(|e| DirectoryError::query(query, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(query, e))?
        {
            employees.push(Employee {
                id: row.get(0).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get employee id", e)
                })?,
                first_name: row.get(1).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get first name", e)
                })?,
                last_name: row.get(2).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get last name", e)
                })?,
                department: row.get(3).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get department name", e)
                })?,
            });
        }

        info!(
            "[DB] Retrieved {} employees in department '{}'",
            employees.len(),
            name
        );
        Ok(employees)
    }

    /// Find employees by exact first and last name, extracted manually
    pub async fn employee_by_name(&self, first: &str, last: &str) -> Result<Vec<Employee>> {
        let query = "SELECT e.employee_id, e.employee_firstname, e.employee_lastname, d.department_name
             FROM employee e JOIN department d ON e.department_id = d.department_id
             WHERE e.employee_firstname = ? AND e.employee_lastname = ?";

        debug!("[DB] Querying employee by name: {query}");

        let mut rows = self
            .conn
            .query(query, [first, last])
            .await
            .map_err(|e| DirectoryError::query(query, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(query, e))?
        {
            employees.push(Employee {
                id: row.get(0).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get employee id", e)
                })?,
                first_name: row.get(1).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get first name", e)
                })?,
                last_name: row.get(2).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get last name", e)
                })?,
                department: row.get(3).map_err(|e| {
                    DirectoryError::generic_with_source("Failed to get department name", e)
                })?,
            });
        }

        info!(
            "[DB] Retrieved {} employees named '{} {}'",
            employees.len(),
            first,
            last
        );
        Ok(employees)
    }

    /// Same query as [`employee_by_name`](Self::employee_by_name), mapped
    /// through [`Employee::from_row`] instead of manual extraction
    pub async fn employee_by_name_mapped(&self, first: &str, last: &str) -> Result<Vec<Employee>> {
        let query = format!(
            "SELECT {} FROM employee e JOIN department d ON e.department_id = d.department_id
             WHERE e.employee_firstname = ? AND e.employee_lastname = ?",
            Employee::COLUMNS
        );

        debug!("[DB] Querying employee by name (mapped): {query}");

        let mut rows = self
            .conn
            .query(&query, [first, last])
            .await
            .map_err(|e| DirectoryError::query(&query, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(&query, e))?
        {
            employees.push(Employee::from_row(&row)?);
        }

        info!(
            "[DB] Retrieved {} mapped employees named '{} {}'",
            employees.len(),
            first,
            last
        );
        Ok(employees)
    }

    /// Get all departments, mapped through [`Department::from_row`]
    pub async fn all_departments(&self) -> Result<Vec<Department>> {
        let query = "SELECT department_id, department_name FROM department ORDER BY department_id";

        debug!("[DB] Querying all departments: {query}");

        let mut rows = self
            .conn
            .query(query, ())
            .await
            .map_err(|e| DirectoryError::query(query, e))?;

        let mut departments = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(query, e))?
        {
            departments.push(Department::from_row(&row)?);
        }

        info!("[DB] Retrieved {} departments", departments.len());
        Ok(departments)
    }

    /// Run the SELECT a [`DeclaredQuery`] type carries as metadata, with no
    /// caller-side query text
    pub async fn fetch_declared<T: DeclaredQuery>(&self) -> Result<Vec<T>> {
        debug!("[DB] Running declared query: {}", T::SQL);

        let mut rows = self
            .conn
            .query(T::SQL, ())
            .await
            .map_err(|e| DirectoryError::query(T::SQL, e))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(T::SQL, e))?
        {
            results.push(T::from_row(&row)?);
        }

        info!("[DB] Retrieved {} rows from declared query", results.len());
        Ok(results)
    }

    /// Run the employee join with a caller-supplied WHERE clause whose
    /// `:name` placeholders are bound from `params`
    pub async fn employees_where(
        &self,
        clause: &str,
        params: &NamedParams,
    ) -> Result<Vec<Employee>> {
        let query = format!(
            "SELECT {} FROM employee e JOIN department d ON e.department_id = d.department_id
             WHERE {clause}
             ORDER BY e.employee_id",
            Employee::COLUMNS
        );

        let (statement, values) = params.bind(&query)?;

        debug!("[DB] Querying employees with bound clause: {statement}");
        debug!("[DB] Query params: {values:?}");

        let mut rows = self
            .conn
            .query(&statement, turso::params_from_iter(values))
            .await
            .map_err(|e| DirectoryError::query(&statement, e))?;

        let mut employees = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(&statement, e))?
        {
            employees.push(Employee::from_row(&row)?);
        }

        info!(
            "[DB] Retrieved {} employees for clause '{}'",
            employees.len(),
            clause
        );
        Ok(employees)
    }

    /// Get the underlying connection for advanced operations
    pub fn connection(&self) -> &turso::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseConfig, DirectoryWriter};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reader_creation() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("test.db");
        let config = DatabaseConfig::new(db_path.to_string_lossy());

        // Create and seed the database first
        let writer = DirectoryWriter::new(config.clone()).await?;
        writer.seed_sample_staff().await?;

        // Create reader from its own connection
        let reader = DirectoryReader::from_config(config).await?;
        let employees = reader.all_employees().await?;

        assert_eq!(employees.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_manual_and_mapped_extraction_agree() -> Result<()> {
        let config = DatabaseConfig::new(":memory:");
        let writer = DirectoryWriter::new(config).await?;
        writer.seed_sample_staff().await?;

        let reader = DirectoryReader::new(writer.connection().clone());
        let manual = reader.employee_by_name("Bob", "Smith").await?;
        let mapped = reader.employee_by_name_mapped("Bob", "Smith").await?;

        assert_eq!(manual, mapped);
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].department, "Manufacturing");
        Ok(())
    }
}
