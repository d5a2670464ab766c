//! Database writer module for staff-db
//!
//! Provides the DirectoryWriter struct: connection setup, schema
//! initialization, sample-data seeding, and the write operations the demo
//! sequences compose (insert-then-select, update-then-select, and explicit
//! BEGIN/COMMIT/ROLLBACK).

use crate::{
    config::DatabaseConfig,
    error::{DirectoryError, Result},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};
use turso::{Builder, Connection};

/// Summary statistics for a directory database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total_employees: i64,
    pub total_departments: i64,
    pub database_size_bytes: Option<u64>,
    pub last_updated: String,
}

/// Sample departments installed by [`DirectoryWriter::seed_sample_staff`]
const SAMPLE_DEPARTMENTS: [(i64, &str); 4] = [
    (1, "Manufacturing"),
    (2, "Accounting"),
    (3, "Sales"),
    (4, "Shipping"),
];

/// Sample employees installed by [`DirectoryWriter::seed_sample_staff`].
/// Deliberately contains no "Barbara": the demo's empty-result query runs
/// before she is hired by the insert-then-select sequence.
const SAMPLE_EMPLOYEES: [(&str, &str, i64); 5] = [
    ("Bob", "Smith", 1),
    ("Todd", "Hall", 1),
    ("Mary", "Jones", 2),
    ("Jane", "Doe", 3),
    ("Frank", "Wright", 4),
];

/// Main database writer for the staff directory
pub struct DirectoryWriter {
    pub conn: Connection,
    pub config: DatabaseConfig,
}

impl DirectoryWriter {
    /// Create a new directory writer with the given configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        info!(
            "[DB] Creating database connection to: {}",
            config.database_type()
        );

        // Ensure database directory exists
        if !config.is_memory() {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        DirectoryError::filesystem(parent.to_string_lossy(), e)
                    })?;
                }
            }
        }

        let db = Builder::new_local(&config.path).build().await.map_err(|e| {
            DirectoryError::connection_with_source(
                format!("Failed to create database: {}", config.path),
                e,
            )
        })?;

        let conn = db.connect().map_err(|e| {
            DirectoryError::connection_with_source("Failed to establish database connection", e)
        })?;

        let writer = Self { conn, config };

        // Initialize database schema
        writer.initialize_schema().await?;

        Ok(writer)
    }

    /// Initialize database schema with all necessary tables and indexes
    async fn initialize_schema(&self) -> Result<()> {
        info!("[DB] Initializing staff directory schema");

        let tables = [
            "CREATE TABLE IF NOT EXISTS department (
                department_id INTEGER PRIMARY KEY,
                department_name TEXT NOT NULL UNIQUE
            )",
            "CREATE TABLE IF NOT EXISTS employee (
                employee_id INTEGER PRIMARY KEY,
                employee_firstname TEXT NOT NULL,
                employee_lastname TEXT NOT NULL,
                department_id INTEGER NOT NULL,
                FOREIGN KEY (department_id) REFERENCES department (department_id)
            )",
        ];

        for table in tables.iter() {
            self.conn
                .execute(table, ())
                .await
                .map_err(|_e| DirectoryError::schema("Failed to create table"))?;
        }

        let indexes = [
            "CREATE INDEX IF NOT EXISTS idx_employee_department_id ON employee(department_id)",
            "CREATE INDEX IF NOT EXISTS idx_employee_name ON employee(employee_firstname, employee_lastname)",
        ];

        for index in indexes.iter() {
            self.conn
                .execute(index, ())
                .await
                .map_err(|_e| DirectoryError::schema("Failed to create index"))?;
        }

        info!("[DB] Staff directory schema initialized successfully");
        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get database configuration
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Reset both tables to the fixed sample cast.
    ///
    /// Clears employees and departments and re-inserts the same four
    /// departments and five employees, so repeated demo runs against a
    /// file-backed database start from identical state.
    pub async fn seed_sample_staff(&self) -> Result<()> {
        info!("[DB] Seeding sample staff data");

        for statement in ["DELETE FROM employee", "DELETE FROM department"] {
            self.conn
                .execute(statement, ())
                .await
                .map_err(|e| DirectoryError::query(statement, e))?;
        }

        let insert_department =
            "INSERT INTO department (department_id, department_name) VALUES (?, ?)";
        for (id, name) in SAMPLE_DEPARTMENTS {
            self.conn
                .execute(insert_department, [id.to_string(), name.to_string()])
                .await
                .map_err(|e| DirectoryError::query(insert_department, e))?;
        }

        let insert_employee = "INSERT INTO employee (employee_firstname, employee_lastname, department_id) VALUES (?, ?, ?)";
        for (first, last, department_id) in SAMPLE_EMPLOYEES {
            self.conn
                .execute(
                    insert_employee,
                    [first.to_string(), last.to_string(), department_id.to_string()],
                )
                .await
                .map_err(|e| DirectoryError::query(insert_employee, e))?;
        }

        info!(
            "[DB] Seeded {} departments and {} employees",
            SAMPLE_DEPARTMENTS.len(),
            SAMPLE_EMPLOYEES.len()
        );
        Ok(())
    }

    /// Resolve a department name to its id
    pub async fn department_id(&self, name: &str) -> Result<i64> {
        let select = "SELECT department_id FROM department WHERE department_name = ?";

        let mut rows = self
            .conn
            .query(select, [name])
            .await
            .map_err(|e| DirectoryError::query(select, e))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(select, e))?
        {
            row.get(0).map_err(|e| {
                DirectoryError::generic_with_source("Failed to parse department id", e)
            })
        } else {
            Err(DirectoryError::generic(format!(
                "No department named {name}"
            )))
        }
    }

    /// Insert a new employee into the named department and return the
    /// assigned employee id, re-queried by name after the insert.
    pub async fn hire_employee(&self, first: &str, last: &str, department: &str) -> Result<i64> {
        let department_id = self.department_id(department).await?;

        let insert = "INSERT INTO employee (employee_firstname, employee_lastname, department_id)
             VALUES (?, ?, ?)";

        self.conn
            .execute(
                insert,
                [first.to_string(), last.to_string(), department_id.to_string()],
            )
            .await
            .map_err(|e| DirectoryError::query(insert, e))?;

        let select = "SELECT employee_id FROM employee
             WHERE employee_firstname = ? AND employee_lastname = ?
             ORDER BY employee_id DESC LIMIT 1";

        let mut rows = self
            .conn
            .query(select, [first, last])
            .await
            .map_err(|e| DirectoryError::query(select, e))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(select, e))?
        {
            let id: i64 = row.get(0).map_err(|e| {
                DirectoryError::generic_with_source("Failed to parse assigned employee id", e)
            })?;
            info!("[DB] Hired {first} {last} into {department} as employee {id}");
            Ok(id)
        } else {
            Err(DirectoryError::generic(format!(
                "Inserted employee {first} {last} not found on re-query"
            )))
        }
    }

    /// Move one employee to another department, returning the affected count
    pub async fn transfer_employee(
        &self,
        first: &str,
        last: &str,
        department: &str,
    ) -> Result<u64> {
        let department_id = self.department_id(department).await?;

        let update = "UPDATE employee
             SET department_id = ?
             WHERE employee_firstname = ? AND employee_lastname = ?";

        let affected = self
            .conn
            .execute(
                update,
                [department_id.to_string(), first.to_string(), last.to_string()],
            )
            .await
            .map_err(|e| DirectoryError::query(update, e))?;

        if affected == 0 {
            warn!("[DB] Transfer matched no employee named {first} {last}");
        } else {
            info!("[DB] Transferred {first} {last} to {department}");
        }

        Ok(affected)
    }

    /// Move every employee of one department to another, returning the
    /// affected count. Intended to run inside an explicit transaction.
    pub async fn move_department_staff(&self, from: &str, to: &str) -> Result<u64> {
        let from_id = self.department_id(from).await?;
        let to_id = self.department_id(to).await?;

        let update = "UPDATE employee SET department_id = ? WHERE department_id = ?";

        let affected = self
            .conn
            .execute(update, [to_id.to_string(), from_id.to_string()])
            .await
            .map_err(|e| DirectoryError::query(update, e))?;

        info!("[DB] Moved {affected} employees from {from} to {to}");
        Ok(affected)
    }

    /// Insert a new department and return the assigned id
    pub async fn add_department(&self, name: &str) -> Result<i64> {
        let insert = "INSERT INTO department (department_name) VALUES (?)";

        self.conn
            .execute(insert, [name])
            .await
            .map_err(|e| DirectoryError::query(insert, e))?;

        let select = "SELECT department_id FROM department WHERE department_name = ?";
        let mut rows = self
            .conn
            .query(select, [name])
            .await
            .map_err(|e| DirectoryError::query(select, e))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DirectoryError::query(select, e))?
        {
            let id: i64 = row.get(0).map_err(|e| {
                DirectoryError::generic_with_source("Failed to parse assigned department id", e)
            })?;
            info!("[DB] Added department {name} with id {id}");
            Ok(id)
        } else {
            Err(DirectoryError::generic(format!(
                "Inserted department {name} not found on re-query"
            )))
        }
    }

    /// Begin an explicit transaction
    pub async fn begin_transaction(&self) -> Result<()> {
        self.conn
            .execute("BEGIN IMMEDIATE", ())
            .await
            .map_err(|e| DirectoryError::transaction_with_source("Failed to begin transaction", e))?;
        debug!("[DB] Transaction started");
        Ok(())
    }

    /// Commit the current transaction
    pub async fn commit(&self) -> Result<()> {
        self.conn
            .execute("COMMIT", ())
            .await
            .map_err(|e| {
                DirectoryError::transaction_with_source("Failed to commit transaction", e)
            })?;
        debug!("[DB] Transaction committed");
        Ok(())
    }

    /// Roll back the current transaction
    pub async fn rollback(&self) -> Result<()> {
        self.conn
            .execute("ROLLBACK", ())
            .await
            .map_err(|e| {
                DirectoryError::transaction_with_source("Failed to roll back transaction", e)
            })?;
        debug!("[DB] Transaction rolled back");
        Ok(())
    }

    /// Get table row count
    pub async fn table_count(&self, table_name: &str) -> Result<i64> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {table_name}"), ())
            .await
            .map_err(|e| DirectoryError::query("Failed to get table count", e))?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0).map_err(|e| {
                DirectoryError::generic_with_source("Failed to parse table count", e)
            })?;
            Ok(count)
        } else {
            Ok(0)
        }
    }

    /// Get database size in bytes
    pub async fn database_size(&self) -> Result<i64> {
        let mut rows = self
            .conn
            .query(
                "SELECT page_count * page_size as size FROM pragma_page_count(), pragma_page_size()",
                (),
            )
            .await
            .map_err(|e| DirectoryError::query("Failed to get database size", e))?;

        if let Some(row) = rows.next().await? {
            let size: i64 = row.get(0).map_err(|e| {
                DirectoryError::generic_with_source("Failed to parse database size", e)
            })?;
            Ok(size)
        } else {
            Ok(0)
        }
    }

    /// Get summary statistics for the directory
    pub async fn directory_stats(&self) -> Result<DirectoryStats> {
        let total_employees = self.table_count("employee").await?;
        let total_departments = self.table_count("department").await?;
        let database_size_bytes = self.database_size().await.ok().map(|size| size as u64);

        Ok(DirectoryStats {
            total_employees,
            total_departments,
            database_size_bytes,
            last_updated: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Check database health and basic write capability
    pub async fn check_health(&self) -> Result<()> {
        info!("[DB] Performing database health check");

        // Test basic connectivity
        let mut rows = self.conn.query("SELECT 1 as test", ()).await.map_err(|e| {
            DirectoryError::generic_with_source("Database connectivity test failed", e)
        })?;

        if rows.next().await?.is_none() {
            return Err(DirectoryError::generic(
                "Database connectivity test returned no results",
            ));
        }

        // Probe insert and delete against the department table
        let probe = "INSERT INTO department (department_name) VALUES ('health_check_probe')";
        match self.conn.execute(probe, ()).await {
            Ok(_) => {
                let _ = self
                    .conn
                    .execute(
                        "DELETE FROM department WHERE department_name = 'health_check_probe'",
                        (),
                    )
                    .await;
            }
            Err(e) => {
                return Err(DirectoryError::generic_with_source(
                    "Database write probe failed",
                    e,
                ));
            }
        }

        info!("[DB] Database health check completed successfully");
        Ok(())
    }
}
