//! # Staff Directory Database Examples
//!
//! A small library demonstrating SQL queries, updates, and transactions
//! against an async SQLite/Turso database, with row-to-struct mapping for
//! an employee directory (employees joined to their departments).
//!
//! ## Features
//!
//! - **Manual and Trait-Driven Mapping**: extract rows field by field or via `FromRow`
//! - **Declared Queries**: types can carry their own SELECT as metadata (`DeclaredQuery`)
//! - **Named Parameters**: `:name` placeholders expanded to positional bindings
//! - **Write Sequences**: insert-then-select, update-then-select, BEGIN/COMMIT/ROLLBACK
//! - **Error Handling**: detailed error context with thiserror
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use staff_db::{DatabaseConfig, DirectoryReader, DirectoryWriter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("path/to/staff.db");
//!     let writer = DirectoryWriter::new(config).await?;
//!     writer.seed_sample_staff().await?;
//!
//!     let reader = DirectoryReader::new(writer.connection().clone());
//!     for employee in reader.all_employees().await? {
//!         println!("{employee}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod params;
pub mod reader;
pub mod row;
pub mod writer;

// Re-export commonly used types
pub use config::{DatabaseConfig, DatabaseConfigBuilder};
pub use error::{DirectoryError, Result};
pub use model::{Department, Employee};
pub use params::NamedParams;
pub use reader::DirectoryReader;
pub use row::{DeclaredQuery, FromRow};
pub use writer::{DirectoryStats, DirectoryWriter};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
