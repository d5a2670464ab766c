//! Row mapping traits for staff-db
//!
//! Rust has no runtime reflection, so the auto-mapping seam is a pair of
//! traits: `FromRow` converts one result row into a value by column index,
//! and `DeclaredQuery` lets a type carry its own SELECT text so callers can
//! fetch it without supplying any SQL.

use crate::error::Result;

/// Conversion from one query result row into a value.
///
/// Implementations extract columns by index, in the order the type's
/// declared select list names them. Failures surface as
/// [`DirectoryError::Mapping`](crate::DirectoryError::Mapping) with the
/// offending column index and target type.
pub trait FromRow: Sized {
    /// Build a value from a result row
    fn from_row(row: &turso::Row) -> Result<Self>;
}

/// A mapped type that declares its own query as metadata.
///
/// The analog of annotating the mapping target with its SELECT statement:
/// [`DirectoryReader::fetch_declared`](crate::DirectoryReader::fetch_declared)
/// runs `SQL` with no caller-side query text.
pub trait DeclaredQuery: FromRow {
    /// The SELECT statement whose columns this type maps
    const SQL: &'static str;
}
