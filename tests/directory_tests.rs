//! Integration tests for the staff directory
//!
//! Covers seeding, each reader query operation, the mapping seams
//! (manual extraction, FromRow, DeclaredQuery, named parameters), and
//! the insert/update-then-select write sequences.

use anyhow::Result;
use staff_db::{
    DatabaseConfig, Department, DirectoryReader, DirectoryWriter, NamedParams,
};
use tempfile::TempDir;

async fn seeded_pair() -> Result<(DirectoryWriter, DirectoryReader)> {
    let writer = DirectoryWriter::new(DatabaseConfig::new(":memory:")).await?;
    writer.seed_sample_staff().await?;
    let reader = DirectoryReader::new(writer.connection().clone());
    Ok((writer, reader))
}

#[tokio::test]
async fn test_seed_installs_sample_cast() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    assert_eq!(writer.table_count("employee").await?, 5);
    assert_eq!(writer.table_count("department").await?, 4);

    let departments = reader.all_departments().await?;
    let names: Vec<&str> = departments.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["Manufacturing", "Accounting", "Sales", "Shipping"]);

    Ok(())
}

#[tokio::test]
async fn test_seed_is_idempotent() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    // Mutate, then reseed
    writer.hire_employee("Extra", "Person", "Sales").await?;
    writer.seed_sample_staff().await?;

    assert_eq!(writer.table_count("employee").await?, 5);
    assert_eq!(writer.table_count("department").await?, 4);
    assert!(reader.employee_by_name("Extra", "Person").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_no_barbara_in_seed() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let employees = reader.employees_matching_first_name("Barbara").await?;
    assert!(employees.is_empty(), "Seed should contain no Barbara");

    Ok(())
}

#[tokio::test]
async fn test_all_employees_returns_full_join() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let employees = reader.all_employees().await?;
    assert_eq!(employees.len(), 5);

    // Every row carries a department name from the join
    for employee in &employees {
        assert!(!employee.department.is_empty());
    }

    Ok(())
}

#[tokio::test]
async fn test_department_filter() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let manufacturing = reader.employees_in_department("Manufacturing").await?;
    assert_eq!(manufacturing.len(), 2);

    let first_names: Vec<&str> = manufacturing.iter().map(|e| e.first_name.as_str()).collect();
    assert_eq!(first_names, ["Bob", "Todd"]);

    Ok(())
}

#[tokio::test]
async fn test_employee_by_name_is_singleton() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let employees = reader.employee_by_name("Bob", "Smith").await?;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].first_name, "Bob");
    assert_eq!(employees[0].last_name, "Smith");
    assert_eq!(employees[0].department, "Manufacturing");

    Ok(())
}

#[tokio::test]
async fn test_manual_and_mapped_extraction_agree() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let manual = reader.employee_by_name("Bob", "Smith").await?;
    let mapped = reader.employee_by_name_mapped("Bob", "Smith").await?;
    assert_eq!(manual, mapped);

    Ok(())
}

#[tokio::test]
async fn test_declared_query_matches_explicit_department_query() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let explicit = reader.all_departments().await?;
    let declared = reader.fetch_declared::<Department>().await?;
    assert_eq!(explicit, declared);
    assert_eq!(declared.len(), 4);

    Ok(())
}

#[tokio::test]
async fn test_named_params_filter() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let params = NamedParams::new().with("department", "Sales");
    let sales = reader
        .employees_where("d.department_name = :department", &params)
        .await?;

    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].first_name, "Jane");
    assert_eq!(sales[0].department, "Sales");

    Ok(())
}

#[tokio::test]
async fn test_named_params_with_unknown_placeholder_fails() -> Result<()> {
    let (_writer, reader) = seeded_pair().await?;

    let params = NamedParams::new().with("department", "Sales");
    let result = reader
        .employees_where("d.department_name = :dept", &params)
        .await;

    assert!(result.is_err(), "Unknown placeholder should fail binding");
    Ok(())
}

#[tokio::test]
async fn test_hire_then_select() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    let id = writer.hire_employee("Barbara", "Jennings", "Sales").await?;
    assert!(id > 0);

    let employees = reader.employee_by_name("Barbara", "Jennings").await?;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, id);
    assert_eq!(employees[0].department, "Sales");

    Ok(())
}

#[tokio::test]
async fn test_transfer_then_select() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    let affected = writer.transfer_employee("Bob", "Smith", "Accounting").await?;
    assert_eq!(affected, 1);

    let employees = reader.employee_by_name("Bob", "Smith").await?;
    assert_eq!(employees[0].department, "Accounting");

    Ok(())
}

#[tokio::test]
async fn test_department_id_resolves_seeded_names() -> Result<()> {
    let (writer, _reader) = seeded_pair().await?;

    assert_eq!(writer.department_id("Manufacturing").await?, 1);
    assert_eq!(writer.department_id("Shipping").await?, 4);

    Ok(())
}

#[tokio::test]
async fn test_hire_into_unknown_department_fails() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    let result = writer.hire_employee("Barbara", "Jennings", "Nonexistent").await;
    assert!(result.is_err(), "Unknown department name should not resolve");

    // Nothing was inserted
    assert!(reader.employee_by_name("Barbara", "Jennings").await?.is_empty());
    assert_eq!(writer.table_count("employee").await?, 5);

    Ok(())
}

#[tokio::test]
async fn test_transfer_to_unknown_department_fails() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    let result = writer.transfer_employee("Bob", "Smith", "Nonexistent").await;
    assert!(result.is_err(), "Unknown department name should not resolve");

    let bob = reader.employee_by_name("Bob", "Smith").await?;
    assert_eq!(bob[0].department, "Manufacturing", "Bob stays put");

    Ok(())
}

#[tokio::test]
async fn test_transfer_of_unknown_employee_affects_nothing() -> Result<()> {
    let (writer, _reader) = seeded_pair().await?;

    let affected = writer
        .transfer_employee("Nobody", "Here", "Accounting")
        .await?;
    assert_eq!(affected, 0);

    Ok(())
}

#[tokio::test]
async fn test_add_department_returns_assigned_id() -> Result<()> {
    let (writer, reader) = seeded_pair().await?;

    let id = writer.add_department("Research").await?;
    assert!(id > 4, "New department ids continue past the seeded four");

    let departments = reader.all_departments().await?;
    assert_eq!(departments.len(), 5);
    assert!(departments.iter().any(|d| d.name() == "Research"));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_department_name_fails() -> Result<()> {
    let (writer, _reader) = seeded_pair().await?;

    let result = writer.add_department("Sales").await;
    assert!(result.is_err(), "department_name is UNIQUE");

    Ok(())
}

#[tokio::test]
async fn test_stats_track_row_counts() -> Result<()> {
    let (writer, _reader) = seeded_pair().await?;

    let before = writer.directory_stats().await?;
    assert_eq!(before.total_employees, 5);
    assert_eq!(before.total_departments, 4);

    writer.hire_employee("Barbara", "Jennings", "Sales").await?;
    writer.add_department("Research").await?;

    let after = writer.directory_stats().await?;
    assert_eq!(after.total_employees, 6);
    assert_eq!(after.total_departments, 5);

    Ok(())
}

#[tokio::test]
async fn test_health_check_passes_on_fresh_database() -> Result<()> {
    let (writer, _reader) = seeded_pair().await?;

    writer.check_health().await?;
    assert_eq!(writer.table_count("department").await?, 4, "Probe row is cleaned up");

    Ok(())
}

#[tokio::test]
async fn test_file_backed_database_roundtrip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("staff.db");
    let config = DatabaseConfig::new(db_path.to_string_lossy());

    {
        let writer = DirectoryWriter::new(config.clone()).await?;
        writer.seed_sample_staff().await?;
        writer.hire_employee("Barbara", "Jennings", "Sales").await?;
    }

    // Reopen the same file with a fresh connection
    let reader = DirectoryReader::from_config(config).await?;
    let employees = reader.all_employees().await?;
    assert_eq!(employees.len(), 6);

    let barbara = reader.employee_by_name("Barbara", "Jennings").await?;
    assert_eq!(barbara.len(), 1);

    Ok(())
}
