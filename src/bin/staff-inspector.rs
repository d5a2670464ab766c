//! Staff Database Inspector
//!
//! A command-line tool for inspecting staff directory database contents.
//! Provides information about employees, departments, statistics, and health.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use staff_db::{DatabaseConfig, DirectoryReader, DirectoryWriter};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let matches = Command::new("staff-inspector")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect staff directory database contents")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the database file")
                .default_value("data/staff.db"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format (table, json)")
                .value_parser(["table", "json"])
                .default_value("table"),
        )
        .arg(
            Arg::new("stats")
                .short('s')
                .long("stats")
                .help("Show database statistics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("employees")
                .short('e')
                .long("employees")
                .help("List all employees")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("departments")
                .long("departments")
                .help("List all departments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("health")
                .long("health")
                .help("Run a database health check")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let db_path = matches.get_one::<String>("database").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let config = DatabaseConfig::new(db_path);

    info!("Connecting to database: {db_path}");
    let db = DirectoryWriter::new(config).await?;
    let reader = DirectoryReader::new(db.connection().clone());

    if matches.get_flag("stats") {
        show_statistics(&db, format).await?;
    }

    if matches.get_flag("employees") {
        list_employees(&reader, format).await?;
    }

    if matches.get_flag("departments") {
        list_departments(&reader, format).await?;
    }

    if matches.get_flag("health") {
        check_health(&db).await?;
    }

    // If no specific operation requested, show overview
    if !matches.get_flag("stats")
        && !matches.get_flag("employees")
        && !matches.get_flag("departments")
        && !matches.get_flag("health")
    {
        show_overview(&db, &reader, format).await?;
    }

    Ok(())
}

async fn show_statistics(db: &DirectoryWriter, format: &str) -> Result<()> {
    println!("📊 Database Statistics\n");

    let stats = db.directory_stats().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Employees:   {}", stats.total_employees);
        println!("Departments: {}", stats.total_departments);

        if let Some(size) = stats.database_size_bytes {
            println!(
                "\nDatabase Size: {} bytes ({:.2} MB)",
                size,
                size as f64 / 1024.0 / 1024.0
            );
        }

        println!("\nLast Updated: {}", stats.last_updated);
    }

    Ok(())
}

async fn list_employees(reader: &DirectoryReader, format: &str) -> Result<()> {
    println!("📋 All Employees\n");

    let employees = reader.all_employees().await?;

    if employees.is_empty() {
        println!("No employees found");
        return Ok(());
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&employees)?);
    } else {
        println!(
            "{:<6} {:<15} {:<15} {:<20}",
            "ID", "First Name", "Last Name", "Department"
        );
        println!("{}", "-".repeat(60));

        for employee in &employees {
            println!(
                "{:<6} {:<15} {:<15} {:<20}",
                employee.id, employee.first_name, employee.last_name, employee.department
            );
        }

        println!("\nTotal: {} employees", employees.len());
    }

    Ok(())
}

async fn list_departments(reader: &DirectoryReader, format: &str) -> Result<()> {
    println!("🏢 All Departments\n");

    let departments = reader.all_departments().await?;

    if departments.is_empty() {
        println!("No departments found");
        return Ok(());
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&departments)?);
    } else {
        println!("{:<6} {:<20}", "ID", "Name");
        println!("{}", "-".repeat(28));

        for department in &departments {
            println!("{:<6} {:<20}", department.id(), department.name());
        }

        println!("\nTotal: {} departments", departments.len());
    }

    Ok(())
}

async fn check_health(db: &DirectoryWriter) -> Result<()> {
    println!("🏥 Database Health Check\n");

    db.check_health().await?;
    println!("✅ Database is healthy");

    Ok(())
}

async fn show_overview(db: &DirectoryWriter, reader: &DirectoryReader, format: &str) -> Result<()> {
    println!("🗂️  Staff Directory Overview\n");

    let stats = db.directory_stats().await?;
    let departments = reader.all_departments().await?;

    if format == "json" {
        let overview = serde_json::json!({
            "database_stats": stats,
            "departments": departments,
        });
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        println!("📈 Summary:");
        println!("  Employees:   {}", stats.total_employees);
        println!("  Departments: {}", stats.total_departments);

        if !departments.is_empty() {
            println!("\n🏢 Departments:");
            for department in &departments {
                println!("  {} - {}", department.id(), department.name());
            }
        }

        if let Some(size) = stats.database_size_bytes {
            println!("\n💾 Database Size: {:.2} MB", size as f64 / 1024.0 / 1024.0);
        }

        println!("\n🕒 Last Updated: {}", stats.last_updated);

        println!("\n🔧 Quick Actions:");
        println!(
            "  Show statistics:  staff-inspector -d {} --stats",
            db.config.path
        );
        println!(
            "  List employees:   staff-inspector -d {} --employees",
            db.config.path
        );
        println!(
            "  List departments: staff-inspector -d {} --departments",
            db.config.path
        );
        println!(
            "  Health check:     staff-inspector -d {} --health",
            db.config.path
        );
    }

    Ok(())
}
