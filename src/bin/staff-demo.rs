//! Staff Directory Demo
//!
//! A command-line walkthrough of query, update, and transaction patterns
//! against the staff directory database: empty results, full selects,
//! parameterized filters, manual and trait-driven row mapping, declared
//! queries, named-parameter binding, and insert/update/transaction
//! sequences. Each scenario prints its result rows between STARTING and
//! FINISHED log markers.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use staff_db::{DatabaseConfig, Department, DirectoryReader, DirectoryWriter, NamedParams};
use tracing::info;

const SCENARIOS: [&str; 12] = [
    "no_matches",
    "all_employees",
    "department_filter",
    "employee_by_name",
    "auto_mapping",
    "departments",
    "declared_query",
    "named_params",
    "insert_then_select",
    "update_then_select",
    "transaction_commit",
    "transaction_rollback",
];

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let matches = Command::new("staff-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run staff directory query and transaction examples")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the demo database (will be created if needed)")
                .default_value("data/staff.db"),
        )
        .arg(
            Arg::new("example")
                .short('e')
                .long("example")
                .value_name("EXAMPLE")
                .help("Specific example to run")
                .value_parser([
                    "all",
                    "no_matches",
                    "all_employees",
                    "department_filter",
                    "employee_by_name",
                    "auto_mapping",
                    "departments",
                    "declared_query",
                    "named_params",
                    "insert_then_select",
                    "update_then_select",
                    "transaction_commit",
                    "transaction_rollback",
                ])
                .default_value("all"),
        )
        .arg(
            Arg::new("no-seed")
                .long("no-seed")
                .help("Skip resetting the database to the sample staff")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let db_path = matches.get_one::<String>("database").unwrap();
    let example = matches.get_one::<String>("example").unwrap();

    info!("Connecting to database: {db_path}");
    let config = DatabaseConfig::new(db_path);
    let writer = DirectoryWriter::new(config).await?;
    let reader = DirectoryReader::new(writer.connection().clone());

    if !matches.get_flag("no-seed") {
        writer.seed_sample_staff().await?;
    }

    match example.as_str() {
        "all" => {
            for scenario in SCENARIOS {
                run_example(scenario, &reader, &writer).await?;
            }
        }
        scenario => run_example(scenario, &reader, &writer).await?,
    }

    Ok(())
}

async fn run_example(name: &str, reader: &DirectoryReader, writer: &DirectoryWriter) -> Result<()> {
    match name {
        "no_matches" => no_matches(reader).await,
        "all_employees" => all_employees(reader).await,
        "department_filter" => department_filter(reader).await,
        "employee_by_name" => employee_by_name(reader).await,
        "auto_mapping" => auto_mapping(reader).await,
        "departments" => departments(reader).await,
        "declared_query" => declared_query(reader).await,
        "named_params" => named_params(reader).await,
        "insert_then_select" => insert_then_select(reader, writer).await,
        "update_then_select" => update_then_select(reader, writer).await,
        "transaction_commit" => transaction_commit(reader, writer).await,
        "transaction_rollback" => transaction_rollback(reader, writer).await,
        _ => {
            eprintln!("Unknown example: {name}");
            std::process::exit(1);
        }
    }
}

/// Query that returns no employees
async fn no_matches(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: no_matches");

    let employees = reader.employees_matching_first_name("Barbara").await?;
    for employee in &employees {
        println!("{employee}");
    }
    println!("({} rows)", employees.len());

    info!("FINISHED: no_matches");
    Ok(())
}

/// Query that returns all employees
async fn all_employees(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: all_employees");

    for employee in reader.all_employees().await? {
        println!("{employee}");
    }

    info!("FINISHED: all_employees");
    Ok(())
}

/// Query that returns all manufacturing employees
async fn department_filter(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: department_filter");

    for employee in reader.employees_in_department("Manufacturing").await? {
        println!("{employee}");
    }

    info!("FINISHED: department_filter");
    Ok(())
}

/// Query that returns Bob Smith, with manual field extraction
async fn employee_by_name(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: employee_by_name");

    for employee in reader.employee_by_name("Bob", "Smith").await? {
        println!("{employee}");
    }

    info!("FINISHED: employee_by_name");
    Ok(())
}

/// Query that returns Bob Smith, mapped through FromRow
async fn auto_mapping(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: auto_mapping");

    for employee in reader.employee_by_name_mapped("Bob", "Smith").await? {
        println!("{employee}");
    }

    info!("FINISHED: auto_mapping");
    Ok(())
}

/// Query that returns all departments through their accessor interface
async fn departments(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: departments");

    for department in reader.all_departments().await? {
        println!("Department: {} - {}", department.id(), department.name());
    }

    info!("FINISHED: departments");
    Ok(())
}

/// Query declared as metadata on the Department type itself
async fn declared_query(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: declared_query");

    for department in reader.fetch_declared::<Department>().await? {
        println!("Department: {} - {}", department.id(), department.name());
    }

    info!("FINISHED: declared_query");
    Ok(())
}

/// Query bound with a named parameter instead of a positional one
async fn named_params(reader: &DirectoryReader) -> Result<()> {
    println!();
    info!("STARTING: named_params");

    let params = NamedParams::new().with("department", "Sales");
    for employee in reader
        .employees_where("d.department_name = :department", &params)
        .await?
    {
        println!("{employee}");
    }

    info!("FINISHED: named_params");
    Ok(())
}

/// Insert a new employee, then select her back
async fn insert_then_select(reader: &DirectoryReader, writer: &DirectoryWriter) -> Result<()> {
    println!();
    info!("STARTING: insert_then_select");

    let id = writer.hire_employee("Barbara", "Jennings", "Sales").await?;
    println!("Hired employee {id}");

    for employee in reader.employee_by_name("Barbara", "Jennings").await? {
        println!("{employee}");
    }

    info!("FINISHED: insert_then_select");
    Ok(())
}

/// Update one employee's department, then select him back
async fn update_then_select(reader: &DirectoryReader, writer: &DirectoryWriter) -> Result<()> {
    println!();
    info!("STARTING: update_then_select");

    let affected = writer
        .transfer_employee("Bob", "Smith", "Accounting")
        .await?;
    println!("Updated {affected} employees");

    for employee in reader.employee_by_name("Bob", "Smith").await? {
        println!("{employee}");
    }

    info!("FINISHED: update_then_select");
    Ok(())
}

/// Move a whole department inside an explicit transaction, commit, then
/// select the destination department
async fn transaction_commit(reader: &DirectoryReader, writer: &DirectoryWriter) -> Result<()> {
    println!();
    info!("STARTING: transaction_commit");

    writer.begin_transaction().await?;
    let moved = writer
        .move_department_staff("Sales", "Manufacturing")
        .await?;
    writer.commit().await?;
    println!("Committed move of {moved} employees from Sales to Manufacturing");

    for employee in reader.employees_in_department("Manufacturing").await? {
        println!("{employee}");
    }

    info!("FINISHED: transaction_commit");
    Ok(())
}

/// Move a whole department inside an explicit transaction, roll it back,
/// then show the counts are unchanged
async fn transaction_rollback(reader: &DirectoryReader, writer: &DirectoryWriter) -> Result<()> {
    println!();
    info!("STARTING: transaction_rollback");

    let before = reader.employees_in_department("Shipping").await?.len();

    writer.begin_transaction().await?;
    let moved = writer
        .move_department_staff("Shipping", "Accounting")
        .await?;
    writer.rollback().await?;
    println!("Rolled back move of {moved} employees from Shipping to Accounting");

    let after = reader.employees_in_department("Shipping").await?.len();
    println!("Shipping headcount: {before} before, {after} after rollback");

    info!("FINISHED: transaction_rollback");
    Ok(())
}
