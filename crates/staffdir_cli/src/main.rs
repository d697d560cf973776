//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `staffdir_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use staffdir_core::db::{ensure_schema_and_seed, open_db_in_memory};
use staffdir_core::EmployeeService;

fn main() {
    if let Err(err) = run() {
        eprintln!("staffdir smoke failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("staffdir_core ping={}", staffdir_core::ping());
    println!("staffdir_core version={}", staffdir_core::core_version());

    let mut conn = open_db_in_memory()?;
    let seeded = ensure_schema_and_seed(&mut conn)?;
    println!("store seeded={seeded}");

    let service = EmployeeService::new(&conn);
    let roster = service.employees_by_company(1)?;
    println!("company 1 roster={}", roster.len());

    Ok(())
}
