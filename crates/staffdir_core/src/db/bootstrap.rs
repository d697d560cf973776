//! Idempotent schema and seed application.
//!
//! # Responsibility
//! - Create the four entity tables when the store is empty.
//! - Insert the fixed seed rows exactly once, atomically.
//!
//! # Invariants
//! - Safe to call on every startup; a seeded store is left untouched.
//! - DDL and seed rows are applied in one transaction or not at all.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const SEED_SQL: &str = include_str!("seed.sql");

// The seeded store holds the four entity tables plus the sqlite_sequence
// table that AUTOINCREMENT creates on first insert, so a table count above
// four means seeding already happened.
const ENTITY_TABLE_COUNT: i64 = 4;

/// Ensures the schema exists and the fixed seed rows are present.
///
/// Returns `Ok(true)` when this call created the schema and inserted the
/// seed, `Ok(false)` when the store was already seeded. Any statement
/// failure rolls the whole application back and surfaces the error.
///
/// # Side effects
/// - Emits `db_seed` logging events with duration and status.
pub fn ensure_schema_and_seed(conn: &mut Connection) -> DbResult<bool> {
    let started_at = Instant::now();
    info!("event=db_seed module=db status=start");

    match apply_schema_and_seed(conn) {
        Ok(applied) => {
            info!(
                "event=db_seed module=db status={} duration_ms={}",
                if applied { "ok" } else { "skip" },
                started_at.elapsed().as_millis()
            );
            Ok(applied)
        }
        Err(err) => {
            error!(
                "event=db_seed module=db status=error duration_ms={} error_code=db_seed_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn apply_schema_and_seed(conn: &mut Connection) -> DbResult<bool> {
    let tx = conn.transaction()?;

    let table_count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table';",
        [],
        |row| row.get(0),
    )?;
    if table_count > ENTITY_TABLE_COUNT {
        return Ok(false);
    }

    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(SEED_SQL)?;
    tx.commit()?;

    Ok(true)
}
