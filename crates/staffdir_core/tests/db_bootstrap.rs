use rusqlite::Connection;
use staffdir_core::db::{ensure_schema_and_seed, open_db, open_db_in_memory};

#[test]
fn bootstrap_creates_all_entity_tables() {
    let mut conn = open_db_in_memory().unwrap();

    let applied = ensure_schema_and_seed(&mut conn).unwrap();
    assert!(applied);

    assert_table_exists(&conn, "Companies");
    assert_table_exists(&conn, "Departments");
    assert_table_exists(&conn, "Passports");
    assert_table_exists(&conn, "Employees");
}

#[test]
fn bootstrap_inserts_fixed_seed_rows() {
    let mut conn = open_db_in_memory().unwrap();
    ensure_schema_and_seed(&mut conn).unwrap();

    assert_eq!(table_count(&conn, "Companies"), 3);
    assert_eq!(table_count(&conn, "Departments"), 4);
    assert_eq!(table_count(&conn, "Passports"), 5);
    assert_eq!(table_count(&conn, "Employees"), 5);
}

#[test]
fn bootstrap_is_idempotent_on_same_connection() {
    let mut conn = open_db_in_memory().unwrap();

    assert!(ensure_schema_and_seed(&mut conn).unwrap());
    assert!(!ensure_schema_and_seed(&mut conn).unwrap());

    assert_eq!(table_count(&conn, "Employees"), 5);
}

#[test]
fn bootstrap_is_idempotent_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdir.db");

    let mut conn_first = open_db(&path).unwrap();
    assert!(ensure_schema_and_seed(&mut conn_first).unwrap());
    drop(conn_first);

    let mut conn_second = open_db(&path).unwrap();
    assert!(!ensure_schema_and_seed(&mut conn_second).unwrap());
    assert_eq!(table_count(&conn_second, "Employees"), 5);
}

#[test]
fn open_db_enforces_foreign_keys() {
    let mut conn = open_db_in_memory().unwrap();
    ensure_schema_and_seed(&mut conn).unwrap();

    let result = conn.execute(
        "INSERT INTO Employees (Name, Surname, Phone, CompanyId, PassportId, DepartmentId)
         VALUES ('Ghost', 'Row', '0', 999, 999, 999);",
        [],
    );
    assert!(result.is_err());
}

fn table_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
