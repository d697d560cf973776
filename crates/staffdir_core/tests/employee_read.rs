use rusqlite::Connection;
use staffdir_core::db::{ensure_schema_and_seed, open_db_in_memory};
use staffdir_core::{EmployeeRepository, EmployeeService, SqliteEmployeeRepository};

fn seeded_conn() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    ensure_schema_and_seed(&mut conn).unwrap();
    conn
}

#[test]
fn find_by_company_hydrates_department_and_passport() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    let employees = repo.find_by_company(1).unwrap();
    let tony = employees
        .iter()
        .find(|employee| employee.id == 1)
        .expect("seeded employee 1 should be listed");

    assert_eq!(tony.name, "Tony");
    assert_eq!(tony.surname, "Stark");
    assert_eq!(tony.phone, "1111111");
    assert_eq!(tony.company_id, 1);
    assert_eq!(tony.passport_id, 1);
    assert_eq!(tony.department_id, 1);

    assert_eq!(tony.department.id, 1);
    assert_eq!(tony.department.name, "First");
    assert_eq!(tony.department.phone, "+777777");

    assert_eq!(tony.passport.id, 1);
    assert_eq!(tony.passport.kind, "main passport");
    assert_eq!(tony.passport.number, "312343");
}

#[test]
fn find_by_company_lists_in_id_order() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    let employees = repo.find_by_company(1).unwrap();
    let ids: Vec<i64> = employees.iter().map(|employee| employee.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn find_by_company_and_department_filters_both_keys() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    let first_department = repo.find_by_company_and_department(1, 1).unwrap();
    let ids: Vec<i64> = first_department.iter().map(|employee| employee.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let second_department = repo.find_by_company_and_department(1, 2).unwrap();
    assert_eq!(second_department.len(), 1);
    assert_eq!(second_department[0].surname, "Parker");
}

#[test]
fn unknown_company_returns_empty_list() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert!(repo.find_by_company(999).unwrap().is_empty());
    assert!(repo.find_by_company_and_department(1, 999).unwrap().is_empty());
}

#[test]
fn service_read_wrappers_delegate_to_repository() {
    let conn = seeded_conn();
    let service = EmployeeService::new(&conn);

    let by_company = service.employees_by_company(2).unwrap();
    assert_eq!(by_company.len(), 1);
    assert_eq!(by_company[0].surname, "Prince");

    let by_both = service.employees_by_company_and_department(3, 4).unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].surname, "Kent");
}

#[test]
fn passport_id_lookup_returns_none_for_missing_employee() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert_eq!(repo.passport_id(1).unwrap(), Some(1));
    assert_eq!(repo.passport_id(999).unwrap(), None);
}

#[test]
fn count_employees_reports_existence() {
    let conn = seeded_conn();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert_eq!(repo.count_employees(1).unwrap(), 1);
    assert_eq!(repo.count_employees(999).unwrap(), 0);
}
