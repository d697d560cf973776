//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD primitives over the `Employees` table.
//! - Hydrate employees with their joined department and passport in one
//!   query.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Column names in dynamically assembled statements are compile-time
//!   constants; values are always bound parameters.

use crate::db::DbError;
use crate::model::employee::{
    CompanyId, Department, DepartmentId, Employee, EmployeeId, NewEmployee, Passport, PassportId,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Column order is the join-split contract: employee columns first, then the
// department block starting at index 7, then the passport block at index 10.
const EMPLOYEE_JOIN_SQL: &str = "SELECT
    e.Id,
    e.Name,
    e.Surname,
    e.Phone,
    e.CompanyId,
    e.PassportId,
    e.DepartmentId,
    d.Id,
    d.Name,
    d.Phone,
    p.Id,
    p.Number,
    p.Type
FROM Employees e
JOIN Departments d ON e.DepartmentId = d.Id
JOIN Passports p ON e.PassportId = p.Id";

const DEPARTMENT_SPLIT_INDEX: usize = 7;
const PASSPORT_SPLIT_INDEX: usize = 10;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Accumulated column assignments for one employee UPDATE.
///
/// Setters record which columns were supplied; `render` emits a single
/// parameterized statement restricted to exactly those columns. An empty
/// accumulation renders a harmless `Id = Id` assignment so the statement
/// still executes.
#[derive(Debug, Default)]
pub struct EmployeeColumnUpdate {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl EmployeeColumnUpdate {
    pub fn set_name(&mut self, value: &str) {
        self.push("Name", Value::Text(value.to_string()));
    }

    pub fn set_surname(&mut self, value: &str) {
        self.push("Surname", Value::Text(value.to_string()));
    }

    pub fn set_phone(&mut self, value: &str) {
        self.push("Phone", Value::Text(value.to_string()));
    }

    pub fn set_company(&mut self, value: CompanyId) {
        self.push("CompanyId", Value::Integer(value));
    }

    pub fn set_department(&mut self, value: DepartmentId) {
        self.push("DepartmentId", Value::Integer(value));
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn push(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.values.push(value);
    }

    fn render(&self, employee_id: EmployeeId) -> (String, Vec<Value>) {
        let mut sql = String::from("UPDATE Employees SET ");
        let mut bind_values = Vec::with_capacity(self.values.len() + 1);

        if self.columns.is_empty() {
            sql.push_str("Id = Id");
        } else {
            for (index, column) in self.columns.iter().enumerate() {
                if index > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(column);
                sql.push_str(" = ?");
            }
            bind_values.extend(self.values.iter().cloned());
        }

        sql.push_str(" WHERE Id = ?;");
        bind_values.push(Value::Integer(employee_id));

        (sql, bind_values)
    }
}

/// Repository interface for employee rows.
pub trait EmployeeRepository {
    fn find_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Employee>>;
    fn find_by_company_and_department(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Employee>>;
    fn count_employees(&self, employee_id: EmployeeId) -> RepoResult<i64>;
    fn passport_id(&self, employee_id: EmployeeId) -> RepoResult<Option<PassportId>>;
    fn insert(
        &self,
        input: &NewEmployee,
        passport_id: PassportId,
        department_id: DepartmentId,
    ) -> RepoResult<EmployeeId>;
    fn apply_update(
        &self,
        employee_id: EmployeeId,
        changes: &EmployeeColumnUpdate,
    ) -> RepoResult<()>;
    fn delete(&self, employee_id: EmployeeId) -> RepoResult<usize>;
}

/// SQLite-backed employee repository.
///
/// Borrows a plain connection; the mutation engine passes an open
/// transaction instead (it derefs to a connection) to run multi-statement
/// flows atomically.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_JOIN_SQL}
             WHERE e.CompanyId = ?1
             ORDER BY e.Id ASC;"
        ))?;

        let mut rows = stmt.query([company_id])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_company_and_department(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_JOIN_SQL}
             WHERE e.CompanyId = ?1
               AND e.DepartmentId = ?2
             ORDER BY e.Id ASC;"
        ))?;

        let mut rows = stmt.query(params![company_id, department_id])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn count_employees(&self, employee_id: EmployeeId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM Employees WHERE Id = ?1;",
            [employee_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn passport_id(&self, employee_id: EmployeeId) -> RepoResult<Option<PassportId>> {
        let value = self
            .conn
            .query_row(
                "SELECT PassportId FROM Employees WHERE Id = ?1;",
                [employee_id],
                |row| row.get::<_, Option<PassportId>>(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    fn insert(
        &self,
        input: &NewEmployee,
        passport_id: PassportId,
        department_id: DepartmentId,
    ) -> RepoResult<EmployeeId> {
        self.conn.execute(
            "INSERT INTO Employees (Name, Surname, Phone, CompanyId, PassportId, DepartmentId)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                input.name.as_str(),
                input.surname.as_str(),
                input.phone.as_str(),
                input.company_id,
                passport_id,
                department_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn apply_update(
        &self,
        employee_id: EmployeeId,
        changes: &EmployeeColumnUpdate,
    ) -> RepoResult<()> {
        let (sql, bind_values) = changes.render(employee_id);
        self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(())
    }

    fn delete(&self, employee_id: EmployeeId) -> RepoResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM Employees WHERE Id = ?1;",
            [employee_id],
        )?;
        Ok(deleted)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let department = Department {
        id: row.get(DEPARTMENT_SPLIT_INDEX)?,
        name: required_text(row, DEPARTMENT_SPLIT_INDEX + 1, "Departments.Name")?,
        phone: required_text(row, DEPARTMENT_SPLIT_INDEX + 2, "Departments.Phone")?,
    };
    let passport = Passport {
        id: row.get(PASSPORT_SPLIT_INDEX)?,
        number: required_text(row, PASSPORT_SPLIT_INDEX + 1, "Passports.Number")?,
        kind: required_text(row, PASSPORT_SPLIT_INDEX + 2, "Passports.Type")?,
    };

    Ok(Employee {
        id: row.get(0)?,
        name: required_text(row, 1, "Employees.Name")?,
        surname: required_text(row, 2, "Employees.Surname")?,
        phone: required_text(row, 3, "Employees.Phone")?,
        company_id: row.get(4)?,
        passport_id: row.get(5)?,
        department_id: row.get(6)?,
        department,
        passport,
    })
}

fn required_text(row: &Row<'_>, index: usize, column: &'static str) -> RepoResult<String> {
    row.get::<_, Option<String>>(index)?
        .ok_or_else(|| RepoError::InvalidData(format!("null value in {column}")))
}
