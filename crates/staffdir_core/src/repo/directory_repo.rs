//! Satellite-table repository for companies, departments and passports.
//!
//! # Responsibility
//! - Provide the existence checks the mutation engine runs before a write.
//! - Insert/update/delete the dependent rows an employee write touches.
//!
//! # Invariants
//! - Company rows are never written by this subsystem.
//! - Passport rows are only written as part of an employee mutation.

use crate::model::employee::{
    CompanyId, DepartmentId, NewDepartment, NewPassport, PassportId,
};
use crate::repo::employee_repo::RepoResult;
use rusqlite::{params, Connection};

/// Repository interface for the tables referenced by an employee row.
pub trait DirectoryRepository {
    fn count_companies(&self, company_id: CompanyId) -> RepoResult<i64>;
    fn count_departments(&self, department_id: DepartmentId) -> RepoResult<i64>;
    fn insert_department(&self, input: &NewDepartment) -> RepoResult<DepartmentId>;
    fn insert_passport(&self, input: &NewPassport) -> RepoResult<PassportId>;
    fn update_passport(&self, passport_id: PassportId, input: &NewPassport) -> RepoResult<()>;
    fn delete_passport(&self, passport_id: PassportId) -> RepoResult<usize>;
}

/// SQLite-backed satellite-table repository.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn count_companies(&self, company_id: CompanyId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM Companies WHERE Id = ?1;",
            [company_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_departments(&self, department_id: DepartmentId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM Departments WHERE Id = ?1;",
            [department_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn insert_department(&self, input: &NewDepartment) -> RepoResult<DepartmentId> {
        self.conn.execute(
            "INSERT INTO Departments (Name, Phone) VALUES (?1, ?2);",
            params![input.name.as_str(), input.phone.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_passport(&self, input: &NewPassport) -> RepoResult<PassportId> {
        self.conn.execute(
            "INSERT INTO Passports (Type, Number) VALUES (?1, ?2);",
            params![input.kind.as_str(), input.number.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_passport(&self, passport_id: PassportId, input: &NewPassport) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE Passports
             SET Type = ?1,
                 Number = ?2
             WHERE Id = ?3;",
            params![input.kind.as_str(), input.number.as_str(), passport_id],
        )?;
        Ok(())
    }

    fn delete_passport(&self, passport_id: PassportId) -> RepoResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM Passports WHERE Id = ?1;",
            [passport_id],
        )?;
        Ok(deleted)
    }
}
