//! Employee mutation engine.
//!
//! # Responsibility
//! - Run employee create/update/delete as single transactions with their
//!   cascading passport and department writes.
//! - Expose the join read path that hydrates employees with department and
//!   passport.
//!
//! # Invariants
//! - Every mutation either commits all of its statements or none of them;
//!   the transaction guard rolls back on every early-exit path.
//! - Create validates its input before a transaction is opened.
//! - An employee's PassportId column is never reassigned by an update.

use crate::model::employee::{
    CompanyId, DepartmentId, Employee, EmployeeId, EmployeeInputError, EmployeeUpdate,
    NewEmployee,
};
use crate::repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
use crate::repo::employee_repo::{
    EmployeeColumnUpdate, EmployeeRepository, RepoError, SqliteEmployeeRepository,
};
use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Create input failed validation before any storage work.
    Input(EmployeeInputError),
    /// Update target does not exist.
    EmployeeNotFound(EmployeeId),
    /// Update referenced a company that does not exist.
    CompanyNotFound(CompanyId),
    /// Update referenced a department that does not exist.
    DepartmentNotFound(DepartmentId),
    /// Persistence-layer failure; the surrounding transaction was rolled
    /// back.
    Storage(RepoError),
}

impl EmployeeServiceError {
    /// Whether the caller can fix this error by changing the request.
    ///
    /// Transport layers map caller errors to 4xx-grade outcomes and storage
    /// errors to 5xx-grade outcomes.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::EmployeeNotFound(employee_id) => {
                write!(f, "there is no employee with id {employee_id}")
            }
            Self::CompanyNotFound(company_id) => {
                write!(f, "company with id {company_id} does not exist")
            }
            Self::DepartmentNotFound(department_id) => {
                write!(f, "department with id {department_id} does not exist")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeInputError> for EmployeeServiceError {
    fn from(value: EmployeeInputError) -> Self {
        Self::Input(value)
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Mutation engine over one exclusive connection.
///
/// The connection and every transaction opened on it belong to a single
/// request; nothing here is shared across requests.
pub struct EmployeeService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> EmployeeService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates an employee with its passport and, when requested, an inline
    /// department, in one transaction.
    ///
    /// Returns the generated employee id.
    pub fn create(&self, input: &NewEmployee) -> Result<EmployeeId, EmployeeServiceError> {
        input.validate()?;

        let tx = self.begin_immediate("employee_create")?;
        match create_in_tx(&tx, input) {
            Ok(employee_id) => {
                commit("employee_create", tx)?;
                info!(
                    "event=employee_create module=service status=ok employee_id={employee_id}"
                );
                Ok(employee_id)
            }
            Err(err) => {
                // Dropping the guard rolls the transaction back.
                error!("event=employee_create module=service status=rollback error={err}");
                Err(err)
            }
        }
    }

    /// Applies a partial update to an employee and, when a passport payload
    /// is supplied, to its passport row in place.
    pub fn update(
        &self,
        employee_id: EmployeeId,
        update: &EmployeeUpdate,
    ) -> Result<(), EmployeeServiceError> {
        let employees = SqliteEmployeeRepository::new(self.conn);
        if employees.count_employees(employee_id)? < 1 {
            return Err(EmployeeServiceError::EmployeeNotFound(employee_id));
        }

        let tx = self.begin_immediate("employee_update")?;
        match update_in_tx(&tx, employee_id, update) {
            Ok(()) => {
                commit("employee_update", tx)?;
                info!(
                    "event=employee_update module=service status=ok employee_id={employee_id}"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=employee_update module=service status=rollback employee_id={employee_id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Deletes an employee and its passport in one transaction.
    ///
    /// Deleting an absent employee commits as a no-op; company and
    /// department rows always survive.
    pub fn delete(&self, employee_id: EmployeeId) -> Result<(), EmployeeServiceError> {
        let tx = self.begin_immediate("employee_delete")?;
        match delete_in_tx(&tx, employee_id) {
            Ok(()) => {
                commit("employee_delete", tx)?;
                info!(
                    "event=employee_delete module=service status=ok employee_id={employee_id}"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=employee_delete module=service status=rollback employee_id={employee_id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Lists a company's employees hydrated with department and passport.
    pub fn employees_by_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<Employee>, EmployeeServiceError> {
        let employees = SqliteEmployeeRepository::new(self.conn);
        Ok(employees.find_by_company(company_id)?)
    }

    /// Same listing, additionally filtered by department.
    pub fn employees_by_company_and_department(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, EmployeeServiceError> {
        let employees = SqliteEmployeeRepository::new(self.conn);
        Ok(employees.find_by_company_and_department(company_id, department_id)?)
    }

    fn begin_immediate(
        &self,
        operation: &'static str,
    ) -> Result<Transaction<'conn>, EmployeeServiceError> {
        Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate).map_err(|err| {
            let err = RepoError::from(err);
            error!("event={operation} module=service status=error error_code=tx_begin_failed error={err}");
            EmployeeServiceError::Storage(err)
        })
    }
}

fn create_in_tx(
    tx: &Transaction<'_>,
    input: &NewEmployee,
) -> Result<EmployeeId, EmployeeServiceError> {
    let directory = SqliteDirectoryRepository::new(tx);
    let employees = SqliteEmployeeRepository::new(tx);

    let Some(passport) = input.passport.as_ref() else {
        return Err(EmployeeInputError::PassportRequired.into());
    };
    let passport_id = directory.insert_passport(passport)?;

    let department_id = match (input.department_id, input.department.as_ref()) {
        (Some(department_id), _) => department_id,
        (None, Some(department)) => directory.insert_department(department)?,
        (None, None) => return Err(EmployeeInputError::DepartmentRequired.into()),
    };

    Ok(employees.insert(input, passport_id, department_id)?)
}

fn update_in_tx(
    tx: &Transaction<'_>,
    employee_id: EmployeeId,
    update: &EmployeeUpdate,
) -> Result<(), EmployeeServiceError> {
    let directory = SqliteDirectoryRepository::new(tx);
    let employees = SqliteEmployeeRepository::new(tx);

    let mut changes = EmployeeColumnUpdate::default();

    if let Some(company_id) = update.company_id {
        if directory.count_companies(company_id)? < 1 {
            return Err(EmployeeServiceError::CompanyNotFound(company_id));
        }
        changes.set_company(company_id);
    }

    if let Some(department_id) = update.department_id {
        if directory.count_departments(department_id)? < 1 {
            return Err(EmployeeServiceError::DepartmentNotFound(department_id));
        }
        changes.set_department(department_id);
    }

    if let Some(name) = supplied(update.name.as_deref()) {
        changes.set_name(name);
    }
    if let Some(surname) = supplied(update.surname.as_deref()) {
        changes.set_surname(surname);
    }
    if let Some(phone) = supplied(update.phone.as_deref()) {
        changes.set_phone(phone);
    }

    if let Some(passport) = update.passport.as_ref() {
        if let Some(passport_id) = employees.passport_id(employee_id)? {
            directory.update_passport(passport_id, passport)?;
        }
    }

    employees.apply_update(employee_id, &changes)?;
    Ok(())
}

fn delete_in_tx(
    tx: &Transaction<'_>,
    employee_id: EmployeeId,
) -> Result<(), EmployeeServiceError> {
    let directory = SqliteDirectoryRepository::new(tx);
    let employees = SqliteEmployeeRepository::new(tx);

    let passport_id = employees.passport_id(employee_id)?;
    employees.delete(employee_id)?;
    if let Some(passport_id) = passport_id {
        directory.delete_passport(passport_id)?;
    }

    Ok(())
}

fn commit(operation: &'static str, tx: Transaction<'_>) -> Result<(), EmployeeServiceError> {
    tx.commit().map_err(|err| {
        let err = RepoError::from(err);
        error!("event={operation} module=service status=rollback error_code=tx_commit_failed error={err}");
        EmployeeServiceError::Storage(err)
    })
}

/// Treats absent and empty strings the same: neither queues an assignment.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
