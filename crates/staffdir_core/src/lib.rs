//! Core domain logic for the staff directory service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    Company, CompanyId, Department, DepartmentId, Employee, EmployeeId, EmployeeInputError,
    EmployeeUpdate, NewDepartment, NewEmployee, NewPassport, Passport, PassportId,
};
pub use repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
pub use repo::employee_repo::{
    EmployeeColumnUpdate, EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::{EmployeeService, EmployeeServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
