//! Employee domain model.
//!
//! # Responsibility
//! - Define the Company/Department/Passport/Employee read models.
//! - Define the input shapes accepted by the mutation engine.
//! - Validate create input before any storage work happens.
//!
//! # Invariants
//! - Ids are store-generated surrogate keys; input shapes never carry an
//!   Employee or Passport id.
//! - Serialized field names are the contract honored by outer transport
//!   layers and must stay stable.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a company row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CompanyId = i64;
/// Stable identifier for a department row.
pub type DepartmentId = i64;
/// Stable identifier for a passport row.
pub type PassportId = i64;
/// Stable identifier for an employee row.
pub type EmployeeId = i64;

/// Company read model.
///
/// Read-only from this subsystem's perspective; the core never mutates or
/// deletes company rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

/// Department read model.
///
/// Lifecycle is independent of Employee: a department may be created inline
/// while creating an employee, but it survives employee deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub phone: String,
}

/// Passport read model.
///
/// Owned 1:1 by exactly one employee; created with its employee, updated in
/// place, deleted when the employee is deleted. The ownership invariant is
/// upheld by the mutation workflow, not by a store constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passport {
    pub id: PassportId,
    /// Serialized as `Type` to match external schema naming.
    #[serde(rename = "Type")]
    pub kind: String,
    pub number: String,
}

/// Employee read model with its joined satellites.
///
/// `department` and `passport` are non-persisted views populated only by the
/// join read path; the three id columns stay the persisted source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: CompanyId,
    pub passport_id: PassportId,
    pub department_id: DepartmentId,
    pub department: Department,
    pub passport: Passport,
}

/// Department payload for inline creation alongside an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewDepartment {
    pub name: String,
    pub phone: String,
}

/// Passport payload carried by create and update input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPassport {
    #[serde(rename = "Type")]
    pub kind: String,
    pub number: String,
}

/// Create input for an employee and its dependent rows.
///
/// Exactly one of `department_id` / `department` must resolve to a
/// department; when both are present the existing id wins and the payload is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewEmployee {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: CompanyId,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub department: Option<NewDepartment>,
    #[serde(default)]
    pub passport: Option<NewPassport>,
}

/// Partial update input for an employee.
///
/// Absent fields leave the persisted columns untouched; empty strings are
/// treated as absent, so a field cannot be cleared through this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub passport: Option<NewPassport>,
}

/// Validation error for employee create input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeInputError {
    /// No passport payload was supplied.
    PassportRequired,
    /// The passport payload has an empty type or number.
    PassportFieldsEmpty,
    /// Neither an existing department id nor a department payload was given.
    DepartmentRequired,
}

impl Display for EmployeeInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PassportRequired => {
                write!(f, "a new employee requires a passport payload")
            }
            Self::PassportFieldsEmpty => {
                write!(f, "passport type and number must not be empty")
            }
            Self::DepartmentRequired => {
                write!(
                    f,
                    "a new employee requires a department id or a department payload"
                )
            }
        }
    }
}

impl Error for EmployeeInputError {}

impl NewEmployee {
    /// Checks the create preconditions that must hold before any row is
    /// written.
    pub fn validate(&self) -> Result<(), EmployeeInputError> {
        match self.passport.as_ref() {
            None => return Err(EmployeeInputError::PassportRequired),
            Some(passport) if passport.kind.is_empty() || passport.number.is_empty() => {
                return Err(EmployeeInputError::PassportFieldsEmpty);
            }
            Some(_) => {}
        }

        if self.department_id.is_none() && self.department.is_none() {
            return Err(EmployeeInputError::DepartmentRequired);
        }

        Ok(())
    }
}
