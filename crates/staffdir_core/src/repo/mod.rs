//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Any connectivity or statement failure surfaces as a repository error.
//! - A read that matches no rows returns an empty sequence or `None`, never
//!   an error.

pub mod directory_repo;
pub mod employee_repo;
