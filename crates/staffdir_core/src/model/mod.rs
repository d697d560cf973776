//! Domain model for the staff directory.
//!
//! # Responsibility
//! - Define the entity and input shapes used by core business logic.
//! - Keep the serialized field names stable for outer transport layers.
//!
//! # Invariants
//! - Every entity is identified by a surrogate integer key generated by the
//!   store.
//! - Employee is the owning record; Company, Department and Passport are
//!   referenced by id.

pub mod employee;
