//! SQLite storage gateway and schema bootstrap entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the staff directory core.
//! - Apply the fixed schema and seed data idempotently at startup.
//!
//! # Invariants
//! - Returned connections enforce foreign keys.
//! - Core code must not read/write entity data before
//!   `ensure_schema_and_seed` has succeeded once for the store.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod bootstrap;
mod open;

pub use bootstrap::ensure_schema_and_seed;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-gateway error: connectivity, pragma, or statement failure.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
