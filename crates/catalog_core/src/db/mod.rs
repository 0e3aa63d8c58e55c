//! Catalog database bootstrap.
//!
//! # Responsibility
//! - Open the SQLite file (or a private in-memory database) backing the store.
//! - Make sure the `products` table exists before any record is touched.
//!
//! # Invariants
//! - The on-disk schema version lives in `PRAGMA user_version`.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or talking to the catalog database.
#[derive(Debug)]
pub enum DbError {
    /// Error reported by the SQLite engine.
    Engine(rusqlite::Error),
    /// The file carries a schema version this build does not know.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "catalog database uses schema v{found}; this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn schema_too_new_names_both_versions() {
        let message = DbError::SchemaTooNew {
            found: 4,
            supported: 1,
        }
        .to_string();
        assert_eq!(
            message,
            "catalog database uses schema v4; this build reads up to v1"
        );
    }
}
