//! Entity store contracts and backends.
//!
//! # Responsibility
//! - Define per-collection data access contracts for boards, columns and cards.
//! - Keep storage details (SQL, in-memory indexes) out of service code.
//!
//! # Invariants
//! - Lookups by id return `Ok(None)` for missing rows, never an error.
//! - Parent-index scans return rows in insertion order; callers sort.
//! - Mutations by id report whether a row was touched instead of failing.
//!
//! # Backends
//! - [`SqliteKanbanStore`]: migrated SQLite connection, savepoint-backed
//!   atomic scopes.
//! - [`MemoryKanbanStore`]: process-local maps with secondary indexes; each
//!   call is serialized but atomic scopes do not roll back.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_repo;
pub mod card_repo;
pub mod column_repo;
pub mod memory;
pub mod sqlite;

pub use board_repo::BoardRepository;
pub use card_repo::CardRepository;
pub use column_repo::ColumnRepository;
pub use memory::MemoryKanbanStore;
pub use sqlite::SqliteKanbanStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from entity store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
    /// A previous writer panicked while holding the store lock.
    Poisoned(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "board store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "board store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "board store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid board data: {message}"),
            Self::Poisoned(store) => write!(f, "{store} lock poisoned by a panicked writer"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Runs a multi-step read-compute-write sequence as one unit where the
/// backend supports it.
pub trait AtomicScope {
    /// Executes `op`; on `Err` the backend discards the writes made by `op`
    /// if it is able to.
    fn atomically<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>;
}

/// Full entity store surface consumed by the services.
pub trait KanbanStore: BoardRepository + ColumnRepository + CardRepository + AtomicScope {}

impl<S> KanbanStore for S where S: BoardRepository + ColumnRepository + CardRepository + AtomicScope {}
