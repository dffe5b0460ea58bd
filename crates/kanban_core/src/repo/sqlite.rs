//! SQLite-backed entity store.
//!
//! # Responsibility
//! - Own the borrowed connection shared by the board/column/card
//!   repository implementations.
//! - Verify schema readiness before any query runs.
//! - Map atomic scopes onto nestable SQLite savepoints that roll back on
//!   drop.
//!
//! # Invariants
//! - Construction fails unless the connection is migrated to the latest
//!   version and exposes every required table and column.

use super::{AtomicScope, RepoError, RepoResult};
use crate::db::migrations::latest_version;
use log::error;
use rusqlite::Connection;
use uuid::Uuid;

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("boards", &["id", "title", "owner_id"]),
    ("board_columns", &["id", "board_id", "title", "position"]),
    (
        "cards",
        &["id", "column_id", "title", "description", "position"],
    ),
];

/// Entity store over one migrated SQLite connection.
///
/// Cheap to copy; every service built from the same connection shares its
/// transaction state.
#[derive(Clone, Copy)]
pub struct SqliteKanbanStore<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteKanbanStore<'conn> {
    /// Creates store from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AtomicScope for SqliteKanbanStore<'_> {
    fn atomically<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        let scope = SavepointGuard::begin(self.conn)?;
        let value = op()?;
        scope.release()?;
        Ok(value)
    }
}

/// Open `kanban_op` savepoint. Rolls back on drop unless released, including
/// when the scope unwinds.
struct SavepointGuard<'conn> {
    conn: &'conn Connection,
    released: bool,
}

impl<'conn> SavepointGuard<'conn> {
    fn begin(conn: &'conn Connection) -> RepoResult<Self> {
        conn.execute_batch("SAVEPOINT kanban_op;")?;
        Ok(Self {
            conn,
            released: false,
        })
    }

    fn release(mut self) -> RepoResult<()> {
        self.conn.execute_batch("RELEASE kanban_op;")?;
        self.released = true;
        Ok(())
    }
}

impl Drop for SavepointGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self
            .conn
            .execute_batch("ROLLBACK TO kanban_op; RELEASE kanban_op;")
        {
            error!("event=store_rollback module=repo status=error error={err}");
        }
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
