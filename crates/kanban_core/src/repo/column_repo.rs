//! Column repository contract and SQLite implementation.
//!
//! # Invariants
//! - Board scans return columns in insertion order, not position order.
//! - Position writes touch exactly one row; renumbering is the caller's job.

use super::sqlite::{parse_uuid, SqliteKanbanStore};
use super::RepoResult;
use crate::model::board::BoardId;
use crate::model::column::{Column, ColumnId};
use crate::model::Position;
use rusqlite::{params, Row};

/// Repository interface for the board columns collection.
pub trait ColumnRepository {
    fn insert_column(&self, column: &Column) -> RepoResult<ColumnId>;
    fn get_column(&self, id: ColumnId) -> RepoResult<Option<Column>>;
    /// Lists columns through the board index.
    fn list_columns_by_board(&self, board_id: BoardId) -> RepoResult<Vec<Column>>;
    fn update_column_title(&self, id: ColumnId, title: &str) -> RepoResult<bool>;
    fn update_column_position(&self, id: ColumnId, position: Position) -> RepoResult<bool>;
    /// Deletes one column row. Fails on SQLite while cards still reference it.
    fn delete_column(&self, id: ColumnId) -> RepoResult<bool>;
}

impl ColumnRepository for SqliteKanbanStore<'_> {
    fn insert_column(&self, column: &Column) -> RepoResult<ColumnId> {
        self.conn.execute(
            "INSERT INTO board_columns (id, board_id, title, position)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                column.id.to_string(),
                column.board_id.to_string(),
                column.title,
                column.position,
            ],
        )?;
        Ok(column.id)
    }

    fn get_column(&self, id: ColumnId) -> RepoResult<Option<Column>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, board_id, title, position
             FROM board_columns
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_column_row(row)?));
        }
        Ok(None)
    }

    fn list_columns_by_board(&self, board_id: BoardId) -> RepoResult<Vec<Column>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, board_id, title, position
             FROM board_columns
             WHERE board_id = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([board_id.to_string()])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(parse_column_row(row)?);
        }
        Ok(columns)
    }

    fn update_column_title(&self, id: ColumnId, title: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE board_columns
             SET title = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), title],
        )?;
        Ok(changed > 0)
    }

    fn update_column_position(&self, id: ColumnId, position: Position) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE board_columns
             SET position = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), position],
        )?;
        Ok(changed > 0)
    }

    fn delete_column(&self, id: ColumnId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM board_columns WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_column_row(row: &Row<'_>) -> RepoResult<Column> {
    let id_text: String = row.get("id")?;
    let board_id_text: String = row.get("board_id")?;
    Ok(Column {
        id: parse_uuid(&id_text, "board_columns.id")?,
        board_id: parse_uuid(&board_id_text, "board_columns.board_id")?,
        title: row.get("title")?,
        position: row.get("position")?,
    })
}
