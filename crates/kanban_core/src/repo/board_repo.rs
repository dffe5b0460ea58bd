//! Board repository contract and SQLite implementation.
//!
//! # Invariants
//! - Owner listing returns boards in insertion order.
//! - Deleting a board with live columns fails on SQLite (foreign keys); the
//!   board service always deletes children first.

use super::sqlite::{parse_uuid, SqliteKanbanStore};
use super::RepoResult;
use crate::model::board::{Board, BoardId};
use rusqlite::{params, Row};

/// Repository interface for the `boards` collection.
pub trait BoardRepository {
    /// Inserts one board row.
    fn insert_board(&self, board: &Board) -> RepoResult<BoardId>;
    /// Loads one board by id.
    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>>;
    /// Lists boards through the owner index.
    fn list_boards_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Board>>;
    /// Replaces the board title. Returns `false` when the board is missing.
    fn update_board_title(&self, id: BoardId, title: &str) -> RepoResult<bool>;
    /// Deletes one board row. Returns `false` when the board is missing.
    fn delete_board(&self, id: BoardId) -> RepoResult<bool>;
}

impl BoardRepository for SqliteKanbanStore<'_> {
    fn insert_board(&self, board: &Board) -> RepoResult<BoardId> {
        self.conn.execute(
            "INSERT INTO boards (id, title, owner_id) VALUES (?1, ?2, ?3);",
            params![board.id.to_string(), board.title, board.owner_id],
        )?;
        Ok(board.id)
    }

    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, owner_id
             FROM boards
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }
        Ok(None)
    }

    fn list_boards_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Board>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, owner_id
             FROM boards
             WHERE owner_id = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([owner_id])?;
        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(parse_board_row(row)?);
        }
        Ok(boards)
    }

    fn update_board_title(&self, id: BoardId, title: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE boards SET title = ?2 WHERE id = ?1;",
            params![id.to_string(), title],
        )?;
        Ok(changed > 0)
    }

    fn delete_board(&self, id: BoardId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM boards WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_board_row(row: &Row<'_>) -> RepoResult<Board> {
    let id_text: String = row.get("id")?;
    Ok(Board {
        id: parse_uuid(&id_text, "boards.id")?,
        title: row.get("title")?,
        owner_id: row.get("owner_id")?,
    })
}
