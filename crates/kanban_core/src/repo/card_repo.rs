//! Card repository contract and SQLite implementation.
//!
//! # Invariants
//! - Column scans return cards in insertion order, not position order.
//! - Content patches never touch `column_id` or `position`.
//! - Placement patches write `column_id` and `position` in one statement.

use super::sqlite::{parse_uuid, SqliteKanbanStore};
use super::RepoResult;
use crate::model::card::{Card, CardId};
use crate::model::column::ColumnId;
use crate::model::Position;
use rusqlite::{params, Row};

/// Repository interface for the `cards` collection.
pub trait CardRepository {
    fn insert_card(&self, card: &Card) -> RepoResult<CardId>;
    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>>;
    /// Lists cards through the column index.
    fn list_cards_by_column(&self, column_id: ColumnId) -> RepoResult<Vec<Card>>;
    /// Replaces title and description.
    fn update_card_content(
        &self,
        id: CardId,
        title: &str,
        description: Option<&str>,
    ) -> RepoResult<bool>;
    fn update_card_position(&self, id: CardId, position: Position) -> RepoResult<bool>;
    /// Re-parents the card and sets its position in the new column.
    fn update_card_placement(
        &self,
        id: CardId,
        column_id: ColumnId,
        position: Position,
    ) -> RepoResult<bool>;
    fn delete_card(&self, id: CardId) -> RepoResult<bool>;
}

impl CardRepository for SqliteKanbanStore<'_> {
    fn insert_card(&self, card: &Card) -> RepoResult<CardId> {
        self.conn.execute(
            "INSERT INTO cards (id, column_id, title, description, position)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                card.id.to_string(),
                card.column_id.to_string(),
                card.title,
                card.description.as_deref(),
                card.position,
            ],
        )?;
        Ok(card.id)
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, column_id, title, description, position
             FROM cards
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }
        Ok(None)
    }

    fn list_cards_by_column(&self, column_id: ColumnId) -> RepoResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, column_id, title, description, position
             FROM cards
             WHERE column_id = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([column_id.to_string()])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(row)?);
        }
        Ok(cards)
    }

    fn update_card_content(
        &self,
        id: CardId,
        title: &str,
        description: Option<&str>,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE cards
             SET title = ?2,
                 description = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), title, description],
        )?;
        Ok(changed > 0)
    }

    fn update_card_position(&self, id: CardId, position: Position) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE cards
             SET position = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), position],
        )?;
        Ok(changed > 0)
    }

    fn update_card_placement(
        &self,
        id: CardId,
        column_id: ColumnId,
        position: Position,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE cards
             SET column_id = ?2,
                 position = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), column_id.to_string(), position],
        )?;
        Ok(changed > 0)
    }

    fn delete_card(&self, id: CardId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_card_row(row: &Row<'_>) -> RepoResult<Card> {
    let id_text: String = row.get("id")?;
    let column_id_text: String = row.get("column_id")?;
    let description: Option<String> = row.get("description")?;
    Ok(Card {
        id: parse_uuid(&id_text, "cards.id")?,
        column_id: parse_uuid(&column_id_text, "cards.column_id")?,
        title: row.get("title")?,
        description,
        position: row.get("position")?,
    })
}
