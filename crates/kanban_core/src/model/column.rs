//! Column domain model.

use crate::model::board::BoardId;
use crate::model::Position;
use crate::ordering::Sibling;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable column identifier.
pub type ColumnId = Uuid;

/// Ordered lane of cards, exclusively owned by one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    /// Dense 1-based slot among the board's columns.
    pub position: Position,
}

impl Column {
    /// Creates a column with a generated id at `position`.
    pub fn new(board_id: BoardId, title: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            title: title.into(),
            position,
        }
    }
}

impl Sibling for Column {
    fn id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}
