//! Card domain model.
//!
//! # Invariants
//! - `description` is `None` rather than an empty string when absent.
//! - `position` is dense `1..N` among cards sharing `column_id`.

use crate::model::column::ColumnId;
use crate::model::Position;
use crate::ordering::Sibling;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable card identifier.
pub type CardId = Uuid;

/// Unit of work on a board, exclusively owned by one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: Position,
}

impl Card {
    /// Creates a card with a generated id at `position`.
    pub fn new(
        column_id: ColumnId,
        title: impl Into<String>,
        description: Option<String>,
        position: Position,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            column_id,
            title: title.into(),
            description,
            position,
        }
    }
}

impl Sibling for Card {
    fn id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}
