//! Board domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable board identifier.
pub type BoardId = Uuid;

/// Titles of the columns seeded into every new board, in position order.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Root of the board → column → card ownership tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    /// Opaque user id supplied by the identity layer.
    pub owner_id: String,
}

impl Board {
    /// Creates a board with a generated id.
    pub fn new(title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            owner_id: owner_id.into(),
        }
    }
}
