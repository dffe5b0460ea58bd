//! Column use-case service.
//!
//! # Responsibility
//! - Append, move, rename and remove columns within a board.
//! - Delegate every position computation to [`crate::ordering`].
//!
//! # Invariants
//! - New columns land after the current maximum position.
//! - Removing a column removes its cards first, then compacts the board.

use super::{normalize_title, MutationOutcome, ServiceError, ServiceResult};
use crate::model::board::BoardId;
use crate::model::column::{Column, ColumnId};
use crate::model::Position;
use crate::ordering::{compact, move_within, next_position, PositionUpdate};
use crate::repo::{KanbanStore, RepoResult};
use log::{debug, info};

/// Column service facade.
pub struct ColumnService<S: KanbanStore> {
    store: S,
}

impl<S: KanbanStore> ColumnService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists the board's columns in ascending position order.
    pub fn list(&self, board_id: BoardId) -> ServiceResult<Vec<Column>> {
        let mut columns = self.store.list_columns_by_board(board_id)?;
        columns.sort_by_key(|column| column.position);
        Ok(columns)
    }

    /// Loads one column; `None` when it does not exist.
    pub fn get(&self, column_id: ColumnId) -> ServiceResult<Option<Column>> {
        Ok(self.store.get_column(column_id)?)
    }

    /// Appends a column to the end of the board.
    pub fn create(&self, board_id: BoardId, title: impl Into<String>) -> ServiceResult<ColumnId> {
        let title = normalize_title(title.into())?;
        self.store.atomically(|| {
            if self.store.get_board(board_id)?.is_none() {
                return Err(ServiceError::BoardNotFound(board_id));
            }

            let siblings = self.store.list_columns_by_board(board_id)?;
            let column = Column::new(board_id, title, next_position(&siblings));
            let column_id = self.store.insert_column(&column)?;
            info!(
                "event=column_create module=service status=ok board_id={} column_id={} position={}",
                board_id, column_id, column.position
            );
            Ok(column_id)
        })
    }

    /// Renames one column. Position is untouched.
    pub fn rename(
        &self,
        column_id: ColumnId,
        title: impl Into<String>,
    ) -> ServiceResult<MutationOutcome> {
        let title = normalize_title(title.into())?;
        let changed = self.store.update_column_title(column_id, title.as_str())?;
        Ok(changed.into())
    }

    /// Moves one column to `target_position` among its board's columns.
    ///
    /// Out-of-range targets are clamped into `[1, N]`.
    pub fn move_column(
        &self,
        column_id: ColumnId,
        target_position: Position,
    ) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            let Some(column) = self.store.get_column(column_id)? else {
                debug!("event=column_move module=service status=noop column_id={column_id}");
                return Ok(MutationOutcome::NoOp);
            };

            let siblings = self.store.list_columns_by_board(column.board_id)?;
            let Some(updates) = move_within(&siblings, column.id, target_position) else {
                return Ok(MutationOutcome::NoOp);
            };
            apply_column_positions(&self.store, &updates)?;

            info!(
                "event=column_move module=service status=ok column_id={} target_position={} updated={}",
                column_id,
                target_position,
                updates.len()
            );
            Ok(MutationOutcome::Applied)
        })
    }

    /// Deletes one column with all of its cards and closes the gap it leaves.
    pub fn remove(&self, column_id: ColumnId) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            let Some(column) = self.store.get_column(column_id)? else {
                debug!("event=column_remove module=service status=noop column_id={column_id}");
                return Ok(MutationOutcome::NoOp);
            };

            let removed_cards = delete_column_cascade(&self.store, column.id)?;
            let remaining = self.store.list_columns_by_board(column.board_id)?;
            let updates = compact(&remaining, column.id);
            apply_column_positions(&self.store, &updates)?;

            info!(
                "event=column_remove module=service status=ok column_id={} removed_cards={} renumbered={}",
                column_id,
                removed_cards,
                updates.len()
            );
            Ok(MutationOutcome::Applied)
        })
    }
}

/// Deletes every card of the column, then the column row itself.
///
/// Returns the number of deleted cards.
pub(crate) fn delete_column_cascade<S: KanbanStore>(
    store: &S,
    column_id: ColumnId,
) -> RepoResult<usize> {
    let cards = store.list_cards_by_column(column_id)?;
    for card in &cards {
        store.delete_card(card.id)?;
    }
    store.delete_column(column_id)?;
    Ok(cards.len())
}

pub(crate) fn apply_column_positions<S: KanbanStore>(
    store: &S,
    updates: &[PositionUpdate],
) -> RepoResult<()> {
    for update in updates {
        store.update_column_position(update.id, update.position)?;
    }
    Ok(())
}
