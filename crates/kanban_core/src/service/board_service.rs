//! Board use-case service.
//!
//! # Responsibility
//! - Create boards with their default columns.
//! - Tear boards down through an explicit cards → columns → board plan.
//! - Reconcile positions after interrupted or racing writes.
//!
//! # Invariants
//! - A new board always starts with [`DEFAULT_COLUMN_TITLES`] at `1..=3`.
//! - No column or card outlives its board.

use super::card_service::apply_card_positions;
use super::column_service::{apply_column_positions, delete_column_cascade};
use super::{normalize_title, MutationOutcome, ServiceResult};
use crate::model::board::{Board, BoardId, DEFAULT_COLUMN_TITLES};
use crate::model::column::Column;
use crate::model::Position;
use crate::ordering::normalize;
use crate::repo::KanbanStore;
use log::{debug, info};

/// Board service facade.
pub struct BoardService<S: KanbanStore> {
    store: S,
}

impl<S: KanbanStore> BoardService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists the owner's boards in store insertion order.
    pub fn list(&self, owner_id: &str) -> ServiceResult<Vec<Board>> {
        Ok(self.store.list_boards_by_owner(owner_id)?)
    }

    /// Loads one board; `None` when it does not exist.
    pub fn get(&self, board_id: BoardId) -> ServiceResult<Option<Board>> {
        Ok(self.store.get_board(board_id)?)
    }

    /// Creates a board and seeds its default columns.
    ///
    /// On a store with rollback support a failed seed leaves no board behind.
    pub fn create(
        &self,
        title: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> ServiceResult<BoardId> {
        let board = Board::new(normalize_title(title.into())?, owner_id);
        self.store.atomically(|| {
            let board_id = self.store.insert_board(&board)?;
            for (index, column_title) in DEFAULT_COLUMN_TITLES.iter().enumerate() {
                let column = Column::new(board_id, *column_title, index as Position + 1);
                self.store.insert_column(&column)?;
            }

            info!(
                "event=board_create module=service status=ok board_id={} columns={}",
                board_id,
                DEFAULT_COLUMN_TITLES.len()
            );
            Ok(board_id)
        })
    }

    /// Renames one board.
    pub fn rename(
        &self,
        board_id: BoardId,
        title: impl Into<String>,
    ) -> ServiceResult<MutationOutcome> {
        let title = normalize_title(title.into())?;
        Ok(self
            .store
            .update_board_title(board_id, title.as_str())?
            .into())
    }

    /// Deletes the board with every column and card it owns.
    pub fn remove(&self, board_id: BoardId) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            if self.store.get_board(board_id)?.is_none() {
                debug!("event=board_remove module=service status=noop board_id={board_id}");
                return Ok(MutationOutcome::NoOp);
            }

            let columns = self.store.list_columns_by_board(board_id)?;
            let mut removed_cards = 0;
            for column in &columns {
                removed_cards += delete_column_cascade(&self.store, column.id)?;
            }
            self.store.delete_board(board_id)?;

            info!(
                "event=board_remove module=service status=ok board_id={} removed_columns={} removed_cards={}",
                board_id,
                columns.len(),
                removed_cards
            );
            Ok(MutationOutcome::Applied)
        })
    }

    /// Renumbers the board's columns and every column's cards into dense
    /// `1..N` order, keeping their current relative order.
    pub fn repair(&self, board_id: BoardId) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            if self.store.get_board(board_id)?.is_none() {
                return Ok(MutationOutcome::NoOp);
            }

            let columns = self.store.list_columns_by_board(board_id)?;
            let column_updates = normalize(&columns);
            apply_column_positions(&self.store, &column_updates)?;

            let mut card_updates = 0;
            for column in &columns {
                let cards = self.store.list_cards_by_column(column.id)?;
                let updates = normalize(&cards);
                apply_card_positions(&self.store, &updates)?;
                card_updates += updates.len();
            }

            info!(
                "event=board_repair module=service status=ok board_id={} column_updates={} card_updates={}",
                board_id,
                column_updates.len(),
                card_updates
            );
            Ok(MutationOutcome::Applied)
        })
    }
}
