//! Card use-case service.
//!
//! # Responsibility
//! - Create, edit, remove and move cards between columns.
//! - Keep every column's card positions dense by delegating to
//!   [`crate::ordering`].
//!
//! # Invariants
//! - Content edits never change `column_id` or `position`.
//! - A cross-column move writes the card's new column and position in a
//!   single store call.
//! - Board-wide listing sorts by raw position across all columns; callers
//!   that need one column's order filter by `column_id` or use
//!   [`CardService::list_in_column`].

use super::{
    normalize_description, normalize_title, MutationOutcome, ServiceError, ServiceResult,
};
use crate::model::board::BoardId;
use crate::model::card::{Card, CardId};
use crate::model::column::ColumnId;
use crate::model::Position;
use crate::ordering::{compact, move_across, move_within, next_position, PositionUpdate};
use crate::repo::{KanbanStore, RepoResult};
use log::{debug, info};

/// Card service facade.
pub struct CardService<S: KanbanStore> {
    store: S,
}

impl<S: KanbanStore> CardService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every card on the board, stably sorted by raw position.
    ///
    /// Positions are only unique within a column, so cards from different
    /// columns interleave; ties keep column order.
    pub fn list(&self, board_id: BoardId) -> ServiceResult<Vec<Card>> {
        let mut cards = Vec::new();
        for column in self.store.list_columns_by_board(board_id)? {
            cards.extend(self.store.list_cards_by_column(column.id)?);
        }
        cards.sort_by_key(|card| card.position);
        Ok(cards)
    }

    /// Lists one column's cards in ascending position order.
    pub fn list_in_column(&self, column_id: ColumnId) -> ServiceResult<Vec<Card>> {
        let mut cards = self.store.list_cards_by_column(column_id)?;
        cards.sort_by_key(|card| card.position);
        Ok(cards)
    }

    /// Loads one card; `None` when it does not exist.
    pub fn get(&self, card_id: CardId) -> ServiceResult<Option<Card>> {
        Ok(self.store.get_card(card_id)?)
    }

    /// Appends a card to the end of the column.
    pub fn create(
        &self,
        column_id: ColumnId,
        title: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<CardId> {
        let title = normalize_title(title.into())?;
        let description = normalize_description(description);
        self.store.atomically(|| {
            if self.store.get_column(column_id)?.is_none() {
                return Err(ServiceError::ColumnNotFound(column_id));
            }

            let siblings = self.store.list_cards_by_column(column_id)?;
            let card = Card::new(column_id, title, description, next_position(&siblings));
            let card_id = self.store.insert_card(&card)?;
            info!(
                "event=card_create module=service status=ok column_id={} card_id={} position={}",
                column_id, card_id, card.position
            );
            Ok(card_id)
        })
    }

    /// Replaces title and description of one card.
    pub fn update(
        &self,
        card_id: CardId,
        title: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<MutationOutcome> {
        let title = normalize_title(title.into())?;
        let description = normalize_description(description);
        let changed =
            self.store
                .update_card_content(card_id, title.as_str(), description.as_deref())?;
        if !changed {
            debug!("event=card_update module=service status=noop card_id={card_id}");
        }
        Ok(changed.into())
    }

    /// Deletes one card and compacts the remaining cards of its column.
    pub fn remove(&self, card_id: CardId) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            let Some(card) = self.store.get_card(card_id)? else {
                debug!("event=card_remove module=service status=noop card_id={card_id}");
                return Ok(MutationOutcome::NoOp);
            };

            self.store.delete_card(card.id)?;
            let remaining = self.store.list_cards_by_column(card.column_id)?;
            let updates = compact(&remaining, card.id);
            apply_card_positions(&self.store, &updates)?;

            info!(
                "event=card_remove module=service status=ok card_id={} column_id={} renumbered={}",
                card_id,
                card.column_id,
                updates.len()
            );
            Ok(MutationOutcome::Applied)
        })
    }

    /// Moves one card to `target_position` in `target_column_id`.
    ///
    /// Same-column moves reorder in place. Cross-column moves compact the
    /// source column, then splice the card into the target column. Targets
    /// are clamped into the valid range of the destination.
    pub fn move_card(
        &self,
        card_id: CardId,
        target_column_id: ColumnId,
        target_position: Position,
    ) -> ServiceResult<MutationOutcome> {
        self.store.atomically(|| {
            let Some(card) = self.store.get_card(card_id)? else {
                debug!("event=card_move module=service status=noop card_id={card_id}");
                return Ok(MutationOutcome::NoOp);
            };

            if card.column_id == target_column_id {
                let siblings = self.store.list_cards_by_column(card.column_id)?;
                let Some(updates) = move_within(&siblings, card.id, target_position) else {
                    return Ok(MutationOutcome::NoOp);
                };
                apply_card_positions(&self.store, &updates)?;
                info!(
                    "event=card_move module=service status=ok mode=within card_id={} column_id={} updated={}",
                    card_id,
                    card.column_id,
                    updates.len()
                );
                return Ok(MutationOutcome::Applied);
            }

            if self.store.get_column(target_column_id)?.is_none() {
                return Err(ServiceError::ColumnNotFound(target_column_id));
            }

            let source = self.store.list_cards_by_column(card.column_id)?;
            let target = self.store.list_cards_by_column(target_column_id)?;
            let plan = move_across(&source, &target, card.id, target_position);

            apply_card_positions(&self.store, &plan.source_updates)?;
            apply_card_positions(&self.store, &plan.target_updates)?;
            self.store
                .update_card_placement(card.id, target_column_id, plan.moved_position)?;

            info!(
                "event=card_move module=service status=ok mode=across card_id={} from_column_id={} to_column_id={} position={}",
                card_id, card.column_id, target_column_id, plan.moved_position
            );
            Ok(MutationOutcome::Applied)
        })
    }
}

pub(crate) fn apply_card_positions<S: KanbanStore>(
    store: &S,
    updates: &[PositionUpdate],
) -> RepoResult<()> {
    for update in updates {
        store.update_card_position(update.id, update.position)?;
    }
    Ok(())
}
