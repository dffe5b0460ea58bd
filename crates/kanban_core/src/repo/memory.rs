//! In-memory entity store for tests and embedding.
//!
//! # Responsibility
//! - Mirror the SQLite store contract with process-local collections.
//! - Maintain secondary indexes by parent id (owner, board, column).
//!
//! # Invariants
//! - Each call takes the store lock once, so individual reads and writes are
//!   serialized.
//! - [`AtomicScope::atomically`] does not roll back; a failed operation
//!   leaves its earlier writes in place.
//! - Parent scans return rows in insertion order.

use super::{
    AtomicScope, BoardRepository, CardRepository, ColumnRepository, RepoError, RepoResult,
};
use crate::model::board::{Board, BoardId};
use crate::model::card::{Card, CardId};
use crate::model::column::{Column, ColumnId};
use crate::model::Position;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const STORE_NAME: &str = "memory board store";

/// Process-local entity store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryKanbanStore {
    data: Arc<Mutex<MemoryTables>>,
}

#[derive(Default)]
struct MemoryTables {
    boards: Collection<Board>,
    columns: Collection<Column>,
    cards: Collection<Card>,
}

impl MemoryKanbanStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> RepoResult<MutexGuard<'_, MemoryTables>> {
        self.data.lock().map_err(|_| RepoError::Poisoned(STORE_NAME))
    }
}

/// Row type stored in a [`Collection`] with one secondary index.
trait Indexed: Clone {
    type Parent: Clone + Eq + Hash;

    fn key(&self) -> Uuid;
    fn parent(&self) -> Self::Parent;
}

impl Indexed for Board {
    type Parent = String;

    fn key(&self) -> Uuid {
        self.id
    }

    fn parent(&self) -> String {
        self.owner_id.clone()
    }
}

impl Indexed for Column {
    type Parent = BoardId;

    fn key(&self) -> Uuid {
        self.id
    }

    fn parent(&self) -> BoardId {
        self.board_id
    }
}

impl Indexed for Card {
    type Parent = ColumnId;

    fn key(&self) -> Uuid {
        self.id
    }

    fn parent(&self) -> ColumnId {
        self.column_id
    }
}

/// Insertion-ordered rows with a primary and a parent index.
struct Collection<T: Indexed> {
    next_seq: u64,
    rows: BTreeMap<u64, T>,
    by_id: HashMap<Uuid, u64>,
    by_parent: HashMap<T::Parent, BTreeSet<u64>>,
}

impl<T: Indexed> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            rows: BTreeMap::new(),
            by_id: HashMap::new(),
            by_parent: HashMap::new(),
        }
    }
}

impl<T: Indexed> Collection<T> {
    fn insert(&mut self, row: T) -> RepoResult<Uuid> {
        let id = row.key();
        if self.by_id.contains_key(&id) {
            return Err(RepoError::InvalidData(format!("duplicate id {id}")));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(id, seq);
        self.by_parent.entry(row.parent()).or_default().insert(seq);
        self.rows.insert(seq, row);
        Ok(id)
    }

    fn get(&self, id: Uuid) -> Option<T> {
        self.by_id
            .get(&id)
            .and_then(|seq| self.rows.get(seq))
            .cloned()
    }

    fn list_by_parent(&self, parent: &T::Parent) -> Vec<T> {
        self.by_parent
            .get(parent)
            .map(|seqs| {
                seqs.iter()
                    .filter_map(|seq| self.rows.get(seq))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Applies `patch` in place and re-indexes the row if its parent changed.
    fn update(&mut self, id: Uuid, patch: impl FnOnce(&mut T)) -> bool {
        let Some(&seq) = self.by_id.get(&id) else {
            return false;
        };
        let Some(row) = self.rows.get_mut(&seq) else {
            return false;
        };

        let old_parent = row.parent();
        patch(row);
        let new_parent = row.parent();

        if old_parent != new_parent {
            self.unlink_parent(&old_parent, seq);
            self.by_parent.entry(new_parent).or_default().insert(seq);
        }
        true
    }

    fn remove(&mut self, id: Uuid) -> bool {
        let Some(seq) = self.by_id.remove(&id) else {
            return false;
        };
        if let Some(row) = self.rows.remove(&seq) {
            self.unlink_parent(&row.parent(), seq);
        }
        true
    }

    fn unlink_parent(&mut self, parent: &T::Parent, seq: u64) {
        if let Some(seqs) = self.by_parent.get_mut(parent) {
            seqs.remove(&seq);
            if seqs.is_empty() {
                self.by_parent.remove(parent);
            }
        }
    }
}

impl AtomicScope for MemoryKanbanStore {
    fn atomically<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        op()
    }
}

impl BoardRepository for MemoryKanbanStore {
    fn insert_board(&self, board: &Board) -> RepoResult<BoardId> {
        self.tables()?.boards.insert(board.clone())
    }

    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>> {
        Ok(self.tables()?.boards.get(id))
    }

    fn list_boards_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Board>> {
        Ok(self.tables()?.boards.list_by_parent(&owner_id.to_string()))
    }

    fn update_board_title(&self, id: BoardId, title: &str) -> RepoResult<bool> {
        Ok(self
            .tables()?
            .boards
            .update(id, |board| board.title = title.to_string()))
    }

    fn delete_board(&self, id: BoardId) -> RepoResult<bool> {
        Ok(self.tables()?.boards.remove(id))
    }
}

impl ColumnRepository for MemoryKanbanStore {
    fn insert_column(&self, column: &Column) -> RepoResult<ColumnId> {
        self.tables()?.columns.insert(column.clone())
    }

    fn get_column(&self, id: ColumnId) -> RepoResult<Option<Column>> {
        Ok(self.tables()?.columns.get(id))
    }

    fn list_columns_by_board(&self, board_id: BoardId) -> RepoResult<Vec<Column>> {
        Ok(self.tables()?.columns.list_by_parent(&board_id))
    }

    fn update_column_title(&self, id: ColumnId, title: &str) -> RepoResult<bool> {
        Ok(self
            .tables()?
            .columns
            .update(id, |column| column.title = title.to_string()))
    }

    fn update_column_position(&self, id: ColumnId, position: Position) -> RepoResult<bool> {
        Ok(self
            .tables()?
            .columns
            .update(id, |column| column.position = position))
    }

    fn delete_column(&self, id: ColumnId) -> RepoResult<bool> {
        Ok(self.tables()?.columns.remove(id))
    }
}

impl CardRepository for MemoryKanbanStore {
    fn insert_card(&self, card: &Card) -> RepoResult<CardId> {
        self.tables()?.cards.insert(card.clone())
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        Ok(self.tables()?.cards.get(id))
    }

    fn list_cards_by_column(&self, column_id: ColumnId) -> RepoResult<Vec<Card>> {
        Ok(self.tables()?.cards.list_by_parent(&column_id))
    }

    fn update_card_content(
        &self,
        id: CardId,
        title: &str,
        description: Option<&str>,
    ) -> RepoResult<bool> {
        Ok(self.tables()?.cards.update(id, |card| {
            card.title = title.to_string();
            card.description = description.map(str::to_string);
        }))
    }

    fn update_card_position(&self, id: CardId, position: Position) -> RepoResult<bool> {
        Ok(self
            .tables()?
            .cards
            .update(id, |card| card.position = position))
    }

    fn update_card_placement(
        &self,
        id: CardId,
        column_id: ColumnId,
        position: Position,
    ) -> RepoResult<bool> {
        Ok(self.tables()?.cards.update(id, |card| {
            card.column_id = column_id;
            card.position = position;
        }))
    }

    fn delete_card(&self, id: CardId) -> RepoResult<bool> {
        Ok(self.tables()?.cards.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKanbanStore;
    use crate::model::board::Board;
    use crate::model::card::Card;
    use crate::model::column::Column;
    use crate::repo::{BoardRepository, CardRepository, ColumnRepository, RepoError};

    #[test]
    fn parent_index_follows_card_placement() {
        let store = MemoryKanbanStore::new();
        let board = Board::new("Board", "user_1");
        store.insert_board(&board).unwrap();
        let left = Column::new(board.id, "Left", 1);
        let right = Column::new(board.id, "Right", 2);
        store.insert_column(&left).unwrap();
        store.insert_column(&right).unwrap();

        let card = Card::new(left.id, "Card", None, 1);
        store.insert_card(&card).unwrap();
        assert!(store.update_card_placement(card.id, right.id, 1).unwrap());

        assert!(store.list_cards_by_column(left.id).unwrap().is_empty());
        let moved = store.list_cards_by_column(right.id).unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].column_id, right.id);
    }

    #[test]
    fn owner_scan_keeps_insertion_order() {
        let store = MemoryKanbanStore::new();
        let first = Board::new("First", "user_1");
        let other = Board::new("Other", "user_2");
        let second = Board::new("Second", "user_1");
        for board in [&first, &other, &second] {
            store.insert_board(board).unwrap();
        }

        let titles: Vec<_> = store
            .list_boards_by_owner("user_1")
            .unwrap()
            .into_iter()
            .map(|board| board.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = MemoryKanbanStore::new();
        let board = Board::new("Board", "user_1");
        store.insert_board(&board).unwrap();
        let err = store.insert_board(&board).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn mutations_on_missing_rows_report_false() {
        let store = MemoryKanbanStore::new();
        let missing = uuid::Uuid::new_v4();
        assert!(!store.update_column_position(missing, 3).unwrap());
        assert!(!store.delete_card(missing).unwrap());
        assert!(store.get_board(missing).unwrap().is_none());
    }
}
