//! Core domain logic for the kanban board.
//! This crate is the single source of truth for board/column/card ordering
//! invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig, LogLevel};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardId, DEFAULT_COLUMN_TITLES};
pub use model::card::{Card, CardId};
pub use model::column::{Column, ColumnId};
pub use model::Position;
pub use repo::{
    AtomicScope, BoardRepository, CardRepository, ColumnRepository, KanbanStore,
    MemoryKanbanStore, RepoError, RepoResult, SqliteKanbanStore,
};
pub use service::board_service::BoardService;
pub use service::card_service::CardService;
pub use service::column_service::ColumnService;
pub use service::{MutationOutcome, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
