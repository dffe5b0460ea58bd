//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kanban_core` linkage, configuration and storage bootstrap.
//! - Run one create → move → list round on a throwaway board and print it.

use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::{
    init_logging, BoardService, CardService, ColumnService, CoreConfig, SqliteKanbanStore,
};
use std::error::Error;

const DEMO_OWNER: &str = "smoke_user";

fn main() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteKanbanStore::try_new(&conn)?;
    let boards = BoardService::new(store);
    let columns = ColumnService::new(store);
    let cards = CardService::new(store);

    let board_id = boards.create("Smoke board", DEMO_OWNER)?;
    let lanes = columns.list(board_id)?;
    let (Some(first), Some(last)) = (lanes.first(), lanes.last()) else {
        return Err("board was created without columns".into());
    };

    let card_id = cards.create(first.id, "Smoke card", None)?;
    cards.move_card(card_id, last.id, 1)?;
    columns.move_column(last.id, 1)?;

    for column in columns.list(board_id)? {
        let titles: Vec<_> = cards
            .list_in_column(column.id)?
            .into_iter()
            .map(|card| card.title)
            .collect();
        println!("{} {}: {:?}", column.position, column.title, titles);
    }

    boards.remove(board_id)?;
    log::info!("event=cli_smoke module=cli status=ok board_id={board_id}");
    Ok(())
}
