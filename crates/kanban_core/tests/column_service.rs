use kanban_core::db::open_db_in_memory;
use kanban_core::{
    BoardService, CardService, ColumnService, MutationOutcome, ServiceError, SqliteKanbanStore,
};
use rusqlite::Connection;
use uuid::Uuid;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn titles(columns: &ColumnService<SqliteKanbanStore<'_>>, board_id: Uuid) -> Vec<String> {
    columns
        .list(board_id)
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect()
}

fn positions(columns: &ColumnService<SqliteKanbanStore<'_>>, board_id: Uuid) -> Vec<i64> {
    columns
        .list(board_id)
        .unwrap()
        .into_iter()
        .map(|c| c.position)
        .collect()
}

#[test]
fn create_appends_after_current_max() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);

    let review = columns.create(board_id, "Review").unwrap();

    let column = columns.get(review).unwrap().unwrap();
    assert_eq!(column.position, 4);
    assert_eq!(column.board_id, board_id);
    assert_eq!(
        titles(&columns, board_id),
        vec!["To Do", "In Progress", "Done", "Review"]
    );
}

#[test]
fn create_on_missing_board_is_rejected() {
    let conn = setup();
    let columns = ColumnService::new(SqliteKanbanStore::try_new(&conn).unwrap());
    let ghost = Uuid::new_v4();

    let err = columns.create(ghost, "Lane").unwrap_err();
    assert!(matches!(err, ServiceError::BoardNotFound(id) if id == ghost));
}

#[test]
fn move_last_column_to_front() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);
    let done = columns.list(board_id).unwrap()[2].id;

    assert_eq!(
        columns.move_column(done, 1).unwrap(),
        MutationOutcome::Applied
    );

    assert_eq!(
        titles(&columns, board_id),
        vec!["Done", "To Do", "In Progress"]
    );
    assert_eq!(positions(&columns, board_id), vec![1, 2, 3]);
}

#[test]
fn move_forward_shifts_intermediate_columns_back() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);
    columns.create(board_id, "Review").unwrap();
    let todo = columns.list(board_id).unwrap()[0].id;

    columns.move_column(todo, 3).unwrap();

    assert_eq!(
        titles(&columns, board_id),
        vec!["In Progress", "Done", "To Do", "Review"]
    );
    assert_eq!(positions(&columns, board_id), vec![1, 2, 3, 4]);
}

#[test]
fn move_clamps_out_of_range_targets() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);
    let todo = columns.list(board_id).unwrap()[0].id;

    columns.move_column(todo, 42).unwrap();
    assert_eq!(
        titles(&columns, board_id),
        vec!["In Progress", "Done", "To Do"]
    );

    columns.move_column(todo, 0).unwrap();
    assert_eq!(
        titles(&columns, board_id),
        vec!["To Do", "In Progress", "Done"]
    );
    assert_eq!(positions(&columns, board_id), vec![1, 2, 3]);
}

#[test]
fn move_missing_column_is_noop() {
    let conn = setup();
    let columns = ColumnService::new(SqliteKanbanStore::try_new(&conn).unwrap());
    assert_eq!(
        columns.move_column(Uuid::new_v4(), 1).unwrap(),
        MutationOutcome::NoOp
    );
}

#[test]
fn remove_column_drops_cards_and_compacts_board() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);
    let cards = CardService::new(store);
    let in_progress = columns.list(board_id).unwrap()[1].id;
    cards.create(in_progress, "Doomed", None).unwrap();

    assert_eq!(
        columns.remove(in_progress).unwrap(),
        MutationOutcome::Applied
    );

    assert_eq!(titles(&columns, board_id), vec!["To Do", "Done"]);
    assert_eq!(positions(&columns, board_id), vec![1, 2]);
    assert!(cards.list(board_id).unwrap().is_empty());
    assert_eq!(
        columns.remove(in_progress).unwrap(),
        MutationOutcome::NoOp
    );
}

#[test]
fn rename_keeps_position() {
    let conn = setup();
    let store = SqliteKanbanStore::try_new(&conn).unwrap();
    let board_id = BoardService::new(store).create("Board", "user_123").unwrap();
    let columns = ColumnService::new(store);
    let done = columns.list(board_id).unwrap()[2].id;

    columns.rename(done, "Shipped").unwrap();

    let column = columns.get(done).unwrap().unwrap();
    assert_eq!(column.title, "Shipped");
    assert_eq!(column.position, 3);
    assert!(matches!(
        columns.rename(done, "").unwrap_err(),
        ServiceError::InvalidTitle
    ));
}
