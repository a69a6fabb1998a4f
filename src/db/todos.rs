use anyhow::{Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension, Row};
use tracing::debug;

use crate::error::TodoError;
use crate::models::TodoList;

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Retrieve every todo list in creation order.
pub fn fetch_todos(conn: &Connection) -> Result<Vec<TodoList>> {
    let mut stmt = conn
        .prepare("SELECT id, title, created_at FROM todos ORDER BY id")
        .context("failed to prepare todo list query")?;

    let todos = stmt
        .query_map([], todo_from_row)
        .context("failed to load todo lists")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect todo lists")?;

    Ok(todos)
}

/// Resolve a user-supplied title to its row. Titles are unique, so at most one
/// list can match; a miss surfaces as [`TodoError::ListNotFound`].
pub fn find_todo(conn: &Connection, title: &str) -> Result<TodoList> {
    conn.query_row(
        "SELECT id, title, created_at FROM todos WHERE title = ?1",
        params![title],
        todo_from_row,
    )
    .optional()
    .context("failed to look up todo list")?
    .ok_or_else(|| TodoError::ListNotFound(title.to_string()).into())
}

/// Insert a new todo list and return the stored row, timestamp included.
pub fn create_todo(conn: &Connection, title: &str) -> Result<TodoList> {
    conn.execute("INSERT INTO todos (title) VALUES (?1)", params![title])
        .map_err(|err| map_unique_title(err, title))?;

    let id = conn.last_insert_rowid();
    debug!(id, title, "created todo list");

    conn.query_row(
        "SELECT id, title, created_at FROM todos WHERE id = ?1",
        params![id],
        todo_from_row,
    )
    .context("failed to reload todo list")
}

/// The only constraint on `todos` inserts is the unique title index, so any
/// constraint violation here means the title is taken.
fn map_unique_title(err: SqlError, title: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        TodoError::DuplicateList(title.to_string()).into()
    } else {
        anyhow::Error::new(err).context("failed to insert todo list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn fetch_todos_is_empty_on_fresh_database() {
        let conn = open_in_memory().unwrap();
        assert!(fetch_todos(&conn).unwrap().is_empty());
    }

    #[test]
    fn created_list_is_listed_exactly_once() {
        let conn = open_in_memory().unwrap();
        create_todo(&conn, "Chores").unwrap();
        create_todo(&conn, "Work").unwrap();

        let created = create_todo(&conn, "Groceries").unwrap();
        let todos = fetch_todos(&conn).unwrap();

        let titles: Vec<&str> = todos.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, ["Chores", "Work", "Groceries"]);
        assert_eq!(
            todos.iter().filter(|todo| todo.title == "Groceries").count(),
            1
        );
        assert_eq!(todos[2], created);
    }

    #[test]
    fn duplicate_title_is_rejected() {
        let conn = open_in_memory().unwrap();
        create_todo(&conn, "Groceries").unwrap();

        let err = create_todo(&conn, "Groceries").unwrap_err();

        assert_eq!(
            err.downcast_ref::<TodoError>(),
            Some(&TodoError::DuplicateList("Groceries".into()))
        );
        assert_eq!(fetch_todos(&conn).unwrap().len(), 1);
    }

    #[test]
    fn find_todo_resolves_title_to_id() {
        let conn = open_in_memory().unwrap();
        create_todo(&conn, "Chores").unwrap();
        let groceries = create_todo(&conn, "Groceries").unwrap();

        let found = find_todo(&conn, "Groceries").unwrap();

        assert_eq!(found.id, groceries.id);
    }

    #[test]
    fn find_todo_reports_missing_list() {
        let conn = open_in_memory().unwrap();

        let err = find_todo(&conn, "Nope").unwrap_err();

        assert_eq!(
            err.downcast_ref::<TodoError>(),
            Some(&TodoError::ListNotFound("Nope".into()))
        );
    }
}
