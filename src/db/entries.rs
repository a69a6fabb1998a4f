use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::todos::find_todo;
use crate::models::Entry;
use crate::view::TodoListView;

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        created_at: row.get(3)?,
        todo_id: row.get(4)?,
    })
}

/// Load the list called `list_title` together with its entries in insertion
/// order. The title is resolved to the list id first, so an unknown title is
/// reported as [`crate::TodoError::ListNotFound`] instead of an empty list.
pub fn fetch_entries(conn: &Connection, list_title: &str) -> Result<TodoListView> {
    let list = find_todo(conn, list_title)?;

    let mut stmt = conn
        .prepare(
            "SELECT id, title, completed, created_at, todo_id
             FROM entries
             WHERE todo_id = ?1
             ORDER BY id",
        )
        .context("failed to prepare entries query")?;

    let entries = stmt
        .query_map(params![list.id], entry_from_row)
        .context("failed to load entries")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect entries")?;

    Ok(TodoListView { list, entries })
}

/// Add an open entry to the list called `list_title` and return the stored
/// row. Nothing is written when the list does not exist.
pub fn insert_entry(conn: &Connection, list_title: &str, entry_title: &str) -> Result<Entry> {
    let list = find_todo(conn, list_title)?;

    conn.execute(
        "INSERT INTO entries (title, todo_id) VALUES (?1, ?2)",
        params![entry_title, list.id],
    )
    .context("failed to insert entry")?;

    let id = conn.last_insert_rowid();
    debug!(id, list = list_title, title = entry_title, "inserted entry");

    conn.query_row(
        "SELECT id, title, completed, created_at, todo_id FROM entries WHERE id = ?1",
        params![id],
        entry_from_row,
    )
    .context("failed to reload entry")
}
