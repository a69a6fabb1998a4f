//! Row types that mirror the SQLite schema. They stay plain data holders so
//! the persistence layer and the renderer can pass them around freely.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named todo list. The title is what users type on the command line; the
/// `id` is what entries actually reference.
pub struct TodoList {
    /// Primary key from the database.
    pub id: i64,
    /// User-facing name, unique across lists.
    pub title: String,
    /// Set by the store when the row is inserted (UTC).
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single item on a todo list.
pub struct Entry {
    /// Primary key from the database.
    pub id: i64,
    /// Text of the entry as typed on the command line.
    pub title: String,
    /// Whether the entry has been ticked off. New entries start open.
    pub completed: bool,
    /// Set by the store when the row is inserted (UTC).
    pub created_at: NaiveDateTime,
    /// Owning list. Deleting that list removes the entry with it.
    pub todo_id: i64,
}

impl Entry {
    /// Checkbox marker shown in front of the title.
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}
