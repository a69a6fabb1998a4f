//! Printable views over the stored lists. Rendering goes through `Display`, so
//! producing the text is pure and the caller decides where it is written.

use std::fmt;

use crate::models::{Entry, TodoList};

/// Bullet used when a block holds a single line.
const SINGLE_BULLET: &str = "─";
const STARTING_BULLET: &str = "┌╴";
const CONNECTOR_BULLET: &str = "├╴";
const ENDING_BULLET: &str = "└╴";

/// Pick the tree bullet for line `index` out of `len` lines.
fn bullet(index: usize, len: usize) -> &'static str {
    if len == 1 {
        SINGLE_BULLET
    } else if index == 0 {
        STARTING_BULLET
    } else if index == len - 1 {
        ENDING_BULLET
    } else {
        CONNECTOR_BULLET
    }
}

/// Every todo list, one line each.
#[derive(Debug, Clone, Default)]
pub struct TodoTable {
    pub rows: Vec<TodoList>,
}

impl From<Vec<TodoList>> for TodoTable {
    fn from(rows: Vec<TodoList>) -> Self {
        Self { rows }
    }
}

impl fmt::Display for TodoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.rows.len();
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(f, "{} {}", bullet(index, len), row.title)?;
        }
        Ok(())
    }
}

/// A single list headed by its title, followed by its entries with checkboxes.
#[derive(Debug, Clone)]
pub struct TodoListView {
    pub list: TodoList,
    pub entries: Vec<Entry>,
}

impl fmt::Display for TodoListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.list.title)?;

        let len = self.entries.len();
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{} {} {}",
                bullet(index, len),
                entry.checkbox(),
                entry.title
            )?;
        }
        Ok(())
    }
}
