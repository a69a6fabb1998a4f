//! Core library surface for the `todo` command-line tool.
//!
//! The binary is a thin shell around these modules: `db` owns the SQLite
//! store, `view` renders what comes out of it, and `cli` wires the two to the
//! command line.
pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod view;

/// Persistence entry points, all taking an explicit connection.
pub use db::{
    create_todo, fetch_entries, fetch_todos, find_todo, insert_entry, open_database,
    open_in_memory,
};

pub use error::TodoError;
pub use models::{Entry, TodoList};
pub use view::{TodoListView, TodoTable};
