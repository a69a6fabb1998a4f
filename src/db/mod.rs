//! Persistence module split across logical submodules. Every function takes
//! the open connection explicitly; there is no global handle.

mod connection;
mod entries;
mod todos;

pub use connection::{db_path, open_database, open_in_memory, DB_PATH_ENV};
pub use entries::{fetch_entries, insert_entry};
pub use todos::{create_todo, fetch_todos, find_todo};
