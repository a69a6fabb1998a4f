use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

/// Environment variable naming the full path of the database file.
pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
/// Folder beneath the user's home directory holding the database.
const DATA_DIR: [&str; 2] = [".config", "todo"];
/// SQLite file name stored inside the data directory.
const DB_FILE_NAME: &str = "todo.db";

/// Resolve the database path, open it, and make sure the schema is in place.
///
/// The schema is applied on every open with `IF NOT EXISTS` statements, so a
/// fresh file and an existing one go through the same path.
pub fn open_database() -> Result<Connection> {
    let db_path = db_path()?;
    debug!(path = %db_path.display(), "opening todo database");

    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open SQLite database at {}", db_path.display()))?;
    prepare(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database with the full schema. Used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    prepare(&conn)?;
    Ok(conn)
}

/// Turn on foreign key enforcement and create the tables. SQLite only honours
/// `ON DELETE CASCADE` while `foreign_keys` is on, and the setting is per
/// connection.
fn prepare(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;
    apply_schema(conn)
}

fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            title TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create todos table")?;

    // Titles are the lookup key on the command line, so they must be unique.
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS todos_title_idx ON todos (title)",
        [],
    )
    .context("failed to create todos title index")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            title TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            todo_id INTEGER NOT NULL,
            FOREIGN KEY(todo_id) REFERENCES todos(id) ON DELETE CASCADE ON UPDATE CASCADE
        )",
        [],
    )
    .context("failed to create entries table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS entries_todo_id_idx ON entries (todo_id)",
        [],
    )
    .context("failed to create entries index")?;

    debug!("todo schema applied");
    Ok(())
}

/// Path to the database: `TODO_DB_PATH` when set, otherwise the default
/// location under the user's home directory.
pub fn db_path() -> Result<PathBuf> {
    resolve_db_path(std::env::var_os(DB_PATH_ENV))
}

/// An override that is present and non-empty wins verbatim, without touching
/// the filesystem. Otherwise fall back to `<home>/.config/todo/todo.db`.
fn resolve_db_path(override_path: Option<OsString>) -> Result<PathBuf> {
    match override_path.filter(|path| !path.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let base_dirs =
                BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
            default_db_path(base_dirs.home_dir())
        }
    }
}

/// Build the default database path below `home`, creating the data directory.
fn default_db_path(home: &Path) -> Result<PathBuf> {
    let data_dir: PathBuf = DATA_DIR.iter().fold(home.to_path_buf(), |dir, part| dir.join(part));
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'index') ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn override_is_returned_verbatim() {
        let path = resolve_db_path(Some(OsString::from("/nowhere/at/all/todo.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/nowhere/at/all/todo.db"));
        assert!(!Path::new("/nowhere/at/all").exists());
    }

    #[test]
    fn default_path_creates_config_directory() {
        let home = tempfile::tempdir().unwrap();

        let path = default_db_path(home.path()).unwrap();

        assert_eq!(path, home.path().join(".config").join("todo").join("todo.db"));
        assert!(home.path().join(".config").join("todo").is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn default_path_tolerates_existing_directory() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".config").join("todo")).unwrap();

        assert!(default_db_path(home.path()).is_ok());
    }

    #[test]
    fn schema_creates_tables_and_indexes() {
        let conn = open_in_memory().unwrap();
        let names = table_names(&conn);

        for expected in ["entries", "entries_todo_id_idx", "todos", "todos_title_idx"] {
            assert!(names.iter().any(|name| name == expected), "missing {expected}");
        }
    }

    #[test]
    fn schema_can_be_applied_twice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");

        {
            let conn = Connection::open(&path).unwrap();
            prepare(&conn).unwrap();
            conn.execute("INSERT INTO todos (title) VALUES ('Groceries')", [])
                .unwrap();
        }

        let conn = Connection::open(&path).unwrap();
        prepare(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn entries_require_an_existing_list() {
        let conn = open_in_memory().unwrap();

        let result = conn.execute(
            "INSERT INTO entries (title, todo_id) VALUES ('Milk', 42)",
            [],
        );

        assert!(result.is_err());
    }
}
