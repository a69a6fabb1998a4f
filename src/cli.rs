//! Command-line surface. Argument validation lives in the clap definitions, so
//! malformed invocations exit with status 2 before the store is opened.

use std::io::Write;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::debug;

use crate::db::{create_todo, fetch_entries, fetch_todos, insert_entry};
use crate::view::TodoTable;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Create and manage todo lists!")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all of the todo lists you have, or the entries of one list
    #[command(visible_alias = "l")]
    List {
        /// Name of the list whose entries to show
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        name: Option<String>,
    },

    /// Create a new top level todo list, or add an entry to an existing one
    #[command(visible_alias = "c")]
    Create {
        /// Title of the list to create, or of the list receiving the entry
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        title: String,

        /// Entry to add to the list called TITLE
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        entry: Option<String>,
    },
}

/// Execute one command against an open store, writing any rendered view to
/// `out`. Views are followed by a blank line.
pub fn run(conn: &Connection, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List { name: None } => {
            let table = TodoTable::from(fetch_todos(conn)?);
            writeln!(out, "{table}").context("failed to write todo lists")?;
        }
        Command::List { name: Some(name) } => {
            let view = fetch_entries(conn, &name)?;
            writeln!(out, "{view}").context("failed to write entries")?;
        }
        Command::Create { title, entry: None } => {
            let list = create_todo(conn, &title)?;
            debug!(id = list.id, "todo list ready");
        }
        Command::Create {
            title,
            entry: Some(entry),
        } => {
            let entry = insert_entry(conn, &title, &entry)?;
            debug!(id = entry.id, todo_id = entry.todo_id, "entry ready");
        }
    }

    Ok(())
}
