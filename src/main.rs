//! Binary entry point: set up logging, parse the command line, then run one
//! command against the SQLite store and close it again.
use std::io;

use anyhow::Context;
use clap::Parser;
use todo_cli::cli::{self, Cli};
use todo_cli::open_database;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Fatal problems (no home directory, unwritable database, unknown list)
/// bubble up as an `Err` and end the process with a non-zero status.
fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    let conn = open_database()?;
    let result = cli::run(&conn, cli.command, &mut io::stdout().lock());
    let closed = conn
        .close()
        .map_err(|(_, err)| err)
        .context("failed to close database");

    result.and(closed)
}
