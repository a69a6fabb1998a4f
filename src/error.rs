//! Domain errors the command layer may want to tell apart from plain store
//! failures. They travel inside `anyhow::Error` like everything else and can
//! be recovered with `downcast_ref::<TodoError>()`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    /// No todo list carries the requested title.
    #[error("no todo list named \"{0}\"")]
    ListNotFound(String),
    /// A todo list with this title already exists.
    #[error("a todo list named \"{0}\" already exists")]
    DuplicateList(String),
}
