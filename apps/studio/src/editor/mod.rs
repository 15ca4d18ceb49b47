//! Editor sessions: one owned document per session, mutated one field or
//! entry at a time, re-rendered after every change.

pub mod entries;
pub mod fields;
pub mod session;
pub mod store;

use thiserror::Error;

use crate::persistence::TransportError;
use crate::validation::ValidationErrors;

pub use session::EditorSession;
pub use store::{SessionStore, SharedSession};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("No {section} entry with id '{id}'")]
    EntryNotFound { section: &'static str, id: String },

    #[error("Invalid value for '{path}': {message}")]
    InvalidValue { path: String, message: String },

    #[error("Position {to} is out of range for {len} entries")]
    OutOfRange { to: usize, len: usize },

    #[error("Resume has invalid fields")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
