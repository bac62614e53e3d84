use thiserror::Error;

/// Error kinds crossing the note-collection / category-store boundary.
///
/// Backend and transport failures of any origin surface as [`Error::Store`];
/// callers keep their last-known-good state and show a generic failure
/// message rather than inspect the cause.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category limit reached ({0} max)")]
    LimitExceeded(usize),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
