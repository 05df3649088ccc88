use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures surfaced by the store and the profile helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing file does not exist and creation was not requested.
    #[error("the ini file [{}] cannot be found", path.display())]
    NotFound { path: PathBuf },

    /// The backing file could not be created, read or written.
    #[error("I/O error accessing ini file [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry was read from a section that does not exist.
    #[error("the section [{0}] does not exist in the ini file")]
    SectionNotFound(String),

    /// A name or value would not survive a save and reload.
    #[error("invalid {what} {value:?}: {reason}")]
    InvalidName {
        what: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
