use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The edge list could not be opened, or a read failed part way.
    #[error("cannot read edge list {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input ended inside a record rather than on a record boundary.
    #[error(
        "edge list {} ends inside record {record}: {read} of {expected} bytes present",
        .path.display()
    )]
    MalformedRecord {
        path: PathBuf,
        record: u64,
        read: usize,
        expected: usize,
    },

    /// An output file could not be created, written, or moved into place.
    #[error("cannot write {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("binary graph {} is malformed: {reason}", .path.display())]
    MalformedGraph { path: PathBuf, reason: String },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub(crate) fn unwritable(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::SinkUnavailable { path, source }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::SourceUnavailable { path, source }
    }
}
