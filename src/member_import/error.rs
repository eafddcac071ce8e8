use crate::database::error::DatabaseError;
use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

/// Failures which abort a whole import. Rejected rows are reported in the summary instead.
#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("Can't open file {path:?} [reason: {reason}]")]
    CantOpenInput { path: PathBuf, reason: String },
    #[error("Can't read file {path:?} [reason: {reason}]")]
    MalformedInput { path: PathBuf, reason: String },
    #[error("Can't decode file [reason: {0}]")]
    WrongEncoding(Cow<'static, str>),
    #[error("An error has occurred with the database [reason: {0}]")]
    Database(#[from] DatabaseError),
}

impl From<diesel::result::Error> for ImportError {
    fn from(value: diesel::result::Error) -> Self {
        ImportError::Database(DatabaseError::from(value))
    }
}
