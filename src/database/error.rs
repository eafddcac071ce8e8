use crate::database::error::DatabaseError::{ConstraintViolation, MalformedValue, UnderlyingDatabase};
use diesel::result::DatabaseErrorKind;
use dto::error::UnknownVariant;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The --database-url argument is missing.")]
    MissingDatabaseUrl,
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("A constraint of the database has been violated [details: {0}]")]
    ConstraintViolation(String),
    #[error("A stored value can't be read [details: {0}]")]
    MalformedValue(String),
    #[error("An error occurred within the database [details: {0}]")]
    UnderlyingDatabase(String),
}

impl DatabaseError {
    /// Constraint violations only concern the rejected write. The connection and the
    /// enclosing transaction remain usable.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ConstraintViolation(_))
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                information,
            ) => ConstraintViolation(information.message().to_owned()),
            error => UnderlyingDatabase(error.to_string()),
        }
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        MalformedValue(value.to_string())
    }
}

impl From<rust_decimal::Error> for DatabaseError {
    fn from(value: rust_decimal::Error) -> Self {
        MalformedValue(value.to_string())
    }
}

impl From<UnknownVariant> for DatabaseError {
    fn from(value: UnknownVariant) -> Self {
        MalformedValue(value.to_string())
    }
}
