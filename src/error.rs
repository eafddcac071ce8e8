use crate::database::error::DatabaseError;
use crate::member_import::error::ImportError;
use crate::tools::password::PasswordHashError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
    #[error("Members could not be imported [reason: {0}]")]
    Import(#[from] ImportError),
    #[error("The administrator password could not be hashed [reason: {0}]")]
    PasswordHashing(PasswordHashError),
    #[error("Both --members-csv and --address-csv are required to import members.")]
    IncompleteImportArguments,
}
