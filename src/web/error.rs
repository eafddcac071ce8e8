use crate::database::error::DatabaseError;
use dto::error::ValidationError;
use log::error;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::{Json, json};
use thiserror::Error;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Failure of an API call. Its message is sent back as the `detail` of a JSON body.
#[derive(Debug, Error, PartialEq)]
pub enum WebError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Not enough permissions")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("Error importing data: {0}")]
    ImportFailed(String),
    #[error("Internal server error")]
    Internal,
}

impl WebError {
    pub fn status(&self) -> Status {
        match self {
            WebError::BadRequest(_) => Status::BadRequest,
            WebError::Unauthorized(_) => Status::Unauthorized,
            WebError::Forbidden => Status::Forbidden,
            WebError::NotFound(_) => Status::NotFound,
            WebError::ImportFailed(_) | WebError::Internal => Status::InternalServerError,
        }
    }

    pub fn bad_request(detail: &str) -> Self {
        WebError::BadRequest(detail.to_owned())
    }

    pub fn not_found(detail: &str) -> Self {
        WebError::NotFound(detail.to_owned())
    }
}

impl<'r> Responder<'r, 'static> for WebError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(json!({ "detail": self.to_string() }))).respond_to(request)
    }
}

impl From<DatabaseError> for WebError {
    fn from(value: DatabaseError) -> Self {
        error!("{value:#?}");
        WebError::Internal
    }
}

impl From<diesel::r2d2::PoolError> for WebError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        error!("Can't get a connection from the pool.\n{value:#?}");
        WebError::Internal
    }
}

impl From<ValidationError> for WebError {
    fn from(value: ValidationError) -> Self {
        WebError::BadRequest(value.to_string())
    }
}
