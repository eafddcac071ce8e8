use crate::database::error::DatabaseError;
use crate::web::error::WebError;

pub mod admin_controller;
pub mod auth_controller;
pub mod bookings_controller;
pub mod memberships_controller;
pub mod pages_controller;
pub mod server;
pub mod sevas_controller;
pub mod users_controller;

type Result<T, E = WebError> = std::result::Result<T, E>;

const DEFAULT_LIMIT: i64 = 100;

/// Offset and size of a listed page, from the `skip` and `limit` query parameters.
fn pagination(skip: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    (skip.unwrap_or(0).max(0), limit.unwrap_or(DEFAULT_LIMIT).max(0))
}

/// A violated constraint means the request clashes with stored data.
fn conflict_as_bad_request(detail: &'static str) -> impl FnOnce(DatabaseError) -> WebError {
    move |error| {
        if error.is_constraint_violation() {
            WebError::bad_request(detail)
        } else {
            WebError::from(error)
        }
    }
}
