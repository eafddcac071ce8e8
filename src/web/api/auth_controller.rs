use crate::database::dao;
use crate::tools::log_error_and_return;
use crate::tools::password::verify_password;
use crate::web::api::Result;
use crate::web::authentication::AuthenticatedUser;
use crate::web::error::WebError;
use crate::web::token_storage::TokenStorage;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::credentials::{AccessToken, LoginRequest};
use log::{debug, info};
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::Json;
use std::sync::Mutex;

const WRONG_CREDENTIALS: &str = "Incorrect email or password";

/// Check the credentials of a user.
/// If they match, then a new token is issued and returned to the caller,
/// who is expected to send it back as a bearer token with each following request.
#[post("/auth/login", format = "application/json", data = "<login_request>")]
pub async fn login(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    token_storage: &State<Mutex<TokenStorage>>,
    login_request: Json<LoginRequest>,
) -> Result<Json<AccessToken>> {
    let login_request = login_request.into_inner();
    let mut connection = pool.get()?;

    let user = match dao::user::find_user_with_password_hash(&mut connection, login_request.email())? {
        Some((user, Some(password_hash))) if verify_password(login_request.password(), &password_hash) => user,
        _ => {
            debug!("Login refused [request: {login_request:?}]");
            return Err(WebError::bad_request(WRONG_CREDENTIALS));
        }
    };

    let token = token_storage
        .lock()
        .map_err(log_error_and_return(WebError::Internal))?
        .issue(user.id().to_owned());
    info!("User {} logged in", user.id());

    Ok(Json(AccessToken::bearer(token)))
}

#[post("/auth/logout")]
pub async fn logout(
    token_storage: &State<Mutex<TokenStorage>>,
    user: AuthenticatedUser,
) -> Result<Status> {
    token_storage
        .lock()
        .map_err(log_error_and_return(WebError::Internal))?
        .revoke(user.token());

    Ok(Status::NoContent)
}
