use crate::database::dao;
use crate::tools::log_error_and_return;
use crate::web::error::WebError;
use crate::web::token_storage::TokenStorage;
use derive_getters::Getters;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::user::User;
use log::debug;
use rocket::State;
use rocket::http::Status;
use rocket::outcome::{Outcome, try_outcome};
use rocket::request::{self, FromRequest, Request};
use std::sync::Mutex;

const AUTHORIZATION_HEADER: &str = "Authorization";
const BEARER_SCHEME: &str = "Bearer";

/// If an endpoint requires the caller to be logged in,
/// then its implementation should require an [AuthenticatedUser] parameter.
/// Rocket will summon this guard to ensure the caller sent a known access token
/// through an `Authorization: Bearer <token>` header.
/// If they didn't, then the caller receives an Unauthorized status.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct AuthenticatedUser {
    token: String,
    user: User,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        self.user.id()
    }

    pub fn is_admin(&self) -> bool {
        *self.user.is_admin()
    }

    /// Administrators can access any resource, other users only their own ones.
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin() || self.user_id() == owner_id
    }

    pub fn ensure_access(&self, owner_id: &str) -> Result<(), WebError> {
        if self.can_access(owner_id) {
            Ok(())
        } else {
            Err(WebError::Forbidden)
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(token) = get_bearer_token(req) else {
            return Outcome::Forward(Status::Unauthorized);
        };

        let token_storage = try_outcome!(req.guard::<&State<Mutex<TokenStorage>>>().await);
        let user_id = match token_storage.lock() {
            Ok(mut token_storage) => match token_storage.get(token) {
                None => return Outcome::Forward(Status::Unauthorized),
                Some(user_id) => user_id.clone(),
            },
            Err(error) => {
                return log_error_and_return(Outcome::Error((Status::InternalServerError, ())))(error);
            }
        };

        let pool = try_outcome!(
            req.guard::<&State<Pool<ConnectionManager<SqliteConnection>>>>()
                .await
        );
        match find_user(pool, &user_id) {
            Ok(Some(user)) => Outcome::Success(AuthenticatedUser {
                token: token.to_owned(),
                user,
            }),
            // The user has been deleted since the login.
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(error) => Outcome::Error((error.status(), ())),
        }
    }
}

/// Caller which is logged in as an administrator.
/// Logged in users lacking administration rights receive a Forbidden status.
#[derive(Debug, Clone, PartialEq)]
pub struct Administrator(AuthenticatedUser);

impl Administrator {
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Administrator {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let user = try_outcome!(req.guard::<AuthenticatedUser>().await);
        if user.is_admin() {
            Outcome::Success(Administrator(user))
        } else {
            debug!("User {} is not allowed to administrate", user.user_id());
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}

fn get_bearer_token<'a>(req: &'a Request) -> Option<&'a str> {
    let (scheme, token) = req.headers().get_one(AUTHORIZATION_HEADER)?.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

fn find_user(pool: &Pool<ConnectionManager<SqliteConnection>>, user_id: &str) -> Result<Option<User>, WebError> {
    let mut connection = pool.get()?;
    Ok(dao::user::find_user(&mut connection, user_id)?)
}
