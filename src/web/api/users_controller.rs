use crate::database::dao;
use crate::tools::log_error_and_return;
use crate::tools::password::hash_password;
use crate::web::api::{Result, conflict_as_bad_request, pagination};
use crate::web::authentication::{Administrator, AuthenticatedUser};
use crate::web::error::WebError;
use chrono::Utc;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::user::{User, UserCreate, UserUpdate};
use log::info;
use rocket::State;
use rocket::serde::json::Json;
use uuid::Uuid;

const EMAIL_ALREADY_USED: &str = "A user with this email already exists.";
const USER_NOT_FOUND: &str = "User not found";

#[get("/users?<skip>&<limit>")]
pub async fn list_users(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<User>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    Ok(Json(dao::user::list_users(&mut connection, skip, limit)?))
}

/// Register a new user. Anyone can register, but only administrators can create other administrators.
#[post("/users", format = "application/json", data = "<user_create>")]
pub async fn create_user(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: Option<AuthenticatedUser>,
    user_create: Json<UserCreate>,
) -> Result<Json<User>> {
    let user_create = user_create.into_inner();
    user_create.validate()?;
    if *user_create.is_admin() && !caller.is_some_and(|caller| caller.is_admin()) {
        return Err(WebError::Forbidden);
    }

    let mut connection = pool.get()?;
    if dao::user::find_user_by_email(&mut connection, user_create.email())?.is_some() {
        return Err(WebError::bad_request(EMAIL_ALREADY_USED));
    }

    let password_hash = user_create
        .password()
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(log_error_and_return(WebError::Internal))?;
    let user = User::from_request(Uuid::new_v4().to_string(), &user_create, Utc::now().naive_utc());
    dao::user::insert_user(&mut connection, &user, password_hash.as_deref())
        .map_err(conflict_as_bad_request(EMAIL_ALREADY_USED))?;
    info!("User {} registered", user.id());

    Ok(Json(user))
}

#[get("/users/<user_id>")]
pub async fn read_user(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _caller: AuthenticatedUser,
    user_id: &str,
) -> Result<Json<User>> {
    let mut connection = pool.get()?;

    dao::user::find_user(&mut connection, user_id)?
        .map(Json)
        .ok_or_else(|| WebError::not_found(USER_NOT_FOUND))
}

/// Update the fields set in the request. Users can update themselves, administrators anyone.
#[put("/users/<user_id>", format = "application/json", data = "<user_update>")]
pub async fn update_user(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    user_id: &str,
    user_update: Json<UserUpdate>,
) -> Result<Json<User>> {
    let user_update = user_update.into_inner();
    let mut connection = pool.get()?;

    let user = dao::user::find_user(&mut connection, user_id)?
        .ok_or_else(|| WebError::not_found(USER_NOT_FOUND))?;
    caller.ensure_access(user.id())?;
    if user_update.is_admin().is_some() && !caller.is_admin() {
        return Err(WebError::Forbidden);
    }
    user_update.validate()?;

    if let Some(email) = user_update.email() {
        let owner = dao::user::find_user_by_email(&mut connection, email)?;
        if owner.is_some_and(|owner| owner.id() != user.id()) {
            return Err(WebError::bad_request(EMAIL_ALREADY_USED));
        }
    }

    let password_hash = user_update
        .password()
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(log_error_and_return(WebError::Internal))?;
    let user = user.updated_with(&user_update, Utc::now().naive_utc());
    dao::user::update_user(&mut connection, &user, password_hash.as_deref())
        .map_err(conflict_as_bad_request(EMAIL_ALREADY_USED))?;

    Ok(Json(user))
}
