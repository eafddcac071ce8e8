use super::{Result, into_dtos};
use crate::database::model::format_datetime;
use crate::database::model::user::UserAccount;
use crate::database::schema::user_account;
use diesel::prelude::*;
use dto::user::User;

pub fn insert_user(
    connection: &mut SqliteConnection,
    user: &User,
    password_hash: Option<&str>,
) -> Result<()> {
    diesel::insert_into(user_account::table)
        .values(UserAccount::new(user, password_hash.map(str::to_owned)))
        .execute(connection)?;

    Ok(())
}

pub fn find_user(connection: &mut SqliteConnection, user_id: &str) -> Result<Option<User>> {
    let result = user_account::table
        .find(user_id)
        .select(UserAccount::as_select())
        .first(connection)
        .optional()?;

    result.map(User::try_from).transpose()
}

pub fn find_user_by_email(connection: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    Ok(find_user_with_password_hash(connection, email)?.map(|(user, _)| user))
}

/// Retrieve a user and its password hash, for authentication purposes.
pub fn find_user_with_password_hash(
    connection: &mut SqliteConnection,
    email: &str,
) -> Result<Option<(User, Option<String>)>> {
    let result = user_account::table
        .filter(user_account::email.eq(email))
        .select(UserAccount::as_select())
        .first(connection)
        .optional()?;

    result
        .map(UserAccount::into_user_and_password_hash)
        .transpose()
}

pub fn list_users(connection: &mut SqliteConnection, skip: i64, limit: i64) -> Result<Vec<User>> {
    let results = user_account::table
        .select(UserAccount::as_select())
        .order((user_account::created_at.asc(), user_account::id.asc()))
        .offset(skip)
        .limit(limit)
        .load(connection)?;

    into_dtos(results)
}

pub fn admin_exists(connection: &mut SqliteConnection) -> Result<bool> {
    let count: i64 = user_account::table
        .filter(user_account::is_admin.eq(true))
        .count()
        .get_result(connection)?;

    Ok(count > 0)
}

/// Overwrite the stored user with the given one.
/// The password hash is only replaced when a new one is given.
pub fn update_user(
    connection: &mut SqliteConnection,
    user: &User,
    password_hash: Option<&str>,
) -> Result<()> {
    diesel::update(user_account::table.find(user.id()))
        .set((
            user_account::first_name.eq(user.first_name()),
            user_account::middle_name.eq(user.middle_name()),
            user_account::surname.eq(user.surname()),
            user_account::email.eq(user.email()),
            user_account::mobile_no.eq(user.mobile_no()),
            user_account::user_type.eq(user.user_type().as_str()),
            user_account::is_admin.eq(user.is_admin()),
            user_account::updated_at.eq(format_datetime(user.updated_at())),
        ))
        .execute(connection)?;

    if let Some(password_hash) = password_hash {
        diesel::update(user_account::table.find(user.id()))
            .set(user_account::password_hash.eq(password_hash))
            .execute(connection)?;
    }

    Ok(())
}
