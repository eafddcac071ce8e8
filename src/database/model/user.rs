use crate::database::error::DatabaseError;
use crate::database::model::{format_datetime, parse_datetime};
use diesel::prelude::*;
use dto::user::UserType;
use std::str::FromStr;

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::database::schema::user_account)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserAccount {
    id: String,
    first_name: String,
    middle_name: Option<String>,
    surname: String,
    email: String,
    password_hash: Option<String>,
    mobile_no: String,
    user_type: String,
    is_admin: bool,
    created_at: String,
    updated_at: String,
}

impl UserAccount {
    pub(crate) fn new(user: &dto::user::User, password_hash: Option<String>) -> Self {
        Self {
            id: user.id().clone(),
            first_name: user.first_name().clone(),
            middle_name: user.middle_name().clone(),
            surname: user.surname().clone(),
            email: user.email().clone(),
            password_hash,
            mobile_no: user.mobile_no().clone(),
            user_type: user.user_type().to_string(),
            is_admin: *user.is_admin(),
            created_at: format_datetime(user.created_at()),
            updated_at: format_datetime(user.updated_at()),
        }
    }

    /// Split the stored account into the user it describes and its password hash, if any.
    pub(crate) fn into_user_and_password_hash(
        mut self,
    ) -> Result<(dto::user::User, Option<String>), DatabaseError> {
        let password_hash = self.password_hash.take();
        Ok((dto::user::User::try_from(self)?, password_hash))
    }
}

impl TryFrom<UserAccount> for dto::user::User {
    type Error = DatabaseError;

    fn try_from(value: UserAccount) -> Result<Self, Self::Error> {
        Ok(dto::user::User::new(
            value.id,
            value.first_name,
            value.middle_name,
            value.surname,
            value.email,
            value.mobile_no,
            UserType::from_str(&value.user_type)?,
            value.is_admin,
            parse_datetime(&value.created_at)?,
            parse_datetime(&value.updated_at)?,
        ))
    }
}
