use crate::error::{UnknownVariant, ValidationError};
use crate::validation::{validate_email, validate_mobile_number, validate_not_empty};
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum UserType {
    #[serde(rename = "M")]
    Member,
    #[default]
    #[serde(rename = "NM")]
    NonMember,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Member => "M",
            UserType::NonMember => "NM",
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(UserType::Member),
            "NM" => Ok(UserType::NonMember),
            _ => Err(UnknownVariant::new("user type", s)),
        }
    }
}

/// A person known to the mandal, with or without a membership.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct User {
    id: String,
    first_name: String,
    middle_name: Option<String>,
    surname: String,
    email: String,
    mobile_no: String,
    user_type: UserType,
    is_admin: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        first_name: String,
        middle_name: Option<String>,
        surname: String,
        email: String,
        mobile_no: String,
        user_type: UserType,
        is_admin: bool,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            first_name,
            middle_name,
            surname,
            email,
            mobile_no,
            user_type,
            is_admin,
            created_at,
            updated_at,
        }
    }

    pub fn from_request(id: String, request: &UserCreate, now: NaiveDateTime) -> Self {
        Self::new(
            id,
            request.first_name.clone(),
            request.middle_name.clone(),
            request.surname.clone(),
            request.email.clone(),
            request.mobile_no.clone(),
            request.user_type,
            request.is_admin,
            now,
            now,
        )
    }

    /// Apply every field set in the update. Unset fields are left untouched.
    pub fn updated_with(self, update: &UserUpdate, now: NaiveDateTime) -> Self {
        Self {
            first_name: update.first_name.clone().unwrap_or(self.first_name),
            middle_name: update.middle_name.clone().or(self.middle_name),
            surname: update.surname.clone().unwrap_or(self.surname),
            email: update.email.clone().unwrap_or(self.email),
            mobile_no: update.mobile_no.clone().unwrap_or(self.mobile_no),
            user_type: update.user_type.unwrap_or(self.user_type),
            is_admin: update.is_admin.unwrap_or(self.is_admin),
            updated_at: now,
            ..self
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct UserCreate {
    first_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    surname: String,
    email: String,
    mobile_no: String,
    #[serde(default)]
    user_type: UserType,
    #[serde(default)]
    is_admin: bool,
    #[serde(default)]
    password: Option<String>,
}

impl UserCreate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        middle_name: Option<String>,
        surname: String,
        email: String,
        mobile_no: String,
        user_type: UserType,
        is_admin: bool,
        password: Option<String>,
    ) -> Self {
        Self {
            first_name,
            middle_name,
            surname,
            email,
            mobile_no,
            user_type,
            is_admin,
            password,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_empty("first_name", &self.first_name)?;
        validate_not_empty("surname", &self.surname)?;
        validate_email(&self.email)?;
        validate_mobile_number(&self.mobile_no)
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct UserUpdate {
    first_name: Option<String>,
    middle_name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    mobile_no: Option<String>,
    user_type: Option<UserType>,
    is_admin: Option<bool>,
    password: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(first_name) = &self.first_name {
            validate_not_empty("first_name", first_name)?;
        }
        if let Some(surname) = &self.surname {
            validate_not_empty("surname", surname)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(mobile_no) = &self.mobile_no {
            validate_mobile_number(mobile_no)?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub const USER_ID: &str = "4b5a5c62-3b38-4b37-9f4c-9e1c0b3b1e01";
    pub const USER_FIRST_NAME: &str = "Ramesh";
    pub const USER_SURNAME: &str = "Kamath";
    pub const USER_EMAIL: &str = "ramesh.kamath@example.com";
    pub const USER_MOBILE_NO: &str = "9876543210";

    pub fn test_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    impl User {
        pub fn new_test() -> Self {
            Self::new_test_with(USER_ID, USER_EMAIL, false)
        }

        pub fn new_test_with(id: &str, email: &str, is_admin: bool) -> Self {
            User::new(
                id.to_owned(),
                USER_FIRST_NAME.to_owned(),
                None,
                USER_SURNAME.to_owned(),
                email.to_owned(),
                USER_MOBILE_NO.to_owned(),
                UserType::Member,
                is_admin,
                test_timestamp(),
                test_timestamp(),
            )
        }
    }

    impl UserCreate {
        pub fn new_test(email: &str, password: Option<&str>) -> Self {
            UserCreate::new(
                USER_FIRST_NAME.to_owned(),
                None,
                USER_SURNAME.to_owned(),
                email.to_owned(),
                USER_MOBILE_NO.to_owned(),
                UserType::NonMember,
                false,
                password.map(str::to_owned),
            )
        }
    }

    #[cfg(test)]
    mod user_type {
        use super::*;

        #[test]
        fn should_round_trip_through_str() {
            assert_eq!(Ok(UserType::Member), UserType::from_str(UserType::Member.as_str()));
            assert_eq!(Ok(UserType::NonMember), UserType::from_str("NM"));
            assert!(UserType::from_str("X").is_err());
        }

        #[test]
        fn should_serialize_with_short_codes() {
            assert_eq!(r#""M""#, serde_json::to_string(&UserType::Member).unwrap());
            assert_eq!(r#""NM""#, serde_json::to_string(&UserType::NonMember).unwrap());
        }
    }


}
