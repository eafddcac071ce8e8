use crate::database::error::DatabaseError;
use crate::database::model::{format_datetime, parse_date, parse_datetime, parse_optional_datetime};
use diesel::prelude::*;
use dto::membership::{Gender, MaritalStatus, Math, MembershipCreate, MembershipStatus, MembershipType};
use std::str::FromStr;

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::database::schema::membership)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Membership {
    id: String,
    user_id: String,
    gender: String,
    postal_address: String,
    pin_code: String,
    date_of_birth: String,
    occupation: String,
    qualification: String,
    marital_status: String,
    number_of_kids: Option<i32>,
    gotra: String,
    kuladevata: String,
    math: String,
    native_place: String,
    other_gsb_memberships: Option<String>,
    introducer_name: Option<String>,
    membership_type: String,
    status: String,
    application_date: String,
    approval_date: Option<String>,
}

impl From<&dto::membership::Membership> for Membership {
    fn from(value: &dto::membership::Membership) -> Self {
        Self {
            id: value.id().clone(),
            user_id: value.user_id().clone(),
            gender: value.gender().to_string(),
            postal_address: value.postal_address().clone(),
            pin_code: value.pin_code().clone(),
            date_of_birth: value.date_of_birth().to_string(),
            occupation: value.occupation().clone(),
            qualification: value.qualification().clone(),
            marital_status: value.marital_status().to_string(),
            number_of_kids: *value.number_of_kids(),
            gotra: value.gotra().clone(),
            kuladevata: value.kuladevata().clone(),
            math: value.math().to_string(),
            native_place: value.native_place().clone(),
            other_gsb_memberships: value.other_gsb_memberships().clone(),
            introducer_name: value.introducer_name().clone(),
            membership_type: value.membership_type().to_string(),
            status: value.status().to_string(),
            application_date: format_datetime(value.application_date()),
            approval_date: value.approval_date().as_ref().map(format_datetime),
        }
    }
}

impl TryFrom<Membership> for dto::membership::Membership {
    type Error = DatabaseError;

    fn try_from(value: Membership) -> Result<Self, Self::Error> {
        let details = MembershipCreate::new(
            value.user_id,
            Gender::from_str(&value.gender)?,
            value.postal_address,
            value.pin_code,
            parse_date(&value.date_of_birth)?,
            value.occupation,
            value.qualification,
            MaritalStatus::from_str(&value.marital_status)?,
            value.number_of_kids,
            value.gotra,
            value.kuladevata,
            Math::from_str(&value.math)?,
            value.native_place,
            value.other_gsb_memberships,
            value.introducer_name,
            MembershipType::from_str(&value.membership_type)?,
            MembershipStatus::from_str(&value.status)?,
        );
        Ok(dto::membership::Membership::new(
            value.id,
            details,
            parse_datetime(&value.application_date)?,
            parse_optional_datetime(value.approval_date)?,
        ))
    }
}
