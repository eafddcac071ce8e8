use crate::error::{UnknownVariant, ValidationError};
use crate::validation::{validate_not_empty, validate_pin_code};
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownVariant::new($kind, s)),
                }
            }
        }
    };
}
pub(crate) use text_enum;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}
text_enum!(Gender, "gender", { Male => "MALE", Female => "FEMALE" });

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    Married,
    Unmarried,
}
text_enum!(MaritalStatus, "marital status", { Married => "MARRIED", Unmarried => "UNMARRIED" });

/// Religious institution followed by the family of the member.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Math {
    Kashi,
    Gokarna,
    Kavale,
}
text_enum!(Math, "math", { Kashi => "KASHI", Gokarna => "GOKARNA", Kavale => "KAVALE" });

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipType {
    #[default]
    Patron,
}
text_enum!(MembershipType, "membership type", { Patron => "PATRON" });

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}
text_enum!(MembershipStatus, "membership status", {
    Pending => "PENDING",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

fn validate_number_of_kids(
    number_of_kids: Option<i32>,
    marital_status: MaritalStatus,
) -> Result<(), ValidationError> {
    match number_of_kids {
        Some(kids) if kids < 0 => Err(ValidationError::NegativeNumberOfKids),
        Some(kids) if kids > 0 && marital_status == MaritalStatus::Unmarried => {
            Err(ValidationError::KidsForUnmarriedMember)
        }
        _ => Ok(()),
    }
}

/// Detailed record of a member, attached to exactly one user.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Membership {
    id: String,
    user_id: String,
    gender: Gender,
    postal_address: String,
    pin_code: String,
    date_of_birth: NaiveDate,
    occupation: String,
    qualification: String,
    marital_status: MaritalStatus,
    number_of_kids: Option<i32>,
    gotra: String,
    kuladevata: String,
    math: Math,
    native_place: String,
    other_gsb_memberships: Option<String>,
    introducer_name: Option<String>,
    membership_type: MembershipType,
    status: MembershipStatus,
    application_date: NaiveDateTime,
    approval_date: Option<NaiveDateTime>,
}

impl Membership {
    pub fn new(
        id: String,
        details: MembershipCreate,
        application_date: NaiveDateTime,
        approval_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            user_id: details.user_id,
            gender: details.gender,
            postal_address: details.postal_address,
            pin_code: details.pin_code,
            date_of_birth: details.date_of_birth,
            occupation: details.occupation,
            qualification: details.qualification,
            marital_status: details.marital_status,
            number_of_kids: details.number_of_kids,
            gotra: details.gotra,
            kuladevata: details.kuladevata,
            math: details.math,
            native_place: details.native_place,
            other_gsb_memberships: details.other_gsb_memberships,
            introducer_name: details.introducer_name,
            membership_type: details.membership_type,
            status: details.status,
            application_date,
            approval_date,
        }
    }

    /// Apply every field set in the update, then check the consistency of the result.
    pub fn updated_with(self, update: MembershipUpdate) -> Result<Self, ValidationError> {
        update.validate()?;
        let membership = Self {
            gender: update.gender.unwrap_or(self.gender),
            postal_address: update.postal_address.unwrap_or(self.postal_address),
            pin_code: update.pin_code.unwrap_or(self.pin_code),
            date_of_birth: update.date_of_birth.unwrap_or(self.date_of_birth),
            occupation: update.occupation.unwrap_or(self.occupation),
            qualification: update.qualification.unwrap_or(self.qualification),
            marital_status: update.marital_status.unwrap_or(self.marital_status),
            number_of_kids: update.number_of_kids.or(self.number_of_kids),
            gotra: update.gotra.unwrap_or(self.gotra),
            kuladevata: update.kuladevata.unwrap_or(self.kuladevata),
            math: update.math.unwrap_or(self.math),
            native_place: update.native_place.unwrap_or(self.native_place),
            other_gsb_memberships: update.other_gsb_memberships.or(self.other_gsb_memberships),
            introducer_name: update.introducer_name.or(self.introducer_name),
            membership_type: update.membership_type.unwrap_or(self.membership_type),
            status: update.status.unwrap_or(self.status),
            approval_date: update.approval_date.or(self.approval_date),
            ..self
        };
        validate_number_of_kids(membership.number_of_kids, membership.marital_status)?;
        Ok(membership)
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MembershipCreate {
    user_id: String,
    gender: Gender,
    postal_address: String,
    pin_code: String,
    date_of_birth: NaiveDate,
    occupation: String,
    qualification: String,
    marital_status: MaritalStatus,
    #[serde(default)]
    number_of_kids: Option<i32>,
    gotra: String,
    kuladevata: String,
    math: Math,
    native_place: String,
    #[serde(default)]
    other_gsb_memberships: Option<String>,
    #[serde(default)]
    introducer_name: Option<String>,
    #[serde(default)]
    membership_type: MembershipType,
    #[serde(default)]
    status: MembershipStatus,
}

impl MembershipCreate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        gender: Gender,
        postal_address: String,
        pin_code: String,
        date_of_birth: NaiveDate,
        occupation: String,
        qualification: String,
        marital_status: MaritalStatus,
        number_of_kids: Option<i32>,
        gotra: String,
        kuladevata: String,
        math: Math,
        native_place: String,
        other_gsb_memberships: Option<String>,
        introducer_name: Option<String>,
        membership_type: MembershipType,
        status: MembershipStatus,
    ) -> Self {
        Self {
            user_id,
            gender,
            postal_address,
            pin_code,
            date_of_birth,
            occupation,
            qualification,
            marital_status,
            number_of_kids,
            gotra,
            kuladevata,
            math,
            native_place,
            other_gsb_memberships,
            introducer_name,
            membership_type,
            status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_empty("postal_address", &self.postal_address)?;
        validate_pin_code(&self.pin_code)?;
        validate_number_of_kids(self.number_of_kids, self.marital_status)
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct MembershipUpdate {
    gender: Option<Gender>,
    postal_address: Option<String>,
    pin_code: Option<String>,
    date_of_birth: Option<NaiveDate>,
    occupation: Option<String>,
    qualification: Option<String>,
    marital_status: Option<MaritalStatus>,
    number_of_kids: Option<i32>,
    gotra: Option<String>,
    kuladevata: Option<String>,
    math: Option<Math>,
    native_place: Option<String>,
    other_gsb_memberships: Option<String>,
    introducer_name: Option<String>,
    membership_type: Option<MembershipType>,
    status: Option<MembershipStatus>,
    approval_date: Option<NaiveDateTime>,
}

impl MembershipUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(pin_code) = &self.pin_code {
            validate_pin_code(pin_code)?;
        }
        match self.number_of_kids {
            Some(kids) if kids < 0 => Err(ValidationError::NegativeNumberOfKids),
            _ => Ok(()),
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use crate::user::tests::test_timestamp;

    pub const MEMBERSHIP_ID: &str = "a9e1b0cf-52e1-4a4f-8d5c-3f8b2b7d1c10";

    impl MembershipCreate {
        pub fn new_test(user_id: &str) -> Self {
            MembershipCreate::new(
                user_id.to_owned(),
                Gender::Male,
                "Shanti Niwas, B-12, Gokhale Road, Dadar".to_owned(),
                "400028".to_owned(),
                NaiveDate::from_ymd_opt(1980, 4, 12).unwrap(),
                "Engineer".to_owned(),
                "B.E.".to_owned(),
                MaritalStatus::Married,
                Some(2),
                "Vatsa".to_owned(),
                "Shri Shantadurga".to_owned(),
                Math::Kashi,
                "Karwar".to_owned(),
                None,
                None,
                MembershipType::Patron,
                MembershipStatus::Pending,
            )
        }
    }

    impl Membership {
        pub fn new_test(id: &str, user_id: &str) -> Self {
            Membership::new(
                id.to_owned(),
                MembershipCreate::new_test(user_id),
                test_timestamp(),
                None,
            )
        }
    }


    #[cfg(test)]
    mod validate {
        use super::*;
        use crate::error::ValidationError::{InvalidPinCode, KidsForUnmarriedMember, NegativeNumberOfKids};

        #[test]
        fn success() {
            assert_eq!(Ok(()), MembershipCreate::new_test("user").validate());
        }

        #[test]
        fn fail_on_short_pin_code() {
            let mut request = MembershipCreate::new_test("user");
            request.pin_code = "4000".to_owned();
            assert_eq!(Err(InvalidPinCode), request.validate());
        }

        #[test]
        fn fail_on_negative_number_of_kids() {
            let mut request = MembershipCreate::new_test("user");
            request.number_of_kids = Some(-1);
            assert_eq!(Err(NegativeNumberOfKids), request.validate());
        }

        #[test]
        fn fail_on_kids_for_unmarried_member() {
            let mut request = MembershipCreate::new_test("user");
            request.marital_status = MaritalStatus::Unmarried;
            assert_eq!(Err(KidsForUnmarriedMember), request.validate());

            request.number_of_kids = Some(0);
            assert_eq!(Ok(()), request.validate());
        }
    }

}
