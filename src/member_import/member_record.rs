use derive_getters::Getters;
use serde::Deserialize;

/// Columns expected in the members table.
pub const MEMBER_COLUMNS: [&str; 14] = [
    "MEMBER CODE",
    "FIRST NAME",
    "MIDDLE NAME",
    "SURNAME",
    "ADDR CODE",
    "OCCUPATION",
    "QUALIFICATION",
    "GOTRA",
    "KULDEVTHA",
    "NATIVE PLACE",
    "INTRODUCER NAME",
    "GENDER",
    "DATE OF BIRTH",
    "DATE OF JOINING",
];

/// A row of the members table.
/// Every cell is optional: empty cells and `#N/A` are read as missing values.
#[derive(Debug, Deserialize, Getters, Default, PartialEq, Eq, Clone)]
pub struct MemberRecord {
    #[serde(alias = "MEMBER CODE", default, deserialize_with = "available_value::deserialize")]
    member_code: Option<String>,
    #[serde(alias = "FIRST NAME", default, deserialize_with = "available_value::deserialize")]
    first_name: Option<String>,
    #[serde(alias = "MIDDLE NAME", default, deserialize_with = "available_value::deserialize")]
    middle_name: Option<String>,
    #[serde(alias = "SURNAME", default, deserialize_with = "available_value::deserialize")]
    surname: Option<String>,
    #[serde(alias = "ADDR CODE", default, deserialize_with = "available_value::deserialize")]
    address_code: Option<String>,
    #[serde(alias = "OCCUPATION", default, deserialize_with = "available_value::deserialize")]
    occupation: Option<String>,
    #[serde(alias = "QUALIFICATION", default, deserialize_with = "available_value::deserialize")]
    qualification: Option<String>,
    #[serde(alias = "GOTRA", default, deserialize_with = "available_value::deserialize")]
    gotra: Option<String>,
    #[serde(alias = "KULDEVTHA", default, deserialize_with = "available_value::deserialize")]
    kuladevata: Option<String>,
    #[serde(alias = "NATIVE PLACE", default, deserialize_with = "available_value::deserialize")]
    native_place: Option<String>,
    #[serde(alias = "INTRODUCER NAME", default, deserialize_with = "available_value::deserialize")]
    introducer_name: Option<String>,
    #[serde(alias = "GENDER", default, deserialize_with = "available_value::deserialize")]
    gender: Option<String>,
    #[serde(alias = "DATE OF BIRTH", default, deserialize_with = "available_value::deserialize")]
    date_of_birth: Option<String>,
    #[serde(alias = "DATE OF JOINING", default, deserialize_with = "available_value::deserialize")]
    date_of_joining: Option<String>,
}

impl MemberRecord {
    /// Name the required columns which have no value for this member, code excepted.
    pub fn missing_names(&self) -> Vec<&'static str> {
        let mut missing_names = vec![];
        if self.first_name.is_none() {
            missing_names.push("FIRST NAME");
        }
        if self.surname.is_none() {
            missing_names.push("SURNAME");
        }
        missing_names
    }
}

pub(super) mod available_value {
    use crate::member_import::config::NOT_AVAILABLE;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(available(&s).map(str::to_owned))
    }

    /// Return the trimmed value, unless it is blank or marked as not available.
    pub fn available(value: &str) -> Option<&str> {
        let value = value.trim();
        if value.is_empty() || value == NOT_AVAILABLE {
            None
        } else {
            Some(value)
        }
    }
}
