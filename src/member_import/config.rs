use crate::tools::env_args::retrieve_arg_value;
use chrono::NaiveDate;
use derive_getters::Getters;
use dto::membership::{MaritalStatus, Math, MembershipStatus, MembershipType};
use log::warn;
use std::str::FromStr;

/// Literal used by the source spreadsheets for a missing value.
pub const NOT_AVAILABLE: &str = "#N/A";

pub const DEFAULT_PLACEHOLDER_EMAIL_DOMAIN: &str = "gsb";
pub const PLACEHOLDER_MOBILE: &str = "0000000000";
pub const ADDRESS_NOT_PROVIDED: &str = "Address not provided";
pub const DEFAULT_PIN_CODE: &str = "400000";
pub const NOT_PROVIDED: &str = "Not provided";
pub const DEFAULT_MARITAL_STATUS: MaritalStatus = MaritalStatus::Married;
pub const DEFAULT_MATH: Math = Math::Kashi;
pub const DEFAULT_MEMBERSHIP_TYPE: MembershipType = MembershipType::Patron;
pub const IMPORTED_MEMBERSHIP_STATUS: MembershipStatus = MembershipStatus::Approved;

/// Date of birth given to members whose date can't be read.
pub fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
}

const CONTACT_CHECK_ARG: &str = "--contact-check";
const PLACEHOLDER_EMAIL_DOMAIN_ARG: &str = "--placeholder-email-domain";

/// When members without any real email or mobile number are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactCheck {
    /// Placeholders are substituted before the check, which thus never rejects a member.
    #[default]
    AfterPlaceholders,
    /// Members must have a real email or a real mobile number.
    BeforePlaceholders,
}

impl FromStr for ContactCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after-placeholders" => Ok(ContactCheck::AfterPlaceholders),
            "before-placeholders" => Ok(ContactCheck::BeforePlaceholders),
            _ => Err(format!("Unknown contact check `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ImportConfig {
    contact_check: ContactCheck,
    placeholder_email_domain: String,
}

impl ImportConfig {
    pub fn new(contact_check: ContactCheck, placeholder_email_domain: String) -> Self {
        Self {
            contact_check,
            placeholder_email_domain,
        }
    }

    /// Build the configuration from the app args, falling back to defaults on missing or wrong values.
    pub fn from_args() -> Self {
        let contact_check = match retrieve_arg_value(CONTACT_CHECK_ARG) {
            None => ContactCheck::default(),
            Some(value) => ContactCheck::from_str(&value).unwrap_or_else(|error| {
                warn!("{error}, using default contact check instead.");
                ContactCheck::default()
            }),
        };
        let placeholder_email_domain = retrieve_arg_value(PLACEHOLDER_EMAIL_DOMAIN_ARG)
            .filter(|domain| !domain.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_EMAIL_DOMAIN.to_owned());

        Self::new(contact_check, placeholder_email_domain)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new(
            ContactCheck::default(),
            DEFAULT_PLACEHOLDER_EMAIL_DOMAIN.to_owned(),
        )
    }
}
