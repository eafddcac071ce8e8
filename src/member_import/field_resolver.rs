use crate::member_import::address_record::AddressRecord;
use crate::member_import::config::{
    ADDRESS_NOT_PROVIDED, DEFAULT_PIN_CODE, NOT_PROVIDED, PLACEHOLDER_MOBILE,
};
use chrono::NaiveDate;
use derive_getters::Getters;
use dto::membership::Gender;
use regex::Regex;
use std::sync::LazyLock;

/// Formats tried in order. On ambiguous dates, month/day/year wins.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// A whole number made of ten digits, possibly preceded by a trunk prefix.
static PREFIXED_MOBILE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?91|0)?([0-9]{10})$").expect("prefixed mobile number regex should be valid")
});

static MOBILE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{10}").expect("mobile number regex should be valid"));

/// Years must be written with four digits.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2})$")
        .expect("date regex should be valid")
});

/// Real contact details of a member, as found in its address record.
#[derive(Debug, PartialEq, Eq, Getters, Default)]
pub struct ContactDetails {
    email: Option<String>,
    mobile_number: Option<String>,
}

impl ContactDetails {
    pub fn resolve(address: Option<&AddressRecord>) -> Self {
        match address {
            Some(address) => Self {
                email: find_email(address),
                mobile_number: find_mobile_number(address),
            },
            None => Self::default(),
        }
    }

    /// Whether the member can be reached without relying on placeholders.
    pub fn is_reachable(&self) -> bool {
        self.email.is_some() || self.mobile_number.is_some()
    }

    pub fn email_or_placeholder(&self, member_code: &str, placeholder_domain: &str) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| placeholder_email(member_code, placeholder_domain))
    }

    pub fn mobile_number_or_placeholder(&self) -> String {
        self.mobile_number
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_MOBILE.to_owned())
    }
}

/// Unique per member code, so that members without email never collide.
pub fn placeholder_email(member_code: &str, placeholder_domain: &str) -> String {
    format!("member{member_code}@placeholder.{placeholder_domain}")
}

fn find_email(address: &AddressRecord) -> Option<String> {
    address
        .email_candidates()
        .into_iter()
        .flatten()
        .next()
        .map(str::to_owned)
}

fn find_mobile_number(address: &AddressRecord) -> Option<String> {
    address
        .mobile_candidates()
        .into_iter()
        .flatten()
        .find_map(extract_mobile_number)
}

/// Extract the first ten-digit number from a free-text cell.
/// A cell may hold several numbers separated by `,`, `/` or `;`.
/// Within a number, spaces, dashes, dots and parentheses are ignored.
/// A trunk prefix is only skipped when it starts a number of exactly ten more digits,
/// otherwise the first run of ten digits is taken.
pub fn extract_mobile_number(value: &str) -> Option<String> {
    value
        .split([',', '/', ';'])
        .map(|part| {
            part.chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
                .collect::<String>()
        })
        .find_map(|part| {
            PREFIXED_MOBILE_NUMBER_REGEX
                .captures(&part)
                .and_then(|captures| captures.get(1))
                .or_else(|| MOBILE_NUMBER_REGEX.find(&part))
                .map(|number| number.as_str().to_owned())
        })
}

pub fn resolve_postal_address(address: Option<&AddressRecord>) -> String {
    let postal_address = address
        .map(|address| {
            address
                .address_fragments()
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    if postal_address.is_empty() {
        ADDRESS_NOT_PROVIDED.to_owned()
    } else {
        postal_address
    }
}

pub fn resolve_pin_code(address: Option<&AddressRecord>) -> String {
    address
        .and_then(|address| address.pin_code().as_deref())
        .map(|pin_code| pin_code.replace(' ', ""))
        .unwrap_or_else(|| DEFAULT_PIN_CODE.to_owned())
}

/// Anything but an explicit male token is considered female.
pub fn resolve_gender(value: Option<&str>) -> Gender {
    match value {
        Some(value) if value.eq_ignore_ascii_case("MALE") || value.eq_ignore_ascii_case("M") => {
            Gender::Male
        }
        _ => Gender::Female,
    }
}

pub fn or_not_provided(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_PROVIDED.to_owned())
}

/// Parse a date with the first matching format. Unreadable dates are considered missing.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if !DATE_REGEX.is_match(value) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
