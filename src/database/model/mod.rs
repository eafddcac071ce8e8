use crate::database::error::DatabaseError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) mod booking;
pub(crate) mod membership;
pub(crate) mod page;
pub(crate) mod seva;
pub(crate) mod user;

/// Timestamps are stored as text, in a format that sorts chronologically.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub(crate) fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, DatabaseError> {
    Ok(NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)?)
}

pub(crate) fn parse_optional_datetime(
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, DatabaseError> {
    value.as_deref().map(parse_datetime).transpose()
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, DatabaseError> {
    Ok(NaiveDate::from_str(value)?)
}

pub(crate) fn parse_decimal(value: &str) -> Result<Decimal, DatabaseError> {
    Ok(Decimal::from_str(value)?)
}
