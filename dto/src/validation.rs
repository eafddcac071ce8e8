use crate::error::ValidationError;
use crate::error::ValidationError::{
    EmptyField, InvalidEmail, InvalidMobileNumber, InvalidPanNumber, InvalidPinCode, NegativeAmount,
};
use rust_decimal::Decimal;

pub(crate) fn validate_not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(EmptyField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local_part, domain)) => {
            !local_part.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(InvalidEmail(email.to_owned()))
    }
}

fn is_digits(value: &str, length: usize) -> bool {
    value.len() == length && value.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn validate_mobile_number(mobile_number: &str) -> Result<(), ValidationError> {
    if is_digits(mobile_number, 10) {
        Ok(())
    } else {
        Err(InvalidMobileNumber)
    }
}

pub(crate) fn validate_pin_code(pin_code: &str) -> Result<(), ValidationError> {
    if is_digits(pin_code, 6) {
        Ok(())
    } else {
        Err(InvalidPinCode)
    }
}

pub(crate) fn validate_pan_number(pan_number: &str) -> Result<(), ValidationError> {
    if pan_number.len() == 10 && pan_number.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(InvalidPanNumber)
    }
}

pub(crate) fn validate_positive_amount(
    field: &'static str,
    amount: &Decimal,
) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(NegativeAmount(field))
    } else {
        Ok(())
    }
}
