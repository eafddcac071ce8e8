use thiserror::Error;

/// Reasons for which a request payload is refused.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("Invalid email address [email: {0}]")]
    InvalidEmail(String),
    #[error("Mobile number must be 10 digits")]
    InvalidMobileNumber,
    #[error("Pin code must be 6 digits")]
    InvalidPinCode,
    #[error("Number of kids cannot be negative")]
    NegativeNumberOfKids,
    #[error("Unmarried members should not have children")]
    KidsForUnmarriedMember,
    #[error("PAN number must be 10 alphanumeric characters")]
    InvalidPanNumber,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Field `{0}` must be a positive amount")]
    NegativeAmount(&'static str),
}

/// A stored or submitted token does not name any variant of the enumeration.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
