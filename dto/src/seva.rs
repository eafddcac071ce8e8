use crate::error::ValidationError;
use crate::validation::{validate_not_empty, validate_positive_amount};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Offering of the mandal that can be booked.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Seva {
    id: String,
    name: String,
    description: Option<String>,
    price: Decimal,
    is_active: bool,
}

impl Seva {
    pub fn new(
        id: String,
        name: String,
        description: Option<String>,
        price: Decimal,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            is_active,
        }
    }

    pub fn from_request(id: String, request: SevaCreate) -> Self {
        Self::new(
            id,
            request.name,
            request.description,
            request.price.round_dp(2),
            request.is_active,
        )
    }

    pub fn updated_with(self, update: SevaUpdate) -> Self {
        Self {
            name: update.name.unwrap_or(self.name),
            description: update.description.or(self.description),
            price: update.price.map(|price| price.round_dp(2)).unwrap_or(self.price),
            is_active: update.is_active.unwrap_or(self.is_active),
            ..self
        }
    }
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct SevaCreate {
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: Decimal,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

impl SevaCreate {
    pub fn new(name: String, description: Option<String>, price: Decimal, is_active: bool) -> Self {
        Self {
            name,
            description,
            price,
            is_active,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_empty("name", &self.name)?;
        validate_positive_amount("price", &self.price)
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct SevaUpdate {
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    is_active: Option<bool>,
}

impl SevaUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_not_empty("name", name)?;
        }
        match &self.price {
            Some(price) => validate_positive_amount("price", price),
            None => Ok(()),
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub const SEVA_ID: &str = "0f6a4a4e-8a2d-4d0c-9b8e-57d1a8a0f3c2";
    pub const SEVA_NAME: &str = "Satyanarayan Pooja";

    impl Seva {
        pub fn new_test(id: &str, name: &str, price: Decimal) -> Self {
            Seva::new(id.to_owned(), name.to_owned(), None, price, true)
        }
    }

    impl SevaCreate {
        pub fn new_test(name: &str, price: Decimal) -> Self {
            SevaCreate::new(name.to_owned(), Some("Monthly pooja".to_owned()), price, true)
        }
    }


    #[cfg(test)]
    mod updated_with {
        use super::*;

        #[test]
        fn success() {
            let update = SevaUpdate {
                price: Some(Decimal::new(2512345, 4)),
                is_active: Some(false),
                ..Default::default()
            };

            let seva = Seva::new_test(SEVA_ID, SEVA_NAME, Decimal::new(101, 0)).updated_with(update);
            assert_eq!(&Decimal::new(25123, 2), seva.price());
            assert!(!seva.is_active());
            assert_eq!(SEVA_NAME, seva.name());
        }
    }
}
