use crate::error::{UnknownVariant, ValidationError};
use crate::membership::text_enum;
use crate::validation::{validate_pan_number, validate_positive_amount};
use chrono::NaiveDateTime;
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}
text_enum!(PaymentStatus, "payment status", {
    Pending => "PENDING",
    Completed => "COMPLETED",
    Failed => "FAILED",
});

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BookingItem {
    id: String,
    booking_id: String,
    seva_id: String,
    quantity: i32,
    price_at_booking: Decimal,
}

impl BookingItem {
    pub fn new(
        id: String,
        booking_id: String,
        seva_id: String,
        quantity: i32,
        price_at_booking: Decimal,
    ) -> Self {
        Self {
            id,
            booking_id,
            seva_id,
            quantity,
            price_at_booking,
        }
    }
}

/// Donation or seva booking made by a user.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Booking {
    id: String,
    user_id: String,
    booking_date: NaiveDateTime,
    total_amount: Decimal,
    donation_amount: Decimal,
    pan_number: Option<String>,
    payment_status: PaymentStatus,
    receipt_id: Option<String>,
    payment_gateway_ref: Option<String>,
    created_at: NaiveDateTime,
    items: Vec<BookingItem>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        user_id: String,
        booking_date: NaiveDateTime,
        total_amount: Decimal,
        donation_amount: Decimal,
        pan_number: Option<String>,
        payment_status: PaymentStatus,
        receipt_id: Option<String>,
        payment_gateway_ref: Option<String>,
        created_at: NaiveDateTime,
        items: Vec<BookingItem>,
    ) -> Self {
        Self {
            id,
            user_id,
            booking_date,
            total_amount,
            donation_amount,
            pan_number,
            payment_status,
            receipt_id,
            payment_gateway_ref,
            created_at,
            items,
        }
    }

    /// Build a booking from a request whose items have already been priced.
    pub fn from_request(
        id: String,
        user_id: String,
        request: BookingCreate,
        items: Vec<BookingItem>,
        now: NaiveDateTime,
    ) -> Self {
        Self::new(
            id,
            user_id,
            now,
            request.total_amount.round_dp(2),
            request.donation_amount.round_dp(2),
            request.pan_number,
            request.payment_status,
            request.receipt_id,
            request.payment_gateway_ref,
            now,
            items,
        )
    }
}

fn single_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BookingItemCreate {
    seva_id: String,
    #[serde(default = "single_quantity")]
    quantity: i32,
    #[serde(default)]
    price_at_booking: Option<Decimal>,
}

impl BookingItemCreate {
    pub fn new(seva_id: String, quantity: i32, price_at_booking: Option<Decimal>) -> Self {
        Self {
            seva_id,
            quantity,
            price_at_booking,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < 1 {
            return Err(ValidationError::InvalidQuantity);
        }
        match &self.price_at_booking {
            Some(price) => validate_positive_amount("price_at_booking", price),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BookingCreate {
    #[serde(default)]
    user_id: Option<String>,
    total_amount: Decimal,
    #[serde(default)]
    donation_amount: Decimal,
    #[serde(default)]
    pan_number: Option<String>,
    #[serde(default)]
    payment_status: PaymentStatus,
    #[serde(default)]
    receipt_id: Option<String>,
    #[serde(default)]
    payment_gateway_ref: Option<String>,
    #[serde(default)]
    items: Vec<BookingItemCreate>,
}

impl BookingCreate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Option<String>,
        total_amount: Decimal,
        donation_amount: Decimal,
        pan_number: Option<String>,
        payment_status: PaymentStatus,
        receipt_id: Option<String>,
        payment_gateway_ref: Option<String>,
        items: Vec<BookingItemCreate>,
    ) -> Self {
        Self {
            user_id,
            total_amount,
            donation_amount,
            pan_number,
            payment_status,
            receipt_id,
            payment_gateway_ref,
            items,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_positive_amount("total_amount", &self.total_amount)?;
        validate_positive_amount("donation_amount", &self.donation_amount)?;
        if let Some(pan_number) = &self.pan_number {
            validate_pan_number(pan_number)?;
        }
        self.items.iter().try_for_each(BookingItemCreate::validate)
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl BookingCreate {
        pub fn new_test(user_id: Option<&str>, items: Vec<BookingItemCreate>) -> Self {
            BookingCreate::new(
                user_id.map(str::to_owned),
                Decimal::new(1001, 0),
                Decimal::new(500, 0),
                Some("ABCDE1234F".to_owned()),
                PaymentStatus::Pending,
                None,
                None,
                items,
            )
        }
    }

}
