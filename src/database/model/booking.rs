use crate::database::error::DatabaseError;
use crate::database::model::{format_datetime, parse_datetime, parse_decimal};
use diesel::prelude::*;
use dto::booking::PaymentStatus;
use std::str::FromStr;

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::database::schema::booking)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Booking {
    id: String,
    user_id: String,
    booking_date: String,
    total_amount: String,
    donation_amount: String,
    pan_number: Option<String>,
    payment_status: String,
    receipt_id: Option<String>,
    payment_gateway_ref: Option<String>,
    created_at: String,
}

impl Booking {
    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    /// Rebuild the booking along with the items that belong to it.
    pub(crate) fn into_dto(
        self,
        items: Vec<dto::booking::BookingItem>,
    ) -> Result<dto::booking::Booking, DatabaseError> {
        Ok(dto::booking::Booking::new(
            self.id,
            self.user_id,
            parse_datetime(&self.booking_date)?,
            parse_decimal(&self.total_amount)?,
            parse_decimal(&self.donation_amount)?,
            self.pan_number,
            PaymentStatus::from_str(&self.payment_status)?,
            self.receipt_id,
            self.payment_gateway_ref,
            parse_datetime(&self.created_at)?,
            items,
        ))
    }
}

impl From<&dto::booking::Booking> for Booking {
    fn from(value: &dto::booking::Booking) -> Self {
        Self {
            id: value.id().clone(),
            user_id: value.user_id().clone(),
            booking_date: format_datetime(value.booking_date()),
            total_amount: value.total_amount().to_string(),
            donation_amount: value.donation_amount().to_string(),
            pan_number: value.pan_number().clone(),
            payment_status: value.payment_status().to_string(),
            receipt_id: value.receipt_id().clone(),
            payment_gateway_ref: value.payment_gateway_ref().clone(),
            created_at: format_datetime(value.created_at()),
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::database::schema::booking_item)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct BookingItem {
    id: String,
    booking_id: String,
    seva_id: String,
    quantity: i32,
    price_at_booking: String,
}

impl BookingItem {
    pub(crate) fn booking_id(&self) -> &str {
        &self.booking_id
    }
}

impl From<&dto::booking::BookingItem> for BookingItem {
    fn from(value: &dto::booking::BookingItem) -> Self {
        Self {
            id: value.id().clone(),
            booking_id: value.booking_id().clone(),
            seva_id: value.seva_id().clone(),
            quantity: *value.quantity(),
            price_at_booking: value.price_at_booking().to_string(),
        }
    }
}

impl TryFrom<BookingItem> for dto::booking::BookingItem {
    type Error = DatabaseError;

    fn try_from(value: BookingItem) -> Result<Self, Self::Error> {
        Ok(dto::booking::BookingItem::new(
            value.id,
            value.booking_id,
            value.seva_id,
            value.quantity,
            parse_decimal(&value.price_at_booking)?,
        ))
    }
}
