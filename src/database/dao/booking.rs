use super::Result;
use crate::database::error::DatabaseError;
use crate::database::model::booking::{Booking, BookingItem};
use crate::database::schema::{booking, booking_item};
use diesel::prelude::*;
use std::collections::HashMap;

/// Store the booking along with all its items, or nothing.
pub fn insert_booking(
    connection: &mut SqliteConnection,
    new_booking: &dto::booking::Booking,
) -> Result<()> {
    connection.transaction::<_, DatabaseError, _>(|connection| {
        diesel::insert_into(booking::table)
            .values(Booking::from(new_booking))
            .execute(connection)?;

        let items = new_booking
            .items()
            .iter()
            .map(BookingItem::from)
            .collect::<Vec<_>>();
        if !items.is_empty() {
            diesel::insert_into(booking_item::table)
                .values(&items)
                .execute(connection)?;
        }

        Ok(())
    })
}

pub fn find_booking(
    connection: &mut SqliteConnection,
    booking_id: &str,
) -> Result<Option<dto::booking::Booking>> {
    let result = booking::table
        .find(booking_id)
        .select(Booking::as_select())
        .first(connection)
        .optional()?;

    match result {
        Some(result) => Ok(with_items(connection, vec![result])?.pop()),
        None => Ok(None),
    }
}

/// List bookings from the most recent one. Only those of the given user when one is given.
pub fn list_bookings(
    connection: &mut SqliteConnection,
    user_id: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<dto::booking::Booking>> {
    let mut query = booking::table.select(Booking::as_select()).into_boxed();
    if let Some(user_id) = user_id {
        query = query.filter(booking::user_id.eq(user_id.to_owned()));
    }
    let results = query
        .order((booking::created_at.desc(), booking::id.asc()))
        .offset(skip)
        .limit(limit)
        .load(connection)?;

    with_items(connection, results)
}

fn with_items(
    connection: &mut SqliteConnection,
    bookings: Vec<Booking>,
) -> Result<Vec<dto::booking::Booking>> {
    let booking_ids = bookings.iter().map(Booking::id).collect::<Vec<_>>();
    let items = booking_item::table
        .filter(booking_item::booking_id.eq_any(booking_ids))
        .select(BookingItem::as_select())
        .order(booking_item::id.asc())
        .load(connection)?;

    let mut items_by_booking: HashMap<String, Vec<dto::booking::BookingItem>> = HashMap::new();
    for item in items {
        let booking_id = item.booking_id().to_owned();
        items_by_booking
            .entry(booking_id)
            .or_default()
            .push(dto::booking::BookingItem::try_from(item)?);
    }

    bookings
        .into_iter()
        .map(|booking| {
            let items = items_by_booking.remove(booking.id()).unwrap_or_default();
            booking.into_dto(items)
        })
        .collect()
}
