use crate::database::dao;
use crate::web::api::{Result, conflict_as_bad_request, pagination};
use crate::web::authentication::AuthenticatedUser;
use crate::web::error::WebError;
use chrono::Utc;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::booking::{Booking, BookingCreate, BookingItem};
use log::info;
use rocket::State;
use rocket::serde::json::Json;
use uuid::Uuid;

/// Bookings of the caller, or every booking when the caller is an administrator.
#[get("/bookings?<skip>&<limit>")]
pub async fn list_bookings(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Booking>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    let user_id = (!caller.is_admin()).then(|| caller.user_id());
    Ok(Json(dao::booking::list_bookings(&mut connection, user_id, skip, limit)?))
}

/// Book sevas, possibly along with a donation.
/// Administrators may book on behalf of another user, anyone else books for themself.
/// Items without a price are charged the current price of their seva.
#[post("/bookings", format = "application/json", data = "<booking_create>")]
pub async fn create_booking(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    booking_create: Json<BookingCreate>,
) -> Result<Json<Booking>> {
    let booking_create = booking_create.into_inner();
    booking_create.validate()?;
    let mut connection = pool.get()?;

    let user_id = match booking_create.user_id() {
        Some(user_id) if caller.is_admin() && user_id != caller.user_id() => {
            if dao::user::find_user(&mut connection, user_id)?.is_none() {
                return Err(WebError::not_found("User not found"));
            }
            user_id.clone()
        }
        _ => caller.user_id().to_owned(),
    };

    let booking_id = Uuid::new_v4().to_string();
    let mut items = Vec::with_capacity(booking_create.items().len());
    for item in booking_create.items() {
        let seva = dao::seva::find_seva(&mut connection, item.seva_id())?
            .ok_or_else(|| WebError::NotFound(format!("Seva with ID {} not found", item.seva_id())))?;
        let price = item.price_at_booking().unwrap_or(*seva.price()).round_dp(2);
        items.push(BookingItem::new(
            Uuid::new_v4().to_string(),
            booking_id.clone(),
            seva.id().to_owned(),
            *item.quantity(),
            price,
        ));
    }

    let booking = Booking::from_request(booking_id, user_id, booking_create, items, Utc::now().naive_utc());
    dao::booking::insert_booking(&mut connection, &booking)
        .map_err(conflict_as_bad_request("A booking with this receipt ID already exists."))?;
    info!(
        "Booking {} created for user {} [total: {}]",
        booking.id(),
        booking.user_id(),
        booking.total_amount()
    );

    Ok(Json(booking))
}

#[get("/bookings/<booking_id>")]
pub async fn read_booking(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    booking_id: &str,
) -> Result<Json<Booking>> {
    let mut connection = pool.get()?;

    let booking = dao::booking::find_booking(&mut connection, booking_id)?
        .ok_or_else(|| WebError::not_found("Booking not found"))?;
    caller.ensure_access(booking.user_id())?;

    Ok(Json(booking))
}

#[cfg(test)]
mod tests {
    use crate::database::{dao, with_temp_database};
    use crate::web::api::tests::{ADMIN_ID, admin, client, log_in};
    use crate::web::authentication::tests::bearer;
    use diesel::SqliteConnection;
    use diesel::r2d2::{ConnectionManager, Pool};
    use dto::booking::{Booking, BookingCreate, BookingItemCreate, PaymentStatus};
    use dto::seva::Seva;
    use dto::seva::tests::{SEVA_ID, SEVA_NAME};
    use dto::user::User;
    use dto::user::tests::USER_ID;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use rocket::serde::json::{Value, json};
    use rocket::tokio::runtime::Runtime;
    use rust_decimal::Decimal;

    fn insert_seva(pool: &Pool<ConnectionManager<SqliteConnection>>) {
        let mut connection = pool.get().unwrap();
        let seva = Seva::new_test(SEVA_ID, SEVA_NAME, Decimal::new(25050, 2));
        dao::seva::insert_seva(&mut connection, &seva).unwrap();
    }

    async fn book(client: &Client, token: &str, booking_create: &BookingCreate) -> Booking {
        let response = client
            .post("/api/v1/bookings")
            .header(ContentType::JSON)
            .header(bearer(token))
            .body(json!(booking_create).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        response.into_json().await.unwrap()
    }

    mod create_booking {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                insert_seva(&pool);
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let booking_create = BookingCreate::new_test(
                    None,
                    vec![
                        BookingItemCreate::new(SEVA_ID.to_owned(), 2, None),
                        BookingItemCreate::new(SEVA_ID.to_owned(), 1, Some(Decimal::new(1001, 1))),
                    ],
                );

                let booking = book(&client, &token, &booking_create).await;
                assert_eq!(USER_ID, booking.user_id());
                assert_eq!(&PaymentStatus::Pending, booking.payment_status());
                assert_eq!(2, booking.items().len());
                assert_eq!(&Decimal::new(25050, 2), booking.items()[0].price_at_booking());
                assert_eq!(&2, booking.items()[0].quantity());
                assert_eq!(&Decimal::new(1001, 1), booking.items()[1].price_at_booking());

                let mut connection = pool.get().unwrap();
                let stored = dao::booking::find_booking(&mut connection, booking.id()).unwrap().unwrap();
                assert_eq!(booking.id(), stored.id());
                assert_eq!(2, stored.items().len());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn for_other_user_by_member() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let mut connection = pool.get().unwrap();
                dao::user::insert_user(&mut connection, &admin(), None).unwrap();

                let booking = book(&client, &token, &BookingCreate::new_test(Some(ADMIN_ID), vec![])).await;
                assert_eq!(USER_ID, booking.user_id());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn for_other_user_by_admin() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let mut connection = pool.get().unwrap();
                dao::user::insert_user(&mut connection, &User::new_test(), None).unwrap();

                let booking = book(&client, &token, &BookingCreate::new_test(Some(USER_ID), vec![])).await;
                assert_eq!(USER_ID, booking.user_id());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn unknown_seva() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let booking_create = BookingCreate::new_test(
                    None,
                    vec![BookingItemCreate::new("unknown".to_owned(), 1, None)],
                );

                let response = client
                    .post("/api/v1/bookings")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(booking_create).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::NotFound, response.status());
                let body: Value = response.into_json().await.unwrap();
                assert_eq!(json!({ "detail": "Seva with ID unknown not found" }), body);

                let mut connection = pool.get().unwrap();
                let bookings = dao::booking::list_bookings(&mut connection, None, 0, 100).unwrap();
                assert!(bookings.is_empty());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn anonymous() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;

                let response = client
                    .post("/api/v1/bookings")
                    .header(ContentType::JSON)
                    .body(json!(BookingCreate::new_test(None, vec![])).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Unauthorized, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod list_bookings {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let user_token = log_in(&client, &pool, &User::new_test());
                let admin_token = log_in(&client, &pool, &admin());
                let user_booking = book(&client, &user_token, &BookingCreate::new_test(None, vec![])).await;
                book(&client, &admin_token, &BookingCreate::new_test(None, vec![])).await;

                let response = client
                    .get("/api/v1/bookings")
                    .header(bearer(&user_token))
                    .dispatch()
                    .await;
                let bookings: Vec<Booking> = response.into_json().await.unwrap();
                assert_eq!(vec![user_booking.id()], bookings.iter().map(Booking::id).collect::<Vec<_>>());

                let response = client
                    .get("/api/v1/bookings")
                    .header(bearer(&admin_token))
                    .dispatch()
                    .await;
                let bookings: Vec<Booking> = response.into_json().await.unwrap();
                assert_eq!(2, bookings.len());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod read_booking {
        use super::*;

        #[test]
        fn other_user() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let user_token = log_in(&client, &pool, &User::new_test());
                let admin_token = log_in(&client, &pool, &admin());
                let admin_booking = book(&client, &admin_token, &BookingCreate::new_test(None, vec![])).await;

                let response = client
                    .get(format!("/api/v1/bookings/{}", admin_booking.id()))
                    .header(bearer(&user_token))
                    .dispatch()
                    .await;
                assert_eq!(Status::Forbidden, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn not_found() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());

                let response = client
                    .get("/api/v1/bookings/unknown")
                    .header(bearer(&token))
                    .dispatch()
                    .await;
                assert_eq!(Status::NotFound, response.status());
                let body: Value = response.into_json().await.unwrap();
                assert_eq!(json!({ "detail": "Booking not found" }), body);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
