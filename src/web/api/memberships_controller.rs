use crate::database::dao;
use crate::web::api::{Result, conflict_as_bad_request, pagination};
use crate::web::authentication::{Administrator, AuthenticatedUser};
use crate::web::error::WebError;
use chrono::Utc;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::membership::{Membership, MembershipCreate, MembershipUpdate};
use log::info;
use rocket::State;
use rocket::serde::json::Json;
use uuid::Uuid;

const ALREADY_MEMBER: &str = "This user already has a membership.";
const MEMBERSHIP_NOT_FOUND: &str = "Membership not found";

#[get("/memberships?<skip>&<limit>")]
pub async fn list_memberships(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Membership>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    Ok(Json(dao::membership::list_memberships(&mut connection, skip, limit)?))
}

/// Apply for a membership. Users apply for themselves, administrators for anyone.
#[post("/memberships", format = "application/json", data = "<membership_create>")]
pub async fn create_membership(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    membership_create: Json<MembershipCreate>,
) -> Result<Json<Membership>> {
    let membership_create = membership_create.into_inner();
    caller.ensure_access(membership_create.user_id())?;
    membership_create.validate()?;

    let mut connection = pool.get()?;
    if dao::membership::find_membership_by_user(&mut connection, membership_create.user_id())?.is_some() {
        return Err(WebError::bad_request(ALREADY_MEMBER));
    }
    if dao::user::find_user(&mut connection, membership_create.user_id())?.is_none() {
        return Err(WebError::not_found("User not found"));
    }

    let membership = Membership::new(
        Uuid::new_v4().to_string(),
        membership_create,
        Utc::now().naive_utc(),
        None,
    );
    dao::membership::insert_membership(&mut connection, &membership)
        .map_err(conflict_as_bad_request(ALREADY_MEMBER))?;
    info!("Membership {} created for user {}", membership.id(), membership.user_id());

    Ok(Json(membership))
}

#[get("/memberships/<membership_id>")]
pub async fn read_membership(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    membership_id: &str,
) -> Result<Json<Membership>> {
    let mut connection = pool.get()?;

    let membership = dao::membership::find_membership(&mut connection, membership_id)?
        .ok_or_else(|| WebError::not_found(MEMBERSHIP_NOT_FOUND))?;
    caller.ensure_access(membership.user_id())?;

    Ok(Json(membership))
}

#[put("/memberships/<membership_id>", format = "application/json", data = "<membership_update>")]
pub async fn update_membership(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    membership_id: &str,
    membership_update: Json<MembershipUpdate>,
) -> Result<Json<Membership>> {
    let mut connection = pool.get()?;

    let membership = dao::membership::find_membership(&mut connection, membership_id)?
        .ok_or_else(|| WebError::not_found(MEMBERSHIP_NOT_FOUND))?
        .updated_with(membership_update.into_inner())?;
    dao::membership::update_membership(&mut connection, &membership)?;

    Ok(Json(membership))
}

#[get("/memberships/user/<user_id>")]
pub async fn read_user_membership(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: AuthenticatedUser,
    user_id: &str,
) -> Result<Json<Membership>> {
    caller.ensure_access(user_id)?;
    let mut connection = pool.get()?;

    dao::membership::find_membership_by_user(&mut connection, user_id)?
        .map(Json)
        .ok_or_else(|| WebError::not_found("Membership not found for this user"))
}

#[cfg(test)]
mod tests {
    use crate::database::{dao, with_temp_database};
    use crate::web::api::tests::{ADMIN_ID, admin, client, log_in};
    use crate::web::authentication::tests::bearer;
    use diesel::SqliteConnection;
    use diesel::r2d2::{ConnectionManager, Pool};
    use dto::membership::tests::MEMBERSHIP_ID;
    use dto::membership::{Membership, MembershipCreate, MembershipStatus};
    use dto::user::User;
    use dto::user::tests::USER_ID;
    use rocket::http::{ContentType, Status};
    use rocket::serde::json::{Value, json};
    use rocket::tokio::runtime::Runtime;

    fn insert_membership(pool: &Pool<ConnectionManager<SqliteConnection>>, user_id: &str) -> Membership {
        let mut connection = pool.get().unwrap();
        let membership = Membership::new_test(MEMBERSHIP_ID, user_id);
        dao::membership::insert_membership(&mut connection, &membership).unwrap();
        membership
    }

    mod create_membership {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());

                let response = client
                    .post("/api/v1/memberships")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(MembershipCreate::new_test(USER_ID)).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                let membership: Membership = response.into_json().await.unwrap();
                assert_eq!(USER_ID, membership.user_id());
                assert_eq!(&MembershipStatus::Pending, membership.status());

                let mut connection = pool.get().unwrap();
                let stored = dao::membership::find_membership_by_user(&mut connection, USER_ID).unwrap();
                assert_eq!(Some(membership), stored);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn already_member() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                insert_membership(&pool, USER_ID);

                let response = client
                    .post("/api/v1/memberships")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(MembershipCreate::new_test(USER_ID)).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::BadRequest, response.status());
                let body: Value = response.into_json().await.unwrap();
                assert_eq!(json!({ "detail": "This user already has a membership." }), body);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn unknown_user() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());

                let response = client
                    .post("/api/v1/memberships")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(MembershipCreate::new_test("unknown")).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::NotFound, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn invalid_pin_code() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let mut membership_create = json!(MembershipCreate::new_test(USER_ID));
                membership_create["pin_code"] = json!("4000");

                let response = client
                    .post("/api/v1/memberships")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(membership_create.to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::BadRequest, response.status());
                let body: Value = response.into_json().await.unwrap();
                assert_eq!(json!({ "detail": "Pin code must be 6 digits" }), body);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn kids_for_unmarried_member() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let mut membership_create = json!(MembershipCreate::new_test(USER_ID));
                membership_create["marital_status"] = json!("UNMARRIED");

                let response = client
                    .post("/api/v1/memberships")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(membership_create.to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::BadRequest, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod read_membership {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let membership = insert_membership(&pool, USER_ID);

                let response = client
                    .get(format!("/api/v1/memberships/{MEMBERSHIP_ID}"))
                    .header(bearer(&token))
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                assert_eq!(Some(membership), response.into_json().await);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn other_member() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let mut connection = pool.get().unwrap();
                dao::user::insert_user(&mut connection, &admin(), None).unwrap();
                insert_membership(&pool, ADMIN_ID);

                let response = client
                    .get(format!("/api/v1/memberships/{MEMBERSHIP_ID}"))
                    .header(bearer(&token))
                    .dispatch()
                    .await;
                assert_eq!(Status::Forbidden, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod update_membership {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let mut connection = pool.get().unwrap();
                dao::user::insert_user(&mut connection, &User::new_test(), None).unwrap();
                insert_membership(&pool, USER_ID);

                let response = client
                    .put(format!("/api/v1/memberships/{MEMBERSHIP_ID}"))
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!({ "status": "APPROVED", "math": "GOKARNA" }).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                let membership: Membership = response.into_json().await.unwrap();
                assert_eq!(&MembershipStatus::Approved, membership.status());

                let stored = dao::membership::find_membership(&mut connection, MEMBERSHIP_ID).unwrap();
                assert_eq!(Some(membership), stored);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn not_admin() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                insert_membership(&pool, USER_ID);

                let response = client
                    .put(format!("/api/v1/memberships/{MEMBERSHIP_ID}"))
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!({ "status": "APPROVED" }).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Forbidden, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod read_user_membership {
        use super::*;

        #[test]
        fn not_found() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());

                let response = client
                    .get(format!("/api/v1/memberships/user/{USER_ID}"))
                    .header(bearer(&token))
                    .dispatch()
                    .await;
                assert_eq!(Status::NotFound, response.status());
                let body: Value = response.into_json().await.unwrap();
                assert_eq!(json!({ "detail": "Membership not found for this user" }), body);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn by_admin() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let mut connection = pool.get().unwrap();
                dao::user::insert_user(&mut connection, &User::new_test(), None).unwrap();
                let membership = insert_membership(&pool, USER_ID);

                let response = client
                    .get(format!("/api/v1/memberships/user/{USER_ID}"))
                    .header(bearer(&token))
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                assert_eq!(Some(membership), response.into_json().await);
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
