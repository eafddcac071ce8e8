use crate::member_import::config::ImportConfig;
use crate::member_import::import_members_from_csv;
use crate::tools::log_error_and_return;
use crate::web::api::Result;
use crate::web::authentication::Administrator;
use crate::web::error::WebError;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::import_summary::{ImportReport, ImportRequest};
use log::{error, info};
use rocket::State;
use rocket::serde::json::Json;
use rocket::tokio::task::spawn_blocking;

/// Import members from a pair of CSV files readable by the server.
/// Rejected rows do not fail the request: they are listed in the returned report.
/// The import reads files and writes to the database synchronously, so it runs on a blocking thread.
#[post("/admin/import-data", format = "application/json", data = "<import_request>")]
pub async fn import_data(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    import_config: &State<ImportConfig>,
    admin: Administrator,
    import_request: Json<ImportRequest>,
) -> Result<Json<ImportReport>> {
    info!("Member import requested by {}", admin.user_id());
    let mut connection = pool.get()?;
    let import_config = import_config.inner().clone();
    let import_request = import_request.into_inner();

    let summary = spawn_blocking(move || {
        import_members_from_csv(
            &mut connection,
            import_request.members_csv_path(),
            import_request.address_csv_path(),
            &import_config,
        )
    })
    .await
    .map_err(log_error_and_return(WebError::Internal))?
    .map_err(|import_error| {
        error!("Member import failed [reason: {import_error}]");
        WebError::ImportFailed(import_error.to_string())
    })?;

    Ok(Json(ImportReport::from(summary)))
}

#[cfg(test)]
mod tests {
    use crate::database::{dao, with_temp_database};
    use crate::member_import::tests::{KAMATH_ADDRESS, write_tables};
    use crate::web::api::tests::{admin, client, log_in};
    use crate::web::authentication::tests::bearer;
    use diesel::SqliteConnection;
    use diesel::r2d2::{ConnectionManager, Pool};
    use dto::import_summary::{ImportReport, ImportRequest, ImportSummary};
    use dto::user::User;
    use rocket::http::{ContentType, Status};
    use rocket::serde::json::{Value, json};
    use rocket::tokio::runtime::Runtime;
    use std::path::PathBuf;

    mod import_data {
        use super::*;

        #[test]
        fn success() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let (members_csv_path, address_csv_path) = write_tables(
                    &[
                        "1042,Ramesh,Vasudev,Kamath,X1,Engineer,B.E.,Vatsa,Shantadurga,Karwar,,MALE,15/06/1985,01/02/2000",
                        "1043,,,Shenoy,X1,,,,,,,FEMALE,,",
                    ],
                    &[KAMATH_ADDRESS],
                );

                let response = client
                    .post("/api/v1/admin/import-data")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(ImportRequest::new(members_csv_path, address_csv_path)).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                let report: ImportReport = response.into_json().await.unwrap();
                assert!(*report.success());
                assert_eq!(
                    &ImportSummary::new(1, 1, vec!["Missing FIRST NAME for member 1043".to_owned()]),
                    report.summary()
                );

                let mut connection = pool.get().unwrap();
                assert!(dao::user::find_user_by_email(&mut connection, "kamath@example.com").unwrap().is_some());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn repeated_import() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let (members_csv_path, address_csv_path) = write_tables(
                    &["1042,Ramesh,Vasudev,Kamath,X1,Engineer,B.E.,Vatsa,Shantadurga,Karwar,,MALE,15/06/1985,01/02/2000"],
                    &[KAMATH_ADDRESS],
                );
                let request = json!(ImportRequest::new(members_csv_path, address_csv_path)).to_string();

                let mut summaries = vec![];
                for _ in 0..2 {
                    let response = client
                        .post("/api/v1/admin/import-data")
                        .header(ContentType::JSON)
                        .header(bearer(&token))
                        .body(request.clone())
                        .dispatch()
                        .await;
                    assert_eq!(Status::Ok, response.status());
                    let report: ImportReport = response.into_json().await.unwrap();
                    summaries.push(report.summary().clone());
                }

                assert_eq!(ImportSummary::new(1, 1, vec![]), summaries[0]);
                assert_eq!(
                    ImportSummary::new(0, 0, vec!["User with email kamath@example.com already exists".to_owned()]),
                    summaries[1]
                );

                let response = client.get("/health").dispatch().await;
                assert_eq!(Status::Ok, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn missing_file() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &admin());
                let request = ImportRequest::new(
                    PathBuf::from("/does/not/exist/members.csv"),
                    PathBuf::from("/does/not/exist/address.csv"),
                );

                let response = client
                    .post("/api/v1/admin/import-data")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(request).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::InternalServerError, response.status());
                let body: Value = response.into_json().await.unwrap();
                let detail = body["detail"].as_str().unwrap();
                assert!(detail.starts_with("Error importing data: Can't open file"));
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn not_admin() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let token = log_in(&client, &pool, &User::new_test());
                let request = ImportRequest::new(PathBuf::from("members.csv"), PathBuf::from("address.csv"));

                let response = client
                    .post("/api/v1/admin/import-data")
                    .header(ContentType::JSON)
                    .header(bearer(&token))
                    .body(json!(request).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Forbidden, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
