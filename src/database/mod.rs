use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::{ConnectionFailed, MissingDatabaseUrl};
use crate::database::migrations::run_migrations;
use crate::tools::env_args::retrieve_expected_arg_value;
use crate::tools::log_error_and_return;
use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

pub(crate) mod dao;
pub(crate) mod error;
mod migrations;
mod model;
mod schema;

const DATABASE_URL_ARG: &str = "--database-url";

/// Open the connection pool onto the database given as `--database-url`
/// and bring its schema up to date.
pub fn init_db() -> Result<Pool<ConnectionManager<SqliteConnection>>, DatabaseError> {
    let database_url = retrieve_expected_arg_value(DATABASE_URL_ARG, MissingDatabaseUrl)?;
    create_pool(&database_url)
}

fn create_pool(
    database_url: &str,
) -> Result<Pool<ConnectionManager<SqliteConnection>>, DatabaseError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(log_error_and_return(ConnectionFailed))?;

    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    run_migrations(&mut *connection)?;

    Ok(pool)
}

/// SQLite settings applied onto every connection of the pool.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[cfg(test)]
pub fn with_temp_database<F, T>(function: F) -> T
where
    F: FnOnce(Pool<ConnectionManager<SqliteConnection>>) -> T,
{
    let temp_dir = crate::tools::test::tests::temp_dir();
    let database_url = temp_dir.join("database.db").to_string_lossy().to_string();
    let pool = create_pool(&database_url).unwrap();

    let result = function(pool);

    let _ = std::fs::remove_dir_all(temp_dir);
    result
}

#[cfg(test)]
mod tests {
    use crate::database::error::DatabaseError::MissingDatabaseUrl;
    use crate::database::{init_db, with_temp_database};
    use crate::tools::env_args::with_env_args;
    use crate::tools::test::tests::temp_dir;
    use diesel::RunQueryDsl;
    use diesel::sql_types::Integer;

    #[derive(diesel::QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn should_fail_without_database_url() {
        let result = with_env_args(vec![], init_db);
        assert_eq!(Some(MissingDatabaseUrl), result.err());
    }

    #[test]
    fn should_create_database_from_args() {
        let database_url = temp_dir().join("database.db");
        let args = vec![format!("--database-url={}", database_url.to_string_lossy())];

        let result = with_env_args(args, init_db);
        assert!(result.is_ok());
        assert!(database_url.exists());
    }

    #[test]
    fn should_enable_foreign_keys() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            let pragma = diesel::sql_query("PRAGMA foreign_keys")
                .get_result::<Pragma>(&mut connection)
                .unwrap();
            assert_eq!(1, pragma.foreign_keys);
        });
    }
}
