use crate::database::dao;
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::database::init_db;
use crate::error::ApplicationError::{IncompleteImportArguments, PasswordHashing};
use crate::error::Result;
use crate::member_import::config::ImportConfig;
use crate::member_import::import_members_from_csv;
use crate::tools::env_args::retrieve_arg_value;
use crate::tools::log_error_and_return;
use crate::tools::password::hash_password;
use chrono::Utc;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::user::{User, UserType};
use log::{debug, info, warn};
use std::path::PathBuf;
use uuid::Uuid;

const ADMIN_EMAIL_ARG: &str = "--admin-email";
const ADMIN_PASSWORD_ARG: &str = "--admin-password";
const MEMBERS_CSV_ARG: &str = "--members-csv";
const ADDRESS_CSV_ARG: &str = "--address-csv";

const DEFAULT_ADMIN_EMAIL: &str = "admin@gsbmandal.org";
const ADMIN_MOBILE_NO: &str = "9999999999";
const LOGGED_IMPORT_ERRORS: usize = 10;

/// Prepare everything the server needs before accepting requests:
/// open the database, make sure an administrator exists,
/// then run the import requested on the command line, if any.
pub fn initialize(import_config: &ImportConfig) -> Result<Pool<ConnectionManager<SqliteConnection>>> {
    let pool = init_db()?;
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;

    let admin_email = retrieve_arg_value(ADMIN_EMAIL_ARG).unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned());
    let admin_password = retrieve_arg_value(ADMIN_PASSWORD_ARG);
    seed_administrator(&mut connection, &admin_email, admin_password.as_deref())?;

    if let Some((members_csv_path, address_csv_path)) = import_paths()? {
        import_at_start_up(&mut connection, members_csv_path, address_csv_path, import_config)?;
    }

    Ok(pool)
}

/// Create the first administrator. Returns whether one has been created.
fn seed_administrator(
    connection: &mut SqliteConnection,
    admin_email: &str,
    admin_password: Option<&str>,
) -> Result<bool> {
    if dao::user::admin_exists(connection)? {
        debug!("An administrator already exists, skipping seeding.");
        return Ok(false);
    }
    let Some(admin_password) = admin_password else {
        warn!("No administrator exists and no {ADMIN_PASSWORD_ARG} has been given, skipping seeding.");
        return Ok(false);
    };
    if dao::user::find_user_by_email(connection, admin_email)?.is_some() {
        warn!("User {admin_email} already exists and is not an administrator, skipping seeding.");
        return Ok(false);
    }

    let password_hash = hash_password(admin_password).map_err(PasswordHashing)?;
    let now = Utc::now().naive_utc();
    let admin = User::new(
        Uuid::new_v4().to_string(),
        "Admin".to_owned(),
        None,
        "User".to_owned(),
        admin_email.to_owned(),
        ADMIN_MOBILE_NO.to_owned(),
        UserType::Member,
        true,
        now,
        now,
    );
    dao::user::insert_user(connection, &admin, Some(&password_hash))?;
    info!("Administrator {admin_email} created.");

    Ok(true)
}

fn import_paths() -> Result<Option<(PathBuf, PathBuf)>> {
    match (retrieve_arg_value(MEMBERS_CSV_ARG), retrieve_arg_value(ADDRESS_CSV_ARG)) {
        (Some(members_csv_path), Some(address_csv_path)) => {
            Ok(Some((PathBuf::from(members_csv_path), PathBuf::from(address_csv_path))))
        }
        (None, None) => Ok(None),
        _ => Err(IncompleteImportArguments),
    }
}

fn import_at_start_up(
    connection: &mut SqliteConnection,
    members_csv_path: PathBuf,
    address_csv_path: PathBuf,
    import_config: &ImportConfig,
) -> Result<()> {
    let summary = import_members_from_csv(connection, &members_csv_path, &address_csv_path, import_config)?;

    info!(
        "Import completed: {} users and {} memberships created.",
        summary.users_created(),
        summary.memberships_created()
    );
    if !summary.errors().is_empty() {
        warn!("{} rows have been rejected:", summary.errors().len());
        for error in summary.errors().iter().take(LOGGED_IMPORT_ERRORS) {
            warn!("  {error}");
        }
        if summary.errors().len() > LOGGED_IMPORT_ERRORS {
            warn!("  ... and {} more", summary.errors().len() - LOGGED_IMPORT_ERRORS);
        }
    }

    Ok(())
}
