use crate::database::dao;
use crate::database::error::DatabaseError;
use crate::member_import::address_record::{ADDRESS_COLUMNS, AddressIndex, AddressRecord};
use crate::member_import::config::{
    ContactCheck, DEFAULT_MARITAL_STATUS, DEFAULT_MATH, DEFAULT_MEMBERSHIP_TYPE,
    IMPORTED_MEMBERSHIP_STATUS, ImportConfig, default_date_of_birth,
};
use crate::member_import::error::ImportError;
use crate::member_import::error::ImportError::{CantOpenInput, MalformedInput, WrongEncoding};
use crate::member_import::field_resolver::{
    ContactDetails, or_not_provided, parse_date, resolve_gender, resolve_pin_code,
    resolve_postal_address,
};
use crate::member_import::member_record::{MEMBER_COLUMNS, MemberRecord};
use chrono::{NaiveDateTime, Utc};
use csv::StringRecord;
use diesel::{Connection, SqliteConnection};
use dto::import_summary::ImportSummary;
use dto::membership::{Membership, MembershipCreate};
use dto::user::{User, UserType};
use encoding::all::WINDOWS_1252;
use encoding::{DecoderTrap, Encoding};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub mod address_record;
pub mod config;
pub mod error;
pub mod field_resolver;
pub mod member_record;

type Result<T, E = ImportError> = std::result::Result<T, E>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug)]
enum RowOutcome {
    Imported { user: User, membership: Membership },
    /// The row is rejected and the import goes on.
    Skipped(String),
    /// Nothing more can be written, the import is aborted.
    Fatal(ImportError),
}

/// Import members from the members table, completed with their contact details from the
/// address table.
///
/// Rejected rows are reported within the summary. The whole import is written within a single
/// transaction: when an error is returned, nothing has been stored.
pub fn import_members_from_csv(
    connection: &mut SqliteConnection,
    members_csv_path: &Path,
    address_csv_path: &Path,
    config: &ImportConfig,
) -> Result<ImportSummary> {
    info!("Importing members from {members_csv_path:?} with addresses from {address_csv_path:?}...");

    let address_records = read_records::<AddressRecord>(address_csv_path, &ADDRESS_COLUMNS)?
        .into_iter()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(error) => {
                warn!("Ignoring unreadable address in {address_csv_path:?} [error: {error}]");
                None
            }
        });
    let address_index = AddressIndex::build(address_records);
    if address_index.is_empty() {
        warn!("No address found in {address_csv_path:?}, every member will get placeholders.");
    }

    let member_records = read_records::<MemberRecord>(members_csv_path, &MEMBER_COLUMNS)?;
    debug!(
        "{} member rows to import, {} addresses available",
        member_records.len(),
        address_index.len()
    );

    let summary = connection.transaction::<_, ImportError, _>(|connection| {
        import_member_rows(connection, member_records, &address_index, config)
    })?;

    info!(
        "Import done [users created: {}, memberships created: {}, errors: {}]",
        summary.users_created(),
        summary.memberships_created(),
        summary.errors().len()
    );
    Ok(summary)
}

fn import_member_rows(
    connection: &mut SqliteConnection,
    member_records: Vec<csv::Result<MemberRecord>>,
    address_index: &AddressIndex,
    config: &ImportConfig,
) -> Result<ImportSummary> {
    let mut users_created = 0;
    let mut memberships_created = 0;
    let mut errors = vec![];

    for (index, member_record) in member_records.into_iter().enumerate() {
        let row = index + 1;
        let outcome = match member_record {
            Ok(member) => import_member(connection, &member, row, address_index, config),
            Err(error) => RowOutcome::Skipped(format!("Error processing member unknown: {error}")),
        };

        match outcome {
            RowOutcome::Imported { user, membership } => {
                debug!("Row {row} imported [user: {}, membership: {}]", user.id(), membership.id());
                users_created += 1;
                memberships_created += 1;
            }
            RowOutcome::Skipped(reason) => {
                debug!("Row {row} skipped: {reason}");
                errors.push(reason);
            }
            RowOutcome::Fatal(error) => return Err(error),
        }
    }

    Ok(ImportSummary::new(users_created, memberships_created, errors))
}

fn import_member(
    connection: &mut SqliteConnection,
    member: &MemberRecord,
    row: usize,
    address_index: &AddressIndex,
    config: &ImportConfig,
) -> RowOutcome {
    let Some(member_code) = member.member_code().as_deref() else {
        return RowOutcome::Skipped(format!("Missing MEMBER CODE in row {row}"));
    };
    let (Some(first_name), Some(surname)) = (member.first_name().as_deref(), member.surname().as_deref()) else {
        return RowOutcome::Skipped(format!(
            "Missing {} for member {member_code}",
            member.missing_names().join(" and ")
        ));
    };

    let address = address_index.get(member.address_code().as_deref());
    if address.is_none() {
        debug!("No address found for member {member_code}");
    }
    let contact_details = ContactDetails::resolve(address);
    if *config.contact_check() == ContactCheck::BeforePlaceholders && !contact_details.is_reachable() {
        return RowOutcome::Skipped(format!("No valid email or mobile for member {member_code}"));
    }

    let email = contact_details.email_or_placeholder(member_code, config.placeholder_email_domain());
    match dao::user::find_user_by_email(connection, &email) {
        Ok(None) => {}
        Ok(Some(_)) => return RowOutcome::Skipped(format!("User with email {email} already exists")),
        Err(error) => return store_failure(member_code, error),
    }

    let now = Utc::now().naive_utc();
    let user = User::new(
        Uuid::new_v4().to_string(),
        first_name.to_owned(),
        member.middle_name().clone(),
        surname.to_owned(),
        email,
        contact_details.mobile_number_or_placeholder(),
        UserType::Member,
        false,
        now,
        now,
    );
    let membership = build_membership(member, user.id(), address, now);

    let stored = connection.transaction::<_, DatabaseError, _>(|connection| {
        dao::user::insert_user(connection, &user, None)?;
        dao::membership::insert_membership(connection, &membership)
    });
    match stored {
        Ok(()) => RowOutcome::Imported { user, membership },
        Err(error) => store_failure(member_code, error),
    }
}

fn build_membership(
    member: &MemberRecord,
    user_id: &str,
    address: Option<&AddressRecord>,
    now: NaiveDateTime,
) -> Membership {
    let joining_date = parse_date(member.date_of_joining().as_deref())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(now);

    let details = MembershipCreate::new(
        user_id.to_owned(),
        resolve_gender(member.gender().as_deref()),
        resolve_postal_address(address),
        resolve_pin_code(address),
        parse_date(member.date_of_birth().as_deref()).unwrap_or_else(default_date_of_birth),
        or_not_provided(member.occupation()),
        or_not_provided(member.qualification()),
        DEFAULT_MARITAL_STATUS,
        None,
        or_not_provided(member.gotra()),
        or_not_provided(member.kuladevata()),
        DEFAULT_MATH,
        or_not_provided(member.native_place()),
        None,
        member.introducer_name().clone(),
        DEFAULT_MEMBERSHIP_TYPE,
        IMPORTED_MEMBERSHIP_STATUS,
    );
    Membership::new(Uuid::new_v4().to_string(), details, joining_date, Some(joining_date))
}

/// A violated constraint only rejects the row. Any other database failure aborts the import.
fn store_failure(member_code: &str, error: DatabaseError) -> RowOutcome {
    if error.is_constraint_violation() {
        RowOutcome::Skipped(format!("Error processing member {member_code}: {error}"))
    } else {
        error!("Can't store member {member_code}, aborting import.\n{error:#?}");
        RowOutcome::Fatal(ImportError::Database(error))
    }
}

/// Read a whole table in memory. Unexpected or missing columns are reported, not rejected.
fn read_records<T: DeserializeOwned>(
    path: &Path,
    expected_columns: &[&str],
) -> Result<Vec<csv::Result<T>>> {
    let content = read_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| MalformedInput {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?
        .clone();
    for column in unexpected_columns(&headers, expected_columns) {
        warn!("Unknown column `{column}` in {path:?} is ignored");
    }
    for column in missing_columns(&headers, expected_columns) {
        warn!("Column `{column}` is missing from {path:?}, its values are read as empty");
    }

    Ok(reader.deserialize().collect())
}

fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|error| {
        error!("Can't open {path:?}\n{error:#?}");
        CantOpenInput {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    })?;
    decode(&bytes)
}

/// UTF-8 is expected, with or without BOM. Anything else is read as Windows-1252.
fn decode(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(content) => Ok(content.to_owned()),
        Err(_) => {
            warn!("Content is not valid UTF-8, decoding it as Windows-1252");
            WINDOWS_1252.decode(bytes, DecoderTrap::Replace).map_err(WrongEncoding)
        }
    }
}

fn unexpected_columns<'a>(headers: &'a StringRecord, expected_columns: &[&str]) -> Vec<&'a str> {
    headers
        .iter()
        .filter(|header| !header.is_empty() && !expected_columns.contains(header))
        .collect()
}

fn missing_columns<'a>(headers: &StringRecord, expected_columns: &[&'a str]) -> Vec<&'a str> {
    expected_columns
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect()
}
