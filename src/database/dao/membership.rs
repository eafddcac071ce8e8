use super::{Result, into_dtos};
use crate::database::model::membership::Membership;
use crate::database::schema::membership;
use diesel::prelude::*;

pub fn insert_membership(
    connection: &mut SqliteConnection,
    new_membership: &dto::membership::Membership,
) -> Result<()> {
    diesel::insert_into(membership::table)
        .values(Membership::from(new_membership))
        .execute(connection)?;

    Ok(())
}

pub fn find_membership(
    connection: &mut SqliteConnection,
    membership_id: &str,
) -> Result<Option<dto::membership::Membership>> {
    let result = membership::table
        .find(membership_id)
        .select(Membership::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::membership::Membership::try_from).transpose()
}

pub fn find_membership_by_user(
    connection: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<dto::membership::Membership>> {
    let result = membership::table
        .filter(membership::user_id.eq(user_id))
        .select(Membership::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::membership::Membership::try_from).transpose()
}

pub fn list_memberships(
    connection: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<dto::membership::Membership>> {
    let results = membership::table
        .select(Membership::as_select())
        .order((membership::application_date.asc(), membership::id.asc()))
        .offset(skip)
        .limit(limit)
        .load(connection)?;

    into_dtos(results)
}

/// Overwrite the stored membership with the given one. Return whether it existed.
pub fn update_membership(
    connection: &mut SqliteConnection,
    updated_membership: &dto::membership::Membership,
) -> Result<bool> {
    let row = Membership::from(updated_membership);
    let count = diesel::update(membership::table.find(updated_membership.id()))
        .set(&row)
        .execute(connection)?;

    Ok(count > 0)
}
