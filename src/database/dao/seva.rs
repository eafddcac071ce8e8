use super::{Result, into_dtos};
use crate::database::model::seva::Seva;
use crate::database::schema::seva;
use diesel::prelude::*;

pub fn insert_seva(connection: &mut SqliteConnection, new_seva: &dto::seva::Seva) -> Result<()> {
    diesel::insert_into(seva::table)
        .values(Seva::from(new_seva))
        .execute(connection)?;

    Ok(())
}

pub fn find_seva(
    connection: &mut SqliteConnection,
    seva_id: &str,
) -> Result<Option<dto::seva::Seva>> {
    let result = seva::table
        .find(seva_id)
        .select(Seva::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::seva::Seva::try_from).transpose()
}

pub fn find_seva_by_name(
    connection: &mut SqliteConnection,
    name: &str,
) -> Result<Option<dto::seva::Seva>> {
    let result = seva::table
        .filter(seva::name.eq(name))
        .select(Seva::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::seva::Seva::try_from).transpose()
}

/// List the sevas that can currently be booked.
pub fn list_active_sevas(
    connection: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<dto::seva::Seva>> {
    let results = seva::table
        .filter(seva::is_active.eq(true))
        .select(Seva::as_select())
        .order(seva::name.asc())
        .offset(skip)
        .limit(limit)
        .load(connection)?;

    into_dtos(results)
}

pub fn update_seva(connection: &mut SqliteConnection, updated_seva: &dto::seva::Seva) -> Result<bool> {
    let row = Seva::from(updated_seva);
    let count = diesel::update(seva::table.find(updated_seva.id()))
        .set(&row)
        .execute(connection)?;

    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::error::DatabaseError::ConstraintViolation;
    use crate::database::with_temp_database;
    use dto::seva::tests::{SEVA_ID, SEVA_NAME};
    use rust_decimal::Decimal;

    mod insert_seva {
        use super::*;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let seva = dto::seva::Seva::new_test(SEVA_ID, SEVA_NAME, Decimal::new(50150, 2));

                insert_seva(&mut connection, &seva).unwrap();

                assert_eq!(Some(seva.clone()), find_seva(&mut connection, SEVA_ID).unwrap());
                assert_eq!(Some(seva), find_seva_by_name(&mut connection, SEVA_NAME).unwrap());
            });
        }

        #[test]
        fn fail_on_duplicate_name() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let seva = dto::seva::Seva::new_test(SEVA_ID, SEVA_NAME, Decimal::ONE);
                insert_seva(&mut connection, &seva).unwrap();

                let other_seva = dto::seva::Seva::new_test("other", SEVA_NAME, Decimal::ONE);
                let result = insert_seva(&mut connection, &other_seva);
                assert!(matches!(result, Err(ConstraintViolation(_))));
            });
        }
    }

    mod list_active_sevas {
        use super::*;
        use dto::seva::SevaUpdate;
        use rocket::serde::json::from_str;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let abhishek = dto::seva::Seva::new_test("1", "Abhishek", Decimal::ONE);
                let pooja = dto::seva::Seva::new_test("2", SEVA_NAME, Decimal::ONE);
                insert_seva(&mut connection, &pooja).unwrap();
                insert_seva(&mut connection, &abhishek).unwrap();

                let update: SevaUpdate = from_str(r#"{"is_active":false}"#).unwrap();
                assert!(update_seva(&mut connection, &pooja.updated_with(update)).unwrap());

                assert_eq!(vec![abhishek], list_active_sevas(&mut connection, 0, 100).unwrap());
            });
        }
    }
}
