use crate::database::error::DatabaseError;
use crate::database::model::parse_decimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::database::schema::seva)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Seva {
    id: String,
    name: String,
    description: Option<String>,
    price: String,
    is_active: bool,
}

impl From<&dto::seva::Seva> for Seva {
    fn from(value: &dto::seva::Seva) -> Self {
        Self {
            id: value.id().clone(),
            name: value.name().clone(),
            description: value.description().clone(),
            price: value.price().to_string(),
            is_active: *value.is_active(),
        }
    }
}

impl TryFrom<Seva> for dto::seva::Seva {
    type Error = DatabaseError;

    fn try_from(value: Seva) -> Result<Self, Self::Error> {
        Ok(dto::seva::Seva::new(
            value.id,
            value.name,
            value.description,
            parse_decimal(&value.price)?,
            value.is_active,
        ))
    }
}
