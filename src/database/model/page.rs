use crate::database::error::DatabaseError;
use crate::database::model::{format_datetime, parse_datetime};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::database::schema::page)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Page {
    id: String,
    title: String,
    slug: String,
    content: String,
    created_by: String,
    is_published: bool,
    created_at: String,
    updated_at: String,
}

impl From<&dto::page::Page> for Page {
    fn from(value: &dto::page::Page) -> Self {
        Self {
            id: value.id().clone(),
            title: value.title().clone(),
            slug: value.slug().clone(),
            content: value.content().clone(),
            created_by: value.created_by().clone(),
            is_published: *value.is_published(),
            created_at: format_datetime(value.created_at()),
            updated_at: format_datetime(value.updated_at()),
        }
    }
}

impl TryFrom<Page> for dto::page::Page {
    type Error = DatabaseError;

    fn try_from(value: Page) -> Result<Self, Self::Error> {
        Ok(dto::page::Page::new(
            value.id,
            value.title,
            value.slug,
            value.content,
            value.created_by,
            value.is_published,
            parse_datetime(&value.created_at)?,
            parse_datetime(&value.updated_at)?,
        ))
    }
}
