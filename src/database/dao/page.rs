use super::{Result, into_dtos};
use crate::database::model::page::Page;
use crate::database::schema::page;
use diesel::prelude::*;

pub fn insert_page(connection: &mut SqliteConnection, new_page: &dto::page::Page) -> Result<()> {
    diesel::insert_into(page::table)
        .values(Page::from(new_page))
        .execute(connection)?;

    Ok(())
}

pub fn find_page(
    connection: &mut SqliteConnection,
    page_id: &str,
) -> Result<Option<dto::page::Page>> {
    let result = page::table
        .find(page_id)
        .select(Page::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::page::Page::try_from).transpose()
}

pub fn find_page_by_slug(
    connection: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<dto::page::Page>> {
    let result = page::table
        .filter(page::slug.eq(slug))
        .select(Page::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::page::Page::try_from).transpose()
}

/// List pages, ordered by creation date. Unpublished pages are only listed when requested.
pub fn list_pages(
    connection: &mut SqliteConnection,
    include_unpublished: bool,
    skip: i64,
    limit: i64,
) -> Result<Vec<dto::page::Page>> {
    let mut query = page::table.select(Page::as_select()).into_boxed();
    if !include_unpublished {
        query = query.filter(page::is_published.eq(true));
    }
    let results = query
        .order((page::created_at.asc(), page::id.asc()))
        .offset(skip)
        .limit(limit)
        .load(connection)?;

    into_dtos(results)
}

pub fn update_page(connection: &mut SqliteConnection, updated_page: &dto::page::Page) -> Result<bool> {
    let row = Page::from(updated_page);
    let count = diesel::update(page::table.find(updated_page.id()))
        .set(&row)
        .execute(connection)?;

    Ok(count > 0)
}
