use crate::database::dao;
use crate::web::api::{Result, conflict_as_bad_request, pagination};
use crate::web::authentication::{Administrator, AuthenticatedUser};
use crate::web::error::WebError;
use chrono::Utc;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::page::{Page, PageCreate, PageUpdate};
use log::info;
use rocket::State;
use rocket::serde::json::Json;
use uuid::Uuid;

const SLUG_ALREADY_USED: &str = "A page with this slug already exists.";
const PAGE_NOT_FOUND: &str = "Page not found";

#[get("/pages?<skip>&<limit>")]
pub async fn list_pages(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Page>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    Ok(Json(dao::page::list_pages(&mut connection, false, skip, limit)?))
}

#[post("/pages", format = "application/json", data = "<page_create>")]
pub async fn create_page(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    admin: Administrator,
    page_create: Json<PageCreate>,
) -> Result<Json<Page>> {
    let page_create = page_create.into_inner();
    page_create.validate()?;

    let mut connection = pool.get()?;
    if dao::page::find_page_by_slug(&mut connection, page_create.slug())?.is_some() {
        return Err(WebError::bad_request(SLUG_ALREADY_USED));
    }

    let page = Page::from_request(
        Uuid::new_v4().to_string(),
        page_create,
        admin.user_id().to_owned(),
        Utc::now().naive_utc(),
    );
    dao::page::insert_page(&mut connection, &page).map_err(conflict_as_bad_request(SLUG_ALREADY_USED))?;
    info!("Page {} created [slug: {}]", page.id(), page.slug());

    Ok(Json(page))
}

/// Every page, including those not published yet.
#[get("/pages/all?<skip>&<limit>")]
pub async fn list_all_pages(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Page>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    Ok(Json(dao::page::list_pages(&mut connection, true, skip, limit)?))
}

/// Unpublished pages are hidden from everyone but administrators.
#[get("/pages/<slug>")]
pub async fn read_page(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    caller: Option<AuthenticatedUser>,
    slug: &str,
) -> Result<Json<Page>> {
    let mut connection = pool.get()?;
    let can_see_drafts = caller.is_some_and(|caller| caller.is_admin());

    dao::page::find_page_by_slug(&mut connection, slug)?
        .filter(|page| *page.is_published() || can_see_drafts)
        .map(Json)
        .ok_or_else(|| WebError::not_found(PAGE_NOT_FOUND))
}

#[put("/pages/<page_id>", format = "application/json", data = "<page_update>")]
pub async fn update_page(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    page_id: &str,
    page_update: Json<PageUpdate>,
) -> Result<Json<Page>> {
    let page_update = page_update.into_inner();
    page_update.validate()?;
    let mut connection = pool.get()?;

    let page = dao::page::find_page(&mut connection, page_id)?
        .ok_or_else(|| WebError::not_found(PAGE_NOT_FOUND))?;
    if let Some(slug) = page_update.slug() {
        if let Some(other) = dao::page::find_page_by_slug(&mut connection, slug)? {
            if other.id() != page.id() {
                return Err(WebError::bad_request(SLUG_ALREADY_USED));
            }
        }
    }

    let page = page.updated_with(page_update, Utc::now().naive_utc());
    dao::page::update_page(&mut connection, &page).map_err(conflict_as_bad_request(SLUG_ALREADY_USED))?;

    Ok(Json(page))
}
