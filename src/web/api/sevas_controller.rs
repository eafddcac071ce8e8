use crate::database::dao;
use crate::web::api::{Result, conflict_as_bad_request, pagination};
use crate::web::authentication::Administrator;
use crate::web::error::WebError;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::seva::{Seva, SevaCreate, SevaUpdate};
use log::info;
use rocket::State;
use rocket::serde::json::Json;
use uuid::Uuid;

const NAME_ALREADY_USED: &str = "A seva with this name already exists.";
const SEVA_NOT_FOUND: &str = "Seva not found";

/// Sevas that can currently be booked. Open to anonymous visitors.
#[get("/sevas?<skip>&<limit>")]
pub async fn list_sevas(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    skip: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Seva>>> {
    let (skip, limit) = pagination(skip, limit);
    let mut connection = pool.get()?;

    Ok(Json(dao::seva::list_active_sevas(&mut connection, skip, limit)?))
}

#[post("/sevas", format = "application/json", data = "<seva_create>")]
pub async fn create_seva(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    seva_create: Json<SevaCreate>,
) -> Result<Json<Seva>> {
    let seva_create = seva_create.into_inner();
    seva_create.validate()?;

    let mut connection = pool.get()?;
    if dao::seva::find_seva_by_name(&mut connection, seva_create.name())?.is_some() {
        return Err(WebError::bad_request(NAME_ALREADY_USED));
    }

    let seva = Seva::from_request(Uuid::new_v4().to_string(), seva_create);
    dao::seva::insert_seva(&mut connection, &seva).map_err(conflict_as_bad_request(NAME_ALREADY_USED))?;
    info!("Seva {} created [name: {}]", seva.id(), seva.name());

    Ok(Json(seva))
}

#[get("/sevas/<seva_id>")]
pub async fn read_seva(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    seva_id: &str,
) -> Result<Json<Seva>> {
    let mut connection = pool.get()?;

    dao::seva::find_seva(&mut connection, seva_id)?
        .map(Json)
        .ok_or_else(|| WebError::not_found(SEVA_NOT_FOUND))
}

#[put("/sevas/<seva_id>", format = "application/json", data = "<seva_update>")]
pub async fn update_seva(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    _admin: Administrator,
    seva_id: &str,
    seva_update: Json<SevaUpdate>,
) -> Result<Json<Seva>> {
    let seva_update = seva_update.into_inner();
    seva_update.validate()?;
    let mut connection = pool.get()?;

    let seva = dao::seva::find_seva(&mut connection, seva_id)?
        .ok_or_else(|| WebError::not_found(SEVA_NOT_FOUND))?
        .updated_with(seva_update);
    dao::seva::update_seva(&mut connection, &seva).map_err(conflict_as_bad_request(NAME_ALREADY_USED))?;

    Ok(Json(seva))
}
