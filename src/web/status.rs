use crate::web::error::NOT_AUTHENTICATED;
use crate::web::server::Server;
use log::debug;
use rocket::http::Status;
use rocket::serde::json::{Json, Value, json};
use rocket::{Build, Request, Rocket};

const APPLICATION_NAME: &str = "GSB Mandal API";

/// Public routes telling whether the application is up,
/// along with the JSON error bodies sent when no route answers a request.
pub struct StatusServer {}

impl StatusServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for StatusServer {
    fn initialize_managed_states(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
    }

    fn mount_routes(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build.mount("/", routes![welcome, health]).register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                forbidden,
                not_found,
                unprocessable_entity,
                default_catcher
            ],
        )
    }
}

#[get("/")]
pub fn welcome() -> Json<Value> {
    Json(json!({ "message": format!("Welcome to {APPLICATION_NAME}!") }))
}

#[get("/health")]
pub fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn detail(detail: &str) -> Json<Value> {
    Json(json!({ "detail": detail }))
}

#[catch(400)]
fn bad_request() -> Json<Value> {
    detail("Bad request")
}

#[catch(401)]
fn unauthorized() -> Json<Value> {
    detail(NOT_AUTHENTICATED)
}

#[catch(403)]
fn forbidden() -> Json<Value> {
    detail("Not enough permissions")
}

#[catch(404)]
fn not_found(request: &Request) -> Json<Value> {
    debug!("No route for {} {}", request.method(), request.uri());
    detail("Not found")
}

#[catch(422)]
fn unprocessable_entity() -> Json<Value> {
    detail("Request body can't be read")
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request) -> Json<Value> {
    detail(status.reason_lossy())
}
