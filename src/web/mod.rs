use crate::member_import::config::ImportConfig;
use crate::web::server::build_server;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use rocket::{Build, Rocket};

mod api;
mod authentication;
mod error;
mod server;
mod status;
mod token_storage;

pub fn start_servers(
    pool: Pool<ConnectionManager<SqliteConnection>>,
    import_config: ImportConfig,
) -> Rocket<Build> {
    build_server(pool, import_config)
}
