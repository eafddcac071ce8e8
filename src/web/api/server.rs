use crate::member_import::config::ImportConfig;
use crate::web::api::{
    admin_controller, auth_controller, bookings_controller, memberships_controller,
    pages_controller, sevas_controller, users_controller,
};
use crate::web::server::Server;
use crate::web::token_storage::TokenStorage;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use rocket::{Build, Rocket};
use std::sync::Mutex;

pub const API_PREFIX: &str = "/api/v1";

pub struct ApiServer {
    pool: Pool<ConnectionManager<SqliteConnection>>,
    import_config: ImportConfig,
}

impl ApiServer {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>, import_config: ImportConfig) -> Self {
        Self { pool, import_config }
    }
}

impl Server for ApiServer {
    fn initialize_managed_states(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .manage(self.pool.clone())
            .manage(self.import_config.clone())
            .manage(Mutex::new(TokenStorage::default()))
    }

    fn mount_routes(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build.mount(
            API_PREFIX,
            routes![
                auth_controller::login,
                auth_controller::logout,
                users_controller::list_users,
                users_controller::create_user,
                users_controller::read_user,
                users_controller::update_user,
                memberships_controller::list_memberships,
                memberships_controller::create_membership,
                memberships_controller::read_membership,
                memberships_controller::update_membership,
                memberships_controller::read_user_membership,
                sevas_controller::list_sevas,
                sevas_controller::create_seva,
                sevas_controller::read_seva,
                sevas_controller::update_seva,
                bookings_controller::list_bookings,
                bookings_controller::create_booking,
                bookings_controller::read_booking,
                pages_controller::list_pages,
                pages_controller::create_page,
                pages_controller::list_all_pages,
                pages_controller::read_page,
                pages_controller::update_page,
                admin_controller::import_data,
            ],
        )
    }
}
