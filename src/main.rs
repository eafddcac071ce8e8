mod database;
mod error;
mod init;
mod member_import;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::init::initialize;
use crate::member_import::config::ImportConfig;
use crate::tools::env_args::is_flag_set;
use crate::web::start_servers;
use log::{error, info};
use std::process::ExitCode;

const INIT_ONLY_FLAG: &str = "--init-only";

#[rocket::main]
async fn main() -> ExitCode {
    env_logger::init();

    let import_config = ImportConfig::from_args();
    let pool = match initialize(&import_config) {
        Ok(pool) => pool,
        Err(e) => {
            error!("Can't initialize the application, aborting...\n{e:#?}");
            return ExitCode::FAILURE;
        }
    };

    if is_flag_set(INIT_ONLY_FLAG) {
        info!("Initialization completed.");
        return ExitCode::SUCCESS;
    }

    match start_servers(pool, import_config).launch().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped unexpectedly.\n{e:#?}");
            ExitCode::FAILURE
        }
    }
}
