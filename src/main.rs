use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    http::StatusCode,
    middleware::{Condition, ErrorHandlers, Logger},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    api::error::render_internal_error,
    configs::{connect_database, run_migrations},
    modules::file::{model::UploadConfig, repository_pg::FilePgRepository, service::FileService},
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

/// Only mounted when FRONTEND_URL is set.
fn cors() -> Condition<Cors> {
    let cors = match ENV.frontend_url.as_deref() {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::default(),
    };
    Condition::new(ENV.frontend_url.is_some(), cors)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool = connect_database().map_err(|e| {
        log::error!("{:?}", e);
        std::io::Error::other("Database configuration error")
    })?;

    if ENV.auto_migrate {
        run_migrations(&db_pool).await.map_err(|e| {
            log::error!("{:?}", e);
            std::io::Error::other("Database migration error")
        })?;
    }

    let file_repo = FilePgRepository::new(db_pool.clone());
    let file_service = FileService::with_dependencies(
        Arc::new(file_repo),
        UploadConfig { max_file_size: ENV.max_upload_bytes },
    );

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error),
            )
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(file_service.clone()))
            .configure(modules::file::route::configure)
            .configure(modules::health::configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await;

    // HttpServer::run only returns once every worker has stopped.
    db_pool.close().await;
    log::info!("Database pool closed");

    server
}
