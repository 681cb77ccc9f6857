use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod repository;
mod routes;
mod service;
#[cfg(test)]
mod testing;
mod utils;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::repository::{MySqlAttendanceRepository, MySqlParamRepository};
use crate::routes::RateLimits;
use crate::service::{AttendanceService, Clock, LocalClock, ParamService};
use crate::utils::param_cache::ParamCache;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config).await.context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("Migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(
        LocalClock::from_offset_minutes(config.utc_offset_minutes)
            .context("LOCAL_UTC_OFFSET_MINUTES is out of range")?,
    );

    let params = Arc::new(ParamService::new(
        Arc::new(MySqlParamRepository::new(pool.clone())),
        ParamCache::new(),
        clock.clone(),
    ));
    let attendance = Arc::new(AttendanceService::new(
        Arc::new(MySqlAttendanceRepository::new(pool.clone())),
        params.clone(),
        clock,
    ));

    let params_data = Data::from(params);
    let attendance_data = Data::from(attendance);
    let limits = RateLimits::from_config(&config)?;
    let server_addr = config.server_addr.clone();

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(routes::json_config())
            .app_data(params_data.clone())
            .app_data(attendance_data.clone())
            .configure(|cfg| routes::configure(cfg, &config, &limits))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
