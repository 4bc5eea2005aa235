use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod dashboard;
mod db;
mod docs;
mod model;
mod models;
mod routes;
mod store;
mod utils;

use config::Config;
use db::init_db;

use crate::api::dashboard::{DashboardCache, warmup_dashboard_cache};
use crate::docs::ApiDoc;
use crate::store::mysql::MySqlStore;
use std::time::Duration;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Zap Stop fleet API"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
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

    let pool = init_db(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let store = MySqlStore::new(pool);
    let cache = Data::new(DashboardCache::new(
        config.cache_max_entries,
        Duration::from_secs(config.cache_ttl_secs),
    ));

    if config.warmup_dashboard {
        let store_for_warmup = store.clone();
        let cache_for_warmup = cache.clone();
        let timeout = Duration::from_secs(config.dashboard_timeout_secs);

        actix_web::rt::spawn(async move {
            let today = chrono::Local::now().date_naive();
            if let Err(e) =
                warmup_dashboard_cache(&store_for_warmup, &cache_for_warmup, today, timeout).await
            {
                error!(error = %e, "Failed to warmup dashboard cache");
            }
        });
    }

    let server_addr = config.server_addr.clone();
    let store = Data::new(store);
    let config_data = Data::new(config);

    HttpServer::new(move || {
        let routes_config = config_data.clone();
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .app_data(cache.clone())
            .app_data(config_data.clone())
            .service(index)
            // Dashboard routes behind auth + rate limiting
            .configure(move |cfg| routes::configure(cfg, &routes_config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
