use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod docs;
mod error;
mod model;
mod relay;
mod routes;
mod sheet;
mod utils;

#[cfg(test)]
mod test_support;

use config::Config;
use relay::whatsapp::WhatsAppRelay;
use routes::RateLimits;
use utils::file_store::Storage;

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance viewer is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Rolling daily log
    let file_appender = rolling::daily(config::log_dir(), "app.log");
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

    let config = Config::from_env()?;
    let storage = Storage::new(&config.upload_dir, &config.media_dir)
        .context("failed to create storage directories")?;
    let relay = WhatsAppRelay::from_config(&config);
    if !relay.is_configured() {
        warn!("WHATSAPP_API_URL or WHATSAPP_TOKEN not set, /notify will answer 503");
    }
    let limits = RateLimits::from_config(&config);

    info!(
        addr = %config.server_addr,
        uploads = %config.upload_dir.display(),
        media = %config.media_dir.display(),
        "Configuration loaded"
    );

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        let config = config.clone();
        let limits = limits.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(storage.clone()))
            .app_data(Data::new(relay.clone()))
            .service(index)
            .configure(move |cfg| routes::configure(cfg, &config, limits))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
