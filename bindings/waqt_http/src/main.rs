use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use waqt_core::PrayerService;
use waqt_http::{configure, init_tracing, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("invalid WAQT_* configuration")?;
    let service = web::Data::new(PrayerService::new(&config.service));

    info!(host = %config.host, port = config.port, version = env!("CARGO_PKG_VERSION"), "starting waqt-http");

    HttpServer::new(move || App::new().app_data(service.clone()).configure(configure))
        .bind(config.bind_addr())
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
        .run()
        .await
        .context("server terminated")?;

    Ok(())
}
