mod config;
mod gitlab;
mod hooks;
mod http;
mod message;
mod notifier;

use actix::Actor;
use actix_web::{middleware::Logger, App, HttpServer};
use color_eyre::eyre::{self, WrapErr as _};

#[actix_web::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install()?;
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().finish())?;

    let config = config::Config::from_env().wrap_err("Failed to read configuration")?;
    config.validate()?;
    let config::Config {
        telegram_token,
        telegram_chat_id,
        telegram_api_url,
        gitlab_url,
        listen_addr,
    } = config;

    let notifier = notifier::Notifier::new(notifier::Config {
        telegram_api_url,
        telegram_token,
        telegram_chat_id,
    })
    .start();

    let server = HttpServer::new(move || {
        App::new()
            .data(notifier.clone())
            .wrap(Logger::default())
            .configure(hooks::configure)
    })
    .bind(&listen_addr)
    .wrap_err_with(|| format!("Failed to bind {}", listen_addr))?;

    tracing::info!(gitlab = gitlab_url.as_str(), "Listening at {}", listen_addr);
    server.run().await.map_err(Into::into)
}
