use actix::Addr;
use actix_web::{web, HttpResponse};

use crate::{
    gitlab::Event,
    http::Webhook,
    notifier::{Notification, Notifier},
};

/// GitLab push payloads list every commit, so allow more than the default 256 KiB.
const MAX_PAYLOAD: usize = 4 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{tail:.*}")
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD))
            .route(web::post().to(gitlab_hook))
            .default_service(web::route().to(method_not_allowed)),
    );
}

pub async fn gitlab_hook(
    Webhook(event): Webhook<Event>,
    notifier: web::Data<Addr<Notifier>>,
) -> HttpResponse {
    tracing::debug!(kind = event.kind(), "Received GitLab event");

    let text = event.to_string();
    if let Err(err) = notifier.send(Notification { text }).await {
        tracing::error!("Failed to hand message to notifier: {}", err);
    }

    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}
