//! HTTP handlers and route configuration.

mod health;
mod waitlist;
mod webhook;

#[cfg(test)]
mod tests;

use actix_web::dev::ServiceResponse;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, http::StatusCode, web};

use beacon_shared::dto::WebhookErrorResponse;

use crate::middleware::error::AppError;

/// Largest accepted CMS webhook body.
pub const WEBHOOK_BODY_LIMIT: usize = 256 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().limit(16 * 1024).error_handler(json_error))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/waitlist")
                    .route("", web::post().to(waitlist::join))
                    .route("/emails", web::get().to(waitlist::export_emails)),
            )
            .service(
                web::resource("/revalidate")
                    .app_data(web::PayloadConfig::new(WEBHOOK_BODY_LIMIT))
                    .route(web::post().to(webhook::revalidate))
                    .wrap(
                        ErrorHandlers::new()
                            .handler(StatusCode::PAYLOAD_TOO_LARGE, webhook_body_too_large),
                    ),
            ),
    );
}

/// Malformed JSON bodies get the same envelope as every other error.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// The body extractor rejects oversized webhooks before the handler runs.
/// Replace its plain-text 413 with the webhook's `{ "error": ... }` body.
fn webhook_body_too_large<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    tracing::warn!(limit = WEBHOOK_BODY_LIMIT, "Rejected oversized CMS webhook body");
    let (req, _) = res.into_parts();
    let response = HttpResponse::PayloadTooLarge().json(WebhookErrorResponse::new("Payload too large"));
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
