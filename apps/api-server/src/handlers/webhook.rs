//! CMS webhook - revalidates cached pages after content changes.

use actix_web::{HttpRequest, HttpResponse, web};

use beacon_core::domain::WebhookEvent;
use beacon_shared::dto::RevalidateResponse;

use crate::middleware::error::{WebhookError, WebhookResult};
use crate::state::AppState;

/// Header carrying the shared webhook secret.
pub const SIGNATURE_HEADER: &str = "x-contentful-webhook-signature";

/// POST /api/revalidate
pub async fn revalidate(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> WebhookResult<HttpResponse> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    // Nothing in the body is read before this check
    if !state.webhook_verification.verify(signature) {
        return Err(WebhookError::InvalidSignature);
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::Internal(format!("invalid webhook body: {}", e)))?;
    let event = WebhookEvent::from_payload(payload)?;

    let report = state.revalidation.dispatch(&event).await;
    if !report.is_complete() {
        let failed: Vec<&str> = report.failed.iter().map(|(path, _)| path.as_str()).collect();
        return Err(WebhookError::Internal(format!(
            "failed to revalidate {:?} (revalidated {:?})",
            failed, report.revalidated
        )));
    }

    Ok(HttpResponse::Ok().json(RevalidateResponse {
        message: "Revalidated successfully".to_string(),
        slug: event.slug().map(str::to_string),
        revalidated: true,
    }))
}
