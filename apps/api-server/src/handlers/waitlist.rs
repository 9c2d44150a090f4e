//! Waitlist handlers.

use actix_web::{HttpResponse, web};

use beacon_core::domain::JoinOutcome;
use beacon_shared::ApiResponse;
use beacon_shared::dto::{EmailExportResponse, JoinWaitlistRequest, WaitlistJoinResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::identity::{BearerToken, ClientIdentity};
use crate::middleware::rate_limit::insert_rate_limit_headers;
use crate::state::AppState;

/// POST /api/waitlist
pub async fn join(
    state: web::Data<AppState>,
    identity: ClientIdentity,
    body: web::Json<JoinWaitlistRequest>,
) -> AppResult<HttpResponse> {
    // One decision per request, before anything is written
    let decision = state.waitlist_limiter.check_rate_limit(identity.as_str()).await;
    if !decision.success {
        return Err(AppError::RateLimited(decision));
    }

    let outcome = state.waitlist.join(&body.email).await?;

    let (message, already_joined) = match &outcome {
        JoinOutcome::Joined(_) => ("You're on the waitlist!", false),
        JoinOutcome::AlreadyJoined(_) => ("You're already on the waitlist", true),
    };

    let mut response = HttpResponse::Ok();
    insert_rate_limit_headers(&mut response, &decision);
    Ok(response.json(ApiResponse::ok_with_message(
        WaitlistJoinResponse {
            email: outcome.entry().email.to_string(),
            already_joined,
        },
        message,
    )))
}

/// GET /api/waitlist/emails
pub async fn export_emails(
    state: web::Data<AppState>,
    token: BearerToken,
) -> AppResult<HttpResponse> {
    if !state.export_access.verify(token.as_deref()) {
        return Err(AppError::Unauthorized);
    }

    let emails = state.waitlist.export_emails().await?;
    tracing::info!(count = emails.len(), "Exported waitlist emails");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(EmailExportResponse {
        count: emails.len(),
        emails,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })))
}
