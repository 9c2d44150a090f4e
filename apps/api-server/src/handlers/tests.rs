use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use beacon_core::SecretVerification;
use beacon_core::domain::{RateLimitDecision, WindowSpec};
use beacon_core::ports::{PathRevalidator, RateLimitError, RateLimitStore, RevalidationError};
use beacon_infra::{InMemoryPathRevalidator, InMemoryRateLimitStore, InMemoryWaitlistRepository};

use super::{WEBHOOK_BODY_LIMIT, configure_routes};
use crate::state::AppState;

struct FailingStore;

#[async_trait]
impl RateLimitStore for FailingStore {
    async fn increment_and_check(
        &self,
        _key: &str,
        _window: &WindowSpec,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Err(RateLimitError::Backend("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Fails `/blog` every time, records every call.
#[derive(Default)]
struct BrokenBlogRevalidator {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl PathRevalidator for BrokenBlogRevalidator {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        self.calls.lock().await.push(path.to_string());
        if path == "/blog" {
            return Err(RevalidationError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

struct Harness {
    state: AppState,
    revalidator: Arc<InMemoryPathRevalidator>,
}

fn harness(webhook_secret: Option<&str>, export_token: Option<&str>) -> Harness {
    let revalidator = Arc::new(InMemoryPathRevalidator::new());
    let state = AppState::from_parts(
        Arc::new(InMemoryWaitlistRepository::new()),
        Arc::new(InMemoryRateLimitStore::default()),
        revalidator.clone(),
        SecretVerification::from_config(webhook_secret.map(str::to_string)),
        SecretVerification::from_config(export_token.map(str::to_string)),
    );
    Harness { state, revalidator }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn join_request(ip: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/waitlist")
        .insert_header(("x-forwarded-for", ip))
        .set_json(json!({ "email": email }))
}

fn blog_post_event(slug: &str) -> Value {
    json!({
        "sys": { "contentType": { "sys": { "id": "blogPost" } } },
        "fields": { "slug": { "en-US": slug } }
    })
}

#[actix_web::test]
async fn test_join_waitlist() {
    let h = harness(None, None);
    let app = app!(h.state);

    let resp = test::call_service(&app, join_request("1.2.3.4", "Jane@Example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-RateLimit-Limit").unwrap(), "5");
    assert_eq!(resp.headers().get("X-RateLimit-Remaining").unwrap(), "4");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["alreadyJoined"], false);
    assert_eq!(body["message"], "You're on the waitlist!");
}

#[actix_web::test]
async fn test_join_twice_is_idempotent() {
    let h = harness(None, None);
    let app = app!(h.state);

    test::call_service(&app, join_request("1.2.3.4", "jane@example.com").to_request()).await;
    let resp = test::call_service(&app, join_request("1.2.3.4", "jane@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["alreadyJoined"], true);
    assert_eq!(h.state.waitlist.export_emails().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_sixth_join_is_rate_limited_and_not_written() {
    let h = harness(None, None);
    let app = app!(h.state);

    for i in 0..5 {
        let email = format!("user{}@example.com", i);
        let resp = test::call_service(&app, join_request("1.2.3.4, 10.0.0.1", &email).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(&app, join_request("1.2.3.4", "late@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get("X-RateLimit-Remaining").unwrap(), "0");
    assert!(resp.headers().contains_key("Retry-After"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Too Many Requests");

    let emails = h.state.waitlist.export_emails().await.unwrap();
    assert_eq!(emails.len(), 5);
    assert!(!emails.contains(&"late@example.com".to_string()));

    // Another caller is unaffected
    let resp = test::call_service(&app, join_request("5.6.7.8", "other@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_store_failure_fails_open() {
    let state = AppState::from_parts(
        Arc::new(InMemoryWaitlistRepository::new()),
        Arc::new(FailingStore),
        Arc::new(InMemoryPathRevalidator::new()),
        SecretVerification::Open,
        SecretVerification::Open,
    );
    let app = app!(state);

    for i in 0..7 {
        let email = format!("user{}@example.com", i);
        let resp = test::call_service(&app, join_request("1.2.3.4", &email).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key("X-RateLimit-Limit"));
    }
}

#[actix_web::test]
async fn test_join_non_ascii_email_with_logging_enabled() {
    // Masked emails are only formatted when a subscriber wants the event.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let h = harness(None, None);
    let app = app!(h.state);

    let resp = test::call_service(&app, join_request("1.2.3.4", "Élodie@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "élodie@example.com");
    assert_eq!(body["data"]["alreadyJoined"], false);
}

#[actix_web::test]
async fn test_join_invalid_email() {
    let h = harness(None, None);
    let app = app!(h.state);

    let resp = test::call_service(&app, join_request("1.2.3.4", "not-an-email").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email address");
}

#[actix_web::test]
async fn test_join_malformed_json_gets_envelope() {
    let h = harness(None, None);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/waitlist")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_export_emails_open() {
    let h = harness(None, None);
    let app = app!(h.state);

    test::call_service(&app, join_request("1.2.3.4", "a@example.com").to_request()).await;
    test::call_service(&app, join_request("1.2.3.4", "b@example.com").to_request()).await;

    let req = test::TestRequest::get().uri("/api/waitlist/emails").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["emails"], json!(["a@example.com", "b@example.com"]));
    assert_eq!(body["data"]["count"], 2);
    assert!(body["data"]["timestamp"].is_string());
}

#[actix_web::test]
async fn test_export_emails_requires_configured_token() {
    let h = harness(None, Some("export-token"));
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/waitlist/emails").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/waitlist/emails")
        .insert_header(("authorization", "Bearer wrong"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/waitlist/emails")
        .insert_header(("authorization", "Bearer export-token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_webhook_rejects_bad_signature() {
    let h = harness(Some("s3cret"), None);
    let app = app!(h.state);

    for signature in [Some("wrong"), None] {
        let mut req = test::TestRequest::post()
            .uri("/api/revalidate")
            .set_json(blog_post_event("my-post"));
        if let Some(signature) = signature {
            req = req.insert_header(("x-contentful-webhook-signature", signature));
        }

        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid signature" }));
    }

    assert!(h.revalidator.revalidated().await.is_empty());
}

#[actix_web::test]
async fn test_webhook_revalidates_blog_post() {
    let h = harness(Some("s3cret"), None);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/revalidate")
        .insert_header(("x-contentful-webhook-signature", "s3cret"))
        .set_json(blog_post_event("my-post"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "message": "Revalidated successfully", "slug": "my-post", "revalidated": true })
    );
    assert_eq!(
        h.revalidator.revalidated().await,
        ["/blog", "/blog/my-post", "/sitemap.xml"]
    );
}

#[actix_web::test]
async fn test_webhook_open_mode_other_content() {
    let h = harness(None, None);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/revalidate")
        .set_json(json!({ "sys": { "contentType": { "sys": { "id": "page" } } } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("slug").is_none());
    assert_eq!(h.revalidator.revalidated().await, ["/", "/blog"]);
}

#[actix_web::test]
async fn test_webhook_malformed_body() {
    let h = harness(None, None);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/revalidate")
        .insert_header(("content-type", "application/json"))
        .set_payload("not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Error revalidating" }));
}

#[actix_web::test]
async fn test_webhook_oversized_body_gets_error_body() {
    let h = harness(None, None);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/revalidate")
        .insert_header(("content-type", "application/json"))
        .set_payload(vec![b' '; WEBHOOK_BODY_LIMIT + 1024])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Payload too large" }));
    assert!(h.revalidator.revalidated().await.is_empty());
}

#[actix_web::test]
async fn test_webhook_partial_failure_attempts_every_path() {
    let revalidator = Arc::new(BrokenBlogRevalidator::default());
    let state = AppState::from_parts(
        Arc::new(InMemoryWaitlistRepository::new()),
        Arc::new(InMemoryRateLimitStore::default()),
        revalidator.clone(),
        SecretVerification::Open,
        SecretVerification::Open,
    );
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/revalidate")
        .set_json(blog_post_event("my-post"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let calls = revalidator.calls.lock().await.clone();
    assert!(calls.contains(&"/blog/my-post".to_string()));
    assert!(calls.contains(&"/sitemap.xml".to_string()));
    // Retried once with the default of 2 attempts
    assert_eq!(calls.iter().filter(|p| *p == "/blog").count(), 2);
}

#[actix_web::test]
async fn test_health_check() {
    let h = harness(None, None);
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rateLimitBackend"], "memory");
}
