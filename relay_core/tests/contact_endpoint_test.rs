use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use relay_core::{
    config::StaticFilesConfig, create_app, create_app_with_config, AppConfig, AppState,
    MemoryMailer, RelaySettings,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const OWNER: &str = "owner@example.com";

fn settings() -> RelaySettings {
    RelaySettings {
        sender: "site@example.com".to_string(),
        owner_address: OWNER.to_string(),
        team_name: "ASZOTHIAM".to_string(),
        response_days: 3,
        send_timeout: Duration::from_secs(5),
    }
}

fn app_with(mailer: &MemoryMailer) -> Router {
    create_app(AppState::new(Arc::new(mailer.clone()), settings()))
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "email": "alice@example.com",
        "subject": "Projet mobile",
        "message": "Bonjour, je voudrais discuter d'un projet mobile pour mon entreprise."
    })
}

fn contact_request(method: Method, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_submission_sends_two_emails() {
    let mailer = MemoryMailer::new();
    let app = app_with(&mailer);

    let response = app.oneshot(contact_request(Method::POST, &alice())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Emails envoyés avec succès");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, OWNER);
    assert_eq!(sent[0].subject, "Nouveau message de Alice: Projet mobile");
    assert!(sent[0].html.contains("alice@example.com"));
    assert_eq!(sent[1].to, "alice@example.com");
    assert_eq!(sent[1].subject, "Confirmation de votre message");
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let mailer = MemoryMailer::new();
        let app = app_with(&mailer);

        let response = app
            .oneshot(contact_request(method.clone(), &alice()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Méthode non autorisée");
        assert_eq!(mailer.attempts(), 0);
    }
}

#[tokio::test]
async fn test_first_send_failure_stops_relay() {
    let mailer = MemoryMailer::failing_on(1);
    let app = app_with(&mailer);

    let response = app.oneshot(contact_request(Method::POST, &alice())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Erreur lors de l'envoi");
    assert_eq!(mailer.attempts(), 1);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_confirmation_failure_reports_generic_failure() {
    let mailer = MemoryMailer::failing_on(2);
    let app = app_with(&mailer);

    let response = app.oneshot(contact_request(Method::POST, &alice())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["success"], false);
    assert_eq!(mailer.sent_count(), 1);
    assert_eq!(mailer.sent()[0].to, OWNER);
}

#[tokio::test]
async fn test_slow_transport_times_out() {
    let mailer = MemoryMailer::new().with_delay(Duration::from_millis(300));
    let mut settings = settings();
    settings.send_timeout = Duration::from_millis(30);
    let app = create_app(AppState::new(Arc::new(mailer.clone()), settings));

    let response = app.oneshot(contact_request(Method::POST, &alice())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["success"], false);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_invalid_fields_send_nothing() {
    let mailer = MemoryMailer::new();
    let app = app_with(&mailer);

    let mut body = alice();
    body["message"] = json!("x".repeat(19));
    body["email"] = json!("alice");

    let response = app.oneshot(contact_request(Method::POST, &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["email"][0], "Adresse email invalide");
    assert_eq!(
        body["errors"]["message"][0],
        "Le message doit contenir au moins 20 caractères"
    );
    assert!(body["errors"].get("name").is_none());
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_undeliverable_email_rejected_before_any_send() {
    for email in ["a..b@example.com", "alice.@example.com", "alice@-example.com"] {
        let mailer = MemoryMailer::new();
        let app = app_with(&mailer);

        let mut body = alice();
        body["email"] = json!(email);

        let response = app.oneshot(contact_request(Method::POST, &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", email);
        assert_eq!(
            read_json(response).await["errors"]["email"][0],
            "Adresse email invalide"
        );
        assert_eq!(mailer.attempts(), 0);
    }
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let mailer = MemoryMailer::new();
    let app = app_with(&mailer);

    let body = json!({ "name": "Alice", "email": "alice@example.com" });
    let response = app.oneshot(contact_request(Method::POST, &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["success"], false);
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_health_reports_transport() {
    let mailer = MemoryMailer::new();
    let app = app_with(&mailer);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["transport"], "memory");
}

#[tokio::test]
async fn test_unknown_routes_serve_spa_entry() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::write(dist.path().join("app.js"), "console.log('app')").unwrap();

    let mut config = AppConfig::default();
    config.static_files = StaticFilesConfig {
        enabled: true,
        dir: dist.path().to_path_buf(),
        index: "index.html".to_string(),
    };

    let mailer = MemoryMailer::new();
    let app = create_app_with_config(
        AppState::new(Arc::new(mailer.clone()), settings()),
        &config,
    );

    for (path, expected) in [
        ("/portfolio", "<div id=\"root\"></div>"),
        ("/app.js", "console.log('app')"),
    ] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&bytes), expected);
    }
}
