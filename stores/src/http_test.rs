use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};

use super::*;
use crate::types::Role;

const SESSION_JSON: &str = r#"{"id":7,"name":"Ana","email":"ana@x.com","role":"provider","planStatus":"trial"}"#;

/// Serve `router` on an ephemeral port and point a backend client at it.
async fn backend_for(router: Router) -> HttpBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    HttpBackend::new(&format!("http://{addr}"), Timeouts::default()).unwrap()
}

/// Every endpoint answers with the same status and body.
fn answering(status: StatusCode, body: &'static str) -> Router {
    Router::new()
        .route("/auth/me", get(move || async move { (status, body) }))
        .route("/provider/status", get(move || async move { (status, body) }))
        .route(
            "/auth/login",
            post(move || async move { (status, [(SET_COOKIE, "session_token=fresh; Path=/")], body) }),
        )
        .route("/auth/logout", post(move || async move { status }))
}

fn token() -> Credential {
    Credential::session_token("abc")
}

fn login_request() -> LoginRequest {
    LoginRequest { email: "ana@x.com".into(), password: "pw".into(), role: Role::Provider }
}

#[test]
fn join_url_normalizes_slashes() {
    assert_eq!(join_url("https://api.test/v1/", "/auth/me"), "https://api.test/v1/auth/me");
    assert_eq!(join_url("https://api.test/v1", "auth/me"), "https://api.test/v1/auth/me");
}

#[test]
fn backend_trims_trailing_slash_from_base() {
    let backend = HttpBackend::new("http://127.0.0.1:3000/api/", Timeouts::default()).unwrap();
    assert_eq!(backend.base_url(), "http://127.0.0.1:3000/api");
    assert_eq!(backend.endpoint(PROVIDER_STATUS_PATH), "http://127.0.0.1:3000/api/provider/status");
}

#[test]
fn default_timeouts() {
    assert_eq!(
        Timeouts::default(),
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[tokio::test]
async fn missing_cookie_resolves_absent_without_network() {
    // Port 9 (discard) is never contacted: the blank credential short-circuits.
    let backend = HttpBackend::new("http://127.0.0.1:9", Timeouts::default()).unwrap();
    let credential = Credential::Cookie(String::new());
    assert_eq!(backend.current_session(&credential).await.unwrap(), None);
    assert_eq!(backend.provider_status(&credential).await.unwrap(), None);
    assert!(backend.logout(&credential).await.is_ok());
}

// =============================================================================
// status mapping against a live backend
// =============================================================================

#[tokio::test]
async fn signed_out_statuses_resolve_absent() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND] {
        let backend = backend_for(answering(status, "")).await;
        assert_eq!(backend.current_session(&token()).await.unwrap(), None, "{status}");
        assert_eq!(backend.provider_status(&token()).await.unwrap(), None, "{status}");
        assert_eq!(backend.login(&login_request()).await.unwrap(), None, "{status}");
        assert!(backend.logout(&token()).await.is_ok(), "{status}");
    }
}

#[tokio::test]
async fn server_errors_surface_status() {
    for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::SERVICE_UNAVAILABLE] {
        let backend = backend_for(answering(status, SESSION_JSON)).await;
        let code = status.as_u16();
        let is_status = |err: RemoteError| matches!(err, RemoteError::Status { status } if status == code);
        assert!(is_status(backend.current_session(&token()).await.unwrap_err()));
        assert!(is_status(backend.provider_status(&token()).await.unwrap_err()));
        assert!(is_status(backend.login(&login_request()).await.unwrap_err()));
        assert!(is_status(backend.logout(&token()).await.unwrap_err()));
    }
}

#[tokio::test]
async fn unreadable_body_is_parse_error() {
    let backend = backend_for(answering(StatusCode::OK, "<html>maintenance</html>")).await;
    assert!(matches!(backend.current_session(&token()).await, Err(RemoteError::Parse(_))));
    assert!(matches!(backend.provider_status(&token()).await, Err(RemoteError::Parse(_))));
    assert!(matches!(backend.login(&login_request()).await, Err(RemoteError::Parse(_))));
}

#[tokio::test]
async fn empty_success_body_resolves_absent() {
    let backend = backend_for(answering(StatusCode::OK, "null")).await;
    assert_eq!(backend.current_session(&token()).await.unwrap(), None);
}

#[tokio::test]
async fn session_cookie_is_forwarded() {
    let router = Router::new().route(
        "/auth/me",
        get(|headers: HeaderMap| async move {
            match headers.get(COOKIE).and_then(|value| value.to_str().ok()) {
                Some("session_token=abc") => (StatusCode::OK, SESSION_JSON),
                _ => (StatusCode::UNAUTHORIZED, ""),
            }
        }),
    );
    let backend = backend_for(router).await;

    let session = backend.current_session(&token()).await.unwrap().unwrap();
    assert_eq!(session.id, 7);
    assert_eq!(session.role, Role::Provider);
    assert_eq!(backend.current_session(&Credential::session_token("other")).await.unwrap(), None);
}

#[tokio::test]
async fn login_captures_set_cookie() {
    let backend = backend_for(answering(StatusCode::OK, SESSION_JSON)).await;
    let reply = backend.login(&login_request()).await.unwrap().unwrap();
    assert_eq!(reply.session.email, "ana@x.com");
    assert_eq!(reply.set_cookies, vec!["session_token=fresh; Path=/".to_owned()]);
}
