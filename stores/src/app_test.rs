use std::future::poll_fn;
use std::pin::pin;
use std::task::Poll;

use time::macros::datetime;

use super::*;
use crate::remote::RemoteError;
use crate::test_helpers::{MockSource, active_status, consumer_session, lapsed_trial_status, provider_session};

type MockStores = AppStores<MockSource<UserSession>, MockSource<ProviderStatus>>;

fn stores(
    sessions: Vec<Result<Option<UserSession>, RemoteError>>,
    statuses: Vec<Result<Option<ProviderStatus>, RemoteError>>,
) -> MockStores {
    AppStores::new(MockSource::new(sessions), MockSource::new(statuses))
}

fn credential() -> Credential {
    Credential::Ambient
}

const NOW: OffsetDateTime = datetime!(2026-10-19 12:00 UTC);

// =============================================================================
// bootstrap
// =============================================================================

#[tokio::test]
async fn bootstrap_consumer_never_requests_provider_status() {
    let app = stores(vec![Ok(Some(consumer_session()))], vec![Ok(Some(active_status()))]);
    app.bootstrap(&credential()).await;

    assert_eq!(app.session.value(), Some(consumer_session()));
    assert_eq!(app.provider_status.source().calls(), 0);
    assert!(!app.provider_status.state().resolved);
}

#[tokio::test]
async fn bootstrap_provider_resolves_both_stores() {
    let app = stores(vec![Ok(Some(provider_session()))], vec![Ok(Some(active_status()))]);
    app.bootstrap(&credential()).await;

    assert!(app.session_has_role(Role::Provider));
    assert_eq!(app.provider_status.value(), Some(active_status()));
}

#[tokio::test]
async fn concurrent_bootstraps_issue_one_call_per_store() {
    let app = stores(vec![Ok(Some(provider_session()))], vec![Ok(Some(active_status()))]);
    let cred = credential();

    tokio::join!(app.bootstrap(&cred), app.bootstrap(&cred), app.bootstrap(&cred));

    assert_eq!(app.session.source().calls(), 1);
    assert_eq!(app.provider_status.source().calls(), 1);
}

#[tokio::test]
async fn bootstrap_fires_once_even_after_failure() {
    let app = stores(
        vec![Err(RemoteError::Request("offline".into())), Ok(Some(consumer_session()))],
        vec![],
    );
    app.bootstrap(&credential()).await;
    app.bootstrap(&credential()).await;

    assert_eq!(app.session.source().calls(), 1);
    assert!(app.session.value().is_none());
}

// =============================================================================
// refresh + logout
// =============================================================================

#[tokio::test]
async fn refresh_retries_after_failed_bootstrap() {
    let app = stores(
        vec![Ok(None), Ok(Some(provider_session()))],
        vec![Ok(Some(active_status()))],
    );
    app.bootstrap(&credential()).await;
    assert!(app.session.value().is_none());

    app.refresh(&credential()).await;

    assert_eq!(app.session.source().calls(), 2);
    assert_eq!(app.provider_status.value(), Some(active_status()));
}

#[tokio::test]
async fn refresh_with_resolved_stores_is_noop() {
    let app = stores(vec![Ok(Some(provider_session()))], vec![Ok(Some(active_status()))]);
    app.bootstrap(&credential()).await;
    app.refresh(&credential()).await;

    assert_eq!(app.session.source().calls(), 1);
    assert_eq!(app.provider_status.source().calls(), 1);
}

#[tokio::test]
async fn reload_replaces_resolved_consumer_with_provider() {
    let app = stores(
        vec![Ok(Some(consumer_session())), Ok(Some(provider_session()))],
        vec![Ok(Some(active_status()))],
    );
    let guard = RouteGuard::new(Role::Provider);
    app.bootstrap(&credential()).await;
    assert_eq!(app.route_gate(guard), Gate::Unauthorized { redirect: "/provider/login" });

    app.reload(&credential()).await;

    assert_eq!(app.session.source().calls(), 2);
    assert_eq!(app.route_gate(guard), Gate::Authorized);
    assert_eq!(app.provider_status.value(), Some(active_status()));
}

#[tokio::test]
async fn reload_drops_previous_provider_status() {
    let app = stores(
        vec![Ok(Some(provider_session())), Ok(Some(provider_session()))],
        vec![Ok(Some(lapsed_trial_status())), Ok(Some(active_status()))],
    );
    app.bootstrap(&credential()).await;
    assert_eq!(app.plan_gate(NOW).redirect(), Some(crate::guard::PLANS_PATH));

    app.reload(&credential()).await;

    assert_eq!(app.provider_status.source().calls(), 2);
    assert_eq!(app.plan_gate(NOW), Gate::Authorized);
}

#[tokio::test]
async fn reload_discards_bootstrap_fetch_still_in_flight() {
    // Mock replies are handed out in completion order, and the reload settles first.
    let app = stores(
        vec![Ok(Some(provider_session())), Ok(None)],
        vec![Ok(Some(active_status()))],
    );
    let cred = credential();

    let mut boot = pin!(app.bootstrap(&cred));
    poll_fn(|cx| {
        assert!(boot.as_mut().poll(cx).is_pending());
        Poll::Ready(())
    })
    .await;
    assert!(app.session.is_loading());

    app.reload(&cred).await;
    boot.await;

    assert_eq!(app.session.source().calls(), 2);
    assert_eq!(app.session.value(), Some(provider_session()));
    assert_eq!(app.route_gate(RouteGuard::new(Role::Provider)), Gate::Authorized);
    assert_eq!(app.provider_status.source().calls(), 1);
    assert_eq!(app.provider_status.value(), Some(active_status()));
}

#[tokio::test]
async fn logout_clears_both_stores_without_network() {
    let app = stores(vec![Ok(Some(provider_session()))], vec![Ok(Some(active_status()))]);
    app.bootstrap(&credential()).await;

    app.logout();

    assert!(app.session.value().is_none());
    assert!(app.provider_status.value().is_none());
    assert!(!app.session.is_loading());
    assert!(!app.provider_status.is_loading());
    assert_eq!(app.session.source().calls(), 1);
    assert_eq!(app.provider_status.source().calls(), 1);
}

// =============================================================================
// gates
// =============================================================================

#[tokio::test]
async fn route_gate_follows_session_lifecycle() {
    let app = stores(vec![Ok(Some(consumer_session()))], vec![]);
    let guard = RouteGuard::new(Role::Consumer);
    assert_eq!(app.route_gate(guard), Gate::Initializing);

    app.bootstrap(&credential()).await;
    assert_eq!(app.route_gate(guard), Gate::Authorized);

    app.logout();
    assert_eq!(app.route_gate(guard), Gate::Unauthorized { redirect: "/login" });
}

#[tokio::test]
async fn plan_gate_checks_role_before_plan() {
    let app = stores(vec![Ok(Some(consumer_session()))], vec![]);
    app.bootstrap(&credential()).await;
    assert_eq!(app.plan_gate(NOW), Gate::Unauthorized { redirect: "/provider/login" });
}

#[tokio::test]
async fn plan_gate_redirects_lapsed_trial() {
    let app = stores(vec![Ok(Some(provider_session()))], vec![Ok(Some(lapsed_trial_status()))]);
    app.bootstrap(&credential()).await;
    assert_eq!(app.plan_gate(NOW).redirect(), Some(crate::guard::PLANS_PATH));
}
