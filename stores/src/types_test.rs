use super::*;
use time::macros::datetime;

// =============================================================================
// UserSession
// =============================================================================

#[test]
fn user_session_parses_backend_payload() {
    let json = r#"{"id":7,"name":"Ana","email":"ana@example.com","role":"provider","planStatus":"trial"}"#;
    let session: UserSession = serde_json::from_str(json).unwrap();
    assert_eq!(session.id, 7);
    assert_eq!(session.role, Role::Provider);
    assert_eq!(session.plan_status, Some(PlanStatus::Trial));
}

#[test]
fn user_session_email_and_plan_are_optional() {
    let session: UserSession = serde_json::from_str(r#"{"id":1,"name":"A","role":"consumer"}"#).unwrap();
    assert_eq!(session.email, "");
    assert_eq!(session.plan_status, None);
    assert!(session.has_role(Role::Consumer));
    assert!(!session.has_role(Role::Provider));
}

#[test]
fn user_session_rejects_unknown_role() {
    let result = serde_json::from_str::<UserSession>(r#"{"id":1,"name":"A","role":"admin"}"#);
    assert!(result.is_err());
}

#[test]
fn user_session_serializes_camel_case_without_empty_plan() {
    let session = UserSession {
        id: 3,
        name: "Bo".into(),
        email: "bo@example.com".into(),
        role: Role::Consumer,
        plan_status: None,
    };
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["role"], "consumer");
    assert!(value.get("planStatus").is_none());
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_login_paths_differ_per_role() {
    assert_eq!(Role::Provider.login_path(), "/provider/login");
    assert_eq!(Role::Consumer.login_path(), "/login");
}

#[test]
fn role_from_str_is_case_insensitive() {
    assert_eq!("Provider".parse::<Role>(), Ok(Role::Provider));
    assert_eq!(" consumer ".parse::<Role>(), Ok(Role::Consumer));
}

#[test]
fn role_from_str_reports_unknown_name() {
    let err = " Staff ".parse::<Role>().unwrap_err();
    assert_eq!(err, UnknownRole("Staff".into()));
    assert_eq!(err.to_string(), "unknown role: Staff (expected provider or consumer)");
}

// =============================================================================
// ProviderStatus
// =============================================================================

fn trial_status(expiry: OffsetDateTime) -> ProviderStatus {
    ProviderStatus {
        plan_status: PlanStatus::Trial,
        trial_expiry: Some(expiry),
        has_active_plan: true,
        provider: None,
    }
}

#[test]
fn provider_status_parses_nested_contact_and_expiry() {
    let json = r#"{
        "planStatus": "trial",
        "trialExpiresAt": "2026-11-01T00:00:00Z",
        "hasActivePlan": true,
        "provider": {"name": "Glow Studio", "email": "hi@glow.test"}
    }"#;
    let status: ProviderStatus = serde_json::from_str(json).unwrap();
    assert_eq!(status.plan_status, PlanStatus::Trial);
    assert_eq!(status.trial_expires_at(), Some(datetime!(2026-11-01 00:00 UTC)));
    assert_eq!(status.provider.unwrap().name, "Glow Studio");
}

#[test]
fn provider_status_without_expiry_parses() {
    let status: ProviderStatus =
        serde_json::from_str(r#"{"planStatus":"active","hasActivePlan":true}"#).unwrap();
    assert_eq!(status.trial_expiry, None);
    assert!(status.provider.is_none());
}

#[test]
fn provider_status_rejects_unknown_plan() {
    let result = serde_json::from_str::<ProviderStatus>(r#"{"planStatus":"gold","hasActivePlan":true}"#);
    assert!(result.is_err());
}

#[test]
fn trial_expiry_ignored_for_non_trial_plans() {
    let mut status = trial_status(datetime!(2026-01-01 00:00 UTC));
    status.plan_status = PlanStatus::Active;
    assert_eq!(status.trial_expires_at(), None);
    assert!(!status.trial_expired(datetime!(2027-01-01 00:00 UTC)));
}

#[test]
fn trial_days_left_rounds_up() {
    let status = trial_status(datetime!(2026-10-21 12:00 UTC));
    assert_eq!(status.trial_days_left(datetime!(2026-10-19 18:00 UTC)), Some(2));
}

#[test]
fn trial_days_left_clamps_at_zero() {
    let status = trial_status(datetime!(2026-10-01 00:00 UTC));
    assert_eq!(status.trial_days_left(datetime!(2026-10-19 00:00 UTC)), Some(0));
}

#[test]
fn expired_trial_does_not_grant_access() {
    let status = trial_status(datetime!(2026-10-01 00:00 UTC));
    assert!(status.trial_expired(datetime!(2026-10-19 00:00 UTC)));
    assert!(!status.grants_access(datetime!(2026-10-19 00:00 UTC)));
    assert!(status.grants_access(datetime!(2026-09-19 00:00 UTC)));
}

#[test]
fn inactive_plan_does_not_grant_access() {
    let status = ProviderStatus {
        plan_status: PlanStatus::Canceled,
        trial_expiry: None,
        has_active_plan: false,
        provider: None,
    };
    assert!(!status.grants_access(datetime!(2026-10-19 00:00 UTC)));
}

#[test]
fn plan_labels() {
    assert_eq!(PlanStatus::Trial.label(), "Trial");
    assert_eq!(PlanStatus::Canceled.label(), "Canceled");
}

#[test]
fn login_request_debug_redacts_password() {
    let request = LoginRequest { email: "a@x.com".into(), password: "hunter2".into(), role: Role::Consumer };
    let rendered = format!("{request:?}");
    assert!(rendered.contains("a@x.com"));
    assert!(!rendered.contains("hunter2"));
}
