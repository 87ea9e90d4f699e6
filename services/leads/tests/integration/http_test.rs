use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr};
use serde_json::{Value, json};

use vitrex_auth_types::policy::AdminPolicy;
use vitrex_leads::infra::mail::HttpMailTransport;
use vitrex_leads::router::build_router;
use vitrex_leads::state::AppState;
use vitrex_testing::auth::MockAuth;
use vitrex_testing::fixture::windshield_intake_json;

use crate::helpers::{CONTACT_PHONE, MAIN_ADMIN, OPERATOR, SENDER};

/// Database whose every query and statement fails, as when Postgres is down.
fn unreachable_db() -> DatabaseConnection {
    let refused = || DbErr::Conn(RuntimeErr::Internal("connection refused".to_owned()));
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([refused()])
        .append_exec_errors([refused()])
        .into_connection()
}

fn server_with(db: DatabaseConnection, operator_email: &str) -> TestServer {
    let mail = HttpMailTransport::new(
        "http://127.0.0.1:9/send",
        "test-key",
        Duration::from_secs(2),
    )
    .unwrap();
    let state = AppState {
        db,
        mail,
        policy: AdminPolicy::new(MAIN_ADMIN),
        mail_sender: SENDER.to_owned(),
        operator_email: operator_email.to_owned(),
        contact_phone: CONTACT_PHONE.to_owned(),
        cookie_domain: None,
    };
    TestServer::new(build_router(state)).unwrap()
}

/// Server wired to a failing database and an unreachable mail API, so every
/// submission exercises the degraded paths.
fn server_with_operator(operator_email: &str) -> TestServer {
    server_with(unreachable_db(), operator_email)
}

fn server() -> TestServer {
    server_with_operator(OPERATOR)
}

#[tokio::test]
async fn should_report_liveness_and_unready_database() {
    let server = server_with(DatabaseConnection::Disconnected, OPERATOR);

    server.get("/healthz").await.assert_status_ok();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server().get("/healthz").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_store_referral_code_in_cookie() {
    let response = server().get("/referral?ref=AG-7K2QD").await;

    response.assert_status_ok();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(cookie.starts_with("vitrex_ref=AG-7K2QD"), "got {cookie}");
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(response.json::<Value>()["referralCode"], "AG-7K2QD");
}

#[tokio::test]
async fn should_echo_stored_code_without_rewriting_cookie() {
    let response = server()
        .get("/referral")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("vitrex_ref=AG-C00K1"),
        )
        .await;

    response.assert_status_ok();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(response.json::<Value>()["referralCode"], "AG-C00K1");
}

#[tokio::test]
async fn should_reject_invalid_intake_with_field_errors() {
    let mut body = windshield_intake_json(None);
    body["email"] = json!("jeanne");
    body["phone"] = json!("123");

    let response = server().post("/intake").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "INVALID_PAYLOAD");
    assert!(json["fields"]["email"].is_string());
    assert!(json["fields"]["phone"].is_string());
}

#[tokio::test]
async fn should_reject_malformed_intake() {
    let response = server()
        .post("/intake")
        .json(&json!({ "firstName": "Jeanne" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MALFORMED_PAYLOAD");
}

#[tokio::test]
async fn should_return_mailto_fallback_when_everything_is_down() {
    let response = server()
        .post("/intake")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("vitrex_ref=AG-7K2QD"),
        )
        .json(&windshield_intake_json(None))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert!(json.get("submissionId").is_none());
    let mailto = json["fallbackMailto"].as_str().unwrap();
    assert!(mailto.starts_with("mailto:ops@vitrex.fr?subject=Nouvelle%20demande"));
    assert!(mailto.contains("AG-7K2QD"));
}

#[tokio::test]
async fn should_return_contact_phone_when_no_fallback_exists() {
    let response = server_with_operator("not an address")
        .post("/partner")
        .json(&json!({
            "firstName": "Karim",
            "lastName": "Benali",
            "email": "karim@garage-benali.fr",
            "phone": "04 78 00 00 00",
            "message": "Je souhaite recommander vos services.",
        }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["contactPhone"], CONTACT_PHONE);
    assert!(json["message"].as_str().unwrap().contains(CONTACT_PHONE));
}

fn with_auth(
    request: axum_test::TestRequest,
    auth: &MockAuth,
) -> axum_test::TestRequest {
    let [(id_name, id_value), (role_name, role_value)]: [(HeaderName, HeaderValue); 2] =
        auth.header_pairs();
    request
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
}

#[tokio::test]
async fn should_require_identity_on_admin_routes() {
    let response = server().get("/admin/submissions").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_customers_on_admin_routes() {
    let server = server();
    let customer = MockAuth::customer();

    for path in ["/admin/submissions", "/admin/agents", "/admin/users"] {
        with_auth(server.get(path), &customer)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn should_reserve_user_management_to_main_admin() {
    let response = with_auth(server().get("/admin/users"), &MockAuth::admin()).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_let_admin_through_to_storage() {
    let response = with_auth(server().get("/admin/submissions"), &MockAuth::admin()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_reject_unparseable_listing_query() {
    let response = with_auth(
        server().get("/admin/submissions?form-type=invoice"),
        &MockAuth::admin(),
    )
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_refuse_public_registration_of_main_admin_email() {
    let response = server()
        .post("/users")
        .json(&json!({
            "email": MAIN_ADMIN,
            "password": "s3cret-pass",
            "firstName": "Paul",
            "lastName": "Girard",
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "PROTECTED_ACCOUNT");
}
