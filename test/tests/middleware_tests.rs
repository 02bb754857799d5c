//! Middleware tests.
//!
//! End-to-end tests of ApiKeyAuthentication wrapped around an Actix Web scope.


use actix_web::dev::{Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde_json::{json, Value};

use actix_apikey_core::http::security::api_key::ApiKeyError;
use actix_apikey_core::http::security::{
    ApiKeyAuthentication, AuthOutcome, AuthenticateOptions, AuthenticationStrategy, FailReason,
    HeaderConfig,
};

use common::{create_test_app, test_strategy, Calls};

// =============================================================================
// Public Route Tests
// =============================================================================

#[actix_web::test]
async fn test_public_route_needs_no_key() {
    let calls = Calls::default();
    let app = create_test_app(test_strategy(None, &calls)).await;

    let req = test::TestRequest::get().uri("/public").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(calls.lock().unwrap().is_empty());
}

// =============================================================================
// Protected Route Tests
// =============================================================================

#[actix_web::test]
async fn test_valid_key_reaches_handler() {
    let calls = Calls::default();
    let app = create_test_app(test_strategy(None, &calls)).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("X-Api-Key", "abc123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["principal"], json!({"id": "u1"}));
    assert_eq!(body["info"], json!({"scope": "read"}));
}

#[actix_web::test]
async fn test_bearer_prefix_configuration() {
    let calls = Calls::default();
    let strategy = test_strategy(Some(HeaderConfig::header("Authorization").prefix("Bearer ")), &calls);
    let app = create_test_app(strategy).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("authorization", "Bearer abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(*calls.lock().unwrap(), vec!["abc123".to_string()]);
}

#[actix_web::test]
async fn test_missing_key_is_bad_request() {
    let calls = Calls::default();
    let app = create_test_app(test_strategy(None, &calls)).await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing API Key");
}

#[actix_web::test]
async fn test_wrong_prefix_is_bad_request() {
    let calls = Calls::default();
    let strategy = test_strategy(Some(HeaderConfig::header("Authorization").prefix("Bearer ")), &calls);
    let app = create_test_app(strategy).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", "Token abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        r#"Invalid API Key prefix, authorization header should start with "Bearer ""#
    );
    assert!(calls.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_rejected_key_is_unauthorized() {
    let calls = Calls::default();
    let app = create_test_app(test_strategy(None, &calls)).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("X-Api-Key", "revoked"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(WWW_AUTHENTICATE).unwrap(),
        "ApiKey realm=\"Test API\""
    );
}

#[actix_web::test]
async fn test_verifier_error_is_server_error() {
    let calls = Calls::default();
    let app = create_test_app(test_strategy(None, &calls)).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("X-Api-Key", "outage"))
        .to_request();

    match app.call(req).await {
        Ok(resp) => assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR),
        Err(err) => assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        ),
    }
}

// =============================================================================
// Status Hint and Options Tests
// =============================================================================

/// Strategy driven entirely by the options the middleware hands it.
#[derive(Clone)]
struct OptionDriven;

impl AuthenticationStrategy for OptionDriven {
    type Principal = Value;
    type Info = Value;

    fn name(&self) -> &str {
        "option-driven"
    }

    fn authenticate(
        &self,
        _req: &ServiceRequest,
        options: &AuthenticateOptions,
    ) -> LocalBoxFuture<'static, AuthOutcome<Value, Value>> {
        let outcome = match options.get("verdict").and_then(Value::as_str) {
            Some("forbid") => AuthOutcome::Fail {
                reason: FailReason::Rejected(None),
                status: Some(StatusCode::FORBIDDEN),
            },
            Some("bad-request") => AuthOutcome::Fail {
                reason: FailReason::BadRequest(ApiKeyError::Missing),
                status: Some(StatusCode::FORBIDDEN),
            },
            _ => AuthOutcome::Fail {
                reason: FailReason::Rejected(None),
                status: None,
            },
        };
        Box::pin(std::future::ready(outcome))
    }
}

async fn call_with_verdict(
    options: AuthenticateOptions,
) -> ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody>> {
    let app = test::init_service(
        App::new()
            .wrap(
                ApiKeyAuthentication::new(OptionDriven)
                    .options(options)
                    .realm("Hinted"),
            )
            .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    test::call_service(&app, req).await
}

#[actix_web::test]
async fn test_status_hint_replaces_unauthorized() {
    let resp =
        call_with_verdict(AuthenticateOptions::new().with("verdict", "forbid")).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        resp.headers().get(WWW_AUTHENTICATE).unwrap(),
        "ApiKey realm=\"Hinted\""
    );
}

#[actix_web::test]
async fn test_without_options_rejection_stays_unauthorized() {
    let resp = call_with_verdict(AuthenticateOptions::new()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_status_hint_ignored_for_bad_request() {
    let resp =
        call_with_verdict(AuthenticateOptions::new().with("verdict", "bad-request")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(WWW_AUTHENTICATE).is_none());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing API Key");
}
