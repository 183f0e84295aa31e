//! 代理接口集成测试
//!
//! 使用 wiremock 模拟上游主机，走真实的 reqwest 客户端

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use helianthus::services::{SolarApiClient, SolarSource};
use helpers::*;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECORD_PATH: &str = "/maintain-s/history/power/63295957/record";
const MONTHLY_PATH: &str = "/maintain-s/history/power/63295957/stats/month";

fn client_for(server: &MockServer, token: Option<&str>) -> Arc<dyn SolarSource> {
    let settings = test_settings(&server.uri());
    Arc::new(assert_ok!(SolarApiClient::new(
        &settings,
        token.map(|t| SecretString::new(t.to_string()))
    )))
}

#[actix_web::test]
async fn test_daily_record_is_forwarded_verbatim() {
    let server = MockServer::start().await;
    // 字段顺序非字母序，且包含未声明字段
    let body = r#"{"statistics":null,"records":[{"dateTime":1706745900,"generationPower":120.5,"acceptDay":20240201,"weather":null}]}"#;

    Mock::given(method("GET"))
        .and(path(RECORD_PATH))
        .and(query_param("year", "2024"))
        .and(query_param("month", "2"))
        .and(query_param("day", "1"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let req = test::TestRequest::get()
        .uri("/api/solar?year=2024&month=2&day=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), body.as_bytes());
}

#[actix_web::test]
async fn test_null_records_are_forwarded() {
    let server = MockServer::start().await;
    let body = r#"{"statistics":null,"records":null}"#;

    Mock::given(method("GET"))
        .and(path(RECORD_PATH))
        .and(query_param("day", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let req = test::TestRequest::get()
        .uri("/api/solar?year=2024&month=2&day=30")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), body.as_bytes());
}

#[actix_web::test]
async fn test_missing_params_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/solar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json,
        json!({ "error": "Missing required parameters: year, month, and day are required" })
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar/monthly?year=2024").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json["error"],
        "Missing required parameters: year and month are required"
    );
}

#[actix_web::test]
async fn test_invalid_calendar_date_is_forwarded() {
    let server = MockServer::start().await;
    let upstream_error = json!({ "code": 400, "msg": "invalid date" });

    Mock::given(method("GET"))
        .and(path(RECORD_PATH))
        .and(query_param("day", "30"))
        .respond_with(ResponseTemplate::new(400).set_body_json(upstream_error.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let req = test::TestRequest::get()
        .uri("/api/solar?year=2024&month=2&day=30")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json,
        json!({
            "error": "Failed to fetch power history",
            "details": "Request failed with status code 400",
            "response": upstream_error
        })
    );
}

#[actix_web::test]
async fn test_missing_token_is_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, None), test_settings(&server.uri()));

    for uri in ["/api/solar?year=2024&month=2&day=1", "/api/solar/monthly?year=2024&month=2"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json, json!({ "error": "TOKEN environment variable is not set" }));
    }
}

#[actix_web::test]
async fn test_validation_runs_before_token_check() {
    let server = MockServer::start().await;
    let app = init_app!(client_for(&server, None), test_settings(&server.uri()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/solar?year=2024").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_monthly_summary_is_forwarded_verbatim() {
    let server = MockServer::start().await;
    let body = monthly_body(2024, 2, 290.0, &[(2, 12.0), (1, 10.0)]);

    Mock::given(method("GET"))
        .and(path(MONTHLY_PATH))
        .and(query_param("year", "2024"))
        .and(query_param("month", "2"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar/monthly?year=2024&month=2").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    // 代理层不排序、不改写
    assert_eq!(json, body);
}

#[actix_web::test]
async fn test_unexpected_shape_is_still_forwarded() {
    let server = MockServer::start().await;
    let body = r#"{"statistics":{"year":"not-a-number"},"records":"not-an-array"}"#;

    Mock::given(method("GET"))
        .and(path(MONTHLY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar/monthly?year=2024&month=2").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), body.as_bytes());
}

#[actix_web::test]
async fn test_non_json_success_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MONTHLY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar/monthly?year=2024&month=2").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Failed to fetch monthly stats");
    assert!(json["details"].as_str().unwrap().contains("invalid JSON"));
    assert_eq!(json["response"], "<html>maintenance</html>");
}

#[actix_web::test]
async fn test_non_json_error_body_is_kept_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RECORD_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let app = init_app!(client_for(&server, Some(TEST_TOKEN)), test_settings(&server.uri()));
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar?year=2024&month=2&day=1").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["details"], "Request failed with status code 502");
    assert_eq!(json["response"], "Bad Gateway");
}

#[actix_web::test]
async fn test_unreachable_upstream_has_no_response_field() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    drop(server);

    let settings = test_settings(&base_url);
    let source: Arc<dyn SolarSource> = Arc::new(assert_ok!(SolarApiClient::new(
        &settings,
        Some(SecretString::new(TEST_TOKEN.to_string()))
    )));
    let app = init_app!(source, settings);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/solar?year=2024&month=2&day=1").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Failed to fetch power history");
    assert!(json.get("details").is_some());
    assert!(json.get("response").is_none());
}
