use actix_web::http::StatusCode;
use actix_web::test;
use partyroom::AppError;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_database_and_migrations() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    let migrations = body["migrations"].as_str().unwrap_or_default();
    assert!(migrations.starts_with('m'), "unexpected version {migrations}");
    Ok(())
}

#[actix_web::test]
async fn health_needs_no_token() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
