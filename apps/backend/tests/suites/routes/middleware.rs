use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use partyroom::middleware::jwt_extract::JwtExtract;
use partyroom::middleware::request_trace::RequestTrace;
use partyroom::AppError;
use serde_json::Value;
use uuid::Uuid;

use crate::support::test_state::build_test_state;

fn header_trace_id<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn plain_routes_get_a_fresh_trace_id() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
    )
    .await;

    let first = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_id = header_trace_id(&first);
    assert!(Uuid::parse_str(&first_id).is_ok(), "bad trace id {first_id:?}");
    assert_eq!(test::read_body(first).await, "pong");

    let second = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_ne!(header_trace_id(&second), first_id);
}

#[actix_web::test]
async fn bearer_rejections_carry_the_request_trace_id() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api")
                    .wrap(JwtExtract)
                    .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    let trace_id = header_trace_id(&resp);
    assert!(Uuid::parse_str(&trace_id).is_ok(), "bad trace id {trace_id:?}");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_MISSING_BEARER");
    assert_eq!(body["status"], 401);
    assert_eq!(body["trace_id"], trace_id.as_str());
    Ok(())
}
