use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use partyroom::AppError;

use crate::support::app_builder::create_test_app;
use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::party::Party;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn missing_bearer_is_unauthorized() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get().uri("/api/rooms").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn malformed_and_expired_tokens_are_distinguished() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let expired = mint_expired_token("Alice", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms")
        .insert_header(("Authorization", "Bearer abc.def.ghi"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms")
        .insert_header(("Authorization", format!("Bearer {expired}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_EXPIRED_JWT", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn a_valid_token_without_a_user_is_forbidden() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = bearer_header("Ghost", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms/current")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "FORBIDDEN_USER_NOT_FOUND", StatusCode::FORBIDDEN).await;
    Ok(())
}

#[actix_web::test]
async fn a_known_user_gets_through() -> Result<(), AppError> {
    let state = build_test_state().await?;
    Party::new(state.clone()).user("Alice").await?;
    let bearer = bearer_header("Alice", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
