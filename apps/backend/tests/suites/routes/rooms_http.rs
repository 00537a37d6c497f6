use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use partyroom::AppError;
use serde_json::{json, Value};

use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::party::Party;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn create_join_and_list_over_http() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let party = Party::new(state.clone());
    let alice = party.user("Alice").await?;
    let bob = party.user("Bob").await?;
    let alice_auth = bearer_header("Alice", &state.security);
    let bob_auth = bearer_header("Bob", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .insert_header(("Authorization", alice_auth.clone()))
        .set_json(json!({ "name": "Friday night", "capacity": 4 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["room"]["name"], "Friday night");
    assert_eq!(created["room"]["capacity"], 4);
    assert_eq!(created["me"]["user_id"], alice.id);
    assert_eq!(created["me"]["is_admin"], true);
    let code = created["room"]["code"].as_str().unwrap_or_default().to_string();

    let req = test::TestRequest::post()
        .uri("/api/rooms/join")
        .insert_header(("Authorization", bob_auth.clone()))
        .set_json(json!({ "code": code.to_lowercase() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let joined: Value = test::read_body_json(resp).await;
    assert_eq!(joined["room"]["member_count"], 2);
    assert_eq!(joined["members"][1]["user_id"], bob.id);
    assert_eq!(joined["members"][1]["display_name"], "Bob");

    let req = test::TestRequest::get()
        .uri("/api/rooms")
        .insert_header(("Authorization", bob_auth))
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing[0]["code"], code.as_str());
    assert_eq!(listing[0]["admin_name"], "Alice");
    assert_eq!(listing[0]["member_count"], 2);
    Ok(())
}

#[actix_web::test]
async fn room_errors_use_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let party = Party::new(state.clone());
    let (room, _) = party.lobby(&["Alice", "Bob"]).await?;
    party.user("Carol").await?;
    let bob_auth = bearer_header("Bob", &state.security);
    let carol_auth = bearer_header("Carol", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms/current/start")
        .insert_header(("Authorization", bob_auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "NOT_AUTHORIZED", StatusCode::FORBIDDEN).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms/join")
        .insert_header(("Authorization", bob_auth))
        .set_json(json!({ "code": room.code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "ALREADY_IN_ROOM", StatusCode::CONFLICT).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms/current")
        .insert_header(("Authorization", carol_auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "NOT_IN_ROOM", StatusCode::CONFLICT).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms/join")
        .insert_header(("Authorization", carol_auth))
        .set_json(json!({ "code": "NOPE42" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "ROOM_NOT_FOUND", StatusCode::NOT_FOUND).await;
    Ok(())
}

#[actix_web::test]
async fn admin_manages_the_room_over_http() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let party = Party::new(state.clone());
    let (_, users) = party.lobby(&["Alice", "Bob", "Carol"]).await?;
    let alice_auth = bearer_header("Alice", &state.security);
    let bob_auth = bearer_header("Bob", &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms/current/kick")
        .insert_header(("Authorization", alice_auth.clone()))
        .set_json(json!({ "user_id": users[2].id }))
        .to_request();
    let info: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info["members"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::post()
        .uri("/api/rooms/current/kick")
        .insert_header(("Authorization", alice_auth.clone()))
        .set_json(json!({ "user_id": users[0].id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "SELF_KICK", StatusCode::BAD_REQUEST).await;

    let mode_id = info["game_modes"][0]["id"].as_i64().unwrap_or_default();
    let req = test::TestRequest::put()
        .uri(&format!("/api/rooms/current/modes/{mode_id}"))
        .insert_header(("Authorization", alice_auth.clone()))
        .set_json(json!({ "enabled": false }))
        .to_request();
    let modes: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(modes[0]["id"], mode_id);
    assert_eq!(modes[0]["enabled"], false);

    let req = test::TestRequest::post()
        .uri("/api/rooms/current/start")
        .insert_header(("Authorization", alice_auth.clone()))
        .to_request();
    let started: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(started["room"]["is_game_started"], true);

    let req = test::TestRequest::post()
        .uri("/api/rooms/leave")
        .insert_header(("Authorization", alice_auth))
        .to_request();
    let left: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(left["outcome"], "admin_transferred");
    assert_eq!(left["new_admin_id"], users[1].id);

    let req = test::TestRequest::get()
        .uri("/api/rooms/current")
        .insert_header(("Authorization", bob_auth))
        .to_request();
    let info: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info["me"]["is_admin"], true);
    Ok(())
}
