//! `/api/game` handlers. Clients poll `GET /state`; every other call is a
//! short transaction against the caller's room.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::game_flow::{CardActionRequest, GameFlowService};
use crate::services::stats::StatsService;
use crate::state::app_state::AppState;

fn service(state: &AppState) -> GameFlowService {
    GameFlowService::new(state.game.clone(), state.rng.clone())
}

/// GET /api/game/state
///
/// May draw the next card, so it runs in a write transaction.
async fn game_state(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let state = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { svc.game_state(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(state))
}

/// POST /api/game/actions
async fn record_action(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<CardActionRequest>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let req = body.into_inner();
    let receipt = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { svc.record_card_action(txn, user_id, req).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

/// POST /api/game/drink
async fn drink(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let receipt = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { svc.drink(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

/// POST /api/game/end
async fn end_game(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let summary = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { StatsService::new().end_game(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(summary))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/state").route(web::get().to(game_state)));
    cfg.service(web::resource("/actions").route(web::post().to(record_action)));
    cfg.service(web::resource("/drink").route(web::post().to(drink)));
    cfg.service(web::resource("/end").route(web::post().to(end_game)));
}
