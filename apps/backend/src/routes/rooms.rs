//! `/api/rooms` handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::rooms::{CreateRoomRequest, RoomService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct JoinRoomRequest {
    code: String,
}

#[derive(Debug, Deserialize)]
struct ToggleModeRequest {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct KickRequest {
    user_id: i64,
}

fn service(state: &AppState) -> RoomService {
    RoomService::new(state.game.clone(), state.rng.clone())
}

/// POST /api/rooms
///
/// Creates a room with the caller as admin and returns the room view.
async fn create_room(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user = current_user.as_user();
    let req = body.into_inner();
    let info = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            svc.create_room(txn, &user, req).await?;
            svc.room_info(txn, user.id).await
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(info))
}

/// POST /api/rooms/join
async fn join_room(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<JoinRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let code = body.into_inner().code;
    let info = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            svc.join_room(txn, user_id, &code).await?;
            svc.room_info(txn, user_id).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(info))
}

/// POST /api/rooms/leave
async fn leave_room(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { svc.leave_room(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// GET /api/rooms
///
/// Open lobbies, read at request time.
async fn list_rooms(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rooms = service(&app_state)
        .list_active_rooms(app_state.db())
        .await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// GET /api/rooms/current
async fn current_room(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let info = service(&app_state)
        .room_info(app_state.db(), current_user.id)
        .await?;
    Ok(HttpResponse::Ok().json(info))
}

/// PUT /api/rooms/current/modes/{mode_id}
async fn toggle_mode(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ToggleModeRequest>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let mode_id = path.into_inner();
    let enabled = body.enabled;
    let modes = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { svc.toggle_game_mode(txn, user_id, mode_id, enabled).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(modes))
}

/// POST /api/rooms/current/kick
async fn kick_player(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<KickRequest>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let target = body.user_id;
    let info = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            svc.kick_player(txn, user_id, target).await?;
            svc.room_info(txn, user_id).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(info))
}

/// POST /api/rooms/current/start
async fn start_game(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&app_state);
    let user_id = current_user.id;
    let info = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            svc.start_game(txn, user_id).await?;
            svc.room_info(txn, user_id).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(info))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_rooms))
            .route(web::post().to(create_room)),
    );
    cfg.service(web::resource("/join").route(web::post().to(join_room)));
    cfg.service(web::resource("/leave").route(web::post().to(leave_room)));
    cfg.service(web::resource("/current").route(web::get().to(current_room)));
    cfg.service(
        web::resource("/current/modes/{mode_id}").route(web::put().to(toggle_mode)),
    );
    cfg.service(web::resource("/current/kick").route(web::post().to(kick_player)));
    cfg.service(web::resource("/current/start").route(web::post().to(start_game)));
}
