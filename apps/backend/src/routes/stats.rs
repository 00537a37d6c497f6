use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::stats::StatsService;
use crate::state::app_state::AppState;

/// GET /api/stats/me
async fn my_stats(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let stats = StatsService::new()
        .player_stats(app_state.db(), current_user.id)
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(my_stats)));
}
