use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod game;
pub mod health;
pub mod rooms;
pub mod stats;

/// Register every route. `/health` is public; everything under `/api`
/// requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .service(web::scope("/rooms").configure(rooms::configure_routes))
            .service(web::scope("/game").configure(game::configure_routes))
            .service(web::scope("/stats").configure(stats::configure_routes)),
    );
}
