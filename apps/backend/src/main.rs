use actix_web::{web, App, HttpServer};
use partyroom::config::db::DbProfile;
use partyroom::config::game::GameConfig;
use partyroom::infra::state::build_state;
use partyroom::middleware::cors::cors_middleware;
use partyroom::middleware::request_trace::RequestTrace;
use partyroom::routes;
use partyroom::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid security configuration");
            std::process::exit(1);
        }
    };
    let game_config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid game configuration");
            std::process::exit(1);
        }
    };
    let profile = match std::env::var("PARTYROOM_SQLITE_FILE") {
        Ok(path) => DbProfile::SqliteFile(path.into()),
        Err(_) => DbProfile::Prod,
    };

    let app_state = match build_state()
        .with_db(profile)
        .with_security(security_config)
        .with_game_config(game_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, "starting partyroom backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
