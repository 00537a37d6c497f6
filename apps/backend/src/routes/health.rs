use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::web::rfc3339;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.db();
    let probe = db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS health_check".to_string(),
        ))
        .await;

    let (db_status, db_error, migrations) = match probe {
        Ok(_) => {
            let migration_version = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok".to_string(), None, migration_version)
        }
        // Driver text stays in the log, not the body.
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            (
                "error".to_string(),
                Some("database query failed".to_string()),
                "unknown".to_string(),
            )
        }
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        db: db_status,
        db_error,
        migrations,
        time: rfc3339(OffsetDateTime::now_utc()),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
