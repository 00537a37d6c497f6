use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::game::GameConfig;
use crate::domain::rng::RandomSource;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Room defaults and mode tunables
    pub game: GameConfig,
    /// Source for room codes, deck picks and hot-potato explosions
    pub rng: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        game: GameConfig,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            db,
            security,
            game,
            rng,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("game", &self.game)
            .finish_non_exhaustive()
    }
}
