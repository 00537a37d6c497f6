use std::sync::Arc;

use crate::config::db::{DbOwner, DbProfile};
use crate::config::game::GameConfig;
use crate::domain::rng::{RandomSource, SeededRandom};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
    game_config: GameConfig,
    rng: Option<Arc<dyn RandomSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: DbProfile::InMemory,
            game_config: GameConfig::default(),
            rng: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    /// Replace the random source; defaults to ChaCha20 seeded from the game config.
    pub fn with_rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.game_config.validate()?;
        let rng = self
            .rng
            .unwrap_or_else(|| Arc::new(SeededRandom::new(self.game_config.rng_seed)));
        // single entrypoint: build + migrate
        let conn = bootstrap_db(self.db_profile, DbOwner::App).await?;
        Ok(AppState::new(
            conn,
            self.security_config,
            self.game_config,
            rng,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
