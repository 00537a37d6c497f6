use partyroom::config::db::DbProfile;
use partyroom::config::game::{GameConfig, HotPotatoRules};
use partyroom::infra::state::{build_state, StateBuilder};
use partyroom::state::app_state::AppState;
use partyroom::AppError;

/// Fixed seed so deck picks and room codes repeat between runs.
pub const TEST_SEED: u64 = 20_261_017;

pub fn test_game_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(TEST_SEED),
        ..GameConfig::default()
    }
}

/// Fresh in-memory SQLite store, migrated and seeded.
pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_game_config(test_game_config())
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder().build().await
}

/// State whose hot potato explodes on a pass with probability `numerator / 10`.
pub async fn build_test_state_with_potato_odds(numerator: u32) -> Result<AppState, AppError> {
    let config = GameConfig {
        hot_potato: HotPotatoRules {
            explosion_numerator: numerator,
            explosion_denominator: 10,
            ..HotPotatoRules::default()
        },
        ..test_game_config()
    };
    test_state_builder().with_game_config(config).build().await
}
