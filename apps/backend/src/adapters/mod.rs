//! SeaORM adapters. Functions here return `DbErr`; the `repos` layer maps
//! them to `DomainError`.

pub mod card_stats_sea;
pub mod cards_sea;
pub mod game_actions_sea;
pub mod game_modes_sea;
pub mod games_sea;
pub mod player_stats_sea;
pub mod room_players_sea;
pub mod rooms_sea;
pub mod users_sea;
