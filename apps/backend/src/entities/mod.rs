pub mod card_stats;
pub mod cards;
pub mod game_actions;
pub mod game_modes;
pub mod games;
pub mod player_stats;
pub mod room_game_modes;
pub mod room_players;
pub mod rooms;
pub mod users;

pub use card_stats::Entity as CardStats;
pub use cards::Entity as Cards;
pub use game_actions::Entity as GameActions;
pub use game_modes::Entity as GameModes;
pub use games::Entity as Games;
pub use player_stats::Entity as PlayerStats;
pub use room_game_modes::Entity as RoomGameModes;
pub use room_players::Entity as RoomPlayers;
pub use rooms::Entity as Rooms;
pub use users::Entity as Users;
