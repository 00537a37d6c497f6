use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    DisplayName,
    AvatarKind,
    AvatarColor,
    AvatarPath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameModes {
    Table,
    Id,
    Slug,
    DisplayName,
    Description,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    GameModeId,
    Title,
    Content,
    Points,
    Difficulty,
    TimerSeconds,
}

#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    Code,
    AdminId,
    Name,
    Capacity,
    IsActive,
    IsGameStarted,
    CurrentCardId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RoomPlayers {
    Table,
    Id,
    RoomId,
    UserId,
    Points,
    Drinks,
    CardsCompleted,
    CardsFailed,
    JoinedAt,
}

#[derive(Iden)]
enum RoomGameModes {
    Table,
    Id,
    RoomId,
    GameModeId,
    IsEnabled,
}

#[derive(Iden)]
enum GameActions {
    Table,
    Id,
    RoomId,
    CardId,
    UserId,
    ActionType,
    ActionData,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    RoomId,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum PlayerStats {
    Table,
    UserId,
    GamesPlayed,
    GamesWon,
    TotalPoints,
    MaxPointsInGame,
    CardsCompleted,
    CardsFailed,
    TotalDrinks,
    UpdatedAt,
}

#[derive(Iden)]
enum CardStats {
    Table,
    Id,
    UserId,
    CardId,
    TimesDrawn,
    TimesCompleted,
    TimesFailed,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn counter_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().default(0).to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Users::AvatarKind)
                            .string_len(16)
                            .not_null()
                            .default("emoji"),
                    )
                    .col(
                        ColumnDef::new(Users::AvatarColor)
                            .string_len(16)
                            .not_null()
                            .default("#6c5ce7"),
                    )
                    .col(ColumnDef::new(Users::AvatarPath).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_modes
        manager
            .create_table(
                Table::create()
                    .table(GameModes::Table)
                    .if_not_exists()
                    .col(id_col(GameModes::Id))
                    .col(ColumnDef::new(GameModes::Slug).string_len(32).not_null())
                    .col(ColumnDef::new(GameModes::DisplayName).string().not_null())
                    .col(ColumnDef::new(GameModes::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_modes_slug_unique")
                    .table(GameModes::Table)
                    .col(GameModes::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // cards
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(id_col(Cards::Id))
                    .col(ColumnDef::new(Cards::GameModeId).big_integer().not_null())
                    .col(ColumnDef::new(Cards::Title).string().not_null())
                    .col(ColumnDef::new(Cards::Content).text().not_null())
                    .col(ColumnDef::new(Cards::Points).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Cards::Difficulty)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Cards::TimerSeconds).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_game_mode_id")
                            .from(Cards::Table, Cards::GameModeId)
                            .to(GameModes::Table, GameModes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cards_game_mode_id")
                    .table(Cards::Table)
                    .col(Cards::GameModeId)
                    .to_owned(),
            )
            .await?;

        // rooms
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(id_col(Rooms::Id))
                    .col(ColumnDef::new(Rooms::Code).string_len(16).not_null())
                    .col(ColumnDef::new(Rooms::AdminId).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::Name).string().not_null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().not_null().default(8))
                    .col(
                        ColumnDef::new(Rooms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Rooms::IsGameStarted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Rooms::CurrentCardId).big_integer().null())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_admin_id")
                            .from(Rooms::Table, Rooms::AdminId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_current_card_id")
                            .from(Rooms::Table, Rooms::CurrentCardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness among *active* rooms is enforced by the code generator;
        // inactive rooms keep their old codes.
        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_code")
                    .table(Rooms::Table)
                    .col(Rooms::Code)
                    .to_owned(),
            )
            .await?;

        // room_players
        manager
            .create_table(
                Table::create()
                    .table(RoomPlayers::Table)
                    .if_not_exists()
                    .col(id_col(RoomPlayers::Id))
                    .col(ColumnDef::new(RoomPlayers::RoomId).big_integer().not_null())
                    .col(ColumnDef::new(RoomPlayers::UserId).big_integer().not_null())
                    .col(counter_col(RoomPlayers::Points))
                    .col(counter_col(RoomPlayers::Drinks))
                    .col(counter_col(RoomPlayers::CardsCompleted))
                    .col(counter_col(RoomPlayers::CardsFailed))
                    .col(
                        ColumnDef::new(RoomPlayers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_players_room_id")
                            .from(RoomPlayers::Table, RoomPlayers::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_players_user_id")
                            .from(RoomPlayers::Table, RoomPlayers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership per user across all rooms
        manager
            .create_index(
                Index::create()
                    .name("idx_room_players_user_unique")
                    .table(RoomPlayers::Table)
                    .col(RoomPlayers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_players_room_id")
                    .table(RoomPlayers::Table)
                    .col(RoomPlayers::RoomId)
                    .to_owned(),
            )
            .await?;

        // room_game_modes
        manager
            .create_table(
                Table::create()
                    .table(RoomGameModes::Table)
                    .if_not_exists()
                    .col(id_col(RoomGameModes::Id))
                    .col(ColumnDef::new(RoomGameModes::RoomId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoomGameModes::GameModeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomGameModes::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_game_modes_room_id")
                            .from(RoomGameModes::Table, RoomGameModes::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_game_modes_game_mode_id")
                            .from(RoomGameModes::Table, RoomGameModes::GameModeId)
                            .to(GameModes::Table, GameModes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_game_modes_room_mode_unique")
                    .table(RoomGameModes::Table)
                    .col(RoomGameModes::RoomId)
                    .col(RoomGameModes::GameModeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_actions (append-only log)
        manager
            .create_table(
                Table::create()
                    .table(GameActions::Table)
                    .if_not_exists()
                    .col(id_col(GameActions::Id))
                    .col(ColumnDef::new(GameActions::RoomId).big_integer().not_null())
                    .col(ColumnDef::new(GameActions::CardId).big_integer().null())
                    .col(ColumnDef::new(GameActions::UserId).big_integer().null())
                    .col(
                        ColumnDef::new(GameActions::ActionType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameActions::ActionData).text().null())
                    .col(
                        ColumnDef::new(GameActions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_actions_room_id")
                            .from(GameActions::Table, GameActions::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_actions_room_card")
                    .table(GameActions::Table)
                    .col(GameActions::RoomId)
                    .col(GameActions::CardId)
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(id_col(Games::Id))
                    .col(ColumnDef::new(Games::RoomId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::EndedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_room_id")
                            .from(Games::Table, Games::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_room_id")
                    .table(Games::Table)
                    .col(Games::RoomId)
                    .to_owned(),
            )
            .await?;

        // player_stats
        manager
            .create_table(
                Table::create()
                    .table(PlayerStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerStats::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(counter_col(PlayerStats::GamesPlayed))
                    .col(counter_col(PlayerStats::GamesWon))
                    .col(counter_col(PlayerStats::TotalPoints))
                    .col(counter_col(PlayerStats::MaxPointsInGame))
                    .col(counter_col(PlayerStats::CardsCompleted))
                    .col(counter_col(PlayerStats::CardsFailed))
                    .col(counter_col(PlayerStats::TotalDrinks))
                    .col(
                        ColumnDef::new(PlayerStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_stats_user_id")
                            .from(PlayerStats::Table, PlayerStats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // card_stats
        manager
            .create_table(
                Table::create()
                    .table(CardStats::Table)
                    .if_not_exists()
                    .col(id_col(CardStats::Id))
                    .col(ColumnDef::new(CardStats::UserId).big_integer().not_null())
                    .col(ColumnDef::new(CardStats::CardId).big_integer().not_null())
                    .col(counter_col(CardStats::TimesDrawn))
                    .col(counter_col(CardStats::TimesCompleted))
                    .col(counter_col(CardStats::TimesFailed))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_stats_user_id")
                            .from(CardStats::Table, CardStats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_stats_card_id")
                            .from(CardStats::Table, CardStats::CardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_stats_user_card_unique")
                    .table(CardStats::Table)
                    .col(CardStats::UserId)
                    .col(CardStats::CardId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(CardStats::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerStats::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameActions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomGameModes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameModes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
