use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub admin_id: i64,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
    pub is_game_started: bool,
    pub current_card_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_players::Entity")]
    RoomPlayers,
}

impl Related<super::room_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
