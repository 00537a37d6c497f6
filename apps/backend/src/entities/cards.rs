use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub game_mode_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub points: i32,
    /// Drinks charged on failure
    pub difficulty: i32,
    /// Client-side countdown only; never enforced by the server
    pub timer_seconds: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_modes::Entity",
        from = "Column::GameModeId",
        to = "super::game_modes::Column::Id"
    )]
    GameMode,
}

impl Related<super::game_modes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameMode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
