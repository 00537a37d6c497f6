use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[sea_orm(string_value = "complete")]
    Complete,
    #[sea_orm(string_value = "fail")]
    Fail,
    #[sea_orm(string_value = "vote")]
    Vote,
    #[sea_orm(string_value = "answer")]
    Answer,
    #[sea_orm(string_value = "submit_statements")]
    SubmitStatements,
    #[sea_orm(string_value = "pass")]
    Pass,
    #[sea_orm(string_value = "round_reset")]
    RoundReset,
}

/// Append-only log row. Ordering is by `id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub room_id: i64,
    pub card_id: Option<i64>,
    pub user_id: Option<i64>,
    pub action_type: ActionType,
    /// JSON-encoded `ActionData`
    #[sea_orm(column_type = "Text", nullable)]
    pub action_data: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
