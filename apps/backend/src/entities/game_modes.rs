use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum GameModeKind {
    #[sea_orm(string_value = "truth_or_dare")]
    TruthOrDare,
    #[sea_orm(string_value = "most_likely")]
    MostLikely,
    #[sea_orm(string_value = "never_have_i")]
    NeverHaveI,
    #[sea_orm(string_value = "two_truths_lie")]
    TwoTruthsLie,
    #[sea_orm(string_value = "trivia")]
    Trivia,
    #[sea_orm(string_value = "hot_potato")]
    HotPotato,
    #[sea_orm(string_value = "taboo")]
    Taboo,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_modes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub slug: GameModeKind,
    pub display_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cards::Entity")]
    Cards,
}

impl Related<super::cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
