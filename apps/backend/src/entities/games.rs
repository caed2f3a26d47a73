use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    /// Link to the game's completion record; set at most once
    #[sea_orm(column_name = "completed_at_id")]
    pub completed_at_id: Option<i64>,
    #[sea_orm(column_name = "next_expiration")]
    pub next_expiration: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::turns::Entity")]
    Turns,
    #[sea_orm(
        belongs_to = "super::games_completed_at::Entity",
        from = "Column::CompletedAtId",
        to = "super::games_completed_at::Column::Id"
    )]
    CompletedAt,
}

impl Related<super::turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turns.def()
    }
}

impl Related<super::games_completed_at::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompletedAt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
