use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "turns")]
pub struct Model {
    /// Creation order; also the play order within a game
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "account_id")]
    pub account_id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "is_complete")]
    pub is_complete: bool,
    #[sea_orm(column_name = "is_drawing")]
    pub is_drawing: bool,
    #[sea_orm(column_type = "Text")]
    pub label: String,
    /// Drawing JSON; NULL for label turns and for drawing turns not yet played
    #[sea_orm(column_type = "Text", nullable)]
    pub drawing: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
