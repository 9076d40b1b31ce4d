use sea_orm::entity::prelude::*;

/// One participant's vote on a question. The composite primary key
/// (`game_id`, `user_id`) makes a second vote by the same voter an
/// update, never a duplicate. `selected_option` is the resolved user id
/// the vote points at.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub partner_id: i64,
    pub selected_option: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_questions::Entity",
        from = "Column::GameId",
        to = "super::game_questions::Column::Id"
    )]
    Question,
}

impl Related<super::game_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
