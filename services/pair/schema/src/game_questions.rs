use sea_orm::entity::prelude::*;

/// Generated game question owned jointly by a pair. `user_id` is the
/// creator (the caller that triggered generation), `partner_id` the
/// counterpart at creation time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub partner_id: i64,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PartnerId",
        to = "super::users::Column::Id"
    )]
    Counterpart,
    #[sea_orm(has_many = "super::game_answers::Entity")]
    Answers,
}

impl Related<super::game_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
