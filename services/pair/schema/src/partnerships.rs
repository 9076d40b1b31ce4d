use sea_orm::entity::prelude::*;

/// Directed pairing edge from the requester (`user_id`) to the target
/// (`partner_id`). `status` is `pending` or `accepted`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "partnerships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub partner_id: i64,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Requester,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PartnerId",
        to = "super::users::Column::Id"
    )]
    Target,
}

impl ActiveModelBehavior for ActiveModel {}
