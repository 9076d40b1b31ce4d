use sea_orm::entity::prelude::*;

/// User account row. Written by the auth service at registration; this
/// service only reads it. `password_hash` must never reach a response body.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    /// Short numeric discriminator; (username, code) is unique.
    pub code: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub device_token: Option<String>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
