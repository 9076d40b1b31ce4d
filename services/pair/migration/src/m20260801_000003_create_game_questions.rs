use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameQuestions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameQuestions::PartnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameQuestions::Text).string().not_null())
                    .col(
                        ColumnDef::new(GameQuestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GameQuestions::Table, GameQuestions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GameQuestions::Table, GameQuestions::PartnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameQuestions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GameQuestions {
    Table,
    Id,
    UserId,
    PartnerId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
