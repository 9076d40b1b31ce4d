use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameAnswers::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameAnswers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameAnswers::PartnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameAnswers::SelectedOption)
                            .big_integer()
                            .not_null(),
                    )
                    // One vote per (question, voter); a re-vote is an update.
                    .primary_key(
                        Index::create()
                            .col(GameAnswers::GameId)
                            .col(GameAnswers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GameAnswers::Table, GameAnswers::GameId)
                            .to(GameQuestions::Table, GameQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameAnswers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GameAnswers {
    Table,
    GameId,
    UserId,
    PartnerId,
    SelectedOption,
}

#[derive(Iden)]
enum GameQuestions {
    Table,
    Id,
}
