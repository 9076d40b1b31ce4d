use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Missyou::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Missyou::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Missyou::SenderId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Missyou::ReceiverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Missyou::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Missyou::Table, Missyou::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Missyou::Table, Missyou::ReceiverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Missyou::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Missyou {
    Table,
    Id,
    SenderId,
    ReceiverId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
