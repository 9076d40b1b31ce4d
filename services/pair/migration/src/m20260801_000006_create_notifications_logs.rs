use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationsLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationsLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationsLogs::SenderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationsLogs::ReceiverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationsLogs::Type).string().not_null())
                    .col(
                        ColumnDef::new(NotificationsLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationsLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NotificationsLogs {
    Table,
    Id,
    SenderId,
    ReceiverId,
    Type,
    CreatedAt,
}
