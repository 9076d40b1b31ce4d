use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        // Partial unique indexes (Postgres) — sea-query's index builder has no
        // WHERE clause, so these go in as raw statements.
        //
        // A pending edge is unique per ordered (requester, target) pair.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX idx_partnerships_pending_pair \
             ON partnerships (user_id, partner_id) WHERE status = 'pending'",
        )
        .await?;
        // Each user holds at most one accepted edge per side. Combined with
        // the transactional both-sides check at accept time, this keeps a
        // user's accepted-partner count at zero or one.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX idx_partnerships_accepted_user \
             ON partnerships (user_id) WHERE status = 'accepted'",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX idx_partnerships_accepted_partner \
             ON partnerships (partner_id) WHERE status = 'accepted'",
        )
        .await?;
        manager
            .create_index(
                Index::create()
                    .table(Partnerships::Table)
                    .col(Partnerships::PartnerId)
                    .col(Partnerships::Status)
                    .name("idx_partnerships_partner_id_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(GameQuestions::Table)
                    .col(GameQuestions::UserId)
                    .col(GameQuestions::PartnerId)
                    .name("idx_game_questions_pair")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Missyou::Table)
                    .col(Missyou::SenderId)
                    .col(Missyou::ReceiverId)
                    .name("idx_missyou_sender_receiver")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_missyou_sender_receiver").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_game_questions_pair").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_partnerships_partner_id_status")
                    .to_owned(),
            )
            .await?;
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX idx_partnerships_accepted_partner")
            .await?;
        conn.execute_unprepared("DROP INDEX idx_partnerships_accepted_user")
            .await?;
        conn.execute_unprepared("DROP INDEX idx_partnerships_pending_pair")
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Partnerships {
    Table,
    PartnerId,
    Status,
}

#[derive(Iden)]
enum GameQuestions {
    Table,
    UserId,
    PartnerId,
}

#[derive(Iden)]
enum Missyou {
    Table,
    SenderId,
    ReceiverId,
}
