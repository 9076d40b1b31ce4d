use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_partnerships;
mod m20260801_000003_create_game_questions;
mod m20260801_000004_create_game_answers;
mod m20260801_000005_create_missyou;
mod m20260801_000006_create_notifications_logs;
mod m20260801_000007_add_partnership_guards;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_partnerships::Migration),
            Box::new(m20260801_000003_create_game_questions::Migration),
            Box::new(m20260801_000004_create_game_answers::Migration),
            Box::new(m20260801_000005_create_missyou::Migration),
            Box::new(m20260801_000006_create_notifications_logs::Migration),
            Box::new(m20260801_000007_add_partnership_guards::Migration),
        ]
    }
}
