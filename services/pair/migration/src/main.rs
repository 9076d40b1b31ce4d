use sea_orm_migration::prelude::*;

use duetto_pair_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
