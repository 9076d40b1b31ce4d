use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use duetto_pair::config::PairConfig;
use duetto_pair::infra::generator::OllamaGenerator;
use duetto_pair::infra::push::HttpPushDispatcher;
use duetto_pair::router::build_router;
use duetto_pair::state::AppState;

#[tokio::main]
async fn main() {
    duetto_core::tracing::init_tracing();

    let config = PairConfig::from_env();

    let mut db_opts = ConnectOptions::new(&config.database_url);
    db_opts
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8));
    let db = Database::connect(db_opts)
        .await
        .expect("failed to connect to database");

    let generator = OllamaGenerator::new(
        &config.generator_url,
        &config.generator_model,
        Duration::from_secs(config.generator_timeout_secs),
    );
    let push = HttpPushDispatcher::new(config.push_url.clone());

    let state = AppState {
        db,
        generator,
        push,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.pair_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("pair service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
