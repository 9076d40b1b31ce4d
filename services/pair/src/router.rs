use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use duetto_core::health::{healthz, readyz};
use duetto_core::middleware::request_id_layer;

use crate::handlers::{
    game::{get_current_question, get_stats, submit_answer},
    missyou::{get_miss_you_total, send_miss_you},
    notify::{send_notification, send_notification_default},
    partnership::{accept_request, get_partnership, reject_request, search_users, send_request},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Game
        .route("/game/new", get(get_current_question))
        .route("/game/answer", post(submit_answer))
        .route("/game/stats", get(get_stats))
        // Partnerships
        .route("/partnerships/request", post(send_request))
        .route("/partnerships/accept", post(accept_request))
        .route("/partnerships/reject", post(reject_request))
        .route("/partnerships/search", get(search_users))
        .route("/partnerships", get(get_partnership))
        // Miss-you counter
        .route("/missyou", post(send_miss_you).get(get_miss_you_total))
        // Notification relay
        .route("/notify", post(send_notification_default))
        .route("/notify/{kind}", post(send_notification))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
