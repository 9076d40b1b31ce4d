use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use duetto_identity::identity::Identity;

use crate::error::PairServiceError;
use crate::state::AppState;
use crate::usecase::notify::{SendNotificationInput, SendNotificationUseCase};

#[derive(Deserialize)]
pub struct NotifyBody {
    pub username: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "receiverId")]
    pub receiver_id: Option<i64>,
    pub title: String,
    pub body: String,
}

#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
}

// ── POST /notify ─────────────────────────────────────────────────────────────

pub async fn send_notification_default(
    identity: Identity,
    state: State<AppState>,
    body: Json<NotifyBody>,
) -> Result<Json<Ack>, PairServiceError> {
    send(identity, state, "partner".to_owned(), body).await
}

// ── POST /notify/{kind} ──────────────────────────────────────────────────────

pub async fn send_notification(
    identity: Identity,
    state: State<AppState>,
    Path(kind): Path<String>,
    body: Json<NotifyBody>,
) -> Result<Json<Ack>, PairServiceError> {
    send(identity, state, kind, body).await
}

async fn send(
    identity: Identity,
    State(state): State<AppState>,
    kind: String,
    Json(body): Json<NotifyBody>,
) -> Result<Json<Ack>, PairServiceError> {
    let usecase = SendNotificationUseCase {
        users: state.user_repo(),
        logs: state.notification_log_repo(),
        push: state.push(),
    };
    usecase
        .execute(
            identity.user_id,
            SendNotificationInput {
                kind,
                username: body.username,
                code: body.code,
                receiver_id: body.receiver_id,
                title: body.title,
                body: body.body,
            },
        )
        .await?;
    Ok(Json(Ack { success: true }))
}
