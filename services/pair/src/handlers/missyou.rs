use axum::{Json, extract::State};
use serde::Serialize;

use duetto_identity::identity::Identity;

use crate::error::PairServiceError;
use crate::state::AppState;
use crate::usecase::missyou::{GetMissYouTotalUseCase, SendMissYouUseCase};

#[derive(Serialize)]
pub struct MissYouResponse {
    pub success: bool,
    pub total: u64,
}

// ── POST /missyou ────────────────────────────────────────────────────────────

pub async fn send_miss_you(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MissYouResponse>, PairServiceError> {
    let usecase = SendMissYouUseCase {
        partnerships: state.partnership_repo(),
        missyou: state.missyou_repo(),
    };
    let total = usecase.execute(identity.user_id).await?;
    Ok(Json(MissYouResponse {
        success: true,
        total,
    }))
}

// ── GET /missyou ─────────────────────────────────────────────────────────────

pub async fn get_miss_you_total(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MissYouResponse>, PairServiceError> {
    let usecase = GetMissYouTotalUseCase {
        partnerships: state.partnership_repo(),
        missyou: state.missyou_repo(),
    };
    let total = usecase.execute(identity.user_id).await?;
    Ok(Json(MissYouResponse {
        success: true,
        total,
    }))
}
