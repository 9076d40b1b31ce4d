use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use duetto_identity::identity::Identity;

use crate::domain::types::{QuestionStatus, VotedFor};
use crate::error::PairServiceError;
use crate::state::AppState;
use crate::usecase::game::{GetCurrentQuestionUseCase, GetStatsUseCase, SubmitAnswerUseCase};

// ── GET /game/new ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub id: i64,
    pub question: String,
    #[serde(rename = "optionA")]
    pub option_a: String,
    #[serde(rename = "optionB")]
    pub option_b: String,
    pub status: QuestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn get_current_question(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<QuestionResponse>, PairServiceError> {
    let usecase = GetCurrentQuestionUseCase {
        users: state.user_repo(),
        partnerships: state.partnership_repo(),
        games: state.game_repo(),
        generator: state.generator(),
    };
    let current = usecase.execute(identity.user_id).await?;
    Ok(Json(QuestionResponse {
        success: true,
        id: current.id,
        question: current.question,
        option_a: current.option_a,
        option_b: current.option_b,
        status: current.status,
        message: current.message,
    }))
}

// ── POST /game/answer ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitAnswerBody {
    #[serde(rename = "questionId")]
    pub question_id: i64,
    #[serde(rename = "votedFor")]
    pub voted_for: VotedFor,
}

#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
}

pub async fn submit_answer(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SubmitAnswerBody>,
) -> Result<Json<Ack>, PairServiceError> {
    let usecase = SubmitAnswerUseCase {
        games: state.game_repo(),
    };
    usecase
        .execute(identity.user_id, body.question_id, body.voted_for)
        .await?;
    Ok(Json(Ack { success: true }))
}

// ── GET /game/stats ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(rename = "totalMatches")]
    pub total_matches: u64,
}

pub async fn get_stats(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, PairServiceError> {
    let usecase = GetStatsUseCase {
        games: state.game_repo(),
    };
    let total_matches = usecase.execute().await?;
    Ok(Json(StatsResponse {
        success: true,
        total_matches,
    }))
}
