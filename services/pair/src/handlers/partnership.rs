use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use duetto_identity::identity::Identity;

use crate::domain::types::{PartnerProfile, PendingRequest, UserSummary};
use crate::error::PairServiceError;
use crate::state::AppState;
use crate::usecase::partnership::{
    AcceptRequestUseCase, GetPartnershipUseCase, RejectRequestUseCase, SearchUsersUseCase,
    SendRequestInput, SendRequestUseCase,
};

// ── Shared response types ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusMessage {
    pub success: bool,
    pub message: &'static str,
}

// ── POST /partnerships/request ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendRequestBody {
    pub partner_username: String,
    pub partner_code: String,
}

pub async fn send_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SendRequestBody>,
) -> Result<Json<StatusMessage>, PairServiceError> {
    let usecase = SendRequestUseCase {
        users: state.user_repo(),
        partnerships: state.partnership_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            SendRequestInput {
                partner_username: body.partner_username,
                partner_code: body.partner_code,
            },
        )
        .await?;
    Ok(Json(StatusMessage {
        success: true,
        message: "Richiesta inviata",
    }))
}

// ── POST /partnerships/accept ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveRequestBody {
    pub requester_id: i64,
}

pub async fn accept_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ResolveRequestBody>,
) -> Result<Json<StatusMessage>, PairServiceError> {
    let usecase = AcceptRequestUseCase {
        partnerships: state.partnership_repo(),
    };
    usecase.execute(identity.user_id, body.requester_id).await?;
    Ok(Json(StatusMessage {
        success: true,
        message: "Partnership accettata",
    }))
}

// ── POST /partnerships/reject ────────────────────────────────────────────────

pub async fn reject_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ResolveRequestBody>,
) -> Result<Json<StatusMessage>, PairServiceError> {
    let usecase = RejectRequestUseCase {
        partnerships: state.partnership_repo(),
    };
    usecase.execute(identity.user_id, body.requester_id).await?;
    Ok(Json(StatusMessage {
        success: true,
        message: "Richiesta rifiutata",
    }))
}

// ── GET /partnerships ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PartnerDto {
    pub id: i64,
    pub username: String,
    pub code: String,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl From<PartnerProfile> for PartnerDto {
    fn from(p: PartnerProfile) -> Self {
        Self {
            id: p.id,
            username: p.username,
            code: p.code,
            bio: p.bio,
            profile_pic_url: p.profile_pic_url,
        }
    }
}

#[derive(Serialize)]
pub struct PendingRequestDto {
    pub id: i64,
    pub username: String,
    pub code: String,
    #[serde(serialize_with = "duetto_core::serde::to_rfc3339_ms")]
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

impl From<PendingRequest> for PendingRequestDto {
    fn from(r: PendingRequest) -> Self {
        Self {
            id: r.user_id,
            username: r.username,
            code: r.code,
            requested_at: r.requested_at,
        }
    }
}

#[derive(Serialize)]
pub struct PendingLists {
    pub received: Vec<PendingRequestDto>,
    pub sent: Vec<PendingRequestDto>,
}

#[derive(Serialize)]
pub struct PartnershipResponse {
    pub success: bool,
    pub partner: Option<PartnerDto>,
    #[serde(rename = "pendingRequests")]
    pub pending_requests: PendingLists,
}

pub async fn get_partnership(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<PartnershipResponse>, PairServiceError> {
    let usecase = GetPartnershipUseCase {
        partnerships: state.partnership_repo(),
    };
    let overview = usecase.execute(identity.user_id).await?;
    Ok(Json(PartnershipResponse {
        success: true,
        partner: overview.partner.map(PartnerDto::from),
        pending_requests: PendingLists {
            received: overview
                .received
                .into_iter()
                .map(PendingRequestDto::from)
                .collect(),
            sent: overview
                .sent
                .into_iter()
                .map(PendingRequestDto::from)
                .collect(),
        },
    }))
}

// ── GET /partnerships/search ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub username: Option<String>,
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct UserSummaryDto {
    pub id: i64,
    pub username: String,
    pub code: String,
    pub profile_pic_url: Option<String>,
}

impl From<UserSummary> for UserSummaryDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            username: u.username,
            code: u.code,
            profile_pic_url: u.profile_pic_url,
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub users: Vec<UserSummaryDto>,
}

pub async fn search_users(
    _identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<SearchResponse>, PairServiceError> {
    let query: SearchQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| PairServiceError::MissingData)?
        .unwrap_or_default();
    let usecase = SearchUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(query.username, query.code).await?;
    Ok(Json(SearchResponse {
        success: true,
        users: users.into_iter().map(UserSummaryDto::from).collect(),
    }))
}
