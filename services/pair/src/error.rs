use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Pair service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PairServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("partner request not found")]
    RequestNotFound,
    #[error("question not found")]
    QuestionNotFound,
    #[error("receiver not found or has no device token")]
    ReceiverUnreachable,
    #[error("already paired")]
    AlreadyPaired,
    #[error("request already pending")]
    RequestAlreadyPending,
    #[error("no partner linked")]
    NoPartner,
    #[error("cannot send a partner request to yourself")]
    SelfRequest,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PairServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",
            Self::ReceiverUnreachable => "RECEIVER_UNREACHABLE",
            Self::AlreadyPaired => "ALREADY_PAIRED",
            Self::RequestAlreadyPending => "REQUEST_ALREADY_PENDING",
            Self::NoPartner => "NO_PARTNER",
            Self::SelfRequest => "SELF_REQUEST",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PairServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::RequestNotFound
            | Self::QuestionNotFound
            | Self::ReceiverUnreachable => StatusCode::NOT_FOUND,
            Self::AlreadyPaired | Self::RequestAlreadyPending => StatusCode::CONFLICT,
            Self::NoPartner | Self::SelfRequest | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "success": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
