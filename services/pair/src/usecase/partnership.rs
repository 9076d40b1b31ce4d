use crate::domain::repository::{PartnershipRepository, UserRepository};
use crate::domain::types::{AcceptOutcome, PartnerProfile, PendingRequest, UserSummary};
use crate::error::PairServiceError;

/// How many candidate rows a user search may return at most.
pub const SEARCH_LIMIT: u64 = 20;

// ── SendRequest ──────────────────────────────────────────────────────────────

pub struct SendRequestInput {
    pub partner_username: String,
    pub partner_code: String,
}

pub struct SendRequestUseCase<U: UserRepository, P: PartnershipRepository> {
    pub users: U,
    pub partnerships: P,
}

impl<U: UserRepository, P: PartnershipRepository> SendRequestUseCase<U, P> {
    pub async fn execute(
        &self,
        requester_id: i64,
        input: SendRequestInput,
    ) -> Result<(), PairServiceError> {
        let username = input.partner_username.trim();
        let code = input.partner_code.trim();
        if username.is_empty() || code.is_empty() {
            return Err(PairServiceError::MissingData);
        }
        let target = self
            .users
            .find_by_username_code(username, code)
            .await?
            .ok_or(PairServiceError::UserNotFound)?;
        if target.id == requester_id {
            return Err(PairServiceError::SelfRequest);
        }
        if self.partnerships.has_accepted(requester_id).await? {
            return Err(PairServiceError::AlreadyPaired);
        }
        if self
            .partnerships
            .find_pending(requester_id, target.id)
            .await?
            .is_some()
        {
            return Err(PairServiceError::RequestAlreadyPending);
        }
        self.partnerships
            .create_pending(requester_id, target.id)
            .await
    }
}

// ── AcceptRequest ────────────────────────────────────────────────────────────

pub struct AcceptRequestUseCase<P: PartnershipRepository> {
    pub partnerships: P,
}

impl<P: PartnershipRepository> AcceptRequestUseCase<P> {
    pub async fn execute(
        &self,
        accepter_id: i64,
        requester_id: i64,
    ) -> Result<(), PairServiceError> {
        match self.partnerships.accept(requester_id, accepter_id).await? {
            AcceptOutcome::Accepted => Ok(()),
            AcceptOutcome::NotFound => Err(PairServiceError::RequestNotFound),
            AcceptOutcome::AlreadyPaired => Err(PairServiceError::AlreadyPaired),
        }
    }
}

// ── RejectRequest ────────────────────────────────────────────────────────────

pub struct RejectRequestUseCase<P: PartnershipRepository> {
    pub partnerships: P,
}

impl<P: PartnershipRepository> RejectRequestUseCase<P> {
    pub async fn execute(
        &self,
        accepter_id: i64,
        requester_id: i64,
    ) -> Result<(), PairServiceError> {
        let deleted = self
            .partnerships
            .delete_pending(requester_id, accepter_id)
            .await?;
        if !deleted {
            return Err(PairServiceError::RequestNotFound);
        }
        Ok(())
    }
}

// ── GetPartnership ───────────────────────────────────────────────────────────

pub struct PartnershipOverview {
    pub partner: Option<PartnerProfile>,
    pub received: Vec<PendingRequest>,
    pub sent: Vec<PendingRequest>,
}

pub struct GetPartnershipUseCase<P: PartnershipRepository> {
    pub partnerships: P,
}

impl<P: PartnershipRepository> GetPartnershipUseCase<P> {
    pub async fn execute(&self, user_id: i64) -> Result<PartnershipOverview, PairServiceError> {
        let partner = self.partnerships.partner_profile(user_id).await?;
        let received = self.partnerships.pending_received(user_id).await?;
        let sent = self.partnerships.pending_sent(user_id).await?;
        Ok(PartnershipOverview {
            partner,
            received,
            sent,
        })
    }
}

// ── SearchUsers ──────────────────────────────────────────────────────────────

pub struct SearchUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SearchUsersUseCase<U> {
    pub async fn execute(
        &self,
        username: Option<String>,
        code: Option<String>,
    ) -> Result<Vec<UserSummary>, PairServiceError> {
        let username = username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let code = code.as_deref().map(str::trim).filter(|s| !s.is_empty());
        // No criteria means no results, never a full table scan.
        if username.is_none() && code.is_none() {
            return Ok(vec![]);
        }
        self.users.search(username, code, SEARCH_LIMIT).await
    }
}
