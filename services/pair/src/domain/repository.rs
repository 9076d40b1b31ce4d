#![allow(async_fn_in_trait)]

use crate::domain::types::{
    AcceptOutcome, GameQuestion, PartnerProfile, Partnership, PendingRequest, User, UserSummary,
};
use crate::error::PairServiceError;

/// Repository for user accounts (read-only in this service).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PairServiceError>;

    async fn find_by_username_code(
        &self,
        username: &str,
        code: &str,
    ) -> Result<Option<User>, PairServiceError>;

    /// Substring match on username and/or prefix match on code, capped at
    /// `limit` rows. Callers pass at least one criterion.
    async fn search(
        &self,
        username: Option<&str>,
        code: Option<&str>,
        limit: u64,
    ) -> Result<Vec<UserSummary>, PairServiceError>;
}

/// Repository for pairing edges.
pub trait PartnershipRepository: Send + Sync {
    /// The other side of the unique accepted edge touching `user_id`, or
    /// `None` when unpaired. Symmetric regardless of which side initiated.
    async fn partner_id(&self, user_id: i64) -> Result<Option<i64>, PairServiceError>;

    /// The accepted partner's profile, or `None` when unpaired.
    async fn partner_profile(
        &self,
        user_id: i64,
    ) -> Result<Option<PartnerProfile>, PairServiceError>;

    /// Whether `user_id` holds an accepted edge on either side.
    async fn has_accepted(&self, user_id: i64) -> Result<bool, PairServiceError>;

    async fn find_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<Option<Partnership>, PairServiceError>;

    async fn create_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<(), PairServiceError>;

    /// Atomically flip the pending requester→accepter edge to accepted,
    /// verifying inside the same transaction that neither side is paired yet.
    async fn accept(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<AcceptOutcome, PairServiceError>;

    /// Delete the pending requester→accepter edge. Returns `true` if a row
    /// was deleted.
    async fn delete_pending(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<bool, PairServiceError>;

    /// Pending requests where `user_id` is the target.
    async fn pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<PendingRequest>, PairServiceError>;

    /// Pending requests where `user_id` is the requester.
    async fn pending_sent(&self, user_id: i64) -> Result<Vec<PendingRequest>, PairServiceError>;
}

/// Repository for game questions and answers.
pub trait GameRepository: Send + Sync {
    /// Most-recent question between the pair with fewer than two answers,
    /// scanning both creator/counterpart orderings.
    async fn open_question(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<Option<GameQuestion>, PairServiceError>;

    /// Insert a new question for the pair unless an open one appeared in the
    /// meantime. Returns the winning question and whether this call created it.
    async fn create_question_if_absent(
        &self,
        creator_id: i64,
        counterpart_id: i64,
        text: &str,
    ) -> Result<(GameQuestion, bool), PairServiceError>;

    async fn find_question(&self, id: i64) -> Result<Option<GameQuestion>, PairServiceError>;

    /// Voter ids of the answers recorded for a question (0, 1 or 2 entries).
    async fn answer_voter_ids(&self, game_id: i64) -> Result<Vec<i64>, PairServiceError>;

    /// Record a vote; a second vote by the same voter overwrites
    /// `selected_option`, never duplicates.
    async fn upsert_answer(
        &self,
        game_id: i64,
        voter_id: i64,
        partner_id: i64,
        selected_option: i64,
    ) -> Result<(), PairServiceError>;

    /// Global count of completed questions where both answers resolved to the
    /// same target user id.
    async fn total_matches(&self) -> Result<u64, PairServiceError>;
}

/// Repository for miss-you events.
pub trait MissYouRepository: Send + Sync {
    async fn record(&self, sender_id: i64, receiver_id: i64) -> Result<(), PairServiceError>;

    async fn total(&self, sender_id: i64, receiver_id: i64) -> Result<u64, PairServiceError>;
}

/// Repository for the push dispatch audit log.
pub trait NotificationLogRepository: Send + Sync {
    async fn record(
        &self,
        sender_id: i64,
        receiver_id: i64,
        kind: &str,
    ) -> Result<(), PairServiceError>;
}

/// Port for the text-generation collaborator: stem in, question text out.
/// Callers fall back to a placeholder on error; a failure here never fails
/// the surrounding request.
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, stem: &str) -> Result<String, PairServiceError>;
}

/// Port for push delivery to a device token. Fire-and-forget at the call
/// site: failures are logged, never propagated to the client.
pub trait PushDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        kind: &str,
        sender_id: i64,
    ) -> Result<(), PairServiceError>;
}
