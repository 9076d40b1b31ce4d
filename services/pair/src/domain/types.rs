use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as seen by this service. Credential material stays in the
/// auth service; only pairing-relevant fields cross this boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub code: String,
    pub device_token: Option<String>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Accepted partner as returned by `GetPartnership`.
#[derive(Debug, Clone)]
pub struct PartnerProfile {
    pub id: i64,
    pub username: String,
    pub code: String,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// Candidate row returned by user search.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub code: String,
    pub profile_pic_url: Option<String>,
}

/// Status of a pairing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnershipStatus {
    Pending,
    Accepted,
}

impl PartnershipStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}

/// Directed pairing edge from requester (`user_id`) to target (`partner_id`).
#[derive(Debug, Clone)]
pub struct Partnership {
    pub id: i64,
    pub user_id: i64,
    pub partner_id: i64,
    pub status: PartnershipStatus,
    pub created_at: DateTime<Utc>,
}

impl Partnership {
    /// The other side of the edge, regardless of which side initiated.
    /// `None` if `user_id` is not on the edge at all.
    pub fn counterpart_of(&self, user_id: i64) -> Option<i64> {
        if user_id == self.user_id {
            Some(self.partner_id)
        } else if user_id == self.partner_id {
            Some(self.user_id)
        } else {
            None
        }
    }
}

/// A pending request as listed by `GetPartnership` — carries the counterpart's
/// identity so the client can accept/reject (received) or cancel context (sent).
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub user_id: i64,
    pub username: String,
    pub code: String,
    pub requested_at: DateTime<Utc>,
}

/// Outcome of the transactional accept step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// No pending requester→accepter edge exists.
    NotFound,
    /// One of the two sides already holds an accepted partnership.
    AlreadyPaired,
}

/// A game question jointly owned by a pair. `creator_id` is whoever triggered
/// generation; `counterpart_id` their partner at that moment.
#[derive(Debug, Clone)]
pub struct GameQuestion {
    pub id: i64,
    pub creator_id: i64,
    pub counterpart_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl GameQuestion {
    pub fn is_participant(&self, user_id: i64) -> bool {
        user_id == self.creator_id || user_id == self.counterpart_id
    }

    /// The participant that is not `user_id`, or `None` for outsiders.
    pub fn other_participant(&self, user_id: i64) -> Option<i64> {
        if user_id == self.creator_id {
            Some(self.counterpart_id)
        } else if user_id == self.counterpart_id {
            Some(self.creator_id)
        } else {
            None
        }
    }
}

/// Progress of a question, computed at read time from the recorded voters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionProgress {
    AwaitingBoth,
    AwaitingOne { answered_by: i64 },
    Complete,
}

impl QuestionProgress {
    pub fn from_voters(voters: &[i64]) -> Self {
        match voters.first() {
            None => Self::AwaitingBoth,
            Some(&answered_by) if voters.len() == 1 => Self::AwaitingOne { answered_by },
            Some(_) => Self::Complete,
        }
    }
}

/// Status label returned by `GET /game/new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    New,
    Pending,
    Waiting,
}

/// Binary choice submitted with an answer. On this endpoint "A" always means
/// the responder themselves and "B" their partner — a different labeling from
/// the optionA/optionB usernames returned by `GET /game/new`, kept distinct on
/// purpose because clients depend on both encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VotedFor {
    A,
    B,
}

impl VotedFor {
    /// Map the choice to the actual user id it designates.
    pub const fn resolve(self, voter_id: i64, other_id: i64) -> i64 {
        match self {
            Self::A => voter_id,
            Self::B => other_id,
        }
    }
}
