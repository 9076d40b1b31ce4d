use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use duetto_pair::domain::repository::{
    GameRepository, MissYouRepository, PartnershipRepository, QuestionGenerator, UserRepository,
};
use duetto_pair::domain::types::{
    AcceptOutcome, GameQuestion, PartnerProfile, Partnership, PartnershipStatus, PendingRequest,
    User, UserSummary,
};
use duetto_pair::error::PairServiceError;

// ── InMemoryUsers ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryUsers {
    pub users: Arc<Vec<User>>,
}

impl InMemoryUsers {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }
}

impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PairServiceError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username_code(
        &self,
        username: &str,
        code: &str,
    ) -> Result<Option<User>, PairServiceError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username && u.code == code)
            .cloned())
    }

    async fn search(
        &self,
        username: Option<&str>,
        code: Option<&str>,
        limit: u64,
    ) -> Result<Vec<UserSummary>, PairServiceError> {
        Ok(self
            .users
            .iter()
            .filter(|u| username.is_none_or(|f| u.username.contains(f)))
            .filter(|u| code.is_none_or(|p| u.code.starts_with(p)))
            .take(limit as usize)
            .map(|u| UserSummary {
                id: u.id,
                username: u.username.clone(),
                code: u.code.clone(),
                profile_pic_url: u.profile_pic_url.clone(),
            })
            .collect())
    }
}

// ── InMemoryPartnerships ─────────────────────────────────────────────────────

/// Partnership store mirroring the database semantics, including the
/// transactional both-sides check on accept.
#[derive(Clone)]
pub struct InMemoryPartnerships {
    pub users: InMemoryUsers,
    pub edges: Arc<Mutex<Vec<Partnership>>>,
    next_id: Arc<Mutex<i64>>,
}

impl InMemoryPartnerships {
    pub fn new(users: InMemoryUsers) -> Self {
        Self {
            users,
            edges: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    pub fn seed(&self, user_id: i64, partner_id: i64, status: PartnershipStatus) {
        let mut next_id = self.next_id.lock().unwrap();
        self.edges.lock().unwrap().push(Partnership {
            id: *next_id,
            user_id,
            partner_id,
            status,
            created_at: Utc::now(),
        });
        *next_id += 1;
    }

    pub fn edge_count(&self) -> usize {
        self.edges.lock().unwrap().len()
    }

    fn accepted_counterpart(&self, user_id: i64) -> Option<i64> {
        self.edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == PartnershipStatus::Accepted)
            .find_map(|e| e.counterpart_of(user_id))
    }
}

impl PartnershipRepository for InMemoryPartnerships {
    async fn partner_id(&self, user_id: i64) -> Result<Option<i64>, PairServiceError> {
        Ok(self.accepted_counterpart(user_id))
    }

    async fn partner_profile(
        &self,
        user_id: i64,
    ) -> Result<Option<PartnerProfile>, PairServiceError> {
        let Some(partner_id) = self.accepted_counterpart(user_id) else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(partner_id).await?.map(|u| PartnerProfile {
            id: u.id,
            username: u.username,
            code: u.code,
            bio: u.bio,
            profile_pic_url: u.profile_pic_url,
        }))
    }

    async fn has_accepted(&self, user_id: i64) -> Result<bool, PairServiceError> {
        Ok(self.accepted_counterpart(user_id).is_some())
    }

    async fn find_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<Option<Partnership>, PairServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .find(|e| {
                e.status == PartnershipStatus::Pending
                    && e.user_id == requester_id
                    && e.partner_id == target_id
            })
            .cloned())
    }

    async fn create_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<(), PairServiceError> {
        self.seed(requester_id, target_id, PartnershipStatus::Pending);
        Ok(())
    }

    async fn accept(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<AcceptOutcome, PairServiceError> {
        let mut edges = self.edges.lock().unwrap();
        let either_paired = edges.iter().any(|e| {
            e.status == PartnershipStatus::Accepted
                && (e.counterpart_of(requester_id).is_some()
                    || e.counterpart_of(accepter_id).is_some())
        });
        let Some(edge) = edges.iter_mut().find(|e| {
            e.status == PartnershipStatus::Pending
                && e.user_id == requester_id
                && e.partner_id == accepter_id
        }) else {
            return Ok(AcceptOutcome::NotFound);
        };
        if either_paired {
            return Ok(AcceptOutcome::AlreadyPaired);
        }
        edge.status = PartnershipStatus::Accepted;
        Ok(AcceptOutcome::Accepted)
    }

    async fn delete_pending(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<bool, PairServiceError> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| {
            !(e.status == PartnershipStatus::Pending
                && e.user_id == requester_id
                && e.partner_id == accepter_id)
        });
        Ok(edges.len() < before)
    }

    async fn pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<PendingRequest>, PairServiceError> {
        let edges: Vec<Partnership> = self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == PartnershipStatus::Pending && e.partner_id == user_id)
            .cloned()
            .collect();
        let mut requests = vec![];
        for edge in edges {
            if let Some(u) = self.users.find_by_id(edge.user_id).await? {
                requests.push(PendingRequest {
                    user_id: u.id,
                    username: u.username,
                    code: u.code,
                    requested_at: edge.created_at,
                });
            }
        }
        Ok(requests)
    }

    async fn pending_sent(&self, user_id: i64) -> Result<Vec<PendingRequest>, PairServiceError> {
        let edges: Vec<Partnership> = self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == PartnershipStatus::Pending && e.user_id == user_id)
            .cloned()
            .collect();
        let mut requests = vec![];
        for edge in edges {
            if let Some(u) = self.users.find_by_id(edge.partner_id).await? {
                requests.push(PendingRequest {
                    user_id: u.id,
                    username: u.username,
                    code: u.code,
                    requested_at: edge.created_at,
                });
            }
        }
        Ok(requests)
    }
}

// ── InMemoryGames ────────────────────────────────────────────────────────────

/// Game store mirroring the database semantics: open-question lookup over
/// both pair orderings, upsert keyed by (question, voter), match counting
/// over complete answer pairs.
#[derive(Clone)]
pub struct InMemoryGames {
    pub questions: Arc<Mutex<Vec<GameQuestion>>>,
    pub answers: Arc<Mutex<BTreeMap<(i64, i64), i64>>>,
    next_id: Arc<Mutex<i64>>,
}

impl InMemoryGames {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(vec![])),
            answers: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    pub fn answer_count(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl GameRepository for InMemoryGames {
    async fn open_question(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<Option<GameQuestion>, PairServiceError> {
        let answers = self.answers.lock().unwrap();
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|q| {
                let pair_matches = (q.creator_id == user_id && q.counterpart_id == partner_id)
                    || (q.creator_id == partner_id && q.counterpart_id == user_id);
                let answer_count = answers.keys().filter(|(g, _)| *g == q.id).count();
                pair_matches && answer_count < 2
            })
            .cloned())
    }

    async fn create_question_if_absent(
        &self,
        creator_id: i64,
        counterpart_id: i64,
        text: &str,
    ) -> Result<(GameQuestion, bool), PairServiceError> {
        if let Some(existing) = self.open_question(creator_id, counterpart_id).await? {
            return Ok((existing, false));
        }
        let mut next_id = self.next_id.lock().unwrap();
        let question = GameQuestion {
            id: *next_id,
            creator_id,
            counterpart_id,
            text: text.to_owned(),
            created_at: Utc::now(),
        };
        *next_id += 1;
        self.questions.lock().unwrap().push(question.clone());
        Ok((question, true))
    }

    async fn find_question(&self, id: i64) -> Result<Option<GameQuestion>, PairServiceError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn answer_voter_ids(&self, game_id: i64) -> Result<Vec<i64>, PairServiceError> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .keys()
            .filter(|(g, _)| *g == game_id)
            .map(|&(_, voter)| voter)
            .collect())
    }

    async fn upsert_answer(
        &self,
        game_id: i64,
        voter_id: i64,
        _partner_id: i64,
        selected_option: i64,
    ) -> Result<(), PairServiceError> {
        self.answers
            .lock()
            .unwrap()
            .insert((game_id, voter_id), selected_option);
        Ok(())
    }

    async fn total_matches(&self) -> Result<u64, PairServiceError> {
        let answers = self.answers.lock().unwrap();
        let mut by_game: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
        for (&(game_id, _), &selected) in answers.iter() {
            by_game.entry(game_id).or_default().push(selected);
        }
        Ok(by_game
            .values()
            .filter(|targets| targets.len() == 2 && targets[0] == targets[1])
            .count() as u64)
    }
}

// ── InMemoryMissYou ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryMissYou {
    pub events: Arc<Mutex<Vec<(i64, i64)>>>,
}

impl InMemoryMissYou {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl MissYouRepository for InMemoryMissYou {
    async fn record(&self, sender_id: i64, receiver_id: i64) -> Result<(), PairServiceError> {
        self.events.lock().unwrap().push((sender_id, receiver_id));
        Ok(())
    }

    async fn total(&self, sender_id: i64, receiver_id: i64) -> Result<u64, PairServiceError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|&&(s, r)| s == sender_id && r == receiver_id)
            .count() as u64)
    }
}

// ── StubGenerator ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StubGenerator {
    pub text: Option<&'static str>,
    pub calls: Arc<Mutex<u32>>,
}

impl StubGenerator {
    pub fn returning(text: &'static str) -> Self {
        Self {
            text: Some(text),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl QuestionGenerator for StubGenerator {
    async fn generate(&self, _stem: &str) -> Result<String, PairServiceError> {
        *self.calls.lock().unwrap() += 1;
        match self.text {
            Some(text) => Ok(text.to_owned()),
            None => Err(PairServiceError::Internal(anyhow::anyhow!(
                "generator unreachable"
            ))),
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(id: i64, username: &str, code: &str) -> User {
    User {
        id,
        username: username.to_owned(),
        code: code.to_owned(),
        device_token: None,
        bio: None,
        profile_pic_url: None,
        created_at: Utc::now(),
    }
}

/// The canonical two-user fixture: alba (1) and bruno (2).
pub fn couple() -> InMemoryUsers {
    InMemoryUsers::new(vec![
        test_user(1, "alba", "111111"),
        test_user(2, "bruno", "222222"),
    ])
}
