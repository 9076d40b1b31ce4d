use crate::domain::repository::{
    GameRepository, PartnershipRepository, QuestionGenerator, UserRepository,
};
use crate::domain::stems::pick_stem;
use crate::domain::types::{GameQuestion, QuestionProgress, QuestionStatus, VotedFor};
use crate::error::PairServiceError;

/// Question text served when the generator fails or returns garbage.
pub const PLACEHOLDER_QUESTION: &str = "Domanda non disponibile";

/// Message attached to `waiting` responses.
pub const WAIT_MESSAGE: &str = "Aspetta che l'altro risponda";

// ── GetCurrentQuestion ───────────────────────────────────────────────────────

/// The question payload returned to a caller: `option_a` is always the
/// creator's username and `option_b` the counterpart's, no matter which of
/// the two participants is asking.
pub struct CurrentQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub status: QuestionStatus,
    pub message: Option<String>,
}

pub struct GetCurrentQuestionUseCase<U, P, G, Q>
where
    U: UserRepository,
    P: PartnershipRepository,
    G: GameRepository,
    Q: QuestionGenerator,
{
    pub users: U,
    pub partnerships: P,
    pub games: G,
    pub generator: Q,
}

impl<U, P, G, Q> GetCurrentQuestionUseCase<U, P, G, Q>
where
    U: UserRepository,
    P: PartnershipRepository,
    G: GameRepository,
    Q: QuestionGenerator,
{
    pub async fn execute(&self, user_id: i64) -> Result<CurrentQuestion, PairServiceError> {
        let partner_id = self
            .partnerships
            .partner_id(user_id)
            .await?
            .ok_or(PairServiceError::NoPartner)?;
        let me = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(PairServiceError::UserNotFound)?;
        let partner = self
            .users
            .find_by_id(partner_id)
            .await?
            .ok_or(PairServiceError::UserNotFound)?;

        if let Some(question) = self.games.open_question(user_id, partner_id).await? {
            return self
                .describe_open(question, user_id, &me.username, &partner.username)
                .await;
        }

        let stem = pick_stem();
        let text = match self.generator.generate(stem).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, stem, "question generation failed, using placeholder");
                PLACEHOLDER_QUESTION.to_owned()
            }
        };
        let (question, created) = self
            .games
            .create_question_if_absent(user_id, partner_id, &text)
            .await?;
        if created {
            Ok(CurrentQuestion {
                id: question.id,
                question: question.text,
                option_a: me.username,
                option_b: partner.username,
                status: QuestionStatus::New,
                message: None,
            })
        } else {
            // The partner raced us to generation; serve their question.
            self.describe_open(question, user_id, &me.username, &partner.username)
                .await
        }
    }

    async fn describe_open(
        &self,
        question: GameQuestion,
        user_id: i64,
        my_username: &str,
        partner_username: &str,
    ) -> Result<CurrentQuestion, PairServiceError> {
        let voters = self.games.answer_voter_ids(question.id).await?;
        let status = match QuestionProgress::from_voters(&voters) {
            QuestionProgress::AwaitingBoth => QuestionStatus::Pending,
            QuestionProgress::AwaitingOne { answered_by } if answered_by == user_id => {
                QuestionStatus::Waiting
            }
            QuestionProgress::AwaitingOne { .. } => QuestionStatus::Pending,
            // The open-question lookup excludes completed rows; if one slips
            // through a race, the caller has nothing left to do on it.
            QuestionProgress::Complete => QuestionStatus::Waiting,
        };
        let (option_a, option_b) = if question.creator_id == user_id {
            (my_username.to_owned(), partner_username.to_owned())
        } else {
            (partner_username.to_owned(), my_username.to_owned())
        };
        Ok(CurrentQuestion {
            id: question.id,
            question: question.text,
            option_a,
            option_b,
            status,
            message: (status == QuestionStatus::Waiting).then(|| WAIT_MESSAGE.to_owned()),
        })
    }
}

// ── SubmitAnswer ─────────────────────────────────────────────────────────────

pub struct SubmitAnswerUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> SubmitAnswerUseCase<G> {
    pub async fn execute(
        &self,
        voter_id: i64,
        question_id: i64,
        voted_for: VotedFor,
    ) -> Result<(), PairServiceError> {
        let question = self
            .games
            .find_question(question_id)
            .await?
            .ok_or(PairServiceError::QuestionNotFound)?;
        let other_id = question
            .other_participant(voter_id)
            .ok_or(PairServiceError::Forbidden)?;
        // "A" is the responder themselves, "B" their partner — not the
        // optionA/optionB creator labels used on the read side.
        let selected = voted_for.resolve(voter_id, other_id);
        self.games
            .upsert_answer(question_id, voter_id, other_id, selected)
            .await
    }
}

// ── GetStats ─────────────────────────────────────────────────────────────────

pub struct GetStatsUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> GetStatsUseCase<G> {
    pub async fn execute(&self) -> Result<u64, PairServiceError> {
        self.games.total_matches().await
    }
}
