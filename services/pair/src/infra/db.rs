use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Statement, TransactionTrait,
    sea_query::OnConflict,
};

use duetto_pair_schema::{game_answers, game_questions, missyou, notifications_logs, partnerships, users};

use crate::domain::repository::{
    GameRepository, MissYouRepository, NotificationLogRepository, PartnershipRepository,
    UserRepository,
};
use crate::domain::types::{
    AcceptOutcome, GameQuestion, PartnerProfile, Partnership, PartnershipStatus, PendingRequest,
    User, UserSummary,
};
use crate::error::PairServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PairServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username_code(
        &self,
        username: &str,
        code: &str,
    ) -> Result<Option<User>, PairServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find user by username and code")?;
        Ok(model.map(user_from_model))
    }

    async fn search(
        &self,
        username: Option<&str>,
        code: Option<&str>,
        limit: u64,
    ) -> Result<Vec<UserSummary>, PairServiceError> {
        let mut query = users::Entity::find();
        if let Some(fragment) = username {
            query = query.filter(users::Column::Username.contains(fragment));
        }
        if let Some(prefix) = code {
            query = query.filter(users::Column::Code.starts_with(prefix));
        }
        let models = query
            .limit(limit)
            .all(&self.db)
            .await
            .context("search users")?;
        Ok(models
            .into_iter()
            .map(|m| UserSummary {
                id: m.id,
                username: m.username,
                code: m.code,
                profile_pic_url: m.profile_pic_url,
            })
            .collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        code: model.code,
        device_token: model.device_token,
        bio: model.bio,
        profile_pic_url: model.profile_pic_url,
        created_at: model.created_at,
    }
}

// ── Partnership repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPartnershipRepository {
    pub db: DatabaseConnection,
}

impl DbPartnershipRepository {
    /// The accepted edge touching `user_id`, whichever side it sits on.
    async fn accepted_edge(&self, user_id: i64) -> Result<Option<partnerships::Model>, DbErr> {
        partnerships::Entity::find()
            .filter(partnerships::Column::Status.eq(PartnershipStatus::Accepted.as_str()))
            .filter(
                Condition::any()
                    .add(partnerships::Column::UserId.eq(user_id))
                    .add(partnerships::Column::PartnerId.eq(user_id)),
            )
            .one(&self.db)
            .await
    }

    async fn pending_edges_to_requests(
        &self,
        edges: Vec<partnerships::Model>,
        counterpart_id: impl Fn(&partnerships::Model) -> i64,
    ) -> Result<Vec<PendingRequest>, PairServiceError> {
        let mut requests = Vec::with_capacity(edges.len());
        for edge in edges {
            let user = users::Entity::find_by_id(counterpart_id(&edge))
                .one(&self.db)
                .await
                .context("load pending request counterpart")?;
            if let Some(user) = user {
                requests.push(PendingRequest {
                    user_id: user.id,
                    username: user.username,
                    code: user.code,
                    requested_at: edge.created_at,
                });
            }
        }
        Ok(requests)
    }
}

impl PartnershipRepository for DbPartnershipRepository {
    async fn partner_id(&self, user_id: i64) -> Result<Option<i64>, PairServiceError> {
        let edge = self
            .accepted_edge(user_id)
            .await
            .context("resolve partner id")?;
        Ok(edge.and_then(|e| partnership_from_model(e).counterpart_of(user_id)))
    }

    async fn partner_profile(
        &self,
        user_id: i64,
    ) -> Result<Option<PartnerProfile>, PairServiceError> {
        let Some(partner_id) = self.partner_id(user_id).await? else {
            return Ok(None);
        };
        let user = users::Entity::find_by_id(partner_id)
            .one(&self.db)
            .await
            .context("load partner profile")?;
        Ok(user.map(|u| PartnerProfile {
            id: u.id,
            username: u.username,
            code: u.code,
            bio: u.bio,
            profile_pic_url: u.profile_pic_url,
        }))
    }

    async fn has_accepted(&self, user_id: i64) -> Result<bool, PairServiceError> {
        let edge = self
            .accepted_edge(user_id)
            .await
            .context("check accepted partnership")?;
        Ok(edge.is_some())
    }

    async fn find_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<Option<Partnership>, PairServiceError> {
        let model = partnerships::Entity::find()
            .filter(partnerships::Column::UserId.eq(requester_id))
            .filter(partnerships::Column::PartnerId.eq(target_id))
            .filter(partnerships::Column::Status.eq(PartnershipStatus::Pending.as_str()))
            .one(&self.db)
            .await
            .context("find pending partnership")?;
        Ok(model.map(partnership_from_model))
    }

    async fn create_pending(
        &self,
        requester_id: i64,
        target_id: i64,
    ) -> Result<(), PairServiceError> {
        partnerships::ActiveModel {
            id: NotSet,
            user_id: Set(requester_id),
            partner_id: Set(target_id),
            status: Set(PartnershipStatus::Pending.as_str().to_owned()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("create pending partnership")?;
        Ok(())
    }

    async fn accept(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<AcceptOutcome, PairServiceError> {
        let outcome = self
            .db
            .transaction::<_, AcceptOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let pending = partnerships::Entity::find()
                        .filter(partnerships::Column::UserId.eq(requester_id))
                        .filter(partnerships::Column::PartnerId.eq(accepter_id))
                        .filter(
                            partnerships::Column::Status
                                .eq(PartnershipStatus::Pending.as_str()),
                        )
                        .one(txn)
                        .await?;
                    let Some(pending) = pending else {
                        return Ok(AcceptOutcome::NotFound);
                    };
                    // Re-checked inside the transaction so two racing accepts
                    // cannot both pass; the partial unique indexes are the
                    // final backstop.
                    let paired = partnerships::Entity::find()
                        .filter(
                            partnerships::Column::Status
                                .eq(PartnershipStatus::Accepted.as_str()),
                        )
                        .filter(
                            Condition::any()
                                .add(
                                    partnerships::Column::UserId
                                        .is_in([requester_id, accepter_id]),
                                )
                                .add(
                                    partnerships::Column::PartnerId
                                        .is_in([requester_id, accepter_id]),
                                ),
                        )
                        .count(txn)
                        .await?;
                    if paired > 0 {
                        return Ok(AcceptOutcome::AlreadyPaired);
                    }
                    let mut edge = pending.into_active_model();
                    edge.status = Set(PartnershipStatus::Accepted.as_str().to_owned());
                    edge.update(txn).await?;
                    Ok(AcceptOutcome::Accepted)
                })
            })
            .await
            .context("accept partner request")?;
        Ok(outcome)
    }

    async fn delete_pending(
        &self,
        requester_id: i64,
        accepter_id: i64,
    ) -> Result<bool, PairServiceError> {
        let result = partnerships::Entity::delete_many()
            .filter(partnerships::Column::UserId.eq(requester_id))
            .filter(partnerships::Column::PartnerId.eq(accepter_id))
            .filter(partnerships::Column::Status.eq(PartnershipStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .context("delete pending partnership")?;
        Ok(result.rows_affected > 0)
    }

    async fn pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<PendingRequest>, PairServiceError> {
        let edges = partnerships::Entity::find()
            .filter(partnerships::Column::PartnerId.eq(user_id))
            .filter(partnerships::Column::Status.eq(PartnershipStatus::Pending.as_str()))
            .order_by_desc(partnerships::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list received partner requests")?;
        self.pending_edges_to_requests(edges, |e| e.user_id).await
    }

    async fn pending_sent(&self, user_id: i64) -> Result<Vec<PendingRequest>, PairServiceError> {
        let edges = partnerships::Entity::find()
            .filter(partnerships::Column::UserId.eq(user_id))
            .filter(partnerships::Column::Status.eq(PartnershipStatus::Pending.as_str()))
            .order_by_desc(partnerships::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list sent partner requests")?;
        self.pending_edges_to_requests(edges, |e| e.partner_id).await
    }
}

fn partnership_from_model(model: partnerships::Model) -> Partnership {
    Partnership {
        id: model.id,
        user_id: model.user_id,
        partner_id: model.partner_id,
        // Unknown status strings cannot appear: the column only ever receives
        // values written through PartnershipStatus::as_str.
        status: PartnershipStatus::from_str(&model.status).unwrap_or(PartnershipStatus::Pending),
        created_at: model.created_at,
    }
}

// ── Game repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGameRepository {
    pub db: DatabaseConnection,
}

/// Most-recent question between the pair (either ordering) that has fewer
/// than two recorded answers.
fn open_question_stmt(backend: DbBackend, a: i64, b: i64) -> Statement {
    Statement::from_sql_and_values(
        backend,
        r#"
        SELECT q.id, q.user_id, q.partner_id, q.text, q.created_at
        FROM game_questions q
        WHERE ((q.user_id = $1 AND q.partner_id = $2) OR (q.user_id = $2 AND q.partner_id = $1))
          AND (SELECT COUNT(*) FROM game_answers a WHERE a.game_id = q.id) < 2
        ORDER BY q.created_at DESC
        LIMIT 1
        "#,
        [a.into(), b.into()],
    )
}

impl GameRepository for DbGameRepository {
    async fn open_question(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<Option<GameQuestion>, PairServiceError> {
        let backend = self.db.get_database_backend();
        let model =
            game_questions::Model::find_by_statement(open_question_stmt(backend, user_id, partner_id))
                .one(&self.db)
                .await
                .context("find open question")?;
        Ok(model.map(question_from_model))
    }

    async fn create_question_if_absent(
        &self,
        creator_id: i64,
        counterpart_id: i64,
        text: &str,
    ) -> Result<(GameQuestion, bool), PairServiceError> {
        let backend = self.db.get_database_backend();
        let text = text.to_owned();
        let (model, created) = self
            .db
            .transaction::<_, (game_questions::Model, bool), DbErr>(move |txn| {
                Box::pin(async move {
                    // Re-check inside the transaction: a concurrent call from
                    // the partner may have inserted the question first.
                    let existing = game_questions::Model::find_by_statement(open_question_stmt(
                        backend,
                        creator_id,
                        counterpart_id,
                    ))
                    .one(txn)
                    .await?;
                    if let Some(existing) = existing {
                        return Ok((existing, false));
                    }
                    let inserted = game_questions::ActiveModel {
                        id: NotSet,
                        user_id: Set(creator_id),
                        partner_id: Set(counterpart_id),
                        text: Set(text),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    Ok((inserted, true))
                })
            })
            .await
            .context("create question if absent")?;
        Ok((question_from_model(model), created))
    }

    async fn find_question(&self, id: i64) -> Result<Option<GameQuestion>, PairServiceError> {
        let model = game_questions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find question by id")?;
        Ok(model.map(question_from_model))
    }

    async fn answer_voter_ids(&self, game_id: i64) -> Result<Vec<i64>, PairServiceError> {
        let models = game_answers::Entity::find()
            .filter(game_answers::Column::GameId.eq(game_id))
            .all(&self.db)
            .await
            .context("list answers for question")?;
        Ok(models.into_iter().map(|m| m.user_id).collect())
    }

    async fn upsert_answer(
        &self,
        game_id: i64,
        voter_id: i64,
        partner_id: i64,
        selected_option: i64,
    ) -> Result<(), PairServiceError> {
        let answer = game_answers::ActiveModel {
            game_id: Set(game_id),
            user_id: Set(voter_id),
            partner_id: Set(partner_id),
            selected_option: Set(selected_option),
        };
        game_answers::Entity::insert(answer)
            .on_conflict(
                OnConflict::columns([game_answers::Column::GameId, game_answers::Column::UserId])
                    .update_columns([game_answers::Column::SelectedOption])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert game answer")?;
        Ok(())
    }

    async fn total_matches(&self) -> Result<u64, PairServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct MatchTotalRow {
            total_matches: i64,
        }

        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*) AS total_matches
            FROM (
                SELECT game_id
                FROM game_answers
                GROUP BY game_id
                HAVING COUNT(*) = 2 AND COUNT(DISTINCT selected_option) = 1
            ) AS sub
            "#,
        );
        let row = MatchTotalRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .context("count total matches")?;
        Ok(row.map(|r| r.total_matches as u64).unwrap_or(0))
    }
}

fn question_from_model(model: game_questions::Model) -> GameQuestion {
    GameQuestion {
        id: model.id,
        creator_id: model.user_id,
        counterpart_id: model.partner_id,
        text: model.text,
        created_at: model.created_at,
    }
}

// ── Miss-you repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMissYouRepository {
    pub db: DatabaseConnection,
}

impl MissYouRepository for DbMissYouRepository {
    async fn record(&self, sender_id: i64, receiver_id: i64) -> Result<(), PairServiceError> {
        missyou::ActiveModel {
            id: NotSet,
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("record miss-you event")?;
        Ok(())
    }

    async fn total(&self, sender_id: i64, receiver_id: i64) -> Result<u64, PairServiceError> {
        let total = missyou::Entity::find()
            .filter(missyou::Column::SenderId.eq(sender_id))
            .filter(missyou::Column::ReceiverId.eq(receiver_id))
            .count(&self.db)
            .await
            .context("count miss-you events")?;
        Ok(total)
    }
}

// ── Notification log repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationLogRepository {
    pub db: DatabaseConnection,
}

impl NotificationLogRepository for DbNotificationLogRepository {
    async fn record(
        &self,
        sender_id: i64,
        receiver_id: i64,
        kind: &str,
    ) -> Result<(), PairServiceError> {
        notifications_logs::ActiveModel {
            id: NotSet,
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            kind: Set(kind.to_owned()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("record notification log")?;
        Ok(())
    }
}
