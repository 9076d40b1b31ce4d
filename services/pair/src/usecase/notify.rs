use crate::domain::repository::{NotificationLogRepository, PushDispatcher, UserRepository};
use crate::domain::types::User;
use crate::error::PairServiceError;

// ── SendNotification ─────────────────────────────────────────────────────────

pub struct SendNotificationInput {
    pub kind: String,
    /// Receiver lookup for `kind == "partner"`.
    pub username: Option<String>,
    pub code: Option<String>,
    /// Receiver lookup for every other kind.
    pub receiver_id: Option<i64>,
    pub title: String,
    pub body: String,
}

pub struct SendNotificationUseCase<U, L, D>
where
    U: UserRepository,
    L: NotificationLogRepository,
    D: PushDispatcher,
{
    pub users: U,
    pub logs: L,
    pub push: D,
}

impl<U, L, D> SendNotificationUseCase<U, L, D>
where
    U: UserRepository,
    L: NotificationLogRepository,
    D: PushDispatcher,
{
    pub async fn execute(
        &self,
        sender_id: i64,
        input: SendNotificationInput,
    ) -> Result<(), PairServiceError> {
        if input.title.trim().is_empty() || input.body.trim().is_empty() {
            return Err(PairServiceError::MissingData);
        }
        let receiver = self.resolve_receiver(&input).await?;
        let token = receiver
            .device_token
            .as_deref()
            .ok_or(PairServiceError::ReceiverUnreachable)?;
        // Transport failures must not fail the triggering request.
        if let Err(e) = self
            .push
            .dispatch(token, &input.title, &input.body, &input.kind, sender_id)
            .await
        {
            tracing::warn!(error = %e, receiver_id = receiver.id, "push dispatch failed");
        }
        self.logs.record(sender_id, receiver.id, &input.kind).await
    }

    async fn resolve_receiver(
        &self,
        input: &SendNotificationInput,
    ) -> Result<User, PairServiceError> {
        let receiver = if input.kind == "partner" {
            let (username, code) = match (&input.username, &input.code) {
                (Some(u), Some(c)) => (u, c),
                _ => return Err(PairServiceError::MissingData),
            };
            self.users.find_by_username_code(username, code).await?
        } else {
            let receiver_id = input.receiver_id.ok_or(PairServiceError::MissingData)?;
            self.users.find_by_id(receiver_id).await?
        };
        receiver.ok_or(PairServiceError::ReceiverUnreachable)
    }
}
