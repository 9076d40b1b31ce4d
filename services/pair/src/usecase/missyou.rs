use crate::domain::repository::{MissYouRepository, PartnershipRepository};
use crate::error::PairServiceError;

// ── SendMissYou ──────────────────────────────────────────────────────────────

pub struct SendMissYouUseCase<P: PartnershipRepository, M: MissYouRepository> {
    pub partnerships: P,
    pub missyou: M,
}

impl<P: PartnershipRepository, M: MissYouRepository> SendMissYouUseCase<P, M> {
    /// Record a miss-you event towards the partner and return the running
    /// sender→partner total.
    pub async fn execute(&self, sender_id: i64) -> Result<u64, PairServiceError> {
        let receiver_id = self
            .partnerships
            .partner_id(sender_id)
            .await?
            .ok_or(PairServiceError::NoPartner)?;
        self.missyou.record(sender_id, receiver_id).await?;
        self.missyou.total(sender_id, receiver_id).await
    }
}

// ── GetMissYouTotal ──────────────────────────────────────────────────────────

pub struct GetMissYouTotalUseCase<P: PartnershipRepository, M: MissYouRepository> {
    pub partnerships: P,
    pub missyou: M,
}

impl<P: PartnershipRepository, M: MissYouRepository> GetMissYouTotalUseCase<P, M> {
    pub async fn execute(&self, sender_id: i64) -> Result<u64, PairServiceError> {
        let receiver_id = self
            .partnerships
            .partner_id(sender_id)
            .await?
            .ok_or(PairServiceError::NoPartner)?;
        self.missyou.total(sender_id, receiver_id).await
    }
}
