use duetto_pair::domain::types::PartnershipStatus;
use duetto_pair::error::PairServiceError;
use duetto_pair::usecase::missyou::{GetMissYouTotalUseCase, SendMissYouUseCase};

use crate::helpers::{InMemoryMissYou, InMemoryPartnerships, couple};

#[tokio::test]
async fn totals_are_tracked_per_direction() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users);
    partnerships.seed(1, 2, PartnershipStatus::Accepted);
    let missyou = InMemoryMissYou::new();

    let send = SendMissYouUseCase {
        partnerships: partnerships.clone(),
        missyou: missyou.clone(),
    };
    assert_eq!(send.execute(1).await.unwrap(), 1);
    assert_eq!(send.execute(1).await.unwrap(), 2);

    // bruno's own counter starts separately.
    assert_eq!(send.execute(2).await.unwrap(), 1);

    let total = GetMissYouTotalUseCase {
        partnerships,
        missyou,
    };
    assert_eq!(total.execute(1).await.unwrap(), 2);
    assert_eq!(total.execute(2).await.unwrap(), 1);
}

#[tokio::test]
async fn unpaired_sender_is_rejected() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users);
    let send = SendMissYouUseCase {
        partnerships,
        missyou: InMemoryMissYou::new(),
    };
    let result = send.execute(1).await;
    assert!(matches!(result, Err(PairServiceError::NoPartner)));
}
