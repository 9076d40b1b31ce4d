use duetto_pair::domain::repository::PartnershipRepository as _;
use duetto_pair::domain::types::PartnershipStatus;
use duetto_pair::error::PairServiceError;
use duetto_pair::usecase::partnership::{
    AcceptRequestUseCase, GetPartnershipUseCase, RejectRequestUseCase, SearchUsersUseCase,
    SendRequestInput, SendRequestUseCase,
};

use crate::helpers::{InMemoryPartnerships, InMemoryUsers, couple, test_user};

fn request_to(username: &str, code: &str) -> SendRequestInput {
    SendRequestInput {
        partner_username: username.to_owned(),
        partner_code: code.to_owned(),
    }
}

// ── Request → accept lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn request_then_accept_links_both_sides() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users.clone());

    let send = SendRequestUseCase {
        users: users.clone(),
        partnerships: partnerships.clone(),
    };
    send.execute(1, request_to("bruno", "222222")).await.unwrap();

    // Until acceptance nobody has a partner.
    assert_eq!(partnerships.partner_id(1).await.unwrap(), None);

    let accept = AcceptRequestUseCase {
        partnerships: partnerships.clone(),
    };
    accept.execute(2, 1).await.unwrap();

    // Symmetric resolution from both sides.
    assert_eq!(partnerships.partner_id(1).await.unwrap(), Some(2));
    assert_eq!(partnerships.partner_id(2).await.unwrap(), Some(1));
}

#[tokio::test]
async fn overview_reflects_pending_and_accepted_states() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users.clone());
    partnerships.seed(1, 2, PartnershipStatus::Pending);

    let overview_uc = GetPartnershipUseCase {
        partnerships: partnerships.clone(),
    };

    let bruno_view = overview_uc.execute(2).await.unwrap();
    assert!(bruno_view.partner.is_none());
    assert_eq!(bruno_view.received.len(), 1);
    assert_eq!(bruno_view.received[0].username, "alba");
    assert!(bruno_view.sent.is_empty());

    let alba_view = overview_uc.execute(1).await.unwrap();
    assert_eq!(alba_view.sent.len(), 1);
    assert_eq!(alba_view.sent[0].username, "bruno");

    AcceptRequestUseCase {
        partnerships: partnerships.clone(),
    }
    .execute(2, 1)
    .await
    .unwrap();

    let after = overview_uc.execute(2).await.unwrap();
    let partner = after.partner.unwrap();
    assert_eq!(partner.id, 1);
    assert_eq!(partner.username, "alba");
    assert!(after.received.is_empty());
}

// ── Invariants ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn paired_requester_gets_conflict_and_no_row() {
    let users = InMemoryUsers::new(vec![
        test_user(1, "alba", "111111"),
        test_user(2, "bruno", "222222"),
        test_user(3, "carla", "333333"),
    ]);
    let partnerships = InMemoryPartnerships::new(users.clone());
    partnerships.seed(1, 2, PartnershipStatus::Accepted);

    let send = SendRequestUseCase {
        users,
        partnerships: partnerships.clone(),
    };
    let result = send.execute(1, request_to("carla", "333333")).await;
    assert!(matches!(result, Err(PairServiceError::AlreadyPaired)));
    assert_eq!(partnerships.edge_count(), 1);
}

#[tokio::test]
async fn second_acceptance_cannot_create_a_second_partner() {
    let users = InMemoryUsers::new(vec![
        test_user(1, "alba", "111111"),
        test_user(2, "bruno", "222222"),
        test_user(3, "carla", "333333"),
    ]);
    let partnerships = InMemoryPartnerships::new(users.clone());
    // bruno received requests from both alba and carla, then accepted alba.
    partnerships.seed(1, 2, PartnershipStatus::Pending);
    partnerships.seed(3, 2, PartnershipStatus::Pending);

    let accept = AcceptRequestUseCase {
        partnerships: partnerships.clone(),
    };
    accept.execute(2, 1).await.unwrap();

    let result = accept.execute(2, 3).await;
    assert!(matches!(result, Err(PairServiceError::AlreadyPaired)));
    // bruno still has exactly one partner.
    assert_eq!(partnerships.partner_id(2).await.unwrap(), Some(1));
}

#[tokio::test]
async fn accepting_a_missing_request_mutates_nothing() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users);
    let accept = AcceptRequestUseCase {
        partnerships: partnerships.clone(),
    };
    let result = accept.execute(2, 1).await;
    assert!(matches!(result, Err(PairServiceError::RequestNotFound)));
    assert_eq!(partnerships.edge_count(), 0);
}

#[tokio::test]
async fn duplicate_pending_request_is_rejected() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users.clone());
    let send = SendRequestUseCase {
        users,
        partnerships: partnerships.clone(),
    };
    send.execute(1, request_to("bruno", "222222")).await.unwrap();
    let result = send.execute(1, request_to("bruno", "222222")).await;
    assert!(matches!(result, Err(PairServiceError::RequestAlreadyPending)));
    assert_eq!(partnerships.edge_count(), 1);
}

#[tokio::test]
async fn rejecting_removes_the_pending_edge() {
    let users = couple();
    let partnerships = InMemoryPartnerships::new(users);
    partnerships.seed(1, 2, PartnershipStatus::Pending);

    let reject = RejectRequestUseCase {
        partnerships: partnerships.clone(),
    };
    reject.execute(2, 1).await.unwrap();
    assert_eq!(partnerships.edge_count(), 0);

    // A second rejection finds nothing.
    let result = reject.execute(2, 1).await;
    assert!(matches!(result, Err(PairServiceError::RequestNotFound)));
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_is_bounded_and_requires_criteria() {
    let mut many = vec![];
    for id in 1..=30 {
        many.push(test_user(id, &format!("user{id}"), &format!("{:06}", id)));
    }
    let users = InMemoryUsers::new(many);
    let search = SearchUsersUseCase { users };

    let empty = search.execute(None, None).await.unwrap();
    assert!(empty.is_empty());

    let bounded = search.execute(Some("user".to_owned()), None).await.unwrap();
    assert_eq!(bounded.len(), 20);
}
