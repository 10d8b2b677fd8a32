use super::common::*;
use crate::marketplace::contacts::{ContactDecision, ContactError, ContactStatus};
use crate::marketplace::listing::{RequirementId, UserId};

const BUYER: UserId = UserId(10);
const SELLER: UserId = UserId(20);
const OUTSIDER: UserId = UserId(99);

#[test]
fn request_is_addressed_to_the_publisher() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    let request = service
        .request(BUYER, RequirementId(2), at(8, 10))
        .expect("request succeeds");

    assert_eq!(request.from_user, BUYER);
    assert_eq!(request.to_user, SELLER);
    assert_eq!(request.status, ContactStatus::Pending);
    assert!(request.responded_at.is_none());
}

#[test]
fn duplicate_pending_request_is_refused_until_answered() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    let first = service
        .request(BUYER, RequirementId(2), at(8, 10))
        .expect("first request succeeds");
    match service.request(BUYER, RequirementId(2), at(8, 11)) {
        Err(ContactError::DuplicatePending) => {}
        other => panic!("expected duplicate pending, got {other:?}"),
    }

    service
        .respond(first.id, ContactDecision::Decline, at(8, 12))
        .expect("decline succeeds");
    service
        .request(BUYER, RequirementId(2), at(8, 13))
        .expect("new request allowed after decline");
}

#[test]
fn own_and_missing_requirements_are_rejected() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    assert!(matches!(
        service.request(SELLER, RequirementId(2), at(8, 10)),
        Err(ContactError::OwnRequirement)
    ));
    assert!(matches!(
        service.request(BUYER, RequirementId(77), at(8, 10)),
        Err(ContactError::RequirementNotFound(RequirementId(77)))
    ));
}

#[test]
fn accepted_request_unlocks_contact_both_ways() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    let request = service
        .request(BUYER, RequirementId(2), at(8, 10))
        .expect("request succeeds");
    assert!(!service
        .can_view_contact(BUYER, SELLER, RequirementId(2))
        .expect("lookup succeeds"));

    let answered = service
        .respond(request.id, ContactDecision::Accept, at(9, 9))
        .expect("accept succeeds");
    assert_eq!(answered.status, ContactStatus::Accepted);
    assert_eq!(answered.responded_at, Some(at(9, 9)));

    assert!(service
        .can_view_contact(BUYER, SELLER, RequirementId(2))
        .expect("lookup succeeds"));
    assert!(service
        .can_view_contact(SELLER, BUYER, RequirementId(2))
        .expect("lookup succeeds"));
    assert!(!service
        .can_view_contact(BUYER, SELLER, RequirementId(3))
        .expect("lookup succeeds"));
    assert!(!service
        .can_view_contact(OUTSIDER, SELLER, RequirementId(2))
        .expect("lookup succeeds"));
}

#[test]
fn resolved_requests_cannot_be_answered_again() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    let request = service
        .request(BUYER, RequirementId(2), at(8, 10))
        .expect("request succeeds");
    service
        .respond(request.id, ContactDecision::Accept, at(8, 11))
        .expect("accept succeeds");

    match service.respond(request.id, ContactDecision::Decline, at(8, 12)) {
        Err(ContactError::AlreadyResolved {
            status: ContactStatus::Accepted,
        }) => {}
        other => panic!("expected already resolved, got {other:?}"),
    }
}

#[test]
fn inbox_and_sent_are_newest_first() {
    let (_, listings) = seeded_catalog();
    let (service, _) = contact_service(listings);

    let older = service
        .request(BUYER, RequirementId(2), at(8, 10))
        .expect("request succeeds");
    let newer = service
        .request(BUYER, RequirementId(3), at(9, 10))
        .expect("request succeeds");
    service
        .request(OUTSIDER, RequirementId(2), at(10, 10))
        .expect("request succeeds");

    let sent = service.sent(BUYER).expect("sent loads");
    assert_eq!(
        sent.iter().map(|request| request.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    let inbox = service.inbox(SELLER).expect("inbox loads");
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].from_user, OUTSIDER);
    assert!(service.inbox(BUYER).expect("inbox loads").is_empty());
}
