use std::sync::Arc;

use super::common::*;
use crate::marketplace::listing::{
    ListingError, ListingFilter, ListingRepository, ListingService, RepositoryError,
    RequirementId, RequirementStatus, RequirementType, UserId,
};

#[test]
fn publish_trims_input_and_opens_the_requirement() {
    let (service, _) = listing_service();
    let mut payload = submission(
        5,
        RequirementType::Offer,
        "  Pallets de madera  ",
        " Medidas estándar 1.20 x 1.00 ",
    );
    payload.tags = "madera, logística,  ".to_string();
    payload.location = Some("  ".to_string());

    let stored = service.publish(payload, at(1, 8)).expect("publish succeeds");

    assert_eq!(stored.id, RequirementId(1));
    assert_eq!(stored.title, "Pallets de madera");
    assert_eq!(stored.description, "Medidas estándar 1.20 x 1.00");
    assert_eq!(stored.status, RequirementStatus::Open);
    assert_eq!(stored.tags.len(), 2);
    assert!(stored.location.is_none());
    assert_eq!(stored.created_at, Some(at(1, 8)));
    assert_eq!(stored.owner, UserId(5));
}

#[test]
fn publish_requires_title_and_description() {
    let (service, repository) = listing_service();

    let missing_title = submission(5, RequirementType::Need, "   ", "algo");
    match service.publish(missing_title, at(1, 8)) {
        Err(ListingError::MissingField("title")) => {}
        other => panic!("expected missing title, got {other:?}"),
    }

    let missing_description = submission(5, RequirementType::Need, "Harina", "");
    match service.publish(missing_description, at(1, 8)) {
        Err(ListingError::MissingField("description")) => {}
        other => panic!("expected missing description, got {other:?}"),
    }

    assert!(repository
        .list(&ListingFilter::default())
        .expect("list succeeds")
        .is_empty());
}

#[test]
fn closing_removes_requirement_from_open_search() {
    let (service, _) = seeded_catalog();

    let closed = service
        .close(RequirementId(2), at(6, 12))
        .expect("close succeeds");
    assert_eq!(closed.status, RequirementStatus::Closed);
    assert_eq!(closed.updated_at, Some(at(6, 12)));

    let open_offers = service
        .search(&ListingFilter::open_of_type(RequirementType::Offer))
        .expect("search succeeds");
    assert!(open_offers
        .iter()
        .all(|requirement| requirement.id != RequirementId(2)));

    let closed_only = service
        .search(&ListingFilter {
            status: Some(RequirementStatus::Closed),
            ..ListingFilter::default()
        })
        .expect("search succeeds");
    assert_eq!(closed_only.len(), 1);
}

#[test]
fn closing_unknown_requirement_reports_not_found() {
    let (service, _) = listing_service();

    match service.close(RequirementId(99), at(1, 1)) {
        Err(ListingError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn search_returns_newest_first() {
    let (service, _) = seeded_catalog();

    let offers = service
        .search(&ListingFilter::open_of_type(RequirementType::Offer))
        .expect("search succeeds");
    let ids = offers
        .iter()
        .map(|requirement| requirement.id.0)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![4, 3, 2]);

    let by_keyword = service
        .search(&ListingFilter {
            query: Some("tornillos".to_string()),
            ..ListingFilter::default()
        })
        .expect("search succeeds");
    assert_eq!(by_keyword.len(), 2);

    let by_chamber = service
        .search(&ListingFilter {
            chamber_id: Some(CORDOBA_CHAMBER),
            ..ListingFilter::default()
        })
        .expect("search succeeds");
    assert_eq!(by_chamber.len(), 1);
    assert_eq!(by_chamber[0].title, "Bulones de bronce");
}

#[test]
fn numbering_continues_after_existing_catalog() {
    let repository = Arc::new(MemoryListings::default());
    let service = ListingService::starting_after(repository, RequirementId(41));

    let stored = service
        .publish(
            submission(1, RequirementType::Need, "Cartón", "Planchas"),
            at(2, 2),
        )
        .expect("publish succeeds");

    assert_eq!(stored.id, RequirementId(42));
}

#[test]
fn repository_outage_is_reported() {
    let service = ListingService::new(Arc::new(UnavailableListings));

    let err = service
        .publish(
            submission(1, RequirementType::Need, "Cartón", "Planchas"),
            at(2, 2),
        )
        .expect_err("publish fails");

    assert!(matches!(
        err,
        ListingError::Repository(RepositoryError::Unavailable(_))
    ));
}
