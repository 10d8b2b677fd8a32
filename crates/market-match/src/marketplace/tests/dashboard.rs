use super::common::*;
use crate::marketplace::contacts::{ContactDecision, ContactRepository};
use crate::marketplace::dashboard::{ChamberCount, DashboardSummary};
use crate::marketplace::listing::{ListingFilter, ListingRepository, RequirementId, UserId};

#[test]
fn summary_counts_requirements_and_contacts() {
    let (listings, repository) = seeded_catalog();
    listings
        .close(RequirementId(4), at(9, 9))
        .expect("close succeeds");
    let (service, contacts) = contact_service(repository.clone());

    let accepted = service
        .request(UserId(10), RequirementId(2), at(9, 10))
        .expect("request succeeds");
    service
        .respond(accepted.id, ContactDecision::Accept, at(9, 11))
        .expect("accept succeeds");
    service
        .request(UserId(10), RequirementId(3), at(9, 12))
        .expect("request succeeds");

    let requirements = repository
        .list(&ListingFilter::default())
        .expect("list succeeds");
    let summary = DashboardSummary::collect(&requirements, &contacts.all().expect("all loads"));

    assert_eq!(summary.requirements_total, 4);
    assert_eq!(summary.requirements_open, 3);
    assert_eq!(summary.requirements_closed, 1);
    assert_eq!(summary.contacts_pending, 1);
    assert_eq!(summary.contacts_accepted, 1);
    assert_eq!(
        summary.by_chamber,
        vec![
            ChamberCount {
                chamber_id: Some(ROSARIO_CHAMBER),
                requirements: 3,
            },
            ChamberCount {
                chamber_id: Some(CORDOBA_CHAMBER),
                requirements: 1,
            },
        ]
    );
}

#[test]
fn empty_catalog_produces_zeroes() {
    let summary = DashboardSummary::collect(&[], &[]);

    assert_eq!(summary.requirements_total, 0);
    assert_eq!(summary.contacts_pending, 0);
    assert!(summary.by_chamber.is_empty());
}
