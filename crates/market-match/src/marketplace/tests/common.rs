use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use crate::marketplace::contacts::{
    ContactRepository, ContactRequest, ContactRequestId, ContactService,
};
use crate::marketplace::listing::{
    newest_first, ChamberId, ListingFilter, ListingRepository, ListingService, NewRequirement,
    RepositoryError, Requirement, RequirementId, RequirementType, UserId,
};

#[derive(Default)]
pub(super) struct MemoryListings {
    records: Mutex<BTreeMap<RequirementId, Requirement>>,
}

impl ListingRepository for MemoryListings {
    fn insert(&self, requirement: Requirement) -> Result<Requirement, RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        if guard.contains_key(&requirement.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(requirement.id, requirement.clone());
        Ok(requirement)
    }

    fn update(&self, requirement: Requirement) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        match guard.get_mut(&requirement.id) {
            Some(existing) => {
                *existing = requirement;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: RequirementId) -> Result<Option<Requirement>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self, filter: &ListingFilter) -> Result<Vec<Requirement>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        let mut matches = guard
            .values()
            .filter(|requirement| filter.matches(requirement))
            .cloned()
            .collect::<Vec<_>>();
        matches.sort_by(newest_first);
        Ok(matches)
    }
}

/// Repository whose backend is always down.
pub(super) struct UnavailableListings;

impl ListingRepository for UnavailableListings {
    fn insert(&self, _requirement: Requirement) -> Result<Requirement, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _requirement: Requirement) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: RequirementId) -> Result<Option<Requirement>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ListingFilter) -> Result<Vec<Requirement>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryContacts {
    records: Mutex<BTreeMap<ContactRequestId, ContactRequest>>,
}

impl ContactRepository for MemoryContacts {
    fn insert(&self, request: ContactRequest) -> Result<ContactRequest, RepositoryError> {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    fn update(&self, request: ContactRequest) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        match guard.get_mut(&request.id) {
            Some(existing) => {
                *existing = request;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: ContactRequestId) -> Result<Option<ContactRequest>, RepositoryError> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<ContactRequest>, RepositoryError> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub(super) const ROSARIO_CHAMBER: ChamberId = ChamberId(1);
pub(super) const CORDOBA_CHAMBER: ChamberId = ChamberId(2);

pub(super) fn submission(
    owner: u64,
    req_type: RequirementType,
    title: &str,
    description: &str,
) -> NewRequirement {
    NewRequirement {
        owner: UserId(owner),
        company: format!("Empresa {owner}"),
        chamber_id: Some(ROSARIO_CHAMBER),
        req_type,
        title: title.to_string(),
        description: description.to_string(),
        tags: String::new(),
        category: None,
        location: None,
        urgency: None,
    }
}

pub(super) fn listing_service() -> (ListingService<MemoryListings>, Arc<MemoryListings>) {
    let repository = Arc::new(MemoryListings::default());
    (ListingService::new(repository.clone()), repository)
}

/// Catalog with one need and three offers of varying relevance.
pub(super) fn seeded_catalog() -> (ListingService<MemoryListings>, Arc<MemoryListings>) {
    let (service, repository) = listing_service();

    let mut need = submission(
        10,
        RequirementType::Need,
        "Tornillos M6 acero inoxidable",
        "Necesitamos 5000 unidades para línea de montaje",
    );
    need.category = Some("Ferretería".to_string());
    need.location = Some("Rosario".to_string());
    service.publish(need, at(1, 9)).expect("need publishes");

    let mut close = submission(
        20,
        RequirementType::Offer,
        "Tornillos M6 inox",
        "Stock permanente de tornillería inoxidable",
    );
    close.category = Some("Ferretería".to_string());
    close.location = Some("Rosario".to_string());
    close.tags = "tornillos, acero".to_string();
    service.publish(close, at(2, 9)).expect("offer publishes");

    let mut weak = submission(
        30,
        RequirementType::Offer,
        "Bulones de bronce",
        "Fabricación a pedido",
    );
    weak.category = Some("Ferretería".to_string());
    weak.location = Some("Córdoba".to_string());
    weak.chamber_id = Some(CORDOBA_CHAMBER);
    service.publish(weak, at(3, 9)).expect("offer publishes");

    let unrelated = submission(
        40,
        RequirementType::Offer,
        "Servicio de catering",
        "Eventos corporativos",
    );
    service.publish(unrelated, at(4, 9)).expect("offer publishes");

    (service, repository)
}

pub(super) fn contact_service(
    listings: Arc<MemoryListings>,
) -> (ContactService<MemoryContacts, MemoryListings>, Arc<MemoryContacts>) {
    let contacts = Arc::new(MemoryContacts::default());
    (ContactService::new(contacts.clone(), listings), contacts)
}
