use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use market_match::error::AppError;
use market_match::marketplace::contacts::{ContactRepository, ContactRequest, ContactRequestId};
use market_match::marketplace::listing::{
    newest_first, ListingFilter, ListingRepository, RepositoryError, Requirement, RequirementId,
    RequirementStatus, RequirementType,
};
use market_match::marketplace::matching::MatchWeights;

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    records: Arc<Mutex<HashMap<RequirementId, Requirement>>>,
}

impl InMemoryListingRepository {
    pub(crate) fn from_requirements(requirements: Vec<Requirement>) -> Self {
        let records = requirements
            .into_iter()
            .map(|requirement| (requirement.id, requirement))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Requirement> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut all = guard.values().cloned().collect::<Vec<_>>();
        all.sort_by(newest_first);
        all
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn insert(&self, requirement: Requirement) -> Result<Requirement, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&requirement.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(requirement.id, requirement.clone());
        Ok(requirement)
    }

    fn update(&self, requirement: Requirement) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&requirement.id) {
            guard.insert(requirement.id, requirement);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: RequirementId) -> Result<Option<Requirement>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self, filter: &ListingFilter) -> Result<Vec<Requirement>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut matches = guard
            .values()
            .filter(|requirement| filter.matches(requirement))
            .cloned()
            .collect::<Vec<_>>();
        matches.sort_by(newest_first);
        Ok(matches)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContactRepository {
    records: Arc<Mutex<HashMap<ContactRequestId, ContactRequest>>>,
}

impl ContactRepository for InMemoryContactRepository {
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
        if guard.contains_key(&request.id) {
            guard.insert(request.id, request);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
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

/// Reads a JSON weights profile; keys that are left out keep their defaults.
pub(crate) fn load_weights(path: Option<&Path>) -> Result<MatchWeights, AppError> {
    let weights = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<MatchWeights>(&raw)?
        }
        None => MatchWeights::default(),
    };
    weights.validate()?;
    Ok(weights)
}

pub(crate) fn load_contacts(path: Option<&Path>) -> Result<Vec<ContactRequest>, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Vec::new()),
    }
}

pub(crate) fn parse_req_type(raw: &str) -> Result<RequirementType, String> {
    RequirementType::parse(raw).ok_or_else(|| format!("'{raw}' is not one of offer, need"))
}

pub(crate) fn parse_status(raw: &str) -> Result<RequirementStatus, String> {
    RequirementStatus::parse(raw).ok_or_else(|| format!("'{raw}' is not one of open, closed"))
}
