use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{ChamberId, Requirement, RequirementId, RequirementStatus, RequirementType};
use crate::marketplace::text::{fold, fold_label};

/// Storage abstraction so services can be exercised without a database.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, requirement: Requirement) -> Result<Requirement, RepositoryError>;
    fn update(&self, requirement: Requirement) -> Result<(), RepositoryError>;
    fn fetch(&self, id: RequirementId) -> Result<Option<Requirement>, RepositoryError>;
    /// Requirements accepted by `filter`, newest first.
    fn list(&self, filter: &ListingFilter) -> Result<Vec<Requirement>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Browse/search criteria. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub status: Option<RequirementStatus>,
    #[serde(default)]
    pub req_type: Option<RequirementType>,
    #[serde(default)]
    pub chamber_id: Option<ChamberId>,
    /// Free-text search over title, description, tags and company.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ListingFilter {
    /// Candidate pool for matching: open requirements of the given type.
    pub fn open_of_type(req_type: RequirementType) -> Self {
        Self {
            status: Some(RequirementStatus::Open),
            req_type: Some(req_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, requirement: &Requirement) -> bool {
        if self.status.is_some_and(|status| status != requirement.status) {
            return false;
        }
        if self
            .req_type
            .is_some_and(|req_type| req_type != requirement.req_type)
        {
            return false;
        }
        if self.chamber_id.is_some() && self.chamber_id != requirement.chamber_id {
            return false;
        }
        if !label_matches(self.category.as_deref(), requirement.category.as_deref()) {
            return false;
        }
        if !label_matches(self.location.as_deref(), requirement.location.as_deref()) {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = fold(query);
                [
                    requirement.title.as_str(),
                    requirement.description.as_str(),
                    requirement.tags.joined().as_str(),
                    requirement.company.as_str(),
                ]
                .iter()
                .any(|haystack| fold(haystack).contains(&needle))
            }
            _ => true,
        }
    }
}

fn label_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|value| !value.is_empty()) {
        None => true,
        Some(wanted) => actual.is_some_and(|actual| fold_label(actual) == fold_label(wanted)),
    }
}

/// Listing order shared by repositories: newest first, then by id.
pub fn newest_first(left: &Requirement, right: &Requirement) -> Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| left.id.cmp(&right.id))
}
