use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    ChamberId, Requirement, RequirementId, RequirementStatus, RequirementType, TagSet, Urgency,
    UserId,
};
use super::repository::{ListingFilter, ListingRepository, RepositoryError};
use crate::marketplace::text::non_blank;

/// Payload submitted by a member through the publishing form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequirement {
    pub owner: UserId,
    pub company: String,
    pub chamber_id: Option<ChamberId>,
    pub req_type: RequirementType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
}

/// Service owning the publish/browse/close lifecycle of requirements.
pub struct ListingService<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::starting_after(repository, RequirementId(0))
    }

    /// Continue numbering after an already populated catalog.
    pub fn starting_after(repository: Arc<R>, last: RequirementId) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(last.0 + 1),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Publish a new open requirement. Title and description are mandatory.
    pub fn publish(
        &self,
        submission: NewRequirement,
        now: NaiveDateTime,
    ) -> Result<Requirement, ListingError> {
        let title = submission.title.trim().to_string();
        if title.is_empty() {
            return Err(ListingError::MissingField("title"));
        }
        let description = submission.description.trim().to_string();
        if description.is_empty() {
            return Err(ListingError::MissingField("description"));
        }

        let id = RequirementId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let requirement = Requirement {
            id,
            req_type: submission.req_type,
            title,
            description,
            tags: TagSet::parse(&submission.tags),
            category: non_blank(submission.category.as_deref()),
            location: non_blank(submission.location.as_deref()),
            urgency: submission.urgency,
            status: RequirementStatus::Open,
            created_at: Some(now),
            updated_at: Some(now),
            owner: submission.owner,
            company: submission.company.trim().to_string(),
            chamber_id: submission.chamber_id,
        };

        let stored = self.repository.insert(requirement)?;
        info!(
            action = "requirement_created",
            requirement_id = stored.id.0,
            owner = stored.owner.0,
            req_type = stored.req_type.label(),
            title = %truncate(&stored.title, 80),
        );
        Ok(stored)
    }

    /// Close a requirement so it no longer shows up as a match candidate.
    pub fn close(&self, id: RequirementId, now: NaiveDateTime) -> Result<Requirement, ListingError> {
        let mut requirement = self.get(id)?;
        requirement.status = RequirementStatus::Closed;
        requirement.updated_at = Some(now);
        self.repository.update(requirement.clone())?;

        info!(action = "requirement_closed", requirement_id = id.0);
        Ok(requirement)
    }

    pub fn get(&self, id: RequirementId) -> Result<Requirement, ListingError> {
        self.repository
            .fetch(id)?
            .ok_or(ListingError::Repository(RepositoryError::NotFound))
    }

    pub fn search(&self, filter: &ListingFilter) -> Result<Vec<Requirement>, ListingError> {
        Ok(self.repository.list(filter)?)
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("requirement {0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
