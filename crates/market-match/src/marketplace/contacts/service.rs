use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use super::domain::{ContactDecision, ContactRequest, ContactRequestId, ContactStatus};
use super::repository::ContactRepository;
use crate::marketplace::listing::{ListingRepository, RepositoryError, RequirementId, UserId};

/// Service composing the contact store with the listing catalog it refers to.
pub struct ContactService<C, L> {
    contacts: Arc<C>,
    listings: Arc<L>,
    sequence: AtomicU64,
}

impl<C, L> ContactService<C, L>
where
    C: ContactRepository + 'static,
    L: ListingRepository + 'static,
{
    pub fn new(contacts: Arc<C>, listings: Arc<L>) -> Self {
        Self {
            contacts,
            listings,
            sequence: AtomicU64::new(1),
        }
    }

    /// Ask the publisher of `requirement_id` to share their contact details.
    pub fn request(
        &self,
        from_user: UserId,
        requirement_id: RequirementId,
        now: NaiveDateTime,
    ) -> Result<ContactRequest, ContactError> {
        let requirement = self
            .listings
            .fetch(requirement_id)?
            .ok_or(ContactError::RequirementNotFound(requirement_id))?;

        if requirement.owner == from_user {
            return Err(ContactError::OwnRequirement);
        }

        let duplicate = self.contacts.all()?.into_iter().any(|existing| {
            existing.from_user == from_user
                && existing.requirement_id == requirement_id
                && existing.is_pending()
        });
        if duplicate {
            return Err(ContactError::DuplicatePending);
        }

        let request = ContactRequest {
            id: ContactRequestId(self.sequence.fetch_add(1, Ordering::Relaxed)),
            from_user,
            to_user: requirement.owner,
            requirement_id,
            status: ContactStatus::Pending,
            created_at: now,
            responded_at: None,
        };
        let stored = self.contacts.insert(request)?;

        info!(
            action = "contact_request_created",
            request_id = stored.id.0,
            requirement_id = requirement_id.0,
            from = from_user.0,
            to = stored.to_user.0,
        );
        Ok(stored)
    }

    /// Accept or decline a pending request.
    pub fn respond(
        &self,
        request_id: ContactRequestId,
        decision: ContactDecision,
        now: NaiveDateTime,
    ) -> Result<ContactRequest, ContactError> {
        let mut request = self
            .contacts
            .fetch(request_id)?
            .ok_or(ContactError::RequestNotFound(request_id))?;

        if !request.is_pending() {
            return Err(ContactError::AlreadyResolved {
                status: request.status,
            });
        }

        request.status = decision.into();
        request.responded_at = Some(now);
        self.contacts.update(request.clone())?;

        info!(
            action = "contact_request_responded",
            request_id = request_id.0,
            decision = request.status.label(),
        );
        Ok(request)
    }

    /// Requests addressed to `user`, newest first.
    pub fn inbox(&self, user: UserId) -> Result<Vec<ContactRequest>, ContactError> {
        self.collect(|request| request.to_user == user)
    }

    /// Requests sent by `user`, newest first.
    pub fn sent(&self, user: UserId) -> Result<Vec<ContactRequest>, ContactError> {
        self.collect(|request| request.from_user == user)
    }

    /// Contact details are visible once a request between both members for
    /// this requirement has been accepted.
    pub fn can_view_contact(
        &self,
        user: UserId,
        other: UserId,
        requirement_id: RequirementId,
    ) -> Result<bool, ContactError> {
        Ok(self.contacts.all()?.iter().any(|request| {
            request.requirement_id == requirement_id
                && request.status == ContactStatus::Accepted
                && request.connects(user, other)
        }))
    }

    fn collect<F>(&self, keep: F) -> Result<Vec<ContactRequest>, ContactError>
    where
        F: Fn(&ContactRequest) -> bool,
    {
        let mut requests = self
            .contacts
            .all()?
            .into_iter()
            .filter(|request| keep(request))
            .collect::<Vec<_>>();
        requests.sort_by_key(|request| Reverse((request.created_at, request.id)));
        Ok(requests)
    }
}

/// Error raised by the contact service.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("requirement {0} not found")]
    RequirementNotFound(RequirementId),
    #[error("contact request {0:?} not found")]
    RequestNotFound(ContactRequestId),
    #[error("cannot request contact for your own requirement")]
    OwnRequirement,
    #[error("a pending request for this requirement already exists")]
    DuplicatePending,
    #[error("contact request already {}", status.label())]
    AlreadyResolved { status: ContactStatus },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
