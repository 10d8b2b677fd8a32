use super::domain::{ContactRequest, ContactRequestId};
use crate::marketplace::listing::RepositoryError;

/// Storage abstraction for contact requests.
pub trait ContactRepository: Send + Sync {
    fn insert(&self, request: ContactRequest) -> Result<ContactRequest, RepositoryError>;
    fn update(&self, request: ContactRequest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ContactRequestId) -> Result<Option<ContactRequest>, RepositoryError>;
    fn all(&self) -> Result<Vec<ContactRequest>, RepositoryError>;
}
