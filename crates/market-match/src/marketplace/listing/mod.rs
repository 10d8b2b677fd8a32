//! Requirement catalog: typed model, intake conversion and the publish/search service.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod service;

pub use domain::{
    ChamberId, Requirement, RequirementId, RequirementStatus, RequirementType, TagSet, Urgency,
    UserId,
};
pub use intake::{IntakeError, RequirementRecord};
pub use repository::{newest_first, ListingFilter, ListingRepository, RepositoryError};
pub use service::{ListingError, ListingService, NewRequirement};
