//! Gated contact exchange: a member asks for the publisher's details and the
//! publisher accepts or declines.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{ContactDecision, ContactRequest, ContactRequestId, ContactStatus};
pub use repository::ContactRepository;
pub use service::{ContactError, ContactService};
