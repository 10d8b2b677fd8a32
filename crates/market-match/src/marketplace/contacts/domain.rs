use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::marketplace::listing::{RequirementId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactRequestId(pub u64);

/// Lifecycle of a contact request. Only pending requests can be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Pending,
    Accepted,
    Declined,
}

impl ContactStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Accepted => "accepted",
            ContactStatus::Declined => "declined",
        }
    }
}

/// Answer given by the owner of the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactDecision {
    Accept,
    Decline,
}

impl From<ContactDecision> for ContactStatus {
    fn from(decision: ContactDecision) -> Self {
        match decision {
            ContactDecision::Accept => ContactStatus::Accepted,
            ContactDecision::Decline => ContactStatus::Declined,
        }
    }
}

/// Request from one member to see the contact details behind a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: ContactRequestId,
    pub from_user: UserId,
    pub to_user: UserId,
    pub requirement_id: RequirementId,
    pub status: ContactStatus,
    pub created_at: NaiveDateTime,
    pub responded_at: Option<NaiveDateTime>,
}

impl ContactRequest {
    pub fn is_pending(&self) -> bool {
        self.status == ContactStatus::Pending
    }

    /// Whether this request links `a` and `b`, in either direction.
    pub fn connects(&self, a: UserId, b: UserId) -> bool {
        (self.from_user == a && self.to_user == b) || (self.from_user == b && self.to_user == a)
    }
}
