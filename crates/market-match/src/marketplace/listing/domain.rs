use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::marketplace::text::fold;

/// Identifier wrapper for published requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequirementId(pub u64);

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the member who published a requirement or requested a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier of the business chamber a requirement is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChamberId(pub u64);

/// Whether the member is offering something or looking for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    Offer,
    Need,
}

impl RequirementType {
    /// The type a requirement is matched against.
    pub const fn opposite(self) -> Self {
        match self {
            RequirementType::Offer => RequirementType::Need,
            RequirementType::Need => RequirementType::Offer,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RequirementType::Offer => "offer",
            RequirementType::Need => "need",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match fold(raw.trim()).as_str() {
            "offer" | "oferta" => Some(RequirementType::Offer),
            "need" | "necesidad" => Some(RequirementType::Need),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    Open,
    Closed,
}

impl RequirementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequirementStatus::Open => "open",
            RequirementStatus::Closed => "closed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match fold(raw.trim()).as_str() {
            "open" | "abierto" => Some(RequirementStatus::Open),
            "closed" | "cerrado" => Some(RequirementStatus::Closed),
            _ => None,
        }
    }
}

/// Ordinal urgency scale offered by the publishing form (Baja < Media < Alta < Crítica).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const fn ordinal(self) -> u8 {
        match self {
            Urgency::Low => 0,
            Urgency::Medium => 1,
            Urgency::High => 2,
            Urgency::Critical => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Baja",
            Urgency::Medium => "Media",
            Urgency::High => "Alta",
            Urgency::Critical => "Crítica",
        }
    }

    /// Lenient mapping of the free-text urgency column; unknown text yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match fold(raw.trim()).as_str() {
            "baja" | "low" => Some(Urgency::Low),
            "media" | "medium" => Some(Urgency::Medium),
            "alta" | "high" => Some(Urgency::High),
            "critica" | "critical" => Some(Urgency::Critical),
            _ => None,
        }
    }
}

/// Normalized labels parsed from the comma separated tags column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|tag| self.0.contains(&tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Joined form used for display and CSV export.
    pub fn joined(&self) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|tag| normalize_tag(tag.as_ref()))
                .collect(),
        )
    }
}

fn normalize_tag(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.to_lowercase())
    }
}

/// A posted offer or need, as consumed by search and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub req_type: RequirementType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    pub status: RequirementStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    pub owner: UserId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub chamber_id: Option<ChamberId>,
}

impl Requirement {
    pub fn is_open(&self) -> bool {
        self.status == RequirementStatus::Open
    }
}
