use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::domain::{
    ChamberId, Requirement, RequirementId, RequirementStatus, RequirementType, TagSet, Urgency,
    UserId,
};
use crate::marketplace::text::non_blank;

/// Loose row shape handed over by the listing store or a CSV export.
///
/// Every column except the identifiers is plain text; conversion into
/// [`Requirement`] is where the lenient parsing happens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementRecord {
    pub id: u64,
    pub req_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub chamber_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("requirement {id}: unknown requirement type '{value}'")]
    UnknownType { id: u64, value: String },
    #[error("requirement {id}: unknown status '{value}'")]
    UnknownStatus { id: u64, value: String },
    #[error("requirement {id}: invalid {field} timestamp '{value}'")]
    InvalidTimestamp {
        id: u64,
        field: &'static str,
        value: String,
    },
}

impl TryFrom<RequirementRecord> for Requirement {
    type Error = IntakeError;

    fn try_from(record: RequirementRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        let req_type =
            RequirementType::parse(&record.req_type).ok_or_else(|| IntakeError::UnknownType {
                id,
                value: record.req_type.clone(),
            })?;

        let status = match record.status.as_deref() {
            None => RequirementStatus::Open,
            Some(raw) => {
                RequirementStatus::parse(raw).ok_or_else(|| IntakeError::UnknownStatus {
                    id,
                    value: raw.to_string(),
                })?
            }
        };

        let urgency = record.urgency.as_deref().and_then(|raw| {
            let parsed = Urgency::parse(raw);
            if parsed.is_none() {
                tracing::debug!(requirement_id = id, urgency = raw, "ignoring unknown urgency");
            }
            parsed
        });

        let created_at = parse_optional_timestamp(id, "created_at", record.created_at.as_deref())?;
        let updated_at = parse_optional_timestamp(id, "updated_at", record.updated_at.as_deref())?;

        Ok(Requirement {
            id: RequirementId(id),
            req_type,
            title: record.title.trim().to_string(),
            description: record.description.trim().to_string(),
            tags: record
                .tags
                .as_deref()
                .map(TagSet::parse)
                .unwrap_or_default(),
            category: non_blank(record.category.as_deref()),
            location: non_blank(record.location.as_deref()),
            urgency,
            status,
            created_at,
            updated_at,
            owner: UserId(record.user_id),
            company: record.company.trim().to_string(),
            chamber_id: record.chamber_id.map(ChamberId),
        })
    }
}

fn parse_optional_timestamp(
    id: u64,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDateTime>, IntakeError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| IntakeError::InvalidTimestamp {
                id,
                field,
                value: value.to_string(),
            }),
    }
}

/// Accepts RFC 3339, ISO-8601 without offset (seconds precision), a space
/// separated variant and bare dates.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
