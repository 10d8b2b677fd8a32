use std::collections::BTreeMap;

use serde::Serialize;

use super::contacts::{ContactRequest, ContactStatus};
use super::listing::{ChamberId, Requirement, RequirementStatus};

/// Counters shown on the control panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub requirements_total: usize,
    pub requirements_open: usize,
    pub requirements_closed: usize,
    pub contacts_pending: usize,
    pub contacts_accepted: usize,
    pub by_chamber: Vec<ChamberCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChamberCount {
    /// `None` groups requirements without a chamber.
    pub chamber_id: Option<ChamberId>,
    pub requirements: usize,
}

impl DashboardSummary {
    pub fn collect(requirements: &[Requirement], contacts: &[ContactRequest]) -> Self {
        let count_status = |status: RequirementStatus| {
            requirements
                .iter()
                .filter(|requirement| requirement.status == status)
                .count()
        };
        let count_contacts = |status: ContactStatus| {
            contacts
                .iter()
                .filter(|request| request.status == status)
                .count()
        };

        let mut per_chamber: BTreeMap<Option<ChamberId>, usize> = BTreeMap::new();
        for requirement in requirements {
            *per_chamber.entry(requirement.chamber_id).or_default() += 1;
        }
        let mut by_chamber = per_chamber
            .into_iter()
            .map(|(chamber_id, requirements)| ChamberCount {
                chamber_id,
                requirements,
            })
            .collect::<Vec<_>>();
        // BTreeMap iteration already orders chambers; the stable sort keeps that on ties.
        by_chamber.sort_by(|left, right| right.requirements.cmp(&left.requirements));

        Self {
            requirements_total: requirements.len(),
            requirements_open: count_status(RequirementStatus::Open),
            requirements_closed: count_status(RequirementStatus::Closed),
            contacts_pending: count_contacts(ContactStatus::Pending),
            contacts_accepted: count_contacts(ContactStatus::Accepted),
            by_chamber,
        }
    }
}
