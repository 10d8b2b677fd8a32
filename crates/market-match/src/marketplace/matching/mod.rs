//! Relevance ranking of opposite-type requirements.
//!
//! Scoring is lexical and attribute based: a field-weighted token overlap plus
//! fixed bonuses for a shared category, a shared place name and the candidate's
//! urgency. Every contribution is reported as a [`ScoreComponent`] so a
//! suggestion can always be explained.

mod config;
mod rules;
mod tokens;

pub use config::{
    MatchWeights, WeightsError, DEFAULT_CATEGORY_BONUS, DEFAULT_DESCRIPTION_WEIGHT,
    DEFAULT_LOCATION_BONUS, DEFAULT_TAGS_WEIGHT, DEFAULT_TITLE_WEIGHT,
    DEFAULT_URGENCY_BOOST_SCALE,
};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::marketplace::listing::Requirement;
use rules::{score_pair, ScoringProfile};

/// Stateless ranker applying a weight profile to candidate requirements.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: MatchWeights,
}

impl Matcher {
    /// Rejects negative or non-finite weights, which would break the
    /// non-negative score ordering.
    pub fn new(weights: MatchWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score breakdown for a single pair, regardless of type or identity.
    pub fn score(&self, target: &Requirement, candidate: &Requirement) -> MatchScore {
        let profile = ScoringProfile::build(target, &self.weights);
        score_pair(&profile, candidate, &self.weights)
    }

    /// Rank `candidates` against `target`, best first, keeping at most `top_k`.
    ///
    /// Candidates of the target's own type or carrying the target's id are
    /// skipped. Zero-score candidates are kept; dropping them is up to the
    /// caller.
    pub fn rank<'a>(
        &self,
        target: &Requirement,
        candidates: &'a [Requirement],
        top_k: usize,
    ) -> Vec<RankedMatch<'a>> {
        if top_k == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let profile = ScoringProfile::build(target, &self.weights);
        if !profile.has_text() {
            debug!(
                requirement_id = target.id.0,
                "target has no searchable text, ranking on bonuses only"
            );
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate.id == target.id || candidate.req_type == target.req_type {
                debug!(
                    target_id = target.id.0,
                    candidate_id = candidate.id.0,
                    "skipping ineligible candidate"
                );
                continue;
            }

            let MatchScore { total, components } = score_pair(&profile, candidate, &self.weights);
            ranked.push(RankedMatch {
                requirement: candidate,
                score: total,
                components,
            });
        }

        ranked.sort_by(RankedMatch::ranking_order);
        ranked.truncate(top_k);
        ranked
    }
}

/// One-shot ranking with an explicit weight profile.
pub fn rank<'a>(
    target: &Requirement,
    candidates: &'a [Requirement],
    top_k: usize,
    weights: &MatchWeights,
) -> Result<Vec<RankedMatch<'a>>, WeightsError> {
    Ok(Matcher::new(*weights)?.rank(target, candidates, top_k))
}

/// Signals contributing to a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    Lexical,
    Category,
    Location,
    Urgency,
}

impl MatchSignal {
    pub const fn label(self) -> &'static str {
        match self {
            MatchSignal::Lexical => "lexical",
            MatchSignal::Category => "category",
            MatchSignal::Location => "location",
            MatchSignal::Urgency => "urgency",
        }
    }
}

/// Discrete contribution to a score, kept for transparent suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub signal: MatchSignal,
    pub score: f64,
    pub notes: String,
}

/// Aggregate score of a target/candidate pair and its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}

impl MatchScore {
    pub fn component(&self, signal: MatchSignal) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.signal == signal)
    }
}

/// Candidate borrowed from the caller's pool together with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<'a> {
    pub requirement: &'a Requirement,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl RankedMatch<'_> {
    /// Score descending, then newest `created_at` (missing timestamps last),
    /// then ascending id.
    fn ranking_order(left: &Self, right: &Self) -> Ordering {
        right
            .score
            .total_cmp(&left.score)
            .then_with(|| right.requirement.created_at.cmp(&left.requirement.created_at))
            .then_with(|| left.requirement.id.cmp(&right.requirement.id))
    }
}
