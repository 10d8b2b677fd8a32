use std::collections::BTreeSet;

use super::config::MatchWeights;
use super::tokens::{token_set, TermProfile};
use super::{MatchScore, MatchSignal, ScoreComponent};
use crate::marketplace::listing::Requirement;
use crate::marketplace::text::fold_label;

/// Pre-tokenized view of one requirement, built once per ranking call.
pub(crate) struct ScoringProfile {
    terms: TermProfile,
    category: Option<String>,
    location_tokens: BTreeSet<String>,
}

impl ScoringProfile {
    pub(crate) fn build(requirement: &Requirement, weights: &MatchWeights) -> Self {
        Self {
            terms: TermProfile::build(requirement, weights),
            category: requirement
                .category
                .as_deref()
                .map(fold_label)
                .filter(|label| !label.is_empty()),
            location_tokens: requirement
                .location
                .as_deref()
                .map(token_set)
                .unwrap_or_default(),
        }
    }

    pub(crate) fn has_text(&self) -> bool {
        !self.terms.is_empty()
    }
}

pub(crate) fn score_pair(
    target: &ScoringProfile,
    candidate: &Requirement,
    weights: &MatchWeights,
) -> MatchScore {
    let candidate_profile = ScoringProfile::build(candidate, weights);
    let mut components = Vec::new();
    let mut total = 0.0;

    let (lexical, shared) = target.terms.overlap(&candidate_profile.terms);
    let notes = if shared.is_empty() {
        "no shared vocabulary".to_string()
    } else {
        format!("shared terms: {}", shared.join(", "))
    };
    components.push(ScoreComponent {
        signal: MatchSignal::Lexical,
        score: lexical,
        notes,
    });
    total += lexical;

    if let (Some(wanted), Some(offered)) = (&target.category, &candidate_profile.category) {
        if wanted == offered {
            components.push(ScoreComponent {
                signal: MatchSignal::Category,
                score: weights.category_bonus,
                notes: format!("same category '{wanted}'"),
            });
            total += weights.category_bonus;
        }
    }

    let common_places = target
        .location_tokens
        .intersection(&candidate_profile.location_tokens)
        .map(String::as_str)
        .collect::<Vec<_>>();
    if !common_places.is_empty() {
        components.push(ScoreComponent {
            signal: MatchSignal::Location,
            score: weights.location_bonus,
            notes: format!("nearby: {}", common_places.join(", ")),
        });
        total += weights.location_bonus;
    }

    if let Some(urgency) = candidate.urgency {
        let steps = urgency.ordinal();
        if steps > 0 {
            let boost = weights.urgency_boost_scale * f64::from(steps);
            components.push(ScoreComponent {
                signal: MatchSignal::Urgency,
                score: boost,
                notes: format!("urgency {}", urgency.label()),
            });
            total += boost;
        }
    }

    MatchScore { total, components }
}
