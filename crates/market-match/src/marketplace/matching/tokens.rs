use std::collections::{BTreeMap, BTreeSet};

use super::config::MatchWeights;
use crate::marketplace::listing::Requirement;
use crate::marketplace::text::fold;

/// Spanish function words that carry no product meaning. Stored folded.
const STOP_WORDS: &[&str] = &[
    "a", "al", "con", "de", "del", "e", "el", "en", "es", "la", "las", "lo", "los", "o", "para",
    "por", "que", "se", "sin", "su", "sus", "u", "un", "una", "unas", "unos", "y",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Folded alphanumeric runs with stop words removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty() && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Token frequencies for a single field.
pub(crate) fn token_bag(text: &str) -> BTreeMap<String, u32> {
    let mut bag = BTreeMap::new();
    for token in tokenize(text) {
        *bag.entry(token).or_insert(0) += 1;
    }
    bag
}

pub(crate) fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Field-weighted term map of one requirement.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TermProfile {
    terms: BTreeMap<String, f64>,
}

impl TermProfile {
    pub(crate) fn build(requirement: &Requirement, weights: &MatchWeights) -> Self {
        let mut profile = Self::default();
        profile.add_field(&requirement.title, weights.title_weight);
        profile.add_field(&requirement.tags.joined(), weights.tags_weight);
        profile.add_field(&requirement.description, weights.description_weight);
        profile
    }

    fn add_field(&mut self, text: &str, weight: f64) {
        if weight <= 0.0 {
            return;
        }
        for (token, frequency) in token_bag(text) {
            *self.terms.entry(token).or_insert(0.0) += weight * f64::from(frequency);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Weighted overlap: sum over shared terms of the smaller weight, taken in
    /// term order so repeated calls add up identically.
    pub(crate) fn overlap<'a>(&'a self, other: &TermProfile) -> (f64, Vec<&'a str>) {
        let mut total = 0.0;
        let mut shared = Vec::new();
        for (term, weight) in &self.terms {
            if let Some(other_weight) = other.terms.get(term) {
                total += weight.min(*other_weight);
                shared.push(term.as_str());
            }
        }
        (total, shared)
    }
}
