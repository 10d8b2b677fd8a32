use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE_WEIGHT: f64 = 3.0;
pub const DEFAULT_TAGS_WEIGHT: f64 = 2.0;
pub const DEFAULT_DESCRIPTION_WEIGHT: f64 = 1.0;
/// One shared title token under the default weights.
pub const DEFAULT_CATEGORY_BONUS: f64 = 3.0;
pub const DEFAULT_LOCATION_BONUS: f64 = 1.5;
/// Added once per urgency step above "Baja".
pub const DEFAULT_URGENCY_BOOST_SCALE: f64 = 0.5;

/// Tunable weights and bonuses for relevance scoring.
///
/// Missing keys fall back to the defaults when deserialized, so a weights
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub title_weight: f64,
    pub description_weight: f64,
    pub tags_weight: f64,
    pub category_bonus: f64,
    pub location_bonus: f64,
    pub urgency_boost_scale: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            title_weight: DEFAULT_TITLE_WEIGHT,
            description_weight: DEFAULT_DESCRIPTION_WEIGHT,
            tags_weight: DEFAULT_TAGS_WEIGHT,
            category_bonus: DEFAULT_CATEGORY_BONUS,
            location_bonus: DEFAULT_LOCATION_BONUS,
            urgency_boost_scale: DEFAULT_URGENCY_BOOST_SCALE,
        }
    }
}

impl MatchWeights {
    /// Scores stay non-negative only when every weight is finite and >= 0.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (field, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Invalid { field, value });
            }
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("title_weight", self.title_weight),
            ("description_weight", self.description_weight),
            ("tags_weight", self.tags_weight),
            ("category_bonus", self.category_bonus),
            ("location_bonus", self.location_bonus),
            ("urgency_boost_scale", self.urgency_boost_scale),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Invalid { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_rank_title_over_tags_over_description() {
        let weights = MatchWeights::default();
        assert!(weights.title_weight > weights.tags_weight);
        assert!(weights.tags_weight > weights.description_weight);
        assert!(weights.category_bonus > weights.location_bonus);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_keys() {
        let weights: MatchWeights =
            serde_json::from_str(r#"{ "category_bonus": 5.0 }"#).expect("weights parse");
        assert_eq!(weights.category_bonus, 5.0);
        assert_eq!(weights.title_weight, DEFAULT_TITLE_WEIGHT);
    }

    #[test]
    fn negative_weights_are_rejected() {
        let weights = MatchWeights {
            location_bonus: -1.0,
            ..MatchWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::Invalid {
                field: "location_bonus",
                value: -1.0
            })
        );
    }
}
