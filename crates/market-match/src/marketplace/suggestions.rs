use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::listing::{ListingFilter, ListingRepository, Requirement, RequirementId, RepositoryError};
use super::matching::{Matcher, ScoreComponent};

/// Number of suggestions shown next to a listing when the caller does not ask otherwise.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Owned suggestion handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub requirement: Requirement,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl Suggestion {
    /// Whether anything at all connects the suggestion to the target.
    pub fn is_relevant(&self) -> bool {
        self.score > 0.0
    }
}

/// Service selecting the candidate pool for a listing and ranking it.
pub struct SuggestionService<R> {
    repository: Arc<R>,
    matcher: Matcher,
}

impl<R> SuggestionService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>, matcher: Matcher) -> Self {
        Self {
            repository,
            matcher,
        }
    }

    /// Rank open requirements of the opposite type against `target_id`.
    pub fn suggest(
        &self,
        target_id: RequirementId,
        top_k: usize,
    ) -> Result<Vec<Suggestion>, SuggestionError> {
        let target = self
            .repository
            .fetch(target_id)?
            .ok_or(SuggestionError::TargetNotFound(target_id))?;

        let candidates = self
            .repository
            .list(&ListingFilter::open_of_type(target.req_type.opposite()))?
            .into_iter()
            .filter(|candidate| candidate.id != target.id)
            .collect::<Vec<_>>();

        let suggestions = self
            .matcher
            .rank(&target, &candidates, top_k)
            .into_iter()
            .map(|ranked| Suggestion {
                requirement: ranked.requirement.clone(),
                score: ranked.score,
                components: ranked.components,
            })
            .collect::<Vec<_>>();

        info!(
            requirement_id = target_id.0,
            pool = candidates.len(),
            returned = suggestions.len(),
            relevant = suggestions.iter().filter(|s| s.is_relevant()).count(),
            "ranked suggestions"
        );
        Ok(suggestions)
    }
}

/// Error raised by the suggestion service.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("requirement {0} not found")]
    TargetNotFound(RequirementId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
