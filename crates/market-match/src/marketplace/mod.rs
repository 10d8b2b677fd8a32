//! Offers/needs catalog for member businesses: listings, relevance matching,
//! suggestions and the gated contact exchange.

pub mod contacts;
pub mod dashboard;
pub mod import;
pub mod listing;
pub mod matching;
pub mod suggestions;
mod text;

#[cfg(test)]
mod tests;

pub use listing::{
    ChamberId, ListingFilter, ListingRepository, Requirement, RequirementId, RequirementStatus,
    RequirementType, TagSet, Urgency, UserId,
};
pub use matching::{MatchWeights, Matcher, RankedMatch};
pub use suggestions::{Suggestion, SuggestionService};
