use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use market_match::config::AppConfig;
use market_match::error::AppError;
use market_match::marketplace::dashboard::DashboardSummary;
use market_match::marketplace::import::CatalogImporter;
use market_match::marketplace::listing::{
    ChamberId, ListingFilter, ListingService, Requirement, RequirementId, RequirementStatus,
    RequirementType,
};
use market_match::marketplace::suggestions::{Suggestion, SuggestionService};
use market_match::marketplace::Matcher;
use tracing::info;

use crate::infra::{
    load_contacts, load_weights, parse_req_type, parse_status, InMemoryListingRepository,
};

#[derive(Args, Debug)]
pub(crate) struct SuggestArgs {
    /// CSV export of the requirements catalog
    #[arg(long)]
    catalog: PathBuf,
    /// Requirement to find counterparts for
    #[arg(long)]
    id: u64,
    /// Number of suggestions (defaults to APP_SUGGESTION_LIMIT)
    #[arg(long)]
    top_k: Option<usize>,
    /// JSON file overriding the default scoring weights
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Hide suggestions that share nothing with the target
    #[arg(long)]
    relevant_only: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    #[arg(long)]
    catalog: PathBuf,
    /// Free text matched against title, description, tags and company
    #[arg(long)]
    query: Option<String>,
    #[arg(long = "type", value_parser = parse_req_type)]
    req_type: Option<RequirementType>,
    #[arg(long, value_parser = parse_status)]
    status: Option<RequirementStatus>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    chamber: Option<u64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    #[arg(long)]
    catalog: PathBuf,
    /// JSON array of contact requests to include in the counters
    #[arg(long)]
    contacts: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

pub(crate) fn run_suggest(args: SuggestArgs, config: &AppConfig) -> Result<(), AppError> {
    let weights = load_weights(args.weights.as_deref())?;
    let catalog = CatalogImporter::from_path(&args.catalog)?;
    info!(path = %args.catalog.display(), requirements = catalog.len(), "catalog loaded");

    let target_id = RequirementId(args.id);
    let top_k = args.top_k.unwrap_or(config.matching.suggestion_limit);
    let repository = Arc::new(InMemoryListingRepository::from_requirements(catalog));
    let service = SuggestionService::new(Arc::clone(&repository), Matcher::new(weights)?);

    let mut suggestions = service.suggest(target_id, top_k)?;
    if args.relevant_only {
        suggestions.retain(Suggestion::is_relevant);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.iter().all(|suggestion| !suggestion.is_relevant()) {
        println!("No suggestions yet for requirement {}.", target_id);
        return Ok(());
    }

    println!("Suggestions for requirement {} (top {})", target_id, top_k);
    for (position, suggestion) in suggestions.iter().enumerate() {
        print_suggestion(position + 1, suggestion);
    }
    Ok(())
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let catalog = CatalogImporter::from_path(&args.catalog)?;
    let repository = Arc::new(InMemoryListingRepository::from_requirements(catalog));
    let service = ListingService::new(repository);

    let filter = ListingFilter {
        status: args.status,
        req_type: args.req_type,
        chamber_id: args.chamber.map(ChamberId),
        query: args.query,
        category: args.category,
        location: args.location,
    };
    let results = service.search(&filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{} requirement(s) found", results.len());
    for requirement in &results {
        print_requirement(requirement);
    }
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let catalog = CatalogImporter::from_path(&args.catalog)?;
    let contacts = load_contacts(args.contacts.as_deref())?;
    let summary = DashboardSummary::collect(&catalog, &contacts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_dashboard(&summary);
    }
    Ok(())
}

pub(crate) fn print_suggestion(position: usize, suggestion: &Suggestion) {
    let requirement = &suggestion.requirement;
    println!(
        "{}. [{}] {} ({}) score {:.2}",
        position,
        requirement.id,
        requirement.title,
        requirement.req_type.label(),
        suggestion.score
    );
    for component in &suggestion.components {
        println!(
            "     - {}: {:.2} ({})",
            component.signal.label(),
            component.score,
            component.notes
        );
    }
}

fn print_requirement(requirement: &Requirement) {
    let created = requirement
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "- [{}] {} | {} | {} | {} | {}",
        requirement.id,
        requirement.title,
        requirement.req_type.label(),
        requirement.status.label(),
        requirement.location.as_deref().unwrap_or("-"),
        created
    );
    if !requirement.tags.is_empty() {
        println!("    tags: {}", requirement.tags.joined());
    }
}

pub(crate) fn print_dashboard(summary: &DashboardSummary) {
    println!(
        "Requirements: {} total | {} open | {} closed",
        summary.requirements_total, summary.requirements_open, summary.requirements_closed
    );
    println!(
        "Contact requests: {} pending | {} accepted",
        summary.contacts_pending, summary.contacts_accepted
    );
    println!("By chamber:");
    for entry in &summary.by_chamber {
        match entry.chamber_id {
            Some(chamber) => println!("  - chamber {}: {}", chamber.0, entry.requirements),
            None => println!("  - no chamber: {}", entry.requirements),
        }
    }
}
