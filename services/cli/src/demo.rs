use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use clap::Args;
use market_match::config::AppConfig;
use market_match::error::AppError;
use market_match::marketplace::contacts::{ContactDecision, ContactService};
use market_match::marketplace::dashboard::DashboardSummary;
use market_match::marketplace::listing::{
    ChamberId, ListingService, NewRequirement, RequirementType, Urgency, UserId,
};
use market_match::marketplace::suggestions::SuggestionService;
use market_match::marketplace::Matcher;

use crate::commands::{print_dashboard, print_suggestion};
use crate::infra::{InMemoryContactRepository, InMemoryListingRepository};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of suggestions to show (defaults to APP_SUGGESTION_LIMIT)
    #[arg(long)]
    top_k: Option<usize>,
}

struct SampleListing {
    owner: u64,
    company: &'static str,
    chamber: u64,
    req_type: RequirementType,
    title: &'static str,
    description: &'static str,
    tags: &'static str,
    category: &'static str,
    location: &'static str,
    urgency: Option<Urgency>,
}

const SAMPLE_CATALOG: &[SampleListing] = &[
    SampleListing {
        owner: 1,
        company: "Metalúrgica Paraná",
        chamber: 1,
        req_type: RequirementType::Need,
        title: "Tornillos de acero inoxidable M6",
        description: "Buscamos proveedor mensual de tornillos inoxidables para línea de montaje",
        tags: "tornillos, acero",
        category: "Ferretería",
        location: "Rosario",
        urgency: Some(Urgency::High),
    },
    SampleListing {
        owner: 2,
        company: "Bulonera del Litoral",
        chamber: 1,
        req_type: RequirementType::Offer,
        title: "Tornillos inoxidables y bulones",
        description: "Stock permanente de tornillería en acero inoxidable, entrega en 48 horas",
        tags: "tornillos, bulones",
        category: "Ferretería",
        location: "Rosario",
        urgency: None,
    },
    SampleListing {
        owner: 3,
        company: "Cartonera Central",
        chamber: 2,
        req_type: RequirementType::Offer,
        title: "Cajas de cartón corrugado",
        description: "Fabricamos cajas a medida para envíos industriales",
        tags: "embalaje",
        category: "Embalaje",
        location: "Córdoba",
        urgency: None,
    },
    SampleListing {
        owner: 4,
        company: "Transportes Santa Fe",
        chamber: 2,
        req_type: RequirementType::Offer,
        title: "Flete refrigerado",
        description: "Transporte de cargas con cadena de frío entre Rosario y Santa Fe",
        tags: "logística, transporte",
        category: "Logística",
        location: "Santa Fe",
        urgency: Some(Urgency::Medium),
    },
];

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let top_k = args.top_k.unwrap_or(config.matching.suggestion_limit);
    let start = Utc::now().naive_utc();

    println!("Marketplace matching demo");
    let listings = Arc::new(InMemoryListingRepository::default());
    let listing_service = ListingService::new(Arc::clone(&listings));

    let mut published = Vec::with_capacity(SAMPLE_CATALOG.len());
    for (offset, sample) in SAMPLE_CATALOG.iter().enumerate() {
        let requirement = listing_service.publish(submission(sample), minutes_after(start, offset))?;
        println!(
            "- Published [{}] {} ({}) by {}",
            requirement.id,
            requirement.title,
            requirement.req_type.label(),
            requirement.company
        );
        published.push(requirement);
    }

    let Some(need) = published
        .iter()
        .find(|requirement| requirement.req_type == RequirementType::Need)
    else {
        println!("  Sample catalog has no needs to match.");
        return Ok(());
    };

    println!("\nSuggestions for [{}] {}", need.id, need.title);
    let suggestions = SuggestionService::new(Arc::clone(&listings), Matcher::default())
        .suggest(need.id, top_k)?;
    for (position, suggestion) in suggestions.iter().enumerate() {
        print_suggestion(position + 1, suggestion);
    }

    let Some(best) = suggestions.iter().find(|suggestion| suggestion.is_relevant()) else {
        println!("  No relevant offers; skipping the contact exchange.");
        return Ok(());
    };

    println!("\nContact exchange");
    let contacts = Arc::new(InMemoryContactRepository::default());
    let contact_service = ContactService::new(Arc::clone(&contacts), Arc::clone(&listings));
    let offer = &best.requirement;

    let request = contact_service.request(need.owner, offer.id, minutes_after(start, 10))?;
    println!(
        "- User {} asked user {} about [{}] -> {}",
        request.from_user.0,
        request.to_user.0,
        offer.id,
        request.status.label()
    );
    let visible = contact_service.can_view_contact(need.owner, offer.owner, offer.id)?;
    println!("  Contact visible before answer: {}", visible);

    let answered =
        contact_service.respond(request.id, ContactDecision::Accept, minutes_after(start, 20))?;
    println!("- Request {} {}", answered.id.0, answered.status.label());
    let visible = contact_service.can_view_contact(need.owner, offer.owner, offer.id)?;
    println!("  Contact visible after answer: {}", visible);

    let closed = listing_service.close(need.id, minutes_after(start, 30))?;
    println!("- Closed [{}] {}", closed.id, closed.title);

    println!("\nDashboard");
    let summary = DashboardSummary::collect(&listings.snapshot(), &contact_service.sent(need.owner)?);
    print_dashboard(&summary);
    Ok(())
}

fn submission(sample: &SampleListing) -> NewRequirement {
    NewRequirement {
        owner: UserId(sample.owner),
        company: sample.company.to_string(),
        chamber_id: Some(ChamberId(sample.chamber)),
        req_type: sample.req_type,
        title: sample.title.to_string(),
        description: sample.description.to_string(),
        tags: sample.tags.to_string(),
        category: Some(sample.category.to_string()),
        location: Some(sample.location.to_string()),
        urgency: sample.urgency,
    }
}

fn minutes_after(start: NaiveDateTime, minutes: usize) -> NaiveDateTime {
    start + Duration::minutes(minutes as i64)
}
