//! Search and nearby command handlers

use crate::config::Config;
use crate::domain::{Page, SearchResult, SortBy, SpotSearchParams};

pub struct SearchArgs {
    pub query: String,
    pub categories: Vec<String>,
    pub center: Option<(f64, f64)>,
    pub radius_km: Option<f64>,
    pub sort: String,
    pub limit: u64,
    pub offset: u64,
}

pub async fn cmd_search(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let sort_by: SortBy = args.sort.parse()?;

    let mut params = SpotSearchParams::new()
        .with_query(args.query)
        .with_categories(args.categories)
        .with_page(Page::new(args.limit, args.offset))
        .sorted_by(sort_by);

    if let Some((lat, lon)) = args.center {
        let radius = args.radius_km.unwrap_or(config.search.default_radius_km);
        params = params.near(lat, lon, radius);
    }

    let state = super::open_state(config).await?;
    let result = state.spot_service.search_spots(&params).await?;

    print_results(&result, params.center(), args.offset);
    Ok(())
}

pub async fn cmd_nearby(
    config: &Config,
    lat: f64,
    lon: f64,
    radius_km: Option<f64>,
    limit: u64,
) -> anyhow::Result<()> {
    let radius = radius_km.unwrap_or(config.search.default_radius_km);
    println!("Spots within ~{radius} km of ({lat}, {lon})");

    let state = super::open_state(config).await?;
    let result = state
        .spot_service
        .nearby_spots(lat, lon, radius, Page::new(limit, 0))
        .await?;

    print_results(&result, Some((lat, lon)), 0);
    Ok(())
}

fn print_results(result: &SearchResult, center: Option<(f64, f64)>, offset: u64) {
    if result.spots.is_empty() {
        println!("No spots found.");
        return;
    }

    println!();
    println!(
        "Showing {} of {} spots",
        result.spots.len(),
        result.total_count
    );
    println!("{:-<70}", "");

    for (i, spot) in (offset + 1..).zip(&result.spots) {
        let distance = center
            .map(|(lat, lon)| format!(" | {:.2} km", spot.distance_to(lat, lon)))
            .unwrap_or_default();
        let categories: Vec<&str> = spot.category_ids.iter().map(|c| c.as_str()).collect();

        let stars = usize::try_from(spot.hidden_gem_rating).unwrap_or(0).min(5);
        println!("[{i}] {} {}", spot.name, "★".repeat(stars));
        println!(
            "    ID: {} | {} | visits {} | saves {}{distance}",
            spot.id,
            categories.join(", "),
            spot.visit_count,
            spot.save_count
        );
    }

    if result.has_more {
        println!();
        println!("More results available, use --offset to page.");
    }
}
