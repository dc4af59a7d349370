//! Spot info command handler

use crate::config::Config;
use crate::domain::SpotId;

pub async fn cmd_spot_info(config: &Config, id: &str) -> anyhow::Result<()> {
    let state = super::open_state(config).await?;

    let Some(spot) = state.spot_service.get_spot(&SpotId::new(id)).await? else {
        println!("Spot {id} not found.");
        return Ok(());
    };

    println!("Spot Info");
    println!("{:-<60}", "");
    println!("Name:      {}", spot.name);
    println!("ID:        {}", spot.id);
    println!("Location:  {}, {}", spot.latitude, spot.longitude);
    if let Some(address) = &spot.address {
        println!("Address:   {address}");
    }
    println!("Owner:     {}", spot.user_id);
    println!("Rating:    {}/5", spot.hidden_gem_rating);
    println!(
        "Counts:    {} visits | {} saves",
        spot.visit_count, spot.save_count
    );

    let categories: Vec<&str> = spot.category_ids.iter().map(|c| c.as_str()).collect();
    println!("Category:  {}", categories.join(", "));

    if let Some(seasons) = &spot.best_seasons {
        let seasons: Vec<&str> = seasons.iter().map(|s| s.as_str()).collect();
        println!("Seasons:   {}", seasons.join(", "));
    }
    if let Some(times) = &spot.best_time_of_day {
        let times: Vec<&str> = times.iter().map(|t| t.as_str()).collect();
        println!("Best time: {}", times.join(", "));
    }

    println!();
    println!("{}", spot.description);

    if let Some(experience) = &spot.special_experience {
        println!();
        println!("Special experience: {experience}");
    }

    if !spot.photos.is_empty() {
        println!();
        println!("Photos:");
        for url in &spot.photos {
            println!("  {url}");
        }
    }

    let comments = state.store.get_comments(&spot.id).await?;
    if !comments.is_empty() {
        println!();
        println!("Comments ({}):", comments.len());
        for comment in comments {
            println!(
                "  [{}] {}: {}",
                comment.created_at.format("%Y-%m-%d"),
                comment.user_id,
                comment.content
            );
        }
    }

    Ok(())
}
