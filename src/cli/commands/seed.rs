//! Demo data command handler

use crate::config::Config;
use crate::domain::{CategoryId, NewSpot, Season, SpotId, TimeOfDay, UserId};
use tracing::info;

fn demo_spots() -> Vec<NewSpot> {
    vec![
        NewSpot {
            id: Some(SpotId::new("demo-cherry-blossom-lane")),
            name: "Secret Cherry Blossom Lane".to_string(),
            description: "A cherry blossom lane known mostly to locals. In spring the trees \
                          form a tunnel of blossoms."
                .to_string(),
            latitude: 35.689,
            longitude: 139.692,
            address: Some("Shinjuku, Tokyo".to_string()),
            category_ids: vec![CategoryId::new("nature"), CategoryId::new("photo")],
            user_id: UserId::new("demo-user"),
            photos: vec![
                "/api/images/sample-sakura.jpg".to_string(),
                "/api/images/sample-sakura-path.jpg".to_string(),
            ],
            best_seasons: Some(vec![Season::Spring]),
            best_time_of_day: Some(vec![TimeOfDay::Morning, TimeOfDay::Evening]),
            hidden_gem_rating: 4,
            special_experience: Some(
                "Arrive early in the morning to have the blossoms almost to yourself.".to_string(),
            ),
            visit_count: Some(42),
            save_count: Some(15),
            ..Default::default()
        },
        NewSpot {
            id: Some(SpotId::new("demo-kominka-cafe")),
            name: "Old House Cafe \"Toki no Nagare\"".to_string(),
            description: "A cafe in a renovated 150-year-old house serving dishes made with \
                          vegetables and fruit from nearby farms."
                .to_string(),
            latitude: 35.021,
            longitude: 135.759,
            address: Some("Kyoto, Kyoto".to_string()),
            category_ids: vec![CategoryId::new("food"), CategoryId::new("history")],
            user_id: UserId::new("local-guide"),
            photos: vec![
                "/api/images/sample-cafe.jpg".to_string(),
                "/api/images/sample-garden.jpg".to_string(),
            ],
            best_seasons: Some(vec![Season::Spring, Season::Autumn]),
            best_time_of_day: Some(vec![TimeOfDay::Daytime, TimeOfDay::Evening]),
            hidden_gem_rating: 5,
            special_experience: Some(
                "Ask the owner and you may step out into the small garden behind the back room."
                    .to_string(),
            ),
            visit_count: Some(78),
            save_count: Some(34),
            ..Default::default()
        },
    ]
}

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let state = super::open_state(config).await?;

    let mut created = 0;
    for spot in demo_spots() {
        if let Some(id) = &spot.id
            && state.spot_service.get_spot(id).await?.is_some()
        {
            println!("• {} already present, skipping", spot.name);
            continue;
        }

        let spot = state.spot_service.create_spot(spot).await?;
        info!(spot_id = %spot.id, "Seeded demo spot");
        println!("✓ {} ({})", spot.name, spot.id);
        created += 1;
    }

    println!();
    println!("Seeded {created} demo spot(s).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::categories::CATALOG;

    #[test]
    fn test_demo_spots_use_catalog_categories() {
        for spot in demo_spots() {
            for category in &spot.category_ids {
                assert!(
                    CATALOG.iter().any(|(id, ..)| *id == category.as_str()),
                    "unknown category {category}"
                );
            }
            assert!(!spot.photos.is_empty());
            assert!((1..=5).contains(&spot.hidden_gem_rating));
        }
    }
}
