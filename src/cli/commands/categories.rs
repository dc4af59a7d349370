//! List categories command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_categories(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let categories = store.list_categories().await?;

    println!("Categories ({} total)", categories.len());
    println!("{:-<60}", "");

    for category in categories {
        println!("• {:<14} {}", category.id, category.name);
        if let Some(description) = &category.description {
            println!("  {description}");
        }
    }

    Ok(())
}
