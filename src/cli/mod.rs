//! CLI module - Command-line interface for Machipoke
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;

/// Machipoke - hidden spot discovery
/// Proximity and text search over locally shared places
#[derive(Parser)]
#[command(name = "machipoke")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Search spots by text, category and location
    #[command(alias = "s")]
    Search {
        /// Free-text query matched against name, description and address
        query: Vec<String>,
        /// Category id filter (repeatable)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,
        /// Center latitude
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Center longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Search radius in kilometers
        #[arg(long, short = 'r')]
        radius: Option<f64>,
        /// newest, popular or hiddenGem
        #[arg(long, default_value = "newest")]
        sort: String,
        #[arg(long, default_value = "20")]
        limit: u64,
        #[arg(long, default_value = "0")]
        offset: u64,
    },

    /// List spots around a point
    #[command(alias = "n")]
    Nearby {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in kilometers
        #[arg(long, short = 'r')]
        radius: Option<f64>,
        #[arg(long, default_value = "20")]
        limit: u64,
    },

    /// Show details about a spot
    #[command(alias = "i")]
    Info {
        /// Spot ID
        id: String,
    },

    /// List the category catalog
    #[command(alias = "cats")]
    Categories,

    /// Insert the demo spots
    Seed,

    /// Great-circle distance between two points in kilometers
    #[command(alias = "dist")]
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub async fn dispatch(
    command: Commands,
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve => commands::cmd_serve(config, prometheus_handle).await,
        Commands::Search {
            query,
            categories,
            lat,
            lon,
            radius,
            sort,
            limit,
            offset,
        } => {
            let search = commands::SearchArgs {
                query: query.join(" "),
                categories,
                center: lat.zip(lon),
                radius_km: radius,
                sort,
                limit,
                offset,
            };
            commands::cmd_search(&config, search).await
        }
        Commands::Nearby {
            lat,
            lon,
            radius,
            limit,
        } => commands::cmd_nearby(&config, lat, lon, radius, limit).await,
        Commands::Info { id } => commands::cmd_spot_info(&config, &id).await,
        Commands::Categories => commands::cmd_categories(&config).await,
        Commands::Seed => commands::cmd_seed(&config).await,
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            commands::cmd_distance(lat1, lon1, lat2, lon2);
            Ok(())
        }
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "machipoke", "search", "old", "cafe", "-c", "food", "--lat", "-33.86", "--lon",
            "151.2", "--sort", "popular",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Search {
                query,
                categories,
                lat,
                lon,
                sort,
                ..
            }) => {
                assert_eq!(query, vec!["old", "cafe"]);
                assert_eq!(categories, vec!["food"]);
                assert_eq!(lat, Some(-33.86));
                assert_eq!(lon, Some(151.2));
                assert_eq!(sort, "popular");
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Cli::try_parse_from(["machipoke", "search", "--lat", "35.0"]).is_err());
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::try_parse_from(["machipoke"]).unwrap();
        assert!(cli.command.is_none());
    }
}
