use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "garagem")]
#[command(about = "Manage your car collection from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Car API base URL (defaults to GARAGEM_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all cars
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single car
    Show {
        /// Car ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new car
    #[command(alias = "new")]
    Add {
        /// Model name
        #[arg(long)]
        name: String,
        /// Model year
        #[arg(long)]
        year: String,
        /// Licence plate
        #[arg(long)]
        licence: String,
        /// Latitude where the car is parked
        #[arg(long)]
        lat: f64,
        /// Longitude where the car is parked
        #[arg(long)]
        long: f64,
        /// Path to a photo to upload
        #[arg(long, value_name = "PATH", conflicts_with = "image_url")]
        image: Option<PathBuf>,
        /// Photo URL to store as-is
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,
    },
    /// Edit an existing car
    Edit {
        /// Car ID
        id: String,
        /// New model name
        #[arg(long)]
        name: Option<String>,
        /// New model year
        #[arg(long)]
        year: Option<String>,
        /// New licence plate
        #[arg(long)]
        licence: Option<String>,
        /// New latitude
        #[arg(long)]
        lat: Option<f64>,
        /// New longitude
        #[arg(long)]
        long: Option<f64>,
        /// Path to a replacement photo to upload
        #[arg(long, value_name = "PATH", conflicts_with = "image_url")]
        image: Option<PathBuf>,
        /// Replacement photo URL to store as-is
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,
    },
    /// Delete a car
    #[command(alias = "rm")]
    Delete {
        /// Car ID
        id: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_requires_the_core_fields() {
        let result = Cli::try_parse_from(["garagem", "add", "--name", "Civic"]);
        assert!(result.is_err());
    }

    #[test]
    fn image_path_and_image_url_conflict() {
        let result = Cli::try_parse_from([
            "garagem", "add", "--name", "Civic", "--year", "2020", "--licence", "ABC123",
            "--lat", "1.0", "--long", "2.0", "--image", "car.jpg", "--image-url", "https://x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_api_url_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "garagem", "list", "--api-url", "https://api.example.com",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com"));
    }
}
