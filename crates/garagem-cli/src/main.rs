//! Garagem CLI - manage a car collection from the terminal
//!
//! Thin front-end over the shared REST repository: every subcommand maps to
//! one car operation.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garagem=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::List { json } => commands::list::run_list(cli.api_url.as_deref(), json).await,
        Commands::Show { id, json } => {
            commands::show::run_show(cli.api_url.as_deref(), &id, json).await
        }
        Commands::Add {
            name,
            year,
            licence,
            lat,
            long,
            image,
            image_url,
        } => {
            commands::add::run_add(
                cli.api_url.as_deref(),
                commands::add::AddArgs {
                    name,
                    year,
                    licence,
                    lat,
                    long,
                    image,
                    image_url,
                },
            )
            .await
        }
        Commands::Edit {
            id,
            name,
            year,
            licence,
            lat,
            long,
            image,
            image_url,
        } => {
            commands::edit::run_edit(
                cli.api_url.as_deref(),
                &id,
                commands::edit::EditArgs {
                    name,
                    year,
                    licence,
                    lat,
                    long,
                    image,
                    image_url,
                },
            )
            .await
        }
        Commands::Delete { id } => commands::delete::run_delete(cli.api_url.as_deref(), &id).await,
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
    }
}
