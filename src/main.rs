use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cost_abroad::cli::{Cli, Commands};
use cost_abroad::commands::{combine, create, dashboard};
use cost_abroad::models::category::{default_categories, CategorySpec};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Create { categories } => {
            let categories = or_default(categories);
            let client = reqwest::Client::new();
            create::create_price_files(&client, &categories, &data_dir).await?;
        }
        Commands::Combine { categories } => {
            let categories = or_default(categories);
            combine::create_combined_file(&categories, &data_dir)?;
        }
        Commands::Run { categories } => {
            let categories = or_default(categories);
            info!("Running create and combine for {} categories", categories.len());
            let client = reqwest::Client::new();
            create::create_price_files(&client, &categories, &data_dir).await?;
            combine::create_combined_file(&categories, &data_dir)?;
        }
        Commands::Dashboard { output, figure } => {
            let combined = dashboard::read_combined(&data_dir)?;
            match figure {
                Some(category) => println!("{}", dashboard::update_figure(&combined, &category)?),
                None => dashboard::write_dashboard(&combined, &output)?,
            }
        }
    }

    Ok(())
}

/// Fall back to the built-in five categories when none are given.
fn or_default(categories: Vec<CategorySpec>) -> Vec<CategorySpec> {
    if categories.is_empty() {
        default_categories()
    } else {
        categories
    }
}
