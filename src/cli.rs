use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::category::CategorySpec;

#[derive(Parser, Debug)]
#[command(name = "cost-abroad")]
#[command(about = "Compare cost of living price levels across Europe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the persisted price files
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and persist one price file per category
    Create {
        /// Categories as name=code pairs (defaults to the built-in five)
        categories: Vec<CategorySpec>,
    },

    /// Combine persisted price files into one file with an overall average
    Combine {
        /// Categories as name=code pairs (defaults to the built-in five)
        categories: Vec<CategorySpec>,
    },

    /// Create then combine in one go
    Run {
        /// Categories as name=code pairs (defaults to the built-in five)
        categories: Vec<CategorySpec>,
    },

    /// Render the combined file as an interactive choropleth map
    Dashboard {
        /// Output HTML file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,

        /// Print one category's figure JSON to stdout instead of writing HTML
        #[arg(long)]
        figure: Option<String>,
    },
}
