//! Moodjar CLI
//!
//! Runs the page initializers outside a browser:
//! - Print the validator fragment for a page
//! - Fetch mood data and print the chart configuration
//! - Run the full document-ready hook against a page
//! - Generate a default config file

use clap::{Parser, Subcommand};
use moodjar::{
    default_config_toml, init_logging, validator_markup, ChartConfig, ChartRegistry, Config,
    Document, MoodDataClient, MoodSource, PageLoad,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moodjar")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Memory Jar page initializers: validator fragment and mood chart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Origin serving /mood-data (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the validator fragment for an HTML page
    Fragment {
        /// Path to the HTML page
        path: PathBuf,
    },

    /// Fetch mood data and print the doughnut chart configuration
    Chart,

    /// Run both page initializers against an HTML page
    Load {
        /// Path to the HTML page
        path: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(base_url) = cli.base_url {
        config.page.base_url = base_url;
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    match cli.command {
        Commands::Fragment { path } => {
            let document = Document::load(&path)?;
            match validator_markup(&document) {
                Some(markup) => println!("{}", markup),
                None => {
                    eprintln!("{:?} has no doctype declaration", path);
                    std::process::exit(1);
                }
            }
        }

        Commands::Chart => {
            let client = MoodDataClient::new(&config.page)?;
            tracing::info!("Fetching {}", client.url());

            let distribution = client.fetch_mood_data().await?;
            let chart = ChartConfig::doughnut(&distribution);
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }

        Commands::Load { path } => {
            let document = Document::load(&path)?;
            let source = Arc::new(MoodDataClient::new(&config.page)?);

            let mut registry = ChartRegistry::for_document(&document);
            let mut page = PageLoad::new(document, config.page.clone());
            let report = page.ready(source, &mut registry).await?;

            println!("Validator field: {}", report.validator);
            match report.chart {
                Ok(handle) => {
                    println!("Chart mounted on #{}:", handle.element_id());
                    println!("{}", serde_json::to_string_pretty(handle.config())?);
                }
                Err(e) => {
                    eprintln!("Chart not rendered: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = default_config_toml();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
