use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use nakuru_tourism::api::AppState;
use nakuru_tourism::{
    AttractionView, CountyMap, DataLoader, TourismConfig, VisitorYear, logging, resolve, web,
};

#[derive(Parser)]
#[command(
    name = "nakuru-tourism",
    version,
    about = "Data service behind the Nakuru County tourism dashboard"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the selectable attractions
    List,
    /// Print the dashboard data for one attraction as JSON
    Show {
        /// Attraction name, exactly as listed
        name: String,

        /// Years to chart, e.g. 2020,2023 (default: all)
        #[arg(short, long, value_delimiter = ',')]
        years: Vec<VisitorYear>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TourismConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Using configuration: {:?}", config);

    let loader = DataLoader::from_config(&config)?;
    let county_map = CountyMap::builtin();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = Arc::new(AppState::new(loader, county_map));
            web::run(&config.server, state).await?;
        }
        Commands::List => {
            let sources = loader.get().await.map_err(|e| anyhow!(e.user_message()))?;
            for name in sources.attractions.unique_names() {
                println!("{name}");
            }
        }
        Commands::Show { name, years } => {
            let sources = loader.get().await.map_err(|e| anyhow!(e.user_message()))?;
            let Some(resolution) =
                resolve(&name, &sources.attractions, &sources.boundaries, &county_map)
            else {
                bail!("Unknown attraction '{name}'. Run `list` to see the available names");
            };

            for warning in &resolution.warnings {
                eprintln!("warning: {warning}");
            }

            let years = if years.is_empty() {
                VisitorYear::ALL.to_vec()
            } else {
                years
            };
            let view = AttractionView::build(&resolution, &years, sources.boundaries.name_field());
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
