//! WrldBldr CAML - Command line front end
//!
//! Commands:
//! - `inspect <file>` - summarize an adventure
//! - `graph <file>` - print the adventure graph as JSON
//! - `import <file>` - print the campaign records an import would create
//! - `validate <file>` - report consistency problems, failing if any exist
//! - `convert <file> --to <json|yaml>` - re-serialize as a wrapped pack
//! - `export <rows.json> --to <json|yaml>` - build a module from campaign rows

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wrldbldr_caml::application::dto::CampaignExportBundle;
use wrldbldr_caml::application::services::{
    build_adventure_graph, convert_bundle_to_caml, convert_caml_to_campaign, validate_pack,
    CamlFormat,
};
use wrldbldr_caml::domain::aggregates::AdventurePack;
use wrldbldr_caml::domain::value_objects::EntityKind;
use wrldbldr_caml::infrastructure::config::AppConfig;
use wrldbldr_caml::infrastructure::export::{export, export_to_json};
use wrldbldr_caml::infrastructure::loader::load_adventure;

#[derive(Parser)]
#[command(name = "wrldbldr-caml")]
#[command(about = "Inspect, validate and convert CAML adventure files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reject adventures with duplicate entity ids (overrides CAML_STRICT)
    #[arg(long, global = true)]
    strict: bool,

    /// Format for files whose extension does not decide it
    #[arg(long, global = true)]
    format: Option<CamlFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize an adventure
    Inspect { file: PathBuf },
    /// Print the adventure graph as JSON
    Graph { file: PathBuf },
    /// Print the campaign records an import would create
    Import { file: PathBuf },
    /// Report consistency problems
    Validate { file: PathBuf },
    /// Re-serialize an adventure as a wrapped pack
    Convert {
        file: PathBuf,
        #[arg(long, default_value = "yaml")]
        to: CamlFormat,
    },
    /// Build a module from a JSON bundle of campaign rows
    Export {
        rows: PathBuf,
        #[arg(long, default_value = "json")]
        to: CamlFormat,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wrldbldr_caml=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    config.strict |= cli.strict;
    if let Some(format) = cli.format {
        config.default_format = format;
    }
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Inspect { file } => {
            let pack = load(&file, &config)?;
            print_summary(&pack);
        }
        Commands::Graph { file } => {
            let pack = load(&file, &config)?;
            println!("{}", export_to_json(&build_adventure_graph(&pack))?);
        }
        Commands::Import { file } => {
            let pack = load(&file, &config)?;
            println!("{}", export_to_json(&convert_caml_to_campaign(&pack))?);
        }
        Commands::Validate { file } => {
            let pack = load(&file, &config)?;
            let report = validate_pack(&pack);
            println!("{}", export_to_json(&report)?);
            report.into_result(pack.id())?;
        }
        Commands::Convert { file, to } => {
            let pack = load(&file, &config)?;
            println!("{}", export(&pack, to)?);
        }
        Commands::Export { rows, to } => {
            let content = std::fs::read_to_string(&rows)
                .with_context(|| format!("Failed to read {}", rows.display()))?;
            let bundle: CampaignExportBundle = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a campaign row bundle", rows.display()))?;
            let module = convert_bundle_to_caml(&bundle);
            println!("{}", export(&module, to)?);
        }
    }

    Ok(())
}

fn load(path: &Path, config: &AppConfig) -> Result<AdventurePack> {
    let pack = load_adventure(path, config.default_format, &config.parser())?;
    Ok(pack)
}

fn print_summary(pack: &AdventurePack) {
    let adventure = &pack.adventure;
    println!("{} ({})", adventure.title, pack.id());
    if let Some(synopsis) = &adventure.synopsis {
        println!("  {}", synopsis);
    }
    if let (Some(min), Some(max)) = (&adventure.min_level, &adventure.max_level) {
        println!("  Levels {}-{}", min, max);
    }
    println!("  Indexed entities: {}", pack.entities.len());
    for kind in EntityKind::ALL {
        let count = pack.entities.of_kind(kind).count();
        if count > 0 {
            println!("    {}: {}", kind, count);
        }
    }
    if !adventure.handouts.is_empty() {
        println!("  Handouts: {}", adventure.handouts.len());
    }
}
