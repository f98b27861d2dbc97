//! Capability report utility
//!
//! Prints what the registries know: per-platform coverage, a platform's
//! mapping table, or the result of converting a single attribute value.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use smartthings_mcp_rust::{
    config::{RegistryConfig, CONFIG_PATH_ENV},
    logging::{init_logging, LogConfig},
    services::{CoverageReport, Platform, Registries, UnifiedCapability},
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum Direction {
    /// Unified value to platform value
    To,
    /// Platform value to unified value
    From,
}

/// Inspect the capability and value-conversion registries
#[derive(Parser, Debug)]
#[command(name = "smartthings-capability-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Coverage of the unified capability set per platform
    Coverage,

    /// Mapping table of one platform
    Mappings {
        #[arg(long)]
        platform: String,
    },

    /// Convert one attribute value
    Convert {
        #[arg(long)]
        platform: String,

        /// Unified capability, e.g. dimmer or color
        #[arg(long)]
        capability: String,

        #[arg(long)]
        attribute: String,

        #[arg(long, value_enum, default_value = "from")]
        direction: Direction,

        /// JSON value; anything that is not valid JSON is taken as a string
        #[arg(long)]
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RegistryConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    config.apply_env_overrides()?;

    init_logging(LogConfig::from_settings(&config.logging)?.with_debug(cli.debug))?;
    debug!(platforms = ?config.platforms, "Building registries");

    let registries = Registries::from_config(&config)?;

    match cli.command {
        Commands::Coverage => print_coverage(&registries, cli.format)?,
        Commands::Mappings { platform } => {
            print_mappings(&registries, platform.parse()?, cli.format)?
        }
        Commands::Convert {
            platform,
            capability,
            attribute,
            direction,
            value,
        } => {
            let platform: Platform = platform.parse()?;
            let capability: UnifiedCapability = capability.parse()?;
            let input = serde_json::from_str(&value).unwrap_or(Value::String(value));

            let conversions = registries.conversions();
            let output = match direction {
                Direction::To => conversions.to_platform(platform, capability, &attribute, &input)?,
                Direction::From => {
                    conversions.from_platform(platform, capability, &attribute, &input)?
                }
            };
            let converted = conversions.has_conversion(platform, capability, &attribute);

            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "platform": platform,
                        "capability": capability,
                        "attribute": attribute,
                        "input": input,
                        "output": output,
                        "converted": converted,
                    }))?
                ),
                OutputFormat::Text => {
                    println!("{input} -> {output}");
                    if !converted {
                        println!("(no conversion registered, value passed through)");
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_coverage(registries: &Registries, format: OutputFormat) -> anyhow::Result<()> {
    let report = CoverageReport::generate(
        registries.capabilities(),
        registries.conversions(),
        registries.platforms(),
    );
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{report}"),
    }
    Ok(())
}

fn print_mappings(
    registries: &Registries,
    platform: Platform,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !registries.platforms().contains(&platform) {
        bail!("platform {platform} is not enabled");
    }

    let mappings = registries.capabilities().platform_mappings(platform);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mappings)?),
        OutputFormat::Text => {
            println!("{} ({} mappings)", platform.display_name(), mappings.len());
            for mapping in mappings {
                let mut flags = Vec::new();
                if mapping.requires_value_conversion {
                    flags.push("converted".to_string());
                }
                if mapping.deprecated {
                    flags.push("deprecated".to_string());
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                println!(
                    "  {:<32} -> {:<20}{}",
                    mapping.platform_capability,
                    mapping.unified_capability.as_str(),
                    flags
                );
            }
        }
    }
    Ok(())
}
