//! Plan command - Print the resolution plan.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use iiac_config::ConfigLoader;
use iiac_rules::resolve;

use super::DEFAULT_CONFIG;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Restrict the plan to a single service
    #[arg(short, long)]
    service: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = PlanFormat::Json)]
    format: PlanFormat,
}

pub async fn execute(args: &PlanArgs) -> Result<()> {
    info!("Planning from {}", args.config.display());

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    let plan = resolve(&config, args.service.as_deref()).context("Failed to resolve modules")?;

    let rendered = match args.format {
        PlanFormat::Json => serde_json::to_string_pretty(&plan)?,
        PlanFormat::Yaml => serde_yaml::to_string(&plan)?,
    };
    println!("{}", rendered.trim_end());

    Ok(())
}
