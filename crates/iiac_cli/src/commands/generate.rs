//! Generate command - Resolve, render and validate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use iiac_config::ConfigLoader;
use iiac_rules::resolve;
use iiac_terraform::{list_artifacts, IacGenerator};

use super::{validate, Cli, DEFAULT_CONFIG, DEFAULT_OUTPUT};

#[derive(Args)]
pub struct GenerateArgs {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Output directory, replaced on every run
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Generate only this service
    #[arg(short, long)]
    service: Option<String>,

    /// Root directory of the template sets
    #[arg(long, env = "IIAC_TEMPLATES", default_value = "templates")]
    templates: PathBuf,

    /// Stop after generation
    #[arg(long)]
    skip_validate: bool,
}

pub async fn execute(args: &GenerateArgs, cli: &Cli) -> Result<()> {
    info!("Loading configuration from {}", args.config.display());

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    let plan = resolve(&config, args.service.as_deref()).context("Failed to resolve modules")?;

    let modules: Vec<&str> = plan.modules.iter().map(|m| m.as_str()).collect();
    info!("Resolved modules: {}", modules.join(", "));

    let terraform = cli.terraform();
    let report = IacGenerator::new(&args.templates, terraform.clone())
        .generate(&plan, &args.out)
        .await
        .context("Failed to generate Terraform files")?;

    for skipped in report.skipped() {
        debug!("{} not written: {}", skipped.file_name, skipped.render);
    }

    println!("📁 Generated files in {}:", args.out.display());
    for file in list_artifacts(&args.out)? {
        println!("   - {}", file);
    }

    if args.skip_validate {
        println!();
        println!("⏭️  Validation skipped");
        return Ok(());
    }

    println!();
    validate::run(&terraform, &args.out).await
}
